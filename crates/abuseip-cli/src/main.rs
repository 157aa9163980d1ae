//! abuseip - AbuseIPDB command-line client.
//!
//! Check the abuse status of specific IPs, or pull the blacklist of
//! high-confidence abusers formatted for nginx.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    abuseip_cli::run().await
}
