//! Basic example demonstrating an AbuseIPDB lookup.
//!
//! Run with: cargo run --example check_ip
//!
//! Put your API key in an `.apikey` file (`APIKEY=...`) in the current
//! directory, or point the APIKEY environment variable at one.

use abuseip_client::{AbuseIpClient, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Create client; the key is resolved from `.apikey` on first use
    let client = AbuseIpClient::new();

    // Look up a single address, considering reports from the last 90 days
    println!("=== Check: 118.25.6.39 ===");
    let report = client
        .check()
        .ip("118.25.6.39")
        .max_age_days("90")
        .send()
        .await?;
    println!("Score: {}", report["abuseConfidenceScore"]);
    println!("Reports: {}", report["totalReports"]);
    println!("ISP: {}", report["isp"]);
    println!();

    // Pull the high-confidence blacklist and render deny directives
    println!("=== Blacklist (confidence >= 95, first 10) ===");
    let raw = client
        .blacklist()
        .fetch()
        .confidence_minimum(95)
        .plaintext()
        .await?;
    for address in raw.lines().take(10) {
        println!("deny {address};");
    }

    Ok(())
}
