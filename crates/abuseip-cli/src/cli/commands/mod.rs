//! Command implementations.

pub mod check;
pub mod nginx;

use std::io::Write;

use abuseip_client::AbuseIpClient;

/// Shared context for all commands.
pub struct Context {
    /// API client
    pub client: AbuseIpClient,

    /// Where rendered output goes (console or file)
    pub sink: Box<dyn Write>,
}
