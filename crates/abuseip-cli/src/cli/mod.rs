//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use abuseip_client::AbuseIpClient;

use crate::sink;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so they never mix with report output.
    tracing_subscriber::fmt()
        .with_max_level(cli.log.filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = commands::Context {
        client: AbuseIpClient::new(),
        sink: sink::open(cli.output.as_deref())?,
    };

    match cli.command {
        Commands::Check(args) => commands::check::execute(ctx, args).await,
        Commands::Nginx(args) => commands::nginx::execute(ctx, args).await,
    }
}
