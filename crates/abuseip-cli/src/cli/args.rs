//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Command-line client for the AbuseIPDB reputation service
///
/// Check the abuse status of specific addresses, or pull the blacklist of
/// high-confidence abusers as nginx deny directives.
///
/// The API key is read from the APIKEY entry of an `.apikey` file in the
/// current directory (the APIKEY environment variable overrides the path).
#[derive(Parser, Debug)]
#[command(name = "abuseip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Write output to a file instead of the console
    ///
    /// A pre-existing file at the path is preserved as `<path>.prev`.
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Log verbosity
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        ignore_case = true,
        default_value = "info"
    )]
    pub log: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the abuse status of one or more IP addresses
    Check(CheckArgs),

    /// Emit the blacklist as nginx deny directives
    Nginx(NginxArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// IP addresses to check (IPv4 or IPv6)
    #[arg(required = true)]
    pub ips: Vec<String>,

    /// Only consider reports at most this many days old
    ///
    /// Ignored unless the value is a plain run of digits.
    #[arg(short, long, default_value = "30")]
    pub days: String,

    /// Request the verbose report, including individual reports
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct NginxArgs {
    /// Minimum confidence (0-100) for an address to be listed
    #[arg(short, long, default_value_t = 100)]
    pub min: u32,
}

/// Log severity levels accepted by `--log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Map to a tracing level filter. `Critical` has no tracing
    /// counterpart and clamps to `ERROR`.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error | Self::Critical => LevelFilter::ERROR,
        }
    }
}
