//! # abuseip-cli
//!
//! Command-line client for the AbuseIPDB reputation service.
//!
//! ## Features
//!
//! - **check**: abuse reports for one or more addresses as pretty JSON
//! - **nginx**: the high-confidence blacklist as `deny <ip>;` directives
//! - Output to the console or to a file, preserving any existing file at
//!   the destination as `<path>.prev`

pub mod cli;
pub mod output;
pub mod sink;

pub use cli::run;
