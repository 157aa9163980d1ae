//! Core types and error handling for the AbuseIPDB API client.
//!
//! This crate provides the foundational types used across the library:
//!
//! - **Types**: the response envelope and the pass-through check report
//! - **Errors**: error handling with [`AbuseIpError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use abuseip_core::{CheckReport, AbuseIpError, Result};
//!
//! fn summarize(report: &CheckReport) -> Result<()> {
//!     println!("Score: {}", report["abuseConfidenceScore"]);
//!     Ok(())
//! }
//! ```

mod error;
pub mod types;

pub use error::{AbuseIpError, Result};
pub use types::*;
