//! HTTP client for the AbuseIPDB API.
//!
//! This crate provides the main [`AbuseIpClient`] for interacting with the
//! AbuseIPDB API, and the [`KeyStore`] that resolves the API key from
//! `.apikey` files.

mod client;
mod keyfile;
pub mod api;

pub use abuseip_core::{AbuseIpError, Result};
pub use client::{AbuseIpClient, AbuseIpClientBuilder};
pub use keyfile::KeyStore;
