//! Response types shared by the check and blacklist endpoints.

use serde::Deserialize;
use serde_json::Value;

/// Envelope wrapping every JSON response from the API.
///
/// AbuseIPDB nests the payload of interest under a top-level `data` key,
/// for both single-address checks and the structured blacklist.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// The payload of the response
    pub data: T,
}

/// A single check result.
///
/// The service reports a shifting set of fields per address (confidence
/// score, report count, usage type, ISP, ...). The client passes the record
/// through to formatting untouched, preserving the field order the service
/// sent, so callers always see exactly what the API returned.
pub type CheckReport = Value;
