//! Bulk blacklist endpoint.

use crate::AbuseIpClient;
use abuseip_core::{ApiEnvelope, Result};
use serde_json::Value;

/// Default confidence threshold for a listing
const DEFAULT_CONFIDENCE_MINIMUM: u32 = 100;

/// Blacklist API endpoints
pub struct BlacklistApi<'a> {
    client: &'a AbuseIpClient,
}

impl<'a> BlacklistApi<'a> {
    pub(crate) fn new(client: &'a AbuseIpClient) -> Self {
        Self { client }
    }

    /// Fetch the blacklist of high-confidence abusive addresses
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let raw = client.blacklist().fetch().confidence_minimum(95).plaintext().await?;
    /// for address in raw.lines() {
    ///     println!("deny {address};");
    /// }
    /// ```
    #[must_use]
    pub fn fetch(&self) -> BlacklistRequestBuilder<'a> {
        BlacklistRequestBuilder::new(self.client)
    }
}

/// Builder for blacklist requests
pub struct BlacklistRequestBuilder<'a> {
    client: &'a AbuseIpClient,
    confidence_minimum: u32,
}

impl<'a> BlacklistRequestBuilder<'a> {
    fn new(client: &'a AbuseIpClient) -> Self {
        Self {
            client,
            confidence_minimum: DEFAULT_CONFIDENCE_MINIMUM,
        }
    }

    /// Minimum confidence (0-100) the service must have that an address is
    /// abusive before listing it
    #[must_use]
    pub fn confidence_minimum(mut self, minimum: u32) -> Self {
        self.confidence_minimum = minimum;
        self
    }

    /// Fetch the blacklist as structured records
    pub async fn records(self) -> Result<Vec<Value>> {
        let minimum = self.confidence_minimum.to_string();
        let params = [("confidenceMinimum", minimum.as_str())];

        let envelope: ApiEnvelope<Vec<Value>> = self
            .client
            .get_with_query("/api/v2/blacklist", &params)
            .await?;
        Ok(envelope.data)
    }

    /// Fetch the blacklist as raw newline-delimited addresses
    pub async fn plaintext(self) -> Result<String> {
        let minimum = self.confidence_minimum.to_string();
        let params = [
            ("confidenceMinimum", minimum.as_str()),
            ("plaintext", "1"),
        ];

        self.client
            .get_text_with_query("/api/v2/blacklist", &params)
            .await
    }
}
