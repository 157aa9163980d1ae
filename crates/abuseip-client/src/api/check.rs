//! Single-address check endpoint.

use crate::AbuseIpClient;
use abuseip_core::{ApiEnvelope, CheckReport, Result};

/// Check API endpoints
pub struct CheckApi<'a> {
    client: &'a AbuseIpClient,
}

impl<'a> CheckApi<'a> {
    pub(crate) fn new(client: &'a AbuseIpClient) -> Self {
        Self { client }
    }

    /// Check the abuse status of one address
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let report = client.check().ip("118.25.6.39").max_age_days("90").send().await?;
    /// println!("Score: {}", report["abuseConfidenceScore"]);
    /// ```
    #[must_use]
    pub fn ip(&self, address: impl Into<String>) -> CheckRequestBuilder<'a> {
        CheckRequestBuilder::new(self.client, address.into())
    }

    /// Check several addresses sequentially, one request at a time,
    /// preserving input order in the result.
    ///
    /// Each address fails independently: a rejected or unreachable lookup
    /// yields an `Err` slot and the rest of the batch still runs.
    pub async fn many(
        &self,
        addresses: &[String],
        max_age_days: Option<&str>,
        verbose: bool,
    ) -> Vec<Result<CheckReport>> {
        let mut results = Vec::with_capacity(addresses.len());

        for address in addresses {
            let mut request = self.ip(address.clone()).verbose(verbose);
            if let Some(days) = max_age_days {
                request = request.max_age_days(days);
            }
            results.push(request.send().await);
        }

        results
    }
}

/// Builder for check requests
pub struct CheckRequestBuilder<'a> {
    client: &'a AbuseIpClient,
    address: String,
    max_age_days: Option<String>,
    verbose: bool,
}

impl<'a> CheckRequestBuilder<'a> {
    fn new(client: &'a AbuseIpClient, address: String) -> Self {
        Self {
            client,
            address,
            max_age_days: None,
            verbose: false,
        }
    }

    /// Only consider reports at most this many days old.
    ///
    /// The filter is forwarded to the service only when the value is a
    /// plain run of digits; anything else is dropped from the request.
    #[must_use]
    pub fn max_age_days(mut self, days: impl Into<String>) -> Self {
        self.max_age_days = Some(days.into());
        self
    }

    /// Request the verbose report, including individual reports
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Execute the request
    pub async fn send(self) -> Result<CheckReport> {
        let mut params = vec![("ipAddress", self.address.as_str())];

        if let Some(days) = self.max_age_days.as_deref() {
            if is_digits(days) {
                params.push(("maxAgeInDays", days));
            }
        }
        if self.verbose {
            params.push(("verbose", "true"));
        }

        let envelope: ApiEnvelope<CheckReport> = self
            .client
            .get_with_query("/api/v2/check", &params)
            .await?;
        Ok(envelope.data)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AbuseIpClient, AbuseIpError, KeyStore};
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".apikey"), "APIKEY=test-key\n").unwrap();
        dir
    }

    fn client_for(server: &MockServer, keys: &TempDir) -> AbuseIpClient {
        AbuseIpClient::builder()
            .base_url(server.uri())
            .key_store(KeyStore::new())
            .key_dir(keys.path())
            .build()
    }

    fn check_body(address: &str, score: u64) -> serde_json::Value {
        json!({ "data": { "ipAddress": address, "abuseConfidenceScore": score } })
    }

    #[tokio::test]
    async fn test_check_sends_key_and_accept_headers() {
        let server = MockServer::start().await;
        let keys = key_dir();

        Mock::given(method("GET"))
            .and(path("/api/v2/check"))
            .and(query_param("ipAddress", "1.2.3.4"))
            .and(header("Key", "test-key"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(check_body("1.2.3.4", 7)))
            .expect(1)
            .mount(&server)
            .await;

        let report = client_for(&server, &keys)
            .check()
            .ip("1.2.3.4")
            .send()
            .await
            .unwrap();
        assert_eq!(report["abuseConfidenceScore"], 7);
    }

    #[tokio::test]
    async fn test_age_filter_included_for_digits() {
        let server = MockServer::start().await;
        let keys = key_dir();

        Mock::given(method("GET"))
            .and(path("/api/v2/check"))
            .and(query_param("maxAgeInDays", "30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(check_body("1.2.3.4", 0)))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server, &keys)
            .check()
            .ip("1.2.3.4")
            .max_age_days("30")
            .send()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_age_filter_dropped_when_not_digits() {
        let server = MockServer::start().await;
        let keys = key_dir();

        Mock::given(method("GET"))
            .and(path("/api/v2/check"))
            .and(query_param_is_missing("maxAgeInDays"))
            .respond_with(ResponseTemplate::new(200).set_body_json(check_body("1.2.3.4", 0)))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server, &keys);
        client
            .check()
            .ip("1.2.3.4")
            .max_age_days("abc")
            .send()
            .await
            .unwrap();
        client.check().ip("1.2.3.4").send().await.unwrap();
    }

    #[tokio::test]
    async fn test_verbose_sent_as_literal_true() {
        let server = MockServer::start().await;
        let keys = key_dir();

        Mock::given(method("GET"))
            .and(path("/api/v2/check"))
            .and(query_param("verbose", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(check_body("1.2.3.4", 0)))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server, &keys)
            .check()
            .ip("1.2.3.4")
            .verbose(true)
            .send()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_dedicated_variant() {
        let server = MockServer::start().await;
        let keys = key_dir();

        Mock::given(method("GET"))
            .and(path("/api/v2/check"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "errors": [{ "detail": "Authentication failed.", "status": 401 }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, &keys)
            .check()
            .ip("1.2.3.4")
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err, AbuseIpError::Unauthorized));
    }

    #[tokio::test]
    async fn test_error_detail_taken_from_body() {
        let server = MockServer::start().await;
        let keys = key_dir();

        Mock::given(method("GET"))
            .and(path("/api/v2/check"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "errors": [{
                    "detail": "The ip address must be a valid IPv4 or IPv6 address.",
                    "status": 422
                }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, &keys)
            .check()
            .ip("not-an-ip")
            .send()
            .await
            .unwrap_err();
        match err {
            AbuseIpError::Api { code, message } => {
                assert_eq!(code, 422);
                assert!(message.contains("valid IPv4 or IPv6"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_many_preserves_order_past_failures() {
        let server = MockServer::start().await;
        let keys = key_dir();

        Mock::given(method("GET"))
            .and(path("/api/v2/check"))
            .and(query_param("ipAddress", "10.0.0.1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(check_body("10.0.0.1", 1)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/check"))
            .and(query_param("ipAddress", "10.0.0.2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/check"))
            .and(query_param("ipAddress", "10.0.0.3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(check_body("10.0.0.3", 3)))
            .mount(&server)
            .await;

        let addresses = vec![
            "10.0.0.1".to_string(),
            "10.0.0.2".to_string(),
            "10.0.0.3".to_string(),
        ];
        let results = client_for(&server, &keys)
            .check()
            .many(&addresses, None, false)
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap()["ipAddress"], "10.0.0.1");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap()["ipAddress"], "10.0.0.3");
    }

    #[tokio::test]
    async fn test_missing_key_sends_no_key_header() {
        let server = MockServer::start().await;
        let empty = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/v2/check"))
            .respond_with(ResponseTemplate::new(200).set_body_json(check_body("1.2.3.4", 0)))
            .mount(&server)
            .await;

        client_for(&server, &empty)
            .check()
            .ip("1.2.3.4")
            .send()
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("Key"));
    }

    #[test]
    fn test_is_digits() {
        assert!(is_digits("30"));
        assert!(is_digits("0"));
        assert!(!is_digits(""));
        assert!(!is_digits("abc"));
        assert!(!is_digits("-1"));
        assert!(!is_digits("3.5"));
    }
}
