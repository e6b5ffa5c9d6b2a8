use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

/// Errors from retrieving the exchange rate
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("rate request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("rate service returned HTTP {0}")]
    Status(StatusCode),

    #[error("response has no numeric rate at '{0}'")]
    MissingRate(String),

    #[error("rate {0} is not a positive finite number")]
    InvalidRate(f64),
}

/// Remote source of the IDR-per-USD rate
///
/// Each call is independent; implementations keep no state between calls.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rate(&self) -> Result<f64, FetchError>;
}

/// Reject rates that cannot act as a conversion factor
pub fn validate_rate(rate: f64) -> Result<f64, FetchError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(FetchError::InvalidRate(rate))
    }
}

/// Pull the rate out of a JSON body using a JSON pointer (`""` = whole body)
pub fn extract_rate(body: &serde_json::Value, pointer: &str) -> Result<f64, FetchError> {
    let rate = body
        .pointer(pointer)
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| FetchError::MissingRate(pointer.to_string()))?;

    validate_rate(rate)
}

#[derive(Clone)]
pub struct HttpRateSource {
    url: String,
    pointer: String,
    client: Client,
}

impl HttpRateSource {
    pub fn new(url: String, pointer: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url,
            pointer,
            client,
        })
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_rate(&self) -> Result<f64, FetchError> {
        debug!("fetching exchange rate from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body: serde_json::Value = response.json().await?;
        let rate = extract_rate(&body, &self.pointer)?;

        debug!("rate service answered {}", rate);
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_rate_from_nested_field() {
        let body = json!({ "result": "success", "rates": { "IDR": 16500.5, "EUR": 0.92 } });
        assert_eq!(extract_rate(&body, "/rates/IDR").unwrap(), 16500.5);
    }

    #[test]
    fn test_extract_rate_from_bare_number() {
        let body = json!(16500);
        assert_eq!(extract_rate(&body, "").unwrap(), 16500.0);
    }

    #[test]
    fn test_extract_rate_missing_field() {
        let body = json!({ "rates": { "EUR": 0.92 } });
        let err = extract_rate(&body, "/rates/IDR").unwrap_err();
        assert!(matches!(err, FetchError::MissingRate(ref p) if p == "/rates/IDR"));
    }

    #[test]
    fn test_extract_rate_non_numeric_field() {
        let body = json!({ "rates": { "IDR": "16500" } });
        assert!(matches!(
            extract_rate(&body, "/rates/IDR"),
            Err(FetchError::MissingRate(_))
        ));
    }

    #[test]
    fn test_extract_rate_rejects_non_positive() {
        let body = json!({ "rates": { "IDR": 0 } });
        assert!(matches!(
            extract_rate(&body, "/rates/IDR"),
            Err(FetchError::InvalidRate(_))
        ));
    }

    #[test]
    fn test_validate_rate() {
        assert_eq!(validate_rate(16500.0).unwrap(), 16500.0);
        assert!(validate_rate(-1.0).is_err());
        assert!(validate_rate(f64::NAN).is_err());
    }
}
