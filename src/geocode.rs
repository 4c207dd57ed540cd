//! Google Geocoding adapter and service-region membership.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::traits::Geocoder;

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("geocoder returned status {0}")]
    Status(String),
    #[error("no geocoding result for {0:?}")]
    NoResult(String),
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub api_key: String,
    pub language: String,
    /// ccTLD region bias, e.g. "ca".
    pub region: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
            api_key: String::new(),
            language: "en".to_string(),
            region: "ca".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    config: GeocoderConfig,
    client: reqwest::blocking::Client,
}

impl GoogleGeocoder {
    pub fn new(config: GeocoderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for GoogleGeocoder {
    fn resolve(&self, address: &str) -> Result<String, GeocodeError> {
        let body = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("address", address),
                ("key", self.config.api_key.as_str()),
                ("language", self.config.language.as_str()),
                ("region", self.config.region.as_str()),
            ])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<GeocodeResponse>())?;

        match body.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(GeocodeError::NoResult(address.to_string())),
            other => {
                warn!(status = other, "geocoder refused request");
                return Err(GeocodeError::Status(other.to_string()));
            }
        }

        let formatted = body
            .results
            .into_iter()
            .next()
            .map(|result| result.formatted_address)
            .ok_or_else(|| GeocodeError::NoResult(address.to_string()))?;
        debug!(address, formatted = %formatted, "address geocoded");
        Ok(formatted)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
}

/// Service-region gate: an address is inside the region when its formatted
/// form contains the configured locality label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFilter {
    label: String,
}

impl RegionFilter {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn contains(&self, formatted_address: &str) -> bool {
        formatted_address.contains(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_membership_is_substring_match() {
        let region = RegionFilter::new("London, ON");
        assert!(region.contains("123 Main St, London, ON N6A 1A1, Canada"));
        assert!(!region.contains("123 Main St, Toronto, ON M5V 2T6, Canada"));
        assert!(!region.contains("London, UK"));
    }

    #[test]
    fn test_region_match_is_case_sensitive() {
        let region = RegionFilter::new("London, ON");
        assert!(!region.contains("london, on"));
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "status": "OK",
            "results": [
                {"formatted_address": "1151 Richmond St, London, ON N6A 3K7, Canada"},
                {"formatted_address": "ignored"}
            ]
        }"#;
        let body: GeocodeResponse = serde_json::from_str(json).expect("valid geocode json");
        assert_eq!(body.status, "OK");
        assert_eq!(
            body.results[0].formatted_address,
            "1151 Richmond St, London, ON N6A 3K7, Canada"
        );
    }

    #[test]
    fn test_zero_results_parsing() {
        let body: GeocodeResponse =
            serde_json::from_str(r#"{"status": "ZERO_RESULTS"}"#).expect("valid json");
        assert!(body.results.is_empty());
    }
}
