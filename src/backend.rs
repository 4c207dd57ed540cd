//! HTTP adapter for the route-rating and contact endpoints.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::contact::{ContactMessage, EmailError};
use crate::model::{Route, RouteResultSet};
use crate::traits::{ContactMailer, RouteProvider};

const RATING_PATH: &str = "/api/calc_rating";
const EMAIL_PATH: &str = "/api/email";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("route request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("route service responded with {0}")]
    Status(StatusCode),
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    client: reqwest::blocking::Client,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

impl RouteProvider for BackendClient {
    fn fetch_routes(&self, start: &str, end: &str) -> Result<RouteResultSet, FetchError> {
        let url = self.endpoint(RATING_PATH);
        let response = self
            .client
            .post(&url)
            .json(&RatingRequest { start, end })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "rating request rejected");
            return Err(FetchError::Status(status));
        }

        let body = response.json::<RatingResponse>()?;
        debug!(count = body.data.len(), "rating response received");
        Ok(RouteResultSet::new(body.data))
    }
}

impl ContactMailer for BackendClient {
    fn send(&self, message: &ContactMessage) -> Result<(), EmailError> {
        let url = self.endpoint(EMAIL_PATH);
        let response = self.client.post(&url).json(message).send()?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        warn!(%url, %status, "email request rejected");
        Err(EmailError::Rejected(format!("{status}: {body}")))
    }
}

#[derive(Debug, Serialize)]
struct RatingRequest<'a> {
    start: &'a str,
    end: &'a str,
}

#[derive(Debug, Deserialize)]
struct RatingResponse {
    data: Vec<Route>,
}
