//! Advisor configuration.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::info;

use crate::backend::BackendConfig;
use crate::geocode::GeocoderConfig;
use crate::model::Coordinate;

/// Intermediate waypoint density for directions links.
pub const DEFAULT_WAYPOINT_COUNT: usize = 8;
pub const DEFAULT_REGION_LABEL: &str = "London, ON";
/// Map centre used before any route is active.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(42.9849, -81.2453);

pub const ENV_BACKEND_URL: &str = "WALK_ADVISOR_BACKEND_URL";
pub const ENV_TIMEOUT_SECS: &str = "WALK_ADVISOR_TIMEOUT_SECS";
pub const ENV_GMAPS_API_KEY: &str = "WALK_ADVISOR_GMAPS_API_KEY";
pub const ENV_REGION: &str = "WALK_ADVISOR_REGION";
pub const ENV_WAYPOINTS: &str = "WALK_ADVISOR_WAYPOINTS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub backend: BackendConfig,
    pub geocoder: GeocoderConfig,
    /// Locality label a formatted address must contain to be in service.
    pub region_label: String,
    pub waypoint_count: usize,
    pub default_center: Coordinate,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            geocoder: GeocoderConfig::default(),
            region_label: DEFAULT_REGION_LABEL.to_string(),
            waypoint_count: DEFAULT_WAYPOINT_COUNT,
            default_center: DEFAULT_CENTER,
        }
    }
}

impl AdvisorConfig {
    /// Loads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads overrides through `lookup`; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = load::<String, _>(&lookup, ENV_BACKEND_URL)? {
            config.backend.base_url = url;
        }
        if let Some(timeout) = load::<u64, _>(&lookup, ENV_TIMEOUT_SECS)? {
            config.backend.timeout_secs = timeout;
            config.geocoder.timeout_secs = timeout;
        }
        if let Some(key) = load::<String, _>(&lookup, ENV_GMAPS_API_KEY)? {
            config.geocoder.api_key = key;
        }
        if let Some(region) = load::<String, _>(&lookup, ENV_REGION)? {
            config.region_label = region;
        }
        if let Some(count) = load::<usize, _>(&lookup, ENV_WAYPOINTS)? {
            config.waypoint_count = count;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waypoint_count < 2 {
            return Err(ConfigError::Invalid {
                key: ENV_WAYPOINTS,
                value: self.waypoint_count.to_string(),
                reason: "waypoint count must be at least 2".to_string(),
            });
        }
        if self.region_label.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: ENV_REGION,
                value: self.region_label.clone(),
                reason: "region label must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn load<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default");
        return Ok(None);
    };

    raw.trim()
        .parse()
        .map(Some)
        .map_err(|err: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: err.to_string(),
        })
}
