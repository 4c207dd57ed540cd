//! Core value types shared by the lifecycles, the view layer and the HTTP
//! adapters.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// A single scored walking route as returned by the backend.
///
/// The encoded polyline doubles as the route's identity key: it must be
/// unique within one result set and is what the active-route selection
/// stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub polyline: String,
    /// Street lights per kilometre.
    #[serde(rename = "lights")]
    pub lights_per_km: f64,
    /// Sidewalk length over route length, in `[0, 1]`.
    #[serde(rename = "sidewalks")]
    pub sidewalk_coverage: f64,
    /// Average daily vehicle count along the route.
    #[serde(rename = "traffic")]
    pub traffic_per_day: f64,
    #[serde(rename = "duration", deserialize_with = "whole_seconds")]
    pub duration_seconds: u64,
    /// Route length exactly as the backend reports it. No unit conversion is
    /// applied anywhere in the client.
    #[serde(rename = "distance")]
    pub distance: f64,
}

impl Route {
    pub fn key(&self) -> &str {
        &self.polyline
    }
}

/// Backend durations are JSON numbers that may carry a fractional part.
fn whole_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_finite() && raw > 0.0 {
        Ok(raw.round() as u64)
    } else {
        Ok(0)
    }
}

/// The ordered routes produced by one successful fetch.
///
/// A new set always replaces the previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteResultSet {
    routes: Vec<Route>,
}

impl RouteResultSet {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn first(&self) -> Option<&Route> {
        self.routes.first()
    }

    /// Looks up a route by its identity key.
    pub fn find(&self, key: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.key() == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Drops routes whose key already appeared earlier in the set and
    /// returns how many were removed.
    pub fn dedup_keys(&mut self) -> usize {
        let before = self.routes.len();
        let mut seen = HashSet::new();
        self.routes.retain(|route| seen.insert(route.polyline.clone()));
        before - self.routes.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }
}

impl From<Vec<Route>> for RouteResultSet {
    fn from(routes: Vec<Route>) -> Self {
        Self::new(routes)
    }
}

impl<'a> IntoIterator for &'a RouteResultSet {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
