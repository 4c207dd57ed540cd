//! View models handed to the rendering layer: the sidebar route panel and
//! the map scene.

use tracing::warn;

use crate::model::{Coordinate, Route};
use crate::route_lifecycle::RouteState;
use crate::traits::{PolylineDecoder, RouteSnapshot};

/// Sidebar content for the current route state.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutePanel {
    Instructions,
    Loading,
    Routes(Vec<RouteCard>),
    Error,
    OutOfBounds,
}

impl RoutePanel {
    /// Routes are listed only in `Loaded`; an errored request shows no
    /// routes even though the previous set is still stored.
    pub fn from_snapshot(snapshot: RouteSnapshot<'_>) -> Self {
        match snapshot.state {
            RouteState::Initial => RoutePanel::Instructions,
            RouteState::Loading => RoutePanel::Loading,
            RouteState::Error => RoutePanel::Error,
            RouteState::OutOfBounds => RoutePanel::OutOfBounds,
            RouteState::Loaded => RoutePanel::Routes(
                snapshot
                    .routes
                    .iter()
                    .map(|route| RouteCard::new(route, snapshot.active_key == Some(route.key())))
                    .collect(),
            ),
        }
    }
}

/// Display strings for one route card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCard {
    pub key: String,
    pub active: bool,
    pub lights: String,
    pub sidewalks: String,
    pub traffic: String,
    pub duration: String,
    pub distance: String,
}

impl RouteCard {
    pub fn new(route: &Route, active: bool) -> Self {
        Self {
            key: route.key().to_string(),
            active,
            lights: format!("{:.0} Lights per km", route.lights_per_km),
            sidewalks: format!("{:.0}% Sidewalk coverage", route.sidewalk_coverage * 100.0),
            traffic: format!("{:.0} Cars per day", route.traffic_per_day),
            duration: duration_label(route.duration_seconds),
            distance: distance_label(route.distance),
        }
    }
}

/// "1 hr, 5 mins", "2 hrs", "45 mins". Sub-minute remainders are dropped.
pub fn duration_label(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = seconds % 3600 / 60;

    let mut parts = Vec::with_capacity(2);
    if hours > 0 {
        parts.push(format!("{hours} {}", if hours == 1 { "hr" } else { "hrs" }));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} {}", if minutes == 1 { "min" } else { "mins" }));
    }
    if parts.is_empty() {
        return "0 mins".to_string();
    }
    parts.join(", ")
}

/// The backend's distance value, unconverted, with a km suffix.
pub fn distance_label(distance: f64) -> String {
    format!("{distance} km")
}

/// One drawable route path.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPath {
    pub key: String,
    pub active: bool,
    pub points: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    /// Inactive paths first, active path last so it draws on top.
    pub paths: Vec<MapPath>,
    pub start_marker: Option<Coordinate>,
    pub end_marker: Option<Coordinate>,
    pub center: Coordinate,
}

impl MapScene {
    /// Builds the scene from the stored routes. A route whose polyline fails
    /// to decode is logged and left off the map.
    pub fn build<D: PolylineDecoder>(
        snapshot: RouteSnapshot<'_>,
        decoder: &D,
        default_center: Coordinate,
    ) -> Self {
        let mut inactive = Vec::new();
        let mut active = None;

        for route in snapshot.routes {
            let points = match decoder.decode(route.key()) {
                Ok(points) => points,
                Err(err) => {
                    warn!(error = %err, "skipping undecodable route polyline");
                    continue;
                }
            };
            let is_active = snapshot.active_key == Some(route.key());
            let path = MapPath {
                key: route.key().to_string(),
                active: is_active,
                points,
            };
            if is_active {
                active = Some(path);
            } else {
                inactive.push(path);
            }
        }

        let active_points = active.as_ref().map(|path| path.points.as_slice()).unwrap_or(&[]);
        let start_marker = active_points.first().copied();
        let end_marker = active_points.last().copied();
        let center = bounds_center(active_points).unwrap_or(default_center);

        let mut paths = inactive;
        paths.extend(active);

        Self {
            paths,
            start_marker,
            end_marker,
            center,
        }
    }

    pub fn active_path(&self) -> Option<&MapPath> {
        self.paths.iter().find(|path| path.active)
    }
}

/// Centre of the latitude/longitude bounding box of `points`.
pub fn bounds_center(points: &[Coordinate]) -> Option<Coordinate> {
    let first = points.first()?;
    let (mut south, mut north) = (first.latitude, first.latitude);
    let (mut west, mut east) = (first.longitude, first.longitude);

    for point in &points[1..] {
        south = south.min(point.latitude);
        north = north.max(point.latitude);
        west = west.min(point.longitude);
        east = east.max(point.longitude);
    }

    Some(Coordinate::new((south + north) / 2.0, (west + east) / 2.0))
}
