//! Real London, Ontario locations for realistic fixtures.

use walk_advisor::model::{Coordinate, Route, RouteResultSet};
use walk_advisor::polyline::Polyline;

/// A named location with its geocoded address.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub address: &'static str,
    pub formatted: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(
        name: &'static str,
        address: &'static str,
        formatted: &'static str,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            name,
            address,
            formatted,
            lat,
            lng,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

pub const VICTORIA_PARK: Location = Location::new(
    "Victoria Park",
    "509 Clarence St, London, ON",
    "509 Clarence St, London, ON N6A 3N1, Canada",
    42.98756,
    -81.24714,
);

pub const COVENT_GARDEN_MARKET: Location = Location::new(
    "Covent Garden Market",
    "130 King St, London, ON",
    "130 King St, London, ON N6A 1C5, Canada",
    42.98265,
    -81.25043,
);

pub const WESTERN_UNIVERSITY: Location = Location::new(
    "Western University",
    "1151 Richmond St, London, ON",
    "1151 Richmond St, London, ON N6A 3K7, Canada",
    43.00959,
    -81.27372,
);

pub const UNION_STATION_TORONTO: Location = Location::new(
    "Union Station",
    "65 Front St W, Toronto, ON",
    "65 Front St W, Toronto, ON M5J 1E6, Canada",
    43.64524,
    -79.38060,
);

pub const LONDON: &[Location] = &[VICTORIA_PARK, COVENT_GARDEN_MARKET, WESTERN_UNIVERSITY];

/// Straight-line path of `points` evenly spaced coordinates from `from` to `to`,
/// snapped to polyline precision so decoded points compare equal.
pub fn walking_path(from: &Location, to: &Location, points: usize) -> Vec<Coordinate> {
    let steps = points.saturating_sub(1).max(1) as f64;
    (0..points)
        .map(|i| {
            let t = i as f64 / steps;
            let lat = from.lat + (to.lat - from.lat) * t;
            let lng = from.lng + (to.lng - from.lng) * t;
            Coordinate::new((lat * 1e5).round() / 1e5, (lng * 1e5).round() / 1e5)
        })
        .collect()
}

pub fn scored_route(path: &[Coordinate], lights: f64, sidewalks: f64, traffic: f64) -> Route {
    Route {
        polyline: Polyline::new(path.to_vec()).encode(),
        lights_per_km: lights,
        sidewalk_coverage: sidewalks,
        traffic_per_day: traffic,
        duration_seconds: 1380,
        distance: 1.9,
    }
}

/// Two distinct routes between Victoria Park and Western University.
pub fn campus_routes() -> RouteResultSet {
    let direct = walking_path(&VICTORIA_PARK, &WESTERN_UNIVERSITY, 40);
    let mut detour = walking_path(&VICTORIA_PARK, &COVENT_GARDEN_MARKET, 10);
    detour.extend(
        walking_path(&COVENT_GARDEN_MARKET, &WESTERN_UNIVERSITY, 50)
            .into_iter()
            .skip(1),
    );
    RouteResultSet::new(vec![
        scored_route(&direct, 31.5, 0.92, 5400.0),
        scored_route(&detour, 18.2, 0.71, 12050.0),
    ])
}
