//! Google Maps directions deep links.

use reqwest::Url;

use crate::model::Coordinate;
use crate::sampler::SampledWaypoints;

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/";
const TRAVEL_MODE: &str = "walking";

/// Builds a walking-directions URL from origin, destination and
/// intermediates.
///
/// Coordinates are written with Rust's locale-independent float formatting
/// and query values are percent-encoded, so `,` and `|` appear as `%2C` and
/// `%7C`. The `waypoints` parameter is omitted when there are no
/// intermediates.
pub fn directions_url(
    origin: Coordinate,
    destination: Coordinate,
    intermediates: &[Coordinate],
) -> Url {
    let mut url = Url::parse(DIRECTIONS_BASE_URL).expect("directions base url is valid");
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("api", "1");
        query.append_pair("origin", &format_coordinate(origin));
        query.append_pair("destination", &format_coordinate(destination));
        if !intermediates.is_empty() {
            let waypoints = intermediates
                .iter()
                .map(|point| format_coordinate(*point))
                .collect::<Vec<_>>()
                .join("|");
            query.append_pair("waypoints", &waypoints);
        }
        query.append_pair("travelmode", TRAVEL_MODE);
    }
    url
}

/// Convenience wrapper over [`directions_url`] for sampler output.
pub fn from_sampled(sampled: &SampledWaypoints) -> Url {
    directions_url(sampled.origin, sampled.destination, &sampled.intermediates)
}

fn format_coordinate(point: Coordinate) -> String {
    format!("{},{}", point.latitude, point.longitude)
}

/// Parses a `lat,lng|lat,lng` waypoint list back into coordinates.
pub fn parse_waypoints(value: &str) -> Option<Vec<Coordinate>> {
    if value.is_empty() {
        return Some(Vec::new());
    }
    value
        .split('|')
        .map(|pair| {
            let (latitude, longitude) = pair.split_once(',')?;
            Some(Coordinate::new(
                latitude.parse().ok()?,
                longitude.parse().ok()?,
            ))
        })
        .collect()
}
