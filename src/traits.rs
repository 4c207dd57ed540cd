//! Collaborator seams for the advisor.
//!
//! These are minimal. The crate ships HTTP implementations for
//! the geocoder, route provider and mailer, and a decoder for Google encoded
//! polylines; tests and embedding applications supply their own.

use crate::backend::FetchError;
use crate::contact::{ContactMessage, ContactState, EmailError};
use crate::geocode::GeocodeError;
use crate::model::{Coordinate, RouteResultSet};
use crate::polyline::PolylineError;
use crate::route_lifecycle::RouteState;

/// Resolves a free-text address to the geocoder's formatted address.
pub trait Geocoder {
    fn resolve(&self, address: &str) -> Result<String, GeocodeError>;
}

/// Fetches scored walking routes between two free-text addresses.
pub trait RouteProvider {
    fn fetch_routes(&self, start: &str, end: &str) -> Result<RouteResultSet, FetchError>;
}

/// Delivers a contact-form message.
pub trait ContactMailer {
    fn send(&self, message: &ContactMessage) -> Result<(), EmailError>;
}

/// Turns a route's encoded polyline into an ordered coordinate sequence.
pub trait PolylineDecoder {
    fn decode(&self, encoded: &str) -> Result<Vec<Coordinate>, PolylineError>;
}

/// Read-only view of the route side of a session, handed to observers.
#[derive(Debug, Clone, Copy)]
pub struct RouteSnapshot<'a> {
    pub state: RouteState,
    pub routes: &'a RouteResultSet,
    /// `None` when no route is active.
    pub active_key: Option<&'a str>,
}

/// View layer registered on a session.
///
/// Called synchronously after every applied mutation, in mutation order.
/// Dropped stale responses produce no callback.
pub trait SessionObserver {
    fn route_changed(&mut self, _snapshot: RouteSnapshot<'_>) {}

    fn contact_changed(&mut self, _state: ContactState) {}
}
