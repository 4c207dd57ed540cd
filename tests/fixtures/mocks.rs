//! Scripted collaborators with call recording.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use reqwest::StatusCode;
use walk_advisor::backend::FetchError;
use walk_advisor::contact::{ContactMessage, ContactState, EmailError};
use walk_advisor::geocode::GeocodeError;
use walk_advisor::model::RouteResultSet;
use walk_advisor::route_lifecycle::RouteState;
use walk_advisor::traits::{ContactMailer, Geocoder, RouteProvider, RouteSnapshot, SessionObserver};

use super::london_locations::{LONDON, UNION_STATION_TORONTO};

/// Geocoder answering from a fixed address book. Unknown addresses fail.
#[derive(Debug, Default)]
pub struct AddressBook {
    entries: HashMap<String, String>,
    pub lookups: RefCell<Vec<String>>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, address: &str, formatted: &str) -> Self {
        self.entries.insert(address.to_string(), formatted.to_string());
        self
    }

    /// Every fixture location, London and otherwise.
    pub fn known_locations() -> Self {
        LONDON
            .iter()
            .chain(std::iter::once(&UNION_STATION_TORONTO))
            .fold(Self::new(), |book, location| {
                book.with(location.address, location.formatted)
            })
    }
}

impl Geocoder for AddressBook {
    fn resolve(&self, address: &str) -> Result<String, GeocodeError> {
        self.lookups.borrow_mut().push(address.to_string());
        self.entries
            .get(address)
            .cloned()
            .ok_or_else(|| GeocodeError::NoResult(address.to_string()))
    }
}

/// Route provider returning a canned outcome.
#[derive(Debug)]
pub struct CannedRoutes {
    outcome: Result<RouteResultSet, StatusCode>,
    pub calls: Cell<usize>,
}

impl CannedRoutes {
    pub fn ok(routes: RouteResultSet) -> Self {
        Self {
            outcome: Ok(routes),
            calls: Cell::new(0),
        }
    }

    pub fn failing(status: StatusCode) -> Self {
        Self {
            outcome: Err(status),
            calls: Cell::new(0),
        }
    }
}

impl RouteProvider for CannedRoutes {
    fn fetch_routes(&self, _start: &str, _end: &str) -> Result<RouteResultSet, FetchError> {
        self.calls.set(self.calls.get() + 1);
        self.outcome.clone().map_err(FetchError::Status)
    }
}

/// Mailer that records messages and succeeds unless told otherwise.
#[derive(Debug, Default)]
pub struct Outbox {
    pub reject: bool,
    pub sent: RefCell<Vec<ContactMessage>>,
}

impl Outbox {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }
}

impl ContactMailer for Outbox {
    fn send(&self, message: &ContactMessage) -> Result<(), EmailError> {
        self.sent.borrow_mut().push(message.clone());
        if self.reject {
            return Err(EmailError::Rejected("400 Bad Request".to_string()));
        }
        Ok(())
    }
}

/// Observer that records every notification it receives.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Route {
        state: RouteState,
        active: Option<String>,
        count: usize,
    },
    Contact(ContactState),
}

pub struct Recorder(pub std::rc::Rc<RefCell<Vec<Notification>>>);

impl SessionObserver for Recorder {
    fn route_changed(&mut self, snapshot: RouteSnapshot<'_>) {
        self.0.borrow_mut().push(Notification::Route {
            state: snapshot.state,
            active: snapshot.active_key.map(str::to_string),
            count: snapshot.routes.len(),
        });
    }

    fn contact_changed(&mut self, state: ContactState) {
        self.0.borrow_mut().push(Notification::Contact(state));
    }
}

pub fn contact_message() -> ContactMessage {
    ContactMessage {
        name: "Jordan".to_string(),
        subject: "Lighting on Richmond".to_string(),
        email: "jordan@example.ca".to_string(),
        message: "The route past the park was great at night.".to_string(),
    }
}
