//! Client session state.
//!
//! The session owns both lifecycles and the registered view observers. All
//! mutation goes through its methods, and every applied mutation is reported
//! to each observer synchronously, in order.

use crate::contact::{ContactLifecycle, ContactState, ContactTicket};
use crate::model::RouteResultSet;
use crate::route_lifecycle::{Applied, RouteEvent, RouteLifecycle, RouteState, RouteTicket};
use crate::selector::SelectionError;
use crate::traits::{RouteSnapshot, SessionObserver};

#[derive(Default)]
pub struct Session {
    route: RouteLifecycle,
    contact: ContactLifecycle,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("route", &self.route)
            .field("contact", &self.contact)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    pub fn route_state(&self) -> RouteState {
        self.route.state()
    }

    pub fn routes(&self) -> &RouteResultSet {
        self.route.routes()
    }

    pub fn active_key(&self) -> Option<&str> {
        self.route.active_key()
    }

    pub fn route_lifecycle(&self) -> &RouteLifecycle {
        &self.route
    }

    pub fn contact_state(&self) -> ContactState {
        self.contact.state()
    }

    pub fn route_snapshot(&self) -> RouteSnapshot<'_> {
        RouteSnapshot {
            state: self.route.state(),
            routes: self.route.routes(),
            active_key: self.route.active_key(),
        }
    }

    pub fn is_route_pending(&self, ticket: RouteTicket) -> bool {
        self.route.is_pending(ticket)
    }

    pub fn submit_route(&mut self) -> RouteTicket {
        let ticket = self.route.submit();
        self.notify_route();
        ticket
    }

    pub fn apply_route(&mut self, ticket: RouteTicket, event: RouteEvent) -> Applied {
        let applied = self.route.apply(ticket, event);
        if applied.is_accepted() {
            self.notify_route();
        }
        applied
    }

    pub fn select_route(&mut self, key: &str) -> Result<(), SelectionError> {
        let changed = self.route.active_key() != Some(key);
        self.route.select(key)?;
        if changed {
            self.notify_route();
        }
        Ok(())
    }

    pub fn submit_contact(&mut self) -> ContactTicket {
        let ticket = self.contact.submit();
        self.notify_contact();
        ticket
    }

    pub fn contact_succeeded(&mut self, ticket: ContactTicket) -> bool {
        let applied = self.contact.succeeded(ticket);
        if applied {
            self.notify_contact();
        }
        applied
    }

    pub fn contact_failed(&mut self, ticket: ContactTicket) -> bool {
        let applied = self.contact.failed(ticket);
        if applied {
            self.notify_contact();
        }
        applied
    }

    /// Fired when the contact UI is dismissed.
    pub fn reset_contact(&mut self) {
        self.contact.reset();
        self.notify_contact();
    }

    fn notify_route(&mut self) {
        let snapshot = RouteSnapshot {
            state: self.route.state(),
            routes: self.route.routes(),
            active_key: self.route.active_key(),
        };
        for observer in &mut self.observers {
            observer.route_changed(snapshot);
        }
    }

    fn notify_contact(&mut self) {
        let state = self.contact.state();
        for observer in &mut self.observers {
            observer.contact_changed(state);
        }
    }
}
