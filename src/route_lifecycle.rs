//! Route request lifecycle.
//!
//! Each submission mints a [`RouteTicket`] carrying a monotonically
//! increasing generation. Outcomes are applied only when they carry the
//! latest ticket and the lifecycle is still `Loading`, so a response that
//! was superseded by a newer submission can never overwrite fresher state.

use tracing::{debug, info, warn};

use crate::model::RouteResultSet;
use crate::selector::{ActiveRouteSelector, SelectionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteState {
    Initial,
    Loading,
    Loaded,
    Error,
    OutOfBounds,
}

/// Why a request ended in [`RouteState::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteFailure {
    /// An address could not be geocoded at all.
    Geocode,
    /// The route API call failed or timed out.
    Fetch,
}

/// Identifies one route submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteTicket(u64);

impl RouteTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Outcomes that resolve a pending submission.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteEvent {
    /// Both addresses geocoded; each flag says whether it lies in the
    /// service region. Both true keeps the request `Loading` for the fetch.
    RegionChecked { start_in_region: bool, end_in_region: bool },
    GeocodeFailed,
    FetchSucceeded(RouteResultSet),
    FetchFailed,
}

/// Result of applying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The event was accepted; carries the resulting state.
    Accepted(RouteState),
    /// The event was valid for the pending request but left it as it was.
    Unchanged,
    /// The ticket was superseded or the request already resolved.
    Stale,
}

impl Applied {
    pub fn is_accepted(self) -> bool {
        matches!(self, Applied::Accepted(_))
    }
}

#[derive(Debug, Clone)]
pub struct RouteLifecycle {
    state: RouteState,
    generation: u64,
    routes: RouteResultSet,
    selector: ActiveRouteSelector,
    last_failure: Option<RouteFailure>,
}

impl Default for RouteLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteLifecycle {
    pub fn new() -> Self {
        Self {
            state: RouteState::Initial,
            generation: 0,
            routes: RouteResultSet::default(),
            selector: ActiveRouteSelector::new(),
            last_failure: None,
        }
    }

    pub fn state(&self) -> RouteState {
        self.state
    }

    /// The stored result set. Kept across `Loading`, `Error` and
    /// `OutOfBounds`; only a successful fetch replaces it.
    pub fn routes(&self) -> &RouteResultSet {
        &self.routes
    }

    pub fn active_key(&self) -> Option<&str> {
        self.selector.active()
    }

    pub fn last_failure(&self) -> Option<RouteFailure> {
        self.last_failure
    }

    /// Whether `ticket` belongs to the newest submission and is unresolved.
    pub fn is_pending(&self, ticket: RouteTicket) -> bool {
        ticket.0 == self.generation && self.state == RouteState::Loading
    }

    /// Starts a new request from any state. The previous result set stays
    /// stored until the new request resolves.
    pub fn submit(&mut self) -> RouteTicket {
        self.generation += 1;
        self.state = RouteState::Loading;
        self.last_failure = None;
        debug!(generation = self.generation, "route request submitted");
        RouteTicket(self.generation)
    }

    pub fn apply(&mut self, ticket: RouteTicket, event: RouteEvent) -> Applied {
        if !self.is_pending(ticket) {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                state = ?self.state,
                "dropping stale route outcome"
            );
            return Applied::Stale;
        }

        match event {
            RouteEvent::RegionChecked {
                start_in_region,
                end_in_region,
            } => {
                if start_in_region && end_in_region {
                    return Applied::Unchanged;
                }
                info!(start_in_region, end_in_region, "route request outside service region");
                self.state = RouteState::OutOfBounds;
            }
            RouteEvent::GeocodeFailed => self.fail(RouteFailure::Geocode),
            RouteEvent::FetchFailed => self.fail(RouteFailure::Fetch),
            RouteEvent::FetchSucceeded(mut routes) => {
                let duplicates = routes.dedup_keys();
                if duplicates > 0 {
                    warn!(duplicates, "dropped routes with repeated polylines");
                }
                info!(count = routes.len(), "routes loaded");
                self.routes = routes;
                self.selector.reconcile(&self.routes);
                self.state = RouteState::Loaded;
            }
        }

        Applied::Accepted(self.state)
    }

    /// Makes a route from the stored set active.
    pub fn select(&mut self, key: &str) -> Result<(), SelectionError> {
        self.selector.select(&self.routes, key)
    }

    fn fail(&mut self, failure: RouteFailure) {
        self.last_failure = Some(failure);
        self.state = RouteState::Error;
    }
}
