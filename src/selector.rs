//! Active-route selection.

use tracing::debug;

use crate::model::RouteResultSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no route with key {key:?} in the current result set")]
    InvalidSelection { key: String },
}

/// Tracks which single route, by identity key, is currently highlighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveRouteSelector {
    active: Option<String>,
}

impl ActiveRouteSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Makes `key` active if `routes` contains it.
    pub fn select(&mut self, routes: &RouteResultSet, key: &str) -> Result<(), SelectionError> {
        if !routes.contains(key) {
            return Err(SelectionError::InvalidSelection {
                key: key.to_string(),
            });
        }
        self.active = Some(key.to_string());
        Ok(())
    }

    /// The key that should be active by default: the current key if it is
    /// still valid for `routes`, otherwise the first route's key.
    pub fn default_selection<'a>(&'a self, routes: &'a RouteResultSet) -> Option<&'a str> {
        match self.active.as_deref() {
            Some(key) if routes.contains(key) => Some(key),
            _ => routes.first().map(|route| route.key()),
        }
    }

    /// Re-validates the selection against a freshly stored result set.
    ///
    /// A key that no longer exists is dropped, then the default policy is
    /// applied. An empty set leaves nothing selected.
    pub fn reconcile(&mut self, routes: &RouteResultSet) {
        let next = self.default_selection(routes).map(str::to_string);
        if next != self.active {
            debug!(previous = ?self.active, next = ?next, "active route reconciled");
        }
        self.active = next;
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}
