//! Contact form: message validation and the send lifecycle.

use serde::{Deserialize, Serialize};
use tracing::debug;

const NAME_MAX: usize = 60;
const EMAIL_MAX: usize = 80;
const SUBJECT_MAX: usize = 80;
const MESSAGE_MAX: usize = 400;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("email request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("email service rejected the message: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{0:?} is not a valid email address")]
    InvalidEmail(String),
}

/// Body of `POST /api/email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub subject: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Checks the same limits the contact form enforces before sending.
    pub fn validate(&self) -> Result<(), ContactError> {
        check_field("name", &self.name, NAME_MAX, true)?;
        check_field("email", &self.email, EMAIL_MAX, true)?;
        if !looks_like_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail(self.email.clone()));
        }
        check_field("subject", &self.subject, SUBJECT_MAX, false)?;
        check_field("message", &self.message, MESSAGE_MAX, true)?;
        Ok(())
    }
}

fn check_field(
    field: &'static str,
    value: &str,
    max: usize,
    required: bool,
) -> Result<(), ContactError> {
    if required && value.trim().is_empty() {
        return Err(ContactError::Missing { field });
    }
    if value.chars().count() > max {
        return Err(ContactError::TooLong { field, max });
    }
    Ok(())
}

/// `local@label.label...tld` with no whitespace, a two-letter or longer
/// alphabetic TLD, and domain labels of letters, digits and hyphens.
fn looks_like_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.rsplit_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && !local
            .chars()
            .any(|c| c.is_whitespace() || "<>()[]\\,;:@\"".contains(c));

    let labels: Vec<&str> = domain.split('.').collect();
    let domain_ok = labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
        && labels
            .last()
            .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    local_ok && domain_ok
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactState {
    Initial,
    Loading,
    Loaded,
    Error,
}

/// Identifies one contact submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactTicket(u64);

/// Contact send lifecycle. Independent of the route lifecycle.
#[derive(Debug, Clone)]
pub struct ContactLifecycle {
    state: ContactState,
    generation: u64,
}

impl Default for ContactLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactLifecycle {
    pub fn new() -> Self {
        Self {
            state: ContactState::Initial,
            generation: 0,
        }
    }

    pub fn state(&self) -> ContactState {
        self.state
    }

    pub fn submit(&mut self) -> ContactTicket {
        self.generation += 1;
        self.state = ContactState::Loading;
        ContactTicket(self.generation)
    }

    /// Returns whether the outcome was applied.
    pub fn succeeded(&mut self, ticket: ContactTicket) -> bool {
        self.resolve(ticket, ContactState::Loaded)
    }

    /// Returns whether the outcome was applied.
    pub fn failed(&mut self, ticket: ContactTicket) -> bool {
        self.resolve(ticket, ContactState::Error)
    }

    /// Back to `Initial` from any state. Invalidates outstanding tickets.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = ContactState::Initial;
    }

    fn resolve(&mut self, ticket: ContactTicket, next: ContactState) -> bool {
        if ticket.0 != self.generation || self.state != ContactState::Loading {
            debug!(ticket = ticket.0, current = self.generation, "dropping stale contact outcome");
            return false;
        }
        self.state = next;
        true
    }
}
