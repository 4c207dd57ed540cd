//! Request orchestration.
//!
//! The advisor drives the session through a route submission (geocode both
//! endpoints, gate on the service region, fetch, apply), a contact send, and
//! the "open directions" action. Collaborator failures are converted into
//! lifecycle transitions here and never escape as errors.

use reqwest::Url;
use tracing::{info, warn};

use crate::backend::BackendClient;
use crate::config::{AdvisorConfig, ConfigError};
use crate::contact::{ContactError, ContactMessage};
use crate::deeplink;
use crate::geocode::{GoogleGeocoder, RegionFilter};
use crate::polyline::{GooglePolyline, PolylineError};
use crate::route_lifecycle::{RouteEvent, RouteState, RouteTicket};
use crate::sampler::{self, SampleError};
use crate::session::Session;
use crate::traits::{ContactMailer, Geocoder, PolylineDecoder, RouteProvider};
use crate::view::{MapScene, RoutePanel};

#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    #[error("no route is active")]
    NoActiveRoute,
    #[error("active route polyline is malformed: {0}")]
    Polyline(#[from] PolylineError),
    #[error(transparent)]
    Sample(#[from] SampleError),
}

/// Failure to build an [`HttpAdvisor`].
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct Advisor<G, P, M, D = GooglePolyline> {
    geocoder: G,
    provider: P,
    mailer: M,
    decoder: D,
    region: RegionFilter,
    config: AdvisorConfig,
}

/// Advisor wired to the HTTP collaborators.
pub type HttpAdvisor = Advisor<GoogleGeocoder, BackendClient, BackendClient>;

impl HttpAdvisor {
    pub fn from_config(config: AdvisorConfig) -> Result<Self, SetupError> {
        let geocoder = GoogleGeocoder::new(config.geocoder.clone())?;
        let backend = BackendClient::new(config.backend.clone())?;
        let advisor = Advisor::new(geocoder, backend.clone(), backend, GooglePolyline, config)?;
        Ok(advisor)
    }
}

impl<G, P, M, D> Advisor<G, P, M, D>
where
    G: Geocoder,
    P: RouteProvider,
    M: ContactMailer,
    D: PolylineDecoder,
{
    /// Fails when `config` does not pass [`AdvisorConfig::validate`].
    pub fn new(
        geocoder: G,
        provider: P,
        mailer: M,
        decoder: D,
        config: AdvisorConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let region = RegionFilter::new(config.region_label.clone());
        Ok(Self {
            geocoder,
            provider,
            mailer,
            decoder,
            region,
            config,
        })
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Runs a full route submission and returns the resulting state.
    pub fn plan_routes(&self, session: &mut Session, start: &str, end: &str) -> RouteState {
        let ticket = session.submit_route();
        self.resolve_routes(session, ticket, start, end);
        session.route_state()
    }

    /// Resolves an already-submitted request. Outcomes for a superseded
    /// ticket are dropped by the session.
    pub fn resolve_routes(&self, session: &mut Session, ticket: RouteTicket, start: &str, end: &str) {
        let (start_address, end_address) = match self.geocode_pair(start, end) {
            Some(pair) => pair,
            None => {
                session.apply_route(ticket, RouteEvent::GeocodeFailed);
                return;
            }
        };

        let start_in_region = self.region.contains(&start_address);
        let end_in_region = self.region.contains(&end_address);
        session.apply_route(
            ticket,
            RouteEvent::RegionChecked {
                start_in_region,
                end_in_region,
            },
        );
        if !session.is_route_pending(ticket) {
            return;
        }

        let event = match self.provider.fetch_routes(start, end) {
            Ok(routes) => RouteEvent::FetchSucceeded(routes),
            Err(err) => {
                warn!(error = %err, "route fetch failed");
                RouteEvent::FetchFailed
            }
        };
        session.apply_route(ticket, event);
    }

    fn geocode_pair(&self, start: &str, end: &str) -> Option<(String, String)> {
        let resolve = |address: &str| {
            self.geocoder
                .resolve(address)
                .map_err(|err| warn!(address, error = %err, "geocoding failed"))
                .ok()
        };
        let start_address = resolve(start)?;
        let end_address = resolve(end)?;
        Some((start_address, end_address))
    }

    /// Validates and sends a contact message. Invalid input is returned to
    /// the caller without touching the contact lifecycle.
    pub fn send_contact(
        &self,
        session: &mut Session,
        message: &ContactMessage,
    ) -> Result<(), ContactError> {
        message.validate()?;

        let ticket = session.submit_contact();
        match self.mailer.send(message) {
            Ok(()) => {
                info!("contact message sent");
                session.contact_succeeded(ticket);
            }
            Err(err) => {
                warn!(error = %err, "contact message failed");
                session.contact_failed(ticket);
            }
        }
        Ok(())
    }

    /// Builds the walking-directions link for the active route.
    ///
    /// Only a `Loaded` session has a displayed active route. Does not change
    /// any lifecycle state.
    pub fn directions(&self, session: &Session) -> Result<Url, DirectionsError> {
        if session.route_state() != RouteState::Loaded {
            return Err(DirectionsError::NoActiveRoute);
        }
        let key = session.active_key().ok_or(DirectionsError::NoActiveRoute)?;
        let path = self.decoder.decode(key)?;
        let sampled = sampler::sample(&path, self.config.waypoint_count)?;
        Ok(deeplink::from_sampled(&sampled))
    }

    pub fn route_panel(&self, session: &Session) -> RoutePanel {
        RoutePanel::from_snapshot(session.route_snapshot())
    }

    pub fn map_scene(&self, session: &Session) -> MapScene {
        MapScene::build(session.route_snapshot(), &self.decoder, self.config.default_center)
    }
}
