//! walk-advisor client core
//!
//! Session state, request lifecycles and directions-link generation for a
//! walking-route advisor. Rendering is left to the embedding application.

pub mod advisor;
pub mod backend;
pub mod config;
pub mod contact;
pub mod deeplink;
pub mod geocode;
pub mod model;
pub mod polyline;
pub mod route_lifecycle;
pub mod sampler;
pub mod selector;
pub mod session;
pub mod traits;
pub mod view;
