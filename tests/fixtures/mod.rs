//! Test fixtures for walk-advisor.
//!
//! Provides:
//! - Real London, ON locations and walking paths between them
//! - Scripted collaborators (geocoder, route provider, mailer)
//! - A loopback HTTP stub for exercising the reqwest clients

#![allow(dead_code)]

pub mod london_locations;
pub mod mocks;
pub mod stub_server;

pub use london_locations::*;
pub use mocks::*;
