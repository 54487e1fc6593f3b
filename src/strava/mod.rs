//! # Strava Module
//!
//! Minimal wrapper around the Strava v3 REST API for one registered application.
//!
//! ## Sub-modules
//! - `client`: token refresh and the activity endpoints
//! - `strava_types`: response types and the fixed stream key set
//!
//! Every call is a single request. Nothing is retried and paging is left to the caller.

mod client;
mod strava_types;

use std::{fmt::Display, time::Duration};

pub use strava_types::*;

use crate::{http::UreqTransport, settings::StravaSettings};

/// Handler for a Strava application.
#[derive(Clone)]
pub struct StravaApp<T = UreqTransport> {
    client_id: String,
    client_secret: String,
    transport: T,
    pub settings: StravaSettings,
}

impl StravaApp {
    pub fn new(client_id: impl Display, client_secret: impl Display) -> Self {
        StravaApp::with_settings(client_id, client_secret, StravaSettings::default())
    }

    pub fn with_settings(
        client_id: impl Display,
        client_secret: impl Display,
        settings: StravaSettings,
    ) -> Self {
        let transport = UreqTransport::new(Duration::from_secs(settings.http_timeout_secs));
        StravaApp::with_transport(client_id, client_secret, transport, settings)
    }
}

impl<T> StravaApp<T> {
    pub fn with_transport(
        client_id: impl Display,
        client_secret: impl Display,
        transport: T,
        settings: StravaSettings,
    ) -> Self {
        StravaApp {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            transport,
            settings,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl<T> std::fmt::Debug for StravaApp<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StravaApp")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("settings", &self.settings)
            .finish()
    }
}
