//! # Overpass Module
//!
//! Fetches mountain passes and saddles from the OpenStreetMap Overpass API.
//!
//! ## Sub-modules
//! - `client`: query building, adaptive subdivision and retry handling
//!
//! ## Key Features
//! - Boxes answered with HTTP 429 are split in four and queried again
//! - Other unexpected statuses are retried according to a [`RetryPolicy`]
//! - Transport failures are returned to the caller untouched
//!
//! [`RetryPolicy`]: crate::settings::RetryPolicy

mod client;

use std::time::Duration;

pub use client::*;

use crate::{http::UreqTransport, settings::OverpassSettings};

#[derive(Clone)]
pub struct OverpassClient<T = UreqTransport> {
    transport: T,
    pub settings: OverpassSettings,
}

impl Default for OverpassClient {
    fn default() -> Self {
        OverpassClient::with_settings(OverpassSettings::default())
    }
}

impl OverpassClient {
    pub fn new(url: &str) -> Self {
        let settings = OverpassSettings {
            url: url.to_string(),
            ..Default::default()
        };
        OverpassClient::with_settings(settings)
    }

    pub fn with_settings(settings: OverpassSettings) -> Self {
        let transport = UreqTransport::new(Duration::from_secs(settings.http_timeout_secs));
        OverpassClient {
            transport,
            settings,
        }
    }
}

impl<T> OverpassClient<T> {
    pub fn with_transport(transport: T, settings: OverpassSettings) -> Self {
        OverpassClient {
            transport,
            settings,
        }
    }

    pub fn url(&self) -> &str {
        &self.settings.url
    }

    pub fn set_url(&mut self, url: &str) {
        self.settings.url = url.to_string();
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
