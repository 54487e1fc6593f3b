use std::{fs, path::Path, time::Duration};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, error::Result, geometry::Sphere};

/// Open street map overpass API URL
pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const STRAVA_AUTH_URL: &str = "https://www.strava.com/oauth/token";
pub const STRAVA_API_URL: &str = "https://www.strava.com/api/v3";
/// Conventional Earth radius in meters (WGS84 equatorial radius, used as a sphere).
pub const EARTH_RADIUS: f64 = 6_378_137.0;

const SETTINGS_FILE: &str = "settings.json";

/// Everything the clients need that used to be hard coded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub overpass: OverpassSettings,
    pub strava: StravaSettings,
    /// Sphere radius in meters used by every distance computation.
    pub earth_radius: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            overpass: OverpassSettings::default(),
            strava: StravaSettings::default(),
            earth_radius: EARTH_RADIUS,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&raw)?;
        settings.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reads `settings.json` from the platform config directory, falling back to defaults
    /// when there is no such file.
    pub fn load_or_default() -> Result<Self> {
        match ProjectDirs::from("", "", "stravatools") {
            Some(dirs) => Self::load_or_default_from(dirs.config_dir()),
            None => Ok(Settings::default()),
        }
    }

    /// Reads `settings.json` from `dir`, or returns defaults when it is missing.
    pub fn load_or_default_from(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(SETTINGS_FILE);
        if path.exists() {
            return Self::load(path);
        }
        info!("No settings file in {}, using defaults", dir.as_ref().display());
        Ok(Settings::default())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.earth_radius.is_finite() && self.earth_radius > 0.0) {
            return Err(Error::Config(format!(
                "earth_radius must be positive, got {}",
                self.earth_radius
            )));
        }
        if self.overpass.url.is_empty() {
            return Err(Error::Config("overpass.url is empty".to_string()));
        }
        if self.overpass.retry.max_attempts == Some(0) {
            return Err(Error::Config(
                "overpass.retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.overpass.retry.backoff_multiplier < 1.0 {
            return Err(Error::Config(
                "overpass.retry.backoff_multiplier must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sphere(&self) -> Sphere {
        Sphere::new(self.earth_radius)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverpassSettings {
    pub url: String,
    /// Sent to the server as `[timeout:N]`, not enforced locally.
    pub timeout_hint_secs: u32,
    /// Local timeout for a whole HTTP exchange.
    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// How many times a box may be split in four before giving up.
    pub max_depth: u32,
    pub retry: RetryPolicy,
}

impl Default for OverpassSettings {
    fn default() -> Self {
        OverpassSettings {
            url: OVERPASS_URL.to_string(),
            timeout_hint_secs: 60,
            http_timeout_secs: 90,
            user_agent: concat!("stravatools/", env!("CARGO_PKG_VERSION")).to_string(),
            max_depth: 10,
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StravaSettings {
    pub auth_url: String,
    pub api_url: String,
    pub http_timeout_secs: u64,
}

impl Default for StravaSettings {
    fn default() -> Self {
        StravaSettings {
            auth_url: STRAVA_AUTH_URL.to_string(),
            api_url: STRAVA_API_URL.to_string(),
            http_timeout_secs: 30,
        }
    }
}

/// Retry behaviour for Overpass answers that are neither 200 nor 429.
///
/// `max_attempts: None` retries forever without giving up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: Some(5),
            initial_backoff_ms: 500,
            backoff_multiplier: 2.0,
            max_backoff_ms: 30_000,
        }
    }
}

impl RetryPolicy {
    /// Retry immediately, forever.
    pub fn unbounded() -> Self {
        RetryPolicy {
            max_attempts: None,
            initial_backoff_ms: 0,
            backoff_multiplier: 1.0,
            max_backoff_ms: 0,
        }
    }

    /// Retry immediately, at most `max_attempts` requests in total.
    pub fn immediate(max_attempts: u32) -> Self {
        RetryPolicy {
            max_attempts: Some(max_attempts),
            initial_backoff_ms: 0,
            backoff_multiplier: 1.0,
            max_backoff_ms: 0,
        }
    }

    /// Whether another request may follow `attempts` failed ones.
    pub fn should_retry(&self, attempts: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempts < max)
    }

    /// Pause before retry number `retry` (1 for the first retry).
    pub fn delay_for(&self, retry: u32) -> Duration {
        if retry == 0 || self.initial_backoff_ms == 0 {
            return Duration::ZERO;
        }
        let factor = self.backoff_multiplier.powi(retry.saturating_sub(1) as i32);
        let ms = (self.initial_backoff_ms as f64 * factor).min(self.max_backoff_ms as f64);
        Duration::from_millis(ms as u64)
    }
}
