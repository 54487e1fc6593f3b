use thiserror::Error;

use crate::types::BoundingBox;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while talking to Overpass or Strava.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced an HTTP response (connection refused, timeout, TLS...).
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The service answered with a status we could not recover from.
    #[error("unexpected HTTP status {code} from {url}")]
    Status { code: u16, url: String },

    #[error("could not decode response: {0}")]
    Json(#[from] serde_json::Error),

    /// Overpass kept rate limiting even after splitting the box this many times.
    #[error("still rate limited after {depth} subdivisions of {bbox}")]
    SubdivisionLimit { depth: u32, bbox: BoundingBox },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
