use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::Coord;

/// Answer of the `refresh_token` grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token_type: String,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Epoch seconds.
    #[serde(default)]
    pub expires_at: i64,
    #[serde(default)]
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}

/// Paging and time window for the athlete activity list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityPage {
    pub per_page: u32,
    pub page: u32,
    /// Only activities that started before this instant.
    pub before: Option<DateTime<Utc>>,
    /// Only activities that started after this instant.
    pub after: Option<DateTime<Utc>>,
}

impl Default for ActivityPage {
    fn default() -> Self {
        ActivityPage {
            per_page: 30,
            page: 1,
            before: None,
            after: None,
        }
    }
}

impl ActivityPage {
    pub fn new(per_page: u32, page: u32) -> Self {
        ActivityPage {
            per_page,
            page,
            ..Default::default()
        }
    }

    pub fn before(mut self, before: DateTime<Utc>) -> Self {
        self.before = Some(before);
        self
    }

    pub fn after(mut self, after: DateTime<Utc>) -> Self {
        self.after = Some(after);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub sport_type: Option<String>,
    /// Meters.
    #[serde(default)]
    pub distance: f64,
    /// Seconds.
    #[serde(default)]
    pub moving_time: u64,
    #[serde(default)]
    pub elapsed_time: u64,
    #[serde(default)]
    pub total_elevation_gain: f64,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub map: Option<ActivityMap>,
    /// Every field not listed above, as Strava sent it.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityMap {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub summary_polyline: Option<String>,
    #[serde(default)]
    pub polyline: Option<String>,
}

/// The streams requested for every activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKey {
    Time,
    Distance,
    Watts,
    LatLng,
    Altitude,
    HeartRate,
    Temp,
    Moving,
    Cadence,
    GradeSmooth,
    VelocitySmooth,
}

impl StreamKey {
    pub const ALL: [StreamKey; 11] = [
        StreamKey::Time,
        StreamKey::Distance,
        StreamKey::Watts,
        StreamKey::LatLng,
        StreamKey::Altitude,
        StreamKey::HeartRate,
        StreamKey::Temp,
        StreamKey::Moving,
        StreamKey::Cadence,
        StreamKey::GradeSmooth,
        StreamKey::VelocitySmooth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKey::Time => "time",
            StreamKey::Distance => "distance",
            StreamKey::Watts => "watts",
            StreamKey::LatLng => "latlng",
            StreamKey::Altitude => "altitude",
            StreamKey::HeartRate => "heartrate",
            StreamKey::Temp => "temp",
            StreamKey::Moving => "moving",
            StreamKey::Cadence => "cadence",
            StreamKey::GradeSmooth => "grade_smooth",
            StreamKey::VelocitySmooth => "velocity_smooth",
        }
    }

    pub fn from_name(name: &str) -> Option<StreamKey> {
        StreamKey::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// `time,distance,...` as it appears in the streams URL.
    pub fn all_keys() -> String {
        StreamKey::ALL
            .iter()
            .map(StreamKey::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub series_type: Option<String>,
    #[serde(default)]
    pub original_size: Option<u64>,
    #[serde(default)]
    pub resolution: Option<String>,
}

impl Stream {
    pub fn key(&self) -> Option<StreamKey> {
        StreamKey::from_name(&self.kind)
    }

    /// The `latlng` stream as a polyline. `None` for any other stream or for a
    /// sample that is not a `[lat, lng]` pair.
    pub fn as_polyline(&self) -> Option<Vec<Coord>> {
        if self.key() != Some(StreamKey::LatLng) {
            return None;
        }
        self.data
            .iter()
            .map(|sample| {
                let pair = sample.as_array()?;
                match pair.as_slice() {
                    [lat, lng] => Some(Coord::new(lat.as_f64()?, lng.as_f64()?)),
                    _ => None,
                }
            })
            .collect()
    }

    /// Numeric samples; booleans (the `moving` stream) become 0 or 1.
    pub fn as_f64_series(&self) -> Option<Vec<f64>> {
        self.data
            .iter()
            .map(|sample| match sample {
                Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
                other => other.as_f64(),
            })
            .collect()
    }
}

/// Looks up one stream by key.
pub fn find_stream(streams: &[Stream], key: StreamKey) -> Option<&Stream> {
    streams.iter().find(|s| s.key() == Some(key))
}
