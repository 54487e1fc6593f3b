use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Coord;

// Overpass API JSON, only the fields `out center;` gives us for nodes.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type", default)]
    pub element_type: String,
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// A mountain pass or saddle returned by Overpass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub latitude: f64,
    pub longitude: f64,
    pub external_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl PointOfInterest {
    pub fn coord(&self) -> Coord {
        Coord::new(self.latitude, self.longitude)
    }
}

impl From<OverpassElement> for PointOfInterest {
    fn from(element: OverpassElement) -> Self {
        let elevation = element.tags.get("ele").and_then(|ele| match parse_elevation(ele) {
            Some(value) => Some(value),
            None => {
                warn!("Cannot convert elevation {:?} of node {} to a number", ele, element.id);
                None
            }
        });

        PointOfInterest {
            latitude: element.lat,
            longitude: element.lon,
            external_id: element.id,
            name: element.tags.get("name").cloned(),
            elevation,
        }
    }
}

fn parse_elevation(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
