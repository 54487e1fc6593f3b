//! Tools to handle Strava data.
//!
//! - [`strava::StravaApp`] wraps the Strava REST API (token refresh, activities, streams).
//! - [`overpass::OverpassClient`] fetches mountain passes from OpenStreetMap, splitting
//!   boxes the server refuses as too large.
//! - [`geometry`] and [`tiles`] work on recorded paths: great-circle distances,
//!   proximity of a point to a path and the slippy map tiles a path visits.

pub mod error;
pub mod geometry;
pub mod http;
pub mod logging;
pub mod overpass;
pub mod settings;
pub mod strava;
pub mod tiles;
pub mod types;

pub use error::{Error, Result};
pub use geometry::{Sphere, distance, is_near_polyline, is_near_segment};
pub use overpass::OverpassClient;
pub use settings::Settings;
pub use strava::StravaApp;
pub use tiles::{coordinate_to_tile, tile_to_coordinate, tiles_visited_by_polyline};
pub use types::{BoundingBox, Coord, PointOfInterest, TileIndex};
