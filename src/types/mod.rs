mod coord;
mod overpass_types;
mod tile;

pub use coord::*;
pub use overpass_types::*;
pub use tile::*;
