use serde::{Deserialize, Serialize};

use super::{BoundingBox, Coord};

/// Slippy map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileIndex {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

impl TileIndex {
    pub const fn new(x: u32, y: u32, zoom: u8) -> Self {
        Self { x, y, zoom }
    }

    /// North-west corner of the tile.
    pub fn north_west(&self) -> Coord {
        crate::tiles::tile_to_coordinate(self)
    }

    /// Area covered by the tile. Computed in floating point, so the last
    /// row and column of any zoom level are fine.
    pub fn bounds(&self) -> BoundingBox {
        let north_west = self.north_west();
        let south = crate::tiles::tile_corner(self.x as f64, self.y as f64 + 1.0, self.zoom).lat;
        let east = north_west.lon + level_to_tile_width(self.zoom);
        BoundingBox::new(
            Coord::new(south, north_west.lon),
            Coord::new(north_west.lat, east),
        )
    }
}

/// Width of one tile in degrees of longitude.
pub fn level_to_tile_width(zoom: u8) -> f64 {
    360.0 / 2.0_f64.powi(zoom as i32)
}
