//! Slippy map (Web Mercator) tile indexing.

use std::{collections::HashSet, f64::consts::PI};

use crate::types::{Coord, TileIndex};

/// Tile containing `coord` at `zoom`.
///
/// Nothing is validated: latitudes beyond the Mercator limit or longitude 180
/// give indices outside `0..2^zoom`, clamped at 0 on the low side.
pub fn coordinate_to_tile(coord: &Coord, zoom: u8) -> TileIndex {
    let n = 2.0_f64.powi(zoom as i32);
    let lat_rad = coord.lat.to_radians();
    let x = (n * (coord.lon + 180.0) / 360.0).floor() as u32;
    let y = (n * (1.0 - lat_rad.tan().asinh() / PI) / 2.0).floor() as u32;
    TileIndex::new(x, y, zoom)
}

/// North-west corner of `tile`.
pub fn tile_to_coordinate(tile: &TileIndex) -> Coord {
    tile_corner(tile.x as f64, tile.y as f64, tile.zoom)
}

/// Inverse projection of fractional tile coordinates.
pub(crate) fn tile_corner(x: f64, y: f64, zoom: u8) -> Coord {
    let n = 2.0_f64.powi(zoom as i32);
    let lon = x / n * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();
    Coord::new(lat, lon)
}

/// Tiles holding at least one vertex of `poly`.
///
/// Only vertices are projected, so a long segment can cross tiles that are not
/// reported.
pub fn tiles_visited_by_polyline(poly: &[Coord], zoom: u8) -> HashSet<TileIndex> {
    poly.iter()
        .map(|coord| coordinate_to_tile(coord, zoom))
        .collect()
}
