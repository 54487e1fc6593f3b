//! # Geometry Module
//!
//! Great-circle distances on a spherical Earth and a tolerance test telling
//! whether a point lies close to a recorded path.
//!
//! ## Key Features
//! - Spherical law of cosines, argument clamped so coincident points give 0
//! - Point-to-segment proximity by recursive midpoint bisection
//! - Conversion from `geo::LineString` into a polyline of [`Coord`]s

use geo::LineString;

use crate::{settings::EARTH_RADIUS, types::Coord};

/// Sphere used for every distance computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f64,
}

impl Default for Sphere {
    fn default() -> Self {
        Sphere {
            radius: EARTH_RADIUS,
        }
    }
}

impl Sphere {
    pub const fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Distance in meters between two points given in degrees.
    pub fn distance(&self, a: &Coord, b: &Coord) -> f64 {
        if a == b {
            return 0.0;
        }
        let lat_a = a.lat.to_radians();
        let lat_b = b.lat.to_radians();
        let d_lon = (b.lon - a.lon).to_radians();

        let cos_angle = lat_a.sin() * lat_b.sin() + lat_a.cos() * lat_b.cos() * d_lon.cos();
        self.radius * cos_angle.clamp(-1.0, 1.0).acos()
    }

    /// Whether `c` is within `tol` meters of segment AB.
    ///
    /// The segment is halved until its pieces are shorter than `tol / 2`, and only
    /// the endpoints of each piece are compared to `c`.
    pub fn is_near_segment(&self, a: &Coord, b: &Coord, c: &Coord, tol: f64) -> bool {
        if self.distance(a, c) <= tol || self.distance(b, c) <= tol {
            return true;
        }
        // A zero tolerance would keep splitting a degenerate segment forever.
        if tol > 0.0 && self.distance(a, b) >= tol / 2.0 {
            let d = a.midpoint(b);
            return self.is_near_segment(a, &d, c, tol) || self.is_near_segment(&d, b, c, tol);
        }
        false
    }

    /// Whether `point` is within `tol` meters of any segment of `poly`.
    ///
    /// Vertices are compared first: a vertex hit answers for its segment without
    /// bisecting every segment before it.
    pub fn is_near_polyline(&self, poly: &[Coord], point: &Coord, tol: f64) -> bool {
        if poly.len() < 2 {
            return false;
        }
        if poly.iter().any(|vertex| self.distance(vertex, point) <= tol) {
            return true;
        }
        poly.windows(2)
            .any(|segment| self.is_near_segment(&segment[0], &segment[1], point, tol))
    }

    /// Sum of segment lengths in meters.
    pub fn polyline_length(&self, poly: &[Coord]) -> f64 {
        poly.windows(2)
            .map(|segment| self.distance(&segment[0], &segment[1]))
            .sum()
    }
}

pub fn distance(a: &Coord, b: &Coord) -> f64 {
    Sphere::default().distance(a, b)
}

pub fn is_near_segment(a: &Coord, b: &Coord, c: &Coord, tol: f64) -> bool {
    Sphere::default().is_near_segment(a, b, c, tol)
}

pub fn is_near_polyline(poly: &[Coord], point: &Coord, tol: f64) -> bool {
    Sphere::default().is_near_polyline(poly, point, tol)
}

pub fn polyline_from_line_string(line: &LineString<f64>) -> Vec<Coord> {
    line.coords().map(|c| Coord::from(*c)).collect()
}
