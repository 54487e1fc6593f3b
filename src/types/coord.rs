use std::fmt;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn to_tuple(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }

    /// Arithmetic midpoint in degree space, not the great-circle midpoint.
    pub fn midpoint(&self, other: &Coord) -> Coord {
        Coord {
            lat: (self.lat + other.lat) / 2.0,
            lon: (self.lon + other.lon) / 2.0,
        }
    }
}

impl From<(f64, f64)> for Coord {
    fn from((lat, lon): (f64, f64)) -> Self {
        Coord::new(lat, lon)
    }
}

/// geo uses x = longitude, y = latitude.
impl From<geo::Coord<f64>> for Coord {
    fn from(c: geo::Coord<f64>) -> Self {
        Coord::new(c.y, c.x)
    }
}

impl From<Coord> for geo::Coord<f64> {
    fn from(c: Coord) -> Self {
        geo::Coord { x: c.lon, y: c.lat }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Rectangle in degrees. `southwest` is expected to be south-west of `northeast`;
/// nothing checks it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub southwest: Coord,
    pub northeast: Coord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// The order in which split results are concatenated.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];
}

impl BoundingBox {
    pub const fn new(southwest: Coord, northeast: Coord) -> Self {
        Self {
            southwest,
            northeast,
        }
    }

    pub fn center(&self) -> Coord {
        self.southwest.midpoint(&self.northeast)
    }

    pub fn north_west(&self) -> Coord {
        Coord::new(self.northeast.lat, self.southwest.lon)
    }

    pub fn south_east(&self) -> Coord {
        Coord::new(self.southwest.lat, self.northeast.lon)
    }

    /// Corner ring NW, NE, SE, SW, as sent in an Overpass `poly:` filter.
    pub fn corners(&self) -> [Coord; 4] {
        [
            self.north_west(),
            self.northeast,
            self.south_east(),
            self.southwest,
        ]
    }

    pub fn quadrant(&self, quadrant: Quadrant) -> BoundingBox {
        let c = self.center();
        let sw = self.southwest;
        let ne = self.northeast;
        match quadrant {
            Quadrant::TopLeft => {
                BoundingBox::new(Coord::new(c.lat, sw.lon), Coord::new(ne.lat, c.lon))
            }
            Quadrant::TopRight => BoundingBox::new(c, ne),
            Quadrant::BottomLeft => BoundingBox::new(sw, c),
            Quadrant::BottomRight => {
                BoundingBox::new(Coord::new(sw.lat, c.lon), Coord::new(c.lat, ne.lon))
            }
        }
    }

    /// The four quadrants in concatenation order.
    pub fn split(&self) -> [BoundingBox; 4] {
        Quadrant::ALL.map(|q| self.quadrant(q))
    }

    /// Area in square degrees, only meaningful for comparing boxes.
    pub fn area(&self) -> f64 {
        (self.northeast.lat - self.southwest.lat) * (self.northeast.lon - self.southwest.lon)
    }

    pub fn contains(&self, point: &Coord) -> bool {
        (self.southwest.lat..=self.northeast.lat).contains(&point.lat)
            && (self.southwest.lon..=self.northeast.lon).contains(&point.lon)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} -> {}]", self.southwest, self.northeast)
    }
}
