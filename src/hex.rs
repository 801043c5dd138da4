//! Axial hex coordinate engine
//!
//! Flat-top axial (q, r) coordinates with the derived cube component
//! s = -q - r. Everything else in the crate builds on the conversions and
//! enumerations here, including the single axial-to-offset conversion used
//! for every rectangular bounds check.

use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// An axial hex coordinate. No implicit bounds; negatives are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// The six neighbor offsets, indexed 0-5 clockwise starting at "right".
pub const HEX_DIRECTIONS: [HexCoord; 6] = [
    HexCoord::new(1, 0),
    HexCoord::new(1, -1),
    HexCoord::new(0, -1),
    HexCoord::new(-1, 0),
    HexCoord::new(-1, 1),
    HexCoord::new(0, 1),
];

impl HexCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Derived cube component; q + r + s is always 0.
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Canonical lookup key, `"{q},{r}"`.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Hex grid distance: `(|dq| + |dq+dr| + |dr|) / 2`.
    pub fn distance(&self, other: HexCoord) -> i32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        (dq.abs() + (dq + dr).abs() + dr.abs()) / 2
    }

    /// The neighbor in direction `dir` (0-5, clockwise from "right").
    pub fn neighbor(&self, dir: usize) -> HexCoord {
        *self + HEX_DIRECTIONS[dir % 6]
    }

    /// All six adjacent hexes, in direction order.
    pub fn neighbors(&self) -> [HexCoord; 6] {
        HEX_DIRECTIONS.map(|dir| *self + dir)
    }

    /// One 60-degree rotation about the origin: (q, r) -> (-r, q + r).
    pub const fn rotate60(&self) -> HexCoord {
        HexCoord::new(-self.r, self.q + self.r)
    }

    /// Offset grid position: `row = r`, `col = q + floor(row / 2)`.
    ///
    /// This is the one conversion between axial coordinates and the
    /// rectangular view of the grid. Every bounds check must go through
    /// here (or [`HexCoord::in_bounds`]) so that flood fill previews,
    /// pattern paste, and full-map generation agree on what the grid
    /// contains.
    pub const fn offset_position(&self) -> (i32, i32) {
        let row = self.r;
        let col = self.q + self.r.div_euclid(2);
        (row, col)
    }

    /// Whether this hex lies on the visible `width x height` grid.
    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        let (row, col) = self.offset_position();
        row >= 0 && row < height as i32 && col >= 0 && col < width as i32
    }
}

impl Add for HexCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for HexCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl Neg for HexCoord {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.q, -self.r)
    }
}

impl Display for HexCoord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

/// Failure to parse a `"q,r"` coordinate key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("hex key `{0}` is missing the `,` separator")]
    MissingSeparator(String),
    #[error("hex key component `{0}` is not an integer")]
    InvalidComponent(String),
}

impl FromStr for HexCoord {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (q, r) = s
            .split_once(',')
            .ok_or_else(|| KeyParseError::MissingSeparator(s.to_string()))?;
        let q = q
            .parse()
            .map_err(|_| KeyParseError::InvalidComponent(q.to_string()))?;
        let r = r
            .parse()
            .map_err(|_| KeyParseError::InvalidComponent(r.to_string()))?;
        Ok(HexCoord::new(q, r))
    }
}

// Serialized as the canonical key string so coordinate-keyed maps
// round-trip through JSON with exactly the `"q,r"` textual keys.
impl Serialize for HexCoord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexCoord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(D::Error::custom)
    }
}

/// Convert a hex to its pixel center for a given hex size.
pub fn hex_to_pixel(hex: HexCoord, size: f64) -> PixelPoint {
    let sqrt3 = 3.0f64.sqrt();
    PixelPoint {
        x: size * (sqrt3 * hex.q as f64 + sqrt3 / 2.0 * hex.r as f64),
        y: size * (1.5 * hex.r as f64),
    }
}

/// Convert a pixel position to the hex containing it.
pub fn pixel_to_hex(point: PixelPoint, size: f64) -> HexCoord {
    let sqrt3 = 3.0f64.sqrt();
    let q = (sqrt3 / 3.0 * point.x - point.y / 3.0) / size;
    let r = (2.0 / 3.0 * point.y) / size;
    hex_round(q, r)
}

/// Round fractional axial coordinates to the nearest integer hex.
///
/// Rounds all three cube components and corrects whichever one had the
/// largest rounding error so that q + r + s stays 0.
pub fn hex_round(q: f64, r: f64) -> HexCoord {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();

    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }

    HexCoord::new(rq as i32, rr as i32)
}

/// All hexes within `range` steps of `center`, inclusive.
pub fn hexes_in_range(center: HexCoord, range: i32) -> Vec<HexCoord> {
    let mut out = Vec::new();
    for dq in -range..=range {
        let lo = (-range).max(-dq - range);
        let hi = range.min(-dq + range);
        for dr in lo..=hi {
            out.push(center + HexCoord::new(dq, dr));
        }
    }
    out
}

/// Enumerate every hex on the visible `width x height` grid, row by row.
///
/// Inverse of [`HexCoord::offset_position`]; "fill entire map" generation
/// and full-grid previews build their coordinate sets here.
pub fn grid_coordinates(width: u32, height: u32) -> Vec<HexCoord> {
    let mut out = Vec::with_capacity((width * height) as usize);
    for row in 0..height as i32 {
        for col in 0..width as i32 {
            out.push(HexCoord::new(col - row.div_euclid(2), row));
        }
    }
    out
}
