//! Hex coordinate system using axial coordinates (q, r).
//!
//! This module provides the foundational geometry for the board:
//! - `HexCoord`: Identifies individual hex tiles
//! - `Point` and `Geometry`: Pixel-space placement of tiles and corners
//! - `CornerKey`: Exact integer identity of a hex corner, shared by every
//!   tile that touches it
//!
//! Tiles are pointy-top. Local corner 0 sits at the top of the hex and the
//! indices run clockwise; local sides join consecutive corners.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

/// Neighbor offsets in the fixed direction order used for adjacency lists.
pub const HEX_DIRECTIONS: [HexCoord; 6] = [
    HexCoord::new(1, 0),
    HexCoord::new(0, 1),
    HexCoord::new(-1, 1),
    HexCoord::new(-1, 0),
    HexCoord::new(0, -1),
    HexCoord::new(1, -1),
];

/// Local sides of a hex as pairs of local corner indices.
pub const HEX_SIDES: [[u8; 2]; 6] = [[0, 1], [1, 2], [2, 3], [3, 4], [4, 5], [5, 0]];

/// Corner offsets on the integer lattice, in units of (√3/2·R, R/2).
const CORNER_LATTICE: [(i32, i32); 6] = [(0, -2), (1, -1), (1, 1), (0, 2), (-1, 1), (-1, -1)];

/// A position in pixel space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Pixel-space parameters of a board: tile radius and the pixel center of tile (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub hex_radius: f64,
    pub center: Point,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            hex_radius: 70.0,
            center: Point::new(450.0, 350.0),
        }
    }
}

impl Geometry {
    pub fn new(hex_radius: f64, center: Point) -> Self {
        Self { hex_radius, center }
    }

    /// Pixel center of a tile
    pub fn tile_center(&self, coord: HexCoord) -> Point {
        let (x, y) = coord.to_pixel(self.hex_radius);
        Point::new(self.center.x + x, self.center.y + y)
    }

    /// Pixel position of a local corner of the tile centered at `center`
    pub fn corner_position(&self, center: Point, corner: u8) -> Point {
        let angle = corner_angle(corner);
        Point::new(
            center.x + self.hex_radius * angle.cos(),
            center.y - self.hex_radius * angle.sin(),
        )
    }

    /// The tile coordinate whose hexagon contains a pixel position
    pub fn coord_at(&self, point: Point) -> HexCoord {
        HexCoord::from_pixel(
            point.x - self.center.x,
            point.y - self.center.y,
            self.hex_radius,
        )
    }
}

/// Angle of a local corner in radians: π/2 for the top corner, then clockwise.
pub fn corner_angle(corner: u8) -> f64 {
    FRAC_PI_2 - f64::from(corner) * FRAC_PI_3
}

/// Axial coordinate for hex grid.
///
/// In axial coordinates:
/// - `q` increases going east (right)
/// - `r` increases going southeast
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct HexCoord {
    /// Column (increases going east)
    pub q: i32,
    /// Row (increases going southeast)
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Translate by an offset (usually one of [`HEX_DIRECTIONS`])
    pub const fn offset(&self, by: HexCoord) -> HexCoord {
        HexCoord::new(self.q + by.q, self.r + by.r)
    }

    /// The six neighboring hexes in [`HEX_DIRECTIONS`] order
    pub fn neighbors(&self) -> [HexCoord; 6] {
        HEX_DIRECTIONS.map(|dir| self.offset(dir))
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Lattice identity of one of this hex's corners
    pub fn corner_key(&self, corner: u8) -> CornerKey {
        let (dx, dy) = CORNER_LATTICE[usize::from(corner % 6)];
        CornerKey {
            x: 2 * self.q + self.r + dx,
            y: 3 * self.r + dy,
        }
    }

    /// Convert to pixel coordinates (center of hex) relative to hex (0, 0)
    /// Uses pointy-top orientation with the given hex size (radius)
    pub fn to_pixel(&self, hex_size: f64) -> (f64, f64) {
        let x = hex_size * 3.0_f64.sqrt() * (self.q as f64 + self.r as f64 / 2.0);
        let y = hex_size * 1.5 * self.r as f64;
        (x, y)
    }

    /// Convert from pixel coordinates to hex (may need rounding)
    pub fn from_pixel(x: f64, y: f64, hex_size: f64) -> Self {
        let q = (3.0_f64.sqrt() / 3.0 * x - 1.0 / 3.0 * y) / hex_size;
        let r = (2.0 / 3.0 * y) / hex_size;
        Self::axial_round(q, r)
    }

    /// Round fractional axial coordinates to nearest hex
    fn axial_round(q: f64, r: f64) -> Self {
        let s = -q - r;

        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        Self::new(rq as i32, rr as i32)
    }
}

/// Exact identity of a hex corner.
///
/// Every corner of a pointy-top grid lands on an integer lattice measured in
/// half tile widths horizontally and half radii vertically. Corners that
/// coincide in pixel space have equal keys regardless of radius, so vertex
/// deduplication needs no tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CornerKey {
    pub x: i32,
    pub y: i32,
}

impl CornerKey {
    /// Pixel position of this corner under the given geometry
    pub fn to_pixel(&self, geometry: &Geometry) -> Point {
        let half_width = geometry.hex_radius * 3.0_f64.sqrt() / 2.0;
        let half_radius = geometry.hex_radius / 2.0;
        Point::new(
            geometry.center.x + half_width * self.x as f64,
            geometry.center.y + half_radius * self.y as f64,
        )
    }
}
