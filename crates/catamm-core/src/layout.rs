//! Tile layouts: which coordinates exist and who neighbors whom.
//!
//! A layout is the purely combinatorial part of a board. Index 0 is always
//! the center tile, followed by each ring in order. Adjacency lists follow
//! [`HEX_DIRECTIONS`] order and only mention tiles present in the layout.

use crate::config::MAX_RINGS;
use crate::hex::{HexCoord, HEX_DIRECTIONS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Step directions for walking a ring, starting from (ring, 0).
const RING_WALK: [HexCoord; 6] = [
    HexCoord::new(-1, 1),
    HexCoord::new(-1, 0),
    HexCoord::new(0, -1),
    HexCoord::new(1, -1),
    HexCoord::new(1, 0),
    HexCoord::new(0, 1),
];

/// One tile of a layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayout {
    /// Position in the layout, also the tile's board index
    pub index: usize,
    pub coord: HexCoord,
    /// Indices of neighboring tiles present in the layout
    pub neighbors: Vec<usize>,
}

/// Number of tiles in a hexagonal board with the given ring count.
///
/// Ring counts above [`MAX_RINGS`] are clamped.
pub fn tile_count(rings: u32) -> usize {
    let rings = rings.min(MAX_RINGS) as usize;
    3 * rings * rings + 3 * rings + 1
}

/// Generate a hexagonal layout with `rings` rings around the center.
///
/// Ring k starts at (k, 0) and walks around the center one side at a time,
/// so the result has 3k²+3k+1 tiles with unique coordinates. Ring counts
/// above [`MAX_RINGS`] are clamped.
pub fn generate_layout(rings: u32) -> Vec<TileLayout> {
    let rings = rings.min(MAX_RINGS);
    let mut coords = Vec::with_capacity(tile_count(rings));
    coords.push(HexCoord::ORIGIN);

    for ring in 1..=rings as i32 {
        let mut current = HexCoord::new(ring, 0);
        for step in RING_WALK {
            for _ in 0..ring {
                coords.push(current);
                current = current.offset(step);
            }
        }
    }

    link_neighbors(&coords)
}

/// Build adjacency lists for an arbitrary set of coordinates
pub fn link_neighbors(coords: &[HexCoord]) -> Vec<TileLayout> {
    let by_coord: HashMap<HexCoord, usize> =
        coords.iter().enumerate().map(|(i, c)| (*c, i)).collect();

    coords
        .iter()
        .enumerate()
        .map(|(index, coord)| TileLayout {
            index,
            coord: *coord,
            neighbors: HEX_DIRECTIONS
                .iter()
                .filter_map(|dir| by_coord.get(&coord.offset(*dir)).copied())
                .collect(),
        })
        .collect()
}

/// The fixed 19-tile table used for the classic board.
///
/// Ring 2 is listed clockwise from (2, -1), which differs from the order
/// [`generate_layout`] produces. Indices here are the canonical ones for a
/// standard board.
const STANDARD_TILES: [((i32, i32), &[usize]); 19] = [
    ((0, 0), &[1, 2, 3, 4, 5, 6]),
    ((1, 0), &[8, 9, 2, 0, 6, 7]),
    ((0, 1), &[9, 10, 11, 3, 0, 1]),
    ((-1, 1), &[2, 11, 12, 13, 4, 0]),
    ((-1, 0), &[0, 3, 13, 14, 15, 5]),
    ((0, -1), &[6, 0, 4, 15, 16, 17]),
    ((1, -1), &[7, 1, 0, 5, 17, 18]),
    ((2, -1), &[8, 1, 6, 18]),
    ((2, 0), &[9, 1, 7]),
    ((1, 1), &[10, 2, 1, 8]),
    ((0, 2), &[11, 2, 9]),
    ((-1, 2), &[10, 12, 3, 2]),
    ((-2, 2), &[11, 13, 3]),
    ((-2, 1), &[3, 12, 14, 4]),
    ((-2, 0), &[4, 13, 15]),
    ((-1, -1), &[5, 4, 14, 16]),
    ((0, -2), &[17, 5, 15]),
    ((1, -2), &[18, 6, 5, 16]),
    ((2, -2), &[7, 6, 17]),
];

/// The classic 19-tile board
pub fn standard_layout() -> Vec<TileLayout> {
    STANDARD_TILES
        .iter()
        .enumerate()
        .map(|(index, ((q, r), neighbors))| TileLayout {
            index,
            coord: HexCoord::new(*q, *r),
            neighbors: neighbors.to_vec(),
        })
        .collect()
}

/// Layout for a ring count: the literal table for two rings, generated otherwise
pub fn layout_for_rings(rings: u32) -> Vec<TileLayout> {
    if rings == 2 {
        standard_layout()
    } else {
        generate_layout(rings)
    }
}
