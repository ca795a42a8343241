//! Builds the global vertex and edge graph from a set of tiles.
//!
//! Every tile contributes six corners. Corners with equal [`CornerKey`]s
//! collapse into one [`GlobalVertex`], named after the first tile (in index
//! order) that touches it. Each tile side then becomes a [`GlobalEdge`]
//! keyed by its two endpoint vertices; a shared side is recorded once with
//! both tiles referenced.

use crate::board::{Board, GlobalEdge, GlobalVertex, Tile, TileCorner, TileSide};
use crate::hex::{CornerKey, Geometry, HEX_SIDES};
use crate::ids::{EdgeId, VertexId};
use crate::layout::TileLayout;
use std::collections::{BTreeMap, HashMap};

/// Deduplicated graph over a tile set
#[derive(Debug, Clone)]
pub(crate) struct Graph {
    pub vertices: BTreeMap<VertexId, GlobalVertex>,
    pub edges: BTreeMap<EdgeId, GlobalEdge>,
    /// Global vertex at each local corner, indexed by tile
    pub tile_vertices: Vec<[VertexId; 6]>,
}

/// Build an unassigned board (no commodities, numbers, or blocker) from a layout
pub fn build_board(layout: &[TileLayout], geometry: Geometry) -> Board {
    let tiles = layout
        .iter()
        .map(|entry| Tile::from_layout(entry, &geometry))
        .collect();
    Board::from_tiles(tiles, geometry)
}

pub(crate) fn build_graph(tiles: &[Tile]) -> Graph {
    let (vertices, tile_vertices) = collect_vertices(tiles);
    let edges = collect_edges(tiles, &tile_vertices);

    Graph {
        vertices,
        edges,
        tile_vertices,
    }
}

fn collect_vertices(tiles: &[Tile]) -> (BTreeMap<VertexId, GlobalVertex>, Vec<[VertexId; 6]>) {
    let mut by_key: HashMap<CornerKey, VertexId> = HashMap::new();
    let mut vertices: BTreeMap<VertexId, GlobalVertex> = BTreeMap::new();
    let mut tile_vertices = Vec::with_capacity(tiles.len());

    for tile in tiles {
        let mut ids = [VertexId::new(tile.index, 0); 6];

        for corner in &tile.corners {
            let key = tile.coord.corner_key(corner.index);
            let id = *by_key
                .entry(key)
                .or_insert_with(|| VertexId::new(tile.index, corner.index));

            vertices
                .entry(id)
                .or_insert_with(|| GlobalVertex {
                    id,
                    position: corner.position,
                    tiles: Vec::with_capacity(3),
                })
                .tiles
                .push(TileCorner {
                    tile: tile.index,
                    corner: corner.index,
                });

            ids[usize::from(corner.index)] = id;
        }

        tile_vertices.push(ids);
    }

    (vertices, tile_vertices)
}

fn collect_edges(tiles: &[Tile], tile_vertices: &[[VertexId; 6]]) -> BTreeMap<EdgeId, GlobalEdge> {
    let mut edges: BTreeMap<EdgeId, GlobalEdge> = BTreeMap::new();

    for (tile, ids) in tiles.iter().zip(tile_vertices) {
        for side in HEX_SIDES {
            let id = EdgeId::new(ids[usize::from(side[0])], ids[usize::from(side[1])]);
            let edge = edges.entry(id).or_insert_with(|| GlobalEdge {
                id,
                vertices: id.endpoints(),
                tiles: Vec::with_capacity(2),
            });

            if !edge.tiles.iter().any(|s| s.tile == tile.index) {
                edge.tiles.push(TileSide {
                    tile: tile.index,
                    side,
                });
            }
        }
    }

    edges
}
