//! Read-only topology queries over a built board.

use crate::board::Board;
use crate::hex::HexCoord;
use crate::ids::{EdgeId, VertexId};
use std::collections::{BTreeSet, HashSet};

impl Board {
    // ==================== Perimeter ====================

    /// Edges bordering exactly one tile
    pub fn perimeter_edges(&self) -> Vec<EdgeId> {
        self.edges()
            .values()
            .filter(|e| e.is_perimeter())
            .map(|e| e.id)
            .collect()
    }

    /// Edges shared by two tiles
    pub fn interior_edges(&self) -> Vec<EdgeId> {
        self.edges()
            .values()
            .filter(|e| !e.is_perimeter())
            .map(|e| e.id)
            .collect()
    }

    /// Endpoints of all perimeter edges, without duplicates
    pub fn perimeter_vertices(&self) -> Vec<VertexId> {
        self.perimeter_edges()
            .into_iter()
            .flat_map(|e| e.endpoints())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn is_perimeter_vertex(&self, vertex: VertexId) -> bool {
        self.edges()
            .values()
            .any(|e| e.is_perimeter() && e.id.touches(vertex))
    }

    // ==================== Ports ====================

    /// Perimeter vertices shared by exactly two tiles
    pub fn portable_vertices(&self) -> Vec<VertexId> {
        self.perimeter_vertices()
            .into_iter()
            .filter(|v| self.vertex(*v).is_some_and(|gv| gv.tiles.len() == 2))
            .collect()
    }

    pub fn is_portable(&self, vertex: VertexId) -> bool {
        self.vertex(vertex).is_some_and(|gv| gv.tiles.len() == 2)
            && self.is_perimeter_vertex(vertex)
    }

    // ==================== Growth ====================

    /// Unoccupied coordinates adjacent to any tile touching `vertex`.
    ///
    /// Results are in discovery order (tile order, then direction order) with
    /// duplicates removed. Unknown vertices yield nothing.
    pub fn valid_expansion_positions(&self, vertex: VertexId) -> Vec<HexCoord> {
        let Some(global) = self.vertex(vertex) else {
            return Vec::new();
        };

        let occupied: HashSet<HexCoord> = self.tiles().iter().map(|t| t.coord).collect();
        let mut seen = HashSet::new();
        let mut positions = Vec::new();

        for reference in &global.tiles {
            let coord = self.tiles()[reference.tile].coord;
            for candidate in coord.neighbors() {
                if !occupied.contains(&candidate) && seen.insert(candidate) {
                    positions.push(candidate);
                }
            }
        }

        positions
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::hex::{Geometry, HexCoord};
    use crate::ids::VertexId;
    use crate::layout::generate_layout;
    use crate::topology::build_board;
    use pretty_assertions::assert_eq;

    fn unassigned(rings: u32) -> Board {
        build_board(&generate_layout(rings), Geometry::default())
    }

    #[test]
    fn test_perimeter_counts_by_ring() {
        // (rings, perimeter edges, perimeter vertices, portable vertices)
        for (rings, edges, vertices, portable) in
            [(0, 6, 6, 0), (1, 18, 18, 6), (2, 30, 30, 12), (3, 42, 42, 18)]
        {
            let board = unassigned(rings);
            assert_eq!(board.perimeter_edges().len(), edges, "rings {}", rings);
            assert_eq!(board.perimeter_vertices().len(), vertices, "rings {}", rings);
            assert_eq!(board.portable_vertices().len(), portable, "rings {}", rings);
        }
    }

    #[test]
    fn test_interior_and_perimeter_partition_edges() {
        let board = unassigned(2);
        assert_eq!(board.interior_edges().len(), 42);
        assert_eq!(
            board.interior_edges().len() + board.perimeter_edges().len(),
            board.edges().len()
        );
    }

    #[test]
    fn test_portable_vertices_touch_two_tiles() {
        let board = unassigned(2);
        for v in board.portable_vertices() {
            assert!(board.is_portable(v));
            assert!(board.is_perimeter_vertex(v));
            assert_eq!(board.vertex(v).unwrap().tiles.len(), 2);
        }
        // The center tile's corners are interior
        assert!(!board.is_perimeter_vertex(VertexId::new(0, 0)));
        assert!(!board.is_portable(VertexId::new(0, 0)));
    }

    #[test]
    fn test_single_tile_has_no_ports() {
        let board = unassigned(0);
        assert!(board.portable_vertices().is_empty());
        assert!(board.is_perimeter_vertex(VertexId::new(0, 3)));
    }

    #[test]
    fn test_expansion_positions_for_single_tile() {
        let board = unassigned(0);
        let positions = board.valid_expansion_positions(VertexId::new(0, 0));
        assert_eq!(positions, HexCoord::ORIGIN.neighbors().to_vec());
    }

    #[test]
    fn test_expansion_positions_are_unoccupied_and_unique() {
        let board = unassigned(1);
        let portable = board.portable_vertices()[0];
        let positions = board.valid_expansion_positions(portable);

        assert!(!positions.is_empty());
        for (i, p) in positions.iter().enumerate() {
            assert!(board.tile_index_at(*p).is_none());
            assert!(!positions[i + 1..].contains(p));
        }
    }

    #[test]
    fn test_expansion_positions_for_unknown_vertex_is_empty() {
        let board = unassigned(1);
        assert!(board
            .valid_expansion_positions(VertexId::new(500, 0))
            .is_empty());
    }

    #[test]
    fn test_growth_turns_port_into_interior_vertex() {
        let board = unassigned(1);
        let port = board.portable_vertices()[0];
        let positions = board.valid_expansion_positions(port);

        // Exactly one empty slot touches a two-tile vertex
        let grown_boards: Vec<Board> = positions
            .iter()
            .map(|p| board.with_tile(*p, None, None).unwrap())
            .collect();
        let closing = grown_boards
            .iter()
            .filter(|b| b.vertex(port).unwrap().tiles.len() == 3)
            .count();
        assert_eq!(closing, 1);
    }
}
