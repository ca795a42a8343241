//! Board representation: tiles, the global vertex/edge graph, and buildings.
//!
//! This module contains:
//! - Resource types and the per-tile data (commodity, number token, corners)
//! - Global vertices and edges with back-references to the tiles that own them
//! - Buildings, roads and the blocker, with placement validation
//! - Board growth, which returns a rebuilt board with one more tile
//!
//! Topology queries (perimeter, portable vertices, expansion sites) live in
//! [`crate::queries`]; graph construction lives in [`crate::topology`].

use crate::config::BoardConfig;
use crate::hex::{corner_angle, Geometry, HexCoord, Point, HEX_DIRECTIONS};
use crate::ids::{EdgeId, VertexId};
use crate::layout::{layout_for_rings, TileLayout};
use crate::{seeding, topology};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Player identifier
pub type PlayerId = u8;

/// The five commodities a tile can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resource {
    Wood,
    Brick,
    Sheep,
    Wheat,
    Ore,
}

impl Resource {
    /// All resource types
    pub const ALL: [Resource; 5] = [
        Resource::Wood,
        Resource::Brick,
        Resource::Sheep,
        Resource::Wheat,
        Resource::Ore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Wood => "Wood",
            Resource::Brick => "Brick",
            Resource::Sheep => "Sheep",
            Resource::Wheat => "Wheat",
            Resource::Ore => "Ore",
        }
    }

    /// Short label used in market names ("Wo-B")
    pub fn short_label(&self) -> &'static str {
        match self {
            Resource::Wood => "Wo",
            Resource::Brick => "B",
            Resource::Sheep => "S",
            Resource::Wheat => "Wh",
            Resource::Ore => "O",
        }
    }
}

/// One local corner of a tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    /// Local index, 0 at the top, clockwise
    pub index: u8,
    pub position: Point,
    pub angle: f64,
}

/// A single hex tile on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub index: usize,
    /// Produced commodity; `None` for the desert
    pub resource: Option<Resource>,
    /// Number token (2-12 except 7); `None` for the desert
    pub number: Option<u8>,
    pub coord: HexCoord,
    pub center: Point,
    pub corners: [Corner; 6],
    /// Neighboring tile indices
    pub neighbors: Vec<usize>,
    /// Whether the blocker sits on this tile
    pub has_blocker: bool,
}

impl Tile {
    /// Create an unassigned tile from its layout entry
    pub fn from_layout(layout: &TileLayout, geometry: &Geometry) -> Self {
        let center = geometry.tile_center(layout.coord);
        let corners = std::array::from_fn(|i| {
            let index = i as u8;
            Corner {
                index,
                position: geometry.corner_position(center, index),
                angle: corner_angle(index),
            }
        });

        Self {
            index: layout.index,
            resource: None,
            number: None,
            coord: layout.coord,
            center,
            corners,
            neighbors: layout.neighbors.clone(),
            has_blocker: false,
        }
    }

    pub fn is_desert(&self) -> bool {
        self.resource.is_none()
    }
}

/// A (tile, local corner) reference held by a global vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCorner {
    pub tile: usize,
    pub corner: u8,
}

/// A (tile, local side) reference held by a global edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSide {
    pub tile: usize,
    /// Local corner indices of the side, e.g. [5, 0]
    pub side: [u8; 2],
}

/// A point shared by up to three tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalVertex {
    pub id: VertexId,
    pub position: Point,
    /// Every tile corner that coincides with this vertex (1 to 3)
    pub tiles: Vec<TileCorner>,
}

/// A segment between two global vertices, shared by one or two tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalEdge {
    pub id: EdgeId,
    pub vertices: [VertexId; 2],
    pub tiles: Vec<TileSide>,
}

impl GlobalEdge {
    /// Perimeter edges border exactly one tile
    pub fn is_perimeter(&self) -> bool {
        self.tiles.len() == 1
    }
}

/// Kind of building on a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    Settlement,
    City,
}

/// A building on a global vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub owner: PlayerId,
}

/// Errors from board mutations
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("No vertex {0} on this board")]
    UnknownVertex(VertexId),

    #[error("No edge {0} on this board")]
    UnknownEdge(EdgeId),

    #[error("No tile with index {0}")]
    UnknownTile(usize),

    #[error("Vertex {0} already has a building")]
    VertexOccupied(VertexId),

    #[error("Edge {0} already has a road")]
    EdgeOccupied(EdgeId),

    #[error("No settlement at {0} to upgrade")]
    NoSettlement(VertexId),

    #[error("Building at {0} belongs to another player")]
    NotOwner(VertexId),

    #[error("Building at {0} is already a city")]
    AlreadyCity(VertexId),

    #[error("A tile already exists at ({}, {})", .0.q, .0.r)]
    PositionOccupied(HexCoord),
}

/// The complete board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    vertices: BTreeMap<VertexId, GlobalVertex>,
    edges: BTreeMap<EdgeId, GlobalEdge>,
    /// Global vertex at each local corner, per tile
    tile_vertices: Vec<[VertexId; 6]>,
    blocker: Option<usize>,
    buildings: BTreeMap<VertexId, Building>,
    roads: BTreeMap<EdgeId, PlayerId>,
    geometry: Geometry,
}

impl Board {
    /// Build the vertex/edge graph over a set of tiles.
    ///
    /// Tile `i` must sit at position `i`. The blocker is taken from the
    /// tiles' `has_blocker` flags.
    pub fn from_tiles(tiles: Vec<Tile>, geometry: Geometry) -> Self {
        let graph = topology::build_graph(&tiles);
        let blocker = tiles.iter().position(|t| t.has_blocker);

        Self {
            tiles,
            vertices: graph.vertices,
            edges: graph.edges,
            tile_vertices: graph.tile_vertices,
            blocker,
            buildings: BTreeMap::new(),
            roads: BTreeMap::new(),
            geometry,
        }
    }

    /// Generate a seeded board from configuration
    pub fn generate_with_rng<R: Rng + ?Sized>(config: &BoardConfig, rng: &mut R) -> Self {
        let layout = layout_for_rings(config.rings);
        let mut board = topology::build_board(&layout, config.geometry());
        board.seed_with_rng(rng);
        board
    }

    /// Create the classic 19-tile board with random resources and numbers
    pub fn standard() -> Self {
        Self::standard_with_rng(&mut rand::thread_rng())
    }

    /// Create the classic 19-tile board with a specific RNG (for deterministic testing)
    pub fn standard_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::generate_with_rng(&BoardConfig::default(), rng)
    }

    /// Assign commodities, number tokens and the blocker to every tile
    pub fn seed_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        seeding::assign_resources_and_numbers(&mut self.tiles, rng);
        self.blocker = self.tiles.iter().position(|t| t.has_blocker);
    }

    // ==================== Accessors ====================

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn vertices(&self) -> &BTreeMap<VertexId, GlobalVertex> {
        &self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> Option<&GlobalVertex> {
        self.vertices.get(&id)
    }

    pub fn edges(&self) -> &BTreeMap<EdgeId, GlobalEdge> {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Option<&GlobalEdge> {
        self.edges.get(&id)
    }

    /// Global vertex ids of a tile's six corners
    pub fn tile_vertices(&self, index: usize) -> Option<&[VertexId; 6]> {
        self.tile_vertices.get(index)
    }

    /// Index of the tile currently holding the blocker
    pub fn blocker(&self) -> Option<usize> {
        self.blocker
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn buildings(&self) -> &BTreeMap<VertexId, Building> {
        &self.buildings
    }

    pub fn building_at(&self, vertex: VertexId) -> Option<&Building> {
        self.buildings.get(&vertex)
    }

    pub fn roads(&self) -> &BTreeMap<EdgeId, PlayerId> {
        &self.roads
    }

    pub fn road_at(&self, edge: EdgeId) -> Option<PlayerId> {
        self.roads.get(&edge).copied()
    }

    /// Index of the tile at a coordinate, if present
    pub fn tile_index_at(&self, coord: HexCoord) -> Option<usize> {
        self.tiles.iter().position(|t| t.coord == coord)
    }

    /// The tile whose hexagon contains a pixel position
    pub fn tile_at(&self, point: Point) -> Option<&Tile> {
        let coord = self.geometry.coord_at(point);
        self.tile_index_at(coord).map(|i| &self.tiles[i])
    }

    /// Commodities produced by the tiles around a vertex, in tile order
    pub fn resources_at(&self, vertex: VertexId) -> Vec<Option<Resource>> {
        self.vertices
            .get(&vertex)
            .map(|v| {
                v.tiles
                    .iter()
                    .map(|tc| self.tiles[tc.tile].resource)
                    .collect()
            })
            .unwrap_or_default()
    }

    // ==================== Mutations ====================

    /// Place a settlement on an empty vertex
    pub fn place_settlement(&mut self, vertex: VertexId, player: PlayerId) -> Result<(), BoardError> {
        if !self.vertices.contains_key(&vertex) {
            return Err(BoardError::UnknownVertex(vertex));
        }
        if self.buildings.contains_key(&vertex) {
            return Err(BoardError::VertexOccupied(vertex));
        }

        self.buildings.insert(
            vertex,
            Building {
                kind: BuildingKind::Settlement,
                owner: player,
            },
        );
        Ok(())
    }

    /// Upgrade the player's own settlement to a city
    pub fn upgrade_to_city(&mut self, vertex: VertexId, player: PlayerId) -> Result<(), BoardError> {
        let building = self
            .buildings
            .get_mut(&vertex)
            .ok_or(BoardError::NoSettlement(vertex))?;

        if building.owner != player {
            return Err(BoardError::NotOwner(vertex));
        }
        if building.kind == BuildingKind::City {
            return Err(BoardError::AlreadyCity(vertex));
        }

        building.kind = BuildingKind::City;
        Ok(())
    }

    /// Place a road on an empty edge
    pub fn place_road(&mut self, edge: EdgeId, player: PlayerId) -> Result<(), BoardError> {
        if !self.edges.contains_key(&edge) {
            return Err(BoardError::UnknownEdge(edge));
        }
        if self.roads.contains_key(&edge) {
            return Err(BoardError::EdgeOccupied(edge));
        }

        self.roads.insert(edge, player);
        Ok(())
    }

    /// Move the blocker, returning the tile it left
    pub fn move_blocker(&mut self, tile: usize) -> Result<Option<usize>, BoardError> {
        if tile >= self.tiles.len() {
            return Err(BoardError::UnknownTile(tile));
        }

        let previous = self.blocker.take();
        if let Some(old) = previous {
            self.tiles[old].has_blocker = false;
        }
        self.tiles[tile].has_blocker = true;
        self.blocker = Some(tile);
        Ok(previous)
    }

    // ==================== Growth ====================

    /// A new board with one more tile at `coord`.
    ///
    /// The tile takes the next index, existing neighbors gain it in their
    /// adjacency lists, and the graph is rebuilt from scratch. Existing vertex
    /// and edge identities are unchanged because the new tile has the highest
    /// index. Buildings, roads and the blocker carry over.
    pub fn with_tile(
        &self,
        coord: HexCoord,
        resource: Option<Resource>,
        number: Option<u8>,
    ) -> Result<Board, BoardError> {
        if self.tile_index_at(coord).is_some() {
            return Err(BoardError::PositionOccupied(coord));
        }

        let index = self.tiles.len();
        let neighbors: Vec<usize> = HEX_DIRECTIONS
            .iter()
            .filter_map(|dir| self.tile_index_at(coord.offset(*dir)))
            .collect();

        let mut tiles = self.tiles.clone();
        for n in &neighbors {
            tiles[*n].neighbors.push(index);
        }

        let layout = TileLayout {
            index,
            coord,
            neighbors,
        };
        let mut tile = Tile::from_layout(&layout, &self.geometry);
        tile.resource = resource;
        tile.number = number;
        tiles.push(tile);

        let mut board = Board::from_tiles(tiles, self.geometry);
        board.buildings = self.buildings.clone();
        board.roads = self.roads.clone();
        Ok(board)
    }

    /// A new board with a random commodity and weighted number token at `coord`
    pub fn with_random_tile<R: Rng + ?Sized>(
        &self,
        coord: HexCoord,
        rng: &mut R,
    ) -> Result<Board, BoardError> {
        let (resource, number) = seeding::draw_tile(rng);
        self.with_tile(coord, Some(resource), Some(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_board() -> Board {
        Board::standard_with_rng(&mut StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_standard_board_has_19_tiles() {
        let board = seeded_board();
        assert_eq!(board.tiles().len(), 19);
        assert_eq!(board.vertices().len(), 54);
        assert_eq!(board.edges().len(), 72);
    }

    #[test]
    fn test_standard_board_has_one_desert_with_blocker() {
        let board = seeded_board();
        let deserts: Vec<&Tile> = board.tiles().iter().filter(|t| t.is_desert()).collect();
        assert_eq!(deserts.len(), 1);
        assert!(deserts[0].has_blocker);
        assert_eq!(deserts[0].number, None);
        assert_eq!(board.blocker(), Some(deserts[0].index));
    }

    #[test]
    fn test_tile_corners_are_ordered() {
        let board = seeded_board();
        let tile = &board.tiles()[0];
        assert_eq!(tile.center, Point::new(450.0, 350.0));
        for (i, corner) in tile.corners.iter().enumerate() {
            assert_eq!(corner.index as usize, i);
            assert!((tile.center.distance_to(&corner.position) - 70.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_place_settlement() {
        let mut board = seeded_board();
        let vertex = VertexId::new(0, 0);

        assert_eq!(board.place_settlement(vertex, 1), Ok(()));
        assert_eq!(
            board.building_at(vertex),
            Some(&Building {
                kind: BuildingKind::Settlement,
                owner: 1
            })
        );
        assert_eq!(
            board.place_settlement(vertex, 2),
            Err(BoardError::VertexOccupied(vertex))
        );
    }

    #[test]
    fn test_shared_corner_is_one_vertex() {
        let mut board = seeded_board();
        // Corner 1 of tile 0 is corner 5 of tile 1 and corner 3 of tile 6
        let vertex = board.tile_vertices(1).unwrap()[5];
        assert_eq!(vertex, VertexId::new(0, 1));

        board.place_settlement(VertexId::new(0, 1), 0).unwrap();
        assert!(board.place_settlement(vertex, 1).is_err());
    }

    #[test]
    fn test_place_settlement_unknown_vertex() {
        let mut board = seeded_board();
        // Corner 4 of tile 1 was already named h0v2
        let phantom = VertexId::new(1, 4);
        assert_eq!(
            board.place_settlement(phantom, 0),
            Err(BoardError::UnknownVertex(phantom))
        );
        assert!(board.buildings().is_empty());
    }

    #[test]
    fn test_city_upgrade_rules() {
        let mut board = seeded_board();
        let vertex = VertexId::new(0, 2);

        assert_eq!(
            board.upgrade_to_city(vertex, 0),
            Err(BoardError::NoSettlement(vertex))
        );

        board.place_settlement(vertex, 0).unwrap();
        assert_eq!(board.upgrade_to_city(vertex, 1), Err(BoardError::NotOwner(vertex)));
        assert_eq!(board.upgrade_to_city(vertex, 0), Ok(()));
        assert_eq!(board.building_at(vertex).unwrap().kind, BuildingKind::City);
        assert_eq!(
            board.upgrade_to_city(vertex, 0),
            Err(BoardError::AlreadyCity(vertex))
        );
    }

    #[test]
    fn test_place_road() {
        let mut board = seeded_board();
        let edge = EdgeId::new(VertexId::new(0, 0), VertexId::new(0, 1));

        assert_eq!(board.place_road(edge, 2), Ok(()));
        assert_eq!(board.road_at(edge), Some(2));
        assert_eq!(board.place_road(edge, 3), Err(BoardError::EdgeOccupied(edge)));

        let bogus = EdgeId::new(VertexId::new(0, 0), VertexId::new(0, 3));
        assert_eq!(board.place_road(bogus, 2), Err(BoardError::UnknownEdge(bogus)));
    }

    #[test]
    fn test_move_blocker() {
        let mut board = seeded_board();
        let start = board.blocker().unwrap();
        let target = (start + 1) % 19;

        assert_eq!(board.move_blocker(target), Ok(Some(start)));
        assert!(!board.tiles()[start].has_blocker);
        assert!(board.tiles()[target].has_blocker);
        assert_eq!(board.blocker(), Some(target));
        assert_eq!(board.move_blocker(19), Err(BoardError::UnknownTile(19)));
    }

    #[test]
    fn test_tile_at_pixel() {
        let board = seeded_board();
        let tile = board.tile_at(Point::new(450.0, 350.0)).unwrap();
        assert_eq!(tile.index, 0);
        assert!(board.tile_at(Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_with_tile_keeps_identities_and_buildings() {
        let mut board = seeded_board();
        let vertex = VertexId::new(7, 0);
        board.place_settlement(vertex, 0).unwrap();

        let grown = board
            .with_tile(HexCoord::new(3, -1), Some(Resource::Ore), Some(8))
            .unwrap();

        assert_eq!(grown.tiles().len(), 20);
        let new_tile = &grown.tiles()[19];
        assert_eq!(new_tile.resource, Some(Resource::Ore));
        assert_eq!(new_tile.number, Some(8));
        assert!(grown.tiles()[7].neighbors.contains(&19));
        assert!(new_tile.neighbors.contains(&7));

        for id in board.vertices().keys() {
            assert!(grown.vertex(*id).is_some(), "vertex {} vanished", id);
        }
        for id in board.edges().keys() {
            assert!(grown.edge(*id).is_some(), "edge {} vanished", id);
        }
        assert_eq!(grown.building_at(vertex), board.building_at(vertex));
        assert_eq!(grown.blocker(), board.blocker());
    }

    #[test]
    fn test_with_tile_rejects_occupied_position() {
        let board = seeded_board();
        assert_eq!(
            board.with_tile(HexCoord::new(1, 0), None, None),
            Err(BoardError::PositionOccupied(HexCoord::new(1, 0)))
        );
    }
}
