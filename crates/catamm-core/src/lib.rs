//! CATAMM - hex-board topology and constant-product resource markets
//!
//! This crate provides the core of a Catan-style economy where commodities
//! trade through automated markets anchored on the board:
//! - Hex coordinates, tile layouts and pixel geometry
//! - A deduplicated vertex/edge graph shared across neighboring tiles
//! - Perimeter and port detection, and organic board growth
//! - Commodity and number-token seeding
//! - Constant-product pools with owner-free, fee-for-others trading
//!
//! # Architecture
//!
//! The core is synchronous and owns no global state. A [`GameSession`]
//! holds one board, its markets and its players; all mutation goes through
//! it (or directly through [`Board`] and [`Pool`]). It compiles to native
//! Rust and, with the `wasm` feature, to WebAssembly for a browser UI.
//!
//! # Modules
//!
//! - [`hex`]: Axial coordinates, geometry, exact corner identities
//! - [`layout`]: Ring layouts and the classic 19-tile table
//! - [`topology`]: Vertex and edge deduplication
//! - [`board`]: Tiles, graph, buildings and growth
//! - [`queries`]: Perimeter, port and expansion queries
//! - [`seeding`]: Commodity and number assignment
//! - [`market`]: Pool math and liquidity shares
//! - [`ports`]: Market eligibility and the per-board registry
//! - [`session`]: Action dispatch over a whole session

pub mod actions;
pub mod board;
pub mod config;
pub mod hex;
pub mod ids;
pub mod layout;
pub mod market;
pub mod player;
pub mod ports;
pub mod queries;
pub mod seeding;
pub mod session;
pub mod topology;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use board::{
    Board, BoardError, Building, BuildingKind, GlobalEdge, GlobalVertex, PlayerId, Resource, Tile,
};
pub use config::{BoardConfig, Config, ConfigError, MarketConfig};
pub use hex::{CornerKey, Geometry, HexCoord, Point};
pub use ids::{EdgeId, IdParseError, VertexId};
pub use layout::{generate_layout, layout_for_rings, standard_layout, TileLayout};
pub use market::{create_market, MarketError, MarketPair, Pool, SwapReceipt};
pub use player::{Player, ResourceHand};
pub use ports::{market_for_portable_vertex, PortMarket, PortRegistry};
pub use seeding::assign_resources_and_numbers;
pub use session::{GameError, GameSession};
pub use topology::build_board;
