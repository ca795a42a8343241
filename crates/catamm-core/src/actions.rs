//! Session actions and the events they produce.
//!
//! Actions are what a player asks for; events are what actually happened,
//! in order. One action can produce several events (building on a port
//! opens a market and may discover a tile that switches another market off).

use crate::board::{PlayerId, Resource};
use crate::hex::HexCoord;
use crate::ids::{EdgeId, VertexId};
use crate::market::{MarketPair, SwapReceipt};
use serde::{Deserialize, Serialize};

/// All actions a player can take in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    // ==================== Building ====================
    /// Build a settlement on an empty vertex
    BuildSettlement(VertexId),
    /// Upgrade your own settlement to a city
    BuildCity(VertexId),
    /// Build a road on an empty edge
    BuildRoad(EdgeId),
    /// Move the blocker to a tile
    MoveBlocker(usize),

    // ==================== Markets ====================
    /// Trade into the market anchored at `market`
    Swap {
        market: VertexId,
        resource_in: Resource,
        amount_in: u32,
    },
    /// Add liquidity; amounts follow the market pair's order
    Deposit {
        market: VertexId,
        amount_first: u32,
        amount_second: u32,
    },
    /// Burn owner shares for a slice of both reserves
    Withdraw { market: VertexId, shares: u64 },
}

/// Events that result from actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SettlementBuilt {
        player: PlayerId,
        vertex: VertexId,
    },
    CityBuilt {
        player: PlayerId,
        vertex: VertexId,
    },
    RoadBuilt {
        player: PlayerId,
        edge: EdgeId,
    },
    BlockerMoved {
        from: Option<usize>,
        to: usize,
    },
    /// A building opened a new market
    MarketOpened {
        owner: PlayerId,
        market: VertexId,
        pair: MarketPair,
        seed_liquidity: u32,
    },
    /// The board grew next to a building
    TileDiscovered {
        index: usize,
        coord: HexCoord,
        resource: Option<Resource>,
        number: Option<u8>,
    },
    /// A market's vertex stopped qualifying
    MarketDeactivated { market: VertexId },
    Swapped {
        player: PlayerId,
        market: VertexId,
        receipt: SwapReceipt,
    },
    LiquidityDeposited {
        player: PlayerId,
        market: VertexId,
        shares: u64,
        amount_first: u32,
        amount_second: u32,
    },
    LiquidityWithdrawn {
        player: PlayerId,
        market: VertexId,
        shares: u64,
        amount_first: u32,
        amount_second: u32,
    },
}
