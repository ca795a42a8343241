//! Markets anchored at portable vertices.
//!
//! A portable vertex whose two tiles produce different commodities can host
//! a market for that pair. The registry opens at most one pool per vertex,
//! when the first building goes up there, and deactivates pools whose
//! vertex stops qualifying after the board grows.

use crate::board::{Board, PlayerId, Resource};
use crate::config::MarketConfig;
use crate::ids::VertexId;
use crate::market::{MarketError, MarketPair, Pool};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The market a portable vertex can host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMarket {
    pub pair: MarketPair,
    /// Commodities of the two touching tiles, in tile order
    pub resources: [Resource; 2],
}

/// The market a vertex qualifies for, if any.
///
/// Requires a portable vertex whose two tiles both produce something and
/// produce different things.
pub fn market_for_portable_vertex(board: &Board, vertex: VertexId) -> Option<PortMarket> {
    if !board.is_portable(vertex) {
        return None;
    }

    match board.resources_at(vertex).as_slice() {
        [Some(a), Some(b)] => MarketPair::new(*a, *b).map(|pair| PortMarket {
            pair,
            resources: [*a, *b],
        }),
        _ => None,
    }
}

/// All pools on a board, keyed by anchoring vertex
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRegistry {
    pools: BTreeMap<VertexId, Pool>,
}

impl PortRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn get(&self, vertex: VertexId) -> Option<&Pool> {
        self.pools.get(&vertex)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    /// Mutable access for trading; missing markets are an error
    pub fn pool_mut(&mut self, vertex: VertexId) -> Result<&mut Pool, MarketError> {
        self.pools
            .get_mut(&vertex)
            .ok_or(MarketError::UnknownMarket(vertex))
    }

    /// Open a market for a building placed at `vertex`.
    ///
    /// Returns the new pool, or `None` when the vertex does not qualify or
    /// already has a market.
    pub fn open_for_building(
        &mut self,
        board: &Board,
        vertex: VertexId,
        owner: PlayerId,
        config: &MarketConfig,
    ) -> Option<&Pool> {
        if self.pools.contains_key(&vertex) {
            return None;
        }
        let market = market_for_portable_vertex(board, vertex)?;
        let pool = Pool::new(vertex, market.pair, owner, config.seed_liquidity);
        Some(self.pools.entry(vertex).or_insert(pool))
    }

    /// Deactivate pools whose vertex no longer hosts the same pair.
    ///
    /// Returns the vertices of pools that were switched off by this call.
    pub fn revalidate(&mut self, board: &Board) -> Vec<VertexId> {
        let mut deactivated = Vec::new();
        for (vertex, pool) in self.pools.iter_mut() {
            let still_valid = market_for_portable_vertex(board, *vertex)
                .is_some_and(|m| m.pair == pool.pair());
            if pool.is_active() && !still_valid {
                pool.set_active(false);
                deactivated.push(*vertex);
            }
        }
        deactivated
    }
}
