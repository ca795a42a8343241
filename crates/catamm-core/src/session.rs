//! A board, its markets and its players, driven by actions.
//!
//! `GameSession` is the single owner of all mutable state. Every action
//! either succeeds and returns the events it caused, or fails with a
//! [`GameError`] and leaves the session as it was. There is no turn order,
//! dice or card logic here; callers decide who may act when.

use crate::actions::{GameAction, GameEvent};
use crate::board::{Board, BoardError, PlayerId, Resource};
use crate::config::{Config, ConfigError};
use crate::ids::VertexId;
use crate::market::MarketError;
use crate::player::Player;
use crate::ports::PortRegistry;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most players a session accepts
pub const MAX_PLAYERS: usize = 8;

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("A session needs 1 to 8 players, got {0}")]
    InvalidPlayerCount(usize),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Market(#[from] MarketError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    ports: PortRegistry,
    players: Vec<Player>,
    config: Config,
}

impl GameSession {
    /// Create a session on a freshly generated board
    pub fn new(config: Config, player_names: Vec<String>) -> Result<Self, GameError> {
        Self::new_with_rng(config, player_names, &mut rand::thread_rng())
    }

    /// Create a session with a specific RNG (for deterministic testing)
    pub fn new_with_rng<R: Rng + ?Sized>(
        config: Config,
        player_names: Vec<String>,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let board = Board::generate_with_rng(&config.board, rng);
        Self::with_board(config, board, player_names)
    }

    /// Create a session on an existing board
    pub fn with_board(
        config: Config,
        board: Board,
        player_names: Vec<String>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if player_names.is_empty() || player_names.len() > MAX_PLAYERS {
            return Err(GameError::InvalidPlayerCount(player_names.len()));
        }

        let players = player_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Player::new(i as PlayerId, name))
            .collect();

        Ok(Self {
            board,
            ports: PortRegistry::new(),
            players,
            config,
        })
    }

    // ==================== Query Methods ====================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ports(&self) -> &PortRegistry {
        &self.ports
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get a player by ID
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(usize::from(id))
    }

    /// Price a swap for a player without executing it
    pub fn quote(
        &self,
        player: PlayerId,
        market: VertexId,
        resource_in: Resource,
        amount_in: u32,
    ) -> Result<u32, GameError> {
        self.player(player).ok_or(GameError::UnknownPlayer(player))?;
        let pool = self
            .ports
            .get(market)
            .ok_or(MarketError::UnknownMarket(market))?;
        let fee = pool.fee_bps_for(player, &self.config.market);
        Ok(pool.quote(resource_in, amount_in, fee)?)
    }

    // ==================== Mutations ====================

    /// Credit commodities to a player, e.g. from production decided elsewhere
    pub fn grant(
        &mut self,
        player: PlayerId,
        resource: Resource,
        amount: u32,
    ) -> Result<(), GameError> {
        self.player_mut(player)?.resources.add(resource, amount);
        Ok(())
    }

    /// Apply an action using the thread RNG for tile discovery
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: GameAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action_with_rng(player, action, &mut rand::thread_rng())
    }

    /// Apply an action, returning the events it produced in order
    pub fn apply_action_with_rng<R: Rng + ?Sized>(
        &mut self,
        player: PlayerId,
        action: GameAction,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.player_mut(player)?;
        let mut events = Vec::new();

        match action {
            GameAction::BuildSettlement(vertex) => {
                self.board.place_settlement(vertex, player)?;
                events.push(GameEvent::SettlementBuilt { player, vertex });
                self.after_building(player, vertex, rng, &mut events)?;
            }

            GameAction::BuildCity(vertex) => {
                self.board.upgrade_to_city(vertex, player)?;
                events.push(GameEvent::CityBuilt { player, vertex });
                self.after_building(player, vertex, rng, &mut events)?;
            }

            GameAction::BuildRoad(edge) => {
                self.board.place_road(edge, player)?;
                events.push(GameEvent::RoadBuilt { player, edge });
            }

            GameAction::MoveBlocker(tile) => {
                let from = self.board.move_blocker(tile)?;
                events.push(GameEvent::BlockerMoved { from, to: tile });
            }

            GameAction::Swap {
                market,
                resource_in,
                amount_in,
            } => {
                let hand = &mut self.players[usize::from(player)].resources;
                let pool = self.ports.pool_mut(market)?;
                let receipt = pool.swap(player, hand, resource_in, amount_in, &self.config.market)?;
                events.push(GameEvent::Swapped {
                    player,
                    market,
                    receipt,
                });
            }

            GameAction::Deposit {
                market,
                amount_first,
                amount_second,
            } => {
                let hand = &mut self.players[usize::from(player)].resources;
                let pool = self.ports.pool_mut(market)?;
                let receipt = pool.deposit(player, hand, amount_first, amount_second)?;
                events.push(GameEvent::LiquidityDeposited {
                    player,
                    market,
                    shares: receipt.shares,
                    amount_first: receipt.used_first,
                    amount_second: receipt.used_second,
                });
            }

            GameAction::Withdraw { market, shares } => {
                let hand = &mut self.players[usize::from(player)].resources;
                let pool = self.ports.pool_mut(market)?;
                let receipt = pool.withdraw(player, hand, shares)?;
                events.push(GameEvent::LiquidityWithdrawn {
                    player,
                    market,
                    shares: receipt.shares,
                    amount_first: receipt.amount_first,
                    amount_second: receipt.amount_second,
                });
            }
        }

        Ok(events)
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.players
            .get_mut(usize::from(id))
            .ok_or(GameError::UnknownPlayer(id))
    }

    /// Open a market at a fresh building and, with organic growth, discover a tile
    fn after_building<R: Rng + ?Sized>(
        &mut self,
        player: PlayerId,
        vertex: VertexId,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        if let Some(pool) =
            self.ports
                .open_for_building(&self.board, vertex, player, &self.config.market)
        {
            events.push(GameEvent::MarketOpened {
                owner: player,
                market: vertex,
                pair: pool.pair(),
                seed_liquidity: self.config.market.seed_liquidity,
            });
        }

        if self.config.organic_growth && self.board.is_perimeter_vertex(vertex) {
            self.discover_tile(vertex, rng, events)?;
        }
        Ok(())
    }

    fn discover_tile<R: Rng + ?Sized>(
        &mut self,
        vertex: VertexId,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        let positions = self.board.valid_expansion_positions(vertex);
        let Some(coord) = positions.choose(rng).copied() else {
            return Ok(());
        };

        self.board = self.board.with_random_tile(coord, rng)?;
        let index = self.board.tiles().len() - 1;
        let tile = &self.board.tiles()[index];
        events.push(GameEvent::TileDiscovered {
            index,
            coord,
            resource: tile.resource,
            number: tile.number,
        });

        for market in self.ports.revalidate(&self.board) {
            events.push(GameEvent::MarketDeactivated { market });
        }
        Ok(())
    }
}
