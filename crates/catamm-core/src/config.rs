//! Board and market configuration.
//!
//! Every field has a default, so a partial JSON document (or `{}`) is a
//! valid configuration. Call [`Config::validate`] (or use
//! [`Config::from_json`]) before handing a config to a session.

use crate::hex::{Geometry, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest ring count accepted (10 981 tiles)
pub const MAX_RINGS: u32 = 60;

/// Fee charged to non-owners, in basis points (10%)
pub const DEFAULT_FEE_BPS: u16 = 1_000;

/// Basis points in one whole
pub const BPS_SCALE: u16 = 10_000;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("hex radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("ring count {0} exceeds the maximum of 60")]
    TooManyRings(u32),

    #[error("fee of {0} bps is not below 10000")]
    FeeOutOfRange(u16),

    #[error("seed liquidity must be at least 1")]
    ZeroSeedLiquidity,

    #[error("invalid config JSON: {0}")]
    Parse(String),
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board: BoardConfig,
    pub market: MarketConfig,
    /// Building on a perimeter vertex discovers a new tile next to it
    pub organic_growth: bool,
}

/// Board shape and pixel geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rings: u32,
    pub hex_radius: f64,
    /// Pixel center of tile (0, 0)
    pub center: Point,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let geometry = Geometry::default();
        Self {
            rings: 2,
            hex_radius: geometry.hex_radius,
            center: geometry.center,
        }
    }
}

impl BoardConfig {
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.hex_radius, self.center)
    }
}

/// Pool parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Units of each commodity a new pool starts with
    pub seed_liquidity: u32,
    /// Fee for non-owner swaps in basis points
    pub fee_bps: u16,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            seed_liquidity: 10,
            fee_bps: DEFAULT_FEE_BPS,
        }
    }
}

impl Config {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.board.hex_radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(radius));
        }
        if self.board.rings > MAX_RINGS {
            return Err(ConfigError::TooManyRings(self.board.rings));
        }
        if self.market.fee_bps >= BPS_SCALE {
            return Err(ConfigError::FeeOutOfRange(self.market.fee_bps));
        }
        if self.market.seed_liquidity == 0 {
            return Err(ConfigError::ZeroSeedLiquidity);
        }
        Ok(())
    }
}
