//! Constant-product markets between two commodities.
//!
//! A pool holds integer reserves of two commodities and prices swaps on the
//! curve `reserve_a * reserve_b = k`. Fees are taken from the input before
//! the curve is applied and stay in the pool, so `k` never decreases.
//! The pool owner trades without a fee; everyone else pays the configured
//! rate.
//!
//! Liquidity is tracked in shares. The owner receives shares equal to the
//! seed liquidity at creation; deposits mint shares in proportion to the
//! contribution; only the owner may withdraw, burning their own shares.
//!
//! Every operation validates fully before touching state, so a rejected
//! call leaves reserves, shares, and the caller's hand unchanged.

use crate::board::{PlayerId, Resource};
use crate::config::{MarketConfig, BPS_SCALE};
use crate::ids::VertexId;
use crate::player::ResourceHand;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors from market operations
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MarketError {
    #[error("A market needs two different commodities")]
    InvalidPair,

    #[error("No market at {0}")]
    UnknownMarket(VertexId),

    #[error("Market is inactive")]
    Inactive,

    #[error("Amount must be positive")]
    ZeroAmount,

    #[error("{0:?} is not traded in this market")]
    ResourceNotInPool(Resource),

    #[error("Need {needed} {resource:?} but only have {available}")]
    InsufficientBalance {
        resource: Resource,
        needed: u32,
        available: u32,
    },

    #[error("Trade too small to produce any output")]
    ZeroOutput,

    #[error("Deposit too small to mint a share")]
    DepositTooSmall,

    #[error("Withdrawal too small to return anything")]
    WithdrawTooSmall,

    #[error("Only the market owner can withdraw liquidity")]
    NotOwner,

    #[error("Requested {requested} shares but only {owned} are held")]
    InsufficientShares { requested: u64, owned: u64 },

    #[error("Withdrawal would empty a reserve")]
    WouldDrainPool,

    #[error("Amount exceeds market capacity")]
    Overflow,
}

/// An unordered pair of distinct commodities, stored in [`Resource::ALL`] order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarketPair {
    first: Resource,
    second: Resource,
}

impl MarketPair {
    /// The pair of two commodities, or `None` if they are the same
    pub fn new(a: Resource, b: Resource) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// All ten possible pairs
    pub fn all() -> Vec<MarketPair> {
        let mut pairs = Vec::with_capacity(10);
        for (i, a) in Resource::ALL.iter().enumerate() {
            for b in &Resource::ALL[i + 1..] {
                pairs.push(Self {
                    first: *a,
                    second: *b,
                });
            }
        }
        pairs
    }

    pub fn first(&self) -> Resource {
        self.first
    }

    pub fn second(&self) -> Resource {
        self.second
    }

    pub fn contains(&self, resource: Resource) -> bool {
        self.first == resource || self.second == resource
    }

    /// The other commodity of the pair
    pub fn counterpart(&self, resource: Resource) -> Option<Resource> {
        if resource == self.first {
            Some(self.second)
        } else if resource == self.second {
            Some(self.first)
        } else {
            None
        }
    }
}

impl fmt::Display for MarketPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Ore/Wheat is traditionally labelled ore first
        let (a, b) = match (self.first, self.second) {
            (Resource::Wheat, Resource::Ore) => (Resource::Ore, Resource::Wheat),
            pair => pair,
        };
        write!(f, "{}-{}", a.short_label(), b.short_label())
    }
}

/// Result of a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapReceipt {
    pub resource_in: Resource,
    pub amount_in: u32,
    pub resource_out: Resource,
    pub amount_out: u32,
    pub fee_bps: u16,
}

/// Result of a deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositReceipt {
    pub shares: u64,
    /// Amounts actually taken; never more than offered
    pub used_first: u32,
    pub used_second: u32,
}

/// Result of a withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawReceipt {
    pub shares: u64,
    pub amount_first: u32,
    pub amount_second: u32,
}

/// Output of the fee-adjusted constant-product curve, rounded down
pub fn swap_output(reserve_in: u32, reserve_out: u32, amount_in: u32, fee_bps: u16) -> u32 {
    let effective = u128::from(amount_in) * u128::from(BPS_SCALE.saturating_sub(fee_bps));
    let numerator = u128::from(reserve_out) * effective;
    let denominator = u128::from(reserve_in) * u128::from(BPS_SCALE) + effective;

    match numerator.checked_div(denominator) {
        // Strictly below reserve_out, so it fits
        Some(out) => u32::try_from(out).unwrap_or(0),
        None => 0,
    }
}

/// A two-commodity constant-product pool anchored at a board vertex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    vertex: VertexId,
    pair: MarketPair,
    reserve_first: u32,
    reserve_second: u32,
    owner: PlayerId,
    active: bool,
    total_shares: u64,
    shares: BTreeMap<PlayerId, u64>,
}

impl Pool {
    /// Open a pool with `seed` units of each commodity, owned by `owner`
    pub fn new(vertex: VertexId, pair: MarketPair, owner: PlayerId, seed: u32) -> Self {
        let mut shares = BTreeMap::new();
        shares.insert(owner, u64::from(seed));

        Self {
            vertex,
            pair,
            reserve_first: seed,
            reserve_second: seed,
            owner,
            active: true,
            total_shares: u64::from(seed),
            shares,
        }
    }

    // ==================== Query Methods ====================

    /// Key derived from the anchoring vertex, e.g. `market-h3v2`
    pub fn key(&self) -> String {
        format!("market-{}", self.vertex)
    }

    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    pub fn pair(&self) -> MarketPair {
        self.pair
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Reserve of one side, or `None` if the commodity is not in the pair
    pub fn reserve(&self, resource: Resource) -> Option<u32> {
        if resource == self.pair.first {
            Some(self.reserve_first)
        } else if resource == self.pair.second {
            Some(self.reserve_second)
        } else {
            None
        }
    }

    /// Reserves in pair order
    pub fn reserves(&self) -> (u32, u32) {
        (self.reserve_first, self.reserve_second)
    }

    /// The constant product, recomputed from the reserves
    pub fn k(&self) -> u64 {
        u64::from(self.reserve_first) * u64::from(self.reserve_second)
    }

    pub fn total_shares(&self) -> u64 {
        self.total_shares
    }

    pub fn shares_of(&self, player: PlayerId) -> u64 {
        self.shares.get(&player).copied().unwrap_or(0)
    }

    /// Fee a trader pays: nothing for the owner, the configured rate otherwise
    pub fn fee_bps_for(&self, trader: PlayerId, config: &MarketConfig) -> u16 {
        if trader == self.owner {
            0
        } else {
            config.fee_bps
        }
    }

    /// Price a swap without executing it
    pub fn quote(&self, resource_in: Resource, amount_in: u32, fee_bps: u16) -> Result<u32, MarketError> {
        if !self.active {
            return Err(MarketError::Inactive);
        }
        if amount_in == 0 {
            return Err(MarketError::ZeroAmount);
        }
        let (reserve_in, reserve_out) = self.oriented(resource_in)?;
        Ok(swap_output(reserve_in, reserve_out, amount_in, fee_bps))
    }

    // ==================== Mutations ====================

    /// Trade `amount_in` of `resource_in` from `hand` for the other commodity
    pub fn swap(
        &mut self,
        trader: PlayerId,
        hand: &mut ResourceHand,
        resource_in: Resource,
        amount_in: u32,
        config: &MarketConfig,
    ) -> Result<SwapReceipt, MarketError> {
        let fee_bps = self.fee_bps_for(trader, config);
        let amount_out = self.quote(resource_in, amount_in, fee_bps)?;
        let resource_out = self
            .pair
            .counterpart(resource_in)
            .ok_or(MarketError::ResourceNotInPool(resource_in))?;

        let available = hand.get(resource_in);
        if available < amount_in {
            return Err(MarketError::InsufficientBalance {
                resource: resource_in,
                needed: amount_in,
                available,
            });
        }
        if amount_out == 0 {
            return Err(MarketError::ZeroOutput);
        }

        let (reserve_in, reserve_out) = self.oriented(resource_in)?;
        let new_in = reserve_in
            .checked_add(amount_in)
            .ok_or(MarketError::Overflow)?;
        let new_out = reserve_out - amount_out;

        self.set_reserve(resource_in, new_in);
        self.set_reserve(resource_out, new_out);
        let paid = hand.try_remove(resource_in, amount_in);
        debug_assert!(paid);
        hand.add(resource_out, amount_out);

        Ok(SwapReceipt {
            resource_in,
            amount_in,
            resource_out,
            amount_out,
            fee_bps,
        })
    }

    /// Add liquidity in the current reserve ratio.
    ///
    /// Mints `min(a·T/Ra, b·T/Rb)` shares and takes `ceil(shares·R/T)` of
    /// each side, which never exceeds the amounts offered.
    pub fn deposit(
        &mut self,
        provider: PlayerId,
        hand: &mut ResourceHand,
        amount_first: u32,
        amount_second: u32,
    ) -> Result<DepositReceipt, MarketError> {
        if !self.active {
            return Err(MarketError::Inactive);
        }
        if amount_first == 0 || amount_second == 0 {
            return Err(MarketError::ZeroAmount);
        }
        for (resource, needed) in [
            (self.pair.first, amount_first),
            (self.pair.second, amount_second),
        ] {
            let available = hand.get(resource);
            if available < needed {
                return Err(MarketError::InsufficientBalance {
                    resource,
                    needed,
                    available,
                });
            }
        }

        let total = u128::from(self.total_shares);
        let reserve_first = u128::from(self.reserve_first);
        let reserve_second = u128::from(self.reserve_second);

        let minted = (u128::from(amount_first) * total)
            .checked_div(reserve_first)
            .zip((u128::from(amount_second) * total).checked_div(reserve_second))
            .map(|(a, b)| a.min(b))
            .unwrap_or(0);
        if minted == 0 {
            return Err(MarketError::DepositTooSmall);
        }

        let used_first = (minted * reserve_first).div_ceil(total);
        let used_second = (minted * reserve_second).div_ceil(total);

        let used_first = u32::try_from(used_first).map_err(|_| MarketError::Overflow)?;
        let used_second = u32::try_from(used_second).map_err(|_| MarketError::Overflow)?;
        let minted = u64::try_from(minted).map_err(|_| MarketError::Overflow)?;
        let new_first = self
            .reserve_first
            .checked_add(used_first)
            .ok_or(MarketError::Overflow)?;
        let new_second = self
            .reserve_second
            .checked_add(used_second)
            .ok_or(MarketError::Overflow)?;
        let new_total = self
            .total_shares
            .checked_add(minted)
            .ok_or(MarketError::Overflow)?;

        self.reserve_first = new_first;
        self.reserve_second = new_second;
        self.total_shares = new_total;
        *self.shares.entry(provider).or_insert(0) += minted;
        let paid_first = hand.try_remove(self.pair.first, used_first);
        let paid_second = hand.try_remove(self.pair.second, used_second);
        debug_assert!(paid_first && paid_second);

        Ok(DepositReceipt {
            shares: minted,
            used_first,
            used_second,
        })
    }

    /// Burn the owner's shares for a proportional slice of both reserves.
    ///
    /// Works on inactive pools too, so an owner can recover liquidity from a
    /// market that no longer qualifies.
    pub fn withdraw(
        &mut self,
        caller: PlayerId,
        hand: &mut ResourceHand,
        shares: u64,
    ) -> Result<WithdrawReceipt, MarketError> {
        if caller != self.owner {
            return Err(MarketError::NotOwner);
        }
        if shares == 0 {
            return Err(MarketError::ZeroAmount);
        }
        let owned = self.shares_of(caller);
        if shares > owned {
            return Err(MarketError::InsufficientShares {
                requested: shares,
                owned,
            });
        }

        let total = u128::from(self.total_shares);
        let amount_first = (u128::from(shares) * u128::from(self.reserve_first)) / total;
        let amount_second = (u128::from(shares) * u128::from(self.reserve_second)) / total;

        if amount_first >= u128::from(self.reserve_first)
            || amount_second >= u128::from(self.reserve_second)
        {
            return Err(MarketError::WouldDrainPool);
        }
        if amount_first == 0 && amount_second == 0 {
            return Err(MarketError::WithdrawTooSmall);
        }

        // Both are below a u32 reserve
        let amount_first = amount_first as u32;
        let amount_second = amount_second as u32;

        self.reserve_first -= amount_first;
        self.reserve_second -= amount_second;
        self.total_shares -= shares;
        if let Some(held) = self.shares.get_mut(&caller) {
            *held -= shares;
        }
        hand.add(self.pair.first, amount_first);
        hand.add(self.pair.second, amount_second);

        Ok(WithdrawReceipt {
            shares,
            amount_first,
            amount_second,
        })
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// (reserve_in, reserve_out) for a trade paying `resource_in`
    fn oriented(&self, resource_in: Resource) -> Result<(u32, u32), MarketError> {
        if resource_in == self.pair.first {
            Ok((self.reserve_first, self.reserve_second))
        } else if resource_in == self.pair.second {
            Ok((self.reserve_second, self.reserve_first))
        } else {
            Err(MarketError::ResourceNotInPool(resource_in))
        }
    }

    fn set_reserve(&mut self, resource: Resource, value: u32) {
        if resource == self.pair.first {
            self.reserve_first = value;
        } else {
            self.reserve_second = value;
        }
    }
}

/// Create a pool for two commodities, rejecting identical ones
pub fn create_market(
    vertex: VertexId,
    a: Resource,
    b: Resource,
    owner: PlayerId,
    config: &MarketConfig,
) -> Result<Pool, MarketError> {
    let pair = MarketPair::new(a, b).ok_or(MarketError::InvalidPair)?;
    Ok(Pool::new(vertex, pair, owner, config.seed_liquidity))
}
