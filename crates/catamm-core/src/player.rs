//! Player state and commodity balances.
//!
//! This module contains:
//! - ResourceHand for managing commodity counts
//! - Player, which owns a hand and a display name

use crate::board::{PlayerId, Resource};
use serde::{Deserialize, Serialize};

/// A hand of commodities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHand {
    pub wood: u32,
    pub brick: u32,
    pub sheep: u32,
    pub wheat: u32,
    pub ore: u32,
}

impl ResourceHand {
    /// Create an empty hand
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand with specific amounts
    pub fn with_amounts(wood: u32, brick: u32, sheep: u32, wheat: u32, ore: u32) -> Self {
        Self {
            wood,
            brick,
            sheep,
            wheat,
            ore,
        }
    }

    /// Create a hand with a single commodity
    pub fn single(resource: Resource, amount: u32) -> Self {
        let mut hand = Self::new();
        hand.set(resource, amount);
        hand
    }

    /// Total number of commodity cards
    pub fn total(&self) -> u32 {
        Resource::ALL.iter().map(|r| self.get(*r)).sum()
    }

    /// Check if hand is empty
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Get count of a specific commodity
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Brick => self.brick,
            Resource::Sheep => self.sheep,
            Resource::Wheat => self.wheat,
            Resource::Ore => self.ore,
        }
    }

    fn slot(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Wood => &mut self.wood,
            Resource::Brick => &mut self.brick,
            Resource::Sheep => &mut self.sheep,
            Resource::Wheat => &mut self.wheat,
            Resource::Ore => &mut self.ore,
        }
    }

    /// Set count of a specific commodity
    pub fn set(&mut self, resource: Resource, count: u32) {
        *self.slot(resource) = count;
    }

    /// Add commodities, saturating at `u32::MAX`
    pub fn add(&mut self, resource: Resource, amount: u32) {
        let slot = self.slot(resource);
        *slot = slot.saturating_add(amount);
    }

    /// Whether the hand holds at least `amount` of `resource`
    pub fn has(&self, resource: Resource, amount: u32) -> bool {
        self.get(resource) >= amount
    }

    /// Remove commodities, returning false (and changing nothing) if insufficient
    pub fn try_remove(&mut self, resource: Resource, amount: u32) -> bool {
        let slot = self.slot(resource);
        match slot.checked_sub(amount) {
            Some(rest) => {
                *slot = rest;
                true
            }
            None => false,
        }
    }
}

/// A single player's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Current commodities
    pub resources: ResourceHand,
}

impl Player {
    /// Create a new player with an empty hand
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            resources: ResourceHand::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_hand_total() {
        let hand = ResourceHand::with_amounts(1, 2, 3, 4, 5);
        assert_eq!(hand.total(), 15);
        assert!(ResourceHand::new().is_empty());
    }

    #[test]
    fn test_resource_hand_get_matches_fields() {
        let hand = ResourceHand::with_amounts(1, 2, 3, 4, 5);
        assert_eq!(hand.get(Resource::Wood), 1);
        assert_eq!(hand.get(Resource::Brick), 2);
        assert_eq!(hand.get(Resource::Sheep), 3);
        assert_eq!(hand.get(Resource::Wheat), 4);
        assert_eq!(hand.get(Resource::Ore), 5);
    }

    #[test]
    fn test_resource_hand_try_remove() {
        let mut hand = ResourceHand::single(Resource::Ore, 3);
        assert!(hand.try_remove(Resource::Ore, 2));
        assert_eq!(hand.ore, 1);

        assert!(!hand.try_remove(Resource::Ore, 2));
        assert_eq!(hand.ore, 1, "failed removal leaves the hand untouched");
    }

    #[test]
    fn test_resource_hand_add_saturates() {
        let mut hand = ResourceHand::single(Resource::Wood, u32::MAX - 1);
        hand.add(Resource::Wood, 5);
        assert_eq!(hand.wood, u32::MAX);
    }

    #[test]
    fn test_new_player_has_empty_hand() {
        let player = Player::new(2, "Test".to_string());
        assert_eq!(player.id, 2);
        assert!(player.resources.is_empty());
        assert!(!player.resources.has(Resource::Sheep, 1));
    }
}
