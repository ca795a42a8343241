//! Commodity and number-token assignment.
//!
//! Commodities are spread evenly: each of the five types gets floor(n/5)
//! tiles, the first n mod 5 types in [`Resource::ALL`] order get one more,
//! and one desert is added. The pool is shuffled onto the tiles. Number
//! tokens are drawn independently with replacement, weighted toward the
//! middle of the 2d6 curve.

use crate::board::{Resource, Tile};
use rand::seq::SliceRandom;
use rand::Rng;

/// Relative weight of each number token
pub const NUMBER_WEIGHTS: [(u8, u32); 10] = [
    (2, 1),
    (3, 2),
    (4, 3),
    (5, 4),
    (6, 5),
    (8, 5),
    (9, 4),
    (10, 3),
    (11, 2),
    (12, 1),
];

/// [`NUMBER_WEIGHTS`] expanded into a uniform pool
const TOKEN_POOL: [u8; 30] = [
    2, 3, 3, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 6, 8, 8, 8, 8, 8, 9, 9, 9, 9, 10, 10, 10, 11, 11, 12,
];

/// Commodity pool for `tiles` tiles: n-1 commodities plus one desert (`None`).
///
/// Returned unshuffled, commodities first.
pub fn resource_distribution(tiles: usize) -> Vec<Option<Resource>> {
    if tiles == 0 {
        return Vec::new();
    }

    let productive = tiles - 1;
    let base = productive / Resource::ALL.len();
    let extra = productive % Resource::ALL.len();

    let mut pool = Vec::with_capacity(tiles);
    for (i, resource) in Resource::ALL.iter().enumerate() {
        let count = base + usize::from(i < extra);
        pool.extend(std::iter::repeat(Some(*resource)).take(count));
    }
    pool.push(None);
    pool
}

/// Draw one weighted number token
pub fn draw_number_token<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    TOKEN_POOL[rng.gen_range(0..TOKEN_POOL.len())]
}

/// Uniform commodity and weighted number token for a newly discovered tile
pub fn draw_tile<R: Rng + ?Sized>(rng: &mut R) -> (Resource, u8) {
    let resource = Resource::ALL[rng.gen_range(0..Resource::ALL.len())];
    (resource, draw_number_token(rng))
}

/// Assign commodities, numbers and the blocker to every tile.
///
/// Exactly one tile becomes the desert; it gets the blocker and no number.
/// Every other tile gets a commodity and a token. Empty input is a no-op.
pub fn assign_resources_and_numbers<R: Rng + ?Sized>(tiles: &mut [Tile], rng: &mut R) {
    let mut pool = resource_distribution(tiles.len());
    pool.shuffle(rng);

    for (tile, resource) in tiles.iter_mut().zip(pool) {
        tile.resource = resource;
        tile.has_blocker = resource.is_none();
        tile.number = match resource {
            Some(_) => Some(draw_number_token(rng)),
            None => None,
        };
    }
}
