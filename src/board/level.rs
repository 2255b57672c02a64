//! Level data: where the barriers stand and where the food lies
//!
//! A level is plain data; [`crate::board::Board::initialize_level`] turns it
//! into grid truth. The classic layout is the fixed one the game shipped
//! with, the random one scatters the same amount of food over free cells.

use crate::board::FoodTier;
use crate::types::Position;
use itertools::Itertools;
use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Barrier segments and food placements for one level
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Level {
    /// interior barrier cells
    pub barriers: Vec<Position>,
    /// food cells with their reward tier
    pub food: Vec<(Position, FoodTier)>,
}

/// one food tier per classic item, two small, four medium, four large
const CLASSIC_TIERS: [FoodTier; 10] = [
    FoodTier::Small,
    FoodTier::Small,
    FoodTier::Medium,
    FoodTier::Medium,
    FoodTier::Medium,
    FoodTier::Medium,
    FoodTier::Large,
    FoodTier::Large,
    FoodTier::Large,
    FoodTier::Large,
];

impl Level {
    /// The classic fixed layout: one barrier segment in the left third of
    /// the board, one in the right third, and ten food items.
    /// Positions that do not fit the given bounds are dropped at placement
    /// time, so the same level works on any board that passes validation.
    pub fn classic(last_row: i32, last_col: i32) -> Level {
        let mut barriers = Vec::new();
        let left_third = last_col / 3;
        for y in 12..=20.min(last_row) {
            barriers.push(Position::new(y, left_third));
        }
        let right_third = last_col / 3 * 2;
        for y in 7..=17.min(last_row) {
            barriers.push(Position::new(y, right_third));
        }

        let spots = [
            Position::new(3, 3),
            Position::new(5, 15),
            Position::new(17, 5),
            Position::new(3, 6),
            Position::new(4, 37),
            Position::new(10, 50),
            Position::new(29, 20),
            Position::new(21, 56),
            Position::new(5, 7),
            Position::new(6, 57),
        ];
        let food = spots.iter().copied().zip(CLASSIC_TIERS.iter().copied()).collect();

        Level { barriers, food }
    }

    /// The classic barriers with the food scattered over free cells instead.
    /// The rightmost column is left alone, the boundary barrier goes there.
    pub fn random<R: Rng>(rng: &mut R, last_row: i32, last_col: i32) -> Level {
        let barriers = Level::classic(last_row, last_col).barriers;
        let spots = (0..=last_row)
            .cartesian_product(0..last_col)
            .map(|(y, x)| Position::new(y, x))
            .filter(|pos| !barriers.contains(pos))
            .choose_multiple(rng, CLASSIC_TIERS.len());
        let food = spots
            .into_iter()
            .zip(CLASSIC_TIERS.iter().copied())
            .collect();

        Level { barriers, food }
    }
}
