use alloc::vec::Vec;
use rand::prelude::*;
use rand::seq::index;

use super::LayoutGenerator;
use crate::{Coord, Coord2, GameConfig};

/// Uniform sampler over all board positions, seeded for reproducibility.
#[derive(Clone, Debug)]
pub struct RandomLayoutGenerator {
    rng: SmallRng,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn place_mines(&mut self, config: GameConfig) -> Vec<Coord2> {
        let cols = usize::from(config.cols());
        let total = usize::from(config.total_cells());

        let amount = usize::from(config.mines());
        let amount = if amount > total {
            log::warn!("requested {amount} mines but the board only has {total} cells");
            total
        } else {
            amount
        };

        index::sample(&mut self.rng, total, amount)
            .into_iter()
            .map(|pos| ((pos % cols) as Coord, (pos / cols) as Coord))
            .collect()
    }
}
