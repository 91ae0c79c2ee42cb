use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use super::agent::Agent;
use crate::game::GameState;

/// Picks uniformly among the playable columns. The "easy" opponent.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    /// Seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        RandomAgent { rng }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        state.board().playable_columns().choose(&mut self.rng)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
