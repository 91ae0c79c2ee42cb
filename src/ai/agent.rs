use crate::config::OpponentKind;
use crate::game::GameState;

use super::{MinimaxAgent, RandomAgent, SearchConfig};

/// Common interface for computer players.
pub trait Agent {
    /// Select a column for `state.current_player()`.
    /// Returns `None` when the game is over and no move exists.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Build the computer opponent for `kind`; `None` for a human opponent.
pub fn build_opponent(
    kind: OpponentKind,
    search: &SearchConfig,
    seed: Option<u64>,
) -> Option<Box<dyn Agent>> {
    match kind {
        OpponentKind::Minimax => Some(Box::new(MinimaxAgent::new(search.clone()))),
        OpponentKind::Random => Some(Box::new(match seed {
            Some(seed) => RandomAgent::with_seed(seed),
            None => RandomAgent::new(),
        })),
        OpponentKind::Human => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_requested_opponent() {
        let search = SearchConfig::default();
        let minimax = build_opponent(OpponentKind::Minimax, &search, None).unwrap();
        assert_eq!(minimax.name(), "Minimax");
        let random = build_opponent(OpponentKind::Random, &search, Some(1)).unwrap();
        assert_eq!(random.name(), "Random");
        assert!(build_opponent(OpponentKind::Human, &search, None).is_none());
    }
}
