//! Computer players: the window-counting heuristic, the minimax search
//! engine built on it, and the agents that drivers talk to.

mod agent;
pub mod heuristic;
pub mod minimax;
mod random;

pub use agent::{build_opponent, Agent};
pub use heuristic::{Heuristic, HeuristicWeights, Score};
pub use minimax::{
    LeafPerspective, MinimaxAgent, SearchConfig, SearchEngine, SearchOutcome, SearchResult,
    SearchStats,
};
pub use random::RandomAgent;
