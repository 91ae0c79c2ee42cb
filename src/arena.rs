//! Agent-versus-agent matches, used by the `arena` binary.

use tracing::{debug, info};

use crate::ai::Agent;
use crate::game::{Board, GameOutcome, GameState, Piece};

/// Result of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub winner: Option<Piece>,
    pub length: usize,
}

/// Play one game to completion on a fresh copy of `board`. Red moves first.
///
/// An agent that returns no move ends the game early; the record then has
/// no winner.
pub fn play_game(red: &mut dyn Agent, yellow: &mut dyn Agent, board: &Board) -> GameRecord {
    let mut state = GameState::new(board.cleared(), Piece::Red);

    while !state.is_terminal() {
        let player = state.current_player();
        let agent: &mut dyn Agent = match player {
            Piece::Red => &mut *red,
            Piece::Yellow => &mut *yellow,
        };
        let Some(column) = agent.select_action(&state) else {
            break;
        };
        if let Err(err) = state.apply_move_mut(column) {
            debug!(agent = agent.name(), column, %err, "illegal move ends game");
            break;
        }
    }

    let winner = match state.outcome() {
        Some(GameOutcome::Winner(piece)) => Some(piece),
        _ => None,
    };
    GameRecord {
        winner,
        length: state.history().len(),
    }
}

/// Tally of games from one agent's point of view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArenaStats {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    total_moves: usize,
}

impl ArenaStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a game in which the tracked agent played `side`.
    pub fn record(&mut self, game: &GameRecord, side: Piece) {
        match game.winner {
            Some(winner) if winner == side => self.wins += 1,
            Some(_) => self.losses += 1,
            None => self.draws += 1,
        }
        self.total_moves += game.length;
    }

    pub fn games(&self) -> usize {
        self.wins + self.losses + self.draws
    }

    pub fn win_rate(&self) -> f32 {
        let n = self.games();
        if n == 0 {
            return 0.0;
        }
        self.wins as f32 / n as f32
    }

    pub fn draw_rate(&self) -> f32 {
        let n = self.games();
        if n == 0 {
            return 0.0;
        }
        self.draws as f32 / n as f32
    }

    /// Mean number of moves per game.
    pub fn average_game_length(&self) -> f32 {
        let n = self.games();
        if n == 0 {
            return 0.0;
        }
        self.total_moves as f32 / n as f32
    }
}

/// Play `games` games between `contender` and `opponent`, alternating
/// colours (the contender is Red in even-numbered games). Stats are kept
/// from the contender's side.
pub fn run_match(
    contender: &mut dyn Agent,
    opponent: &mut dyn Agent,
    games: usize,
    board: &Board,
) -> ArenaStats {
    let mut stats = ArenaStats::new();

    for game in 0..games {
        let (side, record) = if game % 2 == 0 {
            (Piece::Red, play_game(contender, opponent, board))
        } else {
            (Piece::Yellow, play_game(opponent, contender, board))
        };
        stats.record(&record, side);
        info!(
            game,
            side = side.name(),
            winner = record.winner.map(Piece::name).unwrap_or("draw"),
            length = record.length,
            "game finished"
        );
    }

    stats
}
