use super::{Board, Piece};
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Piece),
    Draw,
}

/// A game in progress: the board plus turn bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Piece,
    outcome: Option<GameOutcome>,
    history: Vec<usize>,
}

impl GameState {
    /// Standard 6x7 game, Red moves first
    pub fn initial() -> Self {
        GameState::new(Board::new(), Piece::Red)
    }

    /// Start a game from an empty (or partially filled) board
    pub fn new(board: Board, first: Piece) -> Self {
        let outcome = outcome_of(&board);
        GameState {
            board,
            current_player: first,
            outcome,
            history: Vec::new(),
        }
    }

    /// Get the side to move
    pub fn current_player(&self) -> Piece {
        self.current_player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Columns played so far, in order
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn last_move(&self) -> Option<usize> {
        self.history.last().copied()
    }

    /// Playable columns in ascending order; empty once the game is decided
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.playable_columns().collect()
    }

    /// Apply a move and return the new state, leaving `self` untouched
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply a move in place
    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let row = self.board.drop_piece(column, self.current_player)?;
        self.history.push(column);

        if self.board.wins_through(row, column) {
            self.outcome = Some(GameOutcome::Winner(self.current_player));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.current_player = self.current_player.other();

        Ok(())
    }
}

fn outcome_of(board: &Board) -> Option<GameOutcome> {
    if board.has_win(Piece::Red) {
        Some(GameOutcome::Winner(Piece::Red))
    } else if board.has_win(Piece::Yellow) {
        Some(GameOutcome::Winner(Piece::Yellow))
    } else if board.is_full() {
        Some(GameOutcome::Draw)
    } else {
        None
    }
}
