//! Core Connect Four game logic: the board with its gravity and win rules,
//! piece ownership, and turn bookkeeping for drivers.

mod board;
mod piece;
mod state;

pub use board::{
    Board, Cell, Direction, Window, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_WIN_LENGTH,
};
pub use piece::Piece;
pub use state::{GameOutcome, GameState};
