use serde::{Deserialize, Serialize};

use crate::game::{Board, Cell, Piece};

/// Position scores. Only the relative order between positions matters.
pub type Score = i64;

/// Trait for evaluating a board position from one side's perspective.
pub trait Heuristic {
    fn score_position(&self, board: &Board, piece: Piece) -> Score;
}

/// Weights for the window-counting heuristic.
///
/// A window is any run of `win_length` cells on the board. "three" and "two"
/// are relative to the standard win length of four: a window one (or two)
/// pieces short of a win with the rest empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Per own piece in the center column
    pub center: Score,
    /// Window completely filled with own pieces
    pub four: Score,
    /// Own pieces one short of a win, remaining cell empty
    pub three: Score,
    /// Own pieces two short of a win, remaining cells empty
    pub two: Score,
    /// Opponent one short of a win, remaining cell empty
    pub opponent_three: Score,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        HeuristicWeights {
            center: 6,
            four: 100,
            three: 5,
            two: 2,
            opponent_three: -4,
        }
    }
}

impl HeuristicWeights {
    /// Score a single window from `piece`'s perspective
    pub fn evaluate_window(
        &self,
        cells: impl IntoIterator<Item = Cell>,
        piece: Piece,
        win_length: usize,
    ) -> Score {
        let own_cell = Cell::from(piece);
        let mut own = 0;
        let mut opp = 0;
        let mut empty = 0;
        for cell in cells {
            match cell {
                Cell::Empty => empty += 1,
                c if c == own_cell => own += 1,
                _ => opp += 1,
            }
        }

        if own == win_length {
            self.four
        } else if own == win_length - 1 && empty == 1 {
            self.three
        } else if own == win_length - 2 && empty == 2 {
            self.two
        } else if opp == win_length - 1 && empty == 1 {
            self.opponent_three
        } else {
            0
        }
    }
}

impl Heuristic for HeuristicWeights {
    fn score_position(&self, board: &Board, piece: Piece) -> Score {
        let own_cell = Cell::from(piece);
        let center = board.center_column();
        let center_count = (0..board.rows())
            .filter(|&row| board.get(row, center) == own_cell)
            .count() as Score;

        let windows: Score = board
            .windows()
            .map(|w| self.evaluate_window(board.window_cells(w), piece, board.win_length()))
            .sum();

        center_count * self.center + windows
    }
}
