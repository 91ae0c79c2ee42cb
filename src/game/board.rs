use std::fmt;

use super::Piece;
use crate::error::{BoardError, MoveError};

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;
pub const DEFAULT_WIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// The piece occupying this cell, if any
    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Piece::Red),
            Cell::Yellow => Some(Piece::Yellow),
        }
    }

    fn symbol(self) -> char {
        self.piece().map_or('.', Piece::symbol)
    }
}

impl From<Piece> for Cell {
    fn from(piece: Piece) -> Self {
        match piece {
            Piece::Red => Cell::Red,
            Piece::Yellow => Cell::Yellow,
        }
    }
}

/// Orientation of a run of cells. Row indices grow upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right (/)
    DiagonalUp,
    /// Top-left to bottom-right (\)
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalUp,
        Direction::DiagonalDown,
    ];

    /// (row step, column step)
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalUp => (1, 1),
            Direction::DiagonalDown => (-1, 1),
        }
    }
}

/// A run of `win_length` cells starting at (`row`, `col`) and extending in
/// `direction`. Only windows that fit entirely on the board are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

/// Connect Four grid.
///
/// Row 0 is the bottom row; pieces dropped into a column land on the lowest
/// empty row. Within every column the occupied cells form a contiguous run
/// starting at row 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    win_length: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty 6x7 board with the standard win length of 4
    pub fn new() -> Self {
        Board {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            win_length: DEFAULT_WIN_LENGTH,
            cells: vec![Cell::Empty; DEFAULT_ROWS * DEFAULT_COLS],
        }
    }

    /// Create an empty board with custom dimensions.
    ///
    /// Every row and every column must be able to hold a winning run.
    pub fn with_size(rows: usize, cols: usize, win_length: usize) -> Result<Self, BoardError> {
        if win_length < 3 {
            return Err(BoardError::WinLengthTooShort(win_length));
        }
        if rows < win_length || cols < win_length {
            return Err(BoardError::TooSmall {
                rows,
                cols,
                win_length,
            });
        }
        Ok(Board {
            rows,
            cols,
            win_length,
            cells: vec![Cell::Empty; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Index of the center column (the left of the two middle columns on even widths)
    pub fn center_column(&self) -> usize {
        self.cols / 2
    }

    /// Get the cell at a specific position. Panics if out of range.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// A column is playable when its top cell is empty. Out-of-range columns
    /// are never playable.
    pub fn is_column_playable(&self, col: usize) -> bool {
        col < self.cols && self.get(self.rows - 1, col) == Cell::Empty
    }

    /// Lowest empty row in `col`, or `None` if the column is full or out of range
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// Put `piece` at (`row`, `col`).
    ///
    /// Callers are expected to have located the row with [`Board::next_open_row`];
    /// any placement that would leave a gap beneath the piece is rejected.
    pub fn place(&mut self, row: usize, col: usize, piece: Piece) -> Result<(), MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn { column: col });
        }
        if row >= self.rows {
            return Err(MoveError::InvalidRow { row });
        }
        if self.get(row, col) != Cell::Empty {
            return Err(MoveError::CellOccupied { row, column: col });
        }
        if row > 0 && self.get(row - 1, col) == Cell::Empty {
            return Err(MoveError::FloatingPiece { row, column: col });
        }
        self.cells[row * self.cols + col] = piece.into();
        Ok(())
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, piece: Piece) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn { column: col });
        }
        let row = self
            .next_open_row(col)
            .ok_or(MoveError::ColumnFull { column: col })?;
        self.place(row, col, piece)?;
        Ok(row)
    }

    /// Columns that can still take a piece, in ascending order
    pub fn playable_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cols).filter(move |&col| self.is_column_playable(col))
    }

    /// Number of occupied cells
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    pub fn is_full(&self) -> bool {
        self.playable_columns().next().is_none()
    }

    /// True if either side has a winning run or no column is playable
    pub fn is_terminal(&self) -> bool {
        self.has_win(Piece::Red) || self.has_win(Piece::Yellow) || self.is_full()
    }

    /// Empty board with the same dimensions
    pub fn cleared(&self) -> Board {
        Board {
            rows: self.rows,
            cols: self.cols,
            win_length: self.win_length,
            cells: vec![Cell::Empty; self.cells.len()],
        }
    }

    /// Independent copy for trial moves during search
    pub fn clone_for_lookahead(&self) -> Board {
        self.clone()
    }

    /// Copy of the board with its columns in reverse order
    pub fn mirrored(&self) -> Board {
        let mut mirrored = self.clone();
        for row in 0..self.rows {
            for col in 0..self.cols {
                mirrored.cells[row * self.cols + col] = self.get(row, self.cols - 1 - col);
            }
        }
        mirrored
    }

    /// Every window of `win_length` cells in all four orientations
    pub fn windows(&self) -> impl Iterator<Item = Window> + '_ {
        Direction::ALL
            .into_iter()
            .flat_map(move |direction| {
                (0..self.rows).flat_map(move |row| {
                    (0..self.cols).map(move |col| Window {
                        row,
                        col,
                        direction,
                    })
                })
            })
            .filter(move |w| {
                self.offset(w.row, w.col, w.direction, self.win_length as isize - 1)
                    .is_some()
            })
    }

    /// The cells covered by `window`, starting from its anchor
    pub fn window_cells(&self, window: Window) -> impl Iterator<Item = Cell> + '_ {
        (0..self.win_length as isize)
            .filter_map(move |i| self.offset(window.row, window.col, window.direction, i))
            .map(move |(row, col)| self.get(row, col))
    }

    /// True if `piece` occupies every cell of some window
    pub fn has_win(&self, piece: Piece) -> bool {
        let cell = Cell::from(piece);
        self.windows()
            .any(|w| self.window_cells(w).all(|c| c == cell))
    }

    /// Check if the piece at (row, col) is part of a winning run.
    /// Only the lines through that cell are inspected.
    pub fn wins_through(&self, row: usize, col: usize) -> bool {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        Direction::ALL.into_iter().any(|direction| {
            1 + self.run_length(row, col, direction, 1, cell)
                + self.run_length(row, col, direction, -1, cell)
                >= self.win_length
        })
    }

    /// Count matching cells walking away from (row, col), not counting the start
    fn run_length(
        &self,
        row: usize,
        col: usize,
        direction: Direction,
        sign: isize,
        cell: Cell,
    ) -> usize {
        let mut count = 0;
        while let Some((r, c)) = self.offset(row, col, direction, sign * (count as isize + 1)) {
            if self.get(r, c) != cell {
                break;
            }
            count += 1;
        }
        count
    }

    fn offset(
        &self,
        row: usize,
        col: usize,
        direction: Direction,
        steps: isize,
    ) -> Option<(usize, usize)> {
        let (dr, dc) = direction.step();
        let r = row as isize + dr * steps;
        let c = col as isize + dc * steps;
        if r < 0 || c < 0 || r as usize >= self.rows || c as usize >= self.cols {
            return None;
        }
        Some((r as usize, c as usize))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Column indices on the first line, then rows from the top down.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = (0..self.cols).map(|c| c.to_string()).collect();
        write!(f, "{}", header.join("  "))?;
        for row in (0..self.rows).rev() {
            let line: Vec<String> = (0..self.cols)
                .map(|col| self.get(row, col).symbol().to_string())
                .collect();
            write!(f, "\n{}", line.join("  "))?;
        }
        Ok(())
    }
}
