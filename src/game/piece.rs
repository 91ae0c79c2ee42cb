use serde::{Deserialize, Serialize};

/// The side that owns a piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Piece {
    Red,
    Yellow,
}

impl Piece {
    /// Get the opposing side
    pub fn other(self) -> Piece {
        match self {
            Piece::Red => Piece::Yellow,
            Piece::Yellow => Piece::Red,
        }
    }

    /// Get piece name for display
    pub fn name(self) -> &'static str {
        match self {
            Piece::Red => "Red",
            Piece::Yellow => "Yellow",
        }
    }

    /// Single-character marker used in text rendering
    pub fn symbol(self) -> char {
        match self {
            Piece::Red => 'R',
            Piece::Yellow => 'Y',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_piece() {
        assert_eq!(Piece::Red.other(), Piece::Yellow);
        assert_eq!(Piece::Yellow.other(), Piece::Red);
    }

    #[test]
    fn test_piece_name_and_symbol() {
        assert_eq!(Piece::Red.name(), "Red");
        assert_eq!(Piece::Yellow.name(), "Yellow");
        assert_eq!(Piece::Red.symbol(), 'R');
        assert_eq!(Piece::Yellow.symbol(), 'Y');
    }
}
