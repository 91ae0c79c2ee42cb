use std::path::PathBuf;

/// Errors returned when a move cannot be applied to a board or game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range")]
    InvalidColumn { column: usize },

    #[error("row {row} is out of range")]
    InvalidRow { row: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("cell ({row}, {column}) is already occupied")]
    CellOccupied { row: usize, column: usize },

    #[error("cell ({row}, {column}) has an empty cell beneath it")]
    FloatingPiece { row: usize, column: usize },

    #[error("game is already over")]
    GameOver,

    #[error("it is not the human player's turn")]
    OutOfTurn,
}

/// Errors that can occur when building a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("win length must be at least 3, got {0}")]
    WinLengthTooShort(usize),

    #[error("a {rows}x{cols} board cannot hold a run of {win_length}")]
    TooSmall {
        rows: usize,
        cols: usize,
        win_length: usize,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
}
