use std::path::Path;

use tracing::warn;

pub use crate::ai::SearchConfig;
use crate::error::{BoardError, ConfigError};
use crate::game::{Board, Piece, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_WIN_LENGTH};

/// Deepest search accepted from configuration. Cost grows roughly as
/// `cols^depth`.
pub const MAX_DEPTH: u32 = 10;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub search: SearchConfig,
    pub play: PlayConfig,
}

/// Board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub win_length: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            win_length: DEFAULT_WIN_LENGTH,
        }
    }
}

impl BoardConfig {
    /// Create an empty board with these dimensions
    pub fn build(&self) -> Result<Board, BoardError> {
        Board::with_size(self.rows, self.cols, self.win_length)
    }
}

/// Who the human plays against.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    /// Alpha-beta search
    #[default]
    Minimax,
    /// Uniformly random legal columns
    Random,
    /// Another human at the same keyboard
    Human,
}

impl OpponentKind {
    /// Next opponent in the TUI's cycle order
    pub fn next(self) -> OpponentKind {
        match self {
            OpponentKind::Minimax => OpponentKind::Random,
            OpponentKind::Random => OpponentKind::Human,
            OpponentKind::Human => OpponentKind::Minimax,
        }
    }
}

/// Interactive play settings. Red always moves first.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub opponent: OpponentKind,
    /// The side the (first) human controls
    pub human: Piece,
    /// Seed for the random opponent; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            opponent: OpponentKind::default(),
            human: Piece::Red,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.build()?;

        if self.search.depth == 0 {
            return Err(ConfigError::Validation(
                "search.depth must be >= 1".into(),
            ));
        }
        if self.search.depth > MAX_DEPTH {
            return Err(ConfigError::Validation(format!(
                "search.depth must be <= {MAX_DEPTH}"
            )));
        }
        if self.search.terminal_score <= 0 {
            return Err(ConfigError::Validation(
                "search.terminal_score must be > 0".into(),
            ));
        }

        let weights = &self.search.weights;
        if weights.four >= self.search.terminal_score {
            return Err(ConfigError::Validation(
                "search.weights.four must be < search.terminal_score".into(),
            ));
        }
        if weights.opponent_three > 0 {
            return Err(ConfigError::Validation(
                "search.weights.opponent_three must be <= 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
