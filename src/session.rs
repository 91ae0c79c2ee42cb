//! A human-facing game: the live [`GameState`] plus the configured opponent.
//! Both front ends (TUI and console) drive play through this type.

use tracing::info;

use crate::ai::{build_opponent, Agent};
use crate::config::{AppConfig, OpponentKind};
use crate::error::{ConfigError, MoveError};
use crate::game::{GameOutcome, GameState, Piece};

pub struct Session {
    config: AppConfig,
    state: GameState,
    opponent: Option<Box<dyn Agent>>,
}

impl Session {
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(config.board.build()?, Piece::Red);
        let opponent = build_opponent(config.play.opponent, &config.search, config.play.seed);
        Ok(Session {
            config,
            state,
            opponent,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn opponent_kind(&self) -> OpponentKind {
        self.config.play.opponent
    }

    /// The side the computer plays, if there is a computer opponent
    pub fn computer_piece(&self) -> Option<Piece> {
        self.opponent
            .as_ref()
            .map(|_| self.config.play.human.other())
    }

    /// Short description of the matchup for headers
    pub fn describe(&self) -> String {
        let human = self.config.play.human;
        match self.config.play.opponent {
            OpponentKind::Minimax => format!(
                "You: {}  vs  Minimax (depth {})",
                human.name(),
                self.config.search.depth
            ),
            OpponentKind::Random => format!("You: {}  vs  Random", human.name()),
            OpponentKind::Human => "Red vs Yellow (two players)".to_string(),
        }
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.state.is_terminal() && self.computer_piece() == Some(self.state.current_player())
    }

    /// Start over with an empty board; the opponent keeps its settings
    pub fn restart(&mut self) {
        self.state = GameState::new(self.state.board().cleared(), Piece::Red);
        info!("new game");
    }

    /// Switch to a different opponent and start a new game
    pub fn set_opponent(&mut self, kind: OpponentKind) {
        self.config.play.opponent = kind;
        self.opponent = build_opponent(kind, &self.config.search, self.config.play.seed);
        self.restart();
    }

    /// Apply a move chosen by a human
    pub fn human_move(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_computer_turn() {
            return Err(MoveError::OutOfTurn);
        }
        let piece = self.state.current_player();
        self.state.apply_move_mut(column)?;
        info!(piece = piece.name(), column, "human moved");
        self.log_outcome();
        Ok(())
    }

    /// Let the computer play if it is its turn; returns the column it chose
    pub fn computer_move(&mut self) -> Option<usize> {
        if !self.is_computer_turn() {
            return None;
        }
        let piece = self.state.current_player();
        let column = self.opponent.as_mut()?.select_action(&self.state)?;
        // The agents only pick legal columns
        self.state.apply_move_mut(column).ok()?;
        info!(piece = piece.name(), column, "computer moved");
        self.log_outcome();
        Some(column)
    }

    fn log_outcome(&self) {
        match self.state.outcome() {
            Some(GameOutcome::Winner(piece)) => info!(winner = piece.name(), "game over"),
            Some(GameOutcome::Draw) => info!("game drawn"),
            None => {}
        }
    }
}
