//! # Minimax Connect Four
//!
//! Connect Four against a computer opponent that searches with depth-limited
//! minimax and alpha-beta pruning. Playable in a Ratatui terminal UI or on a
//! plain line-oriented console.
//!
//! ## Modules
//!
//! - [`game`]: board, pieces, win detection, turn bookkeeping
//! - [`ai`]: heuristic, minimax search engine, agents
//! - [`session`]: a human-facing game against the configured opponent
//! - [`console`]: stdin/stdout driver
//! - [`ui`]: terminal UI
//! - [`arena`]: agent-versus-agent matches
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: tracing subscriber setup
//! - [`error`]: structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod logging;
pub mod session;
pub mod ui;
