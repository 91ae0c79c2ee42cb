//! Terminal UI for playing against the computer or another human.

mod app;
mod game_view;

pub use app::App;
