use crate::config::AppConfig;
use crate::error::{ConfigError, MoveError};
use crate::game::GameOutcome;
use crate::session::Session;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App {
    session: Session,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let mut app = App {
            session: Session::new(config)?,
            selected_column: 0,
            should_quit: false,
            message: None,
        };
        app.new_game("New game started!");
        Ok(app)
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;
        let cols = self.session.state().board().cols();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < cols {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.session.restart();
                self.new_game("New game started!");
            }
            KeyCode::Char('m') => {
                let next = self.session.opponent_kind().next();
                self.session.set_opponent(next);
                self.new_game("Opponent changed, new game started!");
            }
            _ => {}
        }
    }

    /// Reset the cursor and let the computer open if it plays Red
    fn new_game(&mut self, message: &str) {
        self.selected_column = self.session.state().board().center_column();
        self.message = Some(message.to_string());
        self.session.computer_move();
    }

    /// Drop piece in selected column, then let the computer reply
    fn drop_piece(&mut self) {
        match self.session.human_move(self.selected_column) {
            Ok(()) => {
                if let Some(column) = self.session.computer_move() {
                    self.message = Some(format!("Computer played column {}", column + 1));
                }
                if let Some(outcome) = self.session.state().outcome() {
                    self.message = Some(match outcome {
                        GameOutcome::Winner(piece) => format!("{} wins!", piece.name()),
                        GameOutcome::Draw => "It's a draw!".to_string(),
                    });
                }
            }
            Err(MoveError::ColumnFull { .. }) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
            Err(err) => {
                self.message = Some(err.to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.session, self.selected_column, &self.message);
    }
}
