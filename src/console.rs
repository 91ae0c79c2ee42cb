//! Line-oriented play on plain stdin/stdout.

use std::io::{self, BufRead, Write};

use crate::game::GameOutcome;
use crate::session::Session;

/// Play one game, reading columns from `input` and writing the board and
/// prompts to `output`. Returns `None` if the input ends before the game does.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut output: W,
) -> io::Result<Option<GameOutcome>> {
    writeln!(output, "{}", session.describe())?;

    loop {
        writeln!(output, "{}\n", session.state().board())?;

        if let Some(outcome) = session.state().outcome() {
            match outcome {
                GameOutcome::Winner(piece) => writeln!(output, "{} wins!!", piece.name())?,
                GameOutcome::Draw => writeln!(output, "It's a draw!")?,
            }
            return Ok(Some(outcome));
        }

        if session.is_computer_turn() {
            let piece = session.state().current_player();
            if let Some(column) = session.computer_move() {
                writeln!(output, "{} plays column {}", piece.name(), column)?;
            }
            continue;
        }

        loop {
            write!(output, "{}'s turn: ", session.state().current_player().name())?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                return Ok(None);
            }

            let accepted = line
                .trim()
                .parse::<usize>()
                .ok()
                .is_some_and(|column| session.human_move(column).is_ok());
            if accepted {
                break;
            }
            writeln!(output, "Pick a valid column\n")?;
        }
    }
}
