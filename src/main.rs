use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use minimax_connect_four::config::{AppConfig, OpponentKind};
use minimax_connect_four::console;
use minimax_connect_four::logging::{init_tracing, LogTarget};
use minimax_connect_four::session::Session;
use minimax_connect_four::ui::App;

/// Play Connect Four against a minimax computer opponent.
#[derive(Parser)]
#[command(name = "minimax-connect-four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the search depth
    #[arg(long)]
    depth: Option<u32>,

    /// Override the opponent
    #[arg(long, value_enum)]
    opponent: Option<OpponentKind>,

    /// Let the computer play Red and move first
    #[arg(long)]
    computer_first: bool,

    /// Seed for the random opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Line-oriented console instead of the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    init_tracing(LogTarget::choose(cli.log_file.as_deref(), !cli.plain))
        .context("setting up logging")?;

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(opponent) = cli.opponent {
        config.play.opponent = opponent;
    }
    if cli.computer_first {
        config.play.human = config.play.human.other();
    }
    if cli.seed.is_some() {
        config.play.seed = cli.seed;
    }
    config.validate().context("invalid settings")?;

    if cli.plain {
        run_console(config)
    } else {
        run_tui(config)
    }
}

fn run_console(config: AppConfig) -> Result<()> {
    let mut session = Session::new(config)?;
    let stdin = io::stdin();
    console::run(&mut session, stdin.lock(), io::stdout())?;
    Ok(())
}

fn run_tui(config: AppConfig) -> Result<()> {
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    Ok(res?)
}
