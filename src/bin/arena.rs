use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use minimax_connect_four::ai::{build_opponent, MinimaxAgent};
use minimax_connect_four::arena::run_match;
use minimax_connect_four::config::{AppConfig, OpponentKind};
use minimax_connect_four::logging::{init_tracing, LogTarget};

/// Pit the minimax agent against another computer opponent.
#[derive(Parser)]
#[command(name = "arena", about = "Play minimax against a computer opponent")]
struct Cli {
    /// Number of games; colours alternate each game
    #[arg(long, default_value_t = 100)]
    games: usize,

    /// Override the search depth of the minimax agent
    #[arg(long)]
    depth: Option<u32>,

    /// Opponent for the minimax agent
    #[arg(long, value_enum, default_value_t = OpponentKind::Random)]
    opponent: OpponentKind,

    /// Search depth of a minimax opponent (defaults to the agent's depth)
    #[arg(long)]
    opponent_depth: Option<u32>,

    /// Seed for the random opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.opponent == OpponentKind::Human {
        bail!("the arena needs a computer opponent (expected 'minimax' or 'random')");
    }

    init_tracing(LogTarget::choose(cli.log_file.as_deref(), false))
        .context("setting up logging")?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    config.validate().context("invalid settings")?;

    let mut opponent_config = config.clone();
    if let Some(depth) = cli.opponent_depth {
        opponent_config.search.depth = depth;
    }
    opponent_config
        .validate()
        .context("invalid opponent settings")?;

    let board = config.board.build()?;
    let mut contender = MinimaxAgent::new(config.search.clone());
    let mut opponent = build_opponent(cli.opponent, &opponent_config.search, cli.seed)
        .context("building opponent")?;

    println!(
        "Minimax (depth {}) vs {} on {}x{}, {} games",
        contender.depth(),
        opponent.name(),
        board.rows(),
        board.cols(),
        cli.games
    );

    let stats = run_match(&mut contender, opponent.as_mut(), cli.games, &board);

    println!("Wins:   {}", stats.wins);
    println!("Losses: {}", stats.losses);
    println!("Draws:  {}", stats.draws);
    println!("Win rate: {:.1}%", stats.win_rate() * 100.0);
    println!("Average game length: {:.1} moves", stats.average_game_length());

    Ok(())
}
