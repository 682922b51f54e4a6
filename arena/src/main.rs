//! Arena - match runner for m,n,k search strategies
//!
//! A command-line harness that:
//! 1. Seats two strategies (alpha-beta, MCTS or random) at an m x n board
//! 2. Alternates their moves until someone gets k in a row or the board fills
//! 3. Appends win/tie percentages and average decision times to a CSV file
//! 4. Sweeps MCTS parameters, one CSV row per value

use anyhow::Result;
use clap::Parser;
use mnk_core::Player;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

mod config;
mod runner;
mod stats;
mod strategy;

use crate::config::{Cli, Command, Config, SweepParam};
use crate::runner::GameRunner;
use crate::stats::MatchSummary;
use crate::strategy::{build_strategy, Strategy};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn build_runner(config: &Config, shutdown: &Arc<AtomicBool>) -> Result<GameRunner> {
    let seat = |player: Player| -> Result<Box<dyn Strategy>> {
        build_strategy(
            config.strategy(player)?,
            config.alphabeta_config(),
            config.mcts_config(player),
            config.seed_for(player),
        )
    };

    Ok(GameRunner::new(
        config.rows,
        config.cols,
        config.k,
        seat(Player::One)?,
        seat(Player::Two)?,
    )?
    .with_shutdown(Arc::clone(shutdown))
    .with_log_interval(config.log_interval))
}

/// Play one match and append its summary to the stats file.
fn run_match(config: &Config, shutdown: &Arc<AtomicBool>) -> Result<MatchSummary> {
    let mut runner = build_runner(config, shutdown)?;
    let stats = runner.run_match(config.games)?;
    let summary = stats.summary(&runner.info());

    info!(
        p1 = %summary.p1,
        p2 = %summary.p2,
        p1_win_pct = summary.p1_win_pct,
        p2_win_pct = summary.p2_win_pct,
        tie_pct = summary.tie_pct,
        n_games = summary.n_games,
        p1_avg_time = format!("{:.4}s", summary.p1_avg_time),
        p2_avg_time = format!("{:.4}s", summary.p2_avg_time),
        "Match summary"
    );

    if summary.n_games == 0 {
        warn!("No games completed, nothing recorded");
        return Ok(summary);
    }

    summary.append_csv(Path::new(&config.stats_file))?;
    if let Some(ref path) = config.summary_json {
        summary.write_json(Path::new(path))?;
    }
    Ok(summary)
}

fn run_sweep(
    config: &Config,
    param: SweepParam,
    values: &[f64],
    shutdown: &Arc<AtomicBool>,
) -> Result<()> {
    info!(?param, values = ?values, "Starting parameter sweep");

    for &value in values {
        if shutdown.load(Ordering::Relaxed) {
            info!("Shutdown requested, ending sweep");
            break;
        }
        let swept = config.with_sweep_value(param, value)?;
        info!(?param, value, "Sweep step");
        run_match(&swept, shutdown)?;
    }
    Ok(())
}

fn run_play(config: &Config, shutdown: &Arc<AtomicBool>) -> Result<()> {
    let mut runner = build_runner(config, shutdown)?;
    let info = runner.info();
    println!(
        "{} (X) vs {} (O) on {}x{}, {} in a row\n",
        info.p1, info.p2, info.rows, info.cols, info.k
    );

    let record = runner.play_game_with(|state, mv, player| {
        let (row, col) = state.to_coords(mv);
        println!("{} plays {} (row {}, col {})", player, mv, row, col);
        println!("{}", state);
    })?;

    match record.winner {
        Some(player) => println!("{} wins after {} moves", player, record.moves.len()),
        None => println!("Tie after {} moves", record.moves.len()),
    }
    Ok(())
}

fn run_command(command: Command, shutdown: Arc<AtomicBool>) -> Result<()> {
    match command {
        Command::Match { config } => run_match(&config, &shutdown).map(|_| ()),
        Command::Sweep {
            config,
            param,
            values,
        } => run_sweep(&config, param, &values, &shutdown),
        Command::Play { config } => run_play(&config, &shutdown),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.command.config();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    // Setup graceful shutdown
    let shutdown = Arc::new(AtomicBool::new(false));
    let signal_flag = Arc::clone(&shutdown);
    let shutdown_handle = tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received, finishing current game...");
                signal_flag.store(true, Ordering::Relaxed);
            }
            Err(e) => warn!("Failed to listen for ctrl+c: {}", e),
        }
    });

    // Searches are CPU-bound, keep them off the async workers
    let run_result = tokio::task::spawn_blocking(move || run_command(cli.command, shutdown)).await?;

    shutdown_handle.abort();

    match run_result {
        Ok(()) => {
            info!("Arena completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Arena failed: {:#}", e);
            Err(e)
        }
    }
}
