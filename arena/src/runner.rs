//! Turn alternation between two strategies on one board

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use mnk_core::{GameState, Move, Player};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::stats::{MatchInfo, MatchStats};
use crate::strategy::Strategy;

/// Outcome of a single game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// `None` for a tie
    pub winner: Option<Player>,
    /// Moves in the order they were played, PlayerOne first
    pub moves: Vec<Move>,
    /// Decision time per seat
    pub time: [Duration; 2],
    /// Moves made per seat
    pub moves_by: [u32; 2],
}

pub struct GameRunner {
    rows: usize,
    cols: usize,
    k: usize,
    players: [Box<dyn Strategy>; 2],
    shutdown: Arc<AtomicBool>,
    log_interval: u32,
}

impl GameRunner {
    /// Seat `player1` (moves first) and `player2` at a `rows x cols` board
    /// needing `k` in a row.
    pub fn new(
        rows: usize,
        cols: usize,
        k: usize,
        player1: Box<dyn Strategy>,
        player2: Box<dyn Strategy>,
    ) -> Result<Self> {
        GameState::new(rows, cols, k)?;
        Ok(Self {
            rows,
            cols,
            k,
            players: [player1, player2],
            shutdown: Arc::new(AtomicBool::new(false)),
            log_interval: 0,
        })
    }

    /// Stop the match before the next game once `flag` is set.
    pub fn with_shutdown(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown = flag;
        self
    }

    /// Log a progress line every `n` games (0 to disable).
    pub fn with_log_interval(mut self, n: u32) -> Self {
        self.log_interval = n;
        self
    }

    pub fn info(&self) -> MatchInfo {
        MatchInfo {
            rows: self.rows,
            cols: self.cols,
            k: self.k,
            p1: self.players[0].name().to_string(),
            p2: self.players[1].name().to_string(),
            p1_iterations: self.players[0].iterations(),
            p2_iterations: self.players[1].iterations(),
        }
    }

    pub fn play_game(&mut self) -> Result<GameRecord> {
        self.play_game_with(|_, _, _| {})
    }

    /// Play one game from the empty board, calling `on_move` after every
    /// applied move.
    pub fn play_game_with<F>(&mut self, mut on_move: F) -> Result<GameRecord>
    where
        F: FnMut(&GameState, Move, Player),
    {
        let mut state = GameState::new(self.rows, self.cols, self.k)?;
        let mut player = Player::One;
        let mut record = GameRecord {
            winner: None,
            moves: Vec::with_capacity(state.size()),
            time: [Duration::ZERO; 2],
            moves_by: [0; 2],
        };

        while !state.is_full() {
            let seat = player.number() as usize - 1;
            let strategy = &mut self.players[seat];

            let start = Instant::now();
            let mv = strategy
                .choose_move(&state, player)
                .with_context(|| format!("{} failed to choose a move for {}", strategy.name(), player))?;
            record.time[seat] += start.elapsed();

            state
                .apply_move(mv, player)
                .map_err(|e| anyhow!("{} played an illegal move: {}", strategy.name(), e))?;
            record.moves.push(mv);
            record.moves_by[seat] += 1;

            let won = state.check_win(mv, player);
            on_move(&state, mv, player);
            if won {
                break;
            }
            player = player.other();
        }

        record.winner = state.winner();
        debug!(
            winner = ?record.winner,
            moves = record.moves.len(),
            "Game finished"
        );
        Ok(record)
    }

    /// Play up to `n_games` games and total the results. Stops early when the
    /// shutdown flag is set; the games already played are still counted.
    pub fn run_match(&mut self, n_games: u32) -> Result<MatchStats> {
        let info = self.info();
        info!(
            "Starting match: {} vs {} on {}x{} (k={}), {} games",
            info.p1, info.p2, self.rows, self.cols, self.k, n_games
        );

        let progress = if n_games > 0 && std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            let pb = ProgressBar::new(n_games as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} games ({eta})")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut stats = MatchStats::default();
        for game in 1..=n_games {
            if self.shutdown.load(Ordering::Relaxed) {
                info!("Shutdown requested, stopping after {} games", stats.games);
                break;
            }

            let record = self.play_game()?;
            stats.record(&record);

            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            if self.log_interval > 0 && game % self.log_interval == 0 {
                let line = || {
                    info!(
                        "Completed {} games: p1 {} / p2 {} / ties {}",
                        game, stats.player1_wins, stats.player2_wins, stats.ties
                    )
                };
                match progress {
                    Some(ref pb) => pb.suspend(line),
                    None => line(),
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("done");
        }

        info!(
            games = stats.games,
            player1_wins = stats.player1_wins,
            player2_wins = stats.player2_wins,
            ties = stats.ties,
            "Match finished"
        );
        Ok(stats)
    }
}
