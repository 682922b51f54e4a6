//! Match statistics and persistence.
//!
//! This module tracks the outcome of a match between two strategies:
//! - Wins for each seat and ties
//! - Decision time and move count per seat
//!
//! A finished match is reduced to a [`MatchSummary`], appended as one CSV row
//! to the stats file and optionally written as JSON.

use anyhow::{Context, Result};
use mnk_core::Player;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use crate::runner::GameRecord;

/// Column order of the stats file.
pub const CSV_HEADER: &str = "m,n,k,p1,p2,p1_win_pct,p2_win_pct,tie_pct,n_games,p1_avg_time,p2_avg_time,p1_iterations,p2_iterations";

/// Running totals over the games of one match.
#[derive(Debug, Clone, Default)]
pub struct MatchStats {
    pub games: u32,
    pub player1_wins: u32,
    pub player2_wins: u32,
    pub ties: u32,
    /// Total decision time per seat, indexed by `Player::number() - 1`
    pub time: [Duration; 2],
    /// Moves made per seat
    pub moves: [u32; 2],
}

/// What the summary row is keyed by.
#[derive(Debug, Clone)]
pub struct MatchInfo {
    pub rows: usize,
    pub cols: usize,
    pub k: usize,
    pub p1: String,
    pub p2: String,
    pub p1_iterations: Option<u32>,
    pub p2_iterations: Option<u32>,
}

/// One finished match, ready for the stats file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub p1: String,
    pub p2: String,
    pub p1_win_pct: u32,
    pub p2_win_pct: u32,
    pub tie_pct: u32,
    pub n_games: u32,
    /// Seconds per move
    pub p1_avg_time: f64,
    pub p2_avg_time: f64,
    pub p1_iterations: Option<u32>,
    pub p2_iterations: Option<u32>,
}

fn seat(player: Player) -> usize {
    player.number() as usize - 1
}

/// Whole percent of `part` in `total`, rounded down. Zero when `total` is zero.
fn percent(part: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        (part as u64 * 100 / total as u64) as u32
    }
}

impl MatchStats {
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        match game.winner {
            Some(Player::One) => self.player1_wins += 1,
            Some(Player::Two) => self.player2_wins += 1,
            None => self.ties += 1,
        }
        for player in Player::ALL {
            let i = seat(player);
            self.time[i] += game.time[i];
            self.moves[i] += game.moves_by[i];
        }
    }

    /// Mean decision time per move for `player`, in seconds.
    pub fn avg_time(&self, player: Player) -> f64 {
        let i = seat(player);
        if self.moves[i] == 0 {
            0.0
        } else {
            self.time[i].as_secs_f64() / self.moves[i] as f64
        }
    }

    pub fn summary(&self, info: &MatchInfo) -> MatchSummary {
        MatchSummary {
            m: info.rows,
            n: info.cols,
            k: info.k,
            p1: info.p1.clone(),
            p2: info.p2.clone(),
            p1_win_pct: percent(self.player1_wins, self.games),
            p2_win_pct: percent(self.player2_wins, self.games),
            tie_pct: percent(self.ties, self.games),
            n_games: self.games,
            p1_avg_time: self.avg_time(Player::One),
            p2_avg_time: self.avg_time(Player::Two),
            p1_iterations: info.p1_iterations,
            p2_iterations: info.p2_iterations,
        }
    }
}

fn optional(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl MatchSummary {
    /// The summary as one CSV line, without a trailing newline.
    pub fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{:.6},{:.6},{},{}",
            self.m,
            self.n,
            self.k,
            self.p1,
            self.p2,
            self.p1_win_pct,
            self.p2_win_pct,
            self.tie_pct,
            self.n_games,
            self.p1_avg_time,
            self.p2_avg_time,
            optional(self.p1_iterations),
            optional(self.p2_iterations),
        )
    }

    /// Append this summary to the CSV file at `path`, writing the header
    /// first when the file does not exist yet.
    pub fn append_csv(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        let is_new = !path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open stats file {}", path.display()))?;
        let mut out = BufWriter::new(file);

        if is_new {
            writeln!(out, "{}", CSV_HEADER)?;
        }
        writeln!(out, "{}", self.csv_row())?;
        out.flush()?;

        debug!("Appended match summary to {}", path.display());
        Ok(())
    }

    /// Write this summary as pretty JSON (write to temp file, then rename).
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)
            .with_context(|| format!("failed to write {}", temp_path.display()))?;

        if let Err(e) = fs::rename(&temp_path, path) {
            warn!("Failed to rename summary file: {}", e);
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!("Wrote match summary to {}", path.display());
        Ok(())
    }
}
