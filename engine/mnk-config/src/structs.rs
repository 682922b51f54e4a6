//! Sections of config.toml. Every key is optional and falls back to
//! config.defaults.toml.

use crate::defaults;
use serde::Deserialize;

fn d_data_dir() -> String {
    defaults::data_dir().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_rows() -> usize {
    defaults::rows()
}
fn d_cols() -> usize {
    defaults::cols()
}
fn d_k() -> usize {
    defaults::k()
}
fn d_depth() -> u32 {
    defaults::depth()
}
fn d_move_ordering() -> bool {
    defaults::move_ordering()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_uct_const() -> f64 {
    defaults::uct_const()
}
fn d_expand_policy_prob() -> f64 {
    defaults::expand_policy_prob()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_player1() -> String {
    defaults::player1().into()
}
fn d_player2() -> String {
    defaults::player2().into()
}
fn d_stats_file() -> String {
    defaults::stats_file().into()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

/// Whole config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub alphabeta: AlphaBetaConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    /// Directory for CSV statistics and JSON summaries
    #[serde(default = "d_data_dir")]
    pub data_dir: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// RNG seed; absent means seed from entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir().into(),
            log_level: defaults::log_level().into(),
            seed: None,
        }
    }
}

/// Board shape: `rows x cols`, `k` in a row to win
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BoardConfig {
    #[serde(default = "d_rows")]
    pub rows: usize,
    #[serde(default = "d_cols")]
    pub cols: usize,
    #[serde(default = "d_k")]
    pub k: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: defaults::rows(),
            cols: defaults::cols(),
            k: defaults::k(),
        }
    }
}

/// Alpha-beta search settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AlphaBetaConfig {
    /// Plies searched below the root
    #[serde(default = "d_depth")]
    pub depth: u32,
    /// Explore forced and crowded squares first
    #[serde(default = "d_move_ordering")]
    pub move_ordering: bool,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            depth: defaults::depth(),
            move_ordering: defaults::move_ordering(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    /// Exploration constant C in the UCT formula
    #[serde(default = "d_uct_const")]
    pub uct_const: f64,
    /// Probability that expansion takes the best-ranked cell instead of a random one
    #[serde(default = "d_expand_policy_prob")]
    pub expand_policy_prob: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::iterations(),
            uct_const: defaults::uct_const(),
            expand_policy_prob: defaults::expand_policy_prob(),
        }
    }
}

/// Match harness configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    /// Games per matchup
    #[serde(default = "d_games")]
    pub games: u32,
    /// Strategy for player one: "alphabeta", "mcts" or "random"
    #[serde(default = "d_player1")]
    pub player1: String,
    #[serde(default = "d_player2")]
    pub player2: String,
    /// CSV file (under data_dir) that match summaries are appended to
    #[serde(default = "d_stats_file")]
    pub stats_file: String,
    /// Log running results every N games
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
    /// Per-player MCTS budgets; absent means `mcts.iterations`
    #[serde(default)]
    pub p1_iterations: Option<u32>,
    #[serde(default)]
    pub p2_iterations: Option<u32>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            player1: defaults::player1().into(),
            player2: defaults::player2().into(),
            stats_file: defaults::stats_file().into(),
            log_interval: defaults::log_interval(),
            p1_iterations: None,
            p2_iterations: None,
        }
    }
}
