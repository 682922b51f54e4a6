//! Values used for any key a config.toml leaves out.
//!
//! The shared TOML file is embedded at compile time so the binary and any
//! checked-in config.toml agree on what an omitted key means.

use once_cell::sync::Lazy;
use serde::Deserialize;

const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    board: BoardDefaults,
    alphabeta: AlphaBetaDefaults,
    mcts: MctsDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    data_dir: String,
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct BoardDefaults {
    rows: usize,
    cols: usize,
    k: usize,
}

#[derive(Debug, Deserialize)]
struct AlphaBetaDefaults {
    depth: u32,
    move_ordering: bool,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    iterations: u32,
    uct_const: f64,
    expand_policy_prob: f64,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    games: u32,
    player1: String,
    player2: String,
    stats_file: String,
    log_interval: u32,
}

// Common
pub fn data_dir() -> &'static str {
    &DEFAULTS.common.data_dir
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Board
pub fn rows() -> usize {
    DEFAULTS.board.rows
}
pub fn cols() -> usize {
    DEFAULTS.board.cols
}
pub fn k() -> usize {
    DEFAULTS.board.k
}

// Alpha-beta
pub fn depth() -> u32 {
    DEFAULTS.alphabeta.depth
}
pub fn move_ordering() -> bool {
    DEFAULTS.alphabeta.move_ordering
}

// MCTS
pub fn iterations() -> u32 {
    DEFAULTS.mcts.iterations
}
pub fn uct_const() -> f64 {
    DEFAULTS.mcts.uct_const
}
pub fn expand_policy_prob() -> f64 {
    DEFAULTS.mcts.expand_policy_prob
}

// Arena
pub fn games() -> u32 {
    DEFAULTS.arena.games
}
pub fn player1() -> &'static str {
    &DEFAULTS.arena.player1
}
pub fn player2() -> &'static str {
    &DEFAULTS.arena.player2
}
pub fn stats_file() -> &'static str {
    &DEFAULTS.arena.stats_file
}
pub fn log_interval() -> u32 {
    DEFAULTS.arena.log_interval
}
