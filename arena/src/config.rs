//! Configuration for the arena
//!
//! Defaults come from config.toml (with `MNK_<SECTION>_<KEY>` environment
//! overrides applied by `mnk-config`). CLI arguments take highest priority.

use alphabeta::AlphaBetaConfig;
use anyhow::{anyhow, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use mcts::MctsConfig;
use mnk_config::{load_config, CentralConfig};
use mnk_core::{GameState, Player};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::strategy::StrategyKind;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_rows() -> usize {
    CENTRAL_CONFIG.board.rows
}

fn default_cols() -> usize {
    CENTRAL_CONFIG.board.cols
}

fn default_k() -> usize {
    CENTRAL_CONFIG.board.k
}

fn default_depth() -> u32 {
    CENTRAL_CONFIG.alphabeta.depth
}

fn default_move_ordering() -> bool {
    CENTRAL_CONFIG.alphabeta.move_ordering
}

fn default_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.iterations
}

fn default_uct_const() -> f64 {
    CENTRAL_CONFIG.mcts.uct_const
}

fn default_expand_prob() -> f64 {
    CENTRAL_CONFIG.mcts.expand_policy_prob
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_player1() -> String {
    CENTRAL_CONFIG.arena.player1.clone()
}

fn default_player2() -> String {
    CENTRAL_CONFIG.arena.player2.clone()
}

fn default_stats_file() -> String {
    format!(
        "{}/{}",
        CENTRAL_CONFIG.common.data_dir, CENTRAL_CONFIG.arena.stats_file
    )
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.arena.log_interval
}

#[derive(Parser, Debug)]
#[command(name = "arena")]
#[command(about = "Pit alpha-beta and MCTS against each other on m,n,k boards")]
#[command(
    long_about = "Plays matches between move-selection strategies on an m x n board
needing k in a row and appends win/tie percentages and average decision
times to a CSV stats file.

Configuration is loaded from config.toml with MNK_<SECTION>_<KEY> environment
variable overrides. CLI arguments take highest priority."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one matchup and record its summary
    Match {
        #[command(flatten)]
        config: Config,
    },

    /// Play one matchup per value of an MCTS parameter, one CSV row each
    Sweep {
        #[command(flatten)]
        config: Config,

        /// Parameter to vary
        #[arg(long, value_enum)]
        param: SweepParam,

        /// Comma-separated values to try
        #[arg(long, value_delimiter = ',', num_args = 1.., required = true)]
        values: Vec<f64>,
    },

    /// Play a single game, printing the board after every move
    Play {
        #[command(flatten)]
        config: Config,
    },
}

impl Command {
    pub fn config(&self) -> &Config {
        match self {
            Command::Match { config } | Command::Sweep { config, .. } | Command::Play { config } => {
                config
            }
        }
    }
}

/// MCTS parameter varied by `sweep`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SweepParam {
    UctConst,
    Iterations,
    ExpandProb,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Board rows (m)
    #[arg(long, default_value_t = default_rows())]
    pub rows: usize,

    /// Board columns (n)
    #[arg(long, default_value_t = default_cols())]
    pub cols: usize,

    /// Marks in a row needed to win
    #[arg(short, long, default_value_t = default_k())]
    pub k: usize,

    /// Strategy for the first player (alphabeta, mcts, random)
    #[arg(long, default_value_t = default_player1())]
    pub player1: String,

    /// Strategy for the second player (alphabeta, mcts, random)
    #[arg(long, default_value_t = default_player2())]
    pub player2: String,

    /// Alpha-beta search depth in plies
    #[arg(long, default_value_t = default_depth())]
    pub depth: u32,

    /// Order alpha-beta candidates by forced wins and neighbour count
    #[arg(long, default_value_t = default_move_ordering(), action = ArgAction::Set)]
    pub move_ordering: bool,

    /// MCTS iterations per move
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// MCTS iterations for the first player (overrides --iterations and
    /// arena.p1_iterations)
    #[arg(long)]
    pub p1_iterations: Option<u32>,

    /// MCTS iterations for the second player (overrides --iterations and
    /// arena.p2_iterations)
    #[arg(long)]
    pub p2_iterations: Option<u32>,

    /// UCT exploration constant
    #[arg(long, default_value_t = default_uct_const())]
    pub uct_const: f64,

    /// Probability that MCTS expands the best-ranked cell instead of a random one
    #[arg(long, default_value_t = default_expand_prob())]
    pub expand_prob: f64,

    /// Games per match
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// CSV file the match summaries are appended to
    #[arg(long, default_value_t = default_stats_file())]
    pub stats_file: String,

    /// Also write the last match summary as JSON to this path
    #[arg(long)]
    pub summary_json: Option<String>,

    /// Seed for the strategies' random number generators (random when unset)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log progress every N games (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        GameState::new(self.rows, self.cols, self.k)?;

        self.strategy(Player::One)?;
        self.strategy(Player::Two)?;

        if self.depth == 0 {
            return Err(anyhow!("depth must be at least 1"));
        }

        if self.iterations == 0 || self.p1_iterations == Some(0) || self.p2_iterations == Some(0) {
            return Err(anyhow!("iterations must be at least 1"));
        }

        if self.uct_const.is_nan() || self.uct_const < 0.0 {
            return Err(anyhow!("uct_const must be non-negative, got {}", self.uct_const));
        }

        if !(0.0..=1.0).contains(&self.expand_prob) {
            return Err(anyhow!(
                "expand_prob must be within [0, 1], got {}",
                self.expand_prob
            ));
        }

        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn strategy(&self, player: Player) -> Result<StrategyKind> {
        match player {
            Player::One => self.player1.parse(),
            Player::Two => self.player2.parse(),
        }
    }

    pub fn alphabeta_config(&self) -> AlphaBetaConfig {
        AlphaBetaConfig::default()
            .with_depth(self.depth)
            .with_move_ordering(self.move_ordering)
    }

    pub fn mcts_config(&self, player: Player) -> MctsConfig {
        self.mcts_config_from(player, &CENTRAL_CONFIG)
    }

    /// Per-seat iterations fall back to `central`'s arena section, then to
    /// `--iterations`.
    fn mcts_config_from(&self, player: Player, central: &CentralConfig) -> MctsConfig {
        let iterations = match player {
            Player::One => self.p1_iterations.or(central.arena.p1_iterations),
            Player::Two => self.p2_iterations.or(central.arena.p2_iterations),
        }
        .unwrap_or(self.iterations);

        MctsConfig::default()
            .with_iterations(iterations)
            .with_uct_const(self.uct_const)
            .with_expand_policy_prob(self.expand_prob)
    }

    /// RNG seed for one seat. The seats get distinct streams from one base seed.
    pub fn seed_for(&self, player: Player) -> Option<u64> {
        self.seed_from(player, &CENTRAL_CONFIG)
    }

    fn seed_from(&self, player: Player, central: &CentralConfig) -> Option<u64> {
        self.seed
            .or(central.common.seed)
            .map(|seed| seed.wrapping_add(player.number() as u64))
    }

    /// Copy of this config with the sweep parameter set to `value`.
    pub fn with_sweep_value(&self, param: SweepParam, value: f64) -> Result<Config> {
        let mut config = self.clone();
        match param {
            SweepParam::UctConst => config.uct_const = value,
            SweepParam::ExpandProb => config.expand_prob = value,
            SweepParam::Iterations => {
                if value < 1.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
                    return Err(anyhow!("iterations must be a positive integer, got {}", value));
                }
                let iterations = value as u32;
                config.iterations = iterations;
                config.p1_iterations = Some(iterations);
                config.p2_iterations = Some(iterations);
            }
        }
        config.validate()?;
        Ok(config)
    }
}
