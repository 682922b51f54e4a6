//! Locating config.toml and layering `MNK_*` environment variables on top.

use crate::CentralConfig;
use std::path::Path;
use tracing::{debug, info, warn};

/// Checked in order when `MNK_CONFIG` is unset or points nowhere
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",
    "../config.toml",
    "/app/config.toml",
];

/// Build the effective configuration.
///
/// Uses the file named by `MNK_CONFIG` if it exists, else the first of
/// [`CONFIG_SEARCH_PATHS`] that exists, else the embedded defaults. The
/// `MNK_<SECTION>_<KEY>` overrides are applied in every case.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var("MNK_CONFIG") {
        let path = Path::new(&path);
        if path.exists() {
            info!("Loading config from MNK_CONFIG: {}", path.display());
            return load_from_path(path);
        }
        warn!("MNK_CONFIG={} not found, searching defaults", path.display());
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Using config file {}", path.display());
            return load_from_path(path);
        }
    }

    debug!("No config file found, falling back to embedded defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Read one config file, then apply the environment overrides.
///
/// Unreadable or malformed files fall back to the built-in defaults with a warning.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Could not parse {} ({}), falling back to defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Could not read {} ({}), falling back to defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Assign `config.section.field` from one environment variable, if set.
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
    // Optional parseable field (Option<u32>, Option<u64>, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = Some(v),
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
}

/// Override fields from `MNK_*` environment variables.
///
/// Environment variables follow the pattern: MNK_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.data_dir, "MNK_COMMON_DATA_DIR");
    env_override!(config, common.log_level, "MNK_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "MNK_COMMON_SEED", optional_parse);

    // Board
    env_override!(config, board.rows, "MNK_BOARD_ROWS", parse);
    env_override!(config, board.cols, "MNK_BOARD_COLS", parse);
    env_override!(config, board.k, "MNK_BOARD_K", parse);

    // Alpha-beta
    env_override!(config, alphabeta.depth, "MNK_ALPHABETA_DEPTH", parse);
    env_override!(
        config,
        alphabeta.move_ordering,
        "MNK_ALPHABETA_MOVE_ORDERING",
        parse
    );

    // MCTS
    env_override!(config, mcts.iterations, "MNK_MCTS_ITERATIONS", parse);
    env_override!(config, mcts.uct_const, "MNK_MCTS_UCT_CONST", parse);
    env_override!(
        config,
        mcts.expand_policy_prob,
        "MNK_MCTS_EXPAND_POLICY_PROB",
        parse
    );

    // Arena
    env_override!(config, arena.games, "MNK_ARENA_GAMES", parse);
    env_override!(config, arena.player1, "MNK_ARENA_PLAYER1");
    env_override!(config, arena.player2, "MNK_ARENA_PLAYER2");
    env_override!(config, arena.stats_file, "MNK_ARENA_STATS_FILE");
    env_override!(config, arena.log_interval, "MNK_ARENA_LOG_INTERVAL", parse);
    env_override!(
        config,
        arena.p1_iterations,
        "MNK_ARENA_P1_ITERATIONS",
        optional_parse
    );
    env_override!(
        config,
        arena.p2_iterations,
        "MNK_ARENA_P2_ITERATIONS",
        optional_parse
    );

    config
}
