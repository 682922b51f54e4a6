//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic shared by
//! the search engines' callers (the arena binary and its sweeps).
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`MNK_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! MNK_<SECTION>_<KEY>=value
//!
//! Examples:
//!     MNK_BOARD_ROWS=5
//!     MNK_BOARD_K=4
//!     MNK_ALPHABETA_DEPTH=4
//!     MNK_MCTS_UCT_CONST=1.4
//!     MNK_ARENA_PLAYER1=random
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
