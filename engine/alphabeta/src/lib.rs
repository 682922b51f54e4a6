//! Minimax search with alpha-beta pruning for m,n,k games.
//!
//! The search is depth-limited with no evaluation heuristic: a finished game
//! scores `+1` / `-1` / `0` from the root player's perspective and a cut-off
//! position scores `0`. Candidate moves are optionally ordered so forced
//! squares and crowded regions are searched first, which only changes how
//! much gets pruned, never the value returned.
//!
//! # Usage
//!
//! ```rust
//! use alphabeta::{AlphaBetaConfig, AlphaBetaSearch};
//! use mnk_core::{GameState, Player};
//!
//! // X X _
//! // O O _
//! // _ _ _
//! let mut state = GameState::new(3, 3, 3).unwrap();
//! for (mv, p) in [(0, Player::One), (3, Player::Two), (1, Player::One), (4, Player::Two)] {
//!     state.apply_move(mv, p).unwrap();
//! }
//!
//! let mut search = AlphaBetaSearch::new(AlphaBetaConfig::default()).unwrap();
//! let result = search.search(&state, Player::One).unwrap();
//! assert_eq!(result.mv, 2);
//! assert_eq!(result.value, 1);
//! ```

pub mod config;
pub mod search;

pub use config::AlphaBetaConfig;
pub use search::{choose_move, AlphaBetaSearch, SearchError, SearchResult};
