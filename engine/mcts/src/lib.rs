//! Monte Carlo Tree Search (MCTS) with UCT selection for m,n,k games.
//!
//! # Overview
//!
//! MCTS builds a search tree by running iterations. Each iteration consists
//! of four phases:
//!
//! 1. **Selection**: Descend the tree with UCT (Upper Confidence bound applied
//!    to Trees), trying every child once before comparing scores, and taking
//!    a move that wins on the spot without looking further
//! 2. **Expansion**: Add one child, usually the best-ranked untried cell
//!    (see [`mnk_core::ordering`]), sometimes a random one
//! 3. **Simulation**: Play the new position out with random moves
//! 4. **Backpropagation**: Update games and wins along the path back to the
//!    root, each node crediting the result to the player who moved into it
//!
//! # Usage
//!
//! ```rust
//! use mcts::{run_mcts, MctsConfig, RandomPlayout};
//! use mnk_core::{GameState, Player};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut state = GameState::new(3, 3, 3).unwrap();
//! state.apply_move(4, Player::One).unwrap();
//!
//! let config = MctsConfig::for_testing();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = run_mcts(&state, Player::Two, config, &RandomPlayout, &mut rng).unwrap();
//!
//! assert_ne!(result.mv, 4);
//! assert_eq!(result.tree.root_games, 200);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `iterations`: Iterations per search (default: 500)
//! - `uct_const`: Exploration constant C for UCT (default: 1.1)
//! - `expand_policy_prob`: Chance that expansion follows the ranking
//!   instead of picking at random (default: 0.9)
//!
//! # Architecture
//!
//! ```text
//! +-------------------------------------------------------+
//! |                      MctsSearch                       |
//! +-------------------------------------------------------+
//! |  +-------------+  +-------------+  +----------------+  |
//! |  |  MctsTree   |  |  GameState  |  |    Playout     |  |
//! |  |  (arena)    |  | (per node)  |  | (leaf rollout) |  |
//! |  +------+------+  +------+------+  +-------+--------+  |
//! |         |                |                 |           |
//! |         v                v                 v           |
//! |  +-------------------------------------------------+  |
//! |  |     select -> expand -> simulate ->             |  |
//! |  |                  backpropagate                  |  |
//! |  +-------------------------------------------------+  |
//! +-------------------------------------------------------+
//! ```

pub mod config;
pub mod node;
pub mod playout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use playout::{Playout, RandomPlayout};
pub use search::{choose_move, run_mcts, ChildStats, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
