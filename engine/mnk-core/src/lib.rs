//! Board model for the generalized m,n,k game.
//!
//! An m,n,k game is tic-tac-toe played on an `rows x cols` grid where a player
//! needs `k` marks in a row (horizontally, vertically or diagonally) to win.
//! This crate owns everything both search engines share:
//!
//! - [`GameState`]: the cell grid plus the cached `game_over` / `winner` flags
//! - [`CellValue`] and [`Player`]: what a cell holds and who is moving
//! - Move ordering helpers ([`GameState::ranked_moves`]) used by alpha-beta
//!   ordering and by the MCTS expansion policy
//! - A compact binary codec and a serde representation of a board
//!
//! # Usage
//!
//! ```rust
//! use mnk_core::{GameState, Player};
//!
//! let mut state = GameState::new(3, 3, 3).unwrap();
//! state.apply_move(0, Player::One).unwrap();
//! state.apply_move(4, Player::Two).unwrap();
//! state.apply_move(1, Player::One).unwrap();
//! state.apply_move(5, Player::Two).unwrap();
//! state.apply_move(2, Player::One).unwrap();
//!
//! assert!(state.check_win(2, Player::One));
//! assert_eq!(state.winner(), Some(Player::One));
//! ```

pub mod board;
pub mod cell;
pub mod codec;
pub mod error;
pub mod game_utils;
pub mod ordering;

pub use board::{GameState, Move, UndoMove};
pub use cell::{CellValue, Player};
pub use codec::BoardRecord;
pub use error::{BoardError, DecodeError};
pub use game_utils::{playout_score, utility_for};
