//! Leaf evaluation by playout.
//!
//! A playout plays a position out to the end and reports who won. The search
//! turns that into a 1 / 0.5 / 0 reward for the leaf's mover.

use mnk_core::{BoardError, GameState, Player};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Trait for leaf evaluators.
///
/// Implementations must not touch the tree's stored state: they receive a
/// shared reference and work on their own scratch copy.
pub trait Playout: Send + Sync {
    /// Play `state` to completion with `to_move` moving first and return the
    /// winner, or `None` for a tie.
    fn rollout(
        &self,
        state: &GameState,
        to_move: Player,
        rng: &mut ChaCha20Rng,
    ) -> Result<Option<Player>, BoardError>;
}

/// Uniformly random moves, alternating players, until a win or a full board.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlayout;

impl RandomPlayout {
    pub fn new() -> Self {
        Self
    }
}

impl Playout for RandomPlayout {
    fn rollout(
        &self,
        state: &GameState,
        to_move: Player,
        rng: &mut ChaCha20Rng,
    ) -> Result<Option<Player>, BoardError> {
        if state.is_game_over() {
            return Ok(state.winner());
        }

        let mut scratch = state.clone();
        let mut empty = scratch.empty_cells();
        let mut player = to_move;

        // Each step removes one empty cell, so this terminates.
        while !empty.is_empty() {
            let mv = empty.swap_remove(rng.gen_range(0..empty.len()));
            scratch.apply_move(mv, player)?;
            if scratch.check_win(mv, player) {
                return Ok(Some(player));
            }
            player = player.other();
        }

        Ok(None)
    }
}
