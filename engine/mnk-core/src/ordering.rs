//! Move ordering by neighbour density.
//!
//! Cells adjacent to many marks are where the game is being decided, and a
//! cell that completes a run for either side must be looked at before
//! anything else. The ordering is a plain sort key so it stays reproducible:
//! `(forced ? MIN : -neighbours, index)`.

use crate::board::{GameState, Move};

/// Sort key for `mv`; smaller keys are explored first.
#[inline]
pub fn priority_key(state: &GameState, mv: Move) -> (i64, Move) {
    if state.is_immediate_win(mv) {
        (i64::MIN, mv)
    } else {
        (-(state.occupied_neighbors(mv) as i64), mv)
    }
}

/// Sort `moves` in place by [`priority_key`].
pub fn rank_moves(state: &GameState, moves: &mut [Move]) {
    moves.sort_by_cached_key(|&mv| priority_key(state, mv));
}

/// The highest-priority move among `moves`, if any.
pub fn best_ranked(state: &GameState, moves: &[Move]) -> Option<Move> {
    moves.iter().copied().min_by_key(|&mv| priority_key(state, mv))
}

impl GameState {
    /// Empty cells, forced squares first, then by descending neighbour count,
    /// then by index.
    pub fn ranked_moves(&self) -> Vec<Move> {
        let mut moves = self.empty_cells();
        rank_moves(self, &mut moves);
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_empty_board_is_row_major() {
        let state = GameState::new(3, 3, 3).unwrap();
        assert_eq!(state.ranked_moves(), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_neighbors_first() {
        let mut state = GameState::new(3, 3, 3).unwrap();
        state.apply_move(4, Player::One).unwrap();
        let ranked = state.ranked_moves();
        // every remaining cell touches the centre once, so index order holds
        assert_eq!(ranked, vec![0, 1, 2, 3, 5, 6, 7, 8]);

        state.apply_move(0, Player::Two).unwrap();
        let ranked = state.ranked_moves();
        // 1 and 3 touch both marks
        assert_eq!(&ranked[..2], &[1, 3]);
    }

    #[test]
    fn test_forced_square_first() {
        let mut state = GameState::new(3, 3, 3).unwrap();
        state.apply_move(6, Player::Two).unwrap();
        state.apply_move(7, Player::Two).unwrap();
        // 8 completes the bottom row for player two despite fewer neighbours than 4
        let ranked = state.ranked_moves();
        assert_eq!(ranked[0], 8);
        assert_eq!(priority_key(&state, 8).0, i64::MIN);
    }

    #[test]
    fn test_best_ranked_subset() {
        let mut state = GameState::new(3, 3, 3).unwrap();
        state.apply_move(0, Player::One).unwrap();
        assert_eq!(best_ranked(&state, &[8, 2, 4]), Some(4));
        assert_eq!(best_ranked(&state, &[]), None);
    }
}
