//! Alpha-beta search implementation.
//!
//! `max_value` / `min_value` alternate plies for the root player and the
//! opponent. Each ply checks whether the move that led to it ended the game
//! (or the depth ran out) before expanding further. The whole search runs on
//! one scratch board with apply/undo, so sibling subtrees never observe each
//! other's moves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use mnk_core::{utility_for, BoardError, GameState, Move, Player};
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::AlphaBetaConfig;

/// Window for the root call: strictly wider than any utility.
const ROOT_ALPHA: i32 = -2;
const ROOT_BETA: i32 = 2;

/// Errors that can occur during alpha-beta search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No legal move available")]
    NoLegalMove,

    #[error("Invalid search configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Result of an alpha-beta search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// First root move reaching the best value
    pub mv: Move,

    /// Minimax value for the root player: 1 win, 0 tie or unresolved, -1 loss
    pub value: i32,

    /// Positions visited, root included
    pub nodes: u64,

    pub elapsed: Duration,
}

/// Alpha-beta searcher.
///
/// The root player is fixed per [`search`](Self::search) call and defines
/// the sign of every utility.
pub struct AlphaBetaSearch {
    config: AlphaBetaConfig,
    stop: Option<Arc<AtomicBool>>,
    root_player: Player,
    nodes: u64,
}

impl AlphaBetaSearch {
    pub fn new(config: AlphaBetaConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            config,
            stop: None,
            root_player: Player::One,
            nodes: 0,
        })
    }

    /// Stop between root moves once `flag` is set. The first root move is
    /// always searched.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    pub fn config(&self) -> &AlphaBetaConfig {
        &self.config
    }

    /// Pick a move for `player` on `state`.
    ///
    /// Fails with [`SearchError::NoLegalMove`] on a full board.
    pub fn search(&mut self, state: &GameState, player: Player) -> Result<SearchResult, SearchError> {
        let start = Instant::now();
        let mut scratch = state.clone();
        let candidates = self.candidates(&scratch);
        if candidates.is_empty() {
            return Err(SearchError::NoLegalMove);
        }

        self.root_player = player;
        self.nodes = 1;

        let depth = self.config.depth;
        let mut alpha = ROOT_ALPHA;
        let mut best_value = i32::MIN;
        let mut best_move = candidates[0];

        for (i, &mv) in candidates.iter().enumerate() {
            if i > 0 && self.stop_requested() {
                debug!(searched = i, "Alpha-beta stopped early");
                break;
            }

            let undo = scratch.apply_undoable(mv, player)?;
            let value = self.min_value(&mut scratch, player.other(), (mv, player), alpha, ROOT_BETA, depth - 1);
            scratch.undo(undo);
            let value = value?;

            trace!(mv, value, alpha, "Alpha-beta root move");

            if value > best_value {
                best_value = value;
                best_move = mv;
            }
            if best_value >= ROOT_BETA {
                break;
            }
            alpha = alpha.max(best_value);
        }

        let result = SearchResult {
            mv: best_move,
            value: best_value,
            nodes: self.nodes,
            elapsed: start.elapsed(),
        };

        debug!(
            mv = result.mv,
            value = result.value,
            nodes = result.nodes,
            depth,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "Alpha-beta search complete"
        );

        Ok(result)
    }

    /// Ply for the root player. `last` is the move that produced `state`.
    fn max_value(
        &mut self,
        state: &mut GameState,
        to_move: Player,
        last: (Move, Player),
        mut alpha: i32,
        beta: i32,
        depth: u32,
    ) -> Result<i32, SearchError> {
        self.nodes += 1;
        if let Some(utility) = self.cutoff(state, last, depth) {
            return Ok(utility);
        }

        let mut value = i32::MIN;
        for mv in self.candidates(state) {
            let undo = state.apply_undoable(mv, to_move)?;
            let v = self.min_value(state, to_move.other(), (mv, to_move), alpha, beta, depth - 1);
            state.undo(undo);

            value = value.max(v?);
            if value >= beta {
                return Ok(value);
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    }

    /// Ply for the opponent of the root player.
    fn min_value(
        &mut self,
        state: &mut GameState,
        to_move: Player,
        last: (Move, Player),
        alpha: i32,
        mut beta: i32,
        depth: u32,
    ) -> Result<i32, SearchError> {
        self.nodes += 1;
        if let Some(utility) = self.cutoff(state, last, depth) {
            return Ok(utility);
        }

        let mut value = i32::MAX;
        for mv in self.candidates(state) {
            let undo = state.apply_undoable(mv, to_move)?;
            let v = self.max_value(state, to_move.other(), (mv, to_move), alpha, beta, depth - 1);
            state.undo(undo);

            value = value.min(v?);
            if value <= alpha {
                return Ok(value);
            }
            beta = beta.min(value);
        }
        Ok(value)
    }

    /// Static utility if the previous move ended the game or the depth is spent.
    fn cutoff(&self, state: &mut GameState, (mv, player): (Move, Player), depth: u32) -> Option<i32> {
        if state.is_terminal(mv, player) || depth == 0 {
            Some(utility_for(state.winner(), self.root_player))
        } else {
            None
        }
    }

    fn candidates(&self, state: &GameState) -> Vec<Move> {
        if self.config.move_ordering {
            state.ranked_moves()
        } else {
            state.empty_cells()
        }
    }

    fn stop_requested(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Pick a move for `player` searching `depth` plies with move ordering on.
pub fn choose_move(state: &GameState, player: Player, depth: u32) -> Result<Move, SearchError> {
    let config = AlphaBetaConfig::default().with_depth(depth);
    AlphaBetaSearch::new(config)?
        .search(state, player)
        .map(|r| r.mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn position(rows: usize, cols: usize, k: usize, moves: &[(Move, Player)]) -> GameState {
        let mut state = GameState::new(rows, cols, k).unwrap();
        for &(mv, p) in moves {
            state.apply_move(mv, p).unwrap();
        }
        state
    }

    fn searcher(depth: u32, ordering: bool) -> AlphaBetaSearch {
        AlphaBetaSearch::new(
            AlphaBetaConfig::default()
                .with_depth(depth)
                .with_move_ordering(ordering),
        )
        .unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        // X X _ / O O _ / _ _ _
        let state = position(
            3,
            3,
            3,
            &[
                (0, Player::One),
                (3, Player::Two),
                (1, Player::One),
                (4, Player::Two),
            ],
        );
        for ordering in [true, false] {
            for depth in [1, 3, 6] {
                let result = searcher(depth, ordering).search(&state, Player::One).unwrap();
                assert_eq!(result.mv, 2, "depth={} ordering={}", depth, ordering);
                assert_eq!(result.value, 1);
            }
        }
    }

    #[test]
    fn test_blocks_opponent_threat() {
        // X _ _ / O O _ / _ _ X ; O threatens 5
        let state = position(
            3,
            3,
            3,
            &[
                (0, Player::One),
                (3, Player::Two),
                (8, Player::One),
                (4, Player::Two),
            ],
        );
        for ordering in [true, false] {
            let result = searcher(2, ordering).search(&state, Player::One).unwrap();
            assert_eq!(result.mv, 5, "ordering={}", ordering);
        }
    }

    #[test]
    fn test_perspective_follows_root_player() {
        // Same kind of position with O to move and O winning at 5
        let state = position(
            3,
            3,
            3,
            &[
                (0, Player::One),
                (3, Player::Two),
                (8, Player::One),
                (4, Player::Two),
                (1, Player::One),
            ],
        );
        // at depth 1 only the immediate win at 5 scores
        for ordering in [true, false] {
            let result = searcher(1, ordering).search(&state, Player::Two).unwrap();
            assert_eq!(result.mv, 5, "ordering={}", ordering);
            assert_eq!(result.value, 1);
        }

        // deeper, blocking at 2 also wins through the double threat on 5 and 6,
        // and the ranking puts 2 first
        let result = searcher(4, true).search(&state, Player::Two).unwrap();
        assert_eq!(result.value, 1);
        assert!([2, 5].contains(&result.mv), "mv={}", result.mv);

        if result.mv == 2 {
            let mut after = state.clone();
            after.apply_move(2, Player::Two).unwrap();
            let reply = searcher(3, true).search(&after, Player::One).unwrap();
            assert_eq!(reply.value, -1);
        }
    }

    #[test]
    fn test_full_depth_tic_tac_toe_is_a_tie() {
        let state = GameState::new(3, 3, 3).unwrap();
        for ordering in [true, false] {
            let result = searcher(9, ordering).search(&state, Player::One).unwrap();
            assert_eq!(result.value, 0, "ordering={}", ordering);
        }
    }

    #[test]
    fn test_optimal_self_play_ends_in_tie() {
        let mut state = GameState::new(3, 3, 3).unwrap();
        let mut player = Player::One;
        let mut search = searcher(9, true);

        while !state.is_full() {
            let mv = search.search(&state, player).unwrap().mv;
            state.apply_move(mv, player).unwrap();
            assert!(!state.check_win(mv, player), "{} won against optimal play", player);
            player = player.other();
        }
        assert!(state.is_tie());
    }

    #[test]
    fn test_never_loses_to_random_as_first_player() {
        let mut search = searcher(9, true);
        for seed in 0..10 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let mut state = GameState::new(3, 3, 3).unwrap();
            let mut player = Player::One;

            while !state.is_full() {
                let mv = if player == Player::One {
                    search.search(&state, player).unwrap().mv
                } else {
                    let empty = state.empty_cells();
                    empty[rng.gen_range(0..empty.len())]
                };
                state.apply_move(mv, player).unwrap();
                if state.check_win(mv, player) {
                    break;
                }
                player = player.other();
            }
            assert_ne!(state.winner(), Some(Player::Two), "seed={}", seed);
        }
    }

    #[test]
    fn test_ordering_preserves_value() {
        let positions = [
            position(3, 3, 3, &[(4, Player::One)]),
            position(3, 3, 3, &[(0, Player::One), (4, Player::Two), (8, Player::One)]),
            position(4, 4, 3, &[(5, Player::One), (10, Player::Two)]),
            position(3, 5, 3, &[(7, Player::One), (6, Player::Two), (2, Player::One)]),
        ];
        for (i, state) in positions.iter().enumerate() {
            let to_move = if state.filled_count() % 2 == 0 {
                Player::One
            } else {
                Player::Two
            };
            for depth in [1, 2, 4] {
                let ordered = searcher(depth, true).search(state, to_move).unwrap();
                let plain = searcher(depth, false).search(state, to_move).unwrap();
                assert_eq!(ordered.value, plain.value, "position {} depth {}", i, depth);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let state = position(4, 4, 3, &[(5, Player::One), (6, Player::Two)]);
        let mut search = searcher(4, true);
        let first = search.search(&state, Player::One).unwrap();
        for _ in 0..3 {
            let again = search.search(&state, Player::One).unwrap();
            assert_eq!(again.mv, first.mv);
            assert_eq!(again.value, first.value);
            assert_eq!(again.nodes, first.nodes);
        }
    }

    #[test]
    fn test_first_best_move_kept() {
        // Depth 1 on an empty board: every move scores 0, so the first
        // candidate is returned
        let state = GameState::new(3, 3, 3).unwrap();
        assert_eq!(searcher(1, false).search(&state, Player::One).unwrap().mv, 0);
        assert_eq!(searcher(1, true).search(&state, Player::One).unwrap().mv, 0);
    }

    #[test]
    fn test_state_not_mutated() {
        let state = position(3, 3, 3, &[(4, Player::One)]);
        let before = state.clone();
        searcher(8, true).search(&state, Player::Two).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_full_board_is_an_error() {
        let state = position(
            1,
            3,
            3,
            &[(0, Player::One), (1, Player::Two), (2, Player::One)],
        );
        assert!(matches!(
            choose_move(&state, Player::Two, 4),
            Err(SearchError::NoLegalMove)
        ));
    }

    #[test]
    fn test_zero_depth_is_an_error() {
        let state = GameState::new(3, 3, 3).unwrap();
        assert!(matches!(
            choose_move(&state, Player::One, 0),
            Err(SearchError::Configuration(_))
        ));
    }

    #[test]
    fn test_stop_flag_searches_first_move_only() {
        let state = GameState::new(3, 3, 3).unwrap();
        let flag = Arc::new(AtomicBool::new(true));
        let mut search = searcher(9, false).with_stop_flag(flag);
        let result = search.search(&state, Player::One).unwrap();
        assert_eq!(result.mv, 0);

        let full = searcher(9, false).search(&state, Player::One).unwrap();
        assert!(result.nodes < full.nodes);
    }

    #[test]
    fn test_single_cell_left() {
        // X O _ X on a 1x4 board needing two in a row
        let state = position(1, 4, 2, &[(0, Player::One), (1, Player::Two), (3, Player::One)]);
        let result = searcher(5, true).search(&state, Player::Two).unwrap();
        assert_eq!(result.mv, 2);
        assert_eq!(result.value, 1);
    }
}
