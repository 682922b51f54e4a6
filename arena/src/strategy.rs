//! Move-selection strategies the arena can seat at the board

use alphabeta::{AlphaBetaConfig, AlphaBetaSearch};
use anyhow::{anyhow, Result};
use mcts::{MctsConfig, RandomPlayout};
use mnk_core::{GameState, Move, Player};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A player seat: picks a move for `player` on the current board.
pub trait Strategy: Send {
    /// Short label used in logs and the stats file
    fn name(&self) -> &str;

    fn choose_move(&mut self, state: &GameState, player: Player) -> Result<Move>;

    /// MCTS iteration budget, if this strategy has one
    fn iterations(&self) -> Option<u32> {
        None
    }
}

/// Strategy names accepted on the command line and in config.toml.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    AlphaBeta,
    Mcts,
    Random,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::AlphaBeta => "alphabeta",
            StrategyKind::Mcts => "mcts",
            StrategyKind::Random => "random",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "alphabeta" | "alpha-beta" | "ab" => Ok(StrategyKind::AlphaBeta),
            "mcts" => Ok(StrategyKind::Mcts),
            "random" => Ok(StrategyKind::Random),
            other => Err(anyhow!(
                "unknown strategy '{}', expected one of alphabeta, mcts, random",
                other
            )),
        }
    }
}

fn make_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}

/// Depth-limited alpha-beta.
pub struct AlphaBetaStrategy {
    search: AlphaBetaSearch,
}

impl AlphaBetaStrategy {
    pub fn new(config: AlphaBetaConfig) -> Result<Self> {
        Ok(Self {
            search: AlphaBetaSearch::new(config)?,
        })
    }
}

impl Strategy for AlphaBetaStrategy {
    fn name(&self) -> &str {
        StrategyKind::AlphaBeta.as_str()
    }

    fn choose_move(&mut self, state: &GameState, player: Player) -> Result<Move> {
        let result = self.search.search(state, player)?;
        debug!(
            player = %player,
            mv = result.mv,
            value = result.value,
            nodes = result.nodes,
            "Alpha-beta move"
        );
        Ok(result.mv)
    }
}

/// UCT tree search with random playouts.
pub struct MctsStrategy {
    config: MctsConfig,
    rng: ChaCha20Rng,
}

impl MctsStrategy {
    pub fn new(config: MctsConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: make_rng(seed),
        })
    }
}

impl Strategy for MctsStrategy {
    fn name(&self) -> &str {
        StrategyKind::Mcts.as_str()
    }

    fn choose_move(&mut self, state: &GameState, player: Player) -> Result<Move> {
        let result = mcts::run_mcts(
            state,
            player,
            self.config.clone(),
            &RandomPlayout,
            &mut self.rng,
        )?;
        debug!(
            player = %player,
            mv = result.mv,
            root_games = result.tree.root_games,
            nodes = result.tree.total_nodes,
            "MCTS move"
        );
        Ok(result.mv)
    }

    fn iterations(&self) -> Option<u32> {
        Some(self.config.iterations)
    }
}

/// Uniformly random legal move. Baseline opponent.
pub struct RandomStrategy {
    rng: ChaCha20Rng,
}

impl RandomStrategy {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: make_rng(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        StrategyKind::Random.as_str()
    }

    fn choose_move(&mut self, state: &GameState, _player: Player) -> Result<Move> {
        state
            .empty_cells()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow!("no empty cell left to play"))
    }
}

/// Build the strategy for one seat.
pub fn build_strategy(
    kind: StrategyKind,
    alphabeta: AlphaBetaConfig,
    mcts: MctsConfig,
    seed: Option<u64>,
) -> Result<Box<dyn Strategy>> {
    Ok(match kind {
        StrategyKind::AlphaBeta => Box::new(AlphaBetaStrategy::new(alphabeta)?),
        StrategyKind::Mcts => Box::new(MctsStrategy::new(mcts, seed)?),
        StrategyKind::Random => Box::new(RandomStrategy::new(seed)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(moves: &[(Move, Player)]) -> GameState {
        let mut state = GameState::new(3, 3, 3).unwrap();
        for &(mv, p) in moves {
            state.apply_move(mv, p).unwrap();
        }
        state
    }

    #[test]
    fn test_parse_strategy_kind() {
        assert_eq!("alphabeta".parse::<StrategyKind>().unwrap(), StrategyKind::AlphaBeta);
        assert_eq!("Alpha-Beta".parse::<StrategyKind>().unwrap(), StrategyKind::AlphaBeta);
        assert_eq!("MCTS".parse::<StrategyKind>().unwrap(), StrategyKind::Mcts);
        assert_eq!("random".parse::<StrategyKind>().unwrap(), StrategyKind::Random);

        let err = "minimax".parse::<StrategyKind>().unwrap_err();
        assert!(err.to_string().contains("unknown strategy"));
    }

    #[test]
    fn test_kind_display_matches_name() {
        for kind in [StrategyKind::AlphaBeta, StrategyKind::Mcts, StrategyKind::Random] {
            let strategy = build_strategy(
                kind,
                AlphaBetaConfig::default(),
                MctsConfig::for_testing(),
                Some(1),
            )
            .unwrap();
            assert_eq!(strategy.name(), kind.to_string());
        }
    }

    #[test]
    fn test_random_strategy_picks_empty_cells() {
        let state = board(&[(0, Player::One), (4, Player::Two), (8, Player::One)]);
        let mut strategy = RandomStrategy::new(Some(7));
        for _ in 0..50 {
            let mv = strategy.choose_move(&state, Player::Two).unwrap();
            assert!(state.cell(mv).unwrap().is_empty());
        }
    }

    #[test]
    fn test_random_strategy_same_seed_same_moves() {
        let state = GameState::new(5, 5, 4).unwrap();
        let mut a = RandomStrategy::new(Some(99));
        let mut b = RandomStrategy::new(Some(99));
        for _ in 0..20 {
            assert_eq!(
                a.choose_move(&state, Player::One).unwrap(),
                b.choose_move(&state, Player::One).unwrap()
            );
        }
    }

    #[test]
    fn test_random_strategy_full_board_fails() {
        let mut state = GameState::new(1, 2, 2).unwrap();
        state.apply_move(0, Player::One).unwrap();
        state.apply_move(1, Player::Two).unwrap();
        assert!(RandomStrategy::new(Some(1))
            .choose_move(&state, Player::One)
            .is_err());
    }

    #[test]
    fn test_search_strategies_take_the_win() {
        // X X _ / O O _ / _ _ _
        let state = board(&[
            (0, Player::One),
            (3, Player::Two),
            (1, Player::One),
            (4, Player::Two),
        ]);
        let mut ab = AlphaBetaStrategy::new(AlphaBetaConfig::default()).unwrap();
        assert_eq!(ab.choose_move(&state, Player::One).unwrap(), 2);

        let mut mcts = MctsStrategy::new(MctsConfig::for_testing(), Some(3)).unwrap();
        assert_eq!(mcts.choose_move(&state, Player::One).unwrap(), 2);
    }

    #[test]
    fn test_iterations_reported_for_mcts_only() {
        let mcts = MctsStrategy::new(MctsConfig::default().with_iterations(321), Some(1)).unwrap();
        assert_eq!(mcts.iterations(), Some(321));

        let ab = AlphaBetaStrategy::new(AlphaBetaConfig::default()).unwrap();
        assert_eq!(ab.iterations(), None);
        assert_eq!(RandomStrategy::new(None).iterations(), None);
    }

    #[test]
    fn test_invalid_search_config_rejected() {
        assert!(AlphaBetaStrategy::new(AlphaBetaConfig::default().with_depth(0)).is_err());
        assert!(MctsStrategy::new(MctsConfig::default().with_iterations(0), None).is_err());
    }
}
