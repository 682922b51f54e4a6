//! MCTS search implementation.
//!
//! Implements the UCT loop, repeated `iterations` times:
//! 1. Selection: descend from the root via [`MctsTree::select_child`] until a
//!    terminal node or one with untried moves
//! 2. Expansion: add one child, picked by the ranking policy with probability
//!    `expand_policy_prob`, uniformly at random otherwise
//! 3. Simulation: play the new leaf out with a [`Playout`]
//! 4. Backpropagation: update games/wins along the path to the root
//!
//! The final move is the root child picked by the same selection rule.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use mnk_core::ordering::best_ranked;
use mnk_core::{playout_score, BoardError, GameState, Move, Player};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::playout::{Playout, RandomPlayout};
use crate::tree::{MctsTree, TreeStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No legal move available")]
    NoLegalMove,

    #[error("Invalid search configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Visit statistics for one root child.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats {
    pub mv: Move,
    pub wins: f64,
    pub games: u32,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Move to play
    pub mv: Move,

    /// Iterations actually run (less than configured if stopped early)
    pub iterations: u32,

    /// Root child statistics in row-major move order
    pub children: Vec<ChildStats>,

    /// Tree shape at the end of the search
    pub tree: TreeStats,

    pub elapsed: Duration,
}

/// MCTS search state.
pub struct MctsSearch<'a, P: Playout> {
    tree: MctsTree,
    playout: &'a P,
    config: MctsConfig,
    stop: Option<Arc<AtomicBool>>,
}

impl<'a, P: Playout> MctsSearch<'a, P> {
    /// Create a new MCTS search for `player` moving on `state`.
    ///
    /// The root gets one child per empty cell up front.
    pub fn new(
        state: &GameState,
        player: Player,
        config: MctsConfig,
        playout: &'a P,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        if state.is_full() {
            return Err(SearchError::NoLegalMove);
        }

        let mut tree = MctsTree::new(state.clone(), player);
        tree.expand_all(tree.root())?;

        Ok(Self {
            tree,
            playout,
            config,
            stop: None,
        })
    }

    /// Stop between iterations once `flag` is set. At least one iteration
    /// always runs.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    /// Run the search for the configured number of iterations.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, SearchError> {
        let start = Instant::now();
        let mut iterations = 0;

        while iterations < self.config.iterations {
            self.iterate(rng)?;
            iterations += 1;

            if self.stop_requested() {
                debug!(iterations, "MCTS stopped early");
                break;
            }
        }

        let root_id = self.tree.root();
        let chosen = self
            .tree
            .select_child(root_id, self.config.uct_const, rng)
            .ok_or(SearchError::NoLegalMove)?;
        let mv = self.tree.get(chosen).mv.ok_or(SearchError::NoLegalMove)?;

        let children = self
            .tree
            .get(root_id)
            .children
            .iter()
            .filter_map(|&id| {
                let child = self.tree.get(id);
                child.mv.map(|mv| ChildStats {
                    mv,
                    wins: child.wins,
                    games: child.games,
                })
            })
            .collect();

        let result = SearchResult {
            mv,
            iterations,
            children,
            tree: self.tree.stats(),
            elapsed: start.elapsed(),
        };

        debug!(
            mv = result.mv,
            iterations = result.iterations,
            nodes = result.tree.total_nodes,
            win_rate = self.tree.get(chosen).win_rate(),
            elapsed_ms = result.elapsed.as_millis() as u64,
            "MCTS search complete"
        );

        Ok(result)
    }

    /// Run a single iteration (select -> expand -> simulate -> backpropagate).
    fn iterate(&mut self, rng: &mut ChaCha20Rng) -> Result<(), SearchError> {
        let selected = self.select(rng);
        let leaf_id = self.expand(selected, rng)?;
        let result = self.simulate(leaf_id, rng)?;
        self.tree.backpropagate(leaf_id, result);

        trace!(
            selected = selected.0,
            leaf = leaf_id.0,
            result = result,
            "MCTS iteration complete"
        );

        Ok(())
    }

    /// Descend from the root until a terminal node, a node with untried
    /// moves, or a move that wins on the spot. An expanded winning child is
    /// taken even when its parent still has untried moves.
    fn select(&self, rng: &mut ChaCha20Rng) -> NodeId {
        let mut current = self.tree.root();

        loop {
            if let Some(winning) = self.tree.winning_child(current) {
                current = winning;
                break;
            }

            let node = self.tree.get(current);
            if node.is_leaf() {
                break;
            }

            match self
                .tree
                .select_child(current, self.config.uct_const, rng)
            {
                Some(child_id) => {
                    current = child_id;
                    if self.tree.get(child_id).is_winning {
                        break;
                    }
                }
                None => break,
            }
        }

        current
    }

    /// Add one child below `node_id`. Terminal nodes are returned unchanged.
    fn expand(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) -> Result<NodeId, SearchError> {
        let node = self.tree.get(node_id);
        if node.is_terminal || node.untried.is_empty() {
            return Ok(node_id);
        }

        let mv = if rng.gen::<f64>() < self.config.expand_policy_prob {
            best_ranked(&node.state, &node.untried)
        } else {
            Some(node.untried[rng.gen_range(0..node.untried.len())])
        };

        match mv {
            Some(mv) => Ok(self.tree.add_child(node_id, mv)?),
            None => Ok(node_id),
        }
    }

    /// Playout reward for the leaf's mover.
    fn simulate(&self, leaf_id: NodeId, rng: &mut ChaCha20Rng) -> Result<f64, SearchError> {
        let leaf = self.tree.get(leaf_id);
        let winner = if leaf.is_terminal {
            leaf.state.winner()
        } else {
            self.playout.rollout(&leaf.state, leaf.to_move(), rng)?
        };
        Ok(playout_score(winner, leaf.mover))
    }

    fn stop_requested(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<P: Playout>(
    state: &GameState,
    player: Player,
    config: MctsConfig,
    playout: &P,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let mut search = MctsSearch::new(state, player, config, playout)?;
    search.run(rng)
}

/// Pick a move for `player` with random playouts.
pub fn choose_move(
    state: &GameState,
    player: Player,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<Move, SearchError> {
    run_mcts(state, player, config, &RandomPlayout, rng).map(|r| r.mv)
}
