//! Search tree for one MCTS decision.
//!
//! All nodes live in one `Vec` and point at each other by [`NodeId`]. A
//! parent link is a plain index, so the tree never owns a cycle, and the
//! whole tree is dropped with the search.

use mnk_core::{BoardError, GameState, Move, Player};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::node::{MctsNode, NodeId};

/// Scores closer than this are treated as tied.
const SCORE_EPSILON: f64 = 1e-12;

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree {
    nodes: Vec<MctsNode>,
    root: NodeId,
}

impl MctsTree {
    /// Create a new tree for `to_move` choosing a move on `state`.
    pub fn new(state: GameState, to_move: Player) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(state, to_move)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node, in allocation order.
    #[inline]
    pub fn arena(&self) -> &[MctsNode] {
        &self.nodes
    }

    /// Play the untried move `mv` from `parent_id` and attach the result as
    /// a new child. Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, mv: Move) -> Result<NodeId, BoardError> {
        let parent = self.get(parent_id);
        let mover = parent.to_move();
        let mut state = parent.state.clone();
        state.apply_move(mv, mover)?;
        state.is_terminal(mv, mover);

        let child_id = self.allocate(MctsNode::new_child(parent_id, mv, mover, state));

        let parent = self.get_mut(parent_id);
        if let Some(pos) = parent.untried.iter().position(|&m| m == mv) {
            parent.untried.swap_remove(pos);
        }
        parent.children.push(child_id);

        Ok(child_id)
    }

    /// Create a child for every untried move of `node_id`, in row-major order.
    pub fn expand_all(&mut self, node_id: NodeId) -> Result<(), BoardError> {
        let mut moves = std::mem::take(&mut self.get_mut(node_id).untried);
        moves.sort_unstable();
        for mv in moves {
            self.add_child(node_id, mv)?;
        }
        Ok(())
    }

    /// First expanded child of `node_id` whose move wins on the spot.
    pub fn winning_child(&self, node_id: NodeId) -> Option<NodeId> {
        self.get(node_id)
            .children
            .iter()
            .copied()
            .find(|&id| self.get(id).is_winning)
    }

    /// Select a child of `node_id`.
    ///
    /// 1. A child whose move wins outright for its mover is taken immediately.
    /// 2. Otherwise, if any child is unvisited, one of those is picked
    ///    uniformly at random so every child is tried once before UCT.
    /// 3. Otherwise the highest UCT score wins, ties broken uniformly at random.
    ///
    /// Returns None if the node has no children.
    pub fn select_child<R: Rng + ?Sized>(
        &self,
        node_id: NodeId,
        uct_const: f64,
        rng: &mut R,
    ) -> Option<NodeId> {
        if let Some(winning) = self.winning_child(node_id) {
            return Some(winning);
        }
        let node = self.get(node_id);

        let unvisited: Vec<NodeId> = node
            .children
            .iter()
            .copied()
            .filter(|&id| self.get(id).games == 0)
            .collect();
        if !unvisited.is_empty() {
            return unvisited.choose(rng).copied();
        }

        // Pre-compute ln once instead of per-child comparison
        let parent_games_ln = (node.games.max(1) as f64).ln();
        let mut best_score = f64::NEG_INFINITY;
        let mut best: Vec<NodeId> = Vec::new();
        for &id in &node.children {
            let score = self.get(id).uct_score(parent_games_ln, uct_const);
            if score > best_score + SCORE_EPSILON {
                best_score = score;
                best.clear();
                best.push(id);
            } else if (score - best_score).abs() <= SCORE_EPSILON {
                best.push(id);
            }
        }
        best.choose(rng).copied()
    }

    /// Backpropagate a playout result from `leaf_id` to the root.
    ///
    /// `result` is from the leaf mover's perspective. Every node on the way
    /// gets one more game, and the credit is flipped (`1 - result`) for
    /// nodes whose mover is the other player.
    pub fn backpropagate(&mut self, leaf_id: NodeId, result: f64) {
        let leaf_mover = self.get(leaf_id).mover;
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.games += 1;
            node.wins += if node.mover == leaf_mover {
                result
            } else {
                1.0 - result
            };
            current_id = node.parent;
        }
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_games: root.games,
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|id| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_games: u32,
    pub max_depth: u32,
}
