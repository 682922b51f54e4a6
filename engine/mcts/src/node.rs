//! MCTS tree node representation.
//!
//! Each node owns the board reached by playing `mv` from its parent. Win
//! statistics are kept from the perspective of `mover`, the player who made
//! that move, so a parent picking among its children maximizes its own
//! win rate directly.

use mnk_core::{GameState, Move, Player};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move that led to this node from parent (None for root)
    pub mv: Option<Move>,

    /// Player who made `mv`. For the root this is the opponent of the
    /// player to move.
    pub mover: Player,

    /// Board after `mv`
    pub state: GameState,

    /// Playout credit for `mover`: 1 per win, 0.5 per tie
    pub wins: f64,

    /// Number of iterations that passed through this node
    pub games: u32,

    /// Whether the game is over at this node
    pub is_terminal: bool,

    /// `mv` completed a run for `mover`
    pub is_winning: bool,

    /// Expanded children, in creation order
    pub children: Vec<NodeId>,

    /// Empty cells that have no child yet
    pub untried: Vec<Move>,
}

impl MctsNode {
    /// Create a root node for `to_move` choosing a move on `state`.
    pub fn new_root(state: GameState, to_move: Player) -> Self {
        let untried = state.empty_cells();
        Self {
            parent: NodeId::NONE,
            mv: None,
            mover: to_move.other(),
            is_terminal: state.is_game_over() || untried.is_empty(),
            is_winning: false,
            state,
            wins: 0.0,
            games: 0,
            children: Vec::new(),
            untried,
        }
    }

    /// Create a child node for `mover` having played `mv`; `state` already
    /// has the move applied and its terminal check evaluated.
    pub fn new_child(parent: NodeId, mv: Move, mover: Player, state: GameState) -> Self {
        let is_terminal = state.is_game_over();
        let is_winning = state.winner() == Some(mover);
        let untried = if is_terminal {
            Vec::new()
        } else {
            state.empty_cells()
        };
        Self {
            parent,
            mv: Some(mv),
            mover,
            state,
            wins: 0.0,
            games: 0,
            is_terminal,
            is_winning,
            children: Vec::new(),
            untried,
        }
    }

    /// Player to move at this node.
    #[inline]
    pub fn to_move(&self) -> Player {
        self.mover.other()
    }

    /// wins / games, or 0.0 if never visited.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins / self.games as f64
        }
    }

    /// UCT score for selection by the parent:
    /// `wins/games + c * sqrt(ln(N_parent) / games)`.
    ///
    /// Unvisited nodes score 0.0. Selection never compares them by score
    /// since every child is tried once before UCT applies.
    ///
    /// Takes pre-computed ln(parent games) so siblings share one `ln` call.
    #[inline]
    pub fn uct_score(&self, parent_games_ln: f64, c: f64) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        let games = self.games as f64;
        self.wins / games + c * (parent_games_ln / games).sqrt()
    }

    /// No untried moves remain.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Tree descent stops here: the game is over or a move is still untried.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_terminal || !self.is_fully_expanded() || self.children.is_empty()
    }
}
