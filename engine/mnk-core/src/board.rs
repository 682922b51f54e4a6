//! The m,n,k board and its win detection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::{CellValue, Player};
use crate::codec::BoardRecord;
use crate::error::BoardError;

/// A move is a row-major index into the flattened cell grid.
pub type Move = usize;

/// Line directions as (row delta, col delta): row, column, main diagonal, anti-diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Board state for one m,n,k game.
///
/// `game_over` and `winner` are caches, written by [`check_win`] and rolled
/// back only through [`undo`].
///
/// The one exception is the full-board rule: when a move fills the last cell,
/// [`apply_move`] runs [`check_win`] itself and [`is_terminal`] sets
/// `game_over`, so a filled board is always over, with or without a winner.
/// A mid-game move that completes a run leaves both flags alone until
/// [`check_win`] is called.
///
/// [`check_win`]: GameState::check_win
/// [`apply_move`]: GameState::apply_move
/// [`is_terminal`]: GameState::is_terminal
/// [`undo`]: GameState::undo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord", into = "BoardRecord")]
pub struct GameState {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) k: usize,
    pub(crate) cells: Vec<CellValue>,
    /// Number of non-empty cells, kept in sync with `cells`.
    pub(crate) filled: usize,
    pub(crate) game_over: bool,
    pub(crate) winner: Option<Player>,
}

/// Everything needed to take back one [`GameState::apply_undoable`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoMove {
    pub mv: Move,
    game_over: bool,
    winner: Option<Player>,
}

impl GameState {
    /// Create an empty `rows x cols` board needing `k` in a row.
    ///
    /// Fails with [`BoardError::Configuration`] when a dimension is zero or
    /// when `k` cannot fit on the board in any direction.
    pub fn new(rows: usize, cols: usize, k: usize) -> Result<Self, BoardError> {
        validate_dimensions(rows, cols, k)?;
        Ok(Self {
            rows,
            cols,
            k,
            cells: vec![CellValue::Empty; rows * cols],
            filled: 0,
            game_over: false,
            winner: None,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Total number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Cell contents, or `None` when `mv` is off the board.
    #[inline]
    pub fn cell(&self, mv: Move) -> Option<CellValue> {
        self.cells.get(mv).copied()
    }

    #[inline]
    pub fn filled_count(&self) -> usize {
        self.filled
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled == self.cells.len()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    #[inline]
    pub fn to_coords(&self, mv: Move) -> (usize, usize) {
        (mv / self.cols, mv % self.cols)
    }

    #[inline]
    pub fn to_index(&self, row: usize, col: usize) -> Move {
        row * self.cols + col
    }

    /// All empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// Place `player`'s mark on `mv`.
    ///
    /// When the move fills the last empty cell the win check runs anchored on
    /// this move and the game is marked over, won or tied. Otherwise the
    /// caller decides when to call [`check_win`](Self::check_win).
    pub fn apply_move(&mut self, mv: Move, player: Player) -> Result<(), BoardError> {
        match self.cells.get(mv) {
            None => {
                return Err(BoardError::InvalidMove {
                    mv,
                    reason: format!("out of range for a board of {} cells", self.cells.len()),
                })
            }
            Some(cell) if !cell.is_empty() => {
                return Err(BoardError::InvalidMove {
                    mv,
                    reason: "cell is already occupied".to_string(),
                })
            }
            Some(_) => {}
        }

        self.cells[mv] = player.cell();
        self.filled += 1;

        if self.is_full() {
            self.check_win(mv, player);
            self.game_over = true;
        }
        Ok(())
    }

    /// Apply a move and return the token that restores the board exactly,
    /// cached flags included.
    pub fn apply_undoable(&mut self, mv: Move, player: Player) -> Result<UndoMove, BoardError> {
        let undo = UndoMove {
            mv,
            game_over: self.game_over,
            winner: self.winner,
        };
        self.apply_move(mv, player)?;
        Ok(undo)
    }

    /// Take back a move made by [`apply_undoable`](Self::apply_undoable).
    ///
    /// Undo tokens must be replayed in reverse order of application.
    pub fn undo(&mut self, undo: UndoMove) {
        if let Some(cell) = self.cells.get_mut(undo.mv) {
            if !cell.is_empty() {
                *cell = CellValue::Empty;
                self.filled -= 1;
            }
        }
        self.game_over = undo.game_over;
        self.winner = undo.winner;
    }

    /// Scan the full row, column and both diagonals through `mv` for a run of
    /// `k` marks belonging to `player`.
    ///
    /// On success the game is marked over with `player` as winner. A miss
    /// leaves the cached flags untouched.
    pub fn check_win(&mut self, mv: Move, player: Player) -> bool {
        if mv >= self.cells.len() || !self.has_run_through(mv, player, false) {
            return false;
        }
        self.game_over = true;
        self.winner = Some(player);
        true
    }

    /// True when `player`'s move at `mv` won, or the board is full.
    pub fn is_terminal(&mut self, mv: Move, player: Player) -> bool {
        let won = self.check_win(mv, player);
        if self.is_full() {
            self.game_over = true;
        }
        won || self.game_over
    }

    pub fn is_tie(&self) -> bool {
        self.is_full() && self.winner.is_none()
    }

    pub fn is_loss_for(&self, player: Player) -> bool {
        self.is_full() && !self.is_tie() && self.winner != Some(player)
    }

    /// Would playing the empty cell `mv` complete a run for either player?
    ///
    /// Never mutates the board. Occupied or out-of-range cells are never
    /// immediate wins.
    pub fn is_immediate_win(&self, mv: Move) -> bool {
        Player::ALL.iter().any(|&p| self.would_win(mv, p))
    }

    /// Would `player` win by playing the empty cell `mv`?
    pub fn would_win(&self, mv: Move, player: Player) -> bool {
        match self.cells.get(mv) {
            Some(cell) if cell.is_empty() => self.has_run_through(mv, player, true),
            _ => false,
        }
    }

    /// Number of occupied cells among the (up to) eight neighbours of `mv`.
    pub fn occupied_neighbors(&self, mv: Move) -> usize {
        if mv >= self.cells.len() {
            return 0;
        }
        let (row, col) = self.to_coords(mv);
        let mut count = 0;
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(n) = self.offset(row, col, dr, dc) {
                    if !self.cells[n].is_empty() {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    /// Index of `(row + dr, col + dc)` if it lies on the board.
    #[inline]
    fn offset(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<Move> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < self.rows && c < self.cols).then(|| self.to_index(r, c))
    }

    /// Full-line run detection through `mv` in all four directions.
    ///
    /// With `assume_placed` the cell at `mv` counts as `player`'s mark
    /// whatever it holds, which lets the speculative checks avoid a copy.
    fn has_run_through(&self, mv: Move, player: Player, assume_placed: bool) -> bool {
        let mark = player.cell();
        let (row, col) = self.to_coords(mv);

        for (dr, dc) in DIRECTIONS {
            // Walk back to where this line enters the board.
            let (mut r, mut c) = (row, col);
            while let Some(prev) = self.offset(r, c, -dr, -dc) {
                (r, c) = self.to_coords(prev);
            }

            let mut run = 0;
            let mut pos = Some(self.to_index(r, c));
            while let Some(idx) = pos {
                let owned = (assume_placed && idx == mv) || self.cells[idx] == mark;
                if owned {
                    run += 1;
                    if run >= self.k {
                        return true;
                    }
                } else {
                    run = 0;
                }
                let (r, c) = self.to_coords(idx);
                pos = self.offset(r, c, dr, dc);
            }
        }
        false
    }
}

pub(crate) fn validate_dimensions(rows: usize, cols: usize, k: usize) -> Result<(), BoardError> {
    if rows == 0 || cols == 0 {
        return Err(BoardError::Configuration(format!(
            "board dimensions must be positive, got {}x{}",
            rows, cols
        )));
    }
    if k == 0 || k > rows.max(cols) {
        return Err(BoardError::Configuration(format!(
            "k={} cannot fit on a {}x{} board",
            k, rows, cols
        )));
    }
    Ok(())
}

impl fmt::Display for GameState {
    /// Grid view: empty cells show their index, occupied cells `X` or `O`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.cells.len().saturating_sub(1)).to_string().len();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = self.to_index(row, col);
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.cells[idx].player() {
                    Some(p) => write!(f, "{:>width$}", p.symbol(), width = width)?,
                    None => write!(f, "{:>width$}", idx, width = width)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
