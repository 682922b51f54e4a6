//! Serialization for [`GameState`].
//!
//! Two forms are supported:
//!
//! - A compact binary layout, little endian:
//!   `rows:u16 cols:u16 k:u16 game_over:u8 winner:u8` followed by one byte
//!   per cell (0 empty, 1 player one, 2 player two). `winner` is 0 for none.
//! - A serde record ([`BoardRecord`]) that deserializes through the same
//!   validation, so malformed JSON cannot produce an inconsistent board.

use serde::{Deserialize, Serialize};

use crate::board::{validate_dimensions, GameState};
use crate::cell::{CellValue, Player};
use crate::error::DecodeError;

/// Bytes before the first cell.
pub const HEADER_LEN: usize = 8;

/// Wire form of a board used by serde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub rows: usize,
    pub cols: usize,
    pub k: usize,
    /// Row-major cell bytes (0, 1 or 2).
    pub cells: Vec<u8>,
    pub game_over: bool,
    pub winner: Option<Player>,
}

impl From<GameState> for BoardRecord {
    fn from(state: GameState) -> Self {
        Self {
            rows: state.rows,
            cols: state.cols,
            k: state.k,
            cells: state.cells.iter().map(|c| c.to_u8()).collect(),
            game_over: state.game_over,
            winner: state.winner,
        }
    }
}

impl TryFrom<BoardRecord> for GameState {
    type Error = DecodeError;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        GameState::from_parts(
            record.rows,
            record.cols,
            record.k,
            &record.cells,
            record.game_over,
            record.winner,
        )
    }
}

impl GameState {
    /// Append the binary encoding of this board to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.reserve(HEADER_LEN + self.cells.len());
        // dimensions past u16::MAX saturate; decode rejects the result
        for dim in [self.rows, self.cols, self.k] {
            out.extend_from_slice(&(dim.min(u16::MAX as usize) as u16).to_le_bytes());
        }
        out.push(self.game_over as u8);
        out.push(self.winner.map_or(0, Player::number));
        out.extend(self.cells.iter().map(|c| c.to_u8()));
    }

    /// Decode a board written by [`encode`](Self::encode).
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < HEADER_LEN {
            return Err(DecodeError::InvalidLength {
                expected: HEADER_LEN,
                actual: buf.len(),
            });
        }

        let read_u16 = |at: usize| u16::from_le_bytes([buf[at], buf[at + 1]]) as usize;
        let rows = read_u16(0);
        let cols = read_u16(2);
        let k = read_u16(4);

        let game_over = match buf[6] {
            0 => false,
            1 => true,
            other => {
                return Err(DecodeError::CorruptedData(format!(
                    "Invalid game_over flag: {}",
                    other
                )))
            }
        };
        let winner = match CellValue::from_u8(buf[7]) {
            Some(cell) => cell.player(),
            None => {
                return Err(DecodeError::CorruptedData(format!(
                    "Invalid winner: {}",
                    buf[7]
                )))
            }
        };

        let expected = HEADER_LEN + rows * cols;
        if buf.len() != expected {
            return Err(DecodeError::InvalidLength {
                expected,
                actual: buf.len(),
            });
        }

        Self::from_parts(rows, cols, k, &buf[HEADER_LEN..], game_over, winner)
    }

    /// Build a board from raw parts, checking that they describe a state
    /// reachable through normal play.
    fn from_parts(
        rows: usize,
        cols: usize,
        k: usize,
        raw_cells: &[u8],
        game_over: bool,
        winner: Option<Player>,
    ) -> Result<Self, DecodeError> {
        validate_dimensions(rows, cols, k)?;

        if raw_cells.len() != rows * cols {
            return Err(DecodeError::InvalidLength {
                expected: rows * cols,
                actual: raw_cells.len(),
            });
        }

        let cells = raw_cells
            .iter()
            .map(|&b| {
                CellValue::from_u8(b).ok_or_else(|| {
                    DecodeError::CorruptedData(format!("Invalid board cell: {}", b))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let filled = cells.iter().filter(|c| !c.is_empty()).count();

        if winner.is_some() && !game_over {
            return Err(DecodeError::CorruptedData(
                "winner set on a game that is not over".to_string(),
            ));
        }
        if game_over && winner.is_none() && filled != cells.len() {
            return Err(DecodeError::CorruptedData(
                "tied game with empty cells".to_string(),
            ));
        }

        Ok(Self {
            rows,
            cols,
            k,
            cells,
            filled,
            game_over,
            winner,
        })
    }
}
