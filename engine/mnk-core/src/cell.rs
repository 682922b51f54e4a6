//! Cell occupancy and player identities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Contents of a single board cell.
///
/// The discriminants double as the byte encoding used by the binary codec:
/// 0=empty, 1=player one (X), 2=player two (O).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellValue {
    #[default]
    Empty = 0,
    PlayerOne = 1,
    PlayerTwo = 2,
}

impl CellValue {
    /// The player owning this cell, if any.
    #[inline]
    pub fn player(self) -> Option<Player> {
        match self {
            CellValue::Empty => None,
            CellValue::PlayerOne => Some(Player::One),
            CellValue::PlayerTwo => Some(Player::Two),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == CellValue::Empty
    }

    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Decode a cell byte. Returns `None` for anything other than 0, 1 or 2.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(CellValue::Empty),
            1 => Some(CellValue::PlayerOne),
            2 => Some(CellValue::PlayerTwo),
            _ => None,
        }
    }
}

/// One of the two players. Player one (X) always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// The opponent.
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The mark this player leaves on the board.
    #[inline]
    pub fn cell(self) -> CellValue {
        match self {
            Player::One => CellValue::PlayerOne,
            Player::Two => CellValue::PlayerTwo,
        }
    }

    /// 1 for player one, 2 for player two.
    #[inline]
    pub fn number(self) -> u8 {
        self.cell().to_u8()
    }

    pub fn symbol(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {} ({})", self.number(), self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.other(), Player::One);
        assert_eq!(Player::One.other().other(), Player::One);
    }

    #[test]
    fn test_cell_byte_encoding() {
        for cell in [CellValue::Empty, CellValue::PlayerOne, CellValue::PlayerTwo] {
            assert_eq!(CellValue::from_u8(cell.to_u8()), Some(cell));
        }
        assert_eq!(CellValue::from_u8(3), None);
    }

    #[test]
    fn test_cell_player_mapping() {
        assert_eq!(CellValue::Empty.player(), None);
        assert_eq!(Player::One.cell().player(), Some(Player::One));
        assert_eq!(Player::Two.cell().player(), Some(Player::Two));
        assert_eq!(Player::Two.number(), 2);
    }
}
