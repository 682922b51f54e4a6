//! Outcome scoring shared by the search engines.

use crate::cell::Player;

/// Minimax utility of a finished (or cut-off) game for `root`.
///
/// # Returns
/// * `1` if `root` won
/// * `-1` if the opponent won
/// * `0` for a tie or an unresolved position
///
/// # Example
/// ```
/// use mnk_core::{utility_for, Player};
///
/// assert_eq!(utility_for(Some(Player::One), Player::One), 1);
/// assert_eq!(utility_for(Some(Player::Two), Player::One), -1);
/// assert_eq!(utility_for(None, Player::Two), 0);
/// ```
#[inline]
pub fn utility_for(winner: Option<Player>, root: Player) -> i32 {
    match winner {
        Some(p) if p == root => 1,
        Some(_) => -1,
        None => 0,
    }
}

/// Playout reward for `perspective`: 1.0 win, 0.5 tie, 0.0 loss.
///
/// # Example
/// ```
/// use mnk_core::{playout_score, Player};
///
/// assert_eq!(playout_score(Some(Player::Two), Player::Two), 1.0);
/// assert_eq!(playout_score(None, Player::Two), 0.5);
/// assert_eq!(playout_score(Some(Player::One), Player::Two), 0.0);
/// ```
#[inline]
pub fn playout_score(winner: Option<Player>, perspective: Player) -> f64 {
    match winner {
        Some(p) if p == perspective => 1.0,
        Some(_) => 0.0,
        None => 0.5,
    }
}
