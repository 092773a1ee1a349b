//! Shared utilities for two-player zero-sum games
//!
//! Player identity and game outcomes are shared by every game implementation
//! and by the search, so they live here rather than in each game crate.

use std::fmt;

/// One of the two seats in a two-player game.
///
/// `One` moves first. In the AlphaZero sign convention `One` is `+1` and
/// `Two` is `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// The other player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Array index (0 for `One`, 1 for `Two`).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Sign used by value targets: `+1` for `One`, `-1` for `Two`.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player one"),
            Player::Two => write!(f, "player two"),
        }
    }
}

/// Status of a game from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Ongoing,
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// Whether the game is over.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameResult::Ongoing)
    }

    /// Exact game value for the viewing player.
    ///
    /// # Example
    /// ```
    /// use engine_core::GameResult;
    ///
    /// assert_eq!(GameResult::Win.value(), 1.0);
    /// assert_eq!(GameResult::Loss.value(), -1.0);
    /// assert_eq!(GameResult::Draw.value(), 0.0);
    /// assert_eq!(GameResult::Ongoing.value(), 0.0);
    /// ```
    #[inline]
    pub fn value(self) -> f32 {
        match self {
            GameResult::Win => 1.0,
            GameResult::Loss => -1.0,
            GameResult::Draw | GameResult::Ongoing => 0.0,
        }
    }

    /// The same outcome seen from the other side of the board.
    #[inline]
    pub fn flipped(self) -> GameResult {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            other => other,
        }
    }

    /// Outcome for `viewer` given the winner (if any) of a finished game.
    pub fn for_viewer(winner: Option<Player>, viewer: Player) -> GameResult {
        match winner {
            Some(p) if p == viewer => GameResult::Win,
            Some(_) => GameResult::Loss,
            None => GameResult::Draw,
        }
    }
}

/// Count the set entries of a legal-action mask.
#[inline]
pub fn count_legal(mask: &[bool]) -> usize {
    mask.iter().filter(|&&legal| legal).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        for p in Player::ALL {
            assert_ne!(p, p.opponent());
            assert_eq!(p, p.opponent().opponent());
        }
    }

    #[test]
    fn test_player_index_and_sign() {
        assert_eq!(Player::One.index(), 0);
        assert_eq!(Player::Two.index(), 1);
        assert_eq!(Player::One.sign(), 1);
        assert_eq!(Player::Two.sign(), -1);
    }

    #[test]
    fn test_result_for_viewer() {
        assert_eq!(
            GameResult::for_viewer(Some(Player::One), Player::One),
            GameResult::Win
        );
        assert_eq!(
            GameResult::for_viewer(Some(Player::One), Player::Two),
            GameResult::Loss
        );
        assert_eq!(GameResult::for_viewer(None, Player::Two), GameResult::Draw);
    }

    #[test]
    fn test_flipped() {
        assert_eq!(GameResult::Win.flipped(), GameResult::Loss);
        assert_eq!(GameResult::Loss.flipped(), GameResult::Win);
        assert_eq!(GameResult::Draw.flipped(), GameResult::Draw);
        assert_eq!(GameResult::Ongoing.flipped(), GameResult::Ongoing);
    }

    #[test]
    fn test_terminal_flags() {
        assert!(!GameResult::Ongoing.is_terminal());
        assert!(GameResult::Win.is_terminal());
        assert!(GameResult::Loss.is_terminal());
        assert!(GameResult::Draw.is_terminal());
    }

    #[test]
    fn test_count_legal() {
        assert_eq!(count_legal(&[true, false, true, true]), 3);
        assert_eq!(count_legal(&[]), 0);
    }
}
