//! Typed Game trait shared by game implementations and the search
//!
//! The trait follows the AlphaZero convention: states are plain values, actions
//! are flat indices into a fixed-size action space, and every query is made on
//! behalf of an explicit player so that search and evaluation can work on a
//! single canonical perspective.

use std::fmt::Debug;
use std::hash::Hash;

use crate::game_utils::{GameResult, Player};

/// Main trait for game implementations
///
/// # Type Parameters
///
/// * `State` - Game state, a cheap-to-clone value. Transitions return a new
///   state rather than mutating the old one.
/// * `Fingerprint` - Hashable key identifying a state, used by the search to
///   share nodes between transposed move orders.
/// * `Error` - Error raised when a caller requests an illegal transition.
///
/// # Example
///
/// ```rust
/// # use engine_core::{Game, GameResult, Player};
/// #[derive(Debug)]
/// struct Countdown;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("illegal action {0}")]
/// struct Illegal(usize);
///
/// impl Game for Countdown {
///     type State = u8;
///     type Fingerprint = u8;
///     type Error = Illegal;
///
///     fn action_size(&self) -> usize { 2 }
///     fn initial_state(&self) -> u8 { 5 }
///     fn next_state(&self, s: &u8, p: Player, a: usize) -> Result<(u8, Player), Illegal> {
///         if a >= 2 || *s == 0 { return Err(Illegal(a)); }
///         Ok((s.saturating_sub(a as u8 + 1), p.opponent()))
///     }
///     fn legal_action_mask(&self, s: &u8, _p: Player) -> Vec<bool> { vec![*s > 0, *s > 1] }
///     fn result(&self, s: &u8, _p: Player) -> GameResult {
///         if *s == 0 { GameResult::Loss } else { GameResult::Ongoing }
///     }
///     fn canonical_view(&self, s: &u8, _p: Player) -> u8 { *s }
///     fn fingerprint(&self, s: &u8) -> u8 { *s }
/// }
///
/// let game = Countdown;
/// let (next, player) = game.next_state(&game.initial_state(), Player::One, 1).unwrap();
/// assert_eq!((next, player), (3, Player::Two));
/// ```
pub trait Game: Send + Sync + Debug + 'static {
    /// Game state type - a value snapshot
    type State: Clone + Debug + Send + Sync + 'static;

    /// Hashable identity of a state
    type Fingerprint: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Error returned for rejected transitions
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of distinct action indices.
    fn action_size(&self) -> usize;

    /// State at the start of a game.
    fn initial_state(&self) -> Self::State;

    /// Apply `action` for `player` and return the successor state together
    /// with the player who moves next.
    ///
    /// The action is expressed in `player`'s canonical frame, so an action
    /// chosen on `canonical_view(state, player)` can be applied here unchanged.
    fn next_state(
        &self,
        state: &Self::State,
        player: Player,
        action: usize,
    ) -> Result<(Self::State, Player), Self::Error>;

    /// Fixed-length mask of legal actions for `player`, in `player`'s frame.
    fn legal_action_mask(&self, state: &Self::State, player: Player) -> Vec<bool>;

    /// Game status from `player`'s point of view.
    fn result(&self, state: &Self::State, player: Player) -> GameResult;

    /// The state as seen by `player`, re-oriented so that the viewer is
    /// always `Player::One`.
    fn canonical_view(&self, state: &Self::State, player: Player) -> Self::State;

    /// Hashable key for `state`.
    fn fingerprint(&self, state: &Self::State) -> Self::Fingerprint;

    /// Symmetric equivalents of `state` with the matching permutation of
    /// `policy`, used for training-data augmentation.
    ///
    /// The default implementation returns only the identity form.
    fn symmetries(&self, state: &Self::State, policy: &[f32]) -> Vec<(Self::State, Vec<f32>)> {
        vec![(state.clone(), policy.to_vec())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single-pile Nim: take one or two stones, taking the last stone wins.
    #[derive(Debug)]
    struct Nim;

    #[derive(Debug, thiserror::Error)]
    #[error("cannot take {0} stones")]
    struct NimError(usize);

    impl Game for Nim {
        type State = (u8, Player);
        type Fingerprint = (u8, Player);
        type Error = NimError;

        fn action_size(&self) -> usize {
            2
        }

        fn initial_state(&self) -> Self::State {
            (4, Player::One)
        }

        fn next_state(
            &self,
            state: &Self::State,
            player: Player,
            action: usize,
        ) -> Result<(Self::State, Player), NimError> {
            let take = action as u8 + 1;
            if action >= 2 || take > state.0 {
                return Err(NimError(take as usize));
            }
            Ok(((state.0 - take, player.opponent()), player.opponent()))
        }

        fn legal_action_mask(&self, state: &Self::State, _player: Player) -> Vec<bool> {
            vec![state.0 >= 1, state.0 >= 2]
        }

        fn result(&self, state: &Self::State, player: Player) -> GameResult {
            if state.0 > 0 {
                return GameResult::Ongoing;
            }
            // The player to move on an empty pile lost.
            GameResult::for_viewer(Some(state.1.opponent()), player)
        }

        fn canonical_view(&self, state: &Self::State, _player: Player) -> Self::State {
            *state
        }

        fn fingerprint(&self, state: &Self::State) -> Self::Fingerprint {
            *state
        }
    }

    #[test]
    fn test_game_basic_functionality() {
        let game = Nim;
        let state = game.initial_state();
        assert_eq!(game.legal_action_mask(&state, Player::One), vec![true, true]);
        assert_eq!(game.result(&state, Player::One), GameResult::Ongoing);

        let (state, player) = game.next_state(&state, Player::One, 0).unwrap();
        assert_eq!(state.0, 3);
        assert_eq!(player, Player::Two);
    }

    #[test]
    fn test_illegal_transition_is_error() {
        let game = Nim;
        let state = (1, Player::One);
        assert!(game.next_state(&state, Player::One, 1).is_err());
    }

    #[test]
    fn test_terminal_result_perspective() {
        let game = Nim;
        let (state, _) = game.next_state(&(2, Player::One), Player::One, 1).unwrap();
        assert_eq!(game.result(&state, Player::One), GameResult::Win);
        assert_eq!(game.result(&state, Player::Two), GameResult::Loss);
    }

    #[test]
    fn test_default_symmetries_is_identity() {
        let game = Nim;
        let state = game.initial_state();
        let forms = game.symmetries(&state, &[0.25, 0.75]);
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].0, state);
        assert_eq!(forms[0].1, vec![0.25, 0.75]);
    }
}
