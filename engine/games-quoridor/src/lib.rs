//! Quoridor game implementation for the search engine
//!
//! Two players race their pawns across an `n x n` grid. On each turn a player
//! either moves their pawn or places a two-cell wall, with the constraint that
//! a wall may never cut either player off from their goal row.
//!
//! # Board Layout
//!
//! North is `+y`. Player One starts at `(n/2, 0)` and races to row `n-1`;
//! player Two starts at `(n/2, n-1)` and races to row `0`.
//!
//! ```text
//! y=4   .   .   2   .   .      <- One's goal row
//! y=3   .   .   .   .   .
//! y=2   .   .   .   .   .
//! y=1   .   .   .   .   .
//! y=0   .   .   1   .   .      <- Two's goal row
//!      x=0  1   2   3   4
//! ```
//!
//! # Frames
//!
//! Through the [`Game`] trait, actions are expressed in the acting player's
//! canonical frame: for One the board as-is, for Two the board rotated by
//! 180 degrees with the roles swapped. Callers can pick an action on
//! `canonical_view(state, player)` and pass it straight to `next_state`.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, Player};
//! use games_quoridor::Quoridor;
//!
//! let game = Quoridor::new(9).unwrap();
//! let state = game.initial_state();
//! let (state, next) = game.next_state(&state, Player::One, 0).unwrap();
//! assert_eq!(next, Player::Two);
//! assert_eq!(state.ply(), 1);
//! ```

pub mod action;
pub mod board;
pub mod error;
pub mod heuristic;
pub mod observation;
pub mod pathfind;
pub mod symmetry;
pub mod walls;

pub use action::{ActionCodec, Diagonal, Direction, Move, Orientation, PAWN_ACTIONS};
pub use board::{
    default_max_plies, default_walls_per_player, Board, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
pub use error::{QuoridorError, WallRejection};
pub use heuristic::PathDistanceEvaluator;
pub use pathfind::Pathfinder;
pub use symmetry::{make_canonical, mirror_action, rotate_action, symmetric_forms};
pub use walls::{Cell, WallGrid};

use engine_config::GameConfig;
use engine_core::{Game, GameResult, Player};
use tracing::debug;

/// Quoridor rules for one board size
#[derive(Debug, Clone)]
pub struct Quoridor {
    initial: Board,
    codec: ActionCodec,
}

impl Quoridor {
    /// Game on an `n x n` board with default inventories and ply limit
    pub fn new(board_size: usize) -> Result<Self, QuoridorError> {
        Ok(Self::from_board(Board::new(board_size)?))
    }

    /// Game with explicit wall inventory and ply limit
    pub fn with_limits(
        board_size: usize,
        walls_per_player: usize,
        max_plies: usize,
    ) -> Result<Self, QuoridorError> {
        Ok(Self::from_board(Board::with_limits(
            board_size,
            walls_per_player,
            max_plies,
        )?))
    }

    /// Build from the `[game]` config section. Zero inventory or ply limit
    /// means "derive from the board size".
    pub fn from_config(config: &GameConfig) -> Result<Self, QuoridorError> {
        let n = config.board_size;
        let walls = match config.walls_per_player {
            0 => default_walls_per_player(n),
            w => w,
        };
        let max_plies = match config.max_plies {
            0 => default_max_plies(n),
            p => p,
        };
        debug!(
            board_size = n,
            walls_per_player = walls,
            max_plies,
            "Configuring Quoridor"
        );
        Self::with_limits(n, walls, max_plies)
    }

    fn from_board(initial: Board) -> Self {
        Self {
            codec: initial.codec(),
            initial,
        }
    }

    pub fn board_size(&self) -> usize {
        self.initial.size()
    }

    pub fn codec(&self) -> &ActionCodec {
        &self.codec
    }
}

impl Game for Quoridor {
    type State = Board;
    type Fingerprint = Board;
    type Error = QuoridorError;

    fn action_size(&self) -> usize {
        self.codec.action_size()
    }

    fn initial_state(&self) -> Board {
        self.initial
    }

    fn next_state(
        &self,
        state: &Board,
        player: Player,
        action: usize,
    ) -> Result<(Board, Player), QuoridorError> {
        let size = self.action_size();
        if action >= size {
            return Err(QuoridorError::ActionOutOfRange { action, size });
        }
        if state.is_terminal() {
            return Err(QuoridorError::GameOver);
        }
        if player != state.to_move() {
            return Err(QuoridorError::NotPlayersTurn {
                player,
                to_move: state.to_move(),
            });
        }
        let canonical = make_canonical(state, player);
        let next = canonical.apply_action(Player::One, action)?;
        Ok((make_canonical(&next, player), player.opponent()))
    }

    fn legal_action_mask(&self, state: &Board, player: Player) -> Vec<bool> {
        make_canonical(state, player).legal_action_mask(Player::One)
    }

    fn result(&self, state: &Board, player: Player) -> GameResult {
        state.outcome(player)
    }

    fn canonical_view(&self, state: &Board, player: Player) -> Board {
        make_canonical(state, player)
    }

    fn fingerprint(&self, state: &Board) -> Board {
        *state
    }

    fn symmetries(&self, state: &Board, policy: &[f32]) -> Vec<(Board, Vec<f32>)> {
        symmetric_forms(state, policy)
    }
}
