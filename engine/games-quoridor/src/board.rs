//! Board state and move generation.
//!
//! A [`Board`] is a small `Copy` value. Every transition returns a new board,
//! so the search can keep as many snapshots as it likes without aliasing.

use std::fmt;

use engine_core::{GameResult, Player};

use crate::action::{ActionCodec, Diagonal, Direction, Move, Orientation};
use crate::error::{QuoridorError, WallRejection};
use crate::pathfind::Pathfinder;
use crate::walls::{Cell, WallGrid};

/// Smallest supported board
pub const MIN_BOARD_SIZE: usize = 3;
/// Largest supported board; `(n-1)^2` wall slots must fit in a `u128`
pub const MAX_BOARD_SIZE: usize = 11;

/// Walls each player starts with on an `n x n` board (10 on 9x9)
pub fn default_walls_per_player(board_size: usize) -> usize {
    10 * board_size.saturating_sub(1) / 8
}

/// Ply limit after which an unfinished game is drawn
pub fn default_max_plies(board_size: usize) -> usize {
    4 * board_size * board_size
}

/// Complete game position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    walls: WallGrid,
    pawns: [Cell; 2],
    walls_left: [u8; 2],
    walls_per_player: u8,
    to_move: Player,
    ply: u16,
    max_plies: u16,
}

impl Board {
    /// Opening position with default wall inventory and ply limit
    pub fn new(board_size: usize) -> Result<Self, QuoridorError> {
        Self::with_limits(
            board_size,
            default_walls_per_player(board_size),
            default_max_plies(board_size),
        )
    }

    /// Opening position with explicit wall inventory and ply limit
    pub fn with_limits(
        board_size: usize,
        walls_per_player: usize,
        max_plies: usize,
    ) -> Result<Self, QuoridorError> {
        validate_board_size(board_size)?;
        let walls_per_player = u8::try_from(walls_per_player).map_err(|_| {
            QuoridorError::Configuration(format!(
                "walls_per_player must be at most {}, got {walls_per_player}",
                u8::MAX
            ))
        })?;
        let max_plies = u16::try_from(max_plies)
            .ok()
            .filter(|&plies| plies > 0)
            .ok_or_else(|| {
                QuoridorError::Configuration(format!(
                    "max_plies must be between 1 and {}, got {max_plies}",
                    u16::MAX
                ))
            })?;

        let mid = (board_size / 2) as u8;
        let far = (board_size - 1) as u8;
        Ok(Self {
            walls: WallGrid::new(board_size),
            pawns: [Cell::new(mid, 0), Cell::new(mid, far)],
            walls_left: [walls_per_player; 2],
            walls_per_player,
            to_move: Player::One,
            ply: 0,
            max_plies,
        })
    }

    // ------------------------------------------------------------------
    // Position setup
    // ------------------------------------------------------------------

    /// Move both pawns, e.g. to set up a test position.
    pub fn with_pawns(mut self, one: Cell, two: Cell) -> Result<Self, QuoridorError> {
        let n = self.size() as u8;
        if one.x >= n || one.y >= n || two.x >= n || two.y >= n {
            return Err(QuoridorError::Configuration(format!(
                "pawn positions {one:?} / {two:?} outside a {n}x{n} board"
            )));
        }
        if one == two {
            return Err(QuoridorError::Configuration(format!(
                "pawns cannot share cell {one:?}"
            )));
        }
        self.pawns = [one, two];
        Ok(self)
    }

    /// Add a wall without spending inventory. Slot conflicts and sealed paths
    /// are still rejected.
    pub fn with_wall(
        mut self,
        orientation: Orientation,
        x: u8,
        y: u8,
    ) -> Result<Self, QuoridorError> {
        let codec = self.codec();
        let action = codec.wall_action(x, y, orientation);
        if x as usize >= codec.slots_per_side() || y as usize >= codec.slots_per_side() {
            return Err(QuoridorError::ActionOutOfRange {
                action,
                size: codec.action_size(),
            });
        }
        let mut pathfinder = Pathfinder::new(self.size());
        self.walls = self
            .placed_wall(orientation, x, y, &mut pathfinder)
            .map_err(|reason| QuoridorError::InvalidWallPlacement { action, reason })?;
        Ok(self)
    }

    pub fn with_walls_left(mut self, one: u8, two: u8) -> Self {
        self.walls_left = [one, two];
        self
    }

    pub fn with_to_move(mut self, player: Player) -> Self {
        self.to_move = player;
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn size(&self) -> usize {
        self.walls.board_size()
    }

    pub fn codec(&self) -> ActionCodec {
        ActionCodec::new(self.size())
    }

    pub fn pawn(&self, player: Player) -> Cell {
        self.pawns[player.index()]
    }

    pub fn walls_left(&self, player: Player) -> u8 {
        self.walls_left[player.index()]
    }

    pub fn walls_per_player(&self) -> u8 {
        self.walls_per_player
    }

    pub fn walls(&self) -> &WallGrid {
        &self.walls
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn ply(&self) -> u16 {
        self.ply
    }

    pub fn max_plies(&self) -> u16 {
        self.max_plies
    }

    /// Row `player` is racing toward
    pub fn goal_row(&self, player: Player) -> u8 {
        match player {
            Player::One => (self.size() - 1) as u8,
            Player::Two => 0,
        }
    }

    // ------------------------------------------------------------------
    // Outcome
    // ------------------------------------------------------------------

    pub fn winner(&self) -> Option<Player> {
        Player::ALL
            .into_iter()
            .find(|&p| self.pawn(p).y == self.goal_row(p))
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.ply >= self.max_plies
    }

    /// Result from `player`'s point of view
    pub fn outcome(&self, player: Player) -> GameResult {
        match self.winner() {
            Some(winner) => GameResult::for_viewer(Some(winner), player),
            None if self.ply >= self.max_plies => GameResult::Draw,
            None => GameResult::Ongoing,
        }
    }

    /// Steps `player` still needs to reach their goal row, ignoring pawns
    pub fn shortest_distance(&self, player: Player) -> Option<u32> {
        Pathfinder::new(self.size()).shortest_distance(
            &self.walls,
            self.pawn(player),
            self.goal_row(player),
        )
    }

    // ------------------------------------------------------------------
    // Move generation
    // ------------------------------------------------------------------

    /// Destination of a pawn move for `player`, or `None` if the move is not
    /// legal here. Walls always yield `None`.
    pub fn pawn_target(&self, player: Player, mv: Move) -> Option<Cell> {
        let me = self.pawn(player);
        let opponent = self.pawn(player.opponent());
        match mv {
            Move::Step(dir) => self.walls.step(me, dir).filter(|&c| c != opponent),
            Move::Jump(dir) => {
                let over = self.walls.step(me, dir).filter(|&c| c == opponent)?;
                self.walls.step(over, dir)
            }
            Move::DiagonalJump(diag) => {
                let (vertical, horizontal) = diag.components();
                [(vertical, horizontal), (horizontal, vertical)]
                    .into_iter()
                    .find_map(|(toward, side)| self.side_jump(me, opponent, toward, side))
            }
            Move::Wall { .. } => None,
        }
    }

    // Diagonal jump around an adjacent opponent whose far side is blocked.
    fn side_jump(&self, me: Cell, opponent: Cell, toward: Direction, side: Direction) -> Option<Cell> {
        let over = self.walls.step(me, toward).filter(|&c| c == opponent)?;
        if self.walls.step(over, toward).is_some() {
            return None;
        }
        self.walls.step(over, side)
    }

    /// Legal pawn action indices (`0..12`) for `player`, ignoring whose turn
    /// it is.
    pub fn valid_pawn_moves(&self, player: Player) -> Vec<usize> {
        let codec = self.codec();
        let steps = Direction::ALL.into_iter().map(Move::Step);
        let jumps = Direction::ALL.into_iter().map(Move::Jump);
        let diagonals = Diagonal::ALL.into_iter().map(Move::DiagonalJump);
        steps
            .chain(jumps)
            .chain(diagonals)
            .filter(|&mv| self.pawn_target(player, mv).is_some())
            .map(|mv| codec.encode(mv))
            .collect()
    }

    /// Legal wall action indices for `player`, ignoring whose turn it is.
    pub fn valid_wall_moves(&self, player: Player) -> Vec<usize> {
        if self.walls_left(player) == 0 {
            return Vec::new();
        }
        let codec = self.codec();
        let m = codec.slots_per_side() as u8;
        let mut pathfinder = Pathfinder::new(self.size());
        let mut actions = Vec::new();
        for orientation in [Orientation::Vertical, Orientation::Horizontal] {
            for y in 0..m {
                for x in 0..m {
                    if self.placed_wall(orientation, x, y, &mut pathfinder).is_ok() {
                        actions.push(codec.wall_action(x, y, orientation));
                    }
                }
            }
        }
        actions
    }

    /// All legal actions for `player`. Empty when the game is over or it is
    /// not `player`'s turn.
    pub fn legal_actions(&self, player: Player) -> Vec<usize> {
        if self.is_terminal() || player != self.to_move {
            return Vec::new();
        }
        let mut actions = self.valid_pawn_moves(player);
        actions.extend(self.valid_wall_moves(player));
        actions
    }

    pub fn legal_action_mask(&self, player: Player) -> Vec<bool> {
        let mut mask = vec![false; self.codec().action_size()];
        for action in self.legal_actions(player) {
            mask[action] = true;
        }
        mask
    }

    // Wall grid after placing the wall, if the placement is allowed.
    fn placed_wall(
        &self,
        orientation: Orientation,
        x: u8,
        y: u8,
        pathfinder: &mut Pathfinder,
    ) -> Result<WallGrid, WallRejection> {
        if let Some(reason) = self.walls.conflict(orientation, x, y) {
            return Err(reason);
        }
        let walls = self.walls.with_wall(orientation, x, y);
        for player in Player::ALL {
            if !pathfinder.is_reachable(&walls, self.pawn(player), self.goal_row(player)) {
                return Err(WallRejection::SealsPath(player));
            }
        }
        Ok(walls)
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Apply `action` for `player`, returning the successor board.
    ///
    /// The receiver is never modified; all checks happen before the new
    /// board is built.
    pub fn apply_action(&self, player: Player, action: usize) -> Result<Board, QuoridorError> {
        let mv = self.codec().decode(action)?;
        if self.is_terminal() {
            return Err(QuoridorError::GameOver);
        }
        if player != self.to_move {
            return Err(QuoridorError::NotPlayersTurn {
                player,
                to_move: self.to_move,
            });
        }

        let mut next = *self;
        match mv {
            Move::Wall { x, y, orientation } => {
                let reject = |reason| QuoridorError::InvalidWallPlacement { action, reason };
                if self.walls_left(player) == 0 {
                    return Err(reject(WallRejection::NoWallsLeft));
                }
                let mut pathfinder = Pathfinder::new(self.size());
                next.walls = self
                    .placed_wall(orientation, x, y, &mut pathfinder)
                    .map_err(reject)?;
                next.walls_left[player.index()] -= 1;
            }
            pawn_move => {
                next.pawns[player.index()] = self
                    .pawn_target(player, pawn_move)
                    .ok_or(QuoridorError::IllegalMove { action })?;
            }
        }
        next.to_move = player.opponent();
        next.ply += 1;
        Ok(next)
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// Rotate 180 degrees and swap the players' roles, so that the player to
    /// move in `self` becomes player One (or vice versa). Applying it twice
    /// yields the original board.
    pub fn swapped(&self) -> Board {
        let far = (self.size() - 1) as u8;
        let rotate = |c: Cell| Cell::new(far - c.x, far - c.y);
        Board {
            walls: self.walls.rotated(),
            pawns: [rotate(self.pawns[1]), rotate(self.pawns[0])],
            walls_left: [self.walls_left[1], self.walls_left[0]],
            to_move: self.to_move.opponent(),
            ..*self
        }
    }

    /// Mirror left to right. Roles are unchanged.
    pub fn mirrored(&self) -> Board {
        let far = (self.size() - 1) as u8;
        let mirror = |c: Cell| Cell::new(far - c.x, c.y);
        Board {
            walls: self.walls.mirrored(),
            pawns: [mirror(self.pawns[0]), mirror(self.pawns[1])],
            ..*self
        }
    }
}

fn validate_board_size(board_size: usize) -> Result<(), QuoridorError> {
    if board_size % 2 == 0 || !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
        return Err(QuoridorError::Configuration(format!(
            "board size must be odd and between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}, got {board_size}"
        )));
    }
    Ok(())
}

/// ASCII rendering, north at the top.
///
/// ```text
/// . . 2 . .
///     -
/// . .|. . .
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size() as u8;
        writeln!(
            f,
            "ply {} | to move: {} | walls left: {} / {}",
            self.ply, self.to_move, self.walls_left[0], self.walls_left[1]
        )?;
        for y in (0..n).rev() {
            let mut row = String::with_capacity(2 * n as usize);
            for x in 0..n {
                let cell = Cell::new(x, y);
                row.push(if cell == self.pawns[0] {
                    '1'
                } else if cell == self.pawns[1] {
                    '2'
                } else {
                    '.'
                });
                if x + 1 < n {
                    let open = self.walls.step(cell, Direction::East).is_some();
                    row.push(if open { ' ' } else { '|' });
                }
            }
            writeln!(f, "{}", row.trim_end())?;

            if y > 0 {
                let mut gap = String::with_capacity(2 * n as usize);
                for x in 0..n {
                    let open = self.walls.step(Cell::new(x, y), Direction::South).is_some();
                    gap.push(if open { ' ' } else { '-' });
                    gap.push(' ');
                }
                writeln!(f, "{}", gap.trim_end())?;
            }
        }
        Ok(())
    }
}
