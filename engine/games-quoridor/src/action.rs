//! Action codec: the mapping between flat action indices and moves.
//!
//! # Layout
//!
//! ```text
//! 0..4                 steps          N, S, E, W
//! 4..8                 straight jumps JN, JS, JE, JW
//! 8..12                diagonal jumps NE, NW, SE, SW
//! 12..12+m*m           vertical walls   (slot y*m + x)
//! 12+m*m..12+2*m*m     horizontal walls (slot y*m + x)
//! ```
//!
//! where `m = n - 1` is the number of wall slots per side. North is `+y`.

use crate::error::QuoridorError;

/// Number of pawn actions (steps, straight jumps and diagonal jumps)
pub const PAWN_ACTIONS: usize = 12;

const JUMP_OFFSET: usize = 4;
const DIAGONAL_OFFSET: usize = 8;

/// One of the four orthogonal directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Position within the step and jump blocks
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Coordinate offset `(dx, dy)`
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

/// One of the four diagonal jump directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagonal {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Diagonal {
    pub const ALL: [Diagonal; 4] = [
        Diagonal::NorthEast,
        Diagonal::NorthWest,
        Diagonal::SouthEast,
        Diagonal::SouthWest,
    ];

    pub fn index(self) -> usize {
        match self {
            Diagonal::NorthEast => 0,
            Diagonal::NorthWest => 1,
            Diagonal::SouthEast => 2,
            Diagonal::SouthWest => 3,
        }
    }

    /// The vertical and horizontal components of the diagonal
    pub fn components(self) -> (Direction, Direction) {
        match self {
            Diagonal::NorthEast => (Direction::North, Direction::East),
            Diagonal::NorthWest => (Direction::North, Direction::West),
            Diagonal::SouthEast => (Direction::South, Direction::East),
            Diagonal::SouthWest => (Direction::South, Direction::West),
        }
    }
}

/// Wall orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Separates horizontally adjacent cells; spans two rows.
    Vertical,
    /// Separates vertically adjacent cells; spans two columns.
    Horizontal,
}

impl Orientation {
    pub fn other(self) -> Orientation {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

/// A decoded action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Step(Direction),
    Jump(Direction),
    DiagonalJump(Diagonal),
    Wall {
        x: u8,
        y: u8,
        orientation: Orientation,
    },
}

impl Move {
    pub fn is_pawn_move(&self) -> bool {
        !matches!(self, Move::Wall { .. })
    }
}

/// Encodes and decodes actions for one board size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionCodec {
    slots_per_side: usize,
}

impl ActionCodec {
    /// Codec for an `n x n` board
    pub fn new(board_size: usize) -> Self {
        Self {
            slots_per_side: board_size.saturating_sub(1),
        }
    }

    /// Total number of actions, `12 + 2 * (n-1)^2`
    pub fn action_size(&self) -> usize {
        PAWN_ACTIONS + 2 * self.wall_slots()
    }

    /// Number of wall slots of one orientation
    pub fn wall_slots(&self) -> usize {
        self.slots_per_side * self.slots_per_side
    }

    pub fn slots_per_side(&self) -> usize {
        self.slots_per_side
    }

    pub fn decode(&self, action: usize) -> Result<Move, QuoridorError> {
        let size = self.action_size();
        if action >= size {
            return Err(QuoridorError::ActionOutOfRange { action, size });
        }

        let mv = match action {
            a if a < JUMP_OFFSET => Move::Step(Direction::ALL[a]),
            a if a < DIAGONAL_OFFSET => Move::Jump(Direction::ALL[a - JUMP_OFFSET]),
            a if a < PAWN_ACTIONS => Move::DiagonalJump(Diagonal::ALL[a - DIAGONAL_OFFSET]),
            a => {
                let wall = a - PAWN_ACTIONS;
                let slots = self.wall_slots();
                let (orientation, slot) = if wall < slots {
                    (Orientation::Vertical, wall)
                } else {
                    (Orientation::Horizontal, wall - slots)
                };
                Move::Wall {
                    x: (slot % self.slots_per_side) as u8,
                    y: (slot / self.slots_per_side) as u8,
                    orientation,
                }
            }
        };
        Ok(mv)
    }

    pub fn encode(&self, mv: Move) -> usize {
        match mv {
            Move::Step(dir) => dir.index(),
            Move::Jump(dir) => JUMP_OFFSET + dir.index(),
            Move::DiagonalJump(diag) => DIAGONAL_OFFSET + diag.index(),
            Move::Wall { x, y, orientation } => self.wall_action(x, y, orientation),
        }
    }

    /// Action index of the wall at slot `(x, y)`
    pub fn wall_action(&self, x: u8, y: u8, orientation: Orientation) -> usize {
        let slot = y as usize * self.slots_per_side + x as usize;
        match orientation {
            Orientation::Vertical => PAWN_ACTIONS + slot,
            Orientation::Horizontal => PAWN_ACTIONS + self.wall_slots() + slot,
        }
    }
}
