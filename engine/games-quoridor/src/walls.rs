//! Cells and wall bitmaps.
//!
//! Walls live on an `m x m` grid of slots (`m = n - 1`), slot `(x, y)` sitting
//! at the corner shared by cells `(x, y)`, `(x+1, y)`, `(x, y+1)` and
//! `(x+1, y+1)`. Each orientation is a `u128` bitmap indexed by `y * m + x`.
//!
//! ```text
//! vertical wall at (x, y)        horizontal wall at (x, y)
//!
//!   (x,y+1) | (x+1,y+1)            (x,y+1)   (x+1,y+1)
//!           |                      ---------------------
//!   (x,y)   | (x+1,y)              (x,y)     (x+1,y)
//! ```

use crate::action::{Direction, Orientation};
use crate::error::WallRejection;

/// A pawn cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl Cell {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Placed walls of both orientations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallGrid {
    board_size: u8,
    vertical: u128,
    horizontal: u128,
}

impl WallGrid {
    /// Empty grid for an `n x n` board (`n <= 11`)
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size: board_size as u8,
            vertical: 0,
            horizontal: 0,
        }
    }

    pub fn board_size(&self) -> usize {
        self.board_size as usize
    }

    pub fn slots_per_side(&self) -> usize {
        self.board_size().saturating_sub(1)
    }

    pub fn bits(&self, orientation: Orientation) -> u128 {
        match orientation {
            Orientation::Vertical => self.vertical,
            Orientation::Horizontal => self.horizontal,
        }
    }

    /// Number of walls placed on the board
    pub fn count(&self) -> u32 {
        self.vertical.count_ones() + self.horizontal.count_ones()
    }

    /// Whether a wall of `orientation` sits at `(x, y)`. Out-of-range slots
    /// are empty.
    pub fn has(&self, orientation: Orientation, x: i32, y: i32) -> bool {
        let m = self.slots_per_side() as i32;
        if x < 0 || y < 0 || x >= m || y >= m {
            return false;
        }
        self.bits(orientation) & (1u128 << (y * m + x)) != 0
    }

    /// Check a tentative placement against the walls already on the board.
    ///
    /// Only slot conflicts are checked here; inventory and path checks belong
    /// to the board.
    pub fn conflict(&self, orientation: Orientation, x: u8, y: u8) -> Option<WallRejection> {
        let (x, y) = (x as i32, y as i32);
        if self.has(orientation, x, y) {
            return Some(WallRejection::Occupied);
        }
        if self.has(orientation.other(), x, y) {
            return Some(WallRejection::Crossing);
        }
        let overlaps = match orientation {
            Orientation::Vertical => {
                self.has(orientation, x, y - 1) || self.has(orientation, x, y + 1)
            }
            Orientation::Horizontal => {
                self.has(orientation, x - 1, y) || self.has(orientation, x + 1, y)
            }
        };
        overlaps.then_some(WallRejection::Overlap)
    }

    /// Return a copy with the wall added. Does not check for conflicts.
    pub fn with_wall(mut self, orientation: Orientation, x: u8, y: u8) -> Self {
        let bit = 1u128 << (y as usize * self.slots_per_side() + x as usize);
        match orientation {
            Orientation::Vertical => self.vertical |= bit,
            Orientation::Horizontal => self.horizontal |= bit,
        }
        self
    }

    /// The neighbouring cell in `dir`, or `None` if the board edge or a wall
    /// is in the way.
    pub fn step(&self, from: Cell, dir: Direction) -> Option<Cell> {
        let n = self.board_size() as i32;
        let (x, y) = (from.x as i32, from.y as i32);
        let (dx, dy) = dir.delta();
        let (tx, ty) = (x + dx, y + dy);
        if tx < 0 || ty < 0 || tx >= n || ty >= n {
            return None;
        }

        // Normalise to an eastward or northward crossing out of (cx, cy).
        let (cx, cy) = (x.min(tx), y.min(ty));
        let blocked = match dir {
            Direction::East | Direction::West => {
                self.has(Orientation::Vertical, cx, cy)
                    || self.has(Orientation::Vertical, cx, cy - 1)
            }
            Direction::North | Direction::South => {
                self.has(Orientation::Horizontal, cx, cy)
                    || self.has(Orientation::Horizontal, cx - 1, cy)
            }
        };
        if blocked {
            None
        } else {
            Some(Cell::new(tx as u8, ty as u8))
        }
    }

    /// Rotate the grid by 180 degrees: slot `(x, y)` moves to
    /// `(m-1-x, m-1-y)`.
    pub fn rotated(&self) -> Self {
        let slots = self.slots_per_side() * self.slots_per_side();
        // Slot index i maps to slots-1-i, i.e. a bit reversal of the low bits.
        let reverse = |bits: u128| {
            if slots == 0 {
                0
            } else {
                bits.reverse_bits() >> (128 - slots)
            }
        };
        Self {
            board_size: self.board_size,
            vertical: reverse(self.vertical),
            horizontal: reverse(self.horizontal),
        }
    }

    /// Mirror the grid left to right: slot `(x, y)` moves to `(m-1-x, y)`.
    pub fn mirrored(&self) -> Self {
        let m = self.slots_per_side();
        let mirror = |bits: u128| {
            let mut out = 0u128;
            for y in 0..m {
                for x in 0..m {
                    if bits & (1u128 << (y * m + x)) != 0 {
                        out |= 1u128 << (y * m + (m - 1 - x));
                    }
                }
            }
            out
        };
        Self {
            board_size: self.board_size,
            vertical: mirror(self.vertical),
            horizontal: mirror(self.horizontal),
        }
    }

    /// Iterate over placed walls of one orientation as `(x, y)` slots
    pub fn iter(&self, orientation: Orientation) -> impl Iterator<Item = (u8, u8)> + '_ {
        let m = self.slots_per_side();
        let bits = self.bits(orientation);
        (0..m * m)
            .filter(move |i| bits & (1u128 << i) != 0)
            .map(move |i| ((i % m) as u8, (i / m) as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_steps() {
        let grid = WallGrid::new(9);
        let c = Cell::new(4, 4);
        assert_eq!(grid.step(c, Direction::North), Some(Cell::new(4, 5)));
        assert_eq!(grid.step(c, Direction::South), Some(Cell::new(4, 3)));
        assert_eq!(grid.step(c, Direction::East), Some(Cell::new(5, 4)));
        assert_eq!(grid.step(c, Direction::West), Some(Cell::new(3, 4)));
    }

    #[test]
    fn test_board_edges_block() {
        let grid = WallGrid::new(5);
        assert_eq!(grid.step(Cell::new(0, 0), Direction::West), None);
        assert_eq!(grid.step(Cell::new(0, 0), Direction::South), None);
        assert_eq!(grid.step(Cell::new(4, 4), Direction::East), None);
        assert_eq!(grid.step(Cell::new(4, 4), Direction::North), None);
    }

    #[test]
    fn test_vertical_wall_blocks_two_edges() {
        let grid = WallGrid::new(9).with_wall(Orientation::Vertical, 3, 2);
        // Blocks (3,2)-(4,2) and (3,3)-(4,3)
        assert_eq!(grid.step(Cell::new(3, 2), Direction::East), None);
        assert_eq!(grid.step(Cell::new(4, 2), Direction::West), None);
        assert_eq!(grid.step(Cell::new(3, 3), Direction::East), None);
        assert_eq!(grid.step(Cell::new(4, 3), Direction::West), None);
        // Neighbouring rows remain open
        assert!(grid.step(Cell::new(3, 1), Direction::East).is_some());
        assert!(grid.step(Cell::new(3, 4), Direction::East).is_some());
        // North-south movement unaffected
        assert!(grid.step(Cell::new(3, 2), Direction::North).is_some());
    }

    #[test]
    fn test_horizontal_wall_blocks_two_edges() {
        let grid = WallGrid::new(9).with_wall(Orientation::Horizontal, 3, 2);
        // Blocks (3,2)-(3,3) and (4,2)-(4,3)
        assert_eq!(grid.step(Cell::new(3, 2), Direction::North), None);
        assert_eq!(grid.step(Cell::new(3, 3), Direction::South), None);
        assert_eq!(grid.step(Cell::new(4, 2), Direction::North), None);
        assert_eq!(grid.step(Cell::new(4, 3), Direction::South), None);
        assert!(grid.step(Cell::new(2, 2), Direction::North).is_some());
        assert!(grid.step(Cell::new(5, 2), Direction::North).is_some());
        assert!(grid.step(Cell::new(3, 2), Direction::East).is_some());
    }

    #[test]
    fn test_conflicts() {
        let grid = WallGrid::new(9)
            .with_wall(Orientation::Vertical, 2, 2)
            .with_wall(Orientation::Horizontal, 5, 5);

        assert_eq!(
            grid.conflict(Orientation::Vertical, 2, 2),
            Some(WallRejection::Occupied)
        );
        assert_eq!(
            grid.conflict(Orientation::Horizontal, 2, 2),
            Some(WallRejection::Crossing)
        );
        assert_eq!(
            grid.conflict(Orientation::Vertical, 2, 3),
            Some(WallRejection::Overlap)
        );
        assert_eq!(
            grid.conflict(Orientation::Vertical, 2, 1),
            Some(WallRejection::Overlap)
        );
        assert_eq!(
            grid.conflict(Orientation::Horizontal, 4, 5),
            Some(WallRejection::Overlap)
        );
        assert_eq!(
            grid.conflict(Orientation::Horizontal, 6, 5),
            Some(WallRejection::Overlap)
        );
        // Non-overlapping neighbours are fine
        assert_eq!(grid.conflict(Orientation::Vertical, 2, 4), None);
        assert_eq!(grid.conflict(Orientation::Vertical, 3, 2), None);
        assert_eq!(grid.conflict(Orientation::Horizontal, 3, 5), None);
        // T-junctions between orientations are allowed
        assert_eq!(grid.conflict(Orientation::Horizontal, 1, 2), None);
        assert_eq!(grid.conflict(Orientation::Horizontal, 3, 2), None);
        assert_eq!(grid.conflict(Orientation::Vertical, 5, 4), None);
    }

    #[test]
    fn test_edge_slots() {
        let grid = WallGrid::new(9)
            .with_wall(Orientation::Vertical, 0, 0)
            .with_wall(Orientation::Horizontal, 7, 7);
        assert_eq!(grid.conflict(Orientation::Vertical, 0, 1), Some(WallRejection::Overlap));
        assert_eq!(grid.conflict(Orientation::Horizontal, 6, 7), Some(WallRejection::Overlap));
        assert_eq!(grid.conflict(Orientation::Vertical, 7, 7), Some(WallRejection::Crossing));
        assert_eq!(grid.step(Cell::new(0, 0), Direction::East), None);
        assert_eq!(grid.step(Cell::new(8, 8), Direction::South), None);
    }

    #[test]
    fn test_rotation_is_involution() {
        let grid = WallGrid::new(9)
            .with_wall(Orientation::Vertical, 0, 1)
            .with_wall(Orientation::Horizontal, 6, 3);
        let rotated = grid.rotated();
        assert!(rotated.has(Orientation::Vertical, 7, 6));
        assert!(rotated.has(Orientation::Horizontal, 1, 4));
        assert_eq!(rotated.count(), 2);
        assert_eq!(rotated.rotated(), grid);
    }

    #[test]
    fn test_mirror_is_involution() {
        let grid = WallGrid::new(5)
            .with_wall(Orientation::Vertical, 0, 1)
            .with_wall(Orientation::Horizontal, 2, 3);
        let mirrored = grid.mirrored();
        assert!(mirrored.has(Orientation::Vertical, 3, 1));
        assert!(mirrored.has(Orientation::Horizontal, 1, 3));
        assert_eq!(mirrored.mirrored(), grid);
    }

    #[test]
    fn test_iter_lists_slots() {
        let grid = WallGrid::new(5)
            .with_wall(Orientation::Vertical, 1, 0)
            .with_wall(Orientation::Vertical, 2, 3);
        let walls: Vec<_> = grid.iter(Orientation::Vertical).collect();
        assert_eq!(walls, vec![(1, 0), (2, 3)]);
        assert_eq!(grid.iter(Orientation::Horizontal).count(), 0);
    }
}
