//! Breadth-first search over the cell grid.
//!
//! Pawns never block paths; only walls and board edges do.

use std::collections::VecDeque;

use crate::action::Direction;
use crate::walls::{Cell, WallGrid};

/// Reusable BFS scratch space for one board size.
///
/// The visited buffer is generation-stamped, so consecutive searches do not
/// need to clear it.
#[derive(Debug, Clone)]
pub struct Pathfinder {
    board_size: usize,
    stamps: Vec<u32>,
    distances: Vec<u32>,
    generation: u32,
    queue: VecDeque<Cell>,
}

impl Pathfinder {
    pub fn new(board_size: usize) -> Self {
        let cells = board_size * board_size;
        Self {
            board_size,
            stamps: vec![0; cells],
            distances: vec![0; cells],
            generation: 0,
            queue: VecDeque::with_capacity(cells),
        }
    }

    /// Whether any cell of `goal_row` can be reached from `start`
    pub fn is_reachable(&mut self, walls: &WallGrid, start: Cell, goal_row: u8) -> bool {
        self.search(walls, start, goal_row).is_some()
    }

    /// Number of steps from `start` to the nearest cell of `goal_row`
    pub fn shortest_distance(
        &mut self,
        walls: &WallGrid,
        start: Cell,
        goal_row: u8,
    ) -> Option<u32> {
        self.search(walls, start, goal_row)
    }

    // BFS discovers cells in non-decreasing distance order, so the first goal
    // cell discovered is a nearest one.
    fn search(&mut self, walls: &WallGrid, start: Cell, goal_row: u8) -> Option<u32> {
        debug_assert_eq!(walls.board_size(), self.board_size);
        if start.y == goal_row {
            return Some(0);
        }

        self.next_generation();
        self.queue.clear();

        let idx = self.index(start);
        self.stamps[idx] = self.generation;
        self.distances[idx] = 0;
        self.queue.push_back(start);

        while let Some(cell) = self.queue.pop_front() {
            let dist = self.distances[self.index(cell)] + 1;
            for dir in Direction::ALL {
                let Some(next) = walls.step(cell, dir) else {
                    continue;
                };
                let idx = self.index(next);
                if self.stamps[idx] == self.generation {
                    continue;
                }
                if next.y == goal_row {
                    return Some(dist);
                }
                self.stamps[idx] = self.generation;
                self.distances[idx] = dist;
                self.queue.push_back(next);
            }
        }
        None
    }

    fn next_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.stamps.fill(0);
            self.generation = 1;
        }
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        cell.y as usize * self.board_size + cell.x as usize
    }
}
