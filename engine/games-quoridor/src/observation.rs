//! Flat `f32` encoding of a board for neural-network oracles.
//!
//! Layout, for an `n x n` board with `m = n - 1`:
//!
//! ```text
//! [0, n²)                 pawn of player One (one-hot)
//! [n², 2n²)               pawn of player Two (one-hot)
//! [2n², 2n²+m²)           vertical walls
//! [2n²+m², 2n²+2m²)       horizontal walls
//! 2n²+2m²                 walls left for One / walls per player
//! 2n²+2m²+1               walls left for Two / walls per player
//! ```
//!
//! Encode the canonical view so the acting player is always in seat One.

use engine_core::Player;

use crate::action::Orientation;
use crate::board::Board;

/// Length of the encoding for an `n x n` board
pub fn observation_size(board_size: usize) -> usize {
    let m = board_size.saturating_sub(1);
    2 * board_size * board_size + 2 * m * m + 2
}

pub fn encode(board: &Board) -> Vec<f32> {
    let n = board.size();
    let m = n - 1;
    let mut obs = vec![0.0f32; observation_size(n)];

    for (plane, player) in Player::ALL.into_iter().enumerate() {
        let cell = board.pawn(player);
        obs[plane * n * n + cell.y as usize * n + cell.x as usize] = 1.0;
    }

    let wall_base = 2 * n * n;
    for (plane, orientation) in [Orientation::Vertical, Orientation::Horizontal]
        .into_iter()
        .enumerate()
    {
        for (x, y) in board.walls().iter(orientation) {
            obs[wall_base + plane * m * m + y as usize * m + x as usize] = 1.0;
        }
    }

    let scalars = wall_base + 2 * m * m;
    let total = f32::from(board.walls_per_player().max(1));
    for (i, player) in Player::ALL.into_iter().enumerate() {
        obs[scalars + i] = f32::from(board.walls_left(player)) / total;
    }
    obs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walls::Cell;

    #[test]
    fn test_opening_encoding() {
        let board = Board::new(5).unwrap();
        let obs = encode(&board);
        assert_eq!(obs.len(), observation_size(5));
        assert_eq!(obs.len(), 2 * 25 + 2 * 16 + 2);
        // One at (2,0), Two at (2,4)
        assert_eq!(obs[2], 1.0);
        assert_eq!(obs[25 + 4 * 5 + 2], 1.0);
        assert_eq!(obs.iter().take(50).filter(|&&v| v == 1.0).count(), 2);
        // No walls, full inventories
        assert!(obs[50..82].iter().all(|&v| v == 0.0));
        assert_eq!(obs[82], 1.0);
        assert_eq!(obs[83], 1.0);
    }

    #[test]
    fn test_walls_and_inventory() {
        let board = Board::new(5)
            .unwrap()
            .with_wall(Orientation::Horizontal, 1, 2)
            .unwrap()
            .with_walls_left(4, 5)
            .with_pawns(Cell::new(0, 1), Cell::new(4, 3))
            .unwrap();
        let obs = encode(&board);
        assert_eq!(obs[5], 1.0);
        assert_eq!(obs[25 + 3 * 5 + 4], 1.0);
        assert_eq!(obs[50 + 16 + 2 * 4 + 1], 1.0);
        assert_eq!(obs[50..82].iter().sum::<f32>(), 1.0);
        assert!((obs[82] - 0.8).abs() < 1e-6);
        assert_eq!(obs[83], 1.0);
    }
}
