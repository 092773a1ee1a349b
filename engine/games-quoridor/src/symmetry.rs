//! Canonical views and board symmetries.
//!
//! The canonical view puts the acting player in seat One, moving north.
//! For player Two that is a 180 degree rotation combined with a role swap.
//! The left-right mirror is a true symmetry of the rules and is used only to
//! augment training data.

use engine_core::Player;

use crate::action::{ActionCodec, Diagonal, Direction, Move};
use crate::board::Board;

/// Board as seen by `player`. Identity for One, rotation plus role swap for
/// Two. Applying it twice with the same player returns the input.
pub fn make_canonical(board: &Board, player: Player) -> Board {
    match player {
        Player::One => *board,
        Player::Two => board.swapped(),
    }
}

/// Action index after a 180 degree rotation of the board
pub fn rotate_action(codec: &ActionCodec, action: usize) -> usize {
    let m = codec.slots_per_side() as u8;
    match codec.decode(action) {
        Ok(Move::Step(dir)) => codec.encode(Move::Step(dir.opposite())),
        Ok(Move::Jump(dir)) => codec.encode(Move::Jump(dir.opposite())),
        Ok(Move::DiagonalJump(diag)) => codec.encode(Move::DiagonalJump(opposite_diagonal(diag))),
        Ok(Move::Wall { x, y, orientation }) => codec.encode(Move::Wall {
            x: m - 1 - x,
            y: m - 1 - y,
            orientation,
        }),
        Err(_) => action,
    }
}

/// Action index after a left-right mirror of the board
pub fn mirror_action(codec: &ActionCodec, action: usize) -> usize {
    let m = codec.slots_per_side() as u8;
    match codec.decode(action) {
        Ok(Move::Step(dir)) => codec.encode(Move::Step(mirror_direction(dir))),
        Ok(Move::Jump(dir)) => codec.encode(Move::Jump(mirror_direction(dir))),
        Ok(Move::DiagonalJump(diag)) => codec.encode(Move::DiagonalJump(mirror_diagonal(diag))),
        Ok(Move::Wall { x, y, orientation }) => codec.encode(Move::Wall {
            x: m - 1 - x,
            y,
            orientation,
        }),
        Err(_) => action,
    }
}

/// Equivalent `(board, policy)` pairs: the identity and the left-right
/// mirror. `policy` is indexed by action and permuted with the board.
pub fn symmetric_forms(board: &Board, policy: &[f32]) -> Vec<(Board, Vec<f32>)> {
    let codec = board.codec();
    let mut mirrored = vec![0.0; policy.len()];
    for (action, &p) in policy.iter().enumerate() {
        let target = mirror_action(&codec, action);
        if let Some(slot) = mirrored.get_mut(target) {
            *slot = p;
        }
    }
    vec![(*board, policy.to_vec()), (board.mirrored(), mirrored)]
}

fn mirror_direction(dir: Direction) -> Direction {
    match dir {
        Direction::East | Direction::West => dir.opposite(),
        other => other,
    }
}

fn mirror_diagonal(diag: Diagonal) -> Diagonal {
    match diag {
        Diagonal::NorthEast => Diagonal::NorthWest,
        Diagonal::NorthWest => Diagonal::NorthEast,
        Diagonal::SouthEast => Diagonal::SouthWest,
        Diagonal::SouthWest => Diagonal::SouthEast,
    }
}

fn opposite_diagonal(diag: Diagonal) -> Diagonal {
    match diag {
        Diagonal::NorthEast => Diagonal::SouthWest,
        Diagonal::SouthWest => Diagonal::NorthEast,
        Diagonal::NorthWest => Diagonal::SouthEast,
        Diagonal::SouthEast => Diagonal::NorthWest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_permutation_of_pawn_actions() {
        let codec = ActionCodec::new(9);
        let expected = [1, 0, 3, 2, 5, 4, 7, 6, 11, 10, 9, 8];
        for (action, &rotated) in expected.iter().enumerate() {
            assert_eq!(rotate_action(&codec, action), rotated, "action {action}");
        }
    }

    #[test]
    fn test_mirror_permutation_of_pawn_actions() {
        let codec = ActionCodec::new(9);
        let expected = [0, 1, 3, 2, 4, 5, 7, 6, 9, 8, 11, 10];
        for (action, &mirrored) in expected.iter().enumerate() {
            assert_eq!(mirror_action(&codec, action), mirrored, "action {action}");
        }
    }

    #[test]
    fn test_action_permutations_are_involutions() {
        for n in [3, 5, 9] {
            let codec = ActionCodec::new(n);
            for action in 0..codec.action_size() {
                assert_eq!(rotate_action(&codec, rotate_action(&codec, action)), action);
                assert_eq!(mirror_action(&codec, mirror_action(&codec, action)), action);
            }
        }
    }

    #[test]
    fn test_wall_slot_rotation() {
        let codec = ActionCodec::new(9);
        // Vertical wall at (0,0) rotates to vertical (7,7)
        assert_eq!(rotate_action(&codec, 12), 12 + 63);
        // Horizontal wall at (2,1) rotates to horizontal (5,6)
        assert_eq!(rotate_action(&codec, 12 + 64 + 8 + 2), 12 + 64 + 6 * 8 + 5);
        // Mirror keeps the row
        assert_eq!(mirror_action(&codec, 12 + 8 + 1), 12 + 8 + 6);
    }
}
