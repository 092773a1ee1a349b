//! Shortest-path heuristic oracle.
//!
//! Scores a position by the race between both pawns: the value is
//! `tanh((d_opponent - d_me) / n)` where `d` is the BFS distance to the goal
//! row. Priors favour pawn moves that shorten the mover's path and walls that
//! lengthen the opponent's.

use engine_core::{EvalResult, Evaluator, EvaluatorError};

use crate::action::Move;
use crate::board::Board;
use crate::pathfind::Pathfinder;
use crate::Quoridor;

/// Heuristic evaluator that needs no model
#[derive(Debug, Clone)]
pub struct PathDistanceEvaluator {
    progress_weight: f32,
}

impl PathDistanceEvaluator {
    pub fn new() -> Self {
        Self {
            progress_weight: 8.0,
        }
    }

    /// Prior weight of a pawn move that shortens the mover's path, relative
    /// to a neutral action (1.0).
    pub fn with_progress_weight(mut self, weight: f32) -> Self {
        self.progress_weight = weight.max(0.0);
        self
    }

    fn action_weight(
        &self,
        board: &Board,
        action: usize,
        distances: (u32, u32),
        pathfinder: &mut Pathfinder,
    ) -> f32 {
        let me = board.to_move();
        let opponent = me.opponent();
        let (d_me, d_opp) = distances;
        let Ok(mv) = board.codec().decode(action) else {
            return 0.0;
        };

        match mv {
            Move::Wall { .. } => {
                let Ok(next) = board.apply_action(me, action) else {
                    return 0.0;
                };
                let after = pathfinder
                    .shortest_distance(next.walls(), next.pawn(opponent), next.goal_row(opponent))
                    .unwrap_or(d_opp);
                1.0 + after.saturating_sub(d_opp) as f32
            }
            pawn_move => {
                let Some(target) = board.pawn_target(me, pawn_move) else {
                    return 0.0;
                };
                let after = pathfinder
                    .shortest_distance(board.walls(), target, board.goal_row(me))
                    .unwrap_or(d_me);
                match after.cmp(&d_me) {
                    std::cmp::Ordering::Less => self.progress_weight,
                    std::cmp::Ordering::Equal => 1.0,
                    std::cmp::Ordering::Greater => 0.5,
                }
            }
        }
    }
}

impl Default for PathDistanceEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator<Quoridor> for PathDistanceEvaluator {
    fn evaluate(&self, state: &Board, legal_mask: &[bool]) -> Result<EvalResult, EvaluatorError> {
        let action_size = state.codec().action_size();
        if legal_mask.len() != action_size {
            return Err(EvaluatorError::InvalidState(format!(
                "legal mask has {} entries, expected {action_size}",
                legal_mask.len()
            )));
        }

        let me = state.to_move();
        let opponent = me.opponent();
        let mut pathfinder = Pathfinder::new(state.size());
        let d_me = pathfinder
            .shortest_distance(state.walls(), state.pawn(me), state.goal_row(me))
            .ok_or_else(|| EvaluatorError::InvalidState("mover has no path to goal".into()))?;
        let d_opp = pathfinder
            .shortest_distance(state.walls(), state.pawn(opponent), state.goal_row(opponent))
            .ok_or_else(|| EvaluatorError::InvalidState("opponent has no path to goal".into()))?;

        let mut policy = vec![0.0f32; action_size];
        let mut total = 0.0f32;
        for (action, _) in legal_mask.iter().enumerate().filter(|(_, &legal)| legal) {
            let weight = self.action_weight(state, action, (d_me, d_opp), &mut pathfinder);
            policy[action] = weight;
            total += weight;
        }
        if total > 0.0 {
            policy.iter_mut().for_each(|p| *p /= total);
        }

        let n = state.size() as f32;
        let value = ((d_opp as f32 - d_me as f32) / n).tanh();
        Ok(EvalResult { policy, value })
    }
}
