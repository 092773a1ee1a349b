//! Evaluator trait for position evaluation.
//!
//! The evaluator provides policy (action probabilities) and value estimates
//! for game states. In AlphaZero, this is a neural network. For testing,
//! we provide a uniform evaluator and a seeded random baseline.

use std::sync::Mutex;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

use crate::game::Game;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Model error: {0}")]
    ModelError(String),
}

/// Result of evaluating a game state.
#[derive(Debug, Clone)]
pub struct EvalResult {
    /// Policy: probability distribution over actions.
    /// Index i corresponds to action i, values should sum to ~1.0.
    /// Entries for illegal actions are ignored by the caller.
    pub policy: Vec<f32>,

    /// Value estimate for the player to move.
    /// Range: -1.0 (certain loss) to +1.0 (certain win).
    pub value: f32,
}

/// Trait for position evaluators (the search oracle).
///
/// The state handed to `evaluate` is always a canonical view: the player to
/// move is `Player::One`. Implementations could be:
/// - UniformEvaluator: Returns uniform policy (for testing)
/// - RandomEvaluator: Random priors, neutral value (baseline)
/// - A neural network or a game-specific heuristic
pub trait Evaluator<G: Game>: Send + Sync {
    /// Evaluate a single canonical state.
    ///
    /// # Arguments
    /// * `state` - Canonical game state
    /// * `legal_mask` - Legal actions, one entry per action index
    ///
    /// # Returns
    /// Policy distribution of length `legal_mask.len()` and value estimate
    fn evaluate(&self, state: &G::State, legal_mask: &[bool])
        -> Result<EvalResult, EvaluatorError>;
}

/// Uniform evaluator that assigns equal probability to all legal moves.
/// Value is always 0.0 (neutral). Useful for testing MCTS without a model.
#[derive(Debug, Clone, Default)]
pub struct UniformEvaluator;

impl UniformEvaluator {
    pub fn new() -> Self {
        Self
    }
}

/// Uniform distribution over the set entries of `legal_mask`.
///
/// Returns all zeros when nothing is legal.
pub fn uniform_policy(legal_mask: &[bool]) -> Vec<f32> {
    let num_legal = legal_mask.iter().filter(|&&legal| legal).count();
    if num_legal == 0 {
        return vec![0.0; legal_mask.len()];
    }

    let prob = 1.0 / num_legal as f32;
    legal_mask
        .iter()
        .map(|&legal| if legal { prob } else { 0.0 })
        .collect()
}

impl<G: Game> Evaluator<G> for UniformEvaluator {
    fn evaluate(
        &self,
        _state: &G::State,
        legal_mask: &[bool],
    ) -> Result<EvalResult, EvaluatorError> {
        Ok(EvalResult {
            policy: uniform_policy(legal_mask),
            value: 0.0,
        })
    }
}

/// Random-prior evaluator: draws an independent weight per legal action from
/// a seeded generator and normalises. Value is always 0.0.
#[derive(Debug)]
pub struct RandomEvaluator {
    rng: Mutex<ChaCha20Rng>,
}

impl RandomEvaluator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }
}

impl<G: Game> Evaluator<G> for RandomEvaluator {
    fn evaluate(
        &self,
        _state: &G::State,
        legal_mask: &[bool],
    ) -> Result<EvalResult, EvaluatorError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| EvaluatorError::EvaluationFailed(format!("rng lock poisoned: {}", e)))?;

        let mut policy: Vec<f32> = legal_mask
            .iter()
            .map(|&legal| if legal { rng.gen::<f32>() + 1e-3 } else { 0.0 })
            .collect();

        let total: f32 = policy.iter().sum();
        if total > 0.0 {
            for p in &mut policy {
                *p /= total;
            }
        }

        Ok(EvalResult { policy, value: 0.0 })
    }
}
