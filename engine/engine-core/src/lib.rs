//! Core traits and types for the Quoridor engine workspace
//!
//! This crate provides the two narrow contracts the search is written against:
//! - `Game`: state transition, legality, terminal test and canonical views
//! - `Evaluator`: the oracle mapping a canonical state to priors and a value
//!
//! plus the `Player` and `GameResult` types shared by both.

pub mod evaluator;
pub mod game;
pub mod game_utils;

// Re-export main types for convenience
pub use evaluator::{
    uniform_policy, EvalResult, Evaluator, EvaluatorError, RandomEvaluator, UniformEvaluator,
};
pub use game::Game;
pub use game_utils::{count_legal, GameResult, Player};
