//! Monte Carlo Tree Search (MCTS) for AlphaZero-style game playing.
//!
//! This crate provides a game-agnostic PUCT search that works with any game
//! implementing the `engine-core` [`Game`] trait and any [`Evaluator`] oracle.
//!
//! # Overview
//!
//! Each simulation consists of four phases:
//!
//! 1. **Selection**: follow the edge maximising `Q + U`, where `U` scales the
//!    prior by `sqrt(N(s)) / (1 + N(s,a))` and a slowly growing `c_puct(s)`
//! 2. **Expansion**: at an unexpanded node, ask the evaluator for priors and
//!    create one edge per legal action; child states are built lazily
//! 3. **Evaluation**: terminal nodes use the exact game outcome, others the
//!    evaluator's value
//! 4. **Backpropagation**: update edge visit counts and value sums along the
//!    path, flipping the sign at every ply
//!
//! Nodes live in an arena indexed by [`NodeId`], and a fingerprint index lets
//! transposed move orders share a node.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, Player};
//! use games_quoridor::Quoridor;
//! use mcts::{MctsConfig, MctsSearch, UniformEvaluator};
//!
//! let game = Quoridor::new(5).unwrap();
//! let evaluator = UniformEvaluator::new();
//! let config = MctsConfig::for_testing();
//!
//! let mut search = MctsSearch::new(&game, &evaluator, config);
//! let state = game.initial_state();
//! let result = search.search(&state, Player::One).unwrap();
//!
//! assert!(game.legal_action_mask(&state, Player::One)[result.action]);
//! assert!((result.policy.iter().sum::<f32>() - 1.0).abs() < 1e-4);
//! ```
//!
//! # Configuration
//!
//! [`MctsConfig`] controls search behavior; `MctsConfig::default()` reads the
//! `[mcts]` section of the shared defaults:
//!
//! - `num_simulations`: simulations per `search` call (default: 100)
//! - `c_puct_base` / `c_puct_init`: shape of the exploration bound
//!   (defaults: 19652 / 2.5)
//! - `temperature`: sharpness of the visit distribution (1.0 = proportional,
//!   0.0 = greedy)
//! - `dirichlet_alpha` / `dirichlet_epsilon`: root noise, off by default
//! - `reuse_tree`: keep the subtree below the next root between searches

pub mod config;
pub mod evaluator;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use engine_core::{Game, Player};
pub use evaluator::{
    sanitize, ContractViolation, EvalResult, Evaluator, EvaluatorError, RandomEvaluator,
    Sanitized, UniformEvaluator,
};
pub use node::{Edge, MctsNode, NodeId};
pub use search::{MctsSearch, SearchError, SearchResult, SearchStats};
pub use tree::{MctsTree, TreeStats};
