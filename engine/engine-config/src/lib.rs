//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across the game engine and the search.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`QUORIDOR_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! QUORIDOR_<SECTION>_<KEY>=value
//!
//! Examples:
//!     QUORIDOR_GAME_BOARD_SIZE=5
//!     QUORIDOR_MCTS_NUM_SIMULATIONS=400
//!     QUORIDOR_MCTS_REUSE_TREE=false
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
