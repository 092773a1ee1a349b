//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so every crate in the workspace agrees on the same values.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    game: GameDefaults,
    mcts: MctsDefaults,
}

#[derive(Debug, Deserialize)]
struct GameDefaults {
    board_size: usize,
    walls_per_player: usize,
    max_plies: usize,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    num_simulations: u32,
    c_puct_base: f64,
    c_puct_init: f64,
    temperature: f64,
    temp_threshold: u32,
    dirichlet_alpha: f64,
    dirichlet_weight: f64,
    reuse_tree: bool,
    seed: u64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Game
pub fn board_size() -> usize {
    DEFAULTS.game.board_size
}
pub fn walls_per_player() -> usize {
    DEFAULTS.game.walls_per_player
}
pub fn max_plies() -> usize {
    DEFAULTS.game.max_plies
}

// MCTS
pub fn num_simulations() -> u32 {
    DEFAULTS.mcts.num_simulations
}
pub fn c_puct_base() -> f64 {
    DEFAULTS.mcts.c_puct_base
}
pub fn c_puct_init() -> f64 {
    DEFAULTS.mcts.c_puct_init
}
pub fn temperature() -> f64 {
    DEFAULTS.mcts.temperature
}
pub fn temp_threshold() -> u32 {
    DEFAULTS.mcts.temp_threshold
}
pub fn dirichlet_alpha() -> f64 {
    DEFAULTS.mcts.dirichlet_alpha
}
pub fn dirichlet_weight() -> f64 {
    DEFAULTS.mcts.dirichlet_weight
}
pub fn reuse_tree() -> bool {
    DEFAULTS.mcts.reuse_tree
}
pub fn seed() -> u64 {
    DEFAULTS.mcts.seed
}
