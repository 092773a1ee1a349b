//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_board_size() -> usize {
    defaults::board_size()
}
fn d_walls_per_player() -> usize {
    defaults::walls_per_player()
}
fn d_max_plies() -> usize {
    defaults::max_plies()
}
fn d_num_sims() -> u32 {
    defaults::num_simulations()
}
fn d_c_puct_base() -> f64 {
    defaults::c_puct_base()
}
fn d_c_puct_init() -> f64 {
    defaults::c_puct_init()
}
fn d_temperature() -> f64 {
    defaults::temperature()
}
fn d_temp_threshold() -> u32 {
    defaults::temp_threshold()
}
fn d_dirichlet_alpha() -> f64 {
    defaults::dirichlet_alpha()
}
fn d_dirichlet_weight() -> f64 {
    defaults::dirichlet_weight()
}
fn d_reuse_tree() -> bool {
    defaults::reuse_tree()
}
fn d_seed() -> u64 {
    defaults::seed()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
}

/// Board geometry and game-length limits
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the pawn grid. Must be odd, between 3 and 11.
    #[serde(default = "d_board_size")]
    pub board_size: usize,
    /// Walls each player starts with. 0 derives it from the board size.
    #[serde(default = "d_walls_per_player")]
    pub walls_per_player: usize,
    /// Plies after which an unfinished game is a draw. 0 derives it from the
    /// board size.
    #[serde(default = "d_max_plies")]
    pub max_plies: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: defaults::board_size(),
            walls_per_player: defaults::walls_per_player(),
            max_plies: defaults::max_plies(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_num_sims")]
    pub num_simulations: u32,
    #[serde(default = "d_c_puct_base")]
    pub c_puct_base: f64,
    #[serde(default = "d_c_puct_init")]
    pub c_puct_init: f64,
    #[serde(default = "d_temperature")]
    pub temperature: f64,
    /// Ply after which callers should switch to greedy play.
    #[serde(default = "d_temp_threshold")]
    pub temp_threshold: u32,
    #[serde(default = "d_dirichlet_alpha")]
    pub dirichlet_alpha: f64,
    #[serde(default = "d_dirichlet_weight")]
    pub dirichlet_weight: f64,
    #[serde(default = "d_reuse_tree")]
    pub reuse_tree: bool,
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: defaults::num_simulations(),
            c_puct_base: defaults::c_puct_base(),
            c_puct_init: defaults::c_puct_init(),
            temperature: defaults::temperature(),
            temp_threshold: defaults::temp_threshold(),
            dirichlet_alpha: defaults::dirichlet_alpha(),
            dirichlet_weight: defaults::dirichlet_weight(),
            reuse_tree: defaults::reuse_tree(),
            seed: defaults::seed(),
        }
    }
}
