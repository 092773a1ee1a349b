//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::Path;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by QUORIDOR_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("QUORIDOR_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from QUORIDOR_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "QUORIDOR_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // Parseable field (usize, u64, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(raw) = std::env::var($key) {
            match raw.parse() {
                Ok(v) => $config.$section.$field = v,
                Err(_) => warn!("Ignoring {}={}: not a valid value", $key, raw),
            }
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: QUORIDOR_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Game
    env_override!(config, game.board_size, "QUORIDOR_GAME_BOARD_SIZE");
    env_override!(
        config,
        game.walls_per_player,
        "QUORIDOR_GAME_WALLS_PER_PLAYER"
    );
    env_override!(config, game.max_plies, "QUORIDOR_GAME_MAX_PLIES");

    // MCTS
    env_override!(
        config,
        mcts.num_simulations,
        "QUORIDOR_MCTS_NUM_SIMULATIONS"
    );
    env_override!(config, mcts.c_puct_base, "QUORIDOR_MCTS_C_PUCT_BASE");
    env_override!(config, mcts.c_puct_init, "QUORIDOR_MCTS_C_PUCT_INIT");
    env_override!(config, mcts.temperature, "QUORIDOR_MCTS_TEMPERATURE");
    env_override!(
        config,
        mcts.temp_threshold,
        "QUORIDOR_MCTS_TEMP_THRESHOLD"
    );
    env_override!(
        config,
        mcts.dirichlet_alpha,
        "QUORIDOR_MCTS_DIRICHLET_ALPHA"
    );
    env_override!(
        config,
        mcts.dirichlet_weight,
        "QUORIDOR_MCTS_DIRICHLET_WEIGHT"
    );
    env_override!(config, mcts.reuse_tree, "QUORIDOR_MCTS_REUSE_TREE");
    env_override!(config, mcts.seed, "QUORIDOR_MCTS_SEED");

    config
}
