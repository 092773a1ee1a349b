//! MCTS configuration parameters.

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of simulations to run per search.
    pub num_simulations: u32,

    /// Visit scale of the growing exploration term:
    /// `c_puct(s) = ln((1 + N(s) + c_puct_base) / c_puct_base) + c_puct_init`.
    pub c_puct_base: f32,

    /// Exploration constant at low visit counts.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub c_puct_init: f32,

    /// Temperature for action selection after search.
    /// 1.0 = sample proportional to visit counts
    /// 0.0 = always pick most-visited (argmax)
    pub temperature: f32,

    /// Ply from which callers should switch to greedy play (temperature 0).
    pub temp_threshold: u32,

    /// Dirichlet noise alpha for root node exploration.
    /// Set to 0.0 to disable noise (for evaluation/inference).
    pub dirichlet_alpha: f32,

    /// Fraction of prior that comes from Dirichlet noise at root.
    /// AlphaZero uses 0.25, meaning 75% prior + 25% noise.
    pub dirichlet_epsilon: f32,

    /// Keep the subtree below a new root between searches instead of
    /// rebuilding from scratch.
    pub reuse_tree: bool,

    /// Seed for tie-breaking, sampling and noise.
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self::from_central(&engine_config::MctsConfig::default())
    }
}

impl MctsConfig {
    /// Build from the `[mcts]` section of the central config.
    pub fn from_central(config: &engine_config::MctsConfig) -> Self {
        Self {
            num_simulations: config.num_simulations,
            c_puct_base: config.c_puct_base as f32,
            c_puct_init: config.c_puct_init as f32,
            temperature: config.temperature as f32,
            temp_threshold: config.temp_threshold,
            dirichlet_alpha: config.dirichlet_alpha as f32,
            dirichlet_epsilon: config.dirichlet_weight as f32,
            reuse_tree: config.reuse_tree,
            seed: config.seed,
        }
    }

    /// Create config for training (with exploration noise).
    pub fn for_training() -> Self {
        Self {
            dirichlet_alpha: 0.3,
            dirichlet_epsilon: 0.25,
            temperature: 1.0,
            ..Self::default()
        }
    }

    /// Create config for evaluation/inference (no noise, greedy selection).
    pub fn for_evaluation() -> Self {
        Self {
            dirichlet_alpha: 0.0, // No noise
            dirichlet_epsilon: 0.0,
            temperature: 0.0, // Greedy
            ..Self::default()
        }
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 50,
            dirichlet_alpha: 0.0,
            dirichlet_epsilon: 0.0,
            temperature: 0.0,
            seed: 42,
            ..Self::default()
        }
    }

    /// Temperature to use at `ply`: the configured temperature before
    /// `temp_threshold`, greedy afterwards.
    pub fn temperature_at(&self, ply: u32) -> f32 {
        if ply < self.temp_threshold {
            self.temperature
        } else {
            0.0
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set the exploration constants.
    pub fn with_c_puct(mut self, base: f32, init: f32) -> Self {
        self.c_puct_base = base;
        self.c_puct_init = init;
        self
    }

    /// Builder pattern: set temperature.
    pub fn with_temperature(mut self, t: f32) -> Self {
        self.temperature = t;
        self
    }

    /// Builder pattern: enable root noise.
    pub fn with_dirichlet(mut self, alpha: f32, epsilon: f32) -> Self {
        self.dirichlet_alpha = alpha;
        self.dirichlet_epsilon = epsilon;
        self
    }

    pub fn with_reuse_tree(mut self, reuse: bool) -> Self {
        self.reuse_tree = reuse;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.num_simulations, 100);
        assert!((config.c_puct_base - 19652.0).abs() < 1e-3);
        assert!((config.c_puct_init - 2.5).abs() < 1e-6);
        assert!(config.dirichlet_alpha.abs() < 1e-6);
        assert!(config.reuse_tree);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_simulations(400)
            .with_temperature(0.5)
            .with_c_puct(1000.0, 1.25)
            .with_reuse_tree(false)
            .with_seed(7);

        assert_eq!(config.num_simulations, 400);
        assert!((config.temperature - 0.5).abs() < 1e-6);
        assert!((config.c_puct_base - 1000.0).abs() < 1e-6);
        assert!((config.c_puct_init - 1.25).abs() < 1e-6);
        assert!(!config.reuse_tree);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_evaluation_config() {
        let config = MctsConfig::for_evaluation();
        assert!((config.dirichlet_alpha).abs() < 1e-6);
        assert!((config.temperature).abs() < 1e-6);
    }

    #[test]
    fn test_from_central() {
        let central = engine_config::MctsConfig {
            num_simulations: 25,
            dirichlet_alpha: 0.5,
            dirichlet_weight: 0.1,
            seed: 9,
            ..Default::default()
        };
        let config = MctsConfig::from_central(&central);
        assert_eq!(config.num_simulations, 25);
        assert!((config.dirichlet_alpha - 0.5).abs() < 1e-6);
        assert!((config.dirichlet_epsilon - 0.1).abs() < 1e-6);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn test_temperature_threshold() {
        let config = MctsConfig::default().with_temperature(1.0);
        assert_eq!(config.temp_threshold, 15);
        assert!((config.temperature_at(0) - 1.0).abs() < 1e-6);
        assert!((config.temperature_at(14) - 1.0).abs() < 1e-6);
        assert!(config.temperature_at(15).abs() < 1e-6);
    }
}
