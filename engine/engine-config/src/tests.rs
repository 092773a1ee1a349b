//! Tests for the configuration module.

use super::*;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.game.board_size, 9);
    assert_eq!(config.game.walls_per_player, 0);
    assert_eq!(config.game.max_plies, 0);
    assert_eq!(config.mcts.num_simulations, 100);
}

#[test]
fn test_mcts_defaults() {
    let config = CentralConfig::default();
    assert!((config.mcts.c_puct_base - 19652.0).abs() < f64::EPSILON);
    assert!((config.mcts.c_puct_init - 2.5).abs() < f64::EPSILON);
    assert!((config.mcts.temperature - 1.0).abs() < f64::EPSILON);
    assert_eq!(config.mcts.temp_threshold, 15);
    assert!(config.mcts.dirichlet_alpha.abs() < f64::EPSILON);
    assert!((config.mcts.dirichlet_weight - 0.25).abs() < f64::EPSILON);
    assert!(config.mcts.reuse_tree);
    assert_eq!(config.mcts.seed, 42);
}

#[test]
fn test_env_overrides() {
    std::env::set_var("QUORIDOR_GAME_WALLS_PER_PLAYER", "4");
    std::env::set_var("QUORIDOR_MCTS_C_PUCT_INIT", "1.5");
    std::env::set_var("QUORIDOR_MCTS_REUSE_TREE", "false");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.game.walls_per_player, 4);
    assert!((config.mcts.c_puct_init - 1.5).abs() < f64::EPSILON);
    assert!(!config.mcts.reuse_tree);

    std::env::remove_var("QUORIDOR_GAME_WALLS_PER_PLAYER");
    std::env::remove_var("QUORIDOR_MCTS_C_PUCT_INIT");
    std::env::remove_var("QUORIDOR_MCTS_REUSE_TREE");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("QUORIDOR_GAME_MAX_PLIES", "lots");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.game.max_plies, 0);

    std::env::remove_var("QUORIDOR_GAME_MAX_PLIES");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[game]
board_size = 5
walls_per_player = 3

[mcts]
num_simulations = 400
c_puct_base = 1000.0
seed = 7
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.game.board_size, 5);
    assert_eq!(config.game.walls_per_player, 3);
    assert_eq!(config.mcts.num_simulations, 400);
    assert!((config.mcts.c_puct_base - 1000.0).abs() < f64::EPSILON);
    assert_eq!(config.mcts.seed, 7);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[game]
board_size = 7
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.game.board_size, 7);
    assert_eq!(config.game.max_plies, 0); // Default
    assert_eq!(config.mcts.num_simulations, 100); // Default
    assert!(config.mcts.reuse_tree); // Default
}

#[test]
fn test_load_from_missing_path_falls_back_to_defaults() {
    let config = load_from_path(std::path::Path::new("/nonexistent/quoridor/config.toml"));
    assert_eq!(config.game.board_size, 9);
}

#[test]
fn test_load_from_path_reads_file() {
    let dir = std::env::temp_dir().join(format!("quoridor-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[mcts]\nnum_simulations = 25\n").unwrap();

    let config = load_from_path(&path);
    assert_eq!(config.mcts.num_simulations, 25);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.game.board_size, cloned.game.board_size);
    assert_eq!(config.mcts.seed, cloned.mcts.seed);
}
