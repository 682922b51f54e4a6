//! Tests for the configuration module.

use super::*;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.data_dir, "./data");
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.common.seed, None);
    assert_eq!(config.board.rows, 3);
    assert_eq!(config.board.cols, 3);
    assert_eq!(config.board.k, 3);
}

#[test]
fn test_search_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.alphabeta.depth, 6);
    assert!(config.alphabeta.move_ordering);
    assert_eq!(config.mcts.iterations, 500);
    assert!((config.mcts.uct_const - 1.1).abs() < f64::EPSILON);
    assert!((config.mcts.expand_policy_prob - 0.9).abs() < f64::EPSILON);
}

#[test]
fn test_arena_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.arena.games, 150);
    assert_eq!(config.arena.player1, "mcts");
    assert_eq!(config.arena.player2, "alphabeta");
    assert_eq!(config.arena.log_interval, 10);
    assert!(config.arena.p1_iterations.is_none());
    assert!(config.arena.p2_iterations.is_none());
}

#[test]
fn test_mnk_env_overrides() {
    std::env::set_var("MNK_BOARD_ROWS", "6");
    std::env::set_var("MNK_MCTS_UCT_CONST", "1.4");
    std::env::set_var("MNK_ARENA_PLAYER2", "random");
    std::env::set_var("MNK_ARENA_P1_ITERATIONS", "250");
    std::env::set_var("MNK_ALPHABETA_DEPTH", "not-a-number");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.board.rows, 6);
    assert!((config.mcts.uct_const - 1.4).abs() < f64::EPSILON);
    assert_eq!(config.arena.player2, "random");
    assert_eq!(config.arena.p1_iterations, Some(250));
    // unparseable values leave the previous setting in place
    assert_eq!(config.alphabeta.depth, 6);

    std::env::remove_var("MNK_BOARD_ROWS");
    std::env::remove_var("MNK_MCTS_UCT_CONST");
    std::env::remove_var("MNK_ARENA_PLAYER2");
    std::env::remove_var("MNK_ARENA_P1_ITERATIONS");
    std::env::remove_var("MNK_ALPHABETA_DEPTH");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"
seed = 42

[board]
rows = 5
cols = 4
k = 3

[mcts]
iterations = 1000
uct_const = 2.0

[arena]
games = 20
player1 = "alphabeta"
p2_iterations = 50
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.common.seed, Some(42));
    assert_eq!((config.board.rows, config.board.cols, config.board.k), (5, 4, 3));
    assert_eq!(config.mcts.iterations, 1000);
    assert!((config.mcts.uct_const - 2.0).abs() < f64::EPSILON);
    assert_eq!(config.arena.games, 20);
    assert_eq!(config.arena.player1, "alphabeta");
    assert_eq!(config.arena.p2_iterations, Some(50));
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[board]
k = 2
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.board.k, 2);
    assert_eq!(config.board.rows, 3); // Default
    assert_eq!(config.alphabeta.depth, 6); // Default
    assert!((config.mcts.expand_policy_prob - 0.9).abs() < f64::EPSILON); // Default
    assert_eq!(config.arena.player2, "alphabeta"); // Default
}

#[test]
fn test_load_from_missing_path_uses_defaults() {
    let config = load_from_path(std::path::Path::new("/nonexistent/mnk/config.toml"));
    assert_eq!(config.arena.games, 150);
}

#[test]
fn test_load_from_malformed_file_uses_defaults() {
    let path = std::env::temp_dir().join(format!("mnk-config-test-{}.toml", std::process::id()));
    std::fs::write(&path, "[board\nrows = ").unwrap();
    let config = load_from_path(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.board.cols, 3);
}
