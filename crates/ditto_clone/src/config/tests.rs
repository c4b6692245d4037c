use pretty_assertions::assert_eq;

use super::*;

#[test]
fn default_is_unbounded_tree() {
    let config = CloneConfig::default();
    assert_eq!(config.mode, CloneMode::Tree);
    assert_eq!(config.max_depth, None);
}

#[test]
fn builder_methods() {
    let config = CloneConfig::new()
        .with_mode(CloneMode::Graph)
        .with_max_depth(64);
    assert_eq!(
        config,
        CloneConfig {
            mode: CloneMode::Graph,
            max_depth: Some(64)
        }
    );
}

#[test]
fn mode_parses_case_insensitively() {
    assert_eq!("Graph".parse::<CloneMode>().unwrap(), CloneMode::Graph);
    assert_eq!(" tree ".parse::<CloneMode>().unwrap(), CloneMode::Tree);
    assert!("dag".parse::<CloneMode>().is_err());
}

#[test]
fn from_vars_reads_both_settings() {
    let config = CloneConfig::from_vars(Some("graph"), Some("500"));
    assert_eq!(config.mode, CloneMode::Graph);
    assert_eq!(config.max_depth, Some(500));
}

#[test]
fn from_vars_ignores_garbage() {
    let config = CloneConfig::from_vars(Some("sideways"), Some("deep"));
    assert_eq!(config, CloneConfig::default());
}

#[test]
fn from_vars_with_nothing_set() {
    assert_eq!(CloneConfig::from_vars(None, None), CloneConfig::default());
}
