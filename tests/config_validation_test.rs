//! Configuration loading and default tests

use zfs_dashboard::config::Config;

#[test]
fn test_defaults_without_file() {
    // A missing config file is fine; every section has defaults
    let config = Config::load("/nonexistent/path/Config.toml").expect("defaults should load");
    assert_eq!(config.refresh.interval_seconds, 5);
    assert_eq!(config.stream.interval_seconds, 1);
    assert_eq!(config.stream.stop_grace_seconds, 5);
    assert_eq!(config.stream.queue_capacity, 256);
    assert!(config.filter.pool.is_none());
    assert!(config.filter.dataset_pattern.is_none());
}

#[test]
fn test_default_trait_matches_loaded_defaults() {
    let config = Config::default();
    assert_eq!(config.refresh.interval_seconds, 5);
    assert_eq!(config.stream.queue_capacity, 256);
}
