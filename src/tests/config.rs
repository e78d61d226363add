use super::Config;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("sectile.toml"));
    assert_eq!(config, Config::default());
    assert!(config.log_path().is_none());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sectile.toml");
    fs::write(&path, "notice_ms = 500\nlog_file = \"sectile.log\"\n").unwrap();

    let config = Config::load_from(&path);
    assert_eq!(config.notice_ttl(), Duration::from_millis(500));
    assert_eq!(config.tick_rate(), Duration::from_millis(100));
    assert_eq!(config.settings_file, ".sectile.json");
    assert_eq!(config.log_path().unwrap().to_str(), Some("sectile.log"));
}

#[test]
fn test_invalid_file_falls_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sectile.toml");
    fs::write(&path, "notice_ms = \"soon\"").unwrap();

    assert_eq!(Config::load_from(&path), Config::default());
}
