use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("pivot")
        .env("PIVOT_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("pivot")
        .env("PIVOT_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("base_url ="));
    assert!(contents.contains("[log]"));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("pivot")
        .env("PIVOT_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_set_url_persists() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("pivot")
        .env("PIVOT_HOME", dir.path())
        .args(["config", "set-url", "http://advice.test:9000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://advice.test:9000"));

    let contents = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(contents.contains("base_url = \"http://advice.test:9000\""));
}

#[test]
fn test_config_set_url_preserves_existing_values() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "[log]\nenabled = true\n").unwrap();

    cargo_bin_cmd!("pivot")
        .env("PIVOT_HOME", dir.path())
        .args(["config", "set-url", "http://advice.test:9000"])
        .assert()
        .success();

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("base_url = \"http://advice.test:9000\""));
    assert!(contents.contains("enabled = true"));
}
