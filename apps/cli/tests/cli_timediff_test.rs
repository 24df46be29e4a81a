//! Integration tests for the `fmap timediff` command.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::TempDir;

fn now_secs() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
}

#[test]
fn test_timediff_requires_an_offset() {
    let mut cmd = Command::cargo_bin("fmap").unwrap();
    cmd.args(["timediff", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("either `future` or `past` must be configured"));
}

#[test]
fn test_timediff_past_offset() {
    let old = (now_secs() - 7200).to_string();
    let recent = (now_secs() - 10).to_string();

    let mut cmd = Command::cargo_bin("fmap").unwrap();
    cmd.args(["timediff", "--past", "3600", &old, &recent])
        .assert()
        .success()
        .stdout(format!("{old}\tmatch\n{recent}\tno-match\n"));
}

#[test]
fn test_timediff_future_offset_rfc3339() {
    let mut cmd = Command::cargo_bin("fmap").unwrap();
    cmd.args(["timediff", "--future", "60", "2999-01-01T00:00:00Z", "2000-01-01T00:00:00Z"])
        .assert()
        .success()
        .stdout("2999-01-01T00:00:00Z\tmatch\n2000-01-01T00:00:00Z\tno-match\n");
}

#[test]
fn test_timediff_offsets_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("fmap.toml");
    fs::write(&config, "[timediff]\nPast = 60\n").unwrap();

    let mut cmd = Command::cargo_bin("fmap").unwrap();
    cmd.args(["--config", config.to_str().unwrap(), "timediff", "1000"])
        .assert()
        .success()
        .stdout("1000\tmatch\n");
}

#[test]
fn test_timediff_invalid_timestamp() {
    let mut cmd = Command::cargo_bin("fmap").unwrap();
    cmd.args(["timediff", "--past", "1", "not-a-time"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp"));
}
