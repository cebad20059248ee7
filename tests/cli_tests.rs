mod support;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use support::config::write_temp_config;

#[test]
fn check_config_accepts_valid_file() {
    let path = write_temp_config(
        "[price_source]\nurl = \"http://localhost:3000/api/fuel\"\n[telegram]\nenabled = false\n",
    );

    let assert = Command::cargo_bin("fuelwatch")
        .unwrap()
        .args(["--color", "never", "check", "config", "--config"])
        .arg(&path)
        .assert();
    let _ = fs::remove_file(&path);

    assert
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("disabled"));
}

#[test]
fn check_config_fails_on_invalid_value() {
    let path = write_temp_config("[poll]\ninterval_secs = 0\n");

    let assert = Command::cargo_bin("fuelwatch")
        .unwrap()
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert();
    let _ = fs::remove_file(&path);

    assert
        .failure()
        .stderr(predicate::str::contains("poll.interval_secs"));
}

#[test]
fn check_config_json_output_is_machine_readable() {
    let path = write_temp_config("[telegram]\nenabled = false\n");

    let output = Command::cargo_bin("fuelwatch")
        .unwrap()
        .args(["--json", "check", "config", "--config"])
        .arg(&path)
        .output()
        .unwrap();
    let _ = fs::remove_file(&path);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        let value: serde_json::Value = serde_json::from_str(line).expect("json line");
        assert!(value.get("type").is_some());
    }
}

#[test]
fn missing_config_file_fails() {
    Command::cargo_bin("fuelwatch")
        .unwrap()
        .args(["check", "config", "--config", "/nonexistent/fuelwatch.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    Command::cargo_bin("fuelwatch")
        .unwrap()
        .arg("subscribe")
        .assert()
        .failure();
}
