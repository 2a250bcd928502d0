//! Integration tests for the CLI.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("suiterun.ini"), config).unwrap();
    temp
}

const SIMPLE_CONFIG: &str = "\
[suite]
envlist = clean, unit, report

[env]
commands = echo running {envname}
depends =
    unit: clean
    report: unit

[env:clean]
skip_install = true
commands = echo cleaning
";

#[test]
fn cli_shows_help() {
    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.arg("--help");
    cmd.assert().success().stdout(predicate::str::contains(
        "Declarative multi-environment test suite runner",
    ));
}

#[test]
fn cli_shows_version() {
    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn order_prints_dependency_order() {
    let temp = setup_project(SIMPLE_CONFIG);
    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.current_dir(temp.path());
    cmd.arg("order");
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("clean\nunit\nreport\n"));
}

#[test]
fn order_json_emits_array() {
    let temp = setup_project(SIMPLE_CONFIG);
    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.current_dir(temp.path());
    cmd.args(["order", "--json"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let names: Vec<String> = serde_json::from_slice(&output).unwrap();
    assert_eq!(names, vec!["clean", "unit", "report"]);
}

#[test]
fn list_names_every_environment() {
    let temp = setup_project(SIMPLE_CONFIG);
    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.current_dir(temp.path());
    cmd.arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("unit"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn show_resolves_posargs_defaults() {
    let config = "\
[suite]
envlist = unit
[env]
commands = pytest --cov=odin_devices {posargs:-vv}
";
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.current_dir(temp.path());
    cmd.args(["show", "unit"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pytest --cov=odin_devices -vv"));
}

#[test]
fn show_unknown_environment_fails() {
    let temp = setup_project(SIMPLE_CONFIG);
    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.current_dir(temp.path());
    cmd.args(["show", "missing"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown environment: missing"));
}

#[test]
fn run_dry_run_prints_commands_without_executing() {
    let config = "\
[suite]
envlist = unit
[env]
commands = touch should-not-exist
";
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.current_dir(temp.path());
    cmd.args(["run", "--dry-run"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[unit] touch should-not-exist"));

    assert!(!temp.path().join("should-not-exist").exists());
}

#[test]
fn run_executes_in_dependency_order() {
    let config = "\
[suite]
envlist = second, first
[env]
commands =
    first: echo FIRST-RAN
    second: echo SECOND-RAN
depends =
    second: first
";
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.current_dir(temp.path());
    cmd.arg("run");
    let assert = cmd.assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    let first = stdout.find("FIRST-RAN").unwrap();
    let second = stdout.find("SECOND-RAN").unwrap();
    assert!(first < second);
}

#[test]
fn run_passes_posargs_after_double_dash() {
    let config = "\
[suite]
envlist = unit
[env]
commands = echo args={posargs:none}
";
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.current_dir(temp.path());
    cmd.args(["run", "--", "-x", "-k", "smoke"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("args=-x -k smoke"));
}

#[test]
fn missing_config_reports_not_found() {
    let temp = TempDir::new().unwrap();
    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.current_dir(temp.path());
    cmd.arg("list");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration not found"));
}

#[test]
fn explicit_config_path_overrides_default() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("alt.ini"), SIMPLE_CONFIG).unwrap();

    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.current_dir(temp.path());
    cmd.args(["--config", "alt.ini", "order"]);
    cmd.assert().success();
}

#[test]
fn cycle_in_depends_fails_before_execution() {
    let config = "\
[suite]
envlist = a, b
[env]
commands = touch ran-anyway
depends =
    a: b
    b: a
";
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.current_dir(temp.path());
    cmd.arg("run");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Circular dependency"));

    assert!(!temp.path().join("ran-anyway").exists());
}

#[test]
fn failing_environment_sets_exit_code() {
    let config = "\
[suite]
envlist = bad
[env]
commands = exit 4
";
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("suiterun"));
    cmd.current_dir(temp.path());
    cmd.arg("run");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Command failed"));
}
