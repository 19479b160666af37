use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn spektr() -> Command {
    let mut cmd = Command::cargo_bin("spektr").unwrap();
    cmd.env_remove("SPEKTR_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("web/node_modules/react")).unwrap();
    fs::write(root.join("web/package.json"), "{}").unwrap();
    fs::write(root.join("web/node_modules/react/index.js"), vec![b'x'; 2048]).unwrap();

    fs::create_dir_all(root.join("api/target/release")).unwrap();
    fs::write(root.join("api/Cargo.toml"), "[package]").unwrap();
    fs::write(root.join("api/target/release/api"), vec![b'x'; 1024]).unwrap();

    dir
}

#[test]
fn shows_help() {
    spektr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build artifacts"));
}

#[test]
fn shows_version() {
    spektr()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn headless_lists_candidates() {
    let dir = workspace();

    spektr()
        .args(["--mode", "headless", "--quiet"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Node.js |"))
        .stdout(predicate::str::contains("| 2 KiB"))
        .stdout(predicate::str::contains("Rust |"))
        .stdout(predicate::str::contains("Found 2 projects, 3 KiB reclaimable"));
}

#[test]
fn headless_types_filter() {
    let dir = workspace();

    spektr()
        .args(["-m", "headless", "-q", "-t", "rust"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust |"))
        .stdout(predicate::str::contains("Node.js").not())
        .stdout(predicate::str::contains("Found 1 project,"));
}

#[test]
fn headless_json_output() {
    let dir = workspace();

    let output = spektr()
        .args(["-m", "headless", "--json"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["candidates"].as_array().unwrap().len(), 2);
    assert_eq!(report["total_bytes"], 3072);
    // Largest first
    assert_eq!(report["candidates"][0]["strategy"], "Node.js");
    assert_eq!(report["candidates"][0]["risk"], "low");
    assert_eq!(report["cancelled"], false);
}

#[test]
fn headless_empty_tree() {
    let dir = TempDir::new().unwrap();

    spektr()
        .args(["-m", "headless", "-q"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 projects"));
}

#[test]
fn invalid_root_fails() {
    let dir = TempDir::new().unwrap();

    spektr()
        .args(["-m", "headless"])
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn unknown_types_fail() {
    let dir = workspace();

    spektr()
        .args(["-m", "headless", "-t", "cobol"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid types"));
}

#[test]
fn config_file_is_applied() {
    let dir = workspace();
    let config = dir.path().join("spektr.toml");
    fs::write(&config, "[strategies]\ndisabled = [\"node\"]\n").unwrap();

    spektr()
        .args(["-m", "headless", "-q", "-c"])
        .arg(&config)
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Node.js").not())
        .stdout(predicate::str::contains("Rust |"));
}

#[test]
fn missing_config_file_fails() {
    let dir = workspace();

    spektr()
        .args(["-m", "headless", "-c"])
        .arg(dir.path().join("nope.toml"))
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
