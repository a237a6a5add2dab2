#![allow(deprecated)] // cargo_bin still works, just deprecated for custom build-dir

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

const BASE: &str = r#"{"command": "git push", "stderr": "fatal: The current branch feature-login has no upstream branch.", "correction": "git push --set-upstream origin feature-login"}
{"command": "npm install react", "stderr": "npm ERR! peer dep missing: react-dom", "correction": "npm install react react-dom"}

{"command": "xyzzy", "stderr": "bash: xyzzy: command not found", "correction": "?"}
"#;

fn fanout(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fanout").expect("fanout binary is built");
    cmd.current_dir(workdir).env_remove("RUST_LOG");
    cmd
}

/// Work directory with base examples and minimal wordlists.
fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    let wordlists = dir.path().join("wordlists");
    fs::create_dir_all(&wordlists).unwrap();
    for (name, entries) in [
        ("packages-python", "requests\nnumpy\n"),
        ("packages-node", "react\nreact-dom\nexpress\n"),
        ("packages-rust", "serde\n"),
        ("system-packages", "curl\n"),
        ("docker-images", "ubuntu\nalpine\n"),
        ("repo-names", "dotfiles\n"),
        ("github-users", "octocat\n"),
    ] {
        fs::write(wordlists.join(format!("{name}.txt")), entries).unwrap();
    }
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/base_examples.jsonl"), BASE).unwrap();
    dir
}

fn read_lines(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn default_paths_produce_augmented_corpus() {
    let dir = workspace();
    fanout(dir.path())
        .args(["-n", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Positive:"))
        .stdout(predicate::str::contains("Negative:"))
        .stdout(predicate::str::contains("% negative"));

    let records = read_lines(&dir.path().join("data/augmented.jsonl"));
    assert!(records.len() > 3);
    assert_eq!(records[0]["command"], "git push");
    assert_eq!(records[2]["correction"], "?");
    for record in &records {
        assert!(record["command"].is_string());
        assert!(record["stderr"].is_string());
        assert!(record["correction"].is_string());
    }
}

#[test]
fn missing_input_fails_with_hint() {
    let dir = workspace();
    fanout(dir.path())
        .args(["-i", "data/nope.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base example generator"));
    assert!(!dir.path().join("data/augmented.jsonl").exists());
}

#[test]
fn missing_wordlist_fails_with_hint() {
    let dir = workspace();
    fs::remove_file(dir.path().join("wordlists/docker-images.txt")).unwrap();
    fanout(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("docker-images"))
        .stderr(predicate::str::contains("fetch the wordlists"));
}

#[test]
fn unreachable_target_warns_but_succeeds() {
    let dir = workspace();
    fanout(dir.path())
        .args(["--target-count", "1000000", "--stall-limit", "3"])
        .args(["-o", "out/big.jsonl"])
        .assert()
        .success()
        .stderr(predicate::str::contains("stalled at"));
    let records = read_lines(&dir.path().join("out/big.jsonl"));
    assert!(records.len() < 1_000_000);
}

#[test]
fn shortfall_is_printed_with_logging_off() {
    let dir = workspace();
    fanout(dir.path())
        .env("RUST_LOG", "off")
        .args(["--target-count", "1000000", "--stall-limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("target examples; stalled after 2 passes"))
        .stderr(predicate::str::contains("stalled at").not());
}

#[test]
fn same_seed_same_output() {
    let dir = workspace();
    for out in ["a.jsonl", "b.jsonl"] {
        fanout(dir.path())
            .args(["--seed", "5", "--target-count", "40", "-o", out])
            .assert()
            .success();
    }
    let a = fs::read(dir.path().join("a.jsonl")).unwrap();
    let b = fs::read(dir.path().join("b.jsonl")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn config_file_and_unknown_rule() {
    let dir = workspace();
    fs::write(
        dir.path().join("fanout.toml"),
        "[run]\nvariations = 2\ndisabled-rules = [\"trailing-slash\"]\n\n[io]\noutput = \"cfg.jsonl\"\n",
    )
    .unwrap();
    fanout(dir.path()).assert().success();
    assert!(dir.path().join("cfg.jsonl").exists());

    fanout(dir.path())
        .args(["--disable-rule", "no-such-rule"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-rule"));
}
