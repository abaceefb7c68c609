//! CLI integration tests for sievekeeper.
//!
//! Each test uses an isolated temp directory for the database, ensuring tests
//! can run in parallel safely.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

use std::path::Path;

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let ctx = Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        };
        ctx.cmd().arg("init").assert().success();
        ctx
    }

    fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    fn data_dir_str(&self) -> String {
        self.data_dir().to_string_lossy().to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("sievekeeper").expect("failed to find binary");
        cmd.env("NO_COLOR", "1")
            .args(["--data-dir", &self.data_dir_str()]);
        cmd
    }

    fn put(&self, owner: &str, name: &str, content: &str) -> assert_cmd::assert::Assert {
        self.cmd()
            .args(["script", "put", owner, name])
            .write_stdin(content)
            .assert()
    }

    fn list_json(&self, owner: &str) -> Value {
        let output = self
            .cmd()
            .args(["script", "list", owner, "--json"])
            .output()
            .expect("failed to run command");

        serde_json::from_slice(&output.stdout).expect("failed to parse JSON")
    }
}

#[test]
fn test_init_creates_database() {
    let ctx = TestContext::new();
    assert!(ctx.data_dir().join("sievekeeper.db").exists());
}

#[test]
fn test_commands_require_init() {
    let temp = TempDir::new().unwrap();
    Command::cargo_bin("sievekeeper")
        .unwrap()
        .args([
            "--data-dir",
            &temp.path().to_string_lossy(),
            "script",
            "list",
            "alice",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sievekeeper init"));
}

#[test]
fn test_put_and_get_from_stdin() {
    let ctx = TestContext::new();
    ctx.put("alice", "vacation", "require \"vacation\";\n")
        .success()
        .stdout(predicate::str::contains("Stored script 'vacation'"));

    ctx.cmd()
        .args(["script", "get", "alice", "vacation"])
        .assert()
        .success()
        .stdout("require \"vacation\";\n");
}

#[test]
fn test_put_from_file() {
    let ctx = TestContext::new();
    let file = ctx.temp_dir.child("rules.sieve");
    file.write_str("discard;").unwrap();

    ctx.cmd()
        .args(["script", "put", "alice", "rules", "--file"])
        .arg(file.path())
        .assert()
        .success();

    ctx.cmd()
        .args(["script", "get", "alice", "rules"])
        .assert()
        .success()
        .stdout("discard;");
}

#[test]
fn test_get_missing_script_fails() {
    let ctx = TestContext::new();
    ctx.cmd()
        .args(["script", "get", "alice", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("script not found"));
}

#[test]
fn test_list_json_reports_activation() {
    let ctx = TestContext::new();
    ctx.put("alice", "a", "keep;").success();
    ctx.put("alice", "b", "discard;").success();

    ctx.cmd()
        .args(["script", "activate", "alice", "a"])
        .assert()
        .success();
    ctx.cmd()
        .args(["script", "activate", "alice", "b"])
        .assert()
        .success();

    let json = ctx.list_json("alice");
    assert_eq!(json["owner"], "alice");
    let scripts = json["scripts"].as_array().unwrap();
    assert_eq!(scripts.len(), 2);
    let active: Vec<&str> = scripts
        .iter()
        .filter(|s| s["active"] == true)
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(active, vec!["b"]);
}

#[test]
fn test_active_and_deactivate() {
    let ctx = TestContext::new();
    ctx.put("alice", "a", "keep;").success();
    ctx.cmd()
        .args(["script", "activate", "alice", "a"])
        .assert()
        .success();

    ctx.cmd()
        .args(["script", "active", "alice"])
        .assert()
        .success()
        .stdout("keep;");
    ctx.cmd()
        .args(["script", "active", "alice", "--date"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d{4}-\d{2}-\d{2}T").unwrap());

    ctx.cmd()
        .args(["script", "deactivate", "alice"])
        .assert()
        .success();
    ctx.cmd()
        .args(["script", "deactivate", "alice"])
        .assert()
        .success();
    ctx.cmd()
        .args(["script", "active", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no active script"));
}

#[test]
fn test_delete_requires_yes_in_non_interactive_mode() {
    let ctx = TestContext::new();
    ctx.put("alice", "a", "keep;").success();

    ctx.cmd()
        .args(["script", "delete", "alice", "a", "--non-interactive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes is required"));

    ctx.cmd()
        .args(["script", "delete", "alice", "a", "--yes"])
        .assert()
        .success();
    assert!(ctx.list_json("alice")["scripts"].as_array().unwrap().is_empty());
}

#[test]
fn test_delete_active_script_refused() {
    let ctx = TestContext::new();
    ctx.put("alice", "a", "keep;").success();
    ctx.cmd()
        .args(["script", "activate", "alice", "a"])
        .assert()
        .success();

    ctx.cmd()
        .args(["script", "delete", "alice", "a", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("script is active"));
}

#[test]
fn test_rename() {
    let ctx = TestContext::new();
    ctx.put("alice", "a", "keep;").success();
    ctx.put("alice", "b", "discard;").success();

    ctx.cmd()
        .args(["script", "rename", "alice", "a", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    ctx.cmd()
        .args(["script", "rename", "alice", "a", "c"])
        .assert()
        .success();
    ctx.cmd()
        .args(["script", "get", "alice", "c"])
        .assert()
        .success()
        .stdout("keep;");
}

#[test]
fn test_default_quota_enforced() {
    let ctx = TestContext::new();
    ctx.cmd()
        .args(["quota", "set", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set default quota to 10"));

    ctx.put("alice", "s", "01234567890")
        .failure()
        .stderr(predicate::str::contains("quota exceeded"));
    ctx.put("alice", "s", "0123456789").success();

    ctx.cmd()
        .args(["script", "check", "alice", "other", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quota exceeded"));
    ctx.cmd()
        .args(["script", "check", "alice", "s", "10"])
        .assert()
        .success();
}

#[test]
fn test_owner_quota_lifecycle() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args(["quota", "get", "--owner", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quota not found"));

    ctx.cmd()
        .args(["quota", "set", "unlimited", "--owner", "alice"])
        .assert()
        .success();
    ctx.cmd()
        .args(["quota", "get", "--owner", "alice"])
        .assert()
        .success()
        .stdout("unlimited\n");

    ctx.cmd()
        .args(["quota", "remove", "--owner", "alice", "--yes"])
        .assert()
        .success();
    ctx.cmd()
        .args(["quota", "remove", "--owner", "alice", "--yes"])
        .assert()
        .success();
    ctx.cmd()
        .args(["quota", "get", "--owner", "alice"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_quota_rejected() {
    let ctx = TestContext::new();
    ctx.cmd()
        .args(["quota", "set", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a byte count"));
}

#[test]
fn test_config_file_supplies_data_dir() {
    let temp = TempDir::new().unwrap();
    let data = temp.child("data");
    let config = temp.child("sievekeeper.toml");
    config
        .write_str(&format!(
            "data_dir = {:?}\nbusy_timeout_ms = 1000\n",
            data.path().to_string_lossy()
        ))
        .unwrap();

    Command::cargo_bin("sievekeeper")
        .unwrap()
        .arg("--config")
        .arg(config.path())
        .arg("init")
        .assert()
        .success();

    data.child("sievekeeper.db").assert(predicate::path::exists());
}
