//! Binary-level checks for failures that must happen before any remote call.
//!
//! The endpoint points at a closed local port, so a test that did reach the
//! network would fail loudly instead of touching a real account.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DEAD_ENDPOINT: &str = "http://127.0.0.1:9";

/// Points the user config lookup at `home` so a developer's own
/// `brandsync/config.toml` never leaks into a run.
fn isolated(bin: &str, home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(bin).unwrap();
    cmd.env("XDG_CONFIG_HOME", home)
        .env("HOME", home)
        .env("AWS_ACCESS_KEY_ID", "test")
        .env("AWS_SECRET_ACCESS_KEY", "test")
        .env_remove("AWS_PROFILE")
        .env_remove("BRANDSYNC_CONFIG")
        .env_remove("BRANDSYNC_LOOKUP");
    cmd
}

fn brandsync(home: &Path) -> Command {
    let mut cmd = isolated("brandsync", home);
    cmd.env("BRANDSYNC_ENDPOINT_URL", DEAD_ENDPOINT);
    cmd
}

fn external(home: &Path) -> Command {
    isolated("brandsync-external", home)
}

fn fixtures() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("settings.json"), r#"{"categories": {}}"#).unwrap();
    fs::write(dir.path().join("assets.json"), "[]").unwrap();
    dir
}

fn positional<'a>(settings: &'a Path, assets: &'a Path) -> Vec<&'a OsStr> {
    vec![
        OsStr::new("us-east-1_AbCdEf"),
        OsStr::new("client123"),
        OsStr::new("us-east-1"),
        settings.as_os_str(),
        assets.as_os_str(),
        OsStr::new("portal"),
    ]
}

#[test]
fn test_wrong_argument_count_exits_1() {
    let dir = fixtures();
    brandsync(dir.path())
        .args(["us-east-1_AbCdEf", "client123"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_help_exits_0() {
    let dir = fixtures();
    brandsync(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("managed login branding"));
}

#[test]
fn test_missing_settings_file() {
    let dir = fixtures();
    let missing = dir.path().join("missing.json");
    let assets = dir.path().join("assets.json");

    brandsync(dir.path())
        .args(positional(&missing, &assets))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error loading files"))
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_oversized_assets_file() {
    let dir = fixtures();
    let settings = dir.path().join("settings.json");
    let assets = dir.path().join("big.json");
    fs::write(&assets, vec![b' '; 2 * 1024 * 1024 + 1]).unwrap();

    brandsync(dir.path())
        .args(positional(&settings, &assets))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("exceeds 2097152 bytes"));
}

#[test]
fn test_malformed_settings_file() {
    let dir = fixtures();
    let settings = dir.path().join("settings.json");
    let assets = dir.path().join("assets.json");
    fs::write(&settings, "{ nope").unwrap();

    brandsync(dir.path())
        .args(positional(&settings, &assets))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error loading files: Invalid JSON in"))
        .stderr(predicate::function(|err: &str| {
            err.matches("at line 1 column").count() == 1
        }));
}

#[test]
fn test_invalid_assets_fail_before_remote_call() {
    let dir = fixtures();
    let settings = dir.path().join("settings.json");
    let assets = dir.path().join("assets.json");
    fs::write(&assets, r#"[{"Category": "FAVICON_ICO"}]"#).unwrap();

    brandsync(dir.path())
        .args(positional(&settings, &assets))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error loading files: Invalid assets file"))
        .stderr(predicate::str::contains("AWS Error").not());
}

#[test]
fn test_default_config_comes_from_config_home() {
    let dir = fixtures();
    let settings = dir.path().join("settings.json");
    let assets = dir.path().join("assets.json");
    fs::create_dir_all(dir.path().join("brandsync")).unwrap();
    fs::write(dir.path().join("brandsync/config.toml"), "lookup = \"sideways\"").unwrap();

    brandsync(dir.path())
        .args(positional(&settings, &assets))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_external_rejects_malformed_query() {
    let dir = fixtures();
    external(dir.path())
        .write_stdin("not json")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid input document"));
}

#[test]
fn test_external_missing_file() {
    let dir = fixtures();
    let query = serde_json::json!({
        "user_pool_id": "us-east-1_AbCdEf",
        "client_id": "client123",
        "settings_path": dir.path().join("settings.json"),
        "assets_path": dir.path().join("absent.json"),
        "region": "us-east-1",
        "endpoint_url": DEAD_ENDPOINT
    });

    external(dir.path())
        .write_stdin(query.to_string())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error reading JSON files"))
        .stderr(predicate::str::contains("absent.json"));
}
