//! CLI integration tests for the Warden command-line interface.
//!
//! Each test runs the binary in an empty temporary directory with the user
//! config directory pointed at it, so no ambient config leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SETTING_ENV_VARS: &[&str] = &[
    "WARDEN_CONFIG",
    "WARDEN_CLIENT_ID",
    "WARDEN_CLIENT_SECRET",
    "WARDEN_COOKIE_SECRET",
    "WARDEN_COOKIE_DOMAIN",
    "WARDEN_ACCESS_TOKEN",
];

/// Get a command for the warden binary, isolated in `dir`.
fn warden(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("warden").unwrap();
    cmd.current_dir(dir.path())
        .env("WARDEN_CONFIG_DIR", dir.path());
    for var in SETTING_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

const VALID_CONFIG: &str = r#"
client_id = "abc"
client_secret = "shh"
cookie_secret = "seed"
upstreams = ["http://foo", "http://bar/api"]
skip_auth_regex = ["^/healthz$"]
"#;

// ─────────────────────────────────────────────────────────────────────────────
// Help
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    warden(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("provider"))
        .stdout(predicate::str::contains("email"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_check_reports_every_missing_setting() {
    let dir = TempDir::new().unwrap();
    warden(&dir)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration:"))
        .stderr(predicate::str::contains("missing setting: upstream"))
        .stderr(predicate::str::contains("missing setting: cookie-secret"))
        .stderr(predicate::str::contains("missing setting: client-id"))
        .stderr(predicate::str::contains("missing setting: client-secret"));
}

#[test]
fn test_check_valid_project_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("warden.toml"), VALID_CONFIG).unwrap();

    warden(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration OK"))
        .stdout(predicate::str::contains("http://foo/"))
        .stdout(predicate::str::contains("http://bar/api"))
        .stdout(predicate::str::contains("^/healthz$"));
}

#[test]
fn test_check_explicit_config_and_bad_regex_flag() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();

    warden(&dir)
        .arg("--config")
        .arg(&path)
        .args(["--skip-auth-regex", "(bad", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(r#"error compiling regex="(bad""#));
}

#[test]
fn test_check_settings_from_env() {
    let dir = TempDir::new().unwrap();
    warden(&dir)
        .env("WARDEN_CLIENT_ID", "env-id")
        .env("WARDEN_CLIENT_SECRET", "env-secret")
        .env("WARDEN_COOKIE_SECRET", "env-seed")
        .args(["--upstream", "http://127.0.0.1:8080", "check", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_check_malformed_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("warden.toml"), "upstreams = 1").unwrap();

    warden(&dir)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_provider_defaults_to_google() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("warden.toml"), VALID_CONFIG).unwrap();

    warden(&dir)
        .arg("provider")
        .assert()
        .success()
        .stdout(predicate::str::contains("google"))
        .stdout(predicate::str::contains(
            "https://accounts.google.com/o/oauth2/auth",
        ))
        .stdout(predicate::str::contains("profile email"));
}

#[test]
fn test_provider_myusa_json() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("warden.toml"), VALID_CONFIG).unwrap();

    let output = warden(&dir)
        .args(["--provider", "myusa", "provider", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["name"], "myusa");
    assert_eq!(summary["scope"], "profile.email");
    assert_eq!(
        summary["profile_url"],
        "https://alpha.my.usa.gov/api/v1/profile"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Email
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_email_from_google_id_token() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("warden.toml"), VALID_CONFIG).unwrap();

    // {"email":"u@example.com"} base64url without padding
    let token = "eyJhbGciOiJSUzI1NiJ9.eyJlbWFpbCI6InVAZXhhbXBsZS5jb20ifQ.c2ln";
    let result_path = dir.path().join("exchange.json");
    std::fs::write(
        &result_path,
        format!(r#"{{"access_token":"ya29","id_token":"{}"}}"#, token),
    )
    .unwrap();

    warden(&dir)
        .arg("email")
        .arg("--auth-result")
        .arg(&result_path)
        .assert()
        .success()
        .stdout(predicate::str::diff("u@example.com\n"));
}

#[test]
fn test_email_missing_id_token() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("warden.toml"), VALID_CONFIG).unwrap();
    let result_path = dir.path().join("exchange.json");
    std::fs::write(&result_path, r#"{"access_token":"ya29"}"#).unwrap();

    warden(&dir)
        .arg("email")
        .arg("--auth-result")
        .arg(&result_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("id_token"));
}
