//! Integration tests for the `curtain` CLI binary.
//!
//! These tests run the CLI as a subprocess and check exit codes and output.
//! They point the CLI at an address where nothing listens, so every command
//! that needs the server must fail cleanly.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::process::Command;

/// Nothing listens here.
const DEAD_ADDR: &str = "http://127.0.0.1:19999";

/// Helper: locate the `curtain` binary built by `cargo test`.
fn curtain_bin() -> String {
    let path = env!("CARGO_BIN_EXE_curtain");
    assert!(
        Path::new(path).exists(),
        "curtain binary not found at {path}"
    );
    path.to_owned()
}

/// Helper: run curtain with args and return (`exit_code`, stdout, stderr).
fn run(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(curtain_bin())
        .args(args)
        .env("CURTAIN_ADDR", DEAD_ADDR)
        .output()
        .expect("failed to execute curtain");

    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

// ── Version & help ───────────────────────────────────────────────────

#[test]
fn test_version_flag() {
    let (code, stdout, _) = run(&["--version"]);
    assert_eq!(code, 0, "curtain --version should exit 0");
    assert!(stdout.contains("curtain"), "version output should name the binary: {stdout}");
}

#[test]
fn test_help_lists_commands() {
    let (code, stdout, _) = run(&["--help"]);
    assert_eq!(code, 0, "curtain --help should exit 0");
    for command in ["status", "toggle", "whitelist", "whoami", "script"] {
        assert!(stdout.contains(command), "help should list '{command}': {stdout}");
    }
    assert!(stdout.contains("CURTAIN_ADDR"), "help should document CURTAIN_ADDR");
}

#[test]
fn test_whitelist_help() {
    let (code, stdout, _) = run(&["whitelist", "--help"]);
    assert_eq!(code, 0);
    for action in ["list", "add", "remove"] {
        assert!(stdout.contains(action), "whitelist help should list '{action}'");
    }
}

// ── Argument validation ──────────────────────────────────────────────

#[test]
fn test_whitelist_add_requires_ip_or_me() {
    let (code, _, stderr) = run(&["whitelist", "add"]);
    assert_ne!(code, 0, "add without an IP should fail");
    assert!(stderr.contains("required"), "should report missing argument: {stderr}");
}

#[test]
fn test_whitelist_add_rejects_ip_with_me() {
    let (code, _, stderr) = run(&["whitelist", "add", "10.0.0.1", "--me"]);
    assert_ne!(code, 0, "IP and --me together should fail");
    assert!(stderr.contains("cannot be used with"), "should report conflict: {stderr}");
}

#[test]
fn test_whitelist_remove_requires_ip() {
    let (code, _, _) = run(&["whitelist", "remove"]);
    assert_ne!(code, 0);
}

// ── Unreachable server ───────────────────────────────────────────────

#[test]
fn test_commands_fail_cleanly_without_server() {
    let commands: [&[&str]; 5] = [
        &["status"],
        &["toggle"],
        &["whitelist", "list"],
        &["whitelist", "add", "10.0.0.1"],
        &["whoami"],
    ];
    for args in commands {
        let (code, _, stderr) = run(args);
        assert_eq!(code, 1, "{args:?} should exit 1 without a server");
        assert!(
            stderr.contains("request failed"),
            "{args:?} should report the failed request: {stderr}"
        );
    }
}

#[test]
fn test_addr_flag_overrides_env() {
    let output = Command::new(curtain_bin())
        .args(["--addr", "http://127.0.0.1:19998", "status"])
        .env("CURTAIN_ADDR", "not a url")
        .output()
        .expect("failed to execute curtain");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("request failed"), "should try the flag address: {stderr}");
}
