//! Tests against the built binary

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

fn cert_inspector_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cert-inspector"))
}

#[test]
fn test_help() {
    let output = Command::new(cert_inspector_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--warning-days"));
}

#[test]
fn test_no_domains_exits_with_error() {
    let output = Command::new(cert_inspector_bin())
        .output()
        .expect("Failed to execute");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No domains provided"));
}

#[test]
fn test_negative_warning_days_rejected() {
    let output = Command::new(cert_inspector_bin())
        .args(["example.com", "--warning-days=-3"])
        .output()
        .expect("Failed to execute");

    assert!(!output.status.success());
}

#[test]
fn test_invalid_domain_reported_as_json() {
    let output = Command::new(cert_inspector_bin())
        .args(["https://example.com", "--json"])
        .output()
        .expect("Failed to execute");

    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");
    assert_eq!(parsed[0]["domain"], "https://example.com");
    assert_eq!(parsed[0]["error"]["kind"], "invalid_domain");
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(config, "[inspector]\nwarning_threshold_days = -10").unwrap();

    let output = Command::new(cert_inspector_bin())
        .args(["example.com", "--config"])
        .arg(config.path())
        .output()
        .expect("Failed to execute");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning_threshold_days"));
}

#[test]
fn test_domain_file_with_comments() {
    let mut list = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(list, "# hosts\nnot a domain\n").unwrap();

    let output = Command::new(cert_inspector_bin())
        .args(["--json", "--file"])
        .arg(list.path())
        .output()
        .expect("Failed to execute");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(1));
    assert_eq!(parsed[0]["domain"], "not a domain");
}
