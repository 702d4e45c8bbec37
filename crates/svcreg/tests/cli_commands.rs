#![cfg(feature = "cli")]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn sample_definition() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../svcreg-idl/tests/fixtures/sample.services.json")
}

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "svcreg-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn svcreg(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_svcreg"))
        .arg("--log-level")
        .arg("error")
        .arg("--format")
        .arg("json")
        .args(args)
        .output()
        .expect("svcreg should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn check_reports_counts() {
    let path = sample_definition();
    let output = svcreg(&["check", path.to_str().unwrap()]);

    assert!(output.status.success());
    let out = stdout_json(&output);
    assert_eq!(out["services"], 2);
    assert_eq!(out["operations"], 4);
    assert_eq!(out["sealed"], true);
}

#[test]
fn list_prints_every_operation() {
    let path = sample_definition();
    let output = svcreg(&["list", path.to_str().unwrap()]);

    assert!(output.status.success());
    let out = stdout_json(&output);
    let operations = out["operations"].as_array().expect("operations array");
    assert_eq!(operations.len(), 4);
    assert_eq!(operations[0]["wire_name"], "Get User");
    assert_eq!(operations[0]["input"], "GetPersonRequest");
    assert_eq!(operations[3]["shape"], "signal");
}

#[test]
fn list_unknown_service_is_usage_error() {
    let path = sample_definition();
    let output = svcreg(&["list", path.to_str().unwrap(), "--service", "Nope"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn validate_prints_normalized_payload() {
    let path = sample_definition();
    let output = svcreg(&[
        "validate",
        path.to_str().unwrap(),
        "--service",
        "Userservice",
        "--operation",
        "Get User",
        "--output",
        "--compact",
        "--json",
        r#"{"name":"Ada","id":"u1","age":30}"#,
    ]);

    assert!(output.status.success());
    let out = stdout_json(&output);
    assert_eq!(out["valid"], true);
    assert_eq!(
        out["payload"].to_string(),
        r#"{"age":30,"id":"u1","name":"Ada"}"#
    );
}

#[test]
fn validate_reports_field_errors_with_60() {
    let path = sample_definition();
    let output = svcreg(&[
        "validate",
        path.to_str().unwrap(),
        "-s",
        "Userservice",
        "-o",
        "Get User",
        "--strict",
        "--json",
        r#"{"userId":"u1"}"#,
    ]);

    assert_eq!(output.status.code(), Some(60));
    let out = stdout_json(&output);
    assert_eq!(out["valid"], false);
    let fields: Vec<&str> = out["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter_map(|err| err["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["user_id", "userId"]);
}

#[test]
fn validate_unknown_operation_returns_64() {
    let path = sample_definition();
    let output = svcreg(&[
        "validate",
        path.to_str().unwrap(),
        "-s",
        "Userservice",
        "-o",
        "get_user",
        "--json",
        "{}",
    ]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn validate_without_input_schema_returns_64() {
    let path = sample_definition();
    let output = svcreg(&[
        "validate",
        path.to_str().unwrap(),
        "-s",
        "Onewayservice",
        "-o",
        "no_input",
        "--json",
        "{}",
    ]);
    assert_eq!(output.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&output.stderr).contains("has no input schema"));
}

#[test]
fn validate_reads_payload_file() {
    let dir = unique_temp_dir("payload");
    let payload = dir.join("notice.json");
    std::fs::write(&payload, r#"{"message":"hi"}"#).expect("payload should be writable");

    let path = sample_definition();
    let output = svcreg(&[
        "validate",
        path.to_str().unwrap(),
        "-s",
        "Onewayservice",
        "-o",
        "no_output",
        "--file",
        payload.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let out = stdout_json(&output);
    assert_eq!(out["payload"]["level"], 1);
    assert_eq!(out["payload"]["tags"], serde_json::Value::Null);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn check_loads_a_directory() {
    let dir = unique_temp_dir("directory");
    std::fs::copy(sample_definition(), dir.join("sample.services.json"))
        .expect("fixture should copy");
    std::fs::write(dir.join("README.md"), "ignored").expect("readme should be writable");

    let output = svcreg(&["check", dir.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["documents"], 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_definition_returns_60() {
    let dir = unique_temp_dir("invalid");
    let path = dir.join("broken.services.json");
    std::fs::write(
        &path,
        r#"{"$schema":"http://api.nexus/draft-01/schema#","services":[{"identifier":"Svc","operations":[{"identifier":"op","input":"Missing"}]}]}"#,
    )
    .expect("definition should be writable");

    let output = svcreg(&["check", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not find type Missing"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_definition_returns_1() {
    let dir = unique_temp_dir("missing");
    let output = svcreg(&["check", dir.join("absent.services.json").to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn version_prints_name() {
    let output = Command::new(env!("CARGO_BIN_EXE_svcreg"))
        .arg("version")
        .output()
        .expect("version should run");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("svcreg "));
}
