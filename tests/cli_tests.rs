//! CLI integration tests
//!
//! These tests verify the CLI commands work correctly by running the binary.

#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::Command;

fn pbm_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pbm"))
}

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

// ============================================================================
// Types and Enum Command Tests
// ============================================================================

#[test]
fn test_cli_types_lists_families_under_base_name() {
    let output = Command::new(pbm_bin())
        .args(["types"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "types should succeed");
    assert!(stdout.lines().any(|l| l == "PbmProfile"), "should list PbmProfile");
    assert!(stdout.lines().any(|l| l == "PbmPlacementHub"), "should list PbmPlacementHub");
}

#[test]
fn test_cli_types_enums_json() {
    let output = Command::new(pbm_bin())
        .args(["types", "--enums", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "types --enums --json should succeed");

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
    let names = json.as_array().expect("should be an array");
    assert_eq!(names.len(), 21);
    assert!(names.contains(&serde_json::json!("PbmVvolType")));
}

#[test]
fn test_cli_enum_lists_tokens() {
    let output = Command::new(pbm_bin())
        .args(["enum", "PbmComplianceStatus"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "enum should succeed");
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["compliant", "nonCompliant", "unknown", "notApplicable", "outOfDate"]
    );
}

#[test]
fn test_cli_enum_checks_token() {
    let valid = Command::new(pbm_bin())
        .args(["enum", "PbmObjectType", "virtualDiskUUID"])
        .output()
        .expect("Failed to execute command");
    assert!(valid.status.success(), "known token should be accepted");

    let invalid = Command::new(pbm_bin())
        .args(["enum", "PbmObjectType", "virtualDiskUuid"])
        .output()
        .expect("Failed to execute command");
    let stderr = String::from_utf8_lossy(&invalid.stderr);

    assert_eq!(invalid.status.code(), Some(1));
    assert!(stderr.contains("unrecognized enumeration value"));
}

#[test]
fn test_cli_enum_unknown_name() {
    let output = Command::new(pbm_bin())
        .args(["enum", "PbmColour"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "unknown enumeration should fail");
}

// ============================================================================
// Decode Command Tests
// ============================================================================

#[test]
fn test_cli_decode_response() {
    let output = Command::new(pbm_bin())
        .args([
            "decode",
            "--type",
            "PbmRetrieveContentResponse",
            fixtures_dir().join("retrieve_content_response.xml").to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "decode should succeed");

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
    let profiles = json["returnval"].as_array().expect("returnval should be an array");
    assert_eq!(profiles.len(), 2);
    assert_eq!(
        profiles[0]["PbmCapabilityProfile"]["name"],
        "vSAN Default Storage Policy"
    );
}

#[test]
fn test_cli_decode_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("result.json");

    let output = Command::new(pbm_bin())
        .args([
            "decode",
            "--pretty",
            "--type",
            "PbmCheckCompatibilityResponse",
            fixtures_dir().join("check_compatibility_response.xml").to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "decode --output should succeed");

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains('\n'), "pretty output spans lines");
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["returnval"][1]["hub"]["hubId"], "datastore-14");
}

#[test]
fn test_cli_decode_unknown_type() {
    let output = Command::new(pbm_bin())
        .args([
            "decode",
            "--type",
            "PbmNothing",
            fixtures_dir().join("retrieve_content_response.xml").to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("PbmNothing"));
}

#[test]
fn test_cli_decode_nonexistent_file() {
    let output = Command::new(pbm_bin())
        .args(["decode", "--type", "PbmProfileId", "/nonexistent/file.xml"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "missing file should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: I/O error"), "stderr: {}", stderr);
}

// ============================================================================
// Encode Command Tests
// ============================================================================

#[test]
fn test_cli_encode_with_root() {
    let output = Command::new(pbm_bin())
        .args([
            "encode",
            "--type",
            "PbmPlacementHub",
            "--root",
            "hub",
            "--compact",
            fixtures_dir().join("placement_hub.json").to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "encode should succeed");
    assert!(stdout.starts_with("<hub xmlns=\"urn:pbm\""));
    assert!(stdout.contains("<hubId>datastore-42</hubId>"));
}

#[test]
fn test_cli_encode_then_decode() {
    let dir = tempfile::tempdir().unwrap();
    let xml_path = dir.path().join("hub.xml");

    let encode = Command::new(pbm_bin())
        .args([
            "encode",
            "--type",
            "PbmPlacementHub",
            fixtures_dir().join("placement_hub.json").to_str().unwrap(),
            "--output",
            xml_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");
    assert!(encode.status.success(), "encode should succeed");

    let decode = Command::new(pbm_bin())
        .args(["decode", "--type", "PbmPlacementHub", xml_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    assert!(decode.status.success(), "decode should succeed");

    let json: serde_json::Value = serde_json::from_slice(&decode.stdout).unwrap();
    assert_eq!(json["hubId"], "datastore-42");
}

#[test]
fn test_cli_encode_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();

    let output = Command::new(pbm_bin())
        .args(["encode", "--type", "PbmPlacementHub", path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: JSON error"), "stderr: {}", stderr);
}

// ============================================================================
// Template Command Tests
// ============================================================================

#[test]
fn test_cli_template_feeds_encode() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("hub.json");

    let template = Command::new(pbm_bin())
        .args(["template", "--type", "PbmPlacementHub"])
        .output()
        .expect("Failed to execute command");
    assert!(template.status.success(), "template should succeed");

    let json: serde_json::Value = serde_json::from_slice(&template.stdout).unwrap();
    assert_eq!(json, serde_json::json!({ "hubType": "", "hubId": "" }));
    std::fs::write(&json_path, &template.stdout).unwrap();

    let encode = Command::new(pbm_bin())
        .args([
            "encode",
            "--type",
            "PbmPlacementHub",
            "--compact",
            json_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");
    assert!(encode.status.success(), "encode should accept the template");
    assert!(String::from_utf8_lossy(&encode.stdout).contains("<hubId"));
}
