//! Integration tests driving the `scanlens` binary.
//!
//! Each test writes a report into a temp directory and runs the binary
//! there, so no `scanlens.toml` from the repository leaks in.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::process::{Command, Output};
use tempfile::TempDir;

const REPORT: &str = r#"{
  "violationCounts": {"sev1": 1, "sev3": 1},
  "violations": [
    {"engine": "pmd", "rule": "ApexCRUDViolation", "severity": 1, "message": "Validate CRUD",
     "tags": ["Security"], "resources": ["https://pmd.github.io/crud"],
     "locations": [{"file": "force-app/main/default/classes/Foo.cls", "startLine": 12}]},
    {"engine": "eslint", "rule": "no-unused-vars", "severity": 3, "message": "x is unused",
     "locations": [{"file": "force-app/main/default/lwc/table/table.js", "startLine": 3}]}
  ]
}"#;

fn workspace(content: &str) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    std::fs::write(dir.path().join("output.json"), content).expect("failed to write report");
    dir
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scanlens"))
        .args(args)
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute scanlens")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout is not valid JSON")
}

#[test]
fn view_defaults_to_output_json_and_engine_grouping() {
    let dir = workspace(REPORT);
    let output = run(&dir, &["view", "--format", "json"]);
    assert!(output.status.success());
    let v = stdout_json(&output);
    assert_eq!(v["mode"], "GroupedByEngine");
    assert_eq!(v["tree"][0]["key"], "pmd");
    assert_eq!(v["tree"][1]["key"], "eslint");
    assert_eq!(v["recordCount"], 2);
}

#[test]
fn severity_and_search_flags_filter_output() {
    let dir = workspace(REPORT);
    let output = run(
        &dir,
        &["view", "--format", "json", "--group", "typefilename", "--severity", "3"],
    );
    let v = stdout_json(&output);
    assert_eq!(v["mode"], "GroupedByMetadataType");
    assert_eq!(v["tree"][0]["label"], "lwc (1)");
    assert_eq!(v["selectedSeverity"], "3");

    let output = run(&dir, &["view", "--format", "json", "--search", "crud"]);
    let v = stdout_json(&output);
    assert_eq!(v["recordCount"], 1);
}

#[test]
fn base64_input_is_decoded() {
    let dir = workspace(&STANDARD.encode(REPORT));
    let output = run(&dir, &["summary", "--encoding", "base64", "--json"]);
    assert!(output.status.success());
    let v = stdout_json(&output);
    assert_eq!(v["mode"], "Tabular");
    assert_eq!(v["recordCount"], 2);
    assert_eq!(v["severityLevels"][0]["label"], "Severity 1: 1");
}

#[test]
fn invalid_base64_exits_with_invalid_input() {
    let dir = workspace("%%% not base64 %%%");
    let output = run(&dir, &["view", "--encoding", "base64"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"));
}

#[test]
fn non_json_report_is_echoed_raw() {
    let dir = workspace("plain log output");
    let output = run(&dir, &["view"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("plain log output"));
}

#[test]
fn fail_on_violations_sets_exit_code() {
    let dir = workspace(REPORT);
    let output = run(&dir, &["view", "--fail-on-violations"]);
    assert_eq!(output.status.code(), Some(3));

    let output = run(&dir, &["view", "--fail-on-violations", "--search", "zzz-nothing"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn config_file_sets_default_grouping() {
    let dir = workspace(REPORT);
    std::fs::write(
        dir.path().join("scanlens.toml"),
        "[view]\ndefault_grouping = \"filename\"\n",
    )
    .expect("failed to write config");
    let v = stdout_json(&run(&dir, &["view", "--format", "json"]));
    assert_eq!(v["mode"], "GroupedByFilename");
    assert_eq!(v["tree"][0]["label"], "force-app/main/default/classes/Foo.cls");
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = workspace(REPORT);
    let output = run(&dir, &["--config", "nope.toml", "view"]);
    assert!(!output.status.success());
}

const BROKEN_CONFIG: &str = "[view\ndefault_grouping = ";

#[test]
fn broken_implicit_config_falls_back_to_defaults() {
    let dir = workspace(REPORT);
    std::fs::write(dir.path().join("scanlens.toml"), BROKEN_CONFIG)
        .expect("failed to write config");
    let output = run(&dir, &["view", "--format", "json"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output)["mode"], "GroupedByEngine");
}

#[test]
fn broken_explicit_config_exits_with_invalid_input() {
    let dir = workspace(REPORT);
    std::fs::write(dir.path().join("broken.toml"), BROKEN_CONFIG)
        .expect("failed to write config");
    let output = run(&dir, &["--config", "broken.toml", "view"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn engines_lists_known_engines() {
    let dir = workspace(REPORT);
    let output = run(&dir, &["engines"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    for engine in ["cpd", "eslint", "flow", "pmd", "regex", "retirejs", "sfge"] {
        assert!(stdout.contains(engine), "missing {engine}");
    }
}
