//! CLI tests for the `overlay` binary.
//!
//! These tests exercise the compiled binary using assert_cmd.

use assert_cmd::Command;
use overlay_test_utils::TestWorkspace;
use predicates::prelude::*;

fn overlay_cmd() -> Command {
    Command::cargo_bin("overlay").expect("Failed to find overlay binary")
}

const LOGGING_OVERLAY: &str = "configuration:\n  subsystem:\n    logging:\n      level: INFO\n";

#[test]
fn test_help_output() {
    overlay_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compile"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_compile_prints_cli_style_script() {
    let ws = TestWorkspace::new();
    let schema = ws.write_sample_schema();
    let overlay = ws.write("overlay.yml", LOGGING_OVERLAY);

    overlay_cmd()
        .arg("compile")
        .arg("--schema")
        .arg(&schema)
        .arg(&overlay)
        .assert()
        .success()
        .stdout("/subsystem=logging:add(level=INFO)\n");
}

#[test]
fn test_compile_json_includes_baseline_first() {
    let ws = TestWorkspace::new();
    let schema = ws.write_sample_schema();
    let baseline = ws.write_baseline(r#"[{"address": "/interface=public", "operation": "add"}]"#);
    let overlay = ws.write("overlay.yml", LOGGING_OVERLAY);

    let output = overlay_cmd()
        .args(["compile", "--json", "--schema"])
        .arg(&schema)
        .arg("--baseline")
        .arg(&baseline)
        .arg(&overlay)
        .output()
        .unwrap();
    assert!(output.status.success());

    let script: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ops = script.as_array().unwrap();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0]["address"], "/interface=public");
    assert_eq!(ops[1]["operation"], "add");
    assert_eq!(ops[1]["handler"], "logging-add");
    assert_eq!(ops[1]["params"]["level"], "INFO");
}

#[test]
fn test_compile_reports_skipped_keys_on_stderr() {
    let ws = TestWorkspace::new();
    let schema = ws.write_sample_schema();
    let overlay = ws.write(
        "overlay.yml",
        "configuration:\n  subsystem:\n    logging:\n      level: INFO\n      colour: red\n",
    );

    overlay_cmd()
        .args(["compile", "--schema"])
        .arg(&schema)
        .arg(&overlay)
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped:"))
        .stderr(predicate::str::contains("colour"));
}

#[test]
fn test_undefine_on_missing_resource_fails() {
    let ws = TestWorkspace::new();
    let schema = ws.write_sample_schema();
    let overlay = ws.write(
        "overlay.yml",
        "configuration:\n  subsystem:\n    logging: !undefine\n",
    );

    overlay_cmd()
        .args(["compile", "--schema"])
        .arg(&schema)
        .arg(&overlay)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("/subsystem=logging"));
}

#[test]
fn test_keep_going_config_records_failures() {
    let ws = TestWorkspace::new();
    let schema = ws.write_sample_schema();
    let config = ws.write("overlay.toml", "fail-fast = false\n");
    let bad = ws.write("bad.yml", "configuration:\n  subsystem:\n    logging: !undefine\n");
    let good = ws.write("good.yml", LOGGING_OVERLAY);

    overlay_cmd()
        .args(["compile", "--schema"])
        .arg(&schema)
        .arg("--config")
        .arg(&config)
        .arg(&bad)
        .arg(&good)
        .assert()
        .success()
        .stdout("/subsystem=logging:add(level=INFO)\n")
        .stderr(predicate::str::contains("failed:"));
}

#[test]
fn test_missing_schema_fails() {
    let ws = TestWorkspace::new();
    let overlay = ws.write("overlay.yml", LOGGING_OVERLAY);

    overlay_cmd()
        .args(["compile", "--schema"])
        .arg(ws.path("schema.yml"))
        .arg(&overlay)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_inspect_lists_registrations() {
    let ws = TestWorkspace::new();
    let schema = ws.write_sample_schema();

    overlay_cmd()
        .args(["inspect", "--schema"])
        .arg(&schema)
        .args(["--address", "/subsystem=logging"])
        .assert()
        .success()
        .stdout(predicate::str::contains("console-handler"))
        .stdout(predicate::str::contains("uptime SCALAR runtime"))
        .stdout(predicate::str::contains("-> logging-add"));
}

#[test]
fn test_inspect_rejects_malformed_address() {
    let ws = TestWorkspace::new();
    let schema = ws.write_sample_schema();

    overlay_cmd()
        .args(["inspect", "--schema"])
        .arg(&schema)
        .args(["--address", "/subsystem"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid address"));
}
