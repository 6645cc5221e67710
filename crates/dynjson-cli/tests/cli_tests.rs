//! Integration tests for the `dynjson` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the get, set, del,
//! type and fmt subcommands through the actual binary, including stdin piping,
//! file output, in-place edits and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

/// Helper: path to the sample.json fixture.
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

/// Helper: read the sample.json fixture as a string.
fn sample_json() -> String {
    std::fs::read_to_string(sample_json_path()).expect("sample.json fixture must exist")
}

fn dynjson() -> Command {
    Command::cargo_bin("dynjson").unwrap()
}

/// Helper: run with the sample fixture as input and parse stdout as JSON.
fn stdout_json(args: &[&str]) -> Value {
    let output = dynjson()
        .args(["-i", sample_json_path()])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{args:?} failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// get
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn get_nested_value_from_stdin() {
    dynjson()
        .args(["get", "a", "1", "b", "2", "c"])
        .write_stdin(r#"{"a":[{},{"b":[[],{},{"c":"got it!"}]}]}"#)
        .assert()
        .success()
        .stdout("\"got it!\"\n");
}

#[test]
fn get_without_path_prints_whole_document() {
    let value = stdout_json(&["get"]);
    let expected: Value = serde_json::from_str(&sample_json()).unwrap();
    assert_eq!(value, expected);
}

#[test]
fn get_subtree_pretty() {
    dynjson()
        .args(["get", "items", "--pretty"])
        .write_stdin(r#"{"items":[1]}"#)
        .assert()
        .success()
        .stdout("[\n  1\n]\n");
}

#[test]
fn get_missing_path_reports_split() {
    dynjson()
        .args(["-i", sample_json_path(), "get", "nested", "1", "b", "2", "d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("found: [nested 1 b 2] missing: [d]"));
}

#[test]
fn get_negative_index_is_a_path_error() {
    dynjson()
        .args(["-i", sample_json_path(), "get", "items", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("found: [items] missing: [-1]"));
}

// ─────────────────────────────────────────────────────────────────────────────
// type
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn type_coerces_scalars() {
    let cases = [
        (vec!["type", "string", "server", "host"], "localhost\n"),
        (vec!["type", "uint64", "server", "port"], "8080\n"),
        (vec!["type", "int", "ratio"], "42\n"),
        (vec!["type", "float64", "ratio"], "42.3\n"),
        (vec!["type", "bool", "enabled"], "true\n"),
        (vec!["type", "duration", "server", "timeout"], "1h 30m\n"),
        (vec!["type", "time", "server", "started"], "2024-03-01T12:30:00+00:00\n"),
    ];
    for (args, expected) in cases {
        dynjson()
            .args(["-i", sample_json_path()])
            .args(&args)
            .assert()
            .success()
            .stdout(expected);
    }
}

#[test]
fn type_int64_rejects_decoded_fraction() {
    dynjson()
        .args(["-i", sample_json_path(), "type", "int64", "ratio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read int64 value"))
        .stderr(predicate::str::contains("cannot parse \"42.3\" as i64"));
}

#[test]
fn type_duration_keeps_sign() {
    dynjson()
        .args(["type", "duration", "backoff"])
        .write_stdin(r#"{"backoff":"-90s"}"#)
        .assert()
        .success()
        .stdout("-1m 30s\n");
}

#[test]
fn type_duration_rejects_unknown_unit() {
    dynjson()
        .args(["type", "duration", "ttl"])
        .write_stdin(r#"{"ttl":"2 days"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown unit"));
}

#[test]
fn type_mismatch_fails() {
    dynjson()
        .args(["-i", sample_json_path(), "type", "bool", "name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read bool value"))
        .stderr(predicate::str::contains("type assertion to bool failed"));
}

#[test]
fn type_rejects_unknown_kind() {
    dynjson()
        .args(["-i", sample_json_path(), "type", "complex", "ratio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// ─────────────────────────────────────────────────────────────────────────────
// set
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn set_vivifies_keys_on_stdin_document() {
    dynjson()
        .args(["set", "a", "b", "c", "true"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("{\"a\":{\"b\":{\"c\":true}}}\n");
}

#[test]
fn set_array_element_with_json_literal() {
    let value = stdout_json(&["set", "items", "1", r#"{"x":[1,2]}"#]);
    assert_eq!(value["items"], json!([0, {"x": [1, 2]}, 2]));
}

#[test]
fn set_negative_number_value() {
    let value = stdout_json(&["set", "ratio", "-1.5"]);
    assert_eq!(value["ratio"], json!(-1.5));
}

#[test]
fn set_root_with_single_part() {
    dynjson()
        .args(["set", "[1,2]"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("[1,2]\n");
}

#[test]
fn set_rejects_bare_string_value() {
    dynjson()
        .args(["set", "name", "plain"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Value is not a JSON literal"));
}

#[test]
fn set_absent_key_before_index_fails() {
    dynjson()
        .args(["set", "list", "0", "1"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("found: [] missing: [list 0]"));
}

#[test]
fn set_requires_a_value() {
    dynjson().arg("set").write_stdin("{}").assert().failure();
}

#[test]
fn set_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");

    dynjson()
        .args(["-i", sample_json_path(), "set", "server", "port", "9090", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["server"]["port"], json!(9090));
    assert_eq!(written["name"], json!("edge-proxy"));
}

#[test]
fn set_in_place_rewrites_input() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.json");
    std::fs::write(&file, r#"{"a":1}"#).unwrap();

    dynjson()
        .arg("-i")
        .arg(&file)
        .args(["set", "b", r#""two""#, "--in-place"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        "{\"a\":1,\"b\":\"two\"}\n"
    );
}

#[test]
fn in_place_without_input_fails() {
    dynjson()
        .args(["set", "a", "1", "--in-place"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--in-place requires an input file"));
}

#[test]
fn output_and_in_place_conflict() {
    dynjson()
        .args(["-i", sample_json_path(), "fmt", "-o", "x.json", "--in-place"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// ─────────────────────────────────────────────────────────────────────────────
// del
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn del_array_element_shifts_rest() {
    let value = stdout_json(&["del", "items", "1"]);
    assert_eq!(value["items"], json!([0, 2]));
}

#[test]
fn del_map_key() {
    let value = stdout_json(&["del", "server", "host"]);
    assert!(value["server"].get("host").is_none());
    assert_eq!(value["server"]["port"], json!("8080"));
}

#[test]
fn del_without_path_prints_null() {
    dynjson()
        .arg("del")
        .write_stdin(r#"{"a":1}"#)
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn del_with_unreachable_parent_fails() {
    dynjson()
        .args(["del", "a", "c", "b"])
        .write_stdin(r#"{"a":{"b":1}}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("found: [a] missing: [c b]"));
}

// ─────────────────────────────────────────────────────────────────────────────
// fmt and input handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fmt_compacts_with_sorted_keys() {
    dynjson()
        .arg("fmt")
        .write_stdin("{ \"b\": 2,\n  \"a\": 1 }")
        .assert()
        .success()
        .stdout("{\"a\":1,\"b\":2}\n");
}

#[test]
fn fmt_pretty() {
    dynjson()
        .args(["fmt", "--pretty"])
        .write_stdin(r#"{"b":2,"a":1}"#)
        .assert()
        .success()
        .stdout("{\n  \"a\": 1,\n  \"b\": 2\n}\n");
}

#[test]
fn empty_stdin_is_null() {
    dynjson()
        .arg("fmt")
        .write_stdin("")
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn invalid_json_input_fails() {
    dynjson()
        .arg("fmt")
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read from stdin"));
}

#[test]
fn missing_input_file_fails() {
    dynjson()
        .args(["-i", "/nonexistent/dynjson/input.json", "fmt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn verbose_logs_path_failures_to_stderr() {
    dynjson()
        .args(["-v", "get", "missing"])
        .env_remove("RUST_LOG")
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("path lookup stopped early"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Edge cases
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    dynjson()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Read and edit JSON documents by path"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn unknown_subcommand_fails() {
    dynjson().arg("frobnicate").assert().failure();
}

#[test]
fn missing_subcommand_fails() {
    dynjson().write_stdin("{}").assert().failure();
}
