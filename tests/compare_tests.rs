//! End-to-end comparisons over files on disk.
//!
//! Each test writes its inputs into a fresh temp directory, runs the
//! library `compare`, and checks the result and its encodings.

use data_diff::diff::{CompareOptions, DiffKind, compare};
use data_diff::error::{DiffError, ErrorCode};
use data_diff::report::{ComparisonResult, write_report};
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `contents` to `name` under `dir` and return the path as a string.
fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path: PathBuf = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path.to_string_lossy().into_owned()
}

fn run(source: &str, target: &str, options: &CompareOptions) -> ComparisonResult {
    compare(source, target, options).expect("comparison should succeed")
}

#[test]
fn identical_file_compares_equal() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "same.json", r#"{"a": [1, 2, {"b": null}], "c": "x"}"#);

    let result = run(&file, &file, &CompareOptions::new());

    assert!(result.equal);
    assert!(result.differences.is_empty());
    assert_eq!(result.summary.total_fields, 0);
}

#[test]
fn modified_and_added_fields_reported_in_order() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "a.json", r#"{"name": "svc", "port": 80}"#);
    let target = write_file(&dir, "b.json", r#"{"name": "svc", "port": 8080, "tls": true}"#);

    let result = run(&source, &target, &CompareOptions::new());

    assert!(!result.equal);
    let kinds: Vec<(&str, DiffKind)> = result
        .differences
        .iter()
        .map(|d| (d.path.as_str(), d.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![("$.port", DiffKind::Modified), ("$.tls", DiffKind::Added)]
    );
    assert_eq!(result.differences[0].message, "value changed from 80 to 8080");
    assert_eq!(result.summary.different_fields, 1);
    assert_eq!(result.summary.added_fields, 1);
    assert_eq!(result.summary.total_fields, 2);
}

#[test]
fn json_and_equivalent_yaml_are_equal() {
    let dir = TempDir::new().unwrap();
    let json = write_file(
        &dir,
        "config.json",
        r#"{"server": {"host": "localhost", "ports": [80, 443]}, "debug": false}"#,
    );
    let yaml = write_file(
        &dir,
        "config.yaml",
        "server:\n  host: localhost\n  ports:\n    - 80\n    - 443\ndebug: false\n",
    );

    let result = run(&json, &yaml, &CompareOptions::new());
    assert!(result.equal, "unexpected differences: {:?}", result.differences);
}

#[test]
fn ignore_case_applies_to_nested_strings() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "a.yaml", "users:\n  - name: Alice\n");
    let target = write_file(&dir, "b.yaml", "users:\n  - name: ALICE\n");

    let strict = run(&source, &target, &CompareOptions::new());
    assert!(!strict.equal);
    assert_eq!(strict.differences[0].path, "$.users[0].name");

    let relaxed = run(
        &source,
        &target,
        &CompareOptions::new().with_ignore_case(true),
    );
    assert!(relaxed.equal);
}

#[test]
fn ignored_fields_leave_no_trace() {
    let dir = TempDir::new().unwrap();
    let source = write_file(
        &dir,
        "a.json",
        r#"{"id": 1, "meta": {"updated": "mon"}, "items": [{"id": 7, "v": 1}]}"#,
    );
    let target = write_file(
        &dir,
        "b.json",
        r#"{"id": 1, "meta": {"updated": "tue"}, "items": [{"id": 8, "v": 1}], "extra": 1}"#,
    );

    let options =
        CompareOptions::new().with_ignore_fields(["meta.updated", "items[*].id", "$.extra"]);
    let result = run(&source, &target, &options);

    assert!(result.equal, "unexpected differences: {:?}", result.differences);
}

#[test]
fn dotted_keys_are_reported_bracketed_and_ignorable() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "a.json", r#"{"labels": {"app.io/name": "web"}}"#);
    let target = write_file(&dir, "b.json", r#"{"labels": {"app.io/name": "api"}}"#);

    let result = run(&source, &target, &CompareOptions::new());
    assert_eq!(result.differences[0].path, r#"$.labels["app.io/name"]"#);

    let reported = result.differences[0].path.clone();
    let ignored = run(
        &source,
        &target,
        &CompareOptions::new().with_ignore_fields([reported]),
    );
    assert!(ignored.equal);
}

#[test]
fn show_unchanged_counts_equal_fields() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "a.json", r#"{"a": 1, "b": 2}"#);
    let target = write_file(&dir, "b.json", r#"{"a": 1, "b": 3}"#);

    let result = run(
        &source,
        &target,
        &CompareOptions::new().with_show_unchanged(true),
    );

    assert!(!result.equal);
    assert!(result.summary.equal_fields >= 1);
    assert_eq!(result.summary.different_fields, 1);
    assert_eq!(
        result.summary.total_fields,
        result.summary.equal_fields
            + result.summary.different_fields
            + result.summary.added_fields
            + result.summary.removed_fields
    );
}

#[test]
fn literal_arguments_compare_as_strings() {
    let result = run(
        "not-a-file-left",
        "not-a-file-right",
        &CompareOptions::new(),
    );

    assert!(!result.equal);
    assert_eq!(result.differences.len(), 1);
    assert_eq!(result.differences[0].path, "$");
}

#[test]
fn unreadable_source_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let target = write_file(&dir, "b.json", "{}");
    let source = dir.path().to_string_lossy().into_owned();

    let err = compare(&source, &target, &CompareOptions::new()).unwrap_err();

    assert!(matches!(err, DiffError::Load { role: "source", .. }));
    assert_eq!(err.code(), ErrorCode::LoadFailed);
    assert!(err.to_string().starts_with("failed to load source data"));
}

#[test]
fn json_report_round_trips() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "a.json", r#"{"list": [1, 2, 3]}"#);
    let target = write_file(&dir, "b.json", r#"{"list": [1, 2]}"#);

    let result = run(&source, &target, &CompareOptions::new());
    assert_eq!(result.summary.removed_fields, 1);

    let mut out = Vec::new();
    write_report(&result, "json", &mut out).unwrap();
    let decoded: ComparisonResult = serde_json::from_slice(&out).unwrap();

    assert_eq!(decoded, result);
}

#[test]
fn null_values_survive_json_report() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "a.json", r#"{"a": null, "keep": null}"#);
    let target = write_file(&dir, "b.json", r#"{"a": 0, "keep": null}"#);

    let result = run(
        &source,
        &target,
        &CompareOptions::new().with_show_unchanged(true),
    );
    assert_eq!(result.differences[0].message, "type changed from null to number");

    let mut out = Vec::new();
    write_report(&result, "json", &mut out).unwrap();
    let decoded: ComparisonResult = serde_json::from_slice(&out).unwrap();

    assert_eq!(decoded, result);
}

#[test]
fn table_report_lists_each_difference() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "a.json", r#"{"a": 1, "b": 2}"#);
    let target = write_file(&dir, "b.json", r#"{"a": 1, "b": 3}"#);

    let result = run(&source, &target, &CompareOptions::new());
    let mut out = Vec::new();
    write_report(&result, "table", &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Comparison Result"));
    assert!(text.contains("Path: $.b"));
    assert!(text.contains("Type: modified"));
    assert!(text.contains("Summary:"));
}

#[test]
fn unknown_format_fails_after_comparison() {
    let result = run("x", "x", &CompareOptions::new().with_format("xml"));
    assert!(result.equal);

    let err = write_report(&result, "xml", &mut Vec::new()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnsupportedFormat);
    assert_eq!(err.to_string(), "unsupported format: xml");
}
