use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

fn gosym_cmd(fixture: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gosym"));
    cmd.current_dir(Path::new("tests/fixtures").join(fixture));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_json(args: &[&str]) -> Value {
    let output = gosym_cmd("basic").args(args).output().unwrap();
    assert!(
        output.status.success(),
        "gosym {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn run_failing(args: &[&str]) -> Output {
    let output = gosym_cmd("basic").args(args).output().unwrap();
    assert!(!output.status.success(), "gosym {args:?} unexpectedly succeeded");
    output
}

fn names(symbols: &Value) -> Vec<String> {
    symbols
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn symbols_lists_exported_declarations_in_order() {
    let out = run_json(&["symbols", "shapes.go"]);
    assert_eq!(out["doc"], "");
    assert_eq!(
        names(&out["symbols"]),
        vec!["Shape", "Rect", "Canvas", "(*Rect).Area", "NewRect", "Unit"]
    );
}

#[test]
fn symbols_render_type_details() {
    let out = run_json(&["symbols", "shapes.go"]);
    let symbols = out["symbols"].as_array().unwrap();

    let shape = &symbols[0];
    assert_eq!(shape["kind"], "interface");
    assert_eq!(shape["detail"], "interface{...}");
    assert_eq!(shape["doc"], "Shape is anything with an area.\n");
    assert_eq!(shape["children"][0]["name"], "Reader");
    assert_eq!(shape["children"][0]["kind"], "field");
    assert_eq!(shape["children"][0]["detail"], "io.Reader");
    assert_eq!(shape["children"][1]["name"], "Area");
    assert_eq!(shape["children"][1]["kind"], "method");
    assert_eq!(shape["children"][1]["detail"], "func() float64");

    let rect = &symbols[1];
    assert_eq!(rect["kind"], "struct");
    assert_eq!(rect["detail"], "struct{...}");
    assert_eq!(names(&rect["children"]), vec!["Width", "Height", "label", "Canvas"]);
    assert_eq!(rect["children"][3]["detail"], "*Canvas");

    let canvas = &symbols[2];
    assert_eq!(canvas["detail"], "struct{}");
    assert!(canvas.get("children").is_none());

    assert_eq!(symbols[3]["kind"], "method");
    assert_eq!(symbols[3]["detail"], "func() float64");
    assert_eq!(symbols[4]["kind"], "function");
    assert_eq!(symbols[4]["detail"], "func(w, h float64) *Rect");
    assert_eq!(symbols[5]["kind"], "constant");
    assert_eq!(symbols[5]["detail"], "");
}

#[test]
fn positions_only_when_requested() {
    let plain = run_json(&["symbols", "shapes.go"]);
    assert!(plain["symbols"][0].get("start").is_none());

    let out = run_json(&["symbols", "shapes.go", "--positions"]);
    let start = &out["symbols"][0]["start"];
    assert_eq!(start["line"], 6);
    assert_eq!(start["column"], 1);
    assert_eq!(start["file"], "shapes.go");
    assert_eq!(out["symbols"][0]["end"]["line"], 9);
}

#[test]
fn package_aggregates_files_and_module_path() {
    let out = run_json(&["package", "."]);
    assert_eq!(out["name"], "basic");
    assert_eq!(out["path"], "example.com/basic");
    assert_eq!(out["module"], "example.com/basic");
    assert_eq!(out["module_version"], "");
    assert_eq!(out["docs"], "Package basic draws shapes.");
    let symbols = names(&out["symbols"]);
    assert!(symbols.contains(&"NewRect".to_string()));
    assert!(!symbols.contains(&"TestRect".to_string()));
}

#[test]
fn package_skip_symbols_keeps_docs() {
    let out = run_json(&["package", "internal/geom", "--skip-symbols"]);
    assert_eq!(out["path"], "example.com/basic/internal/geom");
    assert_eq!(out["docs"], "Package geom has math helpers.");
    assert_eq!(out["symbols"], Value::Array(Vec::new()));
}

#[test]
fn package_accepts_module_import_path() {
    let out = run_json(&["package", "example.com/basic/internal/geom"]);
    assert_eq!(out["name"], "geom");
    assert_eq!(out["path"], "example.com/basic/internal/geom");
    assert_eq!(names(&out["symbols"]), vec!["Pi"]);
    assert_eq!(out["symbols"][0]["detail"], "float64");
    assert_eq!(out["symbols"][0]["doc"], "Pi approximates pi.\n");
}

#[test]
fn project_keys_packages_by_import_path() {
    let out = run_json(&["project"]);
    let packages = out["packages"].as_object().unwrap();
    let keys: Vec<&str> = packages.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["example.com/basic", "example.com/basic/internal/geom"]);
    assert_eq!(packages["example.com/basic/internal/geom"]["name"], "geom");
}

#[test]
fn non_go_file_is_a_diagnostic() {
    let output = run_failing(&["symbols", "go.mod"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported Language"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_file_is_a_diagnostic() {
    let output = run_failing(&["symbols", "nope.go"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("File Not Found"), "stderr: {stderr}");
}

#[test]
fn missing_package_dir_is_a_diagnostic() {
    let output = run_failing(&["package", "does/not/exist"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("File Not Found"), "stderr: {stderr}");
}
