//! End-to-end checks of the syntharena binary
//!
//! Each test writes its input into a temp dir, runs the built binary and
//! inspects stdout and the exit status.

use std::path::Path;
use std::process::{Command, Output};

const ROUTE: &str = r#"[
    { "id": "A", "parent_id": null, "entity": { "key": "TARGET", "label": "Target" } },
    { "id": "B", "parent_id": "A", "entity": { "key": "SM-1" } },
    { "id": "C", "parent_id": "A", "entity": { "key": "SM-2" } }
]"#;

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_syntharena"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SYNTHARENA_LOG_LEVEL")
        .env_remove("SYNTHARENA_LOG_FORMAT")
        .output()
        .expect("failed to spawn syntharena")
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn layout_prints_positioned_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "route.json", ROUTE);

    let output = run_cli(&["layout", "-i", &input]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let nodes = json["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(json["edges"].as_array().unwrap().len(), 2);

    let b = nodes[1]["x"].as_f64().unwrap();
    let c = nodes[2]["x"].as_f64().unwrap();
    assert_eq!(nodes[0]["x"].as_f64().unwrap(), (b + c) / 2.0);
    assert_eq!(json["direction"], "top-down");
}

#[test]
fn outline_prints_tree() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "route.json", ROUTE);
    let stock = write(dir.path(), "stock.json", r#"["SM-1"]"#);

    let output = run_cli(&["outline", "-i", &input, "--stock", &stock]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "Target [A]\n├── SM-1 [B] ✓\n└── SM-2 [C] ✗\n");
}

#[test]
fn validate_reports_multiple_roots() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "route.json",
        r#"[
            { "id": "A", "entity": { "key": "K1" } },
            { "id": "B", "entity": { "key": "K2" } }
        ]"#,
    );

    let output = run_cli(&["validate", "-i", &input]);
    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("✗ Invalid route"));
}

#[test]
fn compare_overlay_tags_statuses() {
    let dir = tempfile::tempdir().unwrap();
    let prediction = write(dir.path(), "prediction.json", ROUTE);
    let reference = write(
        dir.path(),
        "reference.json",
        r#"[
            { "id": "r0", "entity": { "key": "TARGET" } },
            { "id": "r1", "parent_id": "r0", "entity": { "key": "SM-1" } },
            { "id": "r2", "parent_id": "r0", "entity": { "key": "SM-3" } }
        ]"#,
    );

    let output = run_cli(&["compare", "-p", &prediction, "-R", &reference, "--mode", "overlay"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["mode"], "overlay");
    assert_eq!(json["nodes"][0]["status"], "shared");
    assert_eq!(json["nodes"][1]["status"], "shared");
    assert_eq!(json["nodes"][2]["status"], "prediction-only");
    assert_eq!(json["reference_only"][0]["key"], "SM-3");
    assert_eq!(json["reference_only"][0]["index"], 3);
    assert_eq!(json["nodes"][3]["id"], "r2");
    assert_eq!(json["nodes"][3]["status"], "reference-only");
    assert_eq!(json["summary"]["reference_only"], 1);
}

#[test]
fn compare_rejects_negative_panel_gap() {
    let dir = tempfile::tempdir().unwrap();
    let prediction = write(dir.path(), "prediction.json", ROUTE);
    let reference = write(dir.path(), "reference.json", ROUTE);

    let output = run_cli(&[
        "compare",
        "-p",
        &prediction,
        "-R",
        &reference,
        "--panel-gap=-1000",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("panel_gap"));
}

#[test]
fn missing_input_file_fails() {
    let output = run_cli(&["layout", "-i", "/nonexistent/route.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to read input file"));
}
