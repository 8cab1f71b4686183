use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;

const LINE_WIDGET: &str = r#"{
  "widgetType": "chart.js/line",
  "data": {
    "labels": ["Jan", "Feb", "Mar", "Apr"],
    "datasets": [
      { "label": "Visitors", "data": [120, 150, 90, 180], "tension": 0.3 },
      { "label": "Rate", "data": [0.1, 0.2, 0.15, 0.3], "yAxisID": "y1" }
    ]
  },
  "props": { "title": "Traffic" }
}"#;

fn write_widget(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write widget");
    path
}

#[test]
fn cli_renders_svg_to_stdout() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_widget(tmp.path(), "line.json", LINE_WIDGET);

    let exe = assert_cmd::cargo_bin!("chartsvg-cli");
    let output = Command::new(exe)
        .args([
            "render",
            "--width",
            "640",
            "--height",
            "320",
            input.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let svg = String::from_utf8(output.stdout).expect("utf-8 svg");
    let doc = roxmltree::Document::parse(&svg).expect("svg parses");
    assert_eq!(doc.root_element().attribute("width"), Some("640"));
    assert_eq!(doc.root_element().attribute("height"), Some("320"));
}

#[test]
fn cli_renders_png_with_default_out_path_for_file_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_widget(tmp.path(), "line.json", LINE_WIDGET);
    let expected_out = input.with_extension("png");

    let exe = assert_cmd::cargo_bin!("chartsvg-cli");
    Command::new(exe)
        .args([
            "render",
            "--format",
            "png",
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&expected_out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
}

#[test]
fn cli_layout_prints_geometry_json() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_widget(tmp.path(), "line.json", LINE_WIDGET);

    let exe = assert_cmd::cargo_bin!("chartsvg-cli");
    let output = Command::new(exe)
        .args(["layout", input.to_string_lossy().as_ref()])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).expect("layout json");
    assert_eq!(layout["kind"], "line");
    assert_eq!(layout["viewport"]["width"], 800);
    let legend = layout["legend"].as_array().expect("legend entries");
    assert_eq!(legend[0]["label"], "Visitors");
    assert_eq!(legend[1]["label"], "Rate");
}

#[test]
fn cli_reports_unsupported_kinds() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_widget(
        tmp.path(),
        "bubble.json",
        r#"{ "widgetType": "chart.js/bubble", "data": { "labels": ["a"], "datasets": [{ "data": [1] }] } }"#,
    );

    let exe = assert_cmd::cargo_bin!("chartsvg-cli");
    let output = Command::new(exe)
        .args(["render", input.to_string_lossy().as_ref()])
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported-kind"), "stderr: {stderr}");
}

#[test]
fn cli_rejects_zero_sized_images() {
    let exe = assert_cmd::cargo_bin!("chartsvg-cli");
    Command::new(exe)
        .args(["render", "--width", "0"])
        .assert()
        .code(2);
}
