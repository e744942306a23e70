mod common;

use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lesson-slides"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_no_command() {
    let output = run_command(&[]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No command specified"));
}

#[test]
fn test_lessons_command() {
    let output = run_command(&["lessons"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.starts_with("1\tNode.js: JavaScript on the Server"));
}

#[test]
fn test_render_command() {
    let media = common::create_media_dir();
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = out_dir.path().join("deck.pdf");
    let snippets = common::snippets_dir();

    let output = run_command(&[
        "render",
        "--name",
        "Ada",
        "--color",
        "#791E94",
        "--week",
        "1",
        "--snippets-dir",
        snippets.to_str().unwrap(),
        "--media-dir",
        media.path().to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "render failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let pdf = std::fs::read(&output_path).expect("No PDF written");
    assert!(pdf.starts_with(b"%PDF-"));
    assert_eq!(common::count(&pdf, "/Count 29"), 1);
}

#[test]
fn test_outline_command() {
    let snippets = common::snippets_dir();
    let output = run_command(&[
        "outline",
        "--name",
        "Grace",
        "--week",
        "2",
        "--snippets-dir",
        snippets.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--- page 1 (intro) ---"));
    assert!(stdout.contains("Welcome back, Grace!"));
}

#[test]
fn test_render_failure_reports_error() {
    let empty = TempDir::new().expect("Failed to create temp dir");
    let output_path = empty.path().join("deck.pdf");
    let snippets = common::snippets_dir();

    let output = run_command(&[
        "render",
        "--week",
        "1",
        "--snippets-dir",
        snippets.to_str().unwrap(),
        "--media-dir",
        empty.path().to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
    assert!(!output_path.exists());
}
