#![allow(missing_docs)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

#[test]
fn encode_writes_wire_bytes_to_stdout() {
	let fixture = fixture_arg("sample.proto");
	let output = run_with_stdin(&["encode", "Order", &fixture], r#"{"id": 150}"#);

	assert!(output.status.success(), "command should succeed");
	assert_eq!(output.stdout, vec![0x08, 0x96, 0x01]);
}

#[test]
fn encode_resolves_fully_qualified_message_names() {
	let fixture = fixture_arg("sample.proto");
	let output = run_with_stdin(&["encode", "demo.Order", &fixture], r#"{"id": 1}"#);

	assert!(output.status.success(), "command should succeed");
	assert_eq!(output.stdout, vec![0x08, 0x01]);
}

#[test]
fn encode_verbose_prints_text_format_to_stderr() {
	let fixture = fixture_arg("sample.proto");
	let output = run_with_stdin(
		&["encode", "Order", "--verbose", &fixture],
		r#"{"id": 150, "status": "STATUS_ACTIVE", "item": {"sku": "A-1"}}"#,
	);

	assert!(output.status.success(), "command should succeed");
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("id: 150"), "got stderr: {stderr}");
	assert!(stderr.contains("status: STATUS_ACTIVE"), "got stderr: {stderr}");
	assert!(stderr.contains("sku: \"A-1\""), "got stderr: {stderr}");
}

#[test]
fn encode_rejects_unknown_fields() {
	let fixture = fixture_arg("sample.proto");
	let output = run_with_stdin(&["encode", "Order", &fixture], r#"{"bogus": 1}"#);

	assert!(!output.status.success(), "command should fail");
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("unknown field: bogus"), "got stderr: {stderr}");
}

#[test]
fn encode_rejects_invalid_json_input() {
	let fixture = fixture_arg("sample.proto");
	let output = run_with_stdin(&["encode", "Order", &fixture], "{not json");

	assert!(!output.status.success(), "command should fail");
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("invalid json input"), "got stderr: {stderr}");
}

#[test]
fn encode_rejects_missing_message_types() {
	let fixture = fixture_arg("sample.proto");
	let output = run_with_stdin(&["encode", "Nope", &fixture], "{}");

	assert!(!output.status.success(), "command should fail");
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("message not found: Nope"), "got stderr: {stderr}");
}

#[test]
fn schema_json_lists_descriptor_fields() {
	let fixture = fixture_arg("sample.proto");
	let output = run_with_stdin(&["schema", &fixture, "--message", "Order", "--json"], "");

	assert!(output.status.success(), "command should succeed");
	let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout should be valid json");
	assert_eq!(json["message"], "demo.Order");
	let fields = json["fields"].as_array().expect("fields array");
	assert!(
		fields.iter().any(|field| field["name"] == "counts" && field["cardinality"] == "repeated"),
		"got: {json}"
	);
	assert!(
		fields.iter().any(|field| field["name"] == "attrs" && field["cardinality"] == "map"),
		"got: {json}"
	);
}

#[test]
fn schema_summary_counts_messages_and_enums() {
	let fixture = fixture_arg("sample.proto");
	let output = run_with_stdin(&["schema", &fixture], "");

	assert!(output.status.success(), "command should succeed");
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("messages: 2"), "got stdout: {stdout}");
	assert!(stdout.contains("enums: 1"), "got stdout: {stdout}");
	assert!(stdout.contains("demo.Order"), "got stdout: {stdout}");
}

fn run_with_stdin(args: &[&str], stdin_text: &str) -> Output {
	let mut child = Command::new(env!("CARGO_BIN_EXE_protocast"))
		.args(args)
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.expect("command spawns");

	child
		.stdin
		.as_mut()
		.expect("stdin piped")
		.write_all(stdin_text.as_bytes())
		.expect("stdin writes");
	child.wait_with_output().expect("command completes")
}

fn fixture_arg(name: &str) -> String {
	fixture_path(name).display().to_string()
}

fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}
