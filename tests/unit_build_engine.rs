#![allow(missing_docs)]

use protocast::proto::{BuildOptions, MessageValue, ProtoError, Schema, Value, build_message};

const ORDER_SCHEMA: &str = r#"
syntax = "proto3";

package demo;

message Order {
	string label = 1;
	int32 size = 2;
	repeated int32 counts = 3;
	map<string, int32> attrs = 4;
	Item inner = 5;
	Status status = 6;
	bytes payload = 7;
	double ratio = 8;
}

message Item {
	int32 x = 1;
}

enum Status {
	UNKNOWN = 0;
	ACTIVE = 1;
}
"#;

#[test]
fn matching_keys_build_and_are_recoverable_by_field() {
	let schema = order_schema();
	let message = build(
		&schema,
		r#"{"label": "a", "size": 2, "counts": [1, 2], "inner": {"x": 5}, "ratio": 0.5}"#,
	)
	.expect("build succeeds");

	assert_eq!(field(&message, &schema, "label"), &Value::String("a".into()));
	assert_eq!(field(&message, &schema, "size"), &Value::I32(2));
	assert_eq!(field(&message, &schema, "counts"), &Value::List(vec![Value::I32(1), Value::I32(2)]));
	assert_eq!(field(&message, &schema, "ratio"), &Value::F64(0.5));

	let Value::Message(inner) = field(&message, &schema, "inner") else {
		panic!("expected nested message value");
	};
	assert_eq!(inner.type_name.as_ref(), "demo.Item");
	assert_eq!(inner.get(0), Some(&Value::I32(5)));
}

#[test]
fn absent_keys_leave_fields_unset() {
	let schema = order_schema();
	let message = build(&schema, r#"{"label": "a"}"#).expect("build succeeds");
	assert_eq!(message.fields.len(), 1);
	let desc = schema.message_by_name("Order").expect("message resolves");
	let (size_index, _) = desc.field_by_json_name("size").expect("size declared");
	assert_eq!(message.get(size_index), None);
}

#[test]
fn unknown_key_fails_with_unknown_field() {
	let schema = order_schema();
	let err = build(&schema, r#"{"bogus": 1}"#).expect_err("must fail");
	assert!(matches!(err, ProtoError::UnknownField { name } if name == "bogus"), "wrong error");
}

#[test]
fn list_field_rejects_non_array_values() {
	let schema = order_schema();
	let err = build(&schema, r#"{"counts": 3}"#).expect_err("must fail");
	let rendered = err.to_string();
	assert!(rendered.contains("counts"), "got: {rendered}");
	assert!(rendered.contains("expected array, got number"), "got: {rendered}");
}

#[test]
fn list_element_failure_names_the_index() {
	let schema = order_schema();
	let err = build(&schema, r#"{"counts": [1, 2, "x"]}"#).expect_err("must fail");
	let rendered = err.to_string();
	assert!(rendered.contains("counts[2]"), "got: {rendered}");
	assert!(rendered.contains("expected number, got string"), "got: {rendered}");
}

#[test]
fn map_keys_are_preserved_verbatim_and_values_coerced() {
	let schema = order_schema();
	let message = build(&schema, r#"{"attrs": {"Some Key!": 1, "other": 2.9}}"#).expect("build succeeds");
	let Value::Map(entries) = field(&message, &schema, "attrs") else {
		panic!("expected map value");
	};
	assert_eq!(entries.get("Some Key!"), Some(&Value::I32(1)));
	assert_eq!(entries.get("other"), Some(&Value::I32(2)));
}

#[test]
fn map_field_rejects_sequences() {
	let schema = order_schema();
	let err = build(&schema, r#"{"attrs": [1, 2]}"#).expect_err("must fail");
	let rendered = err.to_string();
	assert!(rendered.contains("attrs"), "got: {rendered}");
	assert!(rendered.contains("expected object, got array"), "got: {rendered}");
}

#[test]
fn enum_accepts_declared_names() {
	let schema = order_schema();
	let message = build(&schema, r#"{"status": "ACTIVE"}"#).expect("build succeeds");
	assert_eq!(field(&message, &schema, "status"), &Value::Enum(1));
}

#[test]
fn enum_rejects_undeclared_names() {
	let schema = order_schema();
	let err = build(&schema, r#"{"status": "BOGUS"}"#).expect_err("must fail");
	let ProtoError::Field { path, source } = err else {
		panic!("expected field-wrapped error");
	};
	assert_eq!(path, "status");
	assert!(matches!(*source, ProtoError::UnknownEnumValue { ref name, .. } if name == "BOGUS"), "wrong cause");
}

#[test]
fn enum_passes_undeclared_numbers_through() {
	let schema = order_schema();
	let message = build(&schema, r#"{"status": 7}"#).expect("build succeeds");
	assert_eq!(field(&message, &schema, "status"), &Value::Enum(7));
}

#[test]
fn bytes_field_decodes_base64() {
	let schema = order_schema();
	let message = build(&schema, r#"{"payload": "aGVsbG8="}"#).expect("build succeeds");
	assert_eq!(field(&message, &schema, "payload"), &Value::Bytes(b"hello".to_vec()));
}

#[test]
fn bytes_field_rejects_malformed_base64() {
	let schema = order_schema();
	let err = build(&schema, r#"{"payload": "not-base64!"}"#).expect_err("must fail");
	let ProtoError::Field { path, source } = err else {
		panic!("expected field-wrapped error");
	};
	assert_eq!(path, "payload");
	assert!(matches!(*source, ProtoError::InvalidBase64 { .. }), "wrong cause");
}

#[test]
fn nested_failure_reports_dotted_field_path() {
	let schema = order_schema();
	let err = build(&schema, r#"{"inner": {"x": "nope"}}"#).expect_err("must fail");
	let rendered = err.to_string();
	assert!(rendered.contains("inner.x"), "got: {rendered}");
}

#[test]
fn int32_assignment_truncates_toward_zero() {
	let schema = order_schema();
	let message = build(&schema, r#"{"size": 3.9}"#).expect("build succeeds");
	assert_eq!(field(&message, &schema, "size"), &Value::I32(3));

	let message = build(&schema, r#"{"size": -3.9}"#).expect("build succeeds");
	assert_eq!(field(&message, &schema, "size"), &Value::I32(-3));
}

#[test]
fn group_fields_fail_for_any_value() {
	let schema = Schema::parse(
		r#"
		syntax = "proto2";
		message Holder {
			optional group Blob = 1 {
				optional int32 a = 2;
			}
		}
		"#,
	)
	.expect("schema parses");
	let desc = schema.message_by_name("Holder").expect("message resolves");

	for input in [r#"{"blob": {}}"#, r#"{"blob": 1}"#, r#"{"blob": "x"}"#] {
		let document: serde_json::Value = serde_json::from_str(input).expect("test json parses");
		let object = document.as_object().expect("test input is an object");
		let err = build_message(&schema, desc, object, &BuildOptions::default()).expect_err("must fail");
		let ProtoError::Field { source, .. } = err else {
			panic!("expected field-wrapped error");
		};
		assert!(matches!(*source, ProtoError::GroupUnsupported), "wrong cause");
	}
}

#[test]
fn message_nesting_beyond_limit_fails_with_depth_exceeded() {
	let schema = Schema::parse("message Node { Node next = 1; }").expect("schema parses");
	let desc = schema.message_by_name("Node").expect("message resolves");

	let mut input = "{}".to_owned();
	for _ in 0..40 {
		input = format!("{{\"next\": {input}}}");
	}
	let document: serde_json::Value = serde_json::from_str(&input).expect("test json parses");
	let object = document.as_object().expect("test input is an object");

	let err = build_message(&schema, desc, object, &BuildOptions { max_depth: 8 }).expect_err("must fail");
	let mut cause = &err;
	while let ProtoError::Field { source, .. } = cause {
		cause = &**source;
	}
	assert!(matches!(cause, ProtoError::DepthExceeded { max_depth: 8 }), "got: {err}");
}

fn order_schema() -> Schema {
	Schema::parse(ORDER_SCHEMA).expect("schema parses")
}

fn build(schema: &Schema, input: &str) -> Result<MessageValue, ProtoError> {
	let desc = schema.message_by_name("Order").expect("message resolves");
	let document: serde_json::Value = serde_json::from_str(input).expect("test json parses");
	let object = document.as_object().expect("test input is an object");
	build_message(schema, desc, object, &BuildOptions::default())
}

fn field<'a>(message: &'a MessageValue, schema: &Schema, json_name: &str) -> &'a Value {
	let desc = schema.message_by_name("Order").expect("message resolves");
	let (index, _) = desc.field_by_json_name(json_name).expect("field declared");
	message.get(index).expect("field set")
}
