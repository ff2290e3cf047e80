use std::collections::BTreeMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::proto::schema::{Cardinality, FieldDescriptor, FieldKind, MessageDescriptor, Schema};
use crate::proto::value::{FieldInstance, MessageValue, Value};
use crate::proto::{ProtoError, Result};

/// Runtime limits for message construction.
#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
	/// Maximum recursive message nesting depth.
	pub max_depth: u32,
}

impl Default for BuildOptions {
	fn default() -> Self {
		Self { max_depth: 32 }
	}
}

/// Build a message instance from a generic JSON object.
///
/// Every input key must resolve to a declared field json name; absent keys
/// leave their fields unset. The first failure aborts the whole build with
/// dotted field path context.
pub fn build_message(schema: &Schema, desc: &MessageDescriptor, object: &JsonMap<String, JsonValue>, opt: &BuildOptions) -> Result<MessageValue> {
	build_message_impl(schema, desc, object, opt, 0)
}

fn build_message_impl(
	schema: &Schema,
	desc: &MessageDescriptor,
	object: &JsonMap<String, JsonValue>,
	opt: &BuildOptions,
	depth: u32,
) -> Result<MessageValue> {
	if depth >= opt.max_depth {
		return Err(ProtoError::DepthExceeded { max_depth: opt.max_depth });
	}

	let mut fields = Vec::with_capacity(object.len());
	for (key, value) in object {
		let (index, field) = desc
			.field_by_json_name(key)
			.ok_or_else(|| ProtoError::UnknownField { name: key.clone() })?;

		let built = match field.cardinality {
			Cardinality::List => build_list_field(schema, field, key, value, opt, depth)?,
			Cardinality::Map => build_map_field(schema, field, key, value, opt, depth)?,
			Cardinality::Singular => coerce_value(schema, &field.kind, value, opt, depth).map_err(|err| err.in_field(key))?,
		};
		fields.push(FieldInstance { index, value: built });
	}

	Ok(MessageValue {
		type_name: desc.full_name.clone().into_boxed_str(),
		fields,
	})
}

fn build_list_field(
	schema: &Schema,
	field: &FieldDescriptor,
	key: &str,
	value: &JsonValue,
	opt: &BuildOptions,
	depth: u32,
) -> Result<Value> {
	let Some(items) = value.as_array() else {
		return Err(mismatch("array", value).in_field(key));
	};

	let mut out = Vec::with_capacity(items.len());
	for (index, item) in items.iter().enumerate() {
		let coerced = coerce_value(schema, &field.kind, item, opt, depth).map_err(|err| err.in_field(&format!("{key}[{index}]")))?;
		out.push(coerced);
	}
	Ok(Value::List(out))
}

fn build_map_field(
	schema: &Schema,
	field: &FieldDescriptor,
	key: &str,
	value: &JsonValue,
	opt: &BuildOptions,
	depth: u32,
) -> Result<Value> {
	let Some(entries) = value.as_object() else {
		return Err(mismatch("object", value).in_field(key));
	};

	let mut out = BTreeMap::new();
	for (entry_key, entry_value) in entries {
		let coerced =
			coerce_value(schema, &field.kind, entry_value, opt, depth).map_err(|err| err.in_field(&format!("{key}[{entry_key:?}]")))?;
		out.insert(entry_key.clone(), coerced);
	}
	Ok(Value::Map(out))
}

/// Convert one generic value to a field kind's native representation.
///
/// Numeric kinds narrow from the JSON double with truncation toward zero
/// and no range check; enum numbers pass through without consulting the
/// value table. Both match the permissive wire semantics of the formats
/// this feeds.
pub fn coerce_value(schema: &Schema, kind: &FieldKind, value: &JsonValue, opt: &BuildOptions, depth: u32) -> Result<Value> {
	match kind {
		FieldKind::Bool => match value.as_bool() {
			Some(flag) => Ok(Value::Bool(flag)),
			None => Err(mismatch("bool", value)),
		},
		FieldKind::Int32 | FieldKind::Sint32 | FieldKind::Sfixed32 => Ok(Value::I32(number(value)? as i32)),
		FieldKind::Int64 | FieldKind::Sint64 | FieldKind::Sfixed64 => Ok(Value::I64(number(value)? as i64)),
		FieldKind::Uint32 | FieldKind::Fixed32 => Ok(Value::U32(number(value)? as u32)),
		FieldKind::Uint64 | FieldKind::Fixed64 => Ok(Value::U64(number(value)? as u64)),
		FieldKind::Float => Ok(Value::F32(number(value)? as f32)),
		FieldKind::Double => Ok(Value::F64(number(value)?)),
		FieldKind::String => match value.as_str() {
			Some(text) => Ok(Value::String(text.to_owned().into_boxed_str())),
			None => Err(mismatch("string", value)),
		},
		FieldKind::Bytes => {
			let Some(text) = value.as_str() else {
				return Err(mismatch("string", value));
			};
			let decoded = STANDARD.decode(text).map_err(|source| ProtoError::InvalidBase64 { source })?;
			Ok(Value::Bytes(decoded))
		}
		FieldKind::Enum(enum_name) => coerce_enum(schema, enum_name, value),
		FieldKind::Message(message_name) => {
			let Some(object) = value.as_object() else {
				return Err(mismatch("object", value));
			};
			let nested = schema
				.message(message_name)
				.ok_or_else(|| ProtoError::TypeNotFound { name: message_name.clone() })?;
			Ok(Value::Message(build_message_impl(schema, nested, object, opt, depth + 1)?))
		}
		FieldKind::Group => Err(ProtoError::GroupUnsupported),
	}
}

fn coerce_enum(schema: &Schema, enum_name: &str, value: &JsonValue) -> Result<Value> {
	if let Some(number) = value.as_f64() {
		return Ok(Value::Enum(number as i32));
	}
	let Some(name) = value.as_str() else {
		return Err(mismatch("string or number", value));
	};
	let desc = schema
		.enum_desc(enum_name)
		.ok_or_else(|| ProtoError::TypeNotFound { name: enum_name.to_owned() })?;
	match desc.value_by_name(name) {
		Some(number) => Ok(Value::Enum(number)),
		None => Err(ProtoError::UnknownEnumValue {
			name: name.to_owned(),
			enum_name: enum_name.to_owned(),
		}),
	}
}

fn number(value: &JsonValue) -> Result<f64> {
	value.as_f64().ok_or_else(|| mismatch("number", value))
}

fn mismatch(expected: &'static str, value: &JsonValue) -> ProtoError {
	ProtoError::TypeMismatch {
		expected,
		got: json_kind(value),
	}
}

/// JSON kind label used in type mismatch errors.
pub fn json_kind(value: &JsonValue) -> &'static str {
	match value {
		JsonValue::Null => "null",
		JsonValue::Bool(_) => "bool",
		JsonValue::Number(_) => "number",
		JsonValue::String(_) => "string",
		JsonValue::Array(_) => "array",
		JsonValue::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests {
	use super::{BuildOptions, coerce_value};
	use crate::proto::schema::{FieldKind, Schema};
	use crate::proto::value::Value;

	fn coerce(kind: FieldKind, json: &str) -> crate::proto::Result<Value> {
		let schema = Schema::default();
		let value: serde_json::Value = serde_json::from_str(json).expect("test json parses");
		coerce_value(&schema, &kind, &value, &BuildOptions::default(), 0)
	}

	#[test]
	fn int32_narrowing_truncates_toward_zero() {
		assert_eq!(coerce(FieldKind::Int32, "3.9").expect("coerces"), Value::I32(3));
		assert_eq!(coerce(FieldKind::Int32, "-3.9").expect("coerces"), Value::I32(-3));
	}

	#[test]
	fn uint64_accepts_whole_doubles() {
		assert_eq!(coerce(FieldKind::Uint64, "42").expect("coerces"), Value::U64(42));
	}

	#[test]
	fn float_narrows_from_double() {
		assert_eq!(coerce(FieldKind::Float, "1.5").expect("coerces"), Value::F32(1.5));
	}

	#[test]
	fn bool_rejects_numbers() {
		let err = coerce(FieldKind::Bool, "1").expect_err("must fail");
		assert!(err.to_string().contains("expected bool, got number"), "got: {err}");
	}

	#[test]
	fn bytes_decodes_standard_base64() {
		assert_eq!(coerce(FieldKind::Bytes, "\"aGVsbG8=\"").expect("decodes"), Value::Bytes(b"hello".to_vec()));
	}

	#[test]
	fn group_kind_is_always_rejected() {
		for json in ["null", "true", "1", "\"x\"", "[]", "{}"] {
			let err = coerce(FieldKind::Group, json).expect_err("must fail");
			assert!(matches!(err, crate::proto::ProtoError::GroupUnsupported), "got: {err}");
		}
	}
}
