use crate::proto::schema::{Cardinality, FieldDescriptor, FieldKind, MessageDescriptor, Schema};
use crate::proto::value::{MessageValue, Value};

/// Render a built message in protobuf text format.
///
/// Enum numbers print by name when the value table declares them; unknown
/// numbers print numerically.
pub fn format_message(schema: &Schema, desc: &MessageDescriptor, message: &MessageValue) -> String {
	let mut out = String::new();
	write_fields(schema, desc, message, 0, &mut out);
	out
}

fn write_fields(schema: &Schema, desc: &MessageDescriptor, message: &MessageValue, indent: usize, out: &mut String) {
	for (index, field) in desc.fields.iter().enumerate() {
		let Some(value) = message.get(index) else {
			continue;
		};
		match field.cardinality {
			Cardinality::Singular => write_named(schema, &field.name, &field.kind, value, indent, out),
			Cardinality::List => {
				if let Value::List(items) = value {
					for item in items {
						write_named(schema, &field.name, &field.kind, item, indent, out);
					}
				}
			}
			Cardinality::Map => write_map_entries(schema, field, value, indent, out),
		}
	}
}

fn write_map_entries(schema: &Schema, field: &FieldDescriptor, value: &Value, indent: usize, out: &mut String) {
	let Value::Map(entries) = value else {
		return;
	};
	let pad = "  ".repeat(indent);
	for (key, item) in entries {
		out.push_str(&format!("{pad}{} {{\n", field.name));
		out.push_str(&format!("{pad}  key: \"{}\"\n", escape_text(key)));
		write_named(schema, "value", &field.kind, item, indent + 1, out);
		out.push_str(&format!("{pad}}}\n"));
	}
}

fn write_named(schema: &Schema, name: &str, kind: &FieldKind, value: &Value, indent: usize, out: &mut String) {
	let pad = "  ".repeat(indent);
	match value {
		Value::Message(nested) => {
			out.push_str(&format!("{pad}{name} {{\n"));
			if let FieldKind::Message(type_name) = kind {
				if let Some(nested_desc) = schema.message(type_name) {
					write_fields(schema, nested_desc, nested, indent + 1, out);
				}
			}
			out.push_str(&format!("{pad}}}\n"));
		}
		Value::Enum(number) => {
			let mut label = None;
			if let FieldKind::Enum(enum_name) = kind {
				if let Some(enum_desc) = schema.enum_desc(enum_name) {
					label = enum_desc.name_by_number(*number);
				}
			}
			match label {
				Some(text) => out.push_str(&format!("{pad}{name}: {text}\n")),
				None => out.push_str(&format!("{pad}{name}: {number}\n")),
			}
		}
		Value::Bool(flag) => out.push_str(&format!("{pad}{name}: {flag}\n")),
		Value::I32(number) => out.push_str(&format!("{pad}{name}: {number}\n")),
		Value::I64(number) => out.push_str(&format!("{pad}{name}: {number}\n")),
		Value::U32(number) => out.push_str(&format!("{pad}{name}: {number}\n")),
		Value::U64(number) => out.push_str(&format!("{pad}{name}: {number}\n")),
		Value::F32(number) => out.push_str(&format!("{pad}{name}: {number}\n")),
		Value::F64(number) => out.push_str(&format!("{pad}{name}: {number}\n")),
		Value::String(text) => out.push_str(&format!("{pad}{name}: \"{}\"\n", escape_text(text))),
		Value::Bytes(bytes) => out.push_str(&format!("{pad}{name}: \"{}\"\n", escape_bytes(bytes))),
		// List and map shapes are expanded by the caller.
		Value::List(_) | Value::Map(_) => {}
	}
}

fn escape_text(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	for ch in input.chars() {
		match ch {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
			c => out.push(c),
		}
	}
	out
}

fn escape_bytes(bytes: &[u8]) -> String {
	let mut out = String::with_capacity(bytes.len());
	for byte in bytes {
		match byte {
			b'"' => out.push_str("\\\""),
			b'\\' => out.push_str("\\\\"),
			b'\n' => out.push_str("\\n"),
			b'\r' => out.push_str("\\r"),
			b'\t' => out.push_str("\\t"),
			byte if byte.is_ascii_graphic() || *byte == b' ' => out.push(char::from(*byte)),
			byte => out.push_str(&format!("\\x{byte:02x}")),
		}
	}
	out
}
