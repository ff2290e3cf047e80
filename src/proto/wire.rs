use crate::proto::schema::{Cardinality, FieldDescriptor, FieldKind, MessageDescriptor, Schema};
use crate::proto::value::{MessageValue, Value};
use crate::proto::{ProtoError, Result};

const WIRE_VARINT: u64 = 0;
const WIRE_FIXED64: u64 = 1;
const WIRE_LEN: u64 = 2;
const WIRE_FIXED32: u64 = 5;

const MAP_KEY_NUMBER: u32 = 1;
const MAP_VALUE_NUMBER: u32 = 2;

/// Encode a built message to protobuf wire bytes.
///
/// Fields are emitted in descriptor declaration order, so output is
/// deterministic regardless of input key order. Unset fields are omitted.
pub fn encode_message(schema: &Schema, desc: &MessageDescriptor, message: &MessageValue) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	encode_fields(schema, desc, message, &mut out)?;
	Ok(out)
}

fn encode_fields(schema: &Schema, desc: &MessageDescriptor, message: &MessageValue, out: &mut Vec<u8>) -> Result<()> {
	for (index, field) in desc.fields.iter().enumerate() {
		let Some(value) = message.get(index) else {
			continue;
		};
		encode_field(schema, field, value, out)?;
	}
	Ok(())
}

fn encode_field(schema: &Schema, field: &FieldDescriptor, value: &Value, out: &mut Vec<u8>) -> Result<()> {
	match field.cardinality {
		Cardinality::Singular => encode_single(schema, field.number, &field.kind, value, out),
		Cardinality::List => encode_list(schema, field, value, out),
		Cardinality::Map => encode_map(schema, field, value, out),
	}
}

fn encode_list(schema: &Schema, field: &FieldDescriptor, value: &Value, out: &mut Vec<u8>) -> Result<()> {
	let Value::List(items) = value else {
		return Err(ProtoError::EncodeShape { expected: "list" });
	};
	if items.is_empty() {
		return Ok(());
	}

	if is_packable(&field.kind) {
		// Proto3 packs repeated scalars into one length-delimited record.
		let mut payload = Vec::new();
		for item in items {
			scalar_payload(&field.kind, item, &mut payload)?;
		}
		put_tag(out, field.number, WIRE_LEN);
		put_len_prefixed(out, &payload);
		return Ok(());
	}

	for item in items {
		encode_single(schema, field.number, &field.kind, item, out)?;
	}
	Ok(())
}

fn encode_map(schema: &Schema, field: &FieldDescriptor, value: &Value, out: &mut Vec<u8>) -> Result<()> {
	let Value::Map(entries) = value else {
		return Err(ProtoError::EncodeShape { expected: "map" });
	};

	// Each entry becomes a synthetic message: string key = 1, value = 2.
	for (key, item) in entries {
		let mut entry = Vec::new();
		put_tag(&mut entry, MAP_KEY_NUMBER, WIRE_LEN);
		put_len_prefixed(&mut entry, key.as_bytes());
		encode_single(schema, MAP_VALUE_NUMBER, &field.kind, item, &mut entry)?;

		put_tag(out, field.number, WIRE_LEN);
		put_len_prefixed(out, &entry);
	}
	Ok(())
}

fn encode_single(schema: &Schema, number: u32, kind: &FieldKind, value: &Value, out: &mut Vec<u8>) -> Result<()> {
	match kind {
		FieldKind::String => {
			let Value::String(text) = value else {
				return Err(ProtoError::EncodeShape { expected: "string" });
			};
			put_tag(out, number, WIRE_LEN);
			put_len_prefixed(out, text.as_bytes());
			Ok(())
		}
		FieldKind::Bytes => {
			let Value::Bytes(bytes) = value else {
				return Err(ProtoError::EncodeShape { expected: "bytes" });
			};
			put_tag(out, number, WIRE_LEN);
			put_len_prefixed(out, bytes);
			Ok(())
		}
		FieldKind::Message(type_name) => {
			let Value::Message(nested) = value else {
				return Err(ProtoError::EncodeShape { expected: "message" });
			};
			let nested_desc = schema
				.message(type_name)
				.ok_or_else(|| ProtoError::TypeNotFound { name: type_name.clone() })?;
			let mut payload = Vec::new();
			encode_fields(schema, nested_desc, nested, &mut payload)?;
			put_tag(out, number, WIRE_LEN);
			put_len_prefixed(out, &payload);
			Ok(())
		}
		FieldKind::Group => Err(ProtoError::GroupUnsupported),
		_ => {
			put_tag(out, number, scalar_wire_type(kind));
			scalar_payload(kind, value, out)
		}
	}
}

fn is_packable(kind: &FieldKind) -> bool {
	!matches!(kind, FieldKind::String | FieldKind::Bytes | FieldKind::Message(_) | FieldKind::Group)
}

fn scalar_wire_type(kind: &FieldKind) -> u64 {
	match kind {
		FieldKind::Fixed32 | FieldKind::Sfixed32 | FieldKind::Float => WIRE_FIXED32,
		FieldKind::Fixed64 | FieldKind::Sfixed64 | FieldKind::Double => WIRE_FIXED64,
		_ => WIRE_VARINT,
	}
}

/// Append one scalar value without its tag, for both singular and packed
/// encodings.
fn scalar_payload(kind: &FieldKind, value: &Value, out: &mut Vec<u8>) -> Result<()> {
	match (kind, value) {
		(FieldKind::Bool, Value::Bool(flag)) => put_varint(out, u64::from(*flag)),
		(FieldKind::Int32, Value::I32(number)) => put_varint(out, i64::from(*number) as u64),
		(FieldKind::Sint32, Value::I32(number)) => put_varint(out, zigzag32(*number)),
		(FieldKind::Sfixed32, Value::I32(number)) => out.extend_from_slice(&number.to_le_bytes()),
		(FieldKind::Int64, Value::I64(number)) => put_varint(out, *number as u64),
		(FieldKind::Sint64, Value::I64(number)) => put_varint(out, zigzag64(*number)),
		(FieldKind::Sfixed64, Value::I64(number)) => out.extend_from_slice(&number.to_le_bytes()),
		(FieldKind::Uint32, Value::U32(number)) => put_varint(out, u64::from(*number)),
		(FieldKind::Fixed32, Value::U32(number)) => out.extend_from_slice(&number.to_le_bytes()),
		(FieldKind::Uint64, Value::U64(number)) => put_varint(out, *number),
		(FieldKind::Fixed64, Value::U64(number)) => out.extend_from_slice(&number.to_le_bytes()),
		(FieldKind::Float, Value::F32(number)) => out.extend_from_slice(&number.to_le_bytes()),
		(FieldKind::Double, Value::F64(number)) => out.extend_from_slice(&number.to_le_bytes()),
		(FieldKind::Enum(_), Value::Enum(number)) => put_varint(out, i64::from(*number) as u64),
		_ => return Err(ProtoError::EncodeShape { expected: "scalar" }),
	}
	Ok(())
}

fn put_tag(out: &mut Vec<u8>, number: u32, wire_type: u64) {
	put_varint(out, (u64::from(number) << 3) | wire_type);
}

fn put_len_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
	put_varint(out, bytes.len() as u64);
	out.extend_from_slice(bytes);
}

fn put_varint(out: &mut Vec<u8>, mut value: u64) {
	loop {
		let byte = (value & 0x7f) as u8;
		value >>= 7;
		if value == 0 {
			out.push(byte);
			break;
		}
		out.push(byte | 0x80);
	}
}

fn zigzag32(value: i32) -> u64 {
	u64::from(((value << 1) ^ (value >> 31)) as u32)
}

fn zigzag64(value: i64) -> u64 {
	((value << 1) ^ (value >> 63)) as u64
}
