use std::collections::BTreeMap;

/// Native coerced value for one field slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Boolean scalar.
	Bool(bool),
	/// Signed 32-bit integer family (`int32`, `sint32`, `sfixed32`).
	I32(i32),
	/// Signed 64-bit integer family.
	I64(i64),
	/// Unsigned 32-bit integer family.
	U32(u32),
	/// Unsigned 64-bit integer family.
	U64(u64),
	/// 32-bit float.
	F32(f32),
	/// 64-bit float.
	F64(f64),
	/// UTF-8 string.
	String(Box<str>),
	/// Decoded binary payload.
	Bytes(Vec<u8>),
	/// Enum wire number; not required to appear in the enum value table.
	Enum(i32),
	/// Repeated field elements in input order.
	List(Vec<Value>),
	/// Map field entries; keys are input object keys verbatim.
	Map(BTreeMap<String, Value>),
	/// Nested message instance.
	Message(MessageValue),
}

/// Built message instance keyed by descriptor field index.
///
/// Only fields declared by the descriptor can be present; each slot is
/// either absent or holds a value consistent with the declared kind and
/// cardinality.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageValue {
	/// Fully-qualified message type name.
	pub type_name: Box<str>,
	/// Set fields in input order.
	pub fields: Vec<FieldInstance>,
}

/// One populated field slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInstance {
	/// Index into the descriptor's field vector.
	pub index: usize,
	/// Coerced native value.
	pub value: Value,
}

impl MessageValue {
	/// Value for a descriptor field index, if set.
	pub fn get(&self, index: usize) -> Option<&Value> {
		self.fields.iter().find(|field| field.index == index).map(|field| &field.value)
	}
}
