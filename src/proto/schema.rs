use std::collections::HashMap;

use crate::proto::{ProtoError, Result};

/// Scalar or composite category a field is declared as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
	/// `bool`.
	Bool,
	/// `int32`.
	Int32,
	/// `sint32` (zigzag varint on the wire).
	Sint32,
	/// `sfixed32`.
	Sfixed32,
	/// `int64`.
	Int64,
	/// `sint64` (zigzag varint on the wire).
	Sint64,
	/// `sfixed64`.
	Sfixed64,
	/// `uint32`.
	Uint32,
	/// `fixed32`.
	Fixed32,
	/// `uint64`.
	Uint64,
	/// `fixed64`.
	Fixed64,
	/// `float`.
	Float,
	/// `double`.
	Double,
	/// `string`.
	String,
	/// `bytes` (base64 text on the JSON side).
	Bytes,
	/// Enum field; payload is the fully-qualified enum type name.
	Enum(String),
	/// Nested message field; payload is the fully-qualified message type name.
	Message(String),
	/// Proto2 group field; always rejected by the builder.
	Group,
}

impl FieldKind {
	/// Keyword-style label used in schema listings.
	pub fn label(&self) -> &str {
		match self {
			FieldKind::Bool => "bool",
			FieldKind::Int32 => "int32",
			FieldKind::Sint32 => "sint32",
			FieldKind::Sfixed32 => "sfixed32",
			FieldKind::Int64 => "int64",
			FieldKind::Sint64 => "sint64",
			FieldKind::Sfixed64 => "sfixed64",
			FieldKind::Uint32 => "uint32",
			FieldKind::Fixed32 => "fixed32",
			FieldKind::Uint64 => "uint64",
			FieldKind::Fixed64 => "fixed64",
			FieldKind::Float => "float",
			FieldKind::Double => "double",
			FieldKind::String => "string",
			FieldKind::Bytes => "bytes",
			FieldKind::Enum(name) => name,
			FieldKind::Message(name) => name,
			FieldKind::Group => "group",
		}
	}
}

/// Whether a field holds one value, an ordered list, or a string-keyed map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
	/// Exactly one value slot.
	Singular,
	/// Ordered `repeated` list.
	List,
	/// String-keyed map; the descriptor kind describes the map value type.
	Map,
}

impl Cardinality {
	/// Label used in schema listings.
	pub fn label(self) -> &'static str {
		match self {
			Cardinality::Singular => "singular",
			Cardinality::List => "repeated",
			Cardinality::Map => "map",
		}
	}
}

/// Schema metadata for one message field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
	/// Field name as declared in schema source.
	pub name: String,
	/// Key matched against input object keys.
	pub json_name: String,
	/// Wire field number.
	pub number: u32,
	/// Singular, repeated list, or string-keyed map.
	pub cardinality: Cardinality,
	/// Declared kind; the element kind for lists, the value kind for maps.
	pub kind: FieldKind,
}

/// Ordered field set for one message type.
#[derive(Debug, Clone)]
pub struct MessageDescriptor {
	/// Fully-qualified type name.
	pub full_name: String,
	/// Field declarations in source order.
	pub fields: Vec<FieldDescriptor>,
	by_json_name: HashMap<String, usize>,
}

impl MessageDescriptor {
	pub(crate) fn new(full_name: String, fields: Vec<FieldDescriptor>) -> Result<Self> {
		let mut by_json_name = HashMap::with_capacity(fields.len());
		for (index, field) in fields.iter().enumerate() {
			if by_json_name.insert(field.json_name.clone(), index).is_some() {
				return Err(ProtoError::DuplicateJsonName {
					json_name: field.json_name.clone(),
					message: full_name,
				});
			}
		}
		Ok(Self {
			full_name,
			fields,
			by_json_name,
		})
	}

	/// Exact-match, case-sensitive field lookup by json name.
	pub fn field_by_json_name(&self, key: &str) -> Option<(usize, &FieldDescriptor)> {
		self.by_json_name.get(key).map(|index| (*index, &self.fields[*index]))
	}
}

/// One declared enum value.
#[derive(Debug, Clone)]
pub struct EnumValue {
	/// Declared value name.
	pub name: String,
	/// Declared numeric value.
	pub number: i32,
}

/// Value table for one enum type.
#[derive(Debug, Clone)]
pub struct EnumDescriptor {
	/// Fully-qualified type name.
	pub full_name: String,
	/// Declared values in source order.
	pub values: Vec<EnumValue>,
	by_name: HashMap<String, i32>,
}

impl EnumDescriptor {
	pub(crate) fn new(full_name: String, values: Vec<EnumValue>) -> Self {
		let by_name = values.iter().map(|value| (value.name.clone(), value.number)).collect();
		Self {
			full_name,
			values,
			by_name,
		}
	}

	/// Numeric value for a declared name, if any.
	pub fn value_by_name(&self, name: &str) -> Option<i32> {
		self.by_name.get(name).copied()
	}

	/// First declared name for a numeric value, if any.
	pub fn name_by_number(&self, number: i32) -> Option<&str> {
		self.values.iter().find(|value| value.number == number).map(|value| value.name.as_str())
	}
}

/// Registry of message and enum descriptors keyed by fully-qualified name.
#[derive(Debug, Default)]
pub struct Schema {
	messages: Vec<MessageDescriptor>,
	enums: Vec<EnumDescriptor>,
	message_index: HashMap<String, usize>,
	enum_index: HashMap<String, usize>,
}

impl Schema {
	pub(crate) fn insert_message(&mut self, desc: MessageDescriptor) -> Result<()> {
		let key = desc.full_name.clone();
		if self.message_index.contains_key(&key) || self.enum_index.contains_key(&key) {
			return Err(ProtoError::DuplicateType { name: key });
		}
		self.message_index.insert(key, self.messages.len());
		self.messages.push(desc);
		Ok(())
	}

	pub(crate) fn insert_enum(&mut self, desc: EnumDescriptor) -> Result<()> {
		let key = desc.full_name.clone();
		if self.message_index.contains_key(&key) || self.enum_index.contains_key(&key) {
			return Err(ProtoError::DuplicateType { name: key });
		}
		self.enum_index.insert(key, self.enums.len());
		self.enums.push(desc);
		Ok(())
	}

	/// Look up a message descriptor by fully-qualified name.
	pub fn message(&self, full_name: &str) -> Option<&MessageDescriptor> {
		self.message_index.get(full_name).map(|index| &self.messages[*index])
	}

	/// Look up an enum descriptor by fully-qualified name.
	pub fn enum_desc(&self, full_name: &str) -> Option<&EnumDescriptor> {
		self.enum_index.get(full_name).map(|index| &self.enums[*index])
	}

	/// Resolve a message by fully-qualified name, falling back to the first
	/// declaration whose simple name matches.
	pub fn message_by_name(&self, name: &str) -> Option<&MessageDescriptor> {
		if let Some(desc) = self.message(name) {
			return Some(desc);
		}
		self.messages.iter().find(|desc| desc.full_name.rsplit('.').next() == Some(name))
	}

	/// All message descriptors in declaration order.
	pub fn messages(&self) -> &[MessageDescriptor] {
		&self.messages
	}

	/// All enum descriptors in declaration order.
	pub fn enums(&self) -> &[EnumDescriptor] {
		&self.enums
	}
}
