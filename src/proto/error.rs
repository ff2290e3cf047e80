use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ProtoError>;

/// Errors produced while parsing schemas, building messages, and encoding.
#[derive(Debug, Error)]
pub enum ProtoError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Input was not a valid JSON document.
	#[error("invalid json input: {0}")]
	InvalidJson(#[from] serde_json::Error),
	/// Top-level JSON document was not an object.
	#[error("top-level json value must be an object, got {got}")]
	TopLevelNotObject {
		/// JSON kind of the supplied document.
		got: &'static str,
	},
	/// Input object key matched no field json name.
	#[error("unknown field: {name}")]
	UnknownField {
		/// Offending input key.
		name: String,
	},
	/// Generic value had the wrong JSON shape for the declared kind.
	#[error("expected {expected}, got {got}")]
	TypeMismatch {
		/// Accepted JSON shape for the field kind.
		expected: &'static str,
		/// JSON kind of the rejected value.
		got: &'static str,
	},
	/// Bytes field payload failed base64 decoding.
	#[error("invalid base64 payload: {source}")]
	InvalidBase64 {
		/// Underlying decode failure.
		source: base64::DecodeError,
	},
	/// Enum field string matched no declared enum value name.
	#[error("unknown enum value {name} for {enum_name}")]
	UnknownEnumValue {
		/// Rejected value name.
		name: String,
		/// Enum type being matched.
		enum_name: String,
	},
	/// Group-kind fields are never convertible.
	#[error("group fields are unsupported")]
	GroupUnsupported,
	/// Message nesting exceeded the configured depth limit.
	#[error("message depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Failure inside a named field, with dotted path context.
	#[error("{path}: {source}")]
	Field {
		/// Dotted path of field keys from the input root.
		path: String,
		/// Underlying failure.
		source: Box<ProtoError>,
	},
	/// Encoder was handed a value inconsistent with its descriptor.
	#[error("encode shape mismatch: expected {expected} value")]
	EncodeShape {
		/// Native value shape the descriptor requires.
		expected: &'static str,
	},
	/// Schema source text failed to parse.
	#[error("schema syntax error at line {line}: {message}")]
	SchemaSyntax {
		/// 1-based source line of the failure.
		line: usize,
		/// Human-readable description.
		message: String,
	},
	/// Field referenced a message or enum type missing from the schema.
	#[error("type not found: {name}")]
	TypeNotFound {
		/// Unresolved type reference.
		name: String,
	},
	/// Two schema declarations used the same fully-qualified type name.
	#[error("duplicate type name: {name}")]
	DuplicateType {
		/// Conflicting fully-qualified name.
		name: String,
	},
	/// Two fields of one message mapped to the same json name.
	#[error("duplicate json name {json_name} in {message}")]
	DuplicateJsonName {
		/// Conflicting json name.
		json_name: String,
		/// Message type declaring the conflict.
		message: String,
	},
	/// Requested message type was not declared by any schema file.
	#[error("message not found: {name}")]
	MessageNotFound {
		/// Requested message name.
		name: String,
	},
}

impl ProtoError {
	/// Wrap an error with a field key, extending any existing dotted path.
	pub(crate) fn in_field(self, key: &str) -> ProtoError {
		match self {
			ProtoError::Field { path, source } => ProtoError::Field {
				path: format!("{key}.{path}"),
				source,
			},
			other => ProtoError::Field {
				path: key.to_owned(),
				source: Box::new(other),
			},
		}
	}
}
