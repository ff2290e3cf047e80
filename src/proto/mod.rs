mod build;
mod error;
mod parse;
mod schema;
mod text;
mod value;
mod wire;

/// Message construction entry points and options.
pub use build::{BuildOptions, build_message, coerce_value, json_kind};
/// Error and result aliases.
pub use error::{ProtoError, Result};
/// Schema descriptor types and lookup surface.
pub use schema::{Cardinality, EnumDescriptor, EnumValue, FieldDescriptor, FieldKind, MessageDescriptor, Schema};
/// Text-format rendering of built messages.
pub use text::format_message;
/// Native value tree produced by the builder.
pub use value::{FieldInstance, MessageValue, Value};
/// Wire-format encoding of built messages.
pub use wire::encode_message;
