//! Schema-driven conversion from generic JSON values to protobuf messages.
//!
//! The [`proto`] module parses `.proto` schema source into descriptors,
//! builds typed message instances from loosely-typed JSON documents, and
//! encodes the result to protobuf wire bytes.

/// Schema parsing, message construction, and wire/text encoding.
pub mod proto;
