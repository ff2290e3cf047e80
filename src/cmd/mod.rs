/// JSON-to-wire encode command.
pub mod encode;
/// Schema descriptor inspection command.
pub mod schema;
