use std::io::{Read, Write};
use std::path::PathBuf;

use protocast::proto::{BuildOptions, ProtoError, Result, Schema, build_message, encode_message, format_message, json_kind};

/// Read one JSON document from stdin and emit wire bytes for `message_name`.
pub fn run(message_name: String, proto_paths: Vec<PathBuf>, out_path: Option<PathBuf>, verbose: bool) -> Result<()> {
	let mut input = String::new();
	std::io::stdin().read_to_string(&mut input)?;

	let schema = Schema::parse_files(&proto_paths)?;
	let desc = schema
		.message_by_name(&message_name)
		.ok_or(ProtoError::MessageNotFound { name: message_name })?;

	let document: serde_json::Value = serde_json::from_str(&input)?;
	let Some(object) = document.as_object() else {
		return Err(ProtoError::TopLevelNotObject { got: json_kind(&document) });
	};

	let message = build_message(&schema, desc, object, &BuildOptions::default())?;

	if verbose {
		eprint!("{}", format_message(&schema, desc, &message));
	}

	let bytes = encode_message(&schema, desc, &message)?;
	match out_path {
		Some(path) => std::fs::write(path, &bytes)?,
		None => {
			let mut stdout = std::io::stdout().lock();
			stdout.write_all(&bytes)?;
			stdout.flush()?;
		}
	}

	Ok(())
}
