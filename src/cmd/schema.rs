use std::path::PathBuf;

use serde::Serialize;

use protocast::proto::{MessageDescriptor, ProtoError, Result, Schema};

#[derive(Serialize)]
struct FieldSummary<'a> {
	name: &'a str,
	json_name: &'a str,
	number: u32,
	cardinality: &'static str,
	kind: &'a str,
}

#[derive(Serialize)]
struct MessageSummary<'a> {
	message: &'a str,
	fields: Vec<FieldSummary<'a>>,
}

/// Print a schema summary, or one message descriptor's field table.
pub fn run(proto_paths: Vec<PathBuf>, message: Option<String>, json: bool) -> Result<()> {
	let schema = Schema::parse_files(&proto_paths)?;

	if let Some(name) = message {
		let desc = schema.message_by_name(&name).ok_or(ProtoError::MessageNotFound { name })?;
		print_message(desc, json)?;
		return Ok(());
	}

	println!("messages: {}", schema.messages().len());
	for desc in schema.messages() {
		println!("  {} ({} fields)", desc.full_name, desc.fields.len());
	}
	println!("enums: {}", schema.enums().len());
	for desc in schema.enums() {
		println!("  {} ({} values)", desc.full_name, desc.values.len());
	}

	Ok(())
}

fn print_message(desc: &MessageDescriptor, json: bool) -> Result<()> {
	if json {
		let summary = MessageSummary {
			message: &desc.full_name,
			fields: desc
				.fields
				.iter()
				.map(|field| FieldSummary {
					name: &field.name,
					json_name: &field.json_name,
					number: field.number,
					cardinality: field.cardinality.label(),
					kind: field.kind.label(),
				})
				.collect(),
		};
		println!("{}", serde_json::to_string_pretty(&summary)?);
		return Ok(());
	}

	println!("message: {}", desc.full_name);
	println!("field_count: {}", desc.fields.len());
	for field in &desc.fields {
		println!(
			"  {} {} {} = {} (json: {})",
			field.cardinality.label(),
			field.kind.label(),
			field.name,
			field.number,
			field.json_name
		);
	}

	Ok(())
}
