use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::proto::schema::{Cardinality, EnumDescriptor, EnumValue, FieldDescriptor, FieldKind, MessageDescriptor, Schema};
use crate::proto::{ProtoError, Result};

impl Schema {
	/// Parse one schema source text into a resolved schema.
	pub fn parse(source: &str) -> Result<Schema> {
		let mut builder = SchemaBuilder::default();
		builder.add_source(source)?;
		builder.finish()
	}

	/// Parse and merge several schema files into one resolved schema.
	///
	/// Cross-file type references resolve against the merged set, so
	/// `import` statements are accepted without being followed.
	pub fn parse_files<P: AsRef<Path>>(paths: &[P]) -> Result<Schema> {
		let mut builder = SchemaBuilder::default();
		for path in paths {
			let source = fs::read_to_string(path)?;
			builder.add_source(&source)?;
		}
		builder.finish()
	}
}

#[derive(Debug, Clone)]
enum RawType {
	Scalar(FieldKind),
	Named(String),
	Group,
}

#[derive(Debug)]
struct RawField {
	name: String,
	json_name: Option<String>,
	number: u32,
	cardinality: Cardinality,
	value_type: RawType,
}

#[derive(Debug)]
struct RawMessage {
	full_name: String,
	fields: Vec<RawField>,
}

/// Accumulates raw declarations across source files, then resolves type
/// references in one pass.
#[derive(Debug, Default)]
struct SchemaBuilder {
	messages: Vec<RawMessage>,
	enums: Vec<(String, Vec<EnumValue>)>,
}

impl SchemaBuilder {
	fn add_source(&mut self, source: &str) -> Result<()> {
		Parser::new(source).parse_source(self)
	}

	fn finish(self) -> Result<Schema> {
		let message_names: HashSet<String> = self.messages.iter().map(|message| message.full_name.clone()).collect();
		let enum_names: HashSet<String> = self.enums.iter().map(|(name, _)| name.clone()).collect();

		let mut schema = Schema::default();
		for raw in self.messages {
			let mut fields = Vec::with_capacity(raw.fields.len());
			for field in raw.fields {
				let kind = match field.value_type {
					RawType::Scalar(kind) => kind,
					RawType::Group => FieldKind::Group,
					RawType::Named(reference) => resolve_reference(&raw.full_name, &reference, &message_names, &enum_names)?,
				};
				let json_name = field.json_name.unwrap_or_else(|| default_json_name(&field.name));
				fields.push(FieldDescriptor {
					name: field.name,
					json_name,
					number: field.number,
					cardinality: field.cardinality,
					kind,
				});
			}
			schema.insert_message(MessageDescriptor::new(raw.full_name, fields)?)?;
		}
		for (full_name, values) in self.enums {
			schema.insert_enum(EnumDescriptor::new(full_name, values))?;
		}
		Ok(schema)
	}
}

/// Resolve a type reference from innermost enclosing scope outward, the
/// way protobuf name resolution walks parent scopes.
fn resolve_reference(scope: &str, reference: &str, messages: &HashSet<String>, enums: &HashSet<String>) -> Result<FieldKind> {
	if let Some(absolute) = reference.strip_prefix('.') {
		return lookup_type(absolute, messages, enums).ok_or_else(|| ProtoError::TypeNotFound {
			name: reference.to_owned(),
		});
	}

	let mut prefix = scope;
	loop {
		let candidate = if prefix.is_empty() {
			reference.to_owned()
		} else {
			format!("{prefix}.{reference}")
		};
		if let Some(kind) = lookup_type(&candidate, messages, enums) {
			return Ok(kind);
		}

		match prefix.rfind('.') {
			Some(split) => prefix = &prefix[..split],
			None if !prefix.is_empty() => prefix = "",
			None => {
				return Err(ProtoError::TypeNotFound {
					name: reference.to_owned(),
				});
			}
		}
	}
}

fn lookup_type(name: &str, messages: &HashSet<String>, enums: &HashSet<String>) -> Option<FieldKind> {
	if messages.contains(name) {
		return Some(FieldKind::Message(name.to_owned()));
	}
	if enums.contains(name) {
		return Some(FieldKind::Enum(name.to_owned()));
	}
	None
}

/// Protobuf lowerCamelCase json name derivation: drop underscores,
/// uppercase the letter that followed each one.
fn default_json_name(name: &str) -> String {
	let mut out = String::with_capacity(name.len());
	let mut upper_next = false;
	for ch in name.chars() {
		if ch == '_' {
			upper_next = true;
			continue;
		}
		if upper_next {
			out.extend(ch.to_uppercase());
			upper_next = false;
		} else {
			out.push(ch);
		}
	}
	out
}

fn scalar_kind(word: &str) -> Option<FieldKind> {
	Some(match word {
		"double" => FieldKind::Double,
		"float" => FieldKind::Float,
		"int32" => FieldKind::Int32,
		"int64" => FieldKind::Int64,
		"uint32" => FieldKind::Uint32,
		"uint64" => FieldKind::Uint64,
		"sint32" => FieldKind::Sint32,
		"sint64" => FieldKind::Sint64,
		"fixed32" => FieldKind::Fixed32,
		"fixed64" => FieldKind::Fixed64,
		"sfixed32" => FieldKind::Sfixed32,
		"sfixed64" => FieldKind::Sfixed64,
		"bool" => FieldKind::Bool,
		"string" => FieldKind::String,
		"bytes" => FieldKind::Bytes,
		_ => return None,
	})
}

fn join_name(scope: &str, name: &str) -> String {
	if scope.is_empty() { name.to_owned() } else { format!("{scope}.{name}") }
}

#[derive(Debug, Clone, PartialEq)]
enum Tok {
	Ident(String),
	Str(String),
	Int(u64),
	Punct(u8),
	Eof,
}

fn describe(tok: &Tok) -> String {
	match tok {
		Tok::Ident(text) => format!("`{text}`"),
		Tok::Str(_) => "string literal".to_owned(),
		Tok::Int(value) => format!("`{value}`"),
		Tok::Punct(byte) => format!("`{}`", char::from(*byte)),
		Tok::Eof => "end of input".to_owned(),
	}
}

struct Lexer<'a> {
	src: &'a str,
	bytes: &'a [u8],
	pos: usize,
	line: usize,
}

impl<'a> Lexer<'a> {
	fn new(src: &'a str) -> Self {
		Self {
			src,
			bytes: src.as_bytes(),
			pos: 0,
			line: 1,
		}
	}

	fn next_token(&mut self) -> Result<(Tok, usize)> {
		self.skip_trivia()?;
		let line = self.line;
		let Some(&byte) = self.bytes.get(self.pos) else {
			return Ok((Tok::Eof, line));
		};

		if byte == b'"' || byte == b'\'' {
			return Ok((self.lex_string(byte)?, line));
		}
		if byte.is_ascii_digit() {
			return Ok((self.lex_int()?, line));
		}
		if byte.is_ascii_alphabetic() || byte == b'_' {
			return Ok((self.lex_ident(), line));
		}
		self.pos += 1;
		Ok((Tok::Punct(byte), line))
	}

	fn skip_trivia(&mut self) -> Result<()> {
		loop {
			match self.bytes.get(self.pos) {
				Some(b'\n') => {
					self.line += 1;
					self.pos += 1;
				}
				Some(byte) if byte.is_ascii_whitespace() => self.pos += 1,
				Some(b'/') if self.bytes.get(self.pos + 1) == Some(&b'/') => {
					while let Some(&byte) = self.bytes.get(self.pos) {
						self.pos += 1;
						if byte == b'\n' {
							self.line += 1;
							break;
						}
					}
				}
				Some(b'/') if self.bytes.get(self.pos + 1) == Some(&b'*') => {
					self.pos += 2;
					loop {
						match self.bytes.get(self.pos) {
							None => return Err(self.err("unterminated block comment")),
							Some(b'\n') => {
								self.line += 1;
								self.pos += 1;
							}
							Some(b'*') if self.bytes.get(self.pos + 1) == Some(&b'/') => {
								self.pos += 2;
								break;
							}
							Some(_) => self.pos += 1,
						}
					}
				}
				_ => return Ok(()),
			}
		}
	}

	fn lex_string(&mut self, quote: u8) -> Result<Tok> {
		self.pos += 1;
		let mut out = String::new();
		loop {
			match self.bytes.get(self.pos) {
				None | Some(b'\n') => return Err(self.err("unterminated string literal")),
				Some(&byte) if byte == quote => {
					self.pos += 1;
					return Ok(Tok::Str(out));
				}
				Some(b'\\') => {
					self.pos += 1;
					let Some(&escaped) = self.bytes.get(self.pos) else {
						return Err(self.err("unterminated string literal"));
					};
					self.pos += 1;
					out.push(match escaped {
						b'n' => '\n',
						b't' => '\t',
						b'r' => '\r',
						other => char::from(other),
					});
				}
				Some(&byte) if byte < 0x80 => {
					self.pos += 1;
					out.push(char::from(byte));
				}
				Some(_) => {
					let Some(ch) = self.src[self.pos..].chars().next() else {
						return Err(self.err("unterminated string literal"));
					};
					self.pos += ch.len_utf8();
					out.push(ch);
				}
			}
		}
	}

	fn lex_int(&mut self) -> Result<Tok> {
		let start = self.pos;
		if self.bytes.get(self.pos) == Some(&b'0') && matches!(self.bytes.get(self.pos + 1), Some(b'x' | b'X')) {
			self.pos += 2;
			while matches!(self.bytes.get(self.pos), Some(byte) if byte.is_ascii_hexdigit()) {
				self.pos += 1;
			}
			let value = u64::from_str_radix(&self.src[start + 2..self.pos], 16).map_err(|_| self.err("invalid integer literal"))?;
			return Ok(Tok::Int(value));
		}

		while matches!(self.bytes.get(self.pos), Some(byte) if byte.is_ascii_digit()) {
			self.pos += 1;
		}
		let value = self.src[start..self.pos].parse::<u64>().map_err(|_| self.err("invalid integer literal"))?;
		Ok(Tok::Int(value))
	}

	fn lex_ident(&mut self) -> Tok {
		let start = self.pos;
		while matches!(self.bytes.get(self.pos), Some(byte) if byte.is_ascii_alphanumeric() || *byte == b'_') {
			self.pos += 1;
		}
		Tok::Ident(self.src[start..self.pos].to_owned())
	}

	fn err(&self, message: &str) -> ProtoError {
		ProtoError::SchemaSyntax {
			line: self.line,
			message: message.to_owned(),
		}
	}
}

struct Parser<'a> {
	lexer: Lexer<'a>,
	peeked: Option<(Tok, usize)>,
}

impl<'a> Parser<'a> {
	fn new(source: &'a str) -> Self {
		Self {
			lexer: Lexer::new(source),
			peeked: None,
		}
	}

	fn next(&mut self) -> Result<(Tok, usize)> {
		match self.peeked.take() {
			Some(entry) => Ok(entry),
			None => self.lexer.next_token(),
		}
	}

	fn eat_punct(&mut self, byte: u8) -> Result<bool> {
		if self.peeked.is_none() {
			self.peeked = Some(self.lexer.next_token()?);
		}
		if matches!(self.peeked, Some((Tok::Punct(found), _)) if found == byte) {
			self.peeked = None;
			return Ok(true);
		}
		Ok(false)
	}

	fn expect_punct(&mut self, byte: u8) -> Result<()> {
		let (tok, line) = self.next()?;
		if tok == Tok::Punct(byte) {
			return Ok(());
		}
		Err(self.unexpected(line, &tok, &format!("`{}`", char::from(byte))))
	}

	fn expect_ident(&mut self) -> Result<(String, usize)> {
		let (tok, line) = self.next()?;
		match tok {
			Tok::Ident(text) => Ok((text, line)),
			other => Err(self.unexpected(line, &other, "identifier")),
		}
	}

	fn expect_int(&mut self) -> Result<(u64, usize)> {
		let (tok, line) = self.next()?;
		match tok {
			Tok::Int(value) => Ok((value, line)),
			other => Err(self.unexpected(line, &other, "integer")),
		}
	}

	fn expect_str(&mut self) -> Result<(String, usize)> {
		let (tok, line) = self.next()?;
		match tok {
			Tok::Str(text) => Ok((text, line)),
			other => Err(self.unexpected(line, &other, "string literal")),
		}
	}

	fn unexpected(&self, line: usize, tok: &Tok, wanted: &str) -> ProtoError {
		ProtoError::SchemaSyntax {
			line,
			message: format!("expected {wanted}, got {}", describe(tok)),
		}
	}

	fn syntax_err(&self, line: usize, message: &str) -> ProtoError {
		ProtoError::SchemaSyntax {
			line,
			message: message.to_owned(),
		}
	}

	fn parse_source(&mut self, builder: &mut SchemaBuilder) -> Result<()> {
		let mut package = String::new();
		loop {
			let (tok, line) = self.next()?;
			match tok {
				Tok::Eof => return Ok(()),
				Tok::Punct(b';') => {}
				Tok::Ident(word) => match word.as_str() {
					"syntax" | "edition" => {
						self.expect_punct(b'=')?;
						let _ = self.expect_str()?;
						self.expect_punct(b';')?;
					}
					"package" => {
						let (first, _) = self.expect_ident()?;
						package = self.parse_dotted_name(first)?;
						self.expect_punct(b';')?;
					}
					"import" => {
						// Optional `weak`/`public` modifier, then the path.
						let (tok, line) = self.next()?;
						match tok {
							Tok::Str(_) => {}
							Tok::Ident(modifier) if modifier == "weak" || modifier == "public" => {
								let _ = self.expect_str()?;
							}
							other => return Err(self.unexpected(line, &other, "import path")),
						}
						self.expect_punct(b';')?;
					}
					"option" => self.skip_option_statement()?,
					"message" => self.parse_message(builder, &package)?,
					"enum" => self.parse_enum(builder, &package)?,
					"service" | "extend" => self.skip_block()?,
					other => return Err(self.syntax_err(line, &format!("unexpected `{other}` at file scope"))),
				},
				other => return Err(self.unexpected(line, &other, "declaration")),
			}
		}
	}

	fn parse_message(&mut self, builder: &mut SchemaBuilder, scope: &str) -> Result<()> {
		let (name, _) = self.expect_ident()?;
		let full_name = join_name(scope, &name);
		self.expect_punct(b'{')?;

		let mut fields = Vec::new();
		loop {
			let (tok, line) = self.next()?;
			match tok {
				Tok::Punct(b'}') => break,
				Tok::Punct(b';') => {}
				Tok::Punct(b'.') => {
					let value_type = self.parse_absolute_type()?;
					fields.push(self.parse_field_tail(value_type, Cardinality::Singular)?);
				}
				Tok::Ident(word) => match word.as_str() {
					"message" => self.parse_message(builder, &full_name)?,
					"enum" => self.parse_enum(builder, &full_name)?,
					"option" => self.skip_option_statement()?,
					"reserved" | "extensions" => self.skip_statement()?,
					"extend" => self.skip_block()?,
					"oneof" => self.parse_oneof(&mut fields)?,
					"map" => fields.push(self.parse_map_field()?),
					"group" => fields.push(self.parse_group_field(Cardinality::Singular)?),
					"repeated" | "optional" | "required" => {
						let cardinality = if word == "repeated" { Cardinality::List } else { Cardinality::Singular };
						let (tok, line) = self.next()?;
						match tok {
							Tok::Ident(type_word) if type_word == "group" => fields.push(self.parse_group_field(cardinality)?),
							Tok::Ident(type_word) => {
								let value_type = self.field_type_from_word(&type_word)?;
								fields.push(self.parse_field_tail(value_type, cardinality)?);
							}
							Tok::Punct(b'.') => {
								let value_type = self.parse_absolute_type()?;
								fields.push(self.parse_field_tail(value_type, cardinality)?);
							}
							other => return Err(self.unexpected(line, &other, "field type")),
						}
					}
					_ => {
						let value_type = self.field_type_from_word(&word)?;
						fields.push(self.parse_field_tail(value_type, Cardinality::Singular)?);
					}
				},
				other => return Err(self.unexpected(line, &other, "message body entry")),
			}
		}

		builder.messages.push(RawMessage { full_name, fields });
		Ok(())
	}

	fn parse_oneof(&mut self, fields: &mut Vec<RawField>) -> Result<()> {
		// Oneof members behave as plain singular fields for construction;
		// exclusivity is the writer's concern.
		let _ = self.expect_ident()?;
		self.expect_punct(b'{')?;
		loop {
			let (tok, line) = self.next()?;
			match tok {
				Tok::Punct(b'}') => return Ok(()),
				Tok::Punct(b';') => {}
				Tok::Punct(b'.') => {
					let value_type = self.parse_absolute_type()?;
					fields.push(self.parse_field_tail(value_type, Cardinality::Singular)?);
				}
				Tok::Ident(word) if word == "option" => self.skip_option_statement()?,
				Tok::Ident(word) if word == "group" => fields.push(self.parse_group_field(Cardinality::Singular)?),
				Tok::Ident(word) => {
					let value_type = self.field_type_from_word(&word)?;
					fields.push(self.parse_field_tail(value_type, Cardinality::Singular)?);
				}
				other => return Err(self.unexpected(line, &other, "oneof member")),
			}
		}
	}

	fn parse_enum(&mut self, builder: &mut SchemaBuilder, scope: &str) -> Result<()> {
		let (name, _) = self.expect_ident()?;
		let full_name = join_name(scope, &name);
		self.expect_punct(b'{')?;

		let mut values = Vec::new();
		loop {
			let (tok, line) = self.next()?;
			match tok {
				Tok::Punct(b'}') => break,
				Tok::Punct(b';') => {}
				Tok::Ident(word) if word == "option" => self.skip_option_statement()?,
				Tok::Ident(word) if word == "reserved" => self.skip_statement()?,
				Tok::Ident(word) => {
					self.expect_punct(b'=')?;
					let negative = self.eat_punct(b'-')?;
					let (magnitude, value_line) = self.expect_int()?;
					let signed = if negative { -(magnitude as i64) } else { magnitude as i64 };
					let number = i32::try_from(signed).map_err(|_| self.syntax_err(value_line, "enum value out of range"))?;
					if self.eat_punct(b'[')? {
						self.skip_bracket_options()?;
					}
					self.expect_punct(b';')?;
					values.push(EnumValue { name: word, number });
				}
				other => return Err(self.unexpected(line, &other, "enum value")),
			}
		}

		builder.enums.push((full_name, values));
		Ok(())
	}

	fn parse_map_field(&mut self) -> Result<RawField> {
		self.expect_punct(b'<')?;
		let (key_type, key_line) = self.expect_ident()?;
		if key_type != "string" {
			return Err(self.syntax_err(key_line, "map keys must be string"));
		}
		self.expect_punct(b',')?;

		let (tok, value_line) = self.next()?;
		let value_type = match tok {
			Tok::Ident(word) => self.field_type_from_word(&word)?,
			Tok::Punct(b'.') => self.parse_absolute_type()?,
			other => return Err(self.unexpected(value_line, &other, "map value type")),
		};
		self.expect_punct(b'>')?;

		self.parse_field_tail(value_type, Cardinality::Map)
	}

	fn parse_group_field(&mut self, cardinality: Cardinality) -> Result<RawField> {
		let (group_name, _) = self.expect_ident()?;
		self.expect_punct(b'=')?;
		let (number, number_line) = self.expect_int()?;
		let number = u32::try_from(number).map_err(|_| self.syntax_err(number_line, "field number out of range"))?;
		self.skip_block()?;
		let _ = self.eat_punct(b';')?;

		// Group field names are lowercased by convention on the JSON side.
		Ok(RawField {
			name: group_name.to_lowercase(),
			json_name: None,
			number,
			cardinality,
			value_type: RawType::Group,
		})
	}

	fn parse_field_tail(&mut self, value_type: RawType, cardinality: Cardinality) -> Result<RawField> {
		let (name, _) = self.expect_ident()?;
		self.expect_punct(b'=')?;
		let (number, number_line) = self.expect_int()?;
		let number = u32::try_from(number).map_err(|_| self.syntax_err(number_line, "field number out of range"))?;
		let json_name = self.parse_field_options()?;

		Ok(RawField {
			name,
			json_name,
			number,
			cardinality,
			value_type,
		})
	}

	/// Parse the optional `[...]` option list plus the closing `;`.
	/// Only `json_name` is honored; other options are skipped.
	fn parse_field_options(&mut self) -> Result<Option<String>> {
		let mut json_name = None;
		if self.eat_punct(b'[')? {
			loop {
				let option_name = self.parse_option_name()?;
				self.expect_punct(b'=')?;
				let constant = self.parse_constant()?;
				if option_name == "json_name" {
					if let Some(text) = constant {
						json_name = Some(text);
					}
				}
				if self.eat_punct(b']')? {
					break;
				}
				self.expect_punct(b',')?;
			}
		}
		self.expect_punct(b';')?;
		Ok(json_name)
	}

	fn parse_option_name(&mut self) -> Result<String> {
		let mut name = String::new();
		if self.eat_punct(b'(')? {
			let mut depth = 1_u32;
			while depth > 0 {
				match self.next()?.0 {
					Tok::Punct(b'(') => depth += 1,
					Tok::Punct(b')') => depth -= 1,
					Tok::Eof => return Err(self.syntax_err(self.lexer.line, "unterminated extension option name")),
					_ => {}
				}
			}
			name.push_str("(extension)");
		} else {
			let (ident, _) = self.expect_ident()?;
			name.push_str(&ident);
		}
		while self.eat_punct(b'.')? {
			let (ident, _) = self.expect_ident()?;
			name.push('.');
			name.push_str(&ident);
		}
		Ok(name)
	}

	/// Consume one option constant; only string constants are returned.
	fn parse_constant(&mut self) -> Result<Option<String>> {
		let (tok, line) = self.next()?;
		match tok {
			Tok::Str(text) => Ok(Some(text)),
			Tok::Int(_) => {
				// Possible float literal tail.
				if self.eat_punct(b'.')? {
					if self.peeked.is_none() {
						self.peeked = Some(self.lexer.next_token()?);
					}
					if matches!(self.peeked, Some((Tok::Int(_), _))) {
						self.peeked = None;
					}
				}
				Ok(None)
			}
			Tok::Ident(_) => Ok(None),
			Tok::Punct(b'-') => match self.next()?.0 {
				Tok::Int(_) | Tok::Ident(_) => Ok(None),
				other => Err(self.unexpected(line, &other, "numeric option value")),
			},
			Tok::Punct(b'{') => {
				self.skip_braced(1)?;
				Ok(None)
			}
			other => Err(self.unexpected(line, &other, "option value")),
		}
	}

	fn field_type_from_word(&mut self, word: &str) -> Result<RawType> {
		if let Some(kind) = scalar_kind(word) {
			return Ok(RawType::Scalar(kind));
		}
		Ok(RawType::Named(self.parse_dotted_name(word.to_owned())?))
	}

	fn parse_absolute_type(&mut self) -> Result<RawType> {
		let (first, _) = self.expect_ident()?;
		let name = self.parse_dotted_name(first)?;
		Ok(RawType::Named(format!(".{name}")))
	}

	fn parse_dotted_name(&mut self, first: String) -> Result<String> {
		let mut name = first;
		while self.eat_punct(b'.')? {
			let (part, _) = self.expect_ident()?;
			name.push('.');
			name.push_str(&part);
		}
		Ok(name)
	}

	fn skip_statement(&mut self) -> Result<()> {
		loop {
			match self.next()?.0 {
				Tok::Punct(b';') => return Ok(()),
				Tok::Eof => return Err(self.syntax_err(self.lexer.line, "unterminated statement")),
				_ => {}
			}
		}
	}

	/// Skip to the terminating `;`, tolerating aggregate `{ ... }` values.
	fn skip_option_statement(&mut self) -> Result<()> {
		let mut depth = 0_u32;
		loop {
			match self.next()?.0 {
				Tok::Punct(b'{') => depth += 1,
				Tok::Punct(b'}') => depth = depth.saturating_sub(1),
				Tok::Punct(b';') if depth == 0 => return Ok(()),
				Tok::Eof => return Err(self.syntax_err(self.lexer.line, "unterminated option")),
				_ => {}
			}
		}
	}

	/// Skip forward past the next balanced `{ ... }` block.
	fn skip_block(&mut self) -> Result<()> {
		loop {
			match self.next()?.0 {
				Tok::Punct(b'{') => break,
				Tok::Eof => return Err(self.syntax_err(self.lexer.line, "expected block")),
				_ => {}
			}
		}
		self.skip_braced(1)
	}

	fn skip_braced(&mut self, mut depth: u32) -> Result<()> {
		while depth > 0 {
			match self.next()?.0 {
				Tok::Punct(b'{') => depth += 1,
				Tok::Punct(b'}') => depth -= 1,
				Tok::Eof => return Err(self.syntax_err(self.lexer.line, "unterminated block")),
				_ => {}
			}
		}
		Ok(())
	}

	fn skip_bracket_options(&mut self) -> Result<()> {
		loop {
			match self.next()?.0 {
				Tok::Punct(b']') => return Ok(()),
				Tok::Eof => return Err(self.syntax_err(self.lexer.line, "unterminated option list")),
				_ => {}
			}
		}
	}
}
