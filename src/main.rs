#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "protocast", about = "Schema-driven JSON to protobuf wire encoding tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Read a JSON document from stdin and encode it as one message.
	Encode {
		message: String,
		#[arg(required = true)]
		paths: Vec<PathBuf>,
		#[arg(long)]
		out: Option<PathBuf>,
		#[arg(short, long)]
		verbose: bool,
	},
	/// Inspect parsed schema descriptors.
	Schema {
		#[arg(required = true)]
		paths: Vec<PathBuf>,
		#[arg(long)]
		message: Option<String>,
		#[arg(long)]
		json: bool,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> protocast::proto::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Encode {
			message,
			paths,
			out,
			verbose,
		} => cmd::encode::run(message, paths, out, verbose),
		Commands::Schema { paths, message, json } => cmd::schema::run(paths, message, json),
	}
}
