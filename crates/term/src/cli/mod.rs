//! CLI schema for the quill binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Contextual writing prompts for structured documents")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to the platform config dir)
	#[arg(long, short = 'c', global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// List templates and the headings they carry prompts for
	Templates,
	/// Show the context, state and placeholders for a cursor position
	Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct InspectArgs {
	/// Start from the outline of this template
	#[arg(long, short = 't', value_name = "ID", conflicts_with = "outline")]
	pub template: Option<String>,

	/// Start from an outline file
	#[arg(long, short = 'o', value_name = "FILE")]
	pub outline: Option<PathBuf>,

	/// Cursor position
	#[arg(long, short = 'p', value_name = "POS")]
	pub cursor: usize,

	/// Number of pauses to simulate
	#[arg(long, default_value_t = 0, value_name = "N")]
	pub idle: usize,
}
