//! Quill command-line frontend.

mod cli;
mod commands;

use std::io::Write;

use clap::Parser;
use cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = commands::load_config(cli.config.as_deref())?;
	tracing::debug!(templates = config.templates.len(), "quill.config.ready");
	let stdout = std::io::stdout();
	let mut out = stdout.lock();
	match cli.command {
		Command::Templates => commands::list_templates(&config, &mut out)?,
		Command::Inspect(args) => {
			let report = commands::inspect(&config, &args)?;
			write!(out, "{report}")?;
		}
	}
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("QUILL_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("quill=trace,debug")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();
}
