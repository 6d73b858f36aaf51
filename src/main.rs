mod app_dirs;
mod cli;
mod editor;
mod logging;
mod settings;
mod stdio;
mod workflow;

use std::process::ExitCode;

use anyhow::{Result, bail};
use cli::{CliArgs, OutputFormat, parse_cli, print_json, print_plain, print_search_event};
use telegrep_core::Event;
use workflow::SearchWorkflow;

fn main() -> Result<ExitCode> {
	let cli = parse_cli();

	if cli.list_themes {
		for name in telegrep_tui::style::names() {
			println!("{name}");
		}
		return Ok(ExitCode::SUCCESS);
	}

	let resolved = settings::load(&cli)?;
	start_logging(&cli);

	if cli.print_config {
		resolved.print_summary();
	}

	let workflow = SearchWorkflow::from_config(resolved);

	if let Some(text) = &cli.search {
		let event = workflow.run_headless(text);
		print_search_event(cli.output, &event)?;
		let code = match event {
			Event::Error { .. } => ExitCode::FAILURE,
			_ => ExitCode::SUCCESS,
		};
		return Ok(code);
	}

	if cli.stdio {
		workflow.serve_stdio()?;
		return Ok(ExitCode::SUCCESS);
	}

	run_interactive(&cli, &workflow)?;
	Ok(ExitCode::SUCCESS)
}

/// Logging problems are reported but never stop the program.
fn start_logging(cli: &CliArgs) {
	let path = match &cli.log_file {
		Some(path) => Ok(path.clone()),
		None => logging::default_log_path(),
	};
	if let Err(err) = path.and_then(|path| logging::initialize(&path)) {
		eprintln!("telegrep: logging disabled: {err:#}");
	}
}

fn run_interactive(cli: &CliArgs, workflow: &SearchWorkflow) -> Result<()> {
	let outcome = workflow.run_interactive()?;

	if cli.open
		&& let Some(target) = &outcome.target
	{
		let Some(command) = editor::editor_command(workflow.editor()) else {
			bail!("no editor configured; set ui.editor, $VISUAL, or $EDITOR");
		};
		return editor::open(&command, target);
	}

	match cli.output {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}
	Ok(())
}
