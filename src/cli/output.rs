use std::io::{self, Write};

use anyhow::Result;
use serde_json::json;
use telegrep_core::protocol::encode_event;
use telegrep_core::{Event, Hit};
use telegrep_tui::Outcome;

use super::OutputFormat;

/// Print the session outcome as `path:line`.
pub(crate) fn print_plain(outcome: &Outcome) {
	if !outcome.accepted {
		println!("Search cancelled (query: '{}')", outcome.query);
		return;
	}

	match &outcome.target {
		Some(target) => println!("{}:{}", target.file_path.display(), target.line),
		None => println!("No selection"),
	}
}

pub(crate) fn format_outcome_json(outcome: &Outcome) -> Result<String> {
	let payload = json!({
		"accepted": outcome.accepted,
		"query": outcome.query,
		"target": outcome.target,
	});
	Ok(serde_json::to_string_pretty(&payload)?)
}

pub(crate) fn print_json(outcome: &Outcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}

/// Print the answer to a one-shot search. Errors go to stderr in plain mode.
pub(crate) fn print_search_event(format: OutputFormat, event: &Event) -> Result<()> {
	let stdout = io::stdout();
	let mut out = stdout.lock();
	match (format, event) {
		(OutputFormat::Json, event) => writeln!(out, "{}", encode_event(event)?)?,
		(OutputFormat::Plain, Event::Results { data }) => {
			for hit in data {
				writeln!(out, "{}", format_hit(hit))?;
			}
		}
		(OutputFormat::Plain, Event::Error { data }) => eprintln!("{data}"),
		(OutputFormat::Plain, _) => {}
	}
	Ok(())
}

fn format_hit(hit: &Hit) -> String {
	format!("{}:{}:{}", hit.file_path.display(), hit.line, hit.description)
}

#[cfg(test)]
mod tests {
	use std::path::{Path, PathBuf};

	use serde_json::Value;
	use telegrep_core::OpenTarget;

	use super::*;

	#[test]
	fn json_format_includes_the_target() {
		let outcome = Outcome {
			accepted: true,
			query: "todo".into(),
			target: Some(OpenTarget {
				file_path: PathBuf::from("/r/src/main.rs"),
				line: 12,
			}),
		};

		let json = format_outcome_json(&outcome).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["accepted"], true);
		assert_eq!(value["target"]["filePath"], "/r/src/main.rs");
		assert_eq!(value["target"]["line"], 12);
	}

	#[test]
	fn cancelled_outcome_has_null_target() {
		let outcome = Outcome {
			accepted: false,
			query: "x".into(),
			target: None,
		};
		let value: Value = serde_json::from_str(&format_outcome_json(&outcome).expect("json")).expect("parse");
		assert!(value["target"].is_null());
	}

	#[test]
	fn plain_hits_are_grep_style() {
		let hit = Hit::new(Path::new("/r"), "src/a.rs", 4, "  let x = 1; ");
		assert_eq!(format_hit(&hit), "/r/src/a.rs:4:let x = 1;");
	}
}
