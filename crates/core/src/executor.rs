//! One-shot invocation of the external search tool.
//!
//! The tool is started without a shell: the query travels as a single argument
//! after `-e`, so quotes, backslashes, or a leading `-` in the query can neither
//! break argument parsing nor smuggle in extra flags. The command line is only
//! rendered as text for diagnostics.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::hit::ResultSet;
use crate::parser::parse_output;

/// Program used when no other search tool is configured.
pub const DEFAULT_PROGRAM: &str = "rg";

/// Exit status ripgrep uses to report that nothing matched.
pub const DEFAULT_NO_MATCH_STATUS: i32 = 1;

/// Message shown when a search is attempted without a project root.
pub const NO_PROJECT_MESSAGE: &str = "Please open a project folder first.";

/// Flags that select literal, case-insensitive, machine-parsable output.
const BASE_ARGS: [&str; 4] = ["-F", "--vimgrep", "--ignore-case", "--color=never"];

/// How the search tool is located and invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
	/// Executable name or path.
	pub program: String,
	/// Extra arguments inserted before the query, e.g. `--hidden`.
	pub args: Vec<String>,
	/// Exit status that means "no matches" rather than failure.
	pub no_match_status: i32,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			program: DEFAULT_PROGRAM.to_string(),
			args: Vec::new(),
			no_match_status: DEFAULT_NO_MATCH_STATUS,
		}
	}
}

/// Reasons a search produced no usable result set.
#[derive(Debug, Error)]
pub enum SearchFailure {
	/// No project root is open, so there is nowhere to search.
	#[error("Please open a project folder first.")]
	NoProject,
	/// The tool could not be started at all.
	#[error("failed to start search tool: {source}\nCommand: {command}")]
	Spawn {
		command: String,
		#[source]
		source: io::Error,
	},
	/// The tool ran but reported an error.
	#[error("Search tool error: {stderr}\nCommand: {command}")]
	Tool {
		/// Exit status, or `None` when the process was killed by a signal.
		status: Option<i32>,
		stderr: String,
		command: String,
	},
}

impl SearchFailure {
	/// The command line that was attempted, if the tool was involved.
	#[must_use]
	pub fn command(&self) -> Option<&str> {
		match self {
			Self::NoProject => None,
			Self::Spawn { command, .. } | Self::Tool { command, .. } => Some(command),
		}
	}
}

/// Runs one search per call; holds no state between queries.
#[derive(Debug, Clone, Default)]
pub struct SearchExecutor {
	config: SearchConfig,
}

impl SearchExecutor {
	#[must_use]
	pub fn new(config: SearchConfig) -> Self {
		Self { config }
	}

	#[must_use]
	pub fn config(&self) -> &SearchConfig {
		&self.config
	}

	/// Argument vector passed to the tool for `query`, excluding the program.
	#[must_use]
	pub fn arguments(&self, query: &str) -> Vec<String> {
		let mut args: Vec<String> = BASE_ARGS.iter().map(|arg| (*arg).to_string()).collect();
		args.extend(self.config.args.iter().cloned());
		args.push("-e".to_string());
		args.push(query.to_string());
		args.push(".".to_string());
		args
	}

	/// Shell-quoted rendering of the command for diagnostics. Words made of
	/// flag-safe characters such as `--color=never` are left bare.
	#[must_use]
	pub fn display_command(&self, query: &str) -> String {
		let mut words = vec![self.config.program.clone()];
		words.extend(self.arguments(query));
		words
			.iter()
			.map(|word| {
				if is_bare_word(word) {
					word.clone()
				} else {
					shell_words::quote(word).into_owned()
				}
			})
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Search `root` for `query`.
	///
	/// An empty query yields an empty set without starting the tool. A missing
	/// root, or one that is not a directory, yields [`SearchFailure::NoProject`].
	pub fn execute(&self, query: &str, root: Option<&Path>) -> Result<ResultSet, SearchFailure> {
		if query.is_empty() {
			return Ok(ResultSet::new());
		}

		let root = root
			.filter(|root| root.is_dir())
			.ok_or(SearchFailure::NoProject)?;

		let command = self.display_command(query);
		debug!(%command, root = %root.display(), "running search");

		let output = Command::new(&self.config.program)
			.args(self.arguments(query))
			.current_dir(root)
			.stdin(Stdio::null())
			.output()
			.map_err(|source| SearchFailure::Spawn {
				command: command.clone(),
				source,
			})?;

		match output.status.code() {
			Some(0) => {
				let stdout = String::from_utf8_lossy(&output.stdout);
				let results = parse_output(&stdout, root);
				debug!(hits = results.len(), "search finished");
				Ok(results)
			}
			Some(code) if code == self.config.no_match_status => Ok(ResultSet::new()),
			status => {
				let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
				warn!(?status, %stderr, "search tool failed");
				Err(SearchFailure::Tool {
					status,
					stderr,
					command,
				})
			}
		}
	}
}

fn is_bare_word(word: &str) -> bool {
	!word.is_empty()
		&& word
			.chars()
			.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '=' | '.' | '/' | ':' | ',' | '+' | '@'))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn query_is_a_single_argument_after_the_pattern_flag() {
		let executor = SearchExecutor::default();
		let args = executor.arguments("--files \"x\"");
		assert_eq!(
			args,
			[
				"-F",
				"--vimgrep",
				"--ignore-case",
				"--color=never",
				"-e",
				"--files \"x\"",
				"."
			]
		);
	}

	#[test]
	fn extra_arguments_precede_the_query() {
		let executor = SearchExecutor::new(SearchConfig {
			args: vec!["--hidden".into()],
			..SearchConfig::default()
		});
		let args = executor.arguments("todo");
		let hidden = args.iter().position(|arg| arg == "--hidden");
		let pattern = args.iter().position(|arg| arg == "-e");
		assert!(hidden < pattern);
	}

	#[test]
	fn display_command_quotes_the_query() {
		let executor = SearchExecutor::default();
		assert_eq!(
			executor.display_command("two words"),
			"rg -F --vimgrep --ignore-case --color=never -e 'two words' ."
		);
	}

	#[test]
	fn display_command_keeps_flags_bare_and_quotes_shell_syntax() {
		let executor = SearchExecutor::new(SearchConfig {
			args: vec!["--glob=*.rs".into(), "--max-count=5".into()],
			..SearchConfig::default()
		});
		let command = executor.display_command("it's");
		assert!(command.contains(" --max-count=5 "), "{command}");
		assert!(command.contains(" '--glob=*.rs' "), "{command}");
		let words = shell_words::split(&command).expect("round trip");
		assert_eq!(words[5], "--glob=*.rs");
		assert_eq!(words[8], "it's");
	}

	#[test]
	fn empty_query_short_circuits_even_without_root() {
		let executor = SearchExecutor::default();
		let results = executor.execute("", None).expect("empty query succeeds");
		assert!(results.is_empty());
	}

	#[test]
	fn missing_root_reports_no_project() {
		let executor = SearchExecutor::default();
		let err = executor.execute("todo", None).unwrap_err();
		assert!(matches!(err, SearchFailure::NoProject));
		assert_eq!(err.to_string(), NO_PROJECT_MESSAGE);
	}

	#[test]
	fn root_that_is_not_a_directory_reports_no_project() {
		let file = tempfile::NamedTempFile::new().expect("temp file");
		let executor = SearchExecutor::default();
		let err = executor.execute("todo", Some(file.path())).unwrap_err();
		assert!(matches!(err, SearchFailure::NoProject));
	}

	#[test]
	fn unknown_program_is_a_spawn_failure_with_command() {
		let dir = tempfile::tempdir().expect("temp dir");
		let executor = SearchExecutor::new(SearchConfig {
			program: "telegrep-definitely-missing-tool".into(),
			..SearchConfig::default()
		});
		let err = executor.execute("todo", Some(dir.path())).unwrap_err();
		assert!(matches!(err, SearchFailure::Spawn { .. }));
		assert!(
			err.command()
				.is_some_and(|command| command.starts_with("telegrep-definitely-missing-tool"))
		);
	}
}
