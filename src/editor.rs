//! Launching an editor at a hit.

use std::env;
use std::process::Command;

use anyhow::{Context, Result, bail};
use telegrep_core::OpenTarget;
use tracing::info;

/// The configured editor, else `$VISUAL`, else `$EDITOR`.
pub(crate) fn editor_command(configured: Option<&str>) -> Option<String> {
	configured
		.map(str::to_string)
		.or_else(|| env::var("VISUAL").ok())
		.or_else(|| env::var("EDITOR").ok())
		.filter(|command| !command.trim().is_empty())
}

/// Program and arguments that open `target` with `command`.
///
/// `{file}` and `{line}` in the command are replaced; without them the
/// `+LINE FILE` form understood by vi, emacs, and nano is appended.
pub(crate) fn invocation(command: &str, target: &OpenTarget) -> Result<(String, Vec<String>)> {
	let file = target.file_path.display().to_string();
	let line = target.line.to_string();

	let mut words =
		shell_words::split(command).with_context(|| format!("cannot parse editor command `{command}`"))?;
	if words.is_empty() {
		bail!("editor command is empty");
	}

	let templated = words.iter().any(|word| word.contains("{file}"));
	if templated {
		for word in &mut words {
			*word = word.replace("{file}", &file).replace("{line}", &line);
		}
	} else {
		words.push(format!("+{line}"));
		words.push(file);
	}

	let program = words.remove(0);
	Ok((program, words))
}

/// Run the editor on `target` and wait for it to exit.
pub(crate) fn open(command: &str, target: &OpenTarget) -> Result<()> {
	let (program, args) = invocation(command, target)?;
	info!(%program, ?args, "opening editor");
	let status = Command::new(&program)
		.args(&args)
		.status()
		.with_context(|| format!("failed to start editor `{program}`"))?;
	if !status.success() {
		bail!("editor `{program}` exited with {status}");
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::*;

	fn target() -> OpenTarget {
		OpenTarget {
			file_path: PathBuf::from("/r/my file.rs"),
			line: 12,
		}
	}

	#[test]
	fn plain_commands_get_line_then_file() {
		let (program, args) = invocation("nvim -R", &target()).expect("invocation");
		assert_eq!(program, "nvim");
		assert_eq!(args, vec!["-R", "+12", "/r/my file.rs"]);
	}

	#[test]
	fn placeholders_are_substituted() {
		let (program, args) = invocation("code --goto '{file}:{line}'", &target()).expect("invocation");
		assert_eq!(program, "code");
		assert_eq!(args, vec!["--goto", "/r/my file.rs:12"]);
	}

	#[test]
	fn configured_editor_wins() {
		assert_eq!(editor_command(Some("hx")).as_deref(), Some("hx"));
	}

	#[test]
	fn unbalanced_quotes_are_rejected() {
		assert!(invocation("vim 'oops", &target()).is_err());
	}
}
