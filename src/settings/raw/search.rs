use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use telegrep_core::SearchConfig;
use tracing::warn;

use super::super::util::sanitize_args;
use crate::cli::CliArgs;

/// `[search]`: where to search and how to run the tool.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) root: Option<PathBuf>,
	pub(super) program: Option<String>,
	pub(super) args: Option<Vec<String>>,
	pub(super) no_match_status: Option<i32>,
}

impl SearchSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(root) = cli.root.clone() {
			self.root = Some(root);
		}
	}

	/// Canonical project root and the tool invocation.
	///
	/// A root that does not resolve to a directory becomes `None`; searches
	/// then report that no project is open.
	pub(super) fn resolve(self) -> Result<(Option<PathBuf>, SearchConfig)> {
		let root = match self.root {
			Some(path) => path,
			None => env::current_dir().context("failed to determine working directory")?,
		};
		let root = project_root(root)?;

		let defaults = SearchConfig::default();
		let search = SearchConfig {
			program: self.program.map(|program| program.trim().to_string()).unwrap_or(defaults.program),
			args: self.args.map(sanitize_args).unwrap_or(defaults.args),
			no_match_status: self.no_match_status.unwrap_or(defaults.no_match_status),
		};
		Ok((root, search))
	}
}

fn project_root(root: PathBuf) -> Result<Option<PathBuf>> {
	let root = if root.is_relative() {
		env::current_dir()
			.context("failed to resolve current directory for root")?
			.join(root)
	} else {
		root
	};

	match fs::canonicalize(&root) {
		Ok(canonical) if canonical.is_dir() => Ok(Some(canonical)),
		Ok(canonical) => {
			warn!(root = %canonical.display(), "project root is not a directory");
			Ok(None)
		}
		Err(err) if err.kind() == io::ErrorKind::NotFound => {
			warn!(root = %root.display(), "project root does not exist");
			Ok(None)
		}
		Err(err) => Err(err).with_context(|| format!("failed to canonicalize project root {}", root.display())),
	}
}
