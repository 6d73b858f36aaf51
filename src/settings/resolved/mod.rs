use std::path::PathBuf;
use std::time::Duration;

use telegrep_core::{PreviewOptions, SearchConfig};
use telegrep_tui::StyleConfig;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration.
#[derive(Debug)]
pub(crate) struct ResolvedConfig {
	/// Canonical project root; `None` when it is missing or not a directory.
	pub(crate) root: Option<PathBuf>,
	pub(crate) search: SearchConfig,
	pub(crate) debounce: Duration,
	/// `None` lets the terminal width decide.
	pub(crate) preview_enabled: Option<bool>,
	pub(crate) preview: PreviewOptions,
	pub(crate) style: StyleConfig,
	pub(crate) title: String,
	pub(crate) initial_query: String,
	/// Editor command for `--open`; falls back to `$VISUAL`/`$EDITOR`.
	pub(crate) editor: Option<String>,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub(crate) fn print_summary(&self) {
		summary::print_summary(self);
	}
}
