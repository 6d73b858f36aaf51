use std::env;
use std::time::Duration;

use anyhow::{Error, Result};
use serde::Deserialize;
use telegrep_core::PreviewOptions;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};
use super::util::default_title_for;
use crate::cli::CliArgs;

mod preview;
mod search;
mod ui;

use preview::PreviewSection;
use search::SearchSection;
use ui::UiSection;

/// The configuration as read from files and the environment, before CLI
/// overrides and validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search: SearchSection,
	preview: PreviewSection,
	ui: UiSection,
}

impl RawConfig {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.search.apply_cli_overrides(cli);
		self.preview.apply_cli_overrides(cli);
		self.ui.apply_cli_overrides(cli);
	}

	/// Fill defaults and validate into a [`ResolvedConfig`].
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			program: detect_source(
				None,
				self.search.program.is_some(),
				"TELEGREP__SEARCH__PROGRAM",
				"search.program",
			),
			debounce_ms: detect_source(
				cli.debounce_ms.map(|_| "--debounce-ms"),
				self.preview.debounce_ms.is_some(),
				"TELEGREP__PREVIEW__DEBOUNCE_MS",
				"preview.debounce_ms",
			),
			max_file_bytes: detect_source(
				None,
				self.preview.max_file_bytes.is_some(),
				"TELEGREP__PREVIEW__MAX_FILE_BYTES",
				"preview.max_file_bytes",
			),
		};

		let (root, search) = self.search.resolve()?;
		let preview = self.preview.resolve();
		let default_title = root
			.as_deref()
			.map_or_else(|| "No project".to_string(), default_title_for);
		let ui = self.ui.resolve(default_title)?;

		let config = ResolvedConfig {
			root,
			search,
			debounce: Duration::from_millis(preview.debounce_ms),
			preview_enabled: preview.enabled,
			preview: PreviewOptions {
				max_file_bytes: preview.max_file_bytes,
				..PreviewOptions::default()
			},
			style: ui.style,
			title: ui.title,
			initial_query: ui.initial_query,
			editor: ui.editor,
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

/// Where a value that is present came from: the CLI flag if one was given,
/// then the environment, then the config files.
fn detect_source(
	cli_flag: Option<&'static str>,
	value_present: bool,
	env_var: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if let Some(flag) = cli_flag {
		return Some(SettingSource::CliFlag(flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;
