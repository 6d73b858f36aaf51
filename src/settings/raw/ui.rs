use anyhow::{Result, anyhow};
use serde::Deserialize;
use telegrep_core::Appearance;
use telegrep_tui::StyleConfig;
use telegrep_tui::style::{by_name, counterpart, for_appearance, names};

use crate::cli::CliArgs;

/// `[ui]`: theme, labels, and the editor used by `--open`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct UiSection {
	pub(super) theme: Option<String>,
	pub(super) appearance: Option<Appearance>,
	pub(super) initial_query: Option<String>,
	pub(super) title: Option<String>,
	pub(super) editor: Option<String>,
}

pub(super) struct UiResolution {
	pub(super) style: StyleConfig,
	pub(super) title: String,
	pub(super) initial_query: String,
	pub(super) editor: Option<String>,
}

impl UiSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(theme) = cli.theme.clone() {
			self.theme = Some(theme);
		}
		if let Some(appearance) = cli.appearance {
			self.appearance = Some(appearance.into());
		}
		if let Some(query) = cli.initial_query.clone() {
			self.initial_query = Some(query);
		}
		if let Some(title) = cli.title.clone() {
			self.title = Some(title);
		}
	}

	pub(super) fn resolve(self, default_title: String) -> Result<UiResolution> {
		let style = resolve_style(self.theme.as_deref(), self.appearance)?;
		let initial_query = self
			.initial_query
			.map(|query| query.lines().next().unwrap_or_default().to_string())
			.unwrap_or_default();
		let editor = self
			.editor
			.map(|editor| editor.trim().to_string())
			.filter(|editor| !editor.is_empty());

		Ok(UiResolution {
			style,
			title: self.title.unwrap_or(default_title),
			initial_query,
			editor,
		})
	}
}

/// A named theme wins; an appearance that disagrees with it selects the
/// theme's counterpart.
pub(super) fn resolve_style(theme: Option<&str>, appearance: Option<Appearance>) -> Result<StyleConfig> {
	let registration = match theme {
		Some(name) => {
			let found = by_name(name)
				.ok_or_else(|| anyhow!("unknown theme `{name}` (available: {})", names().join(", ")))?;
			match appearance {
				Some(appearance) if appearance != found.appearance => counterpart(found),
				_ => found,
			}
		}
		None => for_appearance(appearance.unwrap_or_default()),
	};
	Ok(StyleConfig::from_registration(registration))
}
