use std::path::PathBuf;
use std::time::Duration;

use telegrep_core::preview::DEFAULT_PREVIEW_DEBOUNCE;
use telegrep_core::{OpenTarget, PreviewOptions, SearchConfig};

use crate::style::StyleConfig;

/// Text shown around the panes.
#[derive(Debug, Clone)]
pub struct UiLabels {
	/// Title of the results pane.
	pub title: String,
	/// Placeholder shown in the empty query line.
	pub placeholder: String,
	/// Column headers of the results table.
	pub headers: [String; 2],
	/// Title of the preview pane when nothing is displayed.
	pub preview_title: String,
	/// Shown in the results pane when a search found nothing.
	pub no_results: String,
	/// Shown in the preview pane when no hit is selected.
	pub no_selection: String,
}

impl Default for UiLabels {
	fn default() -> Self {
		Self {
			title: "Search".to_string(),
			placeholder: "Type to search file contents".to_string(),
			headers: ["Location".to_string(), "Match".to_string()],
			preview_title: "Preview".to_string(),
			no_results: "No results".to_string(),
			no_selection: "No match selected".to_string(),
		}
	}
}

impl UiLabels {
	/// Replace the results pane title, keeping the other labels.
	#[must_use]
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	/// Counter shown to the right of the query.
	#[must_use]
	pub fn count_label(&self, count: usize) -> String {
		match count {
			1 => "1 result".to_string(),
			n => format!("{n} results"),
		}
	}
}

/// Everything needed to start an interactive session.
#[derive(Debug, Clone)]
pub struct TuiOptions {
	/// Project root searched by the tool; `None` reports "no project".
	pub root: Option<PathBuf>,
	pub search: SearchConfig,
	/// Delay between the last selection change and the preview request.
	pub debounce: Duration,
	/// Force the preview pane on or off; `None` decides by terminal width.
	pub preview: Option<bool>,
	pub preview_options: PreviewOptions,
	pub style: StyleConfig,
	pub initial_query: String,
	pub labels: UiLabels,
}

impl Default for TuiOptions {
	fn default() -> Self {
		Self {
			root: None,
			search: SearchConfig::default(),
			debounce: DEFAULT_PREVIEW_DEBOUNCE,
			preview: None,
			preview_options: PreviewOptions::default(),
			style: StyleConfig::default(),
			initial_query: String::new(),
			labels: UiLabels::default(),
		}
	}
}

/// How the session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
	/// `true` when a hit was opened, `false` when the user cancelled.
	pub accepted: bool,
	pub query: String,
	pub target: Option<OpenTarget>,
}
