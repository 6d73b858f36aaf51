use std::io;

use anyhow::Result;
use telegrep_core::{Event, Responder, SearchExecutor};
use telegrep_tui::{BatTokenizer, Outcome, TuiOptions, UiLabels};

use crate::settings::ResolvedConfig;
use crate::stdio;

/// Runs one of the front-ends over a resolved configuration.
pub(crate) struct SearchWorkflow {
	config: ResolvedConfig,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Self {
		Self { config }
	}

	pub(crate) fn editor(&self) -> Option<&str> {
		self.config.editor.as_deref()
	}

	fn tui_options(&self) -> TuiOptions {
		let config = &self.config;
		TuiOptions {
			root: config.root.clone(),
			search: config.search.clone(),
			debounce: config.debounce,
			preview: config.preview_enabled,
			preview_options: config.preview,
			style: config.style.clone(),
			initial_query: config.initial_query.clone(),
			labels: UiLabels::default().with_title(config.title.clone()),
		}
	}

	/// Run the terminal UI until the user opens a hit or cancels.
	pub(crate) fn run_interactive(&self) -> Result<Outcome> {
		telegrep_tui::run(self.tui_options())
	}

	/// Run a single search without a terminal.
	pub(crate) fn run_headless(&self, text: &str) -> Event {
		let executor = SearchExecutor::new(self.config.search.clone());
		Event::from_search(executor.execute(text, self.config.root.as_deref()))
	}

	/// Answer JSON requests from stdin on stdout until stdin closes.
	pub(crate) fn serve_stdio(&self) -> Result<()> {
		let config = &self.config;
		let (dark, light) = config.style.bat_themes();
		let mut responder = Responder::new(
			SearchExecutor::new(config.search.clone()),
			config.root.clone(),
			BatTokenizer::new(dark, light),
		)
		.with_appearance(config.style.appearance)
		.with_max_file_bytes(config.preview.max_file_bytes);

		stdio::serve(&mut responder, io::stdin().lock(), io::stdout().lock())
	}
}
