use std::path::PathBuf;
use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use anyhow::{Context, Result};
use telegrep_core::{
	Appearance, OpenTarget, PreviewRequest, PreviewResponse, PreviewRuntime, SearchExecutor,
	SearchRuntime, Session,
};
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, warn};

use super::preview::PreviewState;
use super::results::ResultsState;
use crate::config::{Outcome, TuiOptions, UiLabels};
use crate::highlight::BatTokenizer;
use crate::input::QueryInput;
use crate::style::StyleConfig;

/// State of one interactive search: the core session, its background
/// runtimes, and everything the terminal needs to draw it.
pub struct App {
	pub(crate) session: Session,
	pub(crate) search: SearchRuntime,
	/// `None` when previews are served by nothing, as in tests.
	pub(crate) previewer: Option<PreviewRuntime>,
	pub(crate) search_input: QueryInput,
	pub(crate) ui: UiLabels,
	pub(crate) style: StyleConfig,
	pub(crate) root: Option<PathBuf>,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) preview: PreviewState,
	pub(crate) results: ResultsState,
}

impl App {
	/// Build the app and start the preview worker.
	pub fn new(options: TuiOptions) -> Result<Self> {
		let (dark, light) = options.style.bat_themes();
		let previewer = PreviewRuntime::spawn(
			move || BatTokenizer::new(dark, light),
			options.preview_options,
		)
		.context("failed to start the preview worker")?;
		Ok(Self::with_previewer(options, Some(previewer)))
	}

	pub(crate) fn with_previewer(options: TuiOptions, previewer: Option<PreviewRuntime>) -> Self {
		let TuiOptions {
			root,
			search,
			debounce,
			preview,
			preview_options: _,
			style,
			initial_query,
			labels,
		} = options;

		let mut search_input = QueryInput::new(&initial_query);
		search_input.set_placeholder(&labels.placeholder, style.theme.empty);

		Self {
			session: Session::new(debounce, style.appearance),
			search: SearchRuntime::new(SearchExecutor::new(search), root.clone()),
			previewer,
			search_input,
			ui: labels,
			style,
			root,
			throbber_state: ThrobberState::default(),
			preview: PreviewState::new(preview),
			results: ResultsState::default(),
		}
	}

	/// How the session ends when the user opens `target`, or cancels on `None`.
	pub(crate) fn outcome(&self, target: Option<OpenTarget>) -> Outcome {
		Outcome {
			accepted: target.is_some(),
			query: self.search_input.text().to_string(),
			target,
		}
	}

	/// Fire the debounced preview request once it is due.
	pub(crate) fn tick(&mut self, now: Instant) {
		if let Some(request) = self.session.tick(now) {
			self.send_preview(request);
		}
	}

	fn send_preview(&mut self, request: PreviewRequest) {
		if !self.preview.enabled {
			return;
		}
		let Some(previewer) = &self.previewer else {
			return;
		};
		debug!(sequence_id = request.sequence_id, path = %request.file_path.display(), "requesting preview");
		if !previewer.request(request, self.session.appearance()) {
			warn!("preview worker is gone; previews disabled");
			self.previewer = None;
		}
	}

	/// Drain finished previews.
	pub(crate) fn pump_preview_results(&mut self) {
		while let Some(previewer) = &self.previewer {
			match previewer.try_recv() {
				Ok(response) => self.apply_preview_response(response),
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => {
					warn!("preview worker disconnected");
					self.previewer = None;
				}
			}
		}
	}

	pub(crate) fn apply_preview_response(&mut self, response: PreviewResponse) {
		if self.session.on_preview_response(response) {
			self.preview.invalidate();
		}
	}

	pub(crate) fn move_selection_up(&mut self) {
		self.session.move_up(Instant::now());
	}

	pub(crate) fn move_selection_down(&mut self) {
		self.session.move_down(Instant::now());
	}

	/// Click on the results at screen `row`: select the hit there, or open it
	/// when it is already selected.
	pub(crate) fn activate_result_at(&mut self, row: u16) -> Option<OpenTarget> {
		let index = self.results.index_at(row, self.session.selection().len())?;
		self.session.activate_index(index, Instant::now())
	}

	pub(crate) fn toggle_preview(&mut self) {
		let enabled = !self.preview.enabled;
		self.preview.forced = Some(enabled);
		self.set_preview_enabled(enabled);
	}

	/// Show or hide the preview for a terminal `width` columns wide.
	pub(crate) fn update_preview_responsive(&mut self, width: u16) {
		let enabled = self.preview.wants_enabled(width);
		if enabled != self.preview.enabled {
			self.set_preview_enabled(enabled);
		}
	}

	fn set_preview_enabled(&mut self, enabled: bool) {
		if !enabled {
			self.preview.hide();
			return;
		}
		self.preview.enabled = true;
		if let Some(request) = self.session.refresh_preview() {
			self.send_preview(request);
		}
	}

	/// Switch to the counterpart theme and recolor the preview.
	pub(crate) fn toggle_appearance(&mut self) {
		self.style = self.style.toggled();
		self.search_input
			.set_placeholder(&self.ui.placeholder, self.style.theme.empty);
		self.apply_appearance(self.style.appearance);
	}

	pub(crate) fn apply_appearance(&mut self, appearance: Appearance) {
		if let Some(request) = self.session.on_theme_changed(appearance) {
			self.send_preview(request);
		}
	}

	/// The active style.
	#[must_use]
	pub fn style(&self) -> &StyleConfig {
		&self.style
	}

	/// The query as typed.
	#[must_use]
	pub fn query(&self) -> &str {
		self.search_input.text()
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use std::path::Path;
	use std::time::Duration;

	use telegrep_core::{Hit, PreviewContent, ResultSet, SearchResponse, Token};

	use super::*;

	pub(crate) fn test_app() -> App {
		let options = TuiOptions {
			root: Some(PathBuf::from("/r")),
			debounce: Duration::ZERO,
			preview: Some(true),
			..TuiOptions::default()
		};
		App::with_previewer(options, None)
	}

	pub(crate) fn hit(relative: &str, line: usize, text: &str) -> Hit {
		Hit::new(Path::new("/r"), relative, line, text)
	}

	/// Type `query` and answer its search with `hits`.
	pub(crate) fn search(app: &mut App, query: &str, hits: Vec<Hit>) {
		app.search_input = QueryInput::new(query);
		let ticket = app
			.session
			.on_query_changed(query, Instant::now())
			.expect("non-empty query");
		app.apply_search_response(SearchResponse {
			id: ticket.id,
			query: ticket.query,
			outcome: Ok(ResultSet::from(hits)),
		});
	}

	/// Answer the current preview target with `lines` of plain text.
	pub(crate) fn show_preview(app: &mut App, lines: &[&str]) {
		let request = app.session.refresh_preview().expect("selection");
		let tokens = lines.iter().map(|line| vec![Token::plain(*line)]).collect();
		app.apply_preview_response(PreviewResponse {
			sequence_id: request.sequence_id,
			content: PreviewContent::loaded(&request, tokens),
		});
	}

	#[test]
	fn clicking_twice_opens_the_hit() {
		let mut app = test_app();
		search(&mut app, "todo", vec![hit("a.rs", 3, "// todo"), hit("b.rs", 9, "todo!()")]);
		app.results.area = Some(ratatui::layout::Rect::new(0, 1, 40, 10));

		assert_eq!(app.activate_result_at(5), None);
		assert_eq!(app.session.selection().index(), Some(1));
		let target = app.activate_result_at(5).expect("second click opens");
		assert_eq!(target.file_path, PathBuf::from("/r/b.rs"));
		assert_eq!(target.line, 9);
	}

	#[test]
	fn preview_responses_invalidate_prepared_rows() {
		let mut app = test_app();
		search(&mut app, "todo", vec![hit("a.rs", 2, "todo")]);
		show_preview(&mut app, &["one", "todo", "three"]);

		let displayed = app.session.displayed().expect("displayed");
		assert_eq!(displayed.line, 2);
		app.preview.prepare(app.session.displayed(), 10, &app.style);
		assert_eq!(app.preview.lines().len(), 3);
	}

	#[test]
	fn toggling_the_preview_off_drops_requests() {
		let mut app = test_app();
		app.toggle_preview();
		assert!(!app.preview.enabled);
		assert_eq!(app.preview.forced, Some(false));
		app.update_preview_responsive(300);
		assert!(!app.preview.enabled, "a manual choice outlasts resizes");
	}

	#[test]
	fn appearance_toggle_follows_the_counterpart() {
		let mut app = test_app();
		let before = app.style.appearance;
		app.toggle_appearance();
		assert_ne!(app.style.appearance, before);
		assert_eq!(app.session.appearance(), app.style.appearance);
	}
}
