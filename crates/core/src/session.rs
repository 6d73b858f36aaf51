//! The query, selection, and preview state of one interactive session.
//!
//! [`Session`] is driven entirely by discrete events from the host: query
//! edits, search completions, navigation, timer ticks, and preview
//! responses. It never blocks and never spawns; the host forwards the
//! [`SearchTicket`]s and [`PreviewRequest`]s it hands out to the runtimes and
//! feeds their responses back in. Both searches and previews are versioned,
//! so a late answer to an old question is dropped instead of overwriting a
//! newer one.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::hit::{Hit, ResultSet};
use crate::preview::{PreviewContent, PreviewCoordinator, PreviewRequest, PreviewResponse, PreviewTarget};
use crate::search::{SearchResponse, SearchTicket};
use crate::selection::{SelectionChange, SelectionState};
use crate::tokens::Appearance;

/// A location the host should open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTarget {
	pub file_path: PathBuf,
	/// 1-based line.
	pub line: usize,
}

impl OpenTarget {
	/// The line as the 0-based position editors and host APIs expect.
	#[must_use]
	pub fn zero_based_line(&self) -> usize {
		self.line.saturating_sub(1)
	}
}

impl From<&Hit> for OpenTarget {
	fn from(hit: &Hit) -> Self {
		Self {
			file_path: hit.file_path.clone(),
			line: hit.line,
		}
	}
}

#[derive(Debug)]
pub struct Session {
	selection: SelectionState,
	preview: PreviewCoordinator,
	query: String,
	next_search_id: u64,
	latest_search_id: u64,
	searching: bool,
	error: Option<String>,
	displayed: Option<PreviewContent>,
	appearance: Appearance,
}

impl Session {
	#[must_use]
	pub fn new(debounce: Duration, appearance: Appearance) -> Self {
		Self {
			selection: SelectionState::new(),
			preview: PreviewCoordinator::new(debounce),
			query: String::new(),
			next_search_id: 0,
			latest_search_id: 0,
			searching: false,
			error: None,
			displayed: None,
			appearance,
		}
	}

	/// Record a new query. Returns the search to run, or `None` when the query
	/// is empty and the results were cleared on the spot.
	pub fn on_query_changed(&mut self, text: &str, now: Instant) -> Option<SearchTicket> {
		self.query = text.to_string();
		self.next_search_id += 1;
		self.latest_search_id = self.next_search_id;

		if text.is_empty() {
			self.searching = false;
			self.error = None;
			self.apply_results(ResultSet::new(), now);
			return None;
		}

		self.searching = true;
		Some(SearchTicket {
			id: self.latest_search_id,
			query: self.query.clone(),
		})
	}

	/// Apply a finished search if it answers the latest query.
	pub fn on_search_completed(&mut self, response: SearchResponse, now: Instant) -> bool {
		if response.id != self.latest_search_id {
			debug!(id = response.id, latest = self.latest_search_id, "dropping stale search response");
			return false;
		}

		self.searching = false;
		match response.outcome {
			Ok(results) => {
				self.error = None;
				self.apply_results(results, now);
			}
			Err(failure) => {
				warn!(query = %response.query, error = %failure, "search failed");
				self.error = Some(failure.to_string());
				self.apply_results(ResultSet::new(), now);
			}
		}
		true
	}

	fn apply_results(&mut self, results: ResultSet, now: Instant) {
		self.displayed = None;
		self.preview.cancel();
		let change = self.selection.replace_results(results);
		self.follow_selection(change, now);
	}

	fn follow_selection(&mut self, change: SelectionChange, now: Instant) {
		match change {
			SelectionChange::Moved(_) => {
				if let Some(target) = self.selected_target() {
					self.preview.schedule(target, now);
				}
			}
			SelectionChange::Cleared => {
				self.preview.cancel();
				self.displayed = None;
			}
			SelectionChange::Unchanged => {}
		}
	}

	fn selected_target(&self) -> Option<PreviewTarget> {
		self.selection.selected().map(|hit| PreviewTarget {
			file_path: hit.file_path.clone(),
			line: hit.line,
		})
	}

	pub fn move_up(&mut self, now: Instant) -> SelectionChange {
		let change = self.selection.move_up();
		self.follow_selection(change, now);
		change
	}

	pub fn move_down(&mut self, now: Instant) -> SelectionChange {
		let change = self.selection.move_down();
		self.follow_selection(change, now);
		change
	}

	pub fn select_index(&mut self, index: usize, now: Instant) -> SelectionChange {
		let change = self.selection.select_index(index);
		self.follow_selection(change, now);
		change
	}

	/// Click semantics: the first activation selects a row, activating the
	/// selected row opens it.
	pub fn activate_index(&mut self, index: usize, now: Instant) -> Option<OpenTarget> {
		if self.selection.index() == Some(index) {
			return self.open_selected();
		}
		self.select_index(index, now);
		None
	}

	#[must_use]
	pub fn open_selected(&self) -> Option<OpenTarget> {
		self.selection.selected().map(OpenTarget::from)
	}

	/// Issue the debounced preview request once it is due.
	pub fn tick(&mut self, now: Instant) -> Option<PreviewRequest> {
		self.preview.fire_due(now, &self.query)
	}

	#[must_use]
	pub fn next_deadline(&self) -> Option<Instant> {
		self.preview.next_deadline()
	}

	/// Switch appearance and re-request the current preview right away, since
	/// its token colors depend on the theme.
	pub fn on_theme_changed(&mut self, appearance: Appearance) -> Option<PreviewRequest> {
		if self.appearance == appearance {
			return None;
		}
		self.appearance = appearance;
		self.refresh_preview()
	}

	/// Re-request the preview for the selected hit without waiting.
	pub fn refresh_preview(&mut self) -> Option<PreviewRequest> {
		let target = self.selected_target()?;
		Some(self.preview.reissue(target, &self.query))
	}

	/// Display `response` if it answers the latest preview request.
	pub fn on_preview_response(&mut self, response: PreviewResponse) -> bool {
		if !self.preview.is_current(response.sequence_id) {
			debug!(sequence_id = response.sequence_id, "dropping stale preview response");
			return false;
		}
		self.displayed = Some(response.content);
		true
	}

	#[must_use]
	pub fn selection(&self) -> &SelectionState {
		&self.selection
	}

	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	#[must_use]
	pub fn is_searching(&self) -> bool {
		self.searching
	}

	/// User-facing message from the last failed search.
	#[must_use]
	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	#[must_use]
	pub fn displayed(&self) -> Option<&PreviewContent> {
		self.displayed.as_ref()
	}

	#[must_use]
	pub fn appearance(&self) -> Appearance {
		self.appearance
	}
}
