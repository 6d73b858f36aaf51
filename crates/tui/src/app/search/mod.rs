//! Dispatching queries and applying their results.

use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use telegrep_core::SearchResponse;
use tracing::debug;

use crate::app::state::App;

impl App {
	/// Record the current input text as the query and run it.
	pub(crate) fn request_search(&mut self) {
		let query = self.search_input.text().to_owned();
		if let Some(ticket) = self.session.on_query_changed(&query, Instant::now()) {
			debug!(id = ticket.id, query = %ticket.query, "dispatching search");
			self.search.dispatch(ticket);
		} else {
			self.results.reset_scroll();
			self.preview.invalidate();
		}
	}

	/// Drain finished searches.
	pub(crate) fn pump_search_results(&mut self) {
		loop {
			match self.search.try_recv() {
				Ok(response) => self.apply_search_response(response),
				Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
			}
		}
	}

	/// Apply `response` if it answers the latest query.
	pub(crate) fn apply_search_response(&mut self, response: SearchResponse) {
		if self.session.on_search_completed(response, Instant::now()) {
			self.results.reset_scroll();
			self.preview.invalidate();
		}
	}
}
