//! Background execution of search queries.
//!
//! Each query runs on its own short-lived thread so a slow search never
//! blocks the next keystroke. Responses carry the id of the query that
//! produced them; the caller decides which one is still relevant.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::executor::{SearchExecutor, SearchFailure};
use crate::hit::ResultSet;

/// A query to run, tagged with its sequence id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
	pub id: u64,
	pub query: String,
}

/// Outcome of one search, tagged with the ticket that requested it.
#[derive(Debug)]
pub struct SearchResponse {
	pub id: u64,
	pub query: String,
	pub outcome: Result<ResultSet, SearchFailure>,
}

pub struct SearchRuntime {
	executor: Arc<SearchExecutor>,
	root: Option<PathBuf>,
	tx: Sender<SearchResponse>,
	rx: Receiver<SearchResponse>,
	in_flight: usize,
}

impl SearchRuntime {
	#[must_use]
	pub fn new(executor: SearchExecutor, root: Option<PathBuf>) -> Self {
		let (tx, rx) = mpsc::channel();
		Self {
			executor: Arc::new(executor),
			root,
			tx,
			rx,
			in_flight: 0,
		}
	}

	/// Start searching for `ticket.query`. The response arrives through
	/// [`Self::try_recv`] or [`Self::recv_timeout`], exactly once.
	pub fn dispatch(&mut self, ticket: SearchTicket) {
		let executor = Arc::clone(&self.executor);
		let root = self.root.clone();
		let tx = self.tx.clone();
		let SearchTicket { id, query } = ticket;
		let thread_query = query.clone();

		debug!(id, %query, "dispatching search");
		let spawned = thread::Builder::new()
			.name(format!("search-{id}"))
			.spawn(move || {
				let outcome = executor.execute(&thread_query, root.as_deref());
				let _ = tx.send(SearchResponse {
					id,
					query: thread_query,
					outcome,
				});
			});

		match spawned {
			Ok(_) => self.in_flight += 1,
			Err(source) => {
				warn!(id, error = %source, "could not start search thread");
				let command = self.executor.display_command(&query);
				self.in_flight += 1;
				let _ = self.tx.send(SearchResponse {
					id,
					query,
					outcome: Err(SearchFailure::Spawn { command, source }),
				});
			}
		}
	}

	pub fn try_recv(&mut self) -> Result<SearchResponse, TryRecvError> {
		let response = self.rx.try_recv()?;
		self.in_flight = self.in_flight.saturating_sub(1);
		Ok(response)
	}

	pub fn recv_timeout(&mut self, timeout: Duration) -> Result<SearchResponse, RecvTimeoutError> {
		let response = self.rx.recv_timeout(timeout)?;
		self.in_flight = self.in_flight.saturating_sub(1);
		Ok(response)
	}

	/// Whether any dispatched search has not reported back yet.
	#[must_use]
	pub fn is_busy(&self) -> bool {
		self.in_flight > 0
	}
}
