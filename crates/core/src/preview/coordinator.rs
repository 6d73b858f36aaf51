use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::debug;

use super::request::PreviewRequest;

/// Delay between the last selection change and the preview request.
pub const DEFAULT_PREVIEW_DEBOUNCE: Duration = Duration::from_millis(50);

/// The file location a preview should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTarget {
	pub file_path: PathBuf,
	/// 1-based line.
	pub line: usize,
}

#[derive(Debug)]
struct Pending {
	target: PreviewTarget,
	due: Instant,
}

/// Debounces selection changes into preview requests and decides which
/// response is authoritative.
///
/// Time is passed in by the caller, so the coordinator itself never sleeps or
/// spawns anything.
#[derive(Debug)]
pub struct PreviewCoordinator {
	debounce: Duration,
	pending: Option<Pending>,
	next_sequence: u64,
	live: Option<u64>,
}

impl Default for PreviewCoordinator {
	fn default() -> Self {
		Self::new(DEFAULT_PREVIEW_DEBOUNCE)
	}
}

impl PreviewCoordinator {
	#[must_use]
	pub fn new(debounce: Duration) -> Self {
		Self {
			debounce,
			pending: None,
			next_sequence: 0,
			live: None,
		}
	}

	#[must_use]
	pub fn debounce(&self) -> Duration {
		self.debounce
	}

	/// Restart the timer for `target`, replacing any pending one.
	pub fn schedule(&mut self, target: PreviewTarget, now: Instant) {
		self.pending = Some(Pending {
			target,
			due: now + self.debounce,
		});
	}

	/// Drop the pending timer and stop accepting responses.
	pub fn cancel(&mut self) {
		self.pending = None;
		self.live = None;
	}

	/// Issue the pending request if its delay has elapsed by `now`.
	pub fn fire_due(&mut self, now: Instant, search_term: &str) -> Option<PreviewRequest> {
		if self.pending.as_ref().is_none_or(|pending| pending.due > now) {
			return None;
		}
		let pending = self.pending.take()?;
		Some(self.issue(pending.target, search_term))
	}

	/// Issue a request for `target` right away, bypassing the debounce.
	pub fn reissue(&mut self, target: PreviewTarget, search_term: &str) -> PreviewRequest {
		self.pending = None;
		self.issue(target, search_term)
	}

	fn issue(&mut self, target: PreviewTarget, search_term: &str) -> PreviewRequest {
		self.next_sequence += 1;
		let sequence_id = self.next_sequence;
		self.live = Some(sequence_id);
		debug!(sequence_id, path = %target.file_path.display(), line = target.line, "issuing preview request");

		PreviewRequest {
			file_path: target.file_path,
			line: target.line,
			search_term: search_term.to_string(),
			sequence_id,
		}
	}

	/// Whether a response carrying `sequence_id` should be applied.
	#[must_use]
	pub fn is_current(&self, sequence_id: u64) -> bool {
		self.live == Some(sequence_id)
	}

	/// When the pending request becomes due, if there is one.
	#[must_use]
	pub fn next_deadline(&self) -> Option<Instant> {
		self.pending.as_ref().map(|pending| pending.due)
	}

	#[must_use]
	pub fn has_pending(&self) -> bool {
		self.pending.is_some()
	}
}
