//! Selected-hit state machine.
//!
//! The state is either `Empty` (no hits, index `-1` for display purposes) or
//! `Selected(i)` with `0 <= i < len`. Navigation saturates at both ends and
//! never wraps. Every transition reports a [`SelectionChange`] so callers can
//! drive the preview pipeline.

use crate::hit::{Hit, ResultSet};

/// Outcome of a selection transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
	/// The selected hit is the same as before.
	Unchanged,
	/// A hit at this index is now selected.
	Moved(usize),
	/// There is nothing to select any more.
	Cleared,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
	items: ResultSet,
	index: Option<usize>,
}

impl SelectionState {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the result set, selecting the first hit when there is one.
	///
	/// A non-empty set always reports `Moved(0)`, even if index 0 was already
	/// selected, because the hit behind it is new.
	pub fn replace_results(&mut self, items: ResultSet) -> SelectionChange {
		self.items = items;
		if self.items.is_empty() {
			self.index = None;
			SelectionChange::Cleared
		} else {
			self.index = Some(0);
			SelectionChange::Moved(0)
		}
	}

	pub fn move_up(&mut self) -> SelectionChange {
		match self.index {
			Some(index) if index > 0 => self.set(index - 1),
			_ => SelectionChange::Unchanged,
		}
	}

	pub fn move_down(&mut self) -> SelectionChange {
		match self.index {
			Some(index) if index + 1 < self.items.len() => self.set(index + 1),
			_ => SelectionChange::Unchanged,
		}
	}

	/// Jump to `index`; out-of-range indices are ignored.
	pub fn select_index(&mut self, index: usize) -> SelectionChange {
		if index >= self.items.len() || self.index == Some(index) {
			return SelectionChange::Unchanged;
		}
		self.set(index)
	}

	fn set(&mut self, index: usize) -> SelectionChange {
		self.index = Some(index);
		SelectionChange::Moved(index)
	}

	#[must_use]
	pub fn items(&self) -> &ResultSet {
		&self.items
	}

	#[must_use]
	pub fn index(&self) -> Option<usize> {
		self.index
	}

	/// Selected index with `-1` standing for "nothing selected".
	#[must_use]
	pub fn sentinel_index(&self) -> isize {
		self.index
			.and_then(|index| isize::try_from(index).ok())
			.unwrap_or(-1)
	}

	#[must_use]
	pub fn selected(&self) -> Option<&Hit> {
		self.index.and_then(|index| self.items.get(index))
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}
