use ratatui::layout::Rect;
use ratatui::widgets::TableState;

use crate::components::point_in_rect;
use crate::components::tables::TABLE_HEADER_ROWS;

/// Screen state of the results table. The selection itself lives in the
/// session; `table_state` mirrors it before each draw.
#[derive(Default)]
pub(crate) struct ResultsState {
	pub table_state: TableState,
	/// Last known results area on screen, border included.
	pub area: Option<Rect>,
	pub scrollbar_area: Option<Rect>,
	pub hovered: bool,
}

impl ResultsState {
	pub fn sync_selection(&mut self, selected: Option<usize>) {
		self.table_state.select(selected);
	}

	/// Scroll back to the first row, for a fresh result set.
	pub fn reset_scroll(&mut self) {
		*self.table_state.offset_mut() = 0;
	}

	pub fn update_hover(&mut self, column: u16, row: u16) {
		self.hovered = self.area.is_some_and(|area| point_in_rect(column, row, area));
	}

	/// Index of the hit drawn at screen `row`, if any.
	pub fn index_at(&self, row: u16, len: usize) -> Option<usize> {
		let area = self.area?;
		let inner_height = area.height.saturating_sub(2);
		if area.width <= 2 || inner_height == 0 {
			return None;
		}

		let body_start = area.y + 1 + TABLE_HEADER_ROWS as u16;
		let body_end = area.y + 1 + inner_height;
		if row < body_start || row >= body_end {
			return None;
		}

		let index = self.table_state.offset() + usize::from(row - body_start);
		(index < len).then_some(index)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state() -> ResultsState {
		ResultsState {
			area: Some(Rect::new(0, 1, 40, 10)),
			..ResultsState::default()
		}
	}

	#[test]
	fn rows_below_the_header_map_to_hits() {
		let state = state();
		// border at y=1, header at 2, separator at 3, first hit at 4
		assert_eq!(state.index_at(3, 5), None);
		assert_eq!(state.index_at(4, 5), Some(0));
		assert_eq!(state.index_at(6, 5), Some(2));
		assert_eq!(state.index_at(9, 5), None, "past the last hit");
		assert_eq!(state.index_at(10, 50), None, "bottom border");
	}

	#[test]
	fn offset_shifts_the_mapping() {
		let mut state = state();
		*state.table_state.offset_mut() = 7;
		assert_eq!(state.index_at(4, 50), Some(7));
	}
}
