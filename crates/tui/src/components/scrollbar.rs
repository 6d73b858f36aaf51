//! Vertical scrollbar shared by the results and preview panes.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::style::Theme;

/// Scroll bounds for a viewport over a list of rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
	pub content_length: usize,
	pub viewport_len: usize,
	pub max_scroll: usize,
	pub needs_scrollbar: bool,
}

impl ScrollMetrics {
	#[must_use]
	pub fn compute(content_length: usize, viewport_height: usize) -> Self {
		if content_length == 0 || viewport_height == 0 {
			return Self::default();
		}

		let viewport_len = viewport_height.min(content_length);
		Self {
			content_length,
			viewport_len,
			max_scroll: content_length - viewport_len,
			needs_scrollbar: content_length > viewport_len,
		}
	}

	/// Scrollbar state for a viewport scrolled to `scroll`.
	#[must_use]
	pub fn state(&self, scroll: usize) -> ScrollbarState {
		let position = if self.max_scroll == 0 {
			0
		} else {
			scroll.min(self.max_scroll) * (self.content_length - 1) / self.max_scroll
		};
		ScrollbarState::new(self.content_length)
			.viewport_content_length(self.viewport_len)
			.position(position)
	}
}

#[must_use]
pub fn point_in_rect(column: u16, row: u16, area: Rect) -> bool {
	column >= area.x
		&& column < area.x.saturating_add(area.width)
		&& row >= area.y
		&& row < area.y.saturating_add(area.height)
}

/// Draw a scrollbar along the right edge of `area` and return the area left
/// for content.
pub fn render_scrollbar(
	frame: &mut Frame,
	area: Rect,
	state: &mut ScrollbarState,
	theme: &Theme,
) -> Rect {
	let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
		.begin_symbol(None)
		.end_symbol(None)
		.track_symbol(Some("│"))
		.style(theme.border_style());

	let bar = Rect {
		x: area.right().saturating_sub(1),
		width: 1.min(area.width),
		..area
	};
	frame.render_stateful_widget(scrollbar, bar, state);

	Rect {
		width: area.width.saturating_sub(1),
		..area
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn metrics_only_scroll_when_content_overflows() {
		let fits = ScrollMetrics::compute(5, 10);
		assert!(!fits.needs_scrollbar);
		assert_eq!(fits.max_scroll, 0);

		let overflows = ScrollMetrics::compute(30, 10);
		assert!(overflows.needs_scrollbar);
		assert_eq!(overflows.viewport_len, 10);
		assert_eq!(overflows.max_scroll, 20);
	}

	#[test]
	fn points_on_the_far_edge_are_outside() {
		let area = Rect::new(2, 3, 4, 5);
		assert!(point_in_rect(2, 3, area));
		assert!(point_in_rect(5, 7, area));
		assert!(!point_in_rect(6, 7, area));
		assert!(!point_in_rect(5, 8, area));
	}
}
