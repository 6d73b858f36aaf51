//! Virtualized preview windows.
//!
//! Only a contiguous slice of the file is materialized. Its size is derived
//! from the viewport (one and a half screens, never fewer than
//! [`MIN_WINDOW_LINES`]) and it is centered on the target line, shifted back
//! inside the file when the target sits near either end. Everything here is
//! recomputed from scratch whenever the target, term, or viewport changes.

use serde::Serialize;

use crate::highlight::{AnnotatedLine, HighlightEngine};
use crate::preview::PreviewContent;

/// Smallest number of lines a window ever holds.
pub const MIN_WINDOW_LINES: usize = 40;

/// Font size assumed when the surface cannot report line metrics.
pub const FALLBACK_FONT_SIZE: f32 = 14.0;

/// Line height as a multiple of the font size when metrics are unavailable.
pub const FALLBACK_LINE_HEIGHT_FACTOR: f32 = 1.4;

/// Display surface measurements used to size a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
	/// Height available for preview rows, in the same unit as `line_height`.
	pub available_height: f32,
	/// Height of one rendered row, if the surface knows it.
	pub line_height: Option<f32>,
}

impl Viewport {
	/// A viewport measured in terminal rows, where every row is one unit tall.
	#[must_use]
	pub fn rows(rows: u16) -> Self {
		Self {
			available_height: f32::from(rows),
			line_height: Some(1.0),
		}
	}

	/// Per-line height, falling back to `round(14 * 1.4)` when unknown.
	#[must_use]
	pub fn line_height(&self) -> f32 {
		self.line_height
			.filter(|height| height.is_finite() && *height > 0.0)
			.unwrap_or_else(|| (FALLBACK_FONT_SIZE * FALLBACK_LINE_HEIGHT_FACTOR).round())
	}

	/// `max(40, ceil(visible_lines * 1.5))`.
	#[must_use]
	pub fn window_size(&self) -> usize {
		let visible = (self.available_height.max(0.0) / self.line_height()) * 1.5;
		// Float to integer casts saturate, so huge ratios become `usize::MAX`.
		let size = visible.ceil() as usize;
		size.max(MIN_WINDOW_LINES)
	}
}

/// Half-open range `[start, end)` of 0-based line indices to materialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderWindow {
	pub start: usize,
	pub end: usize,
}

impl RenderWindow {
	/// Window of `size` lines around `target` within a file of `total` lines.
	///
	/// For `total > 0` the result satisfies `start <= target < end <= total`,
	/// with `target` clamped to the last line first.
	#[must_use]
	pub fn around(total: usize, target: usize, size: usize) -> Self {
		if total == 0 {
			return Self::default();
		}

		let target = target.min(total - 1);
		let size = size.clamp(1, total);
		let start = target.saturating_sub(size / 2).min(total - size);

		Self {
			start,
			end: start + size,
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.end - self.start
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	#[must_use]
	pub fn contains(&self, index: usize) -> bool {
		(self.start..self.end).contains(&index)
	}
}

/// One materialized preview row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
	/// True 1-based line number in the file.
	pub number: usize,
	pub tokens: AnnotatedLine,
	/// Whether this is the preview's target line.
	pub active: bool,
}

/// The windowed, highlighted slice of a preview ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPreview {
	pub window: RenderWindow,
	pub rows: Vec<RenderedRow>,
	/// Index into `rows` of the target line, if it is shown.
	pub active_row: Option<usize>,
	pub total_lines: usize,
}

impl RenderedPreview {
	/// First row to show so the active row sits in the middle of a viewport
	/// `viewport_rows` tall.
	#[must_use]
	pub fn scroll_offset(&self, viewport_rows: usize) -> usize {
		let max_offset = self.rows.len().saturating_sub(viewport_rows);
		self.active_row
			.map(|row| row.saturating_sub(viewport_rows / 2))
			.unwrap_or(0)
			.min(max_offset)
	}
}

/// Window, number, and highlight the lines of `content`.
///
/// A content line of `0` means "no target": the window starts at the top and
/// no row is active. A target past the end of the file is clamped for
/// windowing but not marked active.
#[must_use]
pub fn render_preview(content: &PreviewContent, window_size: usize) -> RenderedPreview {
	let total_lines = content.token_lines.len();
	let target = content.line.checked_sub(1);
	let window = RenderWindow::around(total_lines, target.unwrap_or(0), window_size);
	let engine = HighlightEngine::new(&content.search_term);

	let mut active_row = None;
	let rows = content.token_lines[window.start..window.end]
		.iter()
		.enumerate()
		.map(|(offset, line)| {
			let index = window.start + offset;
			let active = target == Some(index);
			if active {
				active_row = Some(offset);
			}
			RenderedRow {
				number: index + 1,
				tokens: engine.annotate_line(line, active),
				active,
			}
		})
		.collect();

	RenderedPreview {
		window,
		rows,
		active_row,
		total_lines,
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::*;
	use crate::highlight::Mark;
	use crate::tokens::{Token, plain_lines};

	fn content(lines: usize, target: usize, term: &str) -> PreviewContent {
		let text = (1..=lines)
			.map(|n| format!("line {n}"))
			.collect::<Vec<_>>()
			.join("\n");
		PreviewContent {
			file_path: PathBuf::from("/r/a.txt"),
			token_lines: plain_lines(&text),
			line: target,
			search_term: term.to_string(),
			error: None,
		}
	}

	#[test]
	fn window_examples_clamp_to_file_bounds() {
		assert_eq!(RenderWindow::around(100, 0, 50), RenderWindow { start: 0, end: 50 });
		assert_eq!(RenderWindow::around(100, 99, 50), RenderWindow { start: 50, end: 100 });
		assert_eq!(RenderWindow::around(100, 50, 50), RenderWindow { start: 25, end: 75 });
	}

	#[test]
	fn window_never_exceeds_short_files() {
		assert_eq!(RenderWindow::around(10, 4, 40), RenderWindow { start: 0, end: 10 });
		assert_eq!(RenderWindow::around(0, 4, 40), RenderWindow::default());
	}

	#[test]
	fn oversized_windows_cover_the_whole_file() {
		let viewport = Viewport {
			available_height: 30.0,
			line_height: Some(f32::MIN_POSITIVE),
		};
		assert_eq!(viewport.window_size(), usize::MAX);
		assert_eq!(
			RenderWindow::around(100, 70, viewport.window_size()),
			RenderWindow { start: 0, end: 100 }
		);
		assert_eq!(RenderWindow::around(1, 0, usize::MAX), RenderWindow { start: 0, end: 1 });
	}

	#[test]
	fn window_always_contains_target() {
		for total in [1, 2, 39, 40, 41, 100, 257] {
			for target in [0, total / 3, total / 2, total - 1] {
				for size in [1, 40, 63, 300] {
					let window = RenderWindow::around(total, target, size);
					assert!(window.start <= target && target < window.end);
					assert!(window.end <= total);
					assert_eq!(window.len(), size.min(total));
				}
			}
		}
	}

	#[test]
	fn window_size_is_one_and_a_half_screens_with_floor() {
		assert_eq!(Viewport::rows(10).window_size(), 40);
		assert_eq!(Viewport::rows(40).window_size(), 60);
		assert_eq!(Viewport::rows(41).window_size(), 62);
	}

	#[test]
	fn missing_metrics_fall_back_to_font_based_line_height() {
		let viewport = Viewport {
			available_height: 1000.0,
			line_height: None,
		};
		assert_eq!(viewport.line_height(), 20.0);
		assert_eq!(viewport.window_size(), 75);
	}

	#[test]
	fn rendered_rows_carry_true_line_numbers_and_active_marker() {
		let rendered = render_preview(&content(100, 60, "line"), 50);
		assert_eq!(rendered.window, RenderWindow { start: 34, end: 84 });
		assert_eq!(rendered.rows.first().map(|row| row.number), Some(35));
		assert_eq!(rendered.rows.last().map(|row| row.number), Some(84));

		let active = rendered.active_row.expect("active row");
		let row = &rendered.rows[active];
		assert_eq!(row.number, 60);
		assert!(row.active);
		assert_eq!(row.tokens[0].segments[0].mark, Mark::ActiveMatch);
		assert_eq!(rendered.rows.iter().filter(|row| row.active).count(), 1);
	}

	#[test]
	fn scroll_offset_centers_active_row() {
		let rendered = render_preview(&content(100, 60, ""), 50);
		let active = rendered.active_row.expect("active row");
		assert_eq!(rendered.scroll_offset(10), active - 5);
	}

	#[test]
	fn scroll_offset_is_clamped_near_edges() {
		let rendered = render_preview(&content(100, 1, ""), 50);
		assert_eq!(rendered.scroll_offset(10), 0);
		let rendered = render_preview(&content(100, 100, ""), 50);
		assert_eq!(rendered.scroll_offset(10), 40);
	}

	#[test]
	fn no_target_starts_at_top_without_active_row() {
		let rendered = render_preview(&content(5, 0, ""), 40);
		assert_eq!(rendered.window, RenderWindow { start: 0, end: 5 });
		assert!(rendered.active_row.is_none());
	}

	#[test]
	fn target_past_end_is_clamped_but_not_active() {
		let rendered = render_preview(&content(80, 500, ""), 40);
		assert_eq!(rendered.window, RenderWindow { start: 40, end: 80 });
		assert!(rendered.active_row.is_none());
	}

	#[test]
	fn empty_lines_still_occupy_rows() {
		let preview = PreviewContent {
			file_path: PathBuf::from("x"),
			token_lines: vec![vec![Token::plain("a")], Vec::new(), vec![Token::plain("b")]],
			line: 2,
			search_term: String::new(),
			error: None,
		};
		let rendered = render_preview(&preview, 40);
		assert_eq!(rendered.rows.len(), 3);
		assert!(rendered.rows[1].tokens.is_empty());
		assert_eq!(rendered.active_row, Some(1));
	}
}
