use ratatui::layout::Rect;
use ratatui::text::Line;
use telegrep_core::{PreviewContent, RenderedPreview, Viewport, render_preview};

use crate::components::{point_in_rect, preview_lines};
use crate::style::StyleConfig;

/// Terminal width at which the preview opens on its own.
pub(crate) const MIN_WIDTH_FOR_PREVIEW: u16 = 100;

/// The displayed content turned into styled rows for one viewport and theme.
struct PreparedPreview {
	generation: u64,
	window_size: usize,
	theme_name: String,
	rendered: RenderedPreview,
	lines: Vec<Line<'static>>,
}

pub(crate) struct PreviewState {
	/// Whether the preview pane is visible.
	pub enabled: bool,
	/// Fixed visibility chosen by configuration or Ctrl+P; `None` follows the
	/// terminal width.
	pub forced: Option<bool>,
	/// First visible row.
	pub scroll: usize,
	/// Rows available inside the pane's border.
	pub viewport_height: usize,
	/// Last known preview area on screen.
	pub area: Option<Rect>,
	pub scrollbar_area: Option<Rect>,
	pub hovered: bool,
	/// Bumped whenever the displayed content may have changed.
	generation: u64,
	prepared: Option<PreparedPreview>,
}

impl PreviewState {
	pub fn new(forced: Option<bool>) -> Self {
		Self {
			enabled: forced.unwrap_or(false),
			forced,
			scroll: 0,
			viewport_height: 0,
			area: None,
			scrollbar_area: None,
			hovered: false,
			generation: 0,
			prepared: None,
		}
	}

	/// Forget the prepared rows; the next [`prepare`](Self::prepare) rebuilds
	/// them and recenters on the target line.
	pub fn invalidate(&mut self) {
		self.generation = self.generation.wrapping_add(1);
	}

	/// Build the rows for `content` unless the cached ones still fit.
	pub fn prepare(&mut self, content: Option<&PreviewContent>, viewport_height: usize, style: &StyleConfig) {
		self.viewport_height = viewport_height;
		let Some(content) = content else {
			self.prepared = None;
			self.scroll = 0;
			return;
		};

		let window_size = Viewport::rows(u16::try_from(viewport_height).unwrap_or(u16::MAX)).window_size();
		if let Some(prepared) = &mut self.prepared
			&& prepared.generation == self.generation
			&& prepared.window_size == window_size
		{
			if prepared.theme_name != style.name {
				prepared.lines = preview_lines(&prepared.rendered, &style.theme, content.is_error());
				prepared.theme_name.clone_from(&style.name);
			}
			return;
		}

		let rendered = render_preview(content, window_size);
		let lines = preview_lines(&rendered, &style.theme, content.is_error());
		self.scroll = rendered.scroll_offset(viewport_height);
		self.prepared = Some(PreparedPreview {
			generation: self.generation,
			window_size,
			theme_name: style.name.clone(),
			rendered,
			lines,
		});
	}

	/// Rows of the prepared preview; empty when nothing is displayed.
	pub fn lines(&self) -> &[Line<'static>] {
		self.prepared
			.as_ref()
			.map(|prepared| prepared.lines.as_slice())
			.unwrap_or_default()
	}

	pub fn max_scroll(&self) -> usize {
		self.lines().len().saturating_sub(self.viewport_height.max(1))
	}

	pub fn scroll_up(&mut self, lines: usize) {
		self.scroll = self.scroll.saturating_sub(lines);
	}

	pub fn scroll_down(&mut self, lines: usize) {
		self.scroll = (self.scroll + lines).min(self.max_scroll());
	}

	/// Lines moved by one page key.
	pub fn page(&self) -> usize {
		(self.viewport_height / 2).max(1)
	}

	pub fn hide(&mut self) {
		self.enabled = false;
		self.area = None;
		self.scrollbar_area = None;
		self.hovered = false;
	}

	/// Visibility for a terminal `width` columns wide, honoring `forced`.
	pub fn wants_enabled(&self, width: u16) -> bool {
		self.forced.unwrap_or(width >= MIN_WIDTH_FOR_PREVIEW)
	}

	pub fn update_hover(&mut self, column: u16, row: u16) {
		self.hovered = self.enabled && self.area.is_some_and(|area| point_in_rect(column, row, area));
	}
}
