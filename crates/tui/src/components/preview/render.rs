use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::components::scrollbar::{ScrollMetrics, render_scrollbar};
use crate::style::Theme;

pub struct PreviewContext<'a> {
	pub title: &'a str,
	/// Styled rows of the current window; empty when nothing is displayed.
	pub lines: &'a [Line<'static>],
	/// First row shown.
	pub scroll: usize,
	/// Shown centered when `lines` is empty.
	pub placeholder: &'a str,
	pub theme: &'a Theme,
}

/// Draw the preview pane. Returns the scrollbar's area if one was drawn.
pub fn render_preview(frame: &mut Frame, area: Rect, ctx: PreviewContext<'_>) -> Option<Rect> {
	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.border_style(ctx.theme.border_style())
		.title(format!(" {} ", ctx.title));
	let inner = block.inner(area);
	frame.render_widget(block, area);

	if ctx.lines.is_empty() {
		render_placeholder(frame, inner, ctx.placeholder, ctx.theme);
		return None;
	}

	let metrics = ScrollMetrics::compute(ctx.lines.len(), usize::from(inner.height));
	let scroll = ctx.scroll.min(metrics.max_scroll);
	let visible: Vec<Line<'static>> = ctx
		.lines
		.iter()
		.skip(scroll)
		.take(metrics.viewport_len)
		.cloned()
		.collect();

	if !metrics.needs_scrollbar {
		frame.render_widget(Paragraph::new(visible), inner);
		return None;
	}

	let mut state = metrics.state(scroll);
	let text_area = render_scrollbar(frame, inner, &mut state, ctx.theme);
	frame.render_widget(Paragraph::new(visible), text_area);
	Some(Rect {
		x: text_area.right(),
		width: 1,
		..inner
	})
}

fn render_placeholder(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
	let padding = area.height.saturating_sub(1) / 2;
	let mut lines: Vec<Line<'_>> = (0..padding).map(|_| Line::default()).collect();
	lines.push(Line::from(Span::styled(message, theme.empty)));
	frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
