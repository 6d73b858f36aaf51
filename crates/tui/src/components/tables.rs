use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, TableState};

use crate::components::scrollbar::{ScrollMetrics, render_scrollbar};
use crate::style::Theme;

pub(crate) const HIGHLIGHT_SYMBOL: &str = "▶ ";
pub(crate) const TABLE_COLUMN_SPACING: u16 = 1;
pub(crate) const TABLE_HIGHLIGHT_SPACING: HighlightSpacing = HighlightSpacing::WhenSelected;
/// Header row plus separator inside the table's viewport.
pub(crate) const TABLE_HEADER_ROWS: usize = 2;

/// Everything needed to draw one table.
pub struct TableSpec<'a> {
	pub headers: Vec<String>,
	pub widths: Vec<Constraint>,
	pub rows: Vec<Row<'a>>,
	pub title: Option<String>,
}

/// Draw a bordered table with a header separator and, when the rows overflow,
/// a scrollbar. Returns the scrollbar's area if one was drawn.
pub fn render_table(
	frame: &mut Frame,
	area: Rect,
	table_state: &mut TableState,
	spec: TableSpec<'_>,
	theme: &Theme,
) -> Option<Rect> {
	let mut block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.border_style(theme.border_style());
	if let Some(title) = spec.title {
		block = block.title(format!(" {title} "));
	}
	let inner = block.inner(area);
	frame.render_widget(block, area);

	let header = Row::new(spec.headers.into_iter().map(Cell::from))
		.style(theme.border_style())
		.height(1)
		.bottom_margin(1);

	let viewport_rows = usize::from(inner.height).saturating_sub(TABLE_HEADER_ROWS);
	let metrics = ScrollMetrics::compute(spec.rows.len(), viewport_rows);
	let table_area = if metrics.needs_scrollbar {
		Rect {
			width: inner.width.saturating_sub(1),
			..inner
		}
	} else {
		inner
	};

	let widths = if spec.widths.is_empty() {
		vec![Constraint::Fill(1)]
	} else {
		spec.widths
	};
	let table = Table::new(spec.rows, widths)
		.header(header)
		.column_spacing(TABLE_COLUMN_SPACING)
		.highlight_spacing(TABLE_HIGHLIGHT_SPACING)
		.row_highlight_style(theme.row_highlight)
		.highlight_symbol(HIGHLIGHT_SYMBOL);
	frame.render_stateful_widget(table, table_area, table_state);
	render_header_separator(frame, table_area, theme);

	if !metrics.needs_scrollbar {
		return None;
	}
	let mut scrollbar_state = metrics.state(table_state.offset());
	let content = render_scrollbar(frame, inner, &mut scrollbar_state, theme);
	Some(Rect {
		x: content.right(),
		width: 1,
		..inner
	})
}

fn render_header_separator(frame: &mut Frame, area: Rect, theme: &Theme) {
	if area.height < 2 || area.width == 0 {
		return;
	}
	let rule = if area.width <= 2 {
		Line::from(" ".repeat(usize::from(area.width)))
	} else {
		Line::from(vec![
			Span::raw(" "),
			Span::styled("─".repeat(usize::from(area.width) - 2), theme.border_style()),
			Span::raw(" "),
		])
	};
	let separator = Rect {
		y: area.y + 1,
		height: 1,
		..area
	};
	frame.render_widget(Paragraph::new(rule), separator);
}
