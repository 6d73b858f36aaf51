use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::HighlightSpacing;
use telegrep_core::Hit;
use unicode_width::UnicodeWidthStr;

use crate::components::tables::{HIGHLIGHT_SYMBOL, TABLE_COLUMN_SPACING, TABLE_HIGHLIGHT_SPACING};

/// Widest share of the table the location column may take, in percent.
const MAX_LABEL_SHARE: u16 = 40;

/// Column constraints for `hits` in a table drawn over `area`: the location
/// column fits the widest label up to a share of the width, the match column
/// takes the rest.
pub(crate) fn result_columns(area: Rect, hits: &[Hit], header: &str) -> [Constraint; 2] {
	let widest = hits
		.iter()
		.map(|hit| hit.label.width())
		.chain(std::iter::once(header.width()))
		.max()
		.unwrap_or_default();
	let cap = area.width.saturating_sub(2) * MAX_LABEL_SHARE / 100;
	let label = u16::try_from(widest).unwrap_or(u16::MAX).min(cap.max(1));
	[Constraint::Length(label), Constraint::Fill(1)]
}

/// Widths each column resolves to inside the bordered table at `area`.
pub(crate) fn resolve_column_widths(area: Rect, widths: &[Constraint], has_selection: bool) -> Vec<u16> {
	if widths.is_empty() || area.width == 0 {
		return Vec::new();
	}

	let table_width = area.width.saturating_sub(2);
	if table_width == 0 {
		return Vec::new();
	}

	let highlight_width = match TABLE_HIGHLIGHT_SPACING {
		HighlightSpacing::Always => HIGHLIGHT_SYMBOL.width() as u16,
		HighlightSpacing::WhenSelected if has_selection => HIGHLIGHT_SYMBOL.width() as u16,
		HighlightSpacing::WhenSelected | HighlightSpacing::Never => 0,
	};

	let [_selection, columns_area] =
		Layout::horizontal([Constraint::Length(highlight_width), Constraint::Fill(0)])
			.areas(Rect::new(0, 0, table_width, 1));

	Layout::horizontal(widths.to_vec())
		.spacing(TABLE_COLUMN_SPACING)
		.split(columns_area)
		.iter()
		.map(|rect| rect.width)
		.collect()
}
