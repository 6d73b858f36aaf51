//! Conversion of a rendered preview window into styled terminal lines.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use telegrep_core::{AnnotatedToken, Mark, RenderedPreview, RenderedRow};

use crate::style::{Theme, token_color};

const TAB: &str = "    ";

/// Columns needed for the largest line number in the window.
#[must_use]
pub fn gutter_width(rendered: &RenderedPreview) -> usize {
	rendered.window.end.max(1).to_string().len()
}

/// One styled line per rendered row: a right-aligned line number, then the
/// token segments. `is_error` paints the text with the theme's error style.
#[must_use]
pub fn preview_lines(rendered: &RenderedPreview, theme: &Theme, is_error: bool) -> Vec<Line<'static>> {
	let width = gutter_width(rendered);
	rendered
		.rows
		.iter()
		.map(|row| row_line(row, width, theme, is_error))
		.collect()
}

fn row_line(row: &RenderedRow, gutter: usize, theme: &Theme, is_error: bool) -> Line<'static> {
	let number_style = if row.active {
		theme.line_number.add_modifier(Modifier::BOLD)
	} else {
		theme.line_number
	};

	let mut spans = vec![Span::styled(format!("{:>gutter$} ", row.number), number_style)];
	for token in &row.tokens {
		push_token(&mut spans, token, theme, is_error);
	}

	let line = Line::from(spans);
	if row.active {
		line.style(theme.active_line)
	} else {
		line
	}
}

fn push_token(spans: &mut Vec<Span<'static>>, token: &AnnotatedToken, theme: &Theme, is_error: bool) {
	let base = if is_error {
		theme.error
	} else {
		token_color(&token.color).map_or_else(Style::new, |color| Style::new().fg(color))
	};

	for segment in &token.segments {
		if segment.text.is_empty() {
			continue;
		}
		let style = match segment.mark {
			Mark::Plain => base,
			Mark::Match => base.patch(theme.highlight),
			Mark::ActiveMatch => base.patch(theme.active_match),
		};
		spans.push(Span::styled(segment.text.replace('\t', TAB), style));
	}
}
