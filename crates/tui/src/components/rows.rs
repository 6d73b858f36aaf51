//! Results table rows with search-term highlighting.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Row};
use telegrep_core::{HighlightEngine, Hit};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: char = '…';

/// One row per hit: its `file:line` label and the matched line, truncated to
/// `description_width` columns with matches styled by `match_style`.
#[must_use]
pub fn build_result_rows<'a>(
	hits: &'a [Hit],
	engine: &HighlightEngine,
	match_style: Style,
	description_width: Option<u16>,
) -> Vec<Row<'a>> {
	hits.iter()
		.map(|hit| {
			let description = match description_width {
				Some(width) => truncate(&hit.description, usize::from(width)),
				None => hit.description.clone(),
			};
			Row::new([
				Cell::from(hit.label.as_str()),
				Cell::from(highlight_text(description, engine, match_style)),
			])
		})
		.collect()
}

/// Split `text` into plain and `match_style` spans.
#[must_use]
pub fn highlight_text(text: String, engine: &HighlightEngine, match_style: Style) -> Line<'static> {
	let ranges = engine.match_ranges(&text);
	if ranges.is_empty() {
		return Line::from(text);
	}

	let mut spans = Vec::with_capacity(ranges.len() * 2 + 1);
	let mut cursor = 0;
	for range in ranges {
		if range.start > cursor {
			spans.push(Span::raw(text[cursor..range.start].to_string()));
		}
		spans.push(Span::styled(text[range.clone()].to_string(), match_style));
		cursor = range.end;
	}
	if cursor < text.len() {
		spans.push(Span::raw(text[cursor..].to_string()));
	}
	Line::from(spans)
}

fn truncate(text: &str, width: usize) -> String {
	if text.width() <= width {
		return text.to_string();
	}
	if width == 0 {
		return String::new();
	}
	let (kept, _) = text.unicode_truncate(width - 1);
	format!("{kept}{ELLIPSIS}")
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use ratatui::style::Modifier;

	use super::*;

	#[test]
	fn matches_are_styled_and_rest_is_plain() {
		let style = Style::new().add_modifier(Modifier::BOLD);
		let line = highlight_text("let todo = TODO;".into(), &HighlightEngine::new("todo"), style);
		let styled: Vec<(&str, bool)> = line
			.spans
			.iter()
			.map(|span| (span.content.as_ref(), span.style == style))
			.collect();
		assert_eq!(
			styled,
			vec![("let ", false), ("todo", true), (" = ", false), ("TODO", true), (";", false)]
		);
	}

	#[test]
	fn long_descriptions_are_truncated_with_ellipsis() {
		assert_eq!(truncate("abcdefgh", 5), "abcd…");
		assert_eq!(truncate("abc", 5), "abc");
		assert_eq!(truncate("日本語テキスト", 5), "日本…");
	}

	#[test]
	fn one_row_per_hit() {
		let hits = vec![
			Hit::new(Path::new("/r"), "a.rs", 1, "x"),
			Hit::new(Path::new("/r"), "b.rs", 2, "y"),
		];
		let rows = build_result_rows(&hits, &HighlightEngine::default(), Style::new(), Some(10));
		assert_eq!(rows.len(), 2);
	}
}
