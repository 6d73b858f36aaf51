//! The query line: prompt marker, editor, and search status.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::input::QueryInput;
use crate::style::Theme;

const PROMPT: &str = "> ";

pub struct PromptContext<'a> {
	pub input: &'a QueryInput,
	pub area: Rect,
	pub theme: &'a Theme,
}

/// What the right side of the prompt reports.
pub struct PromptStatus<'a> {
	pub searching: bool,
	/// Result counter, shown when no search is running.
	pub label: &'a str,
	pub throbber_state: &'a ThrobberState,
}

pub fn render_prompt(frame: &mut Frame, prompt: PromptContext<'_>, status: PromptStatus<'_>) {
	let PromptContext { input, area, theme } = prompt;
	let status_line = status_line(&status, theme);
	let status_width = u16::try_from(status_line.width()).unwrap_or(u16::MAX);

	let [marker_area, input_area, status_area] = Layout::horizontal([
		Constraint::Length(PROMPT.len() as u16),
		Constraint::Fill(1),
		Constraint::Length(status_width.saturating_add(1)),
	])
	.areas(area);

	frame.render_widget(Paragraph::new(Span::styled(PROMPT, theme.prompt)), marker_area);
	input.render(frame, input_area);
	frame.render_widget(Paragraph::new(status_line).right_aligned(), status_area);
}

fn status_line<'a>(status: &PromptStatus<'a>, theme: &Theme) -> Line<'a> {
	if status.searching {
		let throbber = Throbber::default()
			.style(theme.empty)
			.throbber_style(theme.empty);
		let mut line = Line::from(throbber.to_symbol_span(status.throbber_state));
		line.spans.push(Span::styled("searching", theme.empty));
		return line;
	}
	Line::from(Span::styled(status.label, theme.empty))
}
