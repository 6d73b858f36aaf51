//! Single-line query editor built on `tui-textarea`.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::{Input, TextArea};

pub struct QueryInput {
	textarea: TextArea<'static>,
}

impl Default for QueryInput {
	fn default() -> Self {
		Self::new("")
	}
}

impl QueryInput {
	#[must_use]
	pub fn new(initial: &str) -> Self {
		let mut textarea = TextArea::default();
		textarea.set_cursor_line_style(Style::default());
		textarea.insert_str(single_line(initial));
		Self { textarea }
	}

	#[must_use]
	pub fn text(&self) -> &str {
		self.textarea
			.lines()
			.first()
			.map(String::as_str)
			.unwrap_or_default()
	}

	/// Feed a key to the editor. Returns `true` if the text changed.
	///
	/// Keys that would add a second line are swallowed.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		let newline = matches!(key.code, KeyCode::Enter)
			|| (key.modifiers.contains(KeyModifiers::CONTROL)
				&& matches!(key.code, KeyCode::Char('m' | 'j')));
		if newline {
			return false;
		}

		let before = self.text().to_owned();
		self.textarea.input(Input::from(key));
		self.text() != before
	}

	pub fn set_placeholder(&mut self, placeholder: &str, style: Style) {
		self.textarea.set_placeholder_text(placeholder);
		self.textarea.set_placeholder_style(style);
	}

	pub fn render(&self, frame: &mut Frame, area: Rect) {
		frame.render_widget(&self.textarea, area);
	}
}

fn single_line(text: &str) -> &str {
	text.lines().next().unwrap_or_default()
}
