use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::App;
use crate::config::Outcome;

/// Rows moved by one wheel notch over the preview.
const WHEEL_LINES: usize = 3;

impl App {
	/// Process a key press. Returns the outcome when the session ends.
	pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Option<Outcome> {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Esc => return Some(self.outcome(None)),
			KeyCode::Char('c') if ctrl => return Some(self.outcome(None)),
			KeyCode::Enter => {
				if let Some(target) = self.session.open_selected() {
					return Some(self.outcome(Some(target)));
				}
			}
			KeyCode::Char('p') if ctrl => self.toggle_preview(),
			KeyCode::Char('t') if ctrl => self.toggle_appearance(),
			KeyCode::Up => self.move_selection_up(),
			KeyCode::Char('k') if ctrl => self.move_selection_up(),
			KeyCode::Down => self.move_selection_down(),
			KeyCode::Char('j') if ctrl => self.move_selection_down(),
			KeyCode::PageUp if self.preview.enabled => {
				let page = self.preview.page();
				self.preview.scroll_up(page);
			}
			KeyCode::PageDown if self.preview.enabled => {
				let page = self.preview.page();
				self.preview.scroll_down(page);
			}
			_ => {
				if self.search_input.input(key) {
					self.request_search();
				}
			}
		}
		None
	}

	/// Process a mouse event. Returns the outcome when a click opens a hit.
	pub(crate) fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Outcome> {
		self.preview.update_hover(mouse.column, mouse.row);
		self.results.update_hover(mouse.column, mouse.row);

		match mouse.kind {
			MouseEventKind::ScrollUp if self.preview.hovered => self.preview.scroll_up(WHEEL_LINES),
			MouseEventKind::ScrollDown if self.preview.hovered => self.preview.scroll_down(WHEEL_LINES),
			MouseEventKind::ScrollUp if self.results.hovered => self.move_selection_up(),
			MouseEventKind::ScrollDown if self.results.hovered => self.move_selection_down(),
			MouseEventKind::Down(MouseButton::Left) if self.results.hovered => {
				if let Some(target) = self.activate_result_at(mouse.row) {
					return Some(self.outcome(Some(target)));
				}
			}
			_ => {}
		}
		None
	}
}

#[cfg(test)]
mod tests {
	use ratatui::layout::Rect;

	use super::*;
	use crate::app::state::tests::{hit, search, test_app};

	fn press(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	fn ctrl(ch: char) -> KeyEvent {
		KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
	}

	fn click(column: u16, row: u16) -> MouseEvent {
		MouseEvent {
			kind: MouseEventKind::Down(MouseButton::Left),
			column,
			row,
			modifiers: KeyModifiers::NONE,
		}
	}

	#[test]
	fn escape_cancels_with_the_query() {
		let mut app = test_app();
		for ch in "fix".chars() {
			app.handle_key(press(KeyCode::Char(ch)));
		}
		let outcome = app.handle_key(press(KeyCode::Esc)).expect("cancelled");
		assert!(!outcome.accepted);
		assert_eq!(outcome.query, "fix");
		assert_eq!(outcome.target, None);
		assert!(app.session.is_searching());
	}

	#[test]
	fn enter_opens_the_selected_hit() {
		let mut app = test_app();
		assert_eq!(app.handle_key(press(KeyCode::Enter)), None, "nothing selected");

		search(&mut app, "todo", vec![hit("a.rs", 1, "todo"), hit("b.rs", 4, "todo")]);
		app.handle_key(ctrl('j'));
		let outcome = app.handle_key(press(KeyCode::Enter)).expect("opened");
		assert!(outcome.accepted);
		let target = outcome.target.expect("target");
		assert!(target.file_path.ends_with("b.rs"));
		assert_eq!(target.zero_based_line(), 3);
	}

	#[test]
	fn arrows_move_within_bounds() {
		let mut app = test_app();
		search(&mut app, "x", vec![hit("a.rs", 1, "x"), hit("b.rs", 2, "x")]);
		app.handle_key(press(KeyCode::Up));
		assert_eq!(app.session.selection().index(), Some(0));
		app.handle_key(press(KeyCode::Down));
		app.handle_key(press(KeyCode::Down));
		assert_eq!(app.session.selection().index(), Some(1));
		app.handle_key(ctrl('k'));
		assert_eq!(app.session.selection().index(), Some(0));
	}

	#[test]
	fn ctrl_p_toggles_the_preview() {
		let mut app = test_app();
		assert!(app.preview.enabled);
		app.handle_key(ctrl('p'));
		assert!(!app.preview.enabled);
		app.handle_key(ctrl('p'));
		assert!(app.preview.enabled);
	}

	#[test]
	fn double_click_opens() {
		let mut app = test_app();
		search(&mut app, "x", vec![hit("a.rs", 1, "x"), hit("b.rs", 2, "x")]);
		app.results.area = Some(Rect::new(0, 1, 40, 10));

		assert_eq!(app.handle_mouse(click(5, 5)), None);
		let outcome = app.handle_mouse(click(5, 5)).expect("opened");
		assert!(outcome.target.is_some_and(|target| target.line == 2));
	}
}
