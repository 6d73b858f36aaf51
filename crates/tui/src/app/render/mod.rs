pub(crate) mod layout;

use layout::{resolve_column_widths, result_columns};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Margin, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use telegrep_core::HighlightEngine;

use super::App;
use crate::components::rows::build_result_rows;
use crate::components::tables::TABLE_HEADER_ROWS;
use crate::components::{
	PreviewContext, PromptContext, PromptStatus, TableSpec, render_preview, render_prompt, render_table,
};

impl App {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area().inner(Margin {
			vertical: 0,
			horizontal: 1,
		});
		let [prompt_area, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(area);

		let label = self.ui.count_label(self.session.selection().len());
		render_prompt(
			frame,
			PromptContext {
				input: &self.search_input,
				area: prompt_area,
				theme: &self.style.theme,
			},
			PromptStatus {
				searching: self.session.is_searching(),
				label: &label,
				throbber_state: &self.throbber_state,
			},
		);

		self.results.sync_selection(self.session.selection().index());
		if self.preview.enabled {
			let [results_area, preview_area] =
				Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);
			self.results.area = Some(results_area);
			self.preview.area = Some(preview_area);
			self.render_results(frame, results_area);
			self.render_preview_pane(frame, preview_area);
		} else {
			self.preview.area = None;
			self.results.area = Some(body);
			self.render_results(frame, body);
		}
	}

	fn render_results(&mut self, frame: &mut Frame, area: Rect) {
		if let Some(message) = self.session.error() {
			self.results.scrollbar_area = None;
			let block = Block::default()
				.borders(Borders::ALL)
				.border_set(ratatui::symbols::border::ROUNDED)
				.border_style(self.style.theme.border_style())
				.title(format!(" {} ", self.ui.title));
			let text = Paragraph::new(Span::styled(message, self.style.theme.error))
				.block(block)
				.wrap(Wrap { trim: false });
			frame.render_widget(text, area);
			return;
		}

		let hits = self.session.selection().items().as_slice();
		let widths = result_columns(area, hits, &self.ui.headers[0]);
		let resolved = resolve_column_widths(area, &widths, self.results.table_state.selected().is_some());
		let engine = HighlightEngine::new(self.session.query());
		let rows = build_result_rows(hits, &engine, self.style.theme.highlight, resolved.get(1).copied());

		let spec = TableSpec {
			headers: self.ui.headers.to_vec(),
			widths: widths.to_vec(),
			rows,
			title: Some(self.ui.title.clone()),
		};
		self.results.scrollbar_area =
			render_table(frame, area, &mut self.results.table_state, spec, &self.style.theme);

		let finished_empty =
			hits.is_empty() && !self.session.query().is_empty() && !self.session.is_searching();
		if finished_empty {
			self.render_no_results(frame, area);
		}
	}

	fn render_no_results(&self, frame: &mut Frame, area: Rect) {
		let body = area.inner(Margin {
			vertical: 1,
			horizontal: 1,
		});
		let header_rows = TABLE_HEADER_ROWS as u16;
		if body.height <= header_rows {
			return;
		}
		let message_area = Rect {
			y: body.y + header_rows,
			height: body.height - header_rows,
			..body
		};
		let message = Paragraph::new(Line::from(Span::styled(
			self.ui.no_results.as_str(),
			self.style.theme.empty,
		)))
		.alignment(Alignment::Center);
		frame.render_widget(message, message_area);
	}

	fn render_preview_pane(&mut self, frame: &mut Frame, area: Rect) {
		let viewport_height = usize::from(area.height.saturating_sub(2));
		self.preview
			.prepare(self.session.displayed(), viewport_height, &self.style);

		let title = match self.session.displayed() {
			Some(content) => {
				let path = match &self.root {
					Some(root) => content.file_path.strip_prefix(root).unwrap_or(content.file_path.as_path()),
					None => content.file_path.as_path(),
				};
				path.display().to_string()
			}
			None => self.ui.preview_title.clone(),
		};

		let scrollbar_area = render_preview(
			frame,
			area,
			PreviewContext {
				title: &title,
				lines: self.preview.lines(),
				scroll: self.preview.scroll,
				placeholder: &self.ui.no_selection,
				theme: &self.style.theme,
			},
		);
		self.preview.scrollbar_area = scrollbar_area;
	}
}
