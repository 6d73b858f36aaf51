use ratatui::style::{Color, Style};
use telegrep_core::Appearance;

/// Styles for every element of the terminal UI.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
	/// Borders, table headers, and separators.
	pub header: Style,
	/// The selected results row.
	pub row_highlight: Style,
	/// The `>` marker in front of the query.
	pub prompt: Style,
	/// Placeholders, counters, and other muted text.
	pub empty: Style,
	/// Search-term matches.
	pub highlight: Style,
	/// Search-term matches on the preview's target line.
	pub active_match: Style,
	/// Background of the preview's target line.
	pub active_line: Style,
	/// Preview gutter.
	pub line_number: Style,
	/// Search failures and unreadable previews.
	pub error: Style,
}

impl Theme {
	#[must_use]
	pub fn border_style(&self) -> Style {
		Style::new().fg(self.header.fg.unwrap_or(Color::Reset))
	}
}

/// A named theme bundled with the application.
#[derive(Debug, Clone)]
pub struct ThemeRegistration {
	pub name: String,
	pub theme: Theme,
	pub aliases: Vec<String>,
	/// Host color scheme this theme is designed for.
	pub appearance: Appearance,
	/// bat theme used for syntax colors in the preview.
	pub bat_theme: String,
	/// Theme to switch to when the appearance flips.
	pub counterpart: Option<String>,
}

impl ThemeRegistration {
	pub fn new(
		name: impl Into<String>,
		theme: Theme,
		appearance: Appearance,
		bat_theme: impl Into<String>,
	) -> Self {
		Self {
			name: name.into(),
			theme,
			aliases: Vec::new(),
			appearance,
			bat_theme: bat_theme.into(),
			counterpart: None,
		}
	}

	pub fn alias(mut self, alias: impl Into<String>) -> Self {
		self.aliases.push(alias.into());
		self
	}

	pub fn with_counterpart(mut self, counterpart: impl Into<String>) -> Self {
		self.counterpart = Some(counterpart.into());
		self
	}

	/// Whether `name` refers to this theme, ignoring case, `-`, and `_`.
	#[must_use]
	pub fn answers_to(&self, name: &str) -> bool {
		let wanted = normalize_name(name);
		normalize_name(&self.name) == wanted
			|| self.aliases.iter().any(|alias| normalize_name(alias) == wanted)
	}
}

pub(crate) fn normalize_name(name: &str) -> String {
	name.trim()
		.chars()
		.filter(|ch| !matches!(ch, '-' | '_' | ' '))
		.flat_map(char::to_lowercase)
		.collect()
}
