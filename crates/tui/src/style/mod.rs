//! Visual styling: bundled themes and conversion of token colors.

pub mod theme;

use ratatui::style::Color;
use telegrep_core::Appearance;
pub use theme::{Theme, ThemeRegistration, builtin_themes, by_name, counterpart, for_appearance, names};

/// The active theme together with what it was chosen from.
#[derive(Clone, Debug)]
pub struct StyleConfig {
	pub theme: Theme,
	pub name: String,
	pub appearance: Appearance,
	pub bat_theme: String,
}

impl StyleConfig {
	#[must_use]
	pub fn from_registration(registration: &ThemeRegistration) -> Self {
		Self {
			theme: registration.theme,
			name: registration.name.clone(),
			appearance: registration.appearance,
			bat_theme: registration.bat_theme.clone(),
		}
	}

	/// The style of the counterpart theme for the opposite appearance.
	#[must_use]
	pub fn toggled(&self) -> Self {
		let current = by_name(&self.name).unwrap_or_else(|| for_appearance(self.appearance));
		Self::from_registration(counterpart(current))
	}

	/// bat theme names to highlight with in dark and light appearance.
	#[must_use]
	pub fn bat_themes(&self) -> (String, String) {
		let other = self.toggled();
		match self.appearance {
			Appearance::Dark => (self.bat_theme.clone(), other.bat_theme),
			Appearance::Light => (other.bat_theme, self.bat_theme.clone()),
		}
	}
}

impl Default for StyleConfig {
	fn default() -> Self {
		Self::from_registration(for_appearance(Appearance::default()))
	}
}

/// Terminal color for a token color string; `None` for the default color.
#[must_use]
pub fn token_color(color: &str) -> Option<Color> {
	if color.is_empty() {
		return None;
	}
	theme::parse_color(color).ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn token_colors_map_to_rgb() {
		assert_eq!(token_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
		assert_eq!(token_color(""), None);
		assert_eq!(token_color("not a color"), None);
	}

	#[test]
	fn toggling_round_trips() {
		let dark = StyleConfig::default();
		let light = dark.toggled();
		assert_eq!(light.appearance, Appearance::Light);
		assert_eq!(light.toggled().name, dark.name);
	}

	#[test]
	fn bat_themes_are_ordered_dark_then_light() {
		let dark = StyleConfig::default();
		let (for_dark, for_light) = dark.bat_themes();
		assert_eq!(for_dark, dark.bat_theme);
		assert_eq!(for_light, dark.toggled().bat_theme);
		assert_eq!(dark.toggled().bat_themes(), (for_dark, for_light));
	}
}
