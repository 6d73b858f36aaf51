mod builtins;
mod types;

pub(crate) use builtins::parse_color;
use telegrep_core::Appearance;
pub use types::{Theme, ThemeRegistration};

/// Every theme bundled with the application, sorted by file name.
#[must_use]
pub fn builtin_themes() -> &'static [ThemeRegistration] {
	builtins::registrations()
}

/// Look up a bundled theme by name or alias.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static ThemeRegistration> {
	builtin_themes().iter().find(|theme| theme.answers_to(name))
}

/// The theme used when only the host appearance is known.
#[must_use]
pub fn for_appearance(appearance: Appearance) -> &'static ThemeRegistration {
	builtins::default_for(appearance)
}

/// The theme to switch to when the appearance flips away from `theme`.
#[must_use]
pub fn counterpart(theme: &ThemeRegistration) -> &'static ThemeRegistration {
	theme
		.counterpart
		.as_deref()
		.and_then(by_name)
		.filter(|other| other.appearance != theme.appearance)
		.unwrap_or_else(|| for_appearance(theme.appearance.toggled()))
}

#[must_use]
pub fn names() -> Vec<&'static str> {
	builtin_themes()
		.iter()
		.map(|theme| theme.name.as_str())
		.collect()
}

impl Default for Theme {
	fn default() -> Self {
		for_appearance(Appearance::default()).theme
	}
}
