mod loader;

use std::sync::OnceLock;

use include_dir::{Dir, include_dir};
use loader::{BuiltinThemes, load_builtin_themes};
pub(crate) use loader::parse_color;
use telegrep_core::Appearance;

use crate::style::theme::types::ThemeRegistration;

const BUILTIN_THEME_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/style/theme/builtins/themes");

pub(super) fn registrations() -> &'static [ThemeRegistration] {
	&builtin_themes().registrations
}

pub(super) fn default_for(appearance: Appearance) -> &'static ThemeRegistration {
	builtin_themes().default_for(appearance)
}

fn builtin_themes() -> &'static BuiltinThemes {
	static BUILTINS: OnceLock<BuiltinThemes> = OnceLock::new();
	BUILTINS.get_or_init(|| {
		load_builtin_themes(&BUILTIN_THEME_DIR)
			.unwrap_or_else(|error| panic!("failed to load built-in themes: {error:#}"))
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bundled_themes_load() {
		let themes = load_builtin_themes(&BUILTIN_THEME_DIR).expect("built-in themes");
		assert!(themes.registrations.len() >= 2);
		assert_eq!(themes.default_for(Appearance::Dark).appearance, Appearance::Dark);
		assert_eq!(themes.default_for(Appearance::Light).appearance, Appearance::Light);
	}
}
