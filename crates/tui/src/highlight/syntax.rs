use std::cell::RefCell;
use std::io::Cursor;

use bat::WrappingMode;
use bat::assets::HighlightingAssets;
use bat::config::{Config, VisibleLines};
use bat::controller::Controller;
use bat::input::Input;
use bat::line_range::LineRanges;
use bat::style::StyleComponents;
use telegrep_core::preview::PLAIN_TEXT;
use telegrep_core::tokens::plain_lines;
use telegrep_core::{Appearance, TokenLine, TokenizeError, Tokenizer};
use tracing::debug;

use super::ansi::parse_ansi;

/// Tokenizer backed by bat's bundled syntaxes and themes.
///
/// Loading the assets is slow and the result is not `Send`, so build this on
/// the thread that uses it.
pub struct BatTokenizer {
	assets: HighlightingAssets,
	dark_theme: String,
	light_theme: String,
}

impl BatTokenizer {
	/// `dark_theme` and `light_theme` are bat theme names.
	#[must_use]
	pub fn new(dark_theme: impl Into<String>, light_theme: impl Into<String>) -> Self {
		Self {
			assets: HighlightingAssets::from_binary(),
			dark_theme: dark_theme.into(),
			light_theme: light_theme.into(),
		}
	}

	fn theme(&self, appearance: Appearance) -> &str {
		match appearance {
			Appearance::Dark => &self.dark_theme,
			Appearance::Light => &self.light_theme,
		}
	}

	fn highlight(&self, text: &str, language: &str, appearance: Appearance) -> Result<String, TokenizeError> {
		let config = Config {
			language: Some(language),
			colored_output: true,
			true_color: true,
			style_components: StyleComponents::default(),
			theme: self.theme(appearance).to_string(),
			visible_lines: VisibleLines::Ranges(LineRanges::all()),
			wrapping_mode: WrappingMode::NoWrapping(true),
			term_width: 120,
			// Tabs pass through; the preview pane expands them when drawing.
			tab_width: 0,
			..Default::default()
		};

		let controller = Controller::new(&config, &self.assets);
		let input = Input::from_reader(Box::new(Cursor::new(text.to_owned())));
		let failure = RefCell::new(None);
		let mut buffer = String::new();

		let succeeded = controller
			.run_with_error_handler(vec![input], Some(&mut buffer), |err, _| {
				*failure.borrow_mut() = Some(err.to_string());
			})
			.map_err(|err| TokenizeError::Highlighter(err.to_string()))?;

		if succeeded {
			Ok(buffer)
		} else {
			let message = failure
				.into_inner()
				.unwrap_or_else(|| "bat reported an error".to_string());
			Err(TokenizeError::Highlighter(message))
		}
	}
}

impl Tokenizer for BatTokenizer {
	/// Unknown languages and bat failures fall back to uncolored lines.
	fn tokenize(
		&self,
		text: &str,
		language: &str,
		appearance: Appearance,
	) -> Result<Vec<TokenLine>, TokenizeError> {
		if language == PLAIN_TEXT {
			return Ok(plain_lines(text));
		}

		match self.highlight(text, language, appearance) {
			Ok(output) => Ok(parse_ansi(&output)),
			Err(err) => {
				debug!(%language, error = %err, "highlighting unavailable, using plain text");
				Ok(plain_lines(text))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokenizer() -> BatTokenizer {
		BatTokenizer::new("OneHalfDark", "OneHalfLight")
	}

	fn text_of(line: &TokenLine) -> String {
		line.iter().map(|token| token.content.as_str()).collect()
	}

	#[test]
	fn rust_source_gets_colors_and_keeps_text() {
		let source = "fn main() {\n\tlet answer = 42;\n}\n";
		let lines = tokenizer()
			.tokenize(source, "rs", Appearance::Dark)
			.expect("tokenize");

		assert_eq!(lines.len(), 3);
		assert_eq!(text_of(&lines[0]), "fn main() {");
		assert_eq!(text_of(&lines[1]), "\tlet answer = 42;");
		assert!(lines[0].iter().any(|token| token.color.starts_with('#')));
	}

	#[test]
	fn token_text_matches_source_bytes() {
		let source = "def f():\n\treturn  1\t# two spaces, a tab\n";
		let lines = tokenizer()
			.tokenize(source, "py", Appearance::Dark)
			.expect("tokenize");
		let texts: Vec<String> = lines.iter().map(text_of).collect();
		assert_eq!(texts, vec!["def f():", "\treturn  1\t# two spaces, a tab"]);
	}

	#[test]
	fn appearance_changes_colors() {
		let tokenizer = tokenizer();
		let dark = tokenizer.tokenize("fn main() {}\n", "rs", Appearance::Dark).expect("dark");
		let light = tokenizer.tokenize("fn main() {}\n", "rs", Appearance::Light).expect("light");
		assert_eq!(text_of(&dark[0]), text_of(&light[0]));
		assert_ne!(dark, light);
	}

	#[test]
	fn unknown_language_falls_back_to_plain_lines() {
		let lines = tokenizer()
			.tokenize("alpha\nbeta\n", "definitely-not-a-language", Appearance::Dark)
			.expect("tokenize");
		assert_eq!(lines, plain_lines("alpha\nbeta\n"));
	}
}
