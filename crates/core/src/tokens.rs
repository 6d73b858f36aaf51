//! Colored token lines and the tokenizer seam.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A run of text drawn in a single color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
	pub content: String,
	/// `#rrggbb`, or empty for the surface's default foreground.
	pub color: String,
}

impl Token {
	#[must_use]
	pub fn new(content: impl Into<String>, color: impl Into<String>) -> Self {
		Self {
			content: content.into(),
			color: color.into(),
		}
	}

	/// A token drawn in the default foreground.
	#[must_use]
	pub fn plain(content: impl Into<String>) -> Self {
		Self::new(content, String::new())
	}
}

/// One source line as colored fragments. An empty line is an empty vector but
/// still occupies a rendered row.
pub type TokenLine = Vec<Token>;

/// Host color scheme, selecting the dark or light variant of a theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
	#[default]
	Dark,
	Light,
}

impl Appearance {
	#[must_use]
	pub fn toggled(self) -> Self {
		match self {
			Self::Dark => Self::Light,
			Self::Light => Self::Dark,
		}
	}

	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Dark => "dark",
			Self::Light => "light",
		}
	}
}

impl fmt::Display for Appearance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Error)]
#[error("unknown appearance `{0}` (expected `dark` or `light`)")]
pub struct ParseAppearanceError(String);

impl FromStr for Appearance {
	type Err = ParseAppearanceError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"dark" => Ok(Self::Dark),
			"light" => Ok(Self::Light),
			_ => Err(ParseAppearanceError(value.to_string())),
		}
	}
}

#[derive(Debug, Error)]
pub enum TokenizeError {
	#[error("syntax highlighting failed: {0}")]
	Highlighter(String),
}

/// Converts raw file text into colored token lines.
///
/// `language` is an identifier derived from the file extension, or
/// [`crate::preview::PLAIN_TEXT`] when none applies. Implementations must
/// return exactly one token line per source line.
pub trait Tokenizer {
	fn tokenize(
		&self,
		text: &str,
		language: &str,
		appearance: Appearance,
	) -> Result<Vec<TokenLine>, TokenizeError>;
}

/// Tokenizer that leaves every line uncolored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
	fn tokenize(
		&self,
		text: &str,
		_language: &str,
		_appearance: Appearance,
	) -> Result<Vec<TokenLine>, TokenizeError> {
		Ok(plain_lines(text))
	}
}

/// Split `text` into uncolored token lines.
#[must_use]
pub fn plain_lines(text: &str) -> Vec<TokenLine> {
	text.lines()
		.map(|line| {
			if line.is_empty() {
				Vec::new()
			} else {
				vec![Token::plain(line)]
			}
		})
		.collect()
}
