//! Search-term highlighting layered over colored tokens.
//!
//! The term is split into word-like fragments (runs of alphanumerics and `_`)
//! and each fragment lights up on its own, case-insensitively. Matching runs
//! inside one token at a time, so a match that straddles two tokens is not
//! marked. Token colors pass through untouched: a token becomes a list of
//! segments whose text concatenates back to the original content.

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use tracing::warn;
use serde::Serialize;

use crate::tokens::{Token, TokenLine};

/// How a segment of token text is decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Mark {
	Plain,
	/// Search-term match.
	Match,
	/// Search-term match on the preview's target line.
	ActiveMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
	pub text: String,
	pub mark: Mark,
}

/// A token split into plain and marked segments, keeping its color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedToken {
	pub color: String,
	pub segments: Vec<Segment>,
}

pub type AnnotatedLine = Vec<AnnotatedToken>;

/// Compiled matcher for one search term.
#[derive(Debug, Clone, Default)]
pub struct HighlightEngine {
	pattern: Option<Regex>,
}

impl HighlightEngine {
	#[must_use]
	pub fn new(term: &str) -> Self {
		let fragments = fragments(term);
		if fragments.is_empty() {
			return Self::default();
		}

		let alternation = fragments
			.iter()
			.map(|fragment| regex::escape(fragment))
			.collect::<Vec<_>>()
			.join("|");
		let pattern = match RegexBuilder::new(&alternation).case_insensitive(true).build() {
			Ok(pattern) => Some(pattern),
			Err(err) => {
				warn!(error = %err, fragments = fragments.len(), "search term too large to highlight");
				None
			}
		};

		Self { pattern }
	}

	/// Whether the term produced anything to match.
	#[must_use]
	pub fn is_active(&self) -> bool {
		self.pattern.is_some()
	}

	/// Byte ranges of every match in `text`.
	#[must_use]
	pub fn match_ranges(&self, text: &str) -> Vec<Range<usize>> {
		match &self.pattern {
			Some(pattern) => pattern.find_iter(text).map(|m| m.range()).collect(),
			None => Vec::new(),
		}
	}

	#[must_use]
	pub fn annotate_token(&self, token: &Token, active: bool) -> AnnotatedToken {
		let mark = if active { Mark::ActiveMatch } else { Mark::Match };
		let mut segments = Vec::new();
		let mut cursor = 0;

		for range in self.match_ranges(&token.content) {
			if range.start > cursor {
				segments.push(Segment {
					text: token.content[cursor..range.start].to_string(),
					mark: Mark::Plain,
				});
			}
			segments.push(Segment {
				text: token.content[range.clone()].to_string(),
				mark,
			});
			cursor = range.end;
		}

		if cursor < token.content.len() || segments.is_empty() {
			segments.push(Segment {
				text: token.content[cursor..].to_string(),
				mark: Mark::Plain,
			});
		}

		AnnotatedToken {
			color: token.color.clone(),
			segments,
		}
	}

	#[must_use]
	pub fn annotate_line(&self, line: &TokenLine, active: bool) -> AnnotatedLine {
		line.iter()
			.map(|token| self.annotate_token(token, active))
			.collect()
	}
}

/// Word-like fragments of `term`, longest first and without duplicates.
///
/// Longer fragments come first so that an alternation prefers `foobar` over
/// `foo` when both start at the same position.
#[must_use]
pub fn fragments(term: &str) -> Vec<String> {
	let mut fragments: Vec<String> = term
		.split(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
		.filter(|fragment| !fragment.is_empty())
		.map(str::to_string)
		.collect();
	fragments.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
	fragments.dedup();
	fragments
}
