use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::tokens::{Token, TokenLine};

/// A versioned request to load and tokenize one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
	pub file_path: PathBuf,
	/// 1-based target line.
	pub line: usize,
	/// Search term as typed when the request was issued.
	pub search_term: String,
	/// Strictly increasing; only the latest issued id is authoritative.
	pub sequence_id: u64,
}

/// Tokenized file contents plus what is needed to highlight them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewContent {
	pub file_path: PathBuf,
	pub token_lines: Vec<TokenLine>,
	/// 1-based target line, or `0` when there is none.
	pub line: usize,
	pub search_term: String,
	/// Set when the lines describe a failure instead of file contents.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl PreviewContent {
	/// Successfully tokenized contents for `request`.
	#[must_use]
	pub fn loaded(request: &PreviewRequest, token_lines: Vec<TokenLine>) -> Self {
		Self {
			file_path: request.file_path.clone(),
			token_lines,
			line: request.line,
			search_term: request.search_term.clone(),
			error: None,
		}
	}

	/// Content that shows `message` in place of the file, with no target line.
	#[must_use]
	pub fn failure(file_path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
		let message = message.into();
		let token_lines = message
			.lines()
			.map(|line| vec![Token::plain(line)])
			.collect();
		Self {
			file_path: file_path.into(),
			token_lines,
			line: 0,
			search_term: String::new(),
			error: Some(message),
		}
	}

	#[must_use]
	pub fn is_error(&self) -> bool {
		self.error.is_some()
	}

	#[must_use]
	pub fn line_count(&self) -> usize {
		self.token_lines.len()
	}
}

/// Worker output tagged with the id of the request it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewResponse {
	pub sequence_id: u64,
	pub content: PreviewContent,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn failure_content_has_visible_lines_and_no_target() {
		let content = PreviewContent::failure("/r/a.rs", "Cannot read file:\npermission denied");
		assert!(content.is_error());
		assert_eq!(content.line, 0);
		assert_eq!(content.line_count(), 2);
		assert_eq!(content.token_lines[1], vec![Token::plain("permission denied")]);
	}
}
