//! Structured search hits and the ordered set produced for one query.

use std::path::{Path, PathBuf};
use std::slice;

use serde::{Deserialize, Serialize};

/// A single matched line reported by the search tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
	/// `basename:line`, the primary text of a result row.
	pub label: String,
	/// Matched line content with surrounding whitespace trimmed.
	pub description: String,
	/// Path of the file containing the match, joined onto the project root.
	pub file_path: PathBuf,
	/// 1-based line number of the match.
	pub line: usize,
}

impl Hit {
	/// Build a hit from a root-relative path as printed by the search tool.
	#[must_use]
	pub fn new(root: &Path, relative: &str, line: usize, content: &str) -> Self {
		let relative = relative.strip_prefix("./").unwrap_or(relative);
		let basename = Path::new(relative)
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| relative.to_string());

		Self {
			label: format!("{basename}:{line}"),
			description: content.trim().to_string(),
			file_path: root.join(relative),
			line,
		}
	}
}

/// Hits for the current query, in the order the tool emitted them.
///
/// A set is replaced wholesale on every search and never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
	hits: Vec<Hit>,
}

impl ResultSet {
	/// An empty result set.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.hits.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.hits.is_empty()
	}

	#[must_use]
	pub fn get(&self, index: usize) -> Option<&Hit> {
		self.hits.get(index)
	}

	pub fn iter(&self) -> slice::Iter<'_, Hit> {
		self.hits.iter()
	}

	#[must_use]
	pub fn as_slice(&self) -> &[Hit] {
		&self.hits
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<Hit> {
		self.hits
	}
}

impl From<Vec<Hit>> for ResultSet {
	fn from(hits: Vec<Hit>) -> Self {
		Self { hits }
	}
}

impl FromIterator<Hit> for ResultSet {
	fn from_iter<I: IntoIterator<Item = Hit>>(iter: I) -> Self {
		Self {
			hits: iter.into_iter().collect(),
		}
	}
}

impl<'a> IntoIterator for &'a ResultSet {
	type Item = &'a Hit;
	type IntoIter = slice::Iter<'a, Hit>;

	fn into_iter(self) -> Self::IntoIter {
		self.hits.iter()
	}
}
