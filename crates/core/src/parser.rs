//! Conversion of `--vimgrep` output into structured hits.
//!
//! Every line has the shape `<path>:<line>:<column>:<content>`. The content is
//! everything after the third colon, so colons inside the matched text survive.
//! Lines that do not fit the shape are skipped without reporting an error.

use std::path::Path;

use crate::hit::{Hit, ResultSet};

/// Parse raw tool output into hits, preserving output order.
#[must_use]
pub fn parse_output(stdout: &str, root: &Path) -> ResultSet {
	stdout
		.lines()
		.filter(|line| !line.is_empty())
		.filter_map(|line| parse_line(line, root))
		.collect()
}

/// Parse a single output line, returning `None` for malformed input.
#[must_use]
pub fn parse_line(line: &str, root: &Path) -> Option<Hit> {
	let mut fields = line.splitn(4, ':');
	let path = fields.next().filter(|path| !path.is_empty())?;
	let line_number = fields.next()?;
	let _column = fields.next()?;
	let content = fields.next()?;

	let line_number = line_number
		.trim()
		.parse::<usize>()
		.ok()
		.filter(|number| *number > 0)?;

	Some(Hit::new(root, path, line_number, content))
}
