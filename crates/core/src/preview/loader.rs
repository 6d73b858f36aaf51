//! Reading and tokenizing a previewed file.
//!
//! Every failure is folded into [`PreviewContent::failure`] so the preview
//! surface always has something to show.

use std::fs;
use std::path::Path;

use tracing::warn;

use super::language::language_for_path;
use super::request::{PreviewContent, PreviewRequest};
use crate::tokens::{Appearance, Tokenizer};

/// Files larger than this are not previewed.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;

/// Leading bytes inspected for NUL when sniffing binary content.
const BINARY_SNIFF_LEN: usize = 8192;

/// Load `request.file_path`, tokenize it, and package the result.
pub fn load_preview<T>(
	tokenizer: &T,
	request: &PreviewRequest,
	appearance: Appearance,
	max_file_bytes: u64,
) -> PreviewContent
where
	T: Tokenizer + ?Sized,
{
	let path = &request.file_path;
	let text = match read_source(path, max_file_bytes) {
		Ok(text) => text,
		Err(message) => {
			warn!(path = %path.display(), %message, "preview unavailable");
			return PreviewContent::failure(path, format!("Cannot read file:\n{message}"));
		}
	};

	let language = language_for_path(path);
	match tokenizer.tokenize(&text, &language, appearance) {
		Ok(lines) => PreviewContent::loaded(request, lines),
		Err(err) => {
			warn!(path = %path.display(), error = %err, "tokenization failed");
			PreviewContent::failure(path, format!("Cannot highlight file:\n{err}"))
		}
	}
}

/// Read a file as text, rejecting directories, oversized files, and binaries.
pub(super) fn read_source(path: &Path, max_file_bytes: u64) -> Result<String, String> {
	let metadata = fs::metadata(path).map_err(|err| err.to_string())?;
	if !metadata.is_file() {
		return Err("Not a file".to_string());
	}
	if metadata.len() > max_file_bytes {
		return Err(format!("File too large ({} KB)", metadata.len() / 1024));
	}

	let bytes = fs::read(path).map_err(|err| err.to_string())?;
	if is_binary(&bytes) {
		return Err("Binary file".to_string());
	}

	Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn is_binary(bytes: &[u8]) -> bool {
	let check_len = bytes.len().min(BINARY_SNIFF_LEN);
	bytes[..check_len].contains(&0)
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::*;
	use crate::tokens::{PlainTokenizer, Token, TokenLine, TokenizeError};

	fn request(path: PathBuf, line: usize) -> PreviewRequest {
		PreviewRequest {
			file_path: path,
			line,
			search_term: "todo".into(),
			sequence_id: 1,
		}
	}

	struct FailingTokenizer;

	impl Tokenizer for FailingTokenizer {
		fn tokenize(
			&self,
			_text: &str,
			_language: &str,
			_appearance: Appearance,
		) -> Result<Vec<TokenLine>, TokenizeError> {
			Err(TokenizeError::Highlighter("grammar exploded".into()))
		}
	}

	#[test]
	fn loads_and_tokenizes_text_files() {
		let dir = tempfile::tempdir().expect("temp dir");
		let path = dir.path().join("notes.txt");
		fs::write(&path, "first\n// TODO\nlast\n").expect("write");

		let content = load_preview(&PlainTokenizer, &request(path.clone(), 2), Appearance::Dark, 1024);
		assert!(!content.is_error());
		assert_eq!(content.file_path, path);
		assert_eq!(content.line, 2);
		assert_eq!(content.search_term, "todo");
		assert_eq!(content.token_lines[1], vec![Token::plain("// TODO")]);
	}

	#[test]
	fn missing_file_produces_failure_content() {
		let dir = tempfile::tempdir().expect("temp dir");
		let content = load_preview(
			&PlainTokenizer,
			&request(dir.path().join("gone.rs"), 3),
			Appearance::Dark,
			1024,
		);
		assert!(content.is_error());
		assert_eq!(content.line, 0);
		assert_eq!(content.token_lines[0], vec![Token::plain("Cannot read file:")]);
	}

	#[test]
	fn oversized_and_binary_files_are_rejected() {
		let dir = tempfile::tempdir().expect("temp dir");
		let big = dir.path().join("big.txt");
		fs::write(&big, vec![b'a'; 4096]).expect("write");
		let content = load_preview(&PlainTokenizer, &request(big, 1), Appearance::Dark, 1024);
		assert!(content.error.as_deref().is_some_and(|msg| msg.contains("File too large")));

		let binary = dir.path().join("blob.bin");
		fs::write(&binary, [0x7f, b'E', 0, 1]).expect("write");
		let content = load_preview(&PlainTokenizer, &request(binary, 1), Appearance::Dark, 1024);
		assert!(content.error.as_deref().is_some_and(|msg| msg.contains("Binary file")));
	}

	#[test]
	fn directories_are_not_previewed() {
		let dir = tempfile::tempdir().expect("temp dir");
		let content = load_preview(
			&PlainTokenizer,
			&request(dir.path().to_path_buf(), 1),
			Appearance::Dark,
			1024,
		);
		assert!(content.error.as_deref().is_some_and(|msg| msg.contains("Not a file")));
	}

	#[test]
	fn tokenizer_errors_become_failure_content() {
		let dir = tempfile::tempdir().expect("temp dir");
		let path = dir.path().join("a.rs");
		fs::write(&path, "fn main() {}\n").expect("write");
		let content = load_preview(&FailingTokenizer, &request(path, 1), Appearance::Light, 1024);
		assert!(content.error.as_deref().is_some_and(|msg| msg.contains("grammar exploded")));
	}
}
