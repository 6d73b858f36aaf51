use std::path::Path;

/// Language identifier used when a file has no usable extension.
pub const PLAIN_TEXT: &str = "plaintext";

/// Language identifier for `path`: its lowercased extension, or [`PLAIN_TEXT`].
#[must_use]
pub fn language_for_path(path: &Path) -> String {
	path.extension()
		.and_then(|ext| ext.to_str())
		.filter(|ext| !ext.is_empty())
		.map(str::to_ascii_lowercase)
		.unwrap_or_else(|| PLAIN_TEXT.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extension_becomes_language() {
		assert_eq!(language_for_path(Path::new("/r/src/main.RS")), "rs");
		assert_eq!(language_for_path(Path::new("index.test.ts")), "ts");
	}

	#[test]
	fn missing_extension_falls_back_to_plain_text() {
		assert_eq!(language_for_path(Path::new("Makefile")), PLAIN_TEXT);
		assert_eq!(language_for_path(Path::new(".gitignore")), PLAIN_TEXT);
		assert_eq!(language_for_path(Path::new("trailing.")), PLAIN_TEXT);
	}
}
