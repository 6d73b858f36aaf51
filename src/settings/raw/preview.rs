use serde::Deserialize;
use telegrep_core::preview::{DEFAULT_MAX_FILE_BYTES, DEFAULT_PREVIEW_DEBOUNCE};

use crate::cli::CliArgs;

/// `[preview]`: debounce, visibility, and size limit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct PreviewSection {
	pub(super) debounce_ms: Option<u64>,
	/// Unset means "decide by terminal width".
	pub(super) enabled: Option<bool>,
	pub(super) max_file_bytes: Option<u64>,
}

pub(super) struct PreviewResolution {
	pub(super) debounce_ms: u64,
	pub(super) enabled: Option<bool>,
	pub(super) max_file_bytes: u64,
}

impl PreviewSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(debounce) = cli.debounce_ms {
			self.debounce_ms = Some(debounce);
		}
		if cli.no_preview {
			self.enabled = Some(false);
		}
	}

	pub(super) fn resolve(self) -> PreviewResolution {
		let default_debounce = u64::try_from(DEFAULT_PREVIEW_DEBOUNCE.as_millis()).unwrap_or(u64::MAX);
		PreviewResolution {
			debounce_ms: self.debounce_ms.unwrap_or(default_debounce),
			enabled: self.enabled,
			max_file_bytes: self.max_file_bytes.unwrap_or(DEFAULT_MAX_FILE_BYTES),
		}
	}
}
