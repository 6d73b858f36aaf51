use std::time::Duration;

use super::{ConfigError, ConfigSources, ResolvedConfig};

const MAX_DEBOUNCE: Duration = Duration::from_secs(5);

pub(super) fn validate(config: &ResolvedConfig, sources: &ConfigSources) -> Result<(), ConfigError> {
	if config.search.program.is_empty() {
		return Err(ConfigError::invalid(
			"search.program",
			String::new(),
			ConfigSources::source_for(&sources.program, "search.program"),
			"must name an executable",
		));
	}

	if config.debounce > MAX_DEBOUNCE {
		return Err(ConfigError::invalid(
			"preview.debounce_ms",
			config.debounce.as_millis().to_string(),
			ConfigSources::source_for(&sources.debounce_ms, "preview.debounce_ms"),
			format!("must be at most {}", MAX_DEBOUNCE.as_millis()),
		));
	}

	if config.preview.max_file_bytes == 0 {
		return Err(ConfigError::invalid(
			"preview.max_file_bytes",
			"0",
			ConfigSources::source_for(&sources.max_file_bytes, "preview.max_file_bytes"),
			"must be greater than zero",
		));
	}

	Ok(())
}
