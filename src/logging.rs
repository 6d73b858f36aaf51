//! File logging through `tracing-subscriber`.
//!
//! The terminal belongs to the UI, so log lines go to a file. The filter is
//! read from `TELEGREP_LOG` using the usual `EnvFilter` directive syntax.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::app_dirs;

pub(crate) const LOG_ENV: &str = "TELEGREP_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";
const LOG_FILE_NAME: &str = "telegrep.log";

/// Default log location inside the cache directory.
pub(crate) fn default_log_path() -> Result<PathBuf> {
	Ok(app_dirs::get_cache_dir()?.join(LOG_FILE_NAME))
}

/// Install the global subscriber writing to `path`.
pub(crate) fn initialize(path: &Path) -> Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)
			.with_context(|| format!("failed to create log directory {}", parent.display()))?;
	}
	let file = File::create(path).with_context(|| format!("failed to open log file {}", path.display()))?;

	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.with_target(true)
		.try_init()
		.map_err(|err| anyhow::anyhow!("failed to install log subscriber: {err}"))
}
