use std::env;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Trim extra search arguments and drop empty ones.
pub(super) fn sanitize_args(args: Vec<String>) -> Vec<String> {
	args.into_iter()
		.map(|arg| arg.trim().to_string())
		.filter(|arg| !arg.is_empty())
		.collect()
}

/// Results pane title for a project at `root`, shortened under `$HOME`.
pub(super) fn default_title_for(root: &Path) -> String {
	if let Some(home) = env::var_os("HOME").map(PathBuf::from)
		&& let Ok(rel) = root.strip_prefix(&home)
	{
		if rel.components().next().is_none() {
			return "~".to_string();
		}
		return format!("~{MAIN_SEPARATOR}{}", rel.display());
	}
	root.display().to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn args_are_trimmed_and_filtered() {
		let args = sanitize_args(vec![" --hidden ".into(), "".into(), "-uu".into()]);
		assert_eq!(args, vec!["--hidden", "-uu"]);
	}

	#[test]
	fn titles_outside_home_are_absolute() {
		let title = default_title_for(Path::new("/definitely/not/home/project"));
		assert_eq!(title, "/definitely/not/home/project");
	}
}
