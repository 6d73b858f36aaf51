use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use telegrep_core::Appearance;

use super::ui::resolve_style;
use super::RawConfig;
use crate::cli::CliArgs;

#[test]
fn cli_overrides_take_precedence() {
	let cli = CliArgs::parse_from([
		"telegrep",
		"--root",
		"/tmp",
		"--query",
		"todo",
		"--theme",
		"gruvbox-dark",
		"--appearance",
		"light",
		"--debounce-ms",
		"75",
		"--no-preview",
	]);

	let mut config = RawConfig::default();
	config.preview.enabled = Some(true);
	config.apply_cli_overrides(&cli);

	assert_eq!(config.search.root, Some(PathBuf::from("/tmp")));
	assert_eq!(config.ui.initial_query.as_deref(), Some("todo"));
	assert_eq!(config.ui.theme.as_deref(), Some("gruvbox-dark"));
	assert_eq!(config.ui.appearance, Some(Appearance::Light));
	assert_eq!(config.preview.debounce_ms, Some(75));
	assert_eq!(config.preview.enabled, Some(false));
}

#[test]
fn resolves_defaults_for_a_directory() {
	let dir = tempfile::tempdir().expect("tempdir");
	let cli = CliArgs::parse_from(["telegrep", "--no-config"]);
	let mut config = RawConfig::default();
	config.search.root = Some(dir.path().to_path_buf());

	let resolved = config.resolve(&cli).expect("resolve");
	let canonical = std::fs::canonicalize(dir.path()).expect("canonicalize");
	assert_eq!(resolved.root, Some(canonical));
	assert_eq!(resolved.search.program, "rg");
	assert_eq!(resolved.debounce, Duration::from_millis(50));
	assert_eq!(resolved.preview_enabled, None);
	assert_eq!(resolved.style.appearance, Appearance::Dark);
	assert!(resolved.initial_query.is_empty());
}

#[test]
fn missing_root_resolves_to_no_project() {
	let cli = CliArgs::parse_from(["telegrep", "--no-config"]);
	let mut config = RawConfig::default();
	config.search.root = Some(PathBuf::from("/definitely/not/a/real/dir"));

	let resolved = config.resolve(&cli).expect("resolve");
	assert_eq!(resolved.root, None);
	assert_eq!(resolved.title, "No project");
}

#[test]
fn file_root_resolves_to_no_project() {
	let dir = tempfile::tempdir().expect("tempdir");
	let file = dir.path().join("notes.txt");
	std::fs::write(&file, "x").expect("write");
	let cli = CliArgs::parse_from(["telegrep", "--no-config"]);
	let mut config = RawConfig::default();
	config.search.root = Some(file);

	assert_eq!(config.resolve(&cli).expect("resolve").root, None);
}

#[test]
fn config_file_sections_deserialize() {
	let raw: RawConfig = toml_config(
		r#"
		[search]
		program = "grep"
		args = ["--hidden"]
		no_match_status = 1

		[preview]
		debounce_ms = 10
		enabled = false

		[ui]
		theme = "light"
		editor = "nvim +{line} {file}"
		"#,
	);
	assert_eq!(raw.search.program.as_deref(), Some("grep"));
	assert_eq!(raw.search.args, Some(vec!["--hidden".to_string()]));
	assert_eq!(raw.preview.debounce_ms, Some(10));
	assert_eq!(raw.ui.editor.as_deref(), Some("nvim +{line} {file}"));
}

#[test]
fn appearance_picks_the_counterpart_of_a_named_theme() {
	let style = resolve_style(Some("gruvbox-dark"), Some(Appearance::Light)).expect("style");
	assert_eq!(style.name, "gruvbox-light");

	let style = resolve_style(None, Some(Appearance::Light)).expect("style");
	assert_eq!(style.appearance, Appearance::Light);

	assert!(resolve_style(Some("no-such-theme"), None).is_err());
}

fn toml_config(source: &str) -> RawConfig {
	config::Config::builder()
		.add_source(config::File::from_str(source, config::FileFormat::Toml))
		.build()
		.expect("build")
		.try_deserialize()
		.expect("deserialize")
}
