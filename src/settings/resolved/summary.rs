use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	println!("Effective configuration:");
	match &config.root {
		Some(root) => println!("  Root: {}", root.display()),
		None => println!("  Root: (no project)"),
	}
	println!("  Search program: {}", config.search.program);
	if config.search.args.is_empty() {
		println!("  Extra arguments: (none)");
	} else {
		println!("  Extra arguments: {}", config.search.args.join(" "));
	}
	println!("  No-match exit status: {}", config.search.no_match_status);
	println!("  Preview debounce: {} ms", config.debounce.as_millis());
	println!(
		"  Preview pane: {}",
		match config.preview_enabled {
			Some(true) => "shown",
			Some(false) => "hidden",
			None => "(by terminal width)",
		}
	);
	println!("  Preview size limit: {} bytes", config.preview.max_file_bytes);
	println!("  Theme: {} ({})", config.style.name, config.style.appearance);
	println!("  Title: {}", config.title);
	if !config.initial_query.is_empty() {
		println!("  Initial query: {}", config.initial_query);
	}
	println!("  Editor: {}", config.editor.as_deref().unwrap_or("($VISUAL or $EDITOR)"));
}
