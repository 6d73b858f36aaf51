use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::{AppearanceArg, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `telegrep` binary.
#[derive(Parser, Debug)]
#[command(
	name = "telegrep",
	version,
	long_version = long_version(),
	about = "Search file contents as you type, with a live syntax-highlighted preview",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "TELEGREP_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'r',
		long,
		value_name = "PATH",
		help = "Project folder to search (default: current directory)"
	)]
	pub(crate) root: Option<PathBuf>,
	#[arg(
		short = 'q',
		long = "query",
		value_name = "QUERY",
		help = "Start with this query (default: empty)"
	)]
	pub(crate) initial_query: Option<String>,
	#[arg(
		short = 't',
		long,
		value_name = "TITLE",
		help = "Title of the results pane (default: project folder)"
	)]
	pub(crate) title: Option<String>,
	#[arg(long, value_name = "THEME", help = "Select a theme by name (default: by appearance)")]
	pub(crate) theme: Option<String>,
	#[arg(
		long,
		value_enum,
		help = "Dark or light colors when no theme is named (default: dark)"
	)]
	pub(crate) appearance: Option<AppearanceArg>,
	#[arg(
		long = "debounce-ms",
		value_name = "MS",
		help = "Delay before previewing a new selection (default: 50)"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(long = "no-preview", help = "Start with the preview pane hidden (default: by width)")]
	pub(crate) no_preview: bool,
	#[arg(
		long = "search",
		value_name = "TEXT",
		conflicts_with = "stdio",
		help = "Run one search, print the results, and exit"
	)]
	pub(crate) search: Option<String>,
	#[arg(long, help = "Serve JSON requests on stdin, one per line")]
	pub(crate) stdio: bool,
	#[arg(long, help = "Open the chosen hit in $VISUAL or $EDITOR (default: print it)")]
	pub(crate) open: bool,
	#[arg(long = "log-file", value_name = "FILE", help = "Write logs here (default: cache directory)")]
	pub(crate) log_file: Option<PathBuf>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List bundled themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the result"
	)]
	pub(crate) output: OutputFormat,
}
