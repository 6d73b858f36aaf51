use clap::ValueEnum;
use telegrep_core::Appearance;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum AppearanceArg {
	Dark,
	Light,
}

impl From<AppearanceArg> for Appearance {
	fn from(value: AppearanceArg) -> Self {
		match value {
			AppearanceArg::Dark => Appearance::Dark,
			AppearanceArg::Light => Appearance::Light,
		}
	}
}

/// How results are printed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
