use anyhow::{Context, Result, bail};
use include_dir::{Dir, File};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use telegrep_core::Appearance;

use crate::style::theme::types::{Theme, ThemeRegistration};

pub(super) struct BuiltinThemes {
	pub(super) registrations: Vec<ThemeRegistration>,
	default_dark: usize,
	default_light: usize,
}

impl BuiltinThemes {
	pub(super) fn default_for(&self, appearance: Appearance) -> &ThemeRegistration {
		let index = match appearance {
			Appearance::Dark => self.default_dark,
			Appearance::Light => self.default_light,
		};
		&self.registrations[index]
	}
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeFile {
	name: String,
	#[serde(default)]
	aliases: Vec<String>,
	appearance: Appearance,
	/// Marks the theme picked when only an appearance is known.
	#[serde(default)]
	default: bool,
	bat_theme: String,
	#[serde(default)]
	counterpart: Option<String>,
	styles: ThemeStyles,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeStyles {
	header: StyleSpec,
	row_highlight: StyleSpec,
	prompt: StyleSpec,
	empty: StyleSpec,
	highlight: StyleSpec,
	active_match: StyleSpec,
	active_line: StyleSpec,
	line_number: StyleSpec,
	error: StyleSpec,
}

impl ThemeStyles {
	fn into_theme(self, context: &str) -> Result<Theme> {
		let style = |spec: &StyleSpec, field: &str| spec.to_style(&format!("{context}.{field}"));
		Ok(Theme {
			header: style(&self.header, "header")?,
			row_highlight: style(&self.row_highlight, "row_highlight")?,
			prompt: style(&self.prompt, "prompt")?,
			empty: style(&self.empty, "empty")?,
			highlight: style(&self.highlight, "highlight")?,
			active_match: style(&self.active_match, "active_match")?,
			active_line: style(&self.active_line, "active_line")?,
			line_number: style(&self.line_number, "line_number")?,
			error: style(&self.error, "error")?,
		})
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StyleSpec {
	#[serde(default)]
	fg: Option<String>,
	#[serde(default)]
	bg: Option<String>,
	#[serde(default)]
	modifiers: Vec<String>,
}

impl StyleSpec {
	fn to_style(&self, context: &str) -> Result<Style> {
		let mut style = Style::new();
		if let Some(fg) = &self.fg {
			style = style.fg(parse_color(fg).with_context(|| format!("{context}: bad fg `{fg}`"))?);
		}
		if let Some(bg) = &self.bg {
			style = style.bg(parse_color(bg).with_context(|| format!("{context}: bad bg `{bg}`"))?);
		}
		for modifier in &self.modifiers {
			let parsed = parse_modifier(modifier)
				.with_context(|| format!("{context}: bad modifier `{modifier}`"))?;
			style = style.add_modifier(parsed);
		}
		Ok(style)
	}
}

pub(super) fn load_builtin_themes(dir: &Dir) -> Result<BuiltinThemes> {
	let mut files: Vec<_> = dir.files().collect();
	files.sort_by(|a, b| a.path().cmp(b.path()));

	let mut registrations = Vec::with_capacity(files.len());
	let mut default_dark = None;
	let mut default_light = None;

	for file in files {
		let (registration, is_default) = parse_theme_file(file)?;
		if is_default {
			let slot = match registration.appearance {
				Appearance::Dark => &mut default_dark,
				Appearance::Light => &mut default_light,
			};
			if slot.is_some() {
				bail!(
					"more than one default {} theme (second is `{}`)",
					registration.appearance,
					registration.name
				);
			}
			*slot = Some(registrations.len());
		}
		registrations.push(registration);
	}

	for registration in &registrations {
		if let Some(counterpart) = &registration.counterpart
			&& !registrations.iter().any(|other| other.answers_to(counterpart))
		{
			bail!("theme `{}` names unknown counterpart `{counterpart}`", registration.name);
		}
	}

	let Some(default_dark) = default_dark else {
		bail!("no default dark theme is bundled");
	};
	let Some(default_light) = default_light else {
		bail!("no default light theme is bundled");
	};

	Ok(BuiltinThemes {
		registrations,
		default_dark,
		default_light,
	})
}

fn parse_theme_file(file: &File) -> Result<(ThemeRegistration, bool)> {
	let path = file.path();
	let contents = file
		.contents_utf8()
		.with_context(|| format!("{path:?} is not valid UTF-8"))?;
	let parsed: ThemeFile =
		toml::from_str(contents).with_context(|| format!("failed to parse theme {path:?}"))?;

	let theme = parsed.styles.into_theme(&format!("{path:?}"))?;
	let mut registration =
		ThemeRegistration::new(parsed.name, theme, parsed.appearance, parsed.bat_theme);
	for alias in parsed.aliases.iter().map(|alias| alias.trim()).filter(|alias| !alias.is_empty()) {
		registration = registration.alias(alias);
	}
	if let Some(counterpart) = parsed.counterpart {
		registration = registration.with_counterpart(counterpart);
	}
	Ok((registration, parsed.default))
}

/// Parse `#rgb`, `#rrggbb`, an ANSI index, or a named terminal color.
pub(crate) fn parse_color(input: &str) -> Result<Color> {
	let value = input.trim();

	if let Some(hex) = value.strip_prefix('#') {
		let expanded: String = match hex.len() {
			3 => hex.chars().flat_map(|ch| [ch, ch]).collect(),
			6 => hex.to_string(),
			_ => bail!("hex colors must have 3 or 6 digits"),
		};
		let channel = |range: std::ops::Range<usize>| {
			u8::from_str_radix(&expanded[range], 16).with_context(|| format!("invalid hex color `{value}`"))
		};
		return Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
	}

	if let Ok(index) = value.parse::<u8>() {
		return Ok(Color::Indexed(index));
	}

	let color = match normalize_key(value).as_str() {
		"reset" | "default" => Color::Reset,
		"black" => Color::Black,
		"red" => Color::Red,
		"green" => Color::Green,
		"yellow" => Color::Yellow,
		"blue" => Color::Blue,
		"magenta" => Color::Magenta,
		"cyan" => Color::Cyan,
		"gray" | "grey" => Color::Gray,
		"dark_gray" | "dark_grey" => Color::DarkGray,
		"light_red" => Color::LightRed,
		"light_green" => Color::LightGreen,
		"light_yellow" => Color::LightYellow,
		"light_blue" => Color::LightBlue,
		"light_magenta" => Color::LightMagenta,
		"light_cyan" => Color::LightCyan,
		"white" => Color::White,
		other => bail!("unknown color `{other}`"),
	};
	Ok(color)
}

fn parse_modifier(input: &str) -> Result<Modifier> {
	let modifier = match normalize_key(input).as_str() {
		"bold" => Modifier::BOLD,
		"dim" => Modifier::DIM,
		"italic" => Modifier::ITALIC,
		"underline" | "underlined" => Modifier::UNDERLINED,
		"reversed" | "reverse" => Modifier::REVERSED,
		"crossed_out" | "strikethrough" => Modifier::CROSSED_OUT,
		other => bail!("unknown modifier `{other}`"),
	};
	Ok(modifier)
}

fn normalize_key(value: &str) -> String {
	value
		.trim()
		.to_ascii_lowercase()
		.replace(['-', ' '], "_")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn colors_parse_in_every_supported_form() {
		assert_eq!(parse_color("#0af").expect("short hex"), Color::Rgb(0, 0xaa, 0xff));
		assert_eq!(parse_color("#1e1e2e").expect("hex"), Color::Rgb(0x1e, 0x1e, 0x2e));
		assert_eq!(parse_color("244").expect("index"), Color::Indexed(244));
		assert_eq!(parse_color("Light-Blue").expect("name"), Color::LightBlue);
		assert!(parse_color("#12345").is_err());
		assert!(parse_color("chartreuse").is_err());
	}

	#[test]
	fn style_spec_combines_colors_and_modifiers() {
		let spec = StyleSpec {
			fg: Some("red".into()),
			bg: Some("#000000".into()),
			modifiers: vec!["bold".into(), "underline".into()],
		};
		let style = spec.to_style("test").expect("style");
		assert_eq!(style.fg, Some(Color::Red));
		assert_eq!(style.bg, Some(Color::Rgb(0, 0, 0)));
		assert!(style.add_modifier.contains(Modifier::BOLD | Modifier::UNDERLINED));
	}
}
