//! Conversion of bat's ANSI-colored output into tokens.
//!
//! Only the foreground color is kept. 24-bit colors become `#rrggbb`, 256-color
//! and basic colors go through the xterm palette, and resets clear the color.

use telegrep_core::{Token, TokenLine};

const ESC: char = '\x1b';

/// xterm's default values for the 16 basic colors.
const BASIC_PALETTE: [(u8, u8, u8); 16] = [
	(0, 0, 0),
	(205, 0, 0),
	(0, 205, 0),
	(205, 205, 0),
	(0, 0, 238),
	(205, 0, 205),
	(0, 205, 205),
	(229, 229, 229),
	(127, 127, 127),
	(255, 0, 0),
	(0, 255, 0),
	(255, 255, 0),
	(92, 92, 255),
	(255, 0, 255),
	(0, 255, 255),
	(255, 255, 255),
];

/// Split colored output into one token line per text line.
#[must_use]
pub fn parse_ansi(output: &str) -> Vec<TokenLine> {
	output.lines().map(parse_ansi_line).collect()
}

fn parse_ansi_line(line: &str) -> TokenLine {
	let mut tokens = Vec::new();
	let mut text = String::new();
	let mut color = String::new();
	let mut chars = line.chars().peekable();

	while let Some(ch) = chars.next() {
		if ch != ESC {
			text.push(ch);
			continue;
		}
		if chars.peek() != Some(&'[') {
			continue;
		}
		chars.next();

		let mut params = String::new();
		let mut terminator = None;
		for next in chars.by_ref() {
			if next.is_ascii_digit() || next == ';' {
				params.push(next);
			} else {
				terminator = Some(next);
				break;
			}
		}
		if terminator != Some('m') {
			continue;
		}

		let next_color = apply_sgr(&params, &color);
		if next_color != color {
			flush(&mut tokens, &mut text, &color);
			color = next_color;
		}
	}

	flush(&mut tokens, &mut text, &color);
	tokens
}

fn flush(tokens: &mut TokenLine, text: &mut String, color: &str) {
	if text.is_empty() {
		return;
	}
	tokens.push(Token::new(std::mem::take(text), color));
}

/// Foreground color after applying the SGR parameter list `params`.
fn apply_sgr(params: &str, current: &str) -> String {
	let codes: Vec<u16> = params
		.split(';')
		.map(|code| code.parse().unwrap_or(0))
		.collect();
	let mut color = current.to_string();
	let mut index = 0;

	while index < codes.len() {
		match codes[index] {
			0 | 39 => color.clear(),
			code @ 30..=37 => color = palette_hex(code - 30),
			code @ 90..=97 => color = palette_hex(code - 90 + 8),
			38 | 48 => {
				let is_foreground = codes[index] == 38;
				let (parsed, consumed) = extended_color(&codes[index + 1..]);
				if is_foreground && let Some(parsed) = parsed {
					color = parsed;
				}
				index += consumed;
			}
			_ => {}
		}
		index += 1;
	}

	color
}

/// Parse the arguments following a 38/48 code. Returns the color and how many
/// arguments it used.
fn extended_color(args: &[u16]) -> (Option<String>, usize) {
	match args {
		[2, r, g, b, ..] => (Some(hex(channel(*r), channel(*g), channel(*b))), 4),
		[5, index, ..] => (Some(palette_hex(*index)), 2),
		_ => (None, args.len()),
	}
}

fn palette_hex(index: u16) -> String {
	let index = usize::from(index.min(255) as u8);
	if let Some(&(r, g, b)) = BASIC_PALETTE.get(index) {
		return hex(r, g, b);
	}
	if index < 232 {
		const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
		let cube = index - 16;
		return hex(LEVELS[cube / 36], LEVELS[(cube / 6) % 6], LEVELS[cube % 6]);
	}
	let gray = 8 + 10 * (index - 232) as u8;
	hex(gray, gray, gray)
}

fn channel(value: u16) -> u8 {
	value.min(255) as u8
}

fn hex(r: u8, g: u8, b: u8) -> String {
	format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn true_color_runs_become_tokens() {
		let line = "\x1b[38;2;198;120;221mfn\x1b[0m \x1b[38;2;97;175;239mmain\x1b[0m()";
		assert_eq!(
			parse_ansi(line),
			vec![vec![
				Token::new("fn", "#c678dd"),
				Token::plain(" "),
				Token::new("main", "#61afef"),
				Token::plain("()"),
			]]
		);
	}

	#[test]
	fn palette_colors_resolve_to_hex() {
		assert_eq!(parse_ansi("\x1b[31mx"), vec![vec![Token::new("x", "#cd0000")]]);
		assert_eq!(parse_ansi("\x1b[38;5;196mx"), vec![vec![Token::new("x", "#ff0000")]]);
		assert_eq!(parse_ansi("\x1b[38;5;244mx"), vec![vec![Token::new("x", "#808080")]]);
	}

	#[test]
	fn styles_and_background_do_not_change_color() {
		let line = "\x1b[38;2;1;2;3mab\x1b[1m\x1b[48;2;9;9;9mcd";
		assert_eq!(parse_ansi(line), vec![vec![Token::new("abcd", "#010203")]]);
	}

	#[test]
	fn empty_lines_are_kept_as_empty_token_lines() {
		assert_eq!(parse_ansi("a\n\x1b[0m\nb\n"), vec![
			vec![Token::plain("a")],
			Vec::new(),
			vec![Token::plain("b")],
		]);
	}
}
