//! Line-delimited JSON host: one request per input line, one event per
//! output line.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use telegrep_core::protocol::{decode_request, encode_event};
use telegrep_core::{Event, Reply, Responder, Tokenizer};
use tracing::{debug, warn};

/// Answer requests from `input` until it ends.
pub(crate) fn serve<T, R, W>(responder: &mut Responder<T>, input: R, mut output: W) -> Result<()>
where
	T: Tokenizer,
	R: BufRead,
	W: Write,
{
	for line in input.lines() {
		let line = line.context("failed to read request")?;
		if line.trim().is_empty() {
			continue;
		}

		let event = match decode_request(&line) {
			Ok(request) => {
				debug!(?request, "handling request");
				match responder.handle(request) {
					Reply::Event(event) => Some(event),
					Reply::Open(target) => Some(Event::open_file(&target)),
					Reply::None => None,
				}
			}
			Err(err) => {
				warn!(error = %err, "malformed request");
				Some(Event::Error {
					data: format!("invalid request: {err}"),
				})
			}
		};

		if let Some(event) = event {
			writeln!(output, "{}", encode_event(&event)?).context("failed to write event")?;
			output.flush().context("failed to flush events")?;
		}
	}
	Ok(())
}
