//! JSON message protocol between the search core and a display surface.
//!
//! Messages are internally tagged by a `command` field, with camelCase field
//! names:
//!
//! ```json
//! {"command":"search","text":"TODO"}
//! {"command":"results","data":[{"label":"main.rs:3","description":"// TODO","filePath":"/r/main.rs","line":3}]}
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::executor::{SearchExecutor, SearchFailure};
use crate::hit::{Hit, ResultSet};
use crate::preview::{DEFAULT_MAX_FILE_BYTES, PreviewContent, PreviewRequest, load_preview};
use crate::session::OpenTarget;
use crate::tokens::{Appearance, Tokenizer};

/// Messages sent by the display surface.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
	Search {
		text: String,
	},
	/// `line` is 1-based.
	OpenFile {
		file_path: PathBuf,
		line: usize,
	},
	GetPreview {
		file_path: PathBuf,
		line: usize,
		#[serde(default)]
		search_term: String,
	},
	ThemeChanged {
		appearance: Appearance,
	},
}

/// Messages pushed to the display surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Event {
	Results {
		data: Vec<Hit>,
	},
	Error {
		data: String,
	},
	PreviewContent {
		data: PreviewContent,
	},
	/// `line` is 0-based, ready to hand to an editor API.
	OpenFile {
		file_path: PathBuf,
		line: usize,
	},
}

impl Event {
	/// `results` on success, `error` carrying the failure text otherwise.
	#[must_use]
	pub fn from_search(outcome: Result<ResultSet, SearchFailure>) -> Self {
		match outcome {
			Ok(results) => Self::Results {
				data: results.into_vec(),
			},
			Err(failure) => Self::Error {
				data: failure.to_string(),
			},
		}
	}

	#[must_use]
	pub fn open_file(target: &OpenTarget) -> Self {
		Self::OpenFile {
			file_path: target.file_path.clone(),
			line: target.zero_based_line(),
		}
	}
}

pub fn decode_request(line: &str) -> serde_json::Result<Request> {
	serde_json::from_str(line)
}

pub fn encode_event(event: &Event) -> serde_json::Result<String> {
	serde_json::to_string(event)
}

/// What handling one request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
	Event(Event),
	/// The host should open this location.
	Open(OpenTarget),
	/// Nothing to send back.
	None,
}

/// Answers protocol requests synchronously, one at a time.
pub struct Responder<T> {
	executor: SearchExecutor,
	root: Option<PathBuf>,
	tokenizer: T,
	appearance: Appearance,
	max_file_bytes: u64,
	next_sequence: u64,
}

impl<T: Tokenizer> Responder<T> {
	#[must_use]
	pub fn new(executor: SearchExecutor, root: Option<PathBuf>, tokenizer: T) -> Self {
		Self {
			executor,
			root,
			tokenizer,
			appearance: Appearance::default(),
			max_file_bytes: DEFAULT_MAX_FILE_BYTES,
			next_sequence: 0,
		}
	}

	#[must_use]
	pub fn with_appearance(mut self, appearance: Appearance) -> Self {
		self.appearance = appearance;
		self
	}

	#[must_use]
	pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
		self.max_file_bytes = max_file_bytes;
		self
	}

	#[must_use]
	pub fn appearance(&self) -> Appearance {
		self.appearance
	}

	pub fn handle(&mut self, request: Request) -> Reply {
		match request {
			Request::Search { text } => {
				let outcome = self.executor.execute(&text, self.root.as_deref());
				Reply::Event(Event::from_search(outcome))
			}
			Request::OpenFile { file_path, line } => Reply::Open(OpenTarget { file_path, line }),
			Request::GetPreview {
				file_path,
				line,
				search_term,
			} => {
				// Line 0 means nothing is selected.
				if line == 0 {
					debug!(path = %file_path.display(), "ignoring preview request without a line");
					return Reply::None;
				}
				self.next_sequence += 1;
				let request = PreviewRequest {
					file_path,
					line,
					search_term,
					sequence_id: self.next_sequence,
				};
				let data = load_preview(&self.tokenizer, &request, self.appearance, self.max_file_bytes);
				Reply::Event(Event::PreviewContent { data })
			}
			Request::ThemeChanged { appearance } => {
				self.appearance = appearance;
				Reply::None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::path::Path;

	use serde_json::json;

	use super::*;
	use crate::tokens::{PlainTokenizer, Token};

	#[test]
	fn requests_decode_from_camel_case() {
		assert_eq!(
			decode_request(r#"{"command":"search","text":"TODO"}"#).expect("search"),
			Request::Search {
				text: "TODO".into()
			}
		);
		assert_eq!(
			decode_request(r#"{"command":"getPreview","filePath":"/r/a.rs","line":4,"searchTerm":"x"}"#)
				.expect("preview"),
			Request::GetPreview {
				file_path: PathBuf::from("/r/a.rs"),
				line: 4,
				search_term: "x".into(),
			}
		);
		assert_eq!(
			decode_request(r#"{"command":"themeChanged","appearance":"light"}"#).expect("theme"),
			Request::ThemeChanged {
				appearance: Appearance::Light
			}
		);
		assert!(decode_request(r#"{"command":"explode"}"#).is_err());
	}

	#[test]
	fn events_encode_with_command_tag() {
		let hits = ResultSet::from(vec![Hit::new(Path::new("/r"), "src/a.rs", 3, "  // TODO")]);
		let encoded = encode_event(&Event::from_search(Ok(hits))).expect("encode");
		let value: serde_json::Value = serde_json::from_str(&encoded).expect("json");
		assert_eq!(
			value,
			json!({
				"command": "results",
				"data": [{
					"label": "a.rs:3",
					"description": "// TODO",
					"filePath": "/r/src/a.rs",
					"line": 3,
				}],
			})
		);

		let encoded = encode_event(&Event::from_search(Err(SearchFailure::NoProject))).expect("encode");
		assert_eq!(
			encoded,
			r#"{"command":"error","data":"Please open a project folder first."}"#
		);
	}

	#[test]
	fn open_file_is_converted_to_zero_based() {
		let mut responder = Responder::new(SearchExecutor::default(), None, PlainTokenizer);
		let reply = responder.handle(Request::OpenFile {
			file_path: PathBuf::from("/r/a.rs"),
			line: 7,
		});
		let Reply::Open(target) = reply else {
			panic!("expected open reply, got {reply:?}");
		};
		assert_eq!(
			Event::open_file(&target),
			Event::OpenFile {
				file_path: PathBuf::from("/r/a.rs"),
				line: 6,
			}
		);
	}

	#[test]
	fn preview_requests_are_answered_with_content() {
		let dir = tempfile::tempdir().expect("temp dir");
		let path = dir.path().join("a.txt");
		fs::write(&path, "one\ntwo\n").expect("write");

		let mut responder = Responder::new(SearchExecutor::default(), None, PlainTokenizer);
		let reply = responder.handle(Request::GetPreview {
			file_path: path.clone(),
			line: 2,
			search_term: "two".into(),
		});
		let Reply::Event(Event::PreviewContent { data }) = reply else {
			panic!("expected preview content, got {reply:?}");
		};
		assert_eq!(data.line, 2);
		assert_eq!(data.search_term, "two");
		assert_eq!(data.token_lines[1], vec![Token::plain("two")]);

		let ignored = responder.handle(Request::GetPreview {
			file_path: path,
			line: 0,
			search_term: String::new(),
		});
		assert_eq!(ignored, Reply::None);
	}

	#[test]
	fn searching_without_root_reports_error_event() {
		let mut responder = Responder::new(SearchExecutor::default(), None, PlainTokenizer);
		let reply = responder.handle(Request::Search { text: "x".into() });
		assert_eq!(
			reply,
			Reply::Event(Event::Error {
				data: "Please open a project folder first.".into()
			})
		);
	}

	#[test]
	fn theme_change_updates_appearance() {
		let mut responder = Responder::new(SearchExecutor::default(), None, PlainTokenizer);
		assert_eq!(
			responder.handle(Request::ThemeChanged {
				appearance: Appearance::Light
			}),
			Reply::None
		);
		assert_eq!(responder.appearance(), Appearance::Light);
	}
}
