//! Background worker that reads and tokenizes previewed files.
//!
//! Tokenizing is the expensive part of a preview, so it runs on a dedicated
//! thread. Before each job the worker drains its queue down to the newest
//! request, skipping files the user has already moved past. A small LRU cache
//! keyed by path, appearance, and modification time makes revisiting a hit
//! instant.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, SystemTime};

use tracing::debug;

use super::loader::{DEFAULT_MAX_FILE_BYTES, load_preview};
use super::request::{PreviewContent, PreviewRequest, PreviewResponse};
use crate::tokens::{Appearance, TokenLine, Tokenizer};

/// Number of tokenized files kept by default.
const DEFAULT_CACHE_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
	/// Files larger than this produce an error preview.
	pub max_file_bytes: u64,
	/// Tokenized files kept in the LRU cache; `0` disables caching.
	pub cache_capacity: usize,
}

impl Default for PreviewOptions {
	fn default() -> Self {
		Self {
			max_file_bytes: DEFAULT_MAX_FILE_BYTES,
			cache_capacity: DEFAULT_CACHE_CAPACITY,
		}
	}
}

enum PreviewCommand {
	Generate {
		request: PreviewRequest,
		appearance: Appearance,
	},
	Shutdown,
}

#[derive(Clone, Hash, Eq, PartialEq)]
struct CacheKey {
	path: PathBuf,
	appearance: Appearance,
	modified: SystemTime,
}

impl CacheKey {
	/// `None` when the file's modification time is unavailable.
	fn for_file(path: &Path, appearance: Appearance) -> Option<Self> {
		let modified = fs::metadata(path).and_then(|meta| meta.modified()).ok()?;
		Some(Self {
			path: path.to_path_buf(),
			appearance,
			modified,
		})
	}
}

struct PreviewCache {
	/// Map from key to (recency, token lines).
	entries: HashMap<CacheKey, (u64, Vec<TokenLine>)>,
	order: u64,
	capacity: usize,
}

impl PreviewCache {
	fn new(capacity: usize) -> Self {
		Self {
			entries: HashMap::with_capacity(capacity),
			order: 0,
			capacity,
		}
	}

	fn get(&mut self, key: &CacheKey) -> Option<Vec<TokenLine>> {
		let (order, lines) = self.entries.get_mut(key)?;
		self.order += 1;
		*order = self.order;
		Some(lines.clone())
	}

	fn insert(&mut self, key: CacheKey, lines: Vec<TokenLine>) {
		if self.capacity == 0 {
			return;
		}

		if self.entries.len() >= self.capacity
			&& !self.entries.contains_key(&key)
			&& let Some(oldest) = self
				.entries
				.iter()
				.min_by_key(|(_, (order, _))| *order)
				.map(|(key, _)| key.clone())
		{
			self.entries.remove(&oldest);
		}

		self.order += 1;
		self.entries.insert(key, (self.order, lines));
	}
}

fn worker_loop<T: Tokenizer>(
	tokenizer: &T,
	options: PreviewOptions,
	command_rx: Receiver<PreviewCommand>,
	result_tx: Sender<PreviewResponse>,
) {
	let mut cache = PreviewCache::new(options.cache_capacity);

	while let Ok(command) = command_rx.recv() {
		let PreviewCommand::Generate {
			request,
			appearance,
		} = command
		else {
			break;
		};

		let Some((request, appearance)) = drain_to_latest(&command_rx, request, appearance) else {
			break;
		};

		let content = generate(tokenizer, &mut cache, &request, appearance, options);
		let response = PreviewResponse {
			sequence_id: request.sequence_id,
			content,
		};
		if result_tx.send(response).is_err() {
			break;
		}
	}

	debug!("preview worker stopped");
}

/// Replace `request` with any newer queued request. Returns `None` if a
/// shutdown was queued behind it.
fn drain_to_latest(
	rx: &Receiver<PreviewCommand>,
	mut request: PreviewRequest,
	mut appearance: Appearance,
) -> Option<(PreviewRequest, Appearance)> {
	loop {
		match rx.try_recv() {
			Ok(PreviewCommand::Generate {
				request: newer,
				appearance: newer_appearance,
			}) => {
				debug!(skipped = request.sequence_id, "skipping superseded preview request");
				request = newer;
				appearance = newer_appearance;
			}
			Ok(PreviewCommand::Shutdown) => return None,
			Err(_) => return Some((request, appearance)),
		}
	}
}

fn generate<T: Tokenizer>(
	tokenizer: &T,
	cache: &mut PreviewCache,
	request: &PreviewRequest,
	appearance: Appearance,
	options: PreviewOptions,
) -> PreviewContent {
	let key = CacheKey::for_file(&request.file_path, appearance);
	if let Some(lines) = key.as_ref().and_then(|key| cache.get(key)) {
		return PreviewContent::loaded(request, lines);
	}

	let content = load_preview(tokenizer, request, appearance, options.max_file_bytes);
	if !content.is_error()
		&& let Some(key) = key
	{
		cache.insert(key, content.token_lines.clone());
	}
	content
}

/// Handle to the background preview worker.
///
/// Dropping the handle asks the worker to stop.
pub struct PreviewRuntime {
	tx: Sender<PreviewCommand>,
	rx: Receiver<PreviewResponse>,
}

impl PreviewRuntime {
	/// Start the worker. `factory` runs on the worker thread, so the tokenizer
	/// itself does not need to be `Send`.
	pub fn spawn<T, F>(factory: F, options: PreviewOptions) -> io::Result<Self>
	where
		T: Tokenizer,
		F: FnOnce() -> T + Send + 'static,
	{
		let (command_tx, command_rx) = mpsc::channel();
		let (result_tx, result_rx) = mpsc::channel();

		thread::Builder::new()
			.name("preview-worker".into())
			.spawn(move || {
				let tokenizer = factory();
				worker_loop(&tokenizer, options, command_rx, result_tx);
			})?;

		Ok(Self {
			tx: command_tx,
			rx: result_rx,
		})
	}

	/// Queue `request`. Returns `false` if the worker has stopped.
	pub fn request(&self, request: PreviewRequest, appearance: Appearance) -> bool {
		self.tx
			.send(PreviewCommand::Generate {
				request,
				appearance,
			})
			.is_ok()
	}

	pub fn try_recv(&self) -> Result<PreviewResponse, TryRecvError> {
		self.rx.try_recv()
	}

	pub fn recv_timeout(&self, timeout: Duration) -> Result<PreviewResponse, RecvTimeoutError> {
		self.rx.recv_timeout(timeout)
	}

	pub fn shutdown(&self) {
		let _ = self.tx.send(PreviewCommand::Shutdown);
	}
}

impl Drop for PreviewRuntime {
	fn drop(&mut self) {
		self.shutdown();
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;
	use crate::tokens::{PlainTokenizer, Token, TokenizeError, plain_lines};

	const TIMEOUT: Duration = Duration::from_secs(5);

	struct CountingTokenizer(Arc<AtomicUsize>);

	impl Tokenizer for CountingTokenizer {
		fn tokenize(
			&self,
			text: &str,
			_language: &str,
			_appearance: Appearance,
		) -> Result<Vec<TokenLine>, TokenizeError> {
			self.0.fetch_add(1, Ordering::SeqCst);
			Ok(plain_lines(text))
		}
	}

	fn request(path: &Path, sequence_id: u64) -> PreviewRequest {
		PreviewRequest {
			file_path: path.to_path_buf(),
			line: 1,
			search_term: String::new(),
			sequence_id,
		}
	}

	#[test]
	fn worker_answers_with_request_id() {
		let dir = tempfile::tempdir().expect("temp dir");
		let path = dir.path().join("a.txt");
		fs::write(&path, "alpha\nbeta\n").expect("write");

		let runtime =
			PreviewRuntime::spawn(|| PlainTokenizer, PreviewOptions::default()).expect("spawn");
		assert!(runtime.request(request(&path, 7), Appearance::Dark));

		let response = runtime.recv_timeout(TIMEOUT).expect("response");
		assert_eq!(response.sequence_id, 7);
		assert_eq!(response.content.token_lines[1], vec![Token::plain("beta")]);
	}

	#[test]
	fn last_queued_request_is_always_answered() {
		let dir = tempfile::tempdir().expect("temp dir");
		let path = dir.path().join("a.txt");
		fs::write(&path, "x\n").expect("write");

		let runtime =
			PreviewRuntime::spawn(|| PlainTokenizer, PreviewOptions::default()).expect("spawn");
		for id in 1..=3 {
			runtime.request(request(&path, id), Appearance::Dark);
		}

		let mut last = 0;
		while last != 3 {
			let response = runtime.recv_timeout(TIMEOUT).expect("response");
			assert!(response.sequence_id > last, "responses arrive in request order");
			last = response.sequence_id;
		}
	}

	#[test]
	fn cache_is_keyed_by_appearance() {
		let dir = tempfile::tempdir().expect("temp dir");
		let path = dir.path().join("a.rs");
		fs::write(&path, "fn main() {}\n").expect("write");

		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let runtime = PreviewRuntime::spawn(
			move || CountingTokenizer(counter),
			PreviewOptions::default(),
		)
		.expect("spawn");

		for (id, appearance) in [(1, Appearance::Dark), (2, Appearance::Dark), (3, Appearance::Light)] {
			runtime.request(request(&path, id), appearance);
			let response = runtime.recv_timeout(TIMEOUT).expect("response");
			assert_eq!(response.sequence_id, id);
		}

		assert_eq!(calls.load(Ordering::SeqCst), 2);
	}

	#[test]
	fn lru_evicts_least_recently_used() {
		let key = |name: &str| CacheKey {
			path: PathBuf::from(name),
			appearance: Appearance::Dark,
			modified: SystemTime::UNIX_EPOCH,
		};
		let mut cache = PreviewCache::new(2);
		cache.insert(key("a"), Vec::new());
		cache.insert(key("b"), Vec::new());
		assert!(cache.get(&key("a")).is_some());
		cache.insert(key("c"), Vec::new());

		assert!(cache.get(&key("a")).is_some());
		assert!(cache.get(&key("b")).is_none());
		assert!(cache.get(&key("c")).is_some());
	}
}
