//! Terminal setup and the event loop.

use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use ratatui::crossterm::execute;
use tracing::info;

use crate::App;
use crate::config::{Outcome, TuiOptions};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Build an [`App`] from `options` and run it until the user opens a hit or
/// cancels.
pub fn run(options: TuiOptions) -> Result<Outcome> {
	let mut app = App::new(options)?;
	app.run()
}

/// Reads terminal events on a background thread.
struct InputReader {
	events: mpsc::Receiver<Event>,
	running: Arc<AtomicBool>,
	handle: JoinHandle<Result<()>>,
}

impl InputReader {
	fn start() -> Self {
		let (tx, events) = mpsc::channel();
		let running = Arc::new(AtomicBool::new(true));
		let flag = Arc::clone(&running);
		let handle = thread::spawn(move || -> Result<()> {
			while flag.load(Ordering::Relaxed) {
				if event::poll(INPUT_POLL)? && tx.send(event::read()?).is_err() {
					break;
				}
			}
			Ok(())
		});
		Self {
			events,
			running,
			handle,
		}
	}

	fn stop(self) -> Result<()> {
		self.running.store(false, Ordering::Relaxed);
		match self.handle.join() {
			Ok(result) => result,
			Err(panic) => std::panic::resume_unwind(panic),
		}
	}
}

impl App {
	/// Take over the terminal until the session ends, restoring it on every
	/// exit path.
	pub fn run(&mut self) -> Result<Outcome> {
		let mut terminal = ratatui::init();
		execute!(stdout(), EnableMouseCapture)?;

		let input = InputReader::start();
		let result = self.event_loop(&mut terminal, &input.events);

		execute!(stdout(), DisableMouseCapture)?;
		ratatui::restore();
		let stopped = input.stop();

		let outcome = result?;
		stopped?;
		info!(accepted = outcome.accepted, query = %outcome.query, "session ended");
		Ok(outcome)
	}

	fn event_loop(&mut self, terminal: &mut DefaultTerminal, events: &mpsc::Receiver<Event>) -> Result<Outcome> {
		terminal.clear()?;
		self.update_preview_responsive(terminal.size()?.width);
		if !self.query().is_empty() {
			self.request_search();
		}
		info!(root = ?self.root, "session started");

		loop {
			loop {
				let event = match events.try_recv() {
					Ok(event) => event,
					Err(mpsc::TryRecvError::Empty) => break,
					Err(mpsc::TryRecvError::Disconnected) => {
						return Err(anyhow!("terminal input reader stopped"));
					}
				};
				if let Some(outcome) = self.handle_event(event) {
					return Ok(outcome);
				}
			}

			self.pump_search_results();
			self.tick(Instant::now());
			self.pump_preview_results();
			if self.session.is_searching() {
				self.throbber_state.calc_next();
			}

			terminal.draw(|frame| self.draw(frame))?;
			thread::sleep(FRAME_INTERVAL);
		}
	}

	fn handle_event(&mut self, event: Event) -> Option<Outcome> {
		match event {
			Event::Resize(width, _) => {
				self.update_preview_responsive(width);
				None
			}
			Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
			Event::Mouse(mouse) => self.handle_mouse(mouse),
			_ => None,
		}
	}
}
