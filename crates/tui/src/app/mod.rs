//! Application state and behavior for the interactive search.
//!
//! [`App`] glues the core [`Session`](telegrep_core::Session) to the terminal:
//! it forwards search tickets and preview requests to the background runtimes,
//! feeds their answers back in, and keeps the pane geometry needed to map
//! mouse events onto rows. Input handling, rendering, and the per-pane state
//! live in the submodules.

mod actions;
mod preview;
mod render;
mod results;
mod search;
mod state;

pub use state::App;

#[cfg(test)]
pub(crate) use state::tests as test_support;
