//! Interactive terminal front-end for `telegrep`.
//!
//! The crate wraps a [`telegrep_core::Session`] in a ratatui application: a
//! query line, a results table, and a syntax-highlighted preview of the
//! selected hit. Highlighting is done by bat on the preview worker thread.

mod app;
mod config;
pub mod components;
pub mod highlight;
pub mod input;
mod runtime;
pub mod style;

pub use app::App;
pub use config::{Outcome, TuiOptions, UiLabels};
pub use highlight::BatTokenizer;
pub use input::QueryInput;
pub use runtime::run;
pub use style::{StyleConfig, Theme, builtin_themes};
