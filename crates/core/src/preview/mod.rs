//! Preview pipeline: debounced requests, file loading, and the background worker.
//!
//! A selection change schedules a request through [`PreviewCoordinator`]; when
//! its delay elapses the request gets a fresh sequence id and is handed to the
//! [`PreviewRuntime`], which reads and tokenizes the file off the UI thread.
//! Responses are only applied if their id is still the latest one issued.

mod coordinator;
mod language;
mod loader;
mod request;
mod worker;

pub use coordinator::{DEFAULT_PREVIEW_DEBOUNCE, PreviewCoordinator, PreviewTarget};
pub use language::{PLAIN_TEXT, language_for_path};
pub use loader::{DEFAULT_MAX_FILE_BYTES, load_preview};
pub use request::{PreviewContent, PreviewRequest, PreviewResponse};
pub use worker::{PreviewOptions, PreviewRuntime};
