//! Search, selection, and preview coordination for `telegrep`.
//!
//! The crate owns everything between a typed query and a rendered preview
//! without depending on a particular front-end: running the search tool,
//! parsing its output, tracking the selected hit, debouncing preview
//! requests, and turning tokenized file contents into a highlighted,
//! windowed slice of lines. Terminal concerns live in `telegrep-tui`.

pub mod executor;
pub mod highlight;
pub mod hit;
pub mod parser;
pub mod preview;
pub mod protocol;
pub mod search;
pub mod selection;
pub mod session;
pub mod tokens;
pub mod window;

pub use crate::executor::{SearchConfig, SearchExecutor, SearchFailure};
pub use crate::highlight::{AnnotatedLine, AnnotatedToken, HighlightEngine, Mark, Segment};
pub use crate::hit::{Hit, ResultSet};
pub use crate::parser::parse_output;
pub use crate::preview::{
	PreviewContent, PreviewCoordinator, PreviewOptions, PreviewRequest, PreviewResponse,
	PreviewRuntime, PreviewTarget,
};
pub use crate::protocol::{Event, Reply, Request, Responder};
pub use crate::search::{SearchResponse, SearchRuntime, SearchTicket};
pub use crate::selection::{SelectionChange, SelectionState};
pub use crate::session::{OpenTarget, Session};
pub use crate::tokens::{Appearance, PlainTokenizer, Token, TokenLine, TokenizeError, Tokenizer};
pub use crate::window::{RenderWindow, RenderedPreview, RenderedRow, Viewport, render_preview};
