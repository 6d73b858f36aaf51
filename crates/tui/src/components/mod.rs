//! UI building blocks shared across rendering and state modules.

pub mod preview;
/// Query line with search status.
pub mod prompt;
/// Results rows and match highlighting.
pub mod rows;
pub mod scrollbar;
pub mod tables;

pub use preview::{PreviewContext, preview_lines, render_preview};
pub use prompt::{PromptContext, PromptStatus, render_prompt};
pub use scrollbar::{ScrollMetrics, point_in_rect, render_scrollbar};
pub use tables::{TableSpec, render_table};
