//! Preview pane: a windowed, highlighted slice of the selected file.

mod lines;
mod render;

pub use lines::{gutter_width, preview_lines};
pub use render::{PreviewContext, render_preview};
