//! Preview pane state: visibility, scroll position, and the rendered window.

mod state;

pub(crate) use state::PreviewState;
