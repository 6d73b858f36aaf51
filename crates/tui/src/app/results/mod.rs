//! Results table state.

mod state;

pub(crate) use state::ResultsState;
