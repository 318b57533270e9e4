//! Boundary to the remote task and comment sources.

mod sequencer;
mod source;
mod sync;

pub use sequencer::{FetchTicket, RefreshSequencer};
pub use source::TaskSource;
pub use sync::{apply_fetched, reload_tasks, sync_tasks, RefreshMode, RefreshOutcome};
