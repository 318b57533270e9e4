use super::sequencer::{FetchTicket, RefreshSequencer};
use super::source::TaskSource;
use crate::error::{FetchError, RefreshError};
use crate::model::Task;
use crate::store::TaskStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Add only unseen tasks; local state wins. Use for every routine refresh.
    Merge,
    /// Let the fetched list fully supersede local state.
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Merged { added: usize },
    Replaced { count: usize },
    /// A newer fetch was already applied; this result was discarded.
    Stale,
}

/// Applies one completed fetch to the store.
///
/// A failed fetch leaves the store untouched. A successful one is applied at most
/// once, and only if no newer ticket has been applied before it.
pub fn apply_fetched(
    store: &mut TaskStore,
    sequencer: &mut RefreshSequencer,
    ticket: FetchTicket,
    fetched: Result<Vec<Task>, FetchError>,
    mode: RefreshMode,
) -> Result<RefreshOutcome, RefreshError> {
    let tasks = fetched.map_err(|e| {
        tracing::warn!(
            target: "taskdesk.remote",
            stage = "refresh.fetch_failed",
            ticket = ticket.value(),
            error = %e
        );
        e
    })?;

    if !sequencer.accept(ticket) {
        tracing::debug!(
            target: "taskdesk.remote",
            stage = "refresh.stale",
            ticket = ticket.value(),
            discarded = tasks.len()
        );
        return Ok(RefreshOutcome::Stale);
    }

    let outcome = match mode {
        RefreshMode::Merge => RefreshOutcome::Merged {
            added: store.merge(tasks)?,
        },
        RefreshMode::Replace => {
            let count = tasks.len();
            store.replace(tasks)?;
            RefreshOutcome::Replaced { count }
        }
    };
    tracing::debug!(
        target: "taskdesk.remote",
        stage = "refresh.applied",
        ticket = ticket.value(),
        outcome = ?outcome
    );
    Ok(outcome)
}

/// Fetches the remote list and merges it in.
pub async fn sync_tasks(
    store: &mut TaskStore,
    source: &dyn TaskSource,
    sequencer: &mut RefreshSequencer,
) -> Result<RefreshOutcome, RefreshError> {
    let ticket = sequencer.begin();
    tracing::debug!(
        target: "taskdesk.remote",
        stage = "refresh.begin",
        source = source.name(),
        ticket = ticket.value()
    );
    let fetched = source.fetch_tasks().await;
    apply_fetched(store, sequencer, ticket, fetched, RefreshMode::Merge)
}

/// Fetches the remote list and replaces local state with it. Local-only tasks are lost.
pub async fn reload_tasks(
    store: &mut TaskStore,
    source: &dyn TaskSource,
    sequencer: &mut RefreshSequencer,
) -> Result<RefreshOutcome, RefreshError> {
    let ticket = sequencer.begin();
    let fetched = source.fetch_tasks().await;
    apply_fetched(store, sequencer, ticket, fetched, RefreshMode::Replace)
}
