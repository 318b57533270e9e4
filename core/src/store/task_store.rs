use std::collections::HashSet;
use std::sync::Arc;

use super::storage::KeyValueStorage;
use crate::error::{format_error_chain, StoreError};
use crate::model::{parse_tasks, Task, TaskDraft, TaskStatus};

pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// What happened when the store read its persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No storage attached; the store lives in memory only.
    Headless,
    /// Storage was configured but could not be opened; the store lives in memory only.
    Unavailable { reason: String },
    /// Storage had nothing under the key.
    Empty,
    Loaded { count: usize },
    /// Persisted data was unreadable or failed validation and was discarded.
    Recovered { reason: String },
}

/// The authoritative task collection.
///
/// Single writer: every mutation takes `&mut self` and is written through to storage
/// before it returns. Id assignment reads the current maximum, which is only sound
/// while no other writer can interleave.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Option<Arc<dyn KeyValueStorage>>,
    key: String,
    load_outcome: LoadOutcome,
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks.len())
            .field("storage", &self.storage.as_ref().map(|s| s.name()))
            .field("key", &self.key)
            .field("load_outcome", &self.load_outcome)
            .finish()
    }
}

impl TaskStore {
    /// In-memory store with nothing persisted.
    pub fn headless() -> Self {
        Self {
            tasks: Vec::new(),
            storage: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
            load_outcome: LoadOutcome::Headless,
        }
    }

    /// In-memory store standing in for storage that could not be opened.
    pub fn unavailable(key: impl Into<String>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!(
            target: "taskdesk.store",
            stage = "store.load.unavailable",
            reason = %reason,
            "storage unavailable; changes will not survive this process"
        );
        Self {
            key: key.into(),
            load_outcome: LoadOutcome::Unavailable { reason },
            ..Self::headless()
        }
    }

    /// Loads prior state. Never fails: absent, unreadable or invalid data yields an
    /// empty collection, and the latter two are reported through `load_outcome`.
    pub fn load(storage: Option<Arc<dyn KeyValueStorage>>, key: impl Into<String>) -> Self {
        let key = key.into();
        let Some(storage) = storage else {
            tracing::debug!(target: "taskdesk.store", stage = "store.load.headless");
            return Self {
                key,
                ..Self::headless()
            };
        };

        let (tasks, load_outcome) = match storage.get(&key) {
            Ok(None) => (Vec::new(), LoadOutcome::Empty),
            Ok(Some(raw)) => match parse_tasks(&raw) {
                Ok(tasks) => {
                    let tasks = dedupe_ids(tasks);
                    let count = tasks.len();
                    (tasks, LoadOutcome::Loaded { count })
                }
                Err(e) => (Vec::new(), LoadOutcome::Recovered { reason: e.to_string() }),
            },
            Err(e) => (
                Vec::new(),
                LoadOutcome::Recovered {
                    reason: format_error_chain(&e),
                },
            ),
        };

        match &load_outcome {
            LoadOutcome::Recovered { reason } => tracing::warn!(
                target: "taskdesk.store",
                stage = "store.load.recovered",
                storage = storage.name(),
                key = %key,
                reason = %reason,
                "persisted tasks discarded; starting empty"
            ),
            other => tracing::debug!(
                target: "taskdesk.store",
                stage = "store.load.ok",
                storage = storage.name(),
                key = %key,
                outcome = ?other
            ),
        }

        Self {
            tasks,
            storage: Some(storage),
            key,
            load_outcome,
        }
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn next_id(&self) -> Result<i64, StoreError> {
        let max = self.tasks.iter().map(|t| t.id).max().unwrap_or(0).max(0);
        max.checked_add(1).ok_or(StoreError::IdExhausted { max })
    }

    /// Appends a new task with id `max + 1`. Fails without touching the collection
    /// when `max` is already `i64::MAX`.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        let task = draft.with_id(self.next_id()?);
        self.tasks.push(task.clone());
        tracing::info!(target: "taskdesk.store", stage = "store.create", id = task.id);
        self.persist()?;
        Ok(task)
    }

    /// Removes the task with `id`. Unknown ids are a no-op.
    pub fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            tracing::debug!(target: "taskdesk.store", stage = "store.delete.miss", id);
            return Ok(());
        }
        tracing::info!(target: "taskdesk.store", stage = "store.delete", id);
        self.persist()
    }

    /// Replaces the whole record in place. Unknown ids are a no-op.
    pub fn update(&mut self, task: Task) -> Result<(), StoreError> {
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) else {
            tracing::debug!(target: "taskdesk.store", stage = "store.update.miss", id = task.id);
            return Ok(());
        };
        let id = task.id;
        *slot = task;
        tracing::info!(target: "taskdesk.store", stage = "store.update", id);
        self.persist()
    }

    pub fn update_status(&mut self, id: i64, status: TaskStatus) -> Result<(), StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(target: "taskdesk.store", stage = "store.update_status.miss", id);
            return Ok(());
        };
        task.status = status;
        tracing::info!(
            target: "taskdesk.store",
            stage = "store.update_status",
            id,
            status = %status
        );
        self.persist()
    }

    /// Discards the collection and installs `tasks`. A repeated id keeps its first
    /// occurrence.
    pub fn replace(&mut self, tasks: Vec<Task>) -> Result<(), StoreError> {
        self.tasks = dedupe_ids(tasks);
        tracing::info!(
            target: "taskdesk.store",
            stage = "store.replace",
            count = self.tasks.len()
        );
        self.persist()
    }

    /// Appends incoming tasks whose id is not yet present, in incoming order. Tasks
    /// already in the store are left exactly as they are. Returns how many were added.
    pub fn merge(&mut self, incoming: Vec<Task>) -> Result<usize, StoreError> {
        let mut known: HashSet<i64> = self.tasks.iter().map(|t| t.id).collect();
        let received = incoming.len();
        let before = self.tasks.len();
        self.tasks
            .extend(incoming.into_iter().filter(|t| known.insert(t.id)));
        let added = self.tasks.len() - before;
        tracing::info!(
            target: "taskdesk.store",
            stage = "store.merge",
            received,
            added,
            total = self.tasks.len()
        );
        self.persist()?;
        Ok(added)
    }

    /// Empties the collection.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.tasks.clear();
        tracing::info!(target: "taskdesk.store", stage = "store.reset");
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(storage) = self.storage.as_ref() else {
            return Ok(());
        };
        let raw = serde_json::to_string(&self.tasks)?;
        storage.set(&self.key, &raw).map_err(|e| {
            tracing::error!(
                target: "taskdesk.store",
                stage = "store.persist.failed",
                storage = storage.name(),
                key = %self.key,
                error = %format_error_chain(&e)
            );
            StoreError::from(e)
        })
    }
}

fn dedupe_ids(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::with_capacity(tasks.len());
    let total = tasks.len();
    let unique: Vec<Task> = tasks.into_iter().filter(|t| seen.insert(t.id)).collect();
    if unique.len() != total {
        tracing::warn!(
            target: "taskdesk.store",
            stage = "store.dedupe",
            dropped = total - unique.len()
        );
    }
    unique
}
