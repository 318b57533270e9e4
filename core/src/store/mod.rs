//! Local-first task collection with durable key-value persistence.

mod storage;
mod task_store;

pub use storage::{KeyValueStorage, MemoryStorage};
pub use task_store::{LoadOutcome, TaskStore, DEFAULT_STORAGE_KEY};
