//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `taskdesk_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, AppConfig, LoggingConfig, RemoteConfig, StorageConfig,
};
pub use crate::error::{
    format_error_chain, CliError, FetchError, RefreshError, SchemaError, StorageError,
    StoreError,
};
pub use crate::model::{
    parse_comments, parse_tasks, Comment, FormErrors, Task, TaskDraft, TaskForm, TaskStatus,
};
pub use crate::query::{query, FieldValue, QueryConfig, QueryPage, QueryState, Record, FILTER_ALL};
pub use crate::remote::{
    apply_fetched, reload_tasks, sync_tasks, RefreshMode, RefreshOutcome, RefreshSequencer,
    TaskSource,
};
pub use crate::store::{KeyValueStorage, LoadOutcome, MemoryStorage, TaskStore};
