use std::sync::Arc;

use anyhow::{Context, Result};

use taskdesk_core::api::{
    format_error_chain, AppConfig, KeyValueStorage, StorageError, TaskSource, TaskStore,
};

use crate::remote::HttpTaskSource;
use crate::storage::FileStorage;

pub fn build_source(cfg: &AppConfig) -> Result<Arc<dyn TaskSource>> {
    let remote = &cfg.remote;
    let source = HttpTaskSource::new(
        &remote.base_url,
        &remote.tasks_path,
        &remote.comments_path,
        remote.timeout_ms,
    )
    .context("failed to build http task source")?;
    let source: Arc<dyn TaskSource> = Arc::new(source);
    Ok(source)
}

/// `None` when storage is disabled or has no directory; the store then runs headless.
pub fn build_storage(cfg: &AppConfig) -> Option<Arc<dyn KeyValueStorage>> {
    open_storage(cfg).unwrap_or_else(|e| {
        tracing::warn!(
            target: "taskdesk.store",
            stage = "factory.storage.unavailable",
            error = %format_error_chain(&e),
            "storage directory unusable; running in memory"
        );
        None
    })
}

/// Never fails: storage that cannot be opened degrades to an in-memory store whose
/// `load_outcome` is `Unavailable`.
pub fn build_store(cfg: &AppConfig) -> TaskStore {
    let key = cfg.storage.key.clone();
    match open_storage(cfg) {
        Ok(storage) => TaskStore::load(storage, key),
        Err(e) => {
            tracing::warn!(
                target: "taskdesk.store",
                stage = "factory.storage.unavailable",
                error = %format_error_chain(&e)
            );
            TaskStore::unavailable(key, format_error_chain(&e))
        }
    }
}

fn open_storage(cfg: &AppConfig) -> Result<Option<Arc<dyn KeyValueStorage>>, StorageError> {
    if !cfg.storage.enabled {
        return Ok(None);
    }
    let Some(dir) = cfg
        .storage
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        tracing::warn!(
            target: "taskdesk.store",
            stage = "factory.storage.no_dir",
            "storage enabled but no directory configured; running in memory"
        );
        return Ok(None);
    };
    let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(dir)?);
    Ok(Some(storage))
}
