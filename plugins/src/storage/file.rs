use std::io::Write;
use std::path::{Path, PathBuf};

use taskdesk_core::api::{KeyValueStorage, StorageError};

/// Key-value storage with one `<key>.json` file per key under a directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::Write {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    // Write to a sibling temp file, then rename over the target, so a crash mid-write
    // leaves the previous value intact.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let target = self.path_for(key);
        let tmp = target.with_extension("json.tmp");
        let write = || -> std::io::Result<()> {
            let mut f = std::fs::File::create(&tmp)?;
            f.write_all(value.as_bytes())?;
            f.sync_all()?;
            std::fs::rename(&tmp, &target)
        };
        write().map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })?;
        tracing::trace!(
            target: "taskdesk.store",
            stage = "file.set",
            path = %target.display(),
            bytes = value.len()
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use taskdesk_core::api::{LoadOutcome, TaskDraft, TaskStatus, TaskStore};

    #[test]
    fn test_get_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        assert_eq!(storage.get("tasks").unwrap(), None);
        storage.remove("tasks").unwrap();
    }

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested")).unwrap();
        storage.set("tasks", "[]").unwrap();
        assert_eq!(storage.get("tasks").unwrap().as_deref(), Some("[]"));
        assert!(storage.dir().join("tasks.json").exists());
        assert!(!storage.dir().join("tasks.json.tmp").exists());
        storage.remove("tasks").unwrap();
        assert_eq!(storage.get("tasks").unwrap(), None);
    }

    #[test]
    fn test_key_is_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        storage.set("../escape", "x").unwrap();
        assert!(dir.path().join("___escape.json").exists());
    }

    #[test]
    fn test_store_survives_restart_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = Arc::new(FileStorage::new(dir.path()).unwrap());
            let mut store = TaskStore::load(Some(storage), "tasks");
            store
                .create(TaskDraft {
                    user_id: 1,
                    title: "T".into(),
                    body: "D".into(),
                    status: TaskStatus::Pending,
                })
                .unwrap();
        }
        let storage = Arc::new(FileStorage::new(dir.path()).unwrap());
        let store = TaskStore::load(Some(storage), "tasks");
        assert_eq!(store.load_outcome(), &LoadOutcome::Loaded { count: 1 });
        assert_eq!(store.tasks()[0].title, "T");
    }

    #[test]
    fn test_corrupt_file_recovers_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tasks.json"), "{{{").unwrap();
        let storage = Arc::new(FileStorage::new(dir.path()).unwrap());
        let store = TaskStore::load(Some(storage), "tasks");
        assert!(store.is_empty());
        assert!(matches!(store.load_outcome(), LoadOutcome::Recovered { .. }));
    }
}
