#![allow(dead_code)]

use std::sync::Arc;

use taskdesk_core::api::{MemoryStorage, Task, TaskDraft, TaskStatus, TaskStore};

pub fn remote_task(id: i64, title: &str) -> Task {
    Task {
        user_id: 1,
        id,
        title: title.to_string(),
        body: format!("{title} body"),
        status: TaskStatus::Pending,
    }
}

pub fn draft(title: &str, body: &str) -> TaskDraft {
    TaskDraft {
        user_id: 1,
        title: title.to_string(),
        body: body.to_string(),
        status: TaskStatus::Pending,
    }
}

pub fn persisted_store() -> (Arc<MemoryStorage>, TaskStore) {
    let storage = Arc::new(MemoryStorage::new());
    let store = TaskStore::load(Some(storage.clone()), "tasks");
    (storage, store)
}

pub fn ids(tasks: &[&Task]) -> Vec<i64> {
    tasks.iter().map(|t| t.id).collect()
}
