use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::{Comment, Task};

/// Read-only remote source. Implementations validate payloads before returning them.
#[async_trait]
pub trait TaskSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_tasks(&self) -> Result<Vec<Task>, FetchError>;
    async fn fetch_comments(&self, task_id: i64) -> Result<Vec<Comment>, FetchError>;
}
