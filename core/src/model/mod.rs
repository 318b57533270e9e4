//! Record shapes and the validators applied at every trust boundary.

mod comment;
mod form;
mod schema;
mod task;

pub use comment::Comment;
pub use form::{FieldError, FormErrors, TaskForm, ValidatedForm};
pub use schema::{parse_comments, parse_comments_value, parse_tasks, parse_tasks_value};
pub use task::{Task, TaskDraft, TaskStatus};
