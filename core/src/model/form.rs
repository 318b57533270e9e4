use super::{TaskDraft, TaskStatus};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const BODY_REQUIRED: &str = "Description is required";

/// Raw creation-form input, untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub body: String,
}

/// Form input that passed validation; both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    title: String,
    body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every failed field at once, rendered one per line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.render())]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    fn render(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("  {}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TaskForm {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn validate(&self) -> Result<ValidatedForm, FormErrors> {
        let title = self.title.trim();
        let body = self.body.trim();

        let mut errors = Vec::new();
        if title.is_empty() {
            errors.push(FieldError {
                field: "title",
                message: TITLE_REQUIRED,
            });
        }
        if body.is_empty() {
            errors.push(FieldError {
                field: "body",
                message: BODY_REQUIRED,
            });
        }
        if !errors.is_empty() {
            return Err(FormErrors { errors });
        }

        Ok(ValidatedForm {
            title: title.to_string(),
            body: body.to_string(),
        })
    }
}

impl ValidatedForm {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// New tasks always start pending.
    pub fn into_draft(self, user_id: i64) -> TaskDraft {
        TaskDraft {
            user_id,
            title: self.title,
            body: self.body,
            status: TaskStatus::Pending,
        }
    }
}
