use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::query::{FieldValue, Record};

/// Two-state status; neither state is terminal and there is no ordering between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown task status: {other}")),
        }
    }
}

// Ingestion never fails on status: null, empty, non-string and unknown values all
// resolve to `Pending`.
impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub status: TaskStatus,
}

/// A task before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub user_id: i64,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub status: TaskStatus,
}

impl TaskDraft {
    pub fn with_id(self, id: i64) -> Task {
        Task {
            user_id: self.user_id,
            id,
            title: self.title,
            body: self.body,
            status: self.status,
        }
    }
}

impl Record for Task {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "userId" | "user_id" => Some(FieldValue::Integer(self.user_id)),
            "id" => Some(FieldValue::Integer(self.id)),
            "title" => Some(FieldValue::Text(&self.title)),
            "body" => Some(FieldValue::Text(&self.body)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            _ => None,
        }
    }

    fn fields(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Integer(self.user_id),
            FieldValue::Integer(self.id),
            FieldValue::Text(&self.title),
            FieldValue::Text(&self.body),
            FieldValue::Text(self.status.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_defaults_when_missing() {
        let task: Task =
            serde_json::from_str(r#"{"userId":1,"id":1,"title":"X","body":"Y"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn test_status_defaults_when_unrecognized_or_null() {
        for raw in [r#""archived""#, "null", r#""""#, "3"] {
            let json = format!(r#"{{"userId":1,"id":1,"title":"X","body":"Y","status":{raw}}}"#);
            let task: Task = serde_json::from_str(&json).unwrap();
            assert_eq!(task.status, TaskStatus::Pending, "status={raw}");
        }
    }

    #[test]
    fn test_status_round_trips_lowercase() {
        let task = Task {
            user_id: 2,
            id: 7,
            title: "t".into(),
            body: "b".into(),
            status: TaskStatus::Completed,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"userId":2,"id":7,"title":"t","body":"b","status":"completed"})
        );
    }

    #[test]
    fn test_status_from_str_is_case_insensitive() {
        assert_eq!("Completed".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(TaskStatus::Pending.label(), "Pending");
        assert_eq!(TaskStatus::Completed.label(), "Completed");
    }
}
