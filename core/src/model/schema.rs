use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{Comment, Task};
use crate::error::SchemaError;

pub fn parse_tasks(raw: &str) -> Result<Vec<Task>, SchemaError> {
    parse_tasks_value(parse_json(raw)?)
}

/// Validates a task-list payload. Every element must carry integer `userId` and `id`
/// plus string `title` and `body`; `status` is optional and falls back to pending.
pub fn parse_tasks_value(value: Value) -> Result<Vec<Task>, SchemaError> {
    parse_array(value)
}

pub fn parse_comments(raw: &str) -> Result<Vec<Comment>, SchemaError> {
    parse_comments_value(parse_json(raw)?)
}

pub fn parse_comments_value(value: Value) -> Result<Vec<Comment>, SchemaError> {
    parse_array(value)
}

fn parse_json(raw: &str) -> Result<Value, SchemaError> {
    serde_json::from_str(raw).map_err(|e| SchemaError::Json(e.to_string()))
}

fn parse_array<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, SchemaError> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(SchemaError::NotAnArray(json_kind(&other))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(SchemaError::Record {
                    index,
                    message: format!("expected an object, got {}", json_kind(&item)),
                });
            }
            serde_json::from_value(item).map_err(|e| SchemaError::Record {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
