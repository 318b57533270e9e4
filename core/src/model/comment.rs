use serde::{Deserialize, Serialize};

use crate::query::{FieldValue, Record};

/// Remote-only feedback attached to a task through `postId`. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: i64,
    pub id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

impl Record for Comment {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "postId" | "post_id" => Some(FieldValue::Integer(self.post_id)),
            "id" => Some(FieldValue::Integer(self.id)),
            "name" => Some(FieldValue::Text(&self.name)),
            "email" => Some(FieldValue::Text(&self.email)),
            "body" => Some(FieldValue::Text(&self.body)),
            _ => None,
        }
    }

    fn fields(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::Integer(self.post_id),
            FieldValue::Integer(self.id),
            FieldValue::Text(&self.name),
            FieldValue::Text(&self.email),
            FieldValue::Text(&self.body),
        ]
    }
}
