use serde_json::Value;

/// Runtime view of a single field, as seen by the query engine.
///
/// Only `Text`, `Integer` and `Float` take part in search and filtering. `Other`
/// covers every non-primitive value and never matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
    Other,
}

impl FieldValue<'_> {
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::Other)
    }

    /// String form used for matching; `None` for non-primitive values.
    pub fn stringify(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some((*s).to_string()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Other => None,
        }
    }

    /// `needle` must already be lower-cased.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.stringify()
            .map(|s| s.to_lowercase().contains(needle))
            .unwrap_or(false)
    }

    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.stringify()
            .map(|s| s.to_lowercase() == other.to_lowercase())
            .unwrap_or(false)
    }
}

/// A record the query engine can look into by field name.
pub trait Record {
    /// `None` when the record has no such field.
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;

    /// Every field value, used when no explicit search keys are configured.
    fn fields(&self) -> Vec<FieldValue<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        (**self).field(key)
    }

    fn fields(&self) -> Vec<FieldValue<'_>> {
        (**self).fields()
    }
}

fn classify(value: &Value) -> FieldValue<'_> {
    match value {
        Value::String(s) => FieldValue::Text(s),
        Value::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Integer(i),
            None => n.as_f64().map(FieldValue::Float).unwrap_or(FieldValue::Other),
        },
        _ => FieldValue::Other,
    }
}

/// Schemaless records: object keys are fields, anything but an object has none.
impl Record for Value {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        self.as_object()?.get(key).map(classify)
    }

    fn fields(&self) -> Vec<FieldValue<'_>> {
        self.as_object()
            .map(|obj| obj.values().map(classify).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_primitive_never_matches() {
        let v = json!({"tags": ["urgent"], "meta": {"a": 1}, "flag": true, "none": null});
        for key in ["tags", "meta", "flag", "none"] {
            let field = v.field(key).unwrap();
            assert!(!field.is_primitive(), "{key}");
            assert!(!field.contains_lowercase("urgent"));
            assert!(!field.eq_ignore_case("true"));
        }
    }

    #[test]
    fn test_numbers_stringify() {
        assert_eq!(FieldValue::Integer(11).stringify().as_deref(), Some("11"));
        assert_eq!(FieldValue::Float(2.5).stringify().as_deref(), Some("2.5"));
        assert!(FieldValue::Integer(11).contains_lowercase("1"));
    }

    #[test]
    fn test_value_record_missing_field() {
        let v = json!({"title": "x"});
        assert!(v.field("status").is_none());
        assert!(json!("scalar").fields().is_empty());
    }
}
