use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// On-disk body of a transaction record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordBody {
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
    #[serde(default)]
    pub participants: Vec<ParticipantRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParticipantRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub uid: String,
    pub type_name: String,
    pub body: RecordBody,
}

impl TransactionRecord {
    pub fn new(type_name: impl Into<String>, uid: impl Into<String>, body: RecordBody) -> Self {
        Self {
            uid: uid.into(),
            type_name: type_name.into(),
            body,
        }
    }
}

/// Textual form of an attribute value; JSON `null` has none.
pub fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!(null)), None);
        assert_eq!(render_value(&json!("Active")), Some("Active".to_string()));
        assert_eq!(render_value(&json!(42)), Some("42".to_string()));
        assert_eq!(render_value(&json!(true)), Some("true".to_string()));
    }

    #[test]
    fn test_body_defaults_missing_sections() {
        let body: RecordBody = serde_json::from_str("{}").unwrap();
        assert!(body.attributes.is_empty());
        assert!(body.participants.is_empty());

        let body: RecordBody = serde_json::from_str(
            r#"{"participants": [{"id": "p1", "attributes": {"Status": "Compensated"}}]}"#,
        )
        .unwrap();
        assert_eq!(body.participants[0].id, "p1");
        assert_eq!(body.participants[0].attributes["Status"], json!("Compensated"));
    }
}
