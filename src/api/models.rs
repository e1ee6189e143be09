use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

/// Body of `POST /questions/`.
#[derive(Serialize, Deserialize, Validate, Clone, Debug, PartialEq, Eq)]
pub struct QuestionPayload {
    #[validate(custom = "not_blank")]
    pub question_text: String,
    #[validate(custom = "not_blank")]
    pub answer_text: String,
    #[validate(custom = "not_blank")]
    pub question_type: String,
    #[validate(custom = "not_blank")]
    pub category: String,
    #[validate(custom = "not_blank")]
    pub subcategory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_file_path: Option<String>,
}

/// Required fields in the order their absence is reported.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "question_text",
    "answer_text",
    "question_type",
    "category",
    "subcategory",
];

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl QuestionPayload {
    /// First missing required field, as a user-facing message.
    pub fn presence_error(&self) -> Option<String> {
        let errors = self.validate().err()?;
        let failed = errors.field_errors();
        REQUIRED_FIELDS
            .iter()
            .find(|field| failed.contains_key(**field))
            .map(|field| format!("Please fill in the {} field.", field.replacen('_', " ", 1)))
    }
}

/// Server-assigned question id; the API has returned both integers and UUID strings.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{}", n),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct CreatedQuestion {
    pub id: QuestionId,
}

/// Pulls a readable message out of an error body's `detail` field.
///
/// FastAPI sends either a plain string or a list of `{loc, msg, type}` entries.
pub fn extract_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filled() -> QuestionPayload {
        QuestionPayload {
            question_text: "Q".to_string(),
            answer_text: "A".to_string(),
            question_type: "image".to_string(),
            category: "Science".to_string(),
            subcategory: "Physics".to_string(),
            media_file_path: None,
        }
    }

    #[test]
    fn test_complete_payload_passes_presence_check() {
        assert_eq!(filled().presence_error(), None);
    }

    #[test]
    fn test_first_missing_field_reported() {
        let mut payload = filled();
        payload.category = "  ".to_string();
        payload.subcategory = String::new();
        assert_eq!(
            payload.presence_error().as_deref(),
            Some("Please fill in the category field.")
        );

        payload.question_text = String::new();
        assert_eq!(
            payload.presence_error().as_deref(),
            Some("Please fill in the question text field.")
        );
    }

    #[test]
    fn test_media_path_omitted_when_absent() {
        let body = serde_json::to_value(filled()).unwrap();
        assert!(body.get("media_file_path").is_none());

        let mut payload = filled();
        payload.media_file_path = Some("media/images/cat.png".to_string());
        let body = serde_json::to_value(payload).unwrap();
        assert_eq!(body["media_file_path"], "media/images/cat.png");
    }

    #[test]
    fn test_question_id_display() {
        let numeric: CreatedQuestion = serde_json::from_value(json!({"id": 42, "category": "Music"})).unwrap();
        assert_eq!(numeric.id.to_string(), "42");

        let uuid: CreatedQuestion =
            serde_json::from_value(json!({"id": "9b2f6c1e-8a52-4d0e-9f0b-2f5d3c1a7e44"})).unwrap();
        assert_eq!(uuid.id.to_string(), "9b2f6c1e-8a52-4d0e-9f0b-2f5d3c1a7e44");
    }

    #[test]
    fn test_extract_detail_variants() {
        assert_eq!(
            extract_detail(&json!({"detail": "category required"})).as_deref(),
            Some("category required")
        );
        assert_eq!(
            extract_detail(&json!({"detail": [
                {"loc": ["body", "category"], "msg": "field required", "type": "value_error.missing"},
                {"loc": ["body", "answer_text"], "msg": "ensure this value has at least 1 characters"}
            ]}))
            .as_deref(),
            Some("field required; ensure this value has at least 1 characters")
        );
        assert_eq!(extract_detail(&json!({"detail": ""})), None);
        assert_eq!(extract_detail(&json!({"error": "boom"})), None);
    }
}
