use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// Body of `POST /chat`.
///
/// A missing or non-string `question` deserializes to an empty string so that
/// every malformed variant is rejected by the same validation rule.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "string_or_empty")]
    #[validate(custom(function = "validate_not_blank"))]
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub answer: String,
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
