//! Chat request validator.
//!
//! Validates the raw request body by manual walk, without an external schema
//! dependency. Violations are accumulated so one response reports everything
//! that is wrong, each with the offending field path.
//!
//! # History conventions
//!
//! Two history shapes are accepted and normalized to the same `Message`:
//!
//! - `{ "role": ..., "content": "text" }`
//! - `{ "role": ..., "parts": [{ "text": "..." }, ...] }` (parts concatenated)
//!
//! The role "model" is accepted as an alias for "assistant".

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::conversation::{Message, Role};

/// A validated chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatInput {
    pub prompt: String,
    pub history: Vec<Message>,
}

/// One field-level validation violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    /// Path of the offending field (e.g. "history[2].role").
    pub path: String,
    /// What was wrong with it.
    pub message: String,
    /// The offending value as received; null when the field was absent.
    pub received: Value,
}

impl FieldViolation {
    fn new(path: impl Into<String>, message: impl Into<String>, received: Value) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            received,
        }
    }

    fn missing(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, message, Value::Null)
    }
}

/// All violations found in one request.
#[derive(Debug, Clone, Error)]
#[error("request validation failed with {} violation(s)", .violations.len())]
pub struct ValidationErrors {
    pub violations: Vec<FieldViolation>,
}

/// Validator for the chat endpoint's request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestValidator;

impl RequestValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates and normalizes a raw request body.
    pub fn validate_chat_request(&self, body: &Value) -> Result<ChatInput, ValidationErrors> {
        let mut violations = Vec::new();

        let obj = match body.as_object() {
            Some(obj) => obj,
            None => {
                return Err(ValidationErrors {
                    violations: vec![FieldViolation::new(
                        "root",
                        "request body must be an object",
                        body.clone(),
                    )],
                })
            }
        };

        let prompt = match obj.get("prompt") {
            None => {
                violations.push(FieldViolation::missing("prompt", "field is required"));
                String::new()
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                violations.push(FieldViolation::new(
                    "prompt",
                    "must not be empty",
                    Value::String(s.clone()),
                ));
                String::new()
            }
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                violations.push(FieldViolation::new(
                    "prompt",
                    "must be a string",
                    other.clone(),
                ));
                String::new()
            }
        };

        let history = match obj.get("history") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                let mut messages = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    if let Some(message) = Self::validate_history_item(item, i, &mut violations) {
                        messages.push(message);
                    }
                }
                messages
            }
            Some(other) => {
                violations.push(FieldViolation::new(
                    "history",
                    "must be an array",
                    other.clone(),
                ));
                Vec::new()
            }
        };

        if violations.is_empty() {
            Ok(ChatInput { prompt, history })
        } else {
            Err(ValidationErrors { violations })
        }
    }

    /// Validates one history entry, normalizing either content convention.
    fn validate_history_item(
        item: &Value,
        index: usize,
        violations: &mut Vec<FieldViolation>,
    ) -> Option<Message> {
        let path = format!("history[{}]", index);

        let obj = match item.as_object() {
            Some(obj) => obj,
            None => {
                violations.push(FieldViolation::new(path, "must be an object", item.clone()));
                return None;
            }
        };

        let role = match obj.get("role").and_then(|v| v.as_str()) {
            Some("user") => Role::User,
            Some("assistant") | Some("model") => Role::Assistant,
            Some(other) => {
                violations.push(FieldViolation::new(
                    format!("{}.role", path),
                    format!("unknown role '{}'", other),
                    Value::String(other.to_string()),
                ));
                return None;
            }
            None => {
                violations.push(FieldViolation::new(
                    format!("{}.role", path),
                    "field is required and must be a string",
                    obj.get("role").cloned().unwrap_or(Value::Null),
                ));
                return None;
            }
        };

        let content = match (obj.get("content"), obj.get("parts")) {
            (Some(Value::String(s)), _) => s.clone(),
            (Some(other), _) => {
                violations.push(FieldViolation::new(
                    format!("{}.content", path),
                    "must be a string",
                    other.clone(),
                ));
                return None;
            }
            (None, Some(Value::Array(parts))) => {
                let mut text = String::new();
                for (j, part) in parts.iter().enumerate() {
                    match part.get("text").and_then(|v| v.as_str()) {
                        Some(t) => text.push_str(t),
                        None => {
                            violations.push(FieldViolation::new(
                                format!("{}.parts[{}].text", path, j),
                                "field is required and must be a string",
                                part.get("text").cloned().unwrap_or(Value::Null),
                            ));
                            return None;
                        }
                    }
                }
                text
            }
            (None, Some(other)) => {
                violations.push(FieldViolation::new(
                    format!("{}.parts", path),
                    "must be an array",
                    other.clone(),
                ));
                return None;
            }
            (None, None) => {
                violations.push(FieldViolation::missing(
                    path,
                    "must carry either 'content' or 'parts'",
                ));
                return None;
            }
        };

        Some(Message::new(role, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(body: Value) -> Result<ChatInput, ValidationErrors> {
        RequestValidator::new().validate_chat_request(&body)
    }

    #[test]
    fn minimal_valid_request_passes() {
        let input = validate(json!({"prompt": "Plan my trip"})).unwrap();
        assert_eq!(input.prompt, "Plan my trip");
        assert!(input.history.is_empty());
    }

    #[test]
    fn missing_prompt_is_rejected() {
        let err = validate(json!({})).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].path, "prompt");
        assert_eq!(err.violations[0].received, Value::Null);
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let err = validate(json!({"prompt": "   "})).unwrap_err();
        assert_eq!(err.violations[0].path, "prompt");
        assert!(err.violations[0].message.contains("empty"));
    }

    #[test]
    fn non_string_prompt_is_rejected() {
        let err = validate(json!({"prompt": 42})).unwrap_err();
        assert!(err.violations[0].message.contains("string"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = validate(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.violations[0].path, "root");
    }

    #[test]
    fn content_convention_is_accepted() {
        let input = validate(json!({
            "prompt": "And hotels?",
            "history": [
                {"role": "user", "content": "Flights to Goa"},
                {"role": "assistant", "content": "Here are some flights."}
            ]
        }))
        .unwrap();

        assert_eq!(input.history.len(), 2);
        assert_eq!(input.history[0].role, Role::User);
        assert_eq!(input.history[1].content, "Here are some flights.");
    }

    #[test]
    fn parts_convention_is_accepted() {
        let input = validate(json!({
            "prompt": "And hotels?",
            "history": [
                {"role": "user", "parts": [{"text": "Flights "}, {"text": "to Goa"}]},
                {"role": "model", "parts": [{"text": "Here are some flights."}]}
            ]
        }))
        .unwrap();

        assert_eq!(input.history[0].content, "Flights to Goa");
        assert_eq!(input.history[1].role, Role::Assistant);
    }

    #[test]
    fn model_role_is_assistant_alias() {
        let input = validate(json!({
            "prompt": "hi",
            "history": [{"role": "model", "content": "hello"}]
        }))
        .unwrap();
        assert_eq!(input.history[0].role, Role::Assistant);
    }

    #[test]
    fn unknown_role_is_rejected_with_path() {
        let err = validate(json!({
            "prompt": "hi",
            "history": [{"role": "wizard", "content": "zap"}]
        }))
        .unwrap_err();

        assert_eq!(err.violations[0].path, "history[0].role");
        assert!(err.violations[0].message.contains("wizard"));
        assert_eq!(err.violations[0].received, json!("wizard"));
    }

    #[test]
    fn history_entry_without_content_or_parts_is_rejected() {
        let err = validate(json!({
            "prompt": "hi",
            "history": [{"role": "user"}]
        }))
        .unwrap_err();

        assert_eq!(err.violations[0].path, "history[0]");
    }

    #[test]
    fn non_array_history_is_rejected() {
        let err = validate(json!({"prompt": "hi", "history": "nope"})).unwrap_err();
        assert_eq!(err.violations[0].path, "history");
    }

    #[test]
    fn all_violations_are_reported_together() {
        let err = validate(json!({
            "history": [
                {"role": "wizard", "content": "zap"},
                {"role": "user"}
            ]
        }))
        .unwrap_err();

        // Missing prompt plus two bad history entries.
        assert_eq!(err.violations.len(), 3);
    }

    #[test]
    fn null_history_is_treated_as_empty() {
        let input = validate(json!({"prompt": "hi", "history": null})).unwrap();
        assert!(input.history.is_empty());
    }
}
