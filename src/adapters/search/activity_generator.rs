//! Activity generator.
//!
//! The activities capability has no backing service; suggestions are
//! generated by the AI provider and parsed out of its JSON answer. Model
//! output wrapped in markdown code fences is tolerated.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::domain::orchestration::{CapabilityName, CapabilityPayload};
use crate::domain::travel::ActivityIdea;
use crate::ports::{AiProvider, CapabilityError, CapabilityInvoker, CompletionRequest};

const GENERATION_PROMPT: &str = "You are a travel activity recommender. Given a destination, \
    suggest 4 to 6 concrete activities a visitor should consider. Respond with ONLY a JSON \
    array of objects with fields \"title\", \"description\" and \"category\". No prose, no \
    markdown.";

/// Invoker for the activities capability, backed by the AI provider.
pub struct ActivityGenerator {
    provider: Arc<dyn AiProvider>,
}

impl ActivityGenerator {
    /// Creates a generator on top of an AI provider.
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    /// Strips markdown code fences some models wrap JSON in.
    fn strip_fences(content: &str) -> &str {
        let trimmed = content.trim();
        let trimmed = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .unwrap_or(trimmed);
        trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
    }

    fn parse_activities(content: &str) -> Result<Vec<ActivityIdea>, CapabilityError> {
        let cleaned = Self::strip_fences(content);
        serde_json::from_str::<Vec<ActivityIdea>>(cleaned)
            .map_err(|e| CapabilityError::MalformedPayload(format!("activity JSON: {}", e)))
    }
}

#[async_trait]
impl CapabilityInvoker for ActivityGenerator {
    fn capability(&self) -> CapabilityName {
        CapabilityName::Activities
    }

    async fn invoke(&self, params: Value) -> Result<CapabilityPayload, CapabilityError> {
        let destination = params
            .get("destination")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                CapabilityError::MalformedPayload("missing destination parameter".to_string())
            })?;

        debug!(%destination, "generating activity suggestions");

        let request = CompletionRequest::new()
            .with_system_prompt(GENERATION_PROMPT)
            .with_message(
                crate::domain::conversation::Role::User,
                format!("Destination: {}", destination),
            )
            .with_temperature(0.7);

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| CapabilityError::Generation(e.to_string()))?;

        let activities = Self::parse_activities(&response.content)?;
        debug!(count = activities.len(), "activity generation succeeded");
        Ok(CapabilityPayload::Activities(activities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockError};
    use serde_json::json;

    const IDEAS_JSON: &str = r#"[
        {"title": "Gateway of India", "description": "Waterfront landmark", "category": "sightseeing"},
        {"title": "Marine Drive", "description": "Seaside promenade", "category": "walking"}
    ]"#;

    #[tokio::test]
    async fn generates_activities_from_model_json() {
        let provider = Arc::new(MockAiProvider::new().with_response(IDEAS_JSON));
        let generator = ActivityGenerator::new(provider);

        let payload = generator
            .invoke(json!({"destination": "Mumbai"}))
            .await
            .unwrap();

        match payload {
            CapabilityPayload::Activities(ideas) => {
                assert_eq!(ideas.len(), 2);
                assert_eq!(ideas[0].title, "Gateway of India");
            }
            other => panic!("wrong payload: {:?}", other),
        }
    }

    #[tokio::test]
    async fn tolerates_code_fenced_output() {
        let fenced = format!("```json\n{}\n```", IDEAS_JSON);
        let provider = Arc::new(MockAiProvider::new().with_response(fenced));
        let generator = ActivityGenerator::new(provider);

        let payload = generator
            .invoke(json!({"destination": "Goa"}))
            .await
            .unwrap();
        assert_eq!(payload.len(), 2);
    }

    #[tokio::test]
    async fn missing_destination_is_malformed() {
        let provider = Arc::new(MockAiProvider::new());
        let generator = ActivityGenerator::new(provider);

        let err = generator.invoke(json!({})).await.unwrap_err();
        assert!(matches!(err, CapabilityError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn provider_failure_becomes_generation_error() {
        let provider = Arc::new(MockAiProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        }));
        let generator = ActivityGenerator::new(provider);

        let err = generator
            .invoke(json!({"destination": "Goa"}))
            .await
            .unwrap_err();
        assert!(matches!(err, CapabilityError::Generation(_)));
    }

    #[tokio::test]
    async fn non_json_answer_is_malformed() {
        let provider = Arc::new(MockAiProvider::new().with_response("Sure! Here are some ideas."));
        let generator = ActivityGenerator::new(provider);

        let err = generator
            .invoke(json!({"destination": "Goa"}))
            .await
            .unwrap_err();
        assert!(matches!(err, CapabilityError::MalformedPayload(_)));
    }
}
