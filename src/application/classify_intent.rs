//! Intent classification use case.
//!
//! One model call extracts the trip parameters stated in the prompt and
//! history; the completeness policy in `TravelIntent::from_extraction` then
//! decides which capabilities those parameters actually enable.
//!
//! Classification never fails the request: any model or parse error degrades
//! to the no-capability intent and the request proceeds conversationally.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::conversation::Message;
use crate::domain::orchestration::{RawExtraction, TravelIntent};
use crate::ports::{AiProvider, CompletionRequest};

const EXTRACTION_PROMPT: &str = "You extract travel planning parameters from a conversation. \
    Respond with ONLY a JSON object with these fields: \
    \"isTravelRequest\" (boolean), \
    \"comprehensive\" (boolean, true when the user asks for a whole trip to be planned), \
    \"origin\", \"destination\", \"departureDate\", \"returnDate\" (strings, YYYY-MM-DD), \
    \"travelers\" (integer), \"checkIn\", \"checkOut\" (strings, YYYY-MM-DD). \
    Omit or set to null any value the conversation does not state. Never invent values.";

/// Classifies a prompt (plus history) into a `TravelIntent`.
pub struct IntentClassifier {
    provider: Arc<dyn AiProvider>,
}

impl IntentClassifier {
    /// Creates a classifier on top of an AI provider.
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    /// Classifies one request. Infallible by design; failures degrade to
    /// the no-capability intent.
    pub async fn classify(&self, prompt: &str, history: &[Message]) -> TravelIntent {
        // The model needs an anchor to resolve "next Friday" style dates.
        let today = chrono::Utc::now().format("%Y-%m-%d");
        let request = CompletionRequest::new()
            .with_system_prompt(format!("{} Today's date is {}.", EXTRACTION_PROMPT, today))
            .with_messages(history.to_vec())
            .with_message(crate::domain::conversation::Role::User, prompt)
            .with_temperature(0.0);

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "intent classification call failed; treating as generic");
                return TravelIntent::none_needed(format!("Classification failed: {}", e));
            }
        };

        let raw = match Self::parse_extraction(&response.content) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "unparseable extraction; treating as generic");
                return TravelIntent::none_needed(format!("Classification unparseable: {}", e));
            }
        };

        let intent = TravelIntent::from_extraction(raw);
        debug!(rationale = %intent.rationale, "intent classified");
        intent
    }

    /// Parses the extraction JSON, tolerating markdown code fences.
    fn parse_extraction(content: &str) -> Result<RawExtraction, serde_json::Error> {
        let trimmed = content.trim();
        let trimmed = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .unwrap_or(trimmed);
        let cleaned = trimmed.strip_suffix("```").unwrap_or(trimmed).trim();
        serde_json::from_str(cleaned)
    }
}
