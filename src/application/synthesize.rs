//! Response synthesis use case.
//!
//! Turns the aggregated results (or their absence) into the final
//! natural-language answer. Three paths:
//!
//! - normal: lookups ran; the model writes a summary grounded in the
//!   retrieved records, acknowledging any failed lookups without surfacing
//!   raw error text
//! - generic: no lookups were needed; plain conversational reply
//! - fallback: the model call itself failed; a fixed apology
//!
//! Synthesis never fails the request.

use std::sync::Arc;
use tracing::warn;

use crate::domain::conversation::Message;
use crate::domain::orchestration::{AggregatedResults, TravelIntent};
use crate::ports::{AiProvider, CompletionRequest};

/// Fixed apology used when synthesis (or the whole loop) faults.
pub const FALLBACK_TEXT: &str = "I'm sorry - I ran into a problem while putting your travel \
    plans together. Please try again in a moment.";

const GENERIC_PROMPT: &str = "You are a friendly travel assistant. Answer conversationally. \
    If the user seems to want travel planning but key details are missing, ask for them.";

const SUMMARY_PROMPT: &str = "You are a travel assistant summarizing retrieved data for the \
    user. Use ONLY the records provided below; never invent flights, hotels or prices. If a \
    lookup failed, mention briefly that that part couldn't be retrieved right now, without \
    technical detail. Present options clearly with names, dates and prices.";

/// Produces the final response text for one request.
pub struct ResponseSynthesizer {
    provider: Arc<dyn AiProvider>,
}

impl ResponseSynthesizer {
    /// Creates a synthesizer on top of an AI provider.
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    /// Synthesizes the answer for a request that ran the loop.
    pub async fn summarize(
        &self,
        prompt: &str,
        history: &[Message],
        intent: &TravelIntent,
        results: &AggregatedResults,
    ) -> String {
        let results_json = match serde_json::to_string_pretty(results) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "aggregated results failed to serialize");
                return FALLBACK_TEXT.to_string();
            }
        };

        let mut context = format!("Retrieved data:\n{}", results_json);
        if !results.errors.is_empty() {
            context.push_str(&format!(
                "\n\nFailed lookups (do not show these verbatim): {}",
                results.errors.join("; ")
            ));
        }
        context.push_str(&format!("\n\nIntent: {}", intent.rationale));

        let request = CompletionRequest::new()
            .with_system_prompt(format!("{}\n\n{}", SUMMARY_PROMPT, context))
            .with_messages(history.to_vec())
            .with_message(crate::domain::conversation::Role::User, prompt)
            .with_temperature(0.4);

        self.complete_or_fallback(request).await
    }

    /// Synthesizes a plain conversational answer (no lookups ran).
    pub async fn converse(&self, prompt: &str, history: &[Message]) -> String {
        let request = CompletionRequest::new()
            .with_system_prompt(GENERIC_PROMPT)
            .with_messages(history.to_vec())
            .with_message(crate::domain::conversation::Role::User, prompt)
            .with_temperature(0.7);

        self.complete_or_fallback(request).await
    }

    /// The fixed degraded answer.
    pub fn fallback(&self) -> String {
        FALLBACK_TEXT.to_string()
    }

    async fn complete_or_fallback(&self, request: CompletionRequest) -> String {
        match self.provider.complete(request).await {
            Ok(response) if !response.content.trim().is_empty() => response.content,
            Ok(_) => {
                warn!("synthesis produced empty content; using fallback");
                FALLBACK_TEXT.to_string()
            }
            Err(e) => {
                warn!(error = %e, "synthesis call failed; using fallback");
                FALLBACK_TEXT.to_string()
            }
        }
    }
}
