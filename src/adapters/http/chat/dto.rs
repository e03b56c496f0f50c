//! Wire types for the chat endpoint.
//!
//! Success and error envelopes share the `success` discriminator. Error
//! envelopes never leak internals: validation errors carry field-level
//! details, everything else is the fixed "Internal error" text.

use serde::Serialize;

use crate::adapters::validation::FieldViolation;
use crate::application::SendMessageResult;
use crate::domain::conversation::Message;
use crate::domain::orchestration::{AggregatedResults, CapabilityName, LoopState, TravelIntent};

/// Success envelope for one chat turn.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    /// The synthesized natural-language answer.
    pub response: String,
    /// Full history including the new exchange, for the client to send back.
    pub history: Vec<Message>,
    pub metadata: ChatMetadata,
}

/// Observability block of the success envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMetadata {
    /// Correlation id for this request's log lines.
    pub request_id: String,
    /// The classified intent, rationale included.
    pub intent: TravelIntent,
    /// Capabilities the classifier enabled (a listed capability may still
    /// have failed; see `aggregatedResults.errors`).
    pub capabilities_used: Vec<CapabilityName>,
    /// Reasoning/invocation cycles consumed.
    pub steps_taken: u32,
    /// Terminal loop state.
    pub loop_state: LoopState,
    /// Everything retrieved, plus the failure list.
    pub aggregated_results: AggregatedResults,
}

impl ChatResponse {
    /// Builds the success envelope from a pipeline result.
    pub fn from_result(request_id: uuid::Uuid, result: SendMessageResult) -> Self {
        let outcome = result.outcome;
        Self {
            success: true,
            response: outcome.final_text,
            history: outcome.history,
            metadata: ChatMetadata {
                request_id: request_id.to_string(),
                intent: outcome.intent,
                capabilities_used: outcome.capabilities_used,
                steps_taken: result.steps_taken,
                loop_state: result.loop_state,
                aggregated_results: outcome.results,
            },
        }
    }
}

/// Error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldViolation>,
}

impl ErrorResponse {
    /// 400 envelope with field-level details.
    pub fn validation(details: Vec<FieldViolation>) -> Self {
        Self {
            success: false,
            error: "Validation error".to_string(),
            details,
        }
    }

    /// 500 envelope; deliberately detail-free.
    pub fn internal() -> Self {
        Self {
            success: false,
            error: "Internal error".to_string(),
            details: Vec::new(),
        }
    }
}
