//! Orchestration domain - the intent-driven multi-tool engine.
//!
//! Pure types and logic only: the capability registry, the classified intent,
//! the result aggregator, and the bounded step-loop state machine. All I/O
//! (LLM calls, lookups) happens behind ports driven by the application layer.

mod aggregate;
mod capability;
mod engine;
mod errors;
mod intent;

pub use aggregate::AggregatedResults;
pub use capability::{
    CapabilityDescriptor, CapabilityName, CapabilityPayload, CapabilityRegistry, CapabilityResult,
};
pub use engine::{LoopState, StepDecision, StepLoop, MAX_STEPS};
pub use errors::OrchestrationError;
pub use intent::{FlightParams, HotelParams, ActivityParams, RawExtraction, TravelIntent};

use crate::domain::conversation::Message;

/// Terminal value of one orchestrated request.
///
/// Constructed once per request and never reused.
#[derive(Debug, Clone)]
pub struct OrchestrationOutcome {
    /// The synthesized natural-language answer.
    pub final_text: String,
    /// The classifier's decision for this request.
    pub intent: TravelIntent,
    /// Everything retrieved (and every failure) across the loop.
    pub results: AggregatedResults,
    /// Capabilities the classifier enabled, in declaration order. A
    /// capability can be listed here and still have failed.
    pub capabilities_used: Vec<CapabilityName>,
    /// History with the new user and assistant turns appended.
    pub history: Vec<Message>,
}
