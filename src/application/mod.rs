//! Application layer - use cases driving the domain through the ports.

mod classify_intent;
mod orchestrate;
mod send_message;
mod synthesize;

pub use classify_intent::IntentClassifier;
pub use orchestrate::{LoopReport, StepOrchestrator};
pub use send_message::{SendMessageCommand, SendMessageHandler, SendMessageResult};
pub use synthesize::{ResponseSynthesizer, FALLBACK_TEXT};
