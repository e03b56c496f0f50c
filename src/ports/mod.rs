//! Ports - async traits at the system's seams.

mod ai_provider;
mod capability_invoker;

pub use ai_provider::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    ToolCallRequest,
};
pub use capability_invoker::{CapabilityError, CapabilityInvoker};
