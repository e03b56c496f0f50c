//! Capability invoker port - one external lookup behind a trait.
//!
//! Each registered capability is backed by one invoker. Invokers are
//! independent of each other; one invoker's failure never blocks a sibling.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::orchestration::{CapabilityName, CapabilityPayload};

/// Failure modes of a single capability invocation.
///
/// All of these are recoverable at the loop level: they become entries in
/// the aggregated error list, nothing more.
#[derive(Debug, Clone, Error)]
pub enum CapabilityError {
    /// The lookup did not answer within its deadline.
    #[error("timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Transport-level failure reaching the service.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("service returned status '{status}'")]
    BadStatus { status: String },

    /// The service's body did not match the declared shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A generative capability's model call failed.
    #[error("generation failed: {0}")]
    Generation(String),
}

/// Port for executing one capability's lookup.
#[async_trait]
pub trait CapabilityInvoker: Send + Sync {
    /// The capability this invoker backs.
    fn capability(&self) -> CapabilityName;

    /// Executes the lookup with the given wire-format parameters.
    async fn invoke(&self, params: Value) -> Result<CapabilityPayload, CapabilityError>;
}
