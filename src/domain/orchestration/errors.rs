//! Orchestration error types.
//!
//! Individual capability failures are NOT errors here - they are ordinary
//! `CapabilityResult` failures folded into the aggregate. These variants
//! cover faults in the loop substrate itself, which degrade the whole
//! request to the fallback response.

use thiserror::Error;

use super::engine::LoopState;

/// Unrecoverable faults in the orchestration substrate.
#[derive(Debug, Clone, Error)]
pub enum OrchestrationError {
    /// The loop state machine was driven out of order.
    #[error("invalid loop transition: {action} while {state:?}")]
    InvalidTransition {
        state: LoopState,
        action: &'static str,
    },

    /// The planning (reasoning) step itself failed.
    #[error("planning step failed: {0}")]
    Planning(String),
}
