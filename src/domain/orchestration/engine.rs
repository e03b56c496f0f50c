//! Step loop state machine.
//!
//! `Idle → Reasoning → Invoking → (Reasoning | Done)`, with `Done` and
//! `Failed` terminal. The step budget is an invariant of this type: the loop
//! cannot run more than [`MAX_STEPS`] reasoning/invocation cycles regardless
//! of what the planning model asks for. Exhausting the budget forces `Done`
//! with whatever has been aggregated - a liveness guarantee, not an error.

use serde::Serialize;

use super::errors::OrchestrationError;

/// Hard bound on reasoning/invocation cycles per request.
pub const MAX_STEPS: u32 = 5;

/// States of the orchestration loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    /// Created, not yet started.
    Idle,
    /// Deciding the next set of invocations.
    Reasoning,
    /// Executing the invocations chosen in this step.
    Invoking,
    /// Finished normally (no further invocations, or budget spent).
    Done,
    /// The reasoning/invocation substrate faulted.
    Failed,
}

/// What the planner decided for one reasoning phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDecision {
    /// Invoke this many capabilities, then reason again.
    Invoke(usize),
    /// Nothing further to retrieve.
    Finish,
}

/// The bounded reasoning/invocation loop.
///
/// Owns the state and the test-visible step counter. Driving code calls
/// `start`, then alternates `record_decision` and `complete_invocations`
/// until a terminal state is reached.
#[derive(Debug, Clone)]
pub struct StepLoop {
    state: LoopState,
    steps_taken: u32,
    budget: u32,
}

impl Default for StepLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl StepLoop {
    /// Creates a loop with the standard budget.
    pub fn new() -> Self {
        Self::with_budget(MAX_STEPS)
    }

    /// Creates a loop with a custom budget (tests only need smaller ones).
    pub fn with_budget(budget: u32) -> Self {
        Self {
            state: LoopState::Idle,
            steps_taken: 0,
            budget,
        }
    }

    /// Current state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Completed reasoning/invocation cycles so far.
    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    /// Returns true once the loop has reached `Done` or `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, LoopState::Done | LoopState::Failed)
    }

    /// Enters the first reasoning phase.
    pub fn start(&mut self) -> Result<(), OrchestrationError> {
        match self.state {
            LoopState::Idle => {
                self.state = LoopState::Reasoning;
                Ok(())
            }
            state => Err(OrchestrationError::InvalidTransition {
                state,
                action: "start",
            }),
        }
    }

    /// Records the planner's decision for the current reasoning phase.
    ///
    /// Zero requested invocations finish the loop. A non-empty decision
    /// consumes one budget step and enters `Invoking`; if the budget is
    /// already spent the loop finishes instead, regardless of the decision.
    pub fn record_decision(
        &mut self,
        decision: StepDecision,
    ) -> Result<LoopState, OrchestrationError> {
        match self.state {
            LoopState::Reasoning => {
                match decision {
                    StepDecision::Finish | StepDecision::Invoke(0) => {
                        self.state = LoopState::Done;
                    }
                    StepDecision::Invoke(_) if self.steps_taken >= self.budget => {
                        self.state = LoopState::Done;
                    }
                    StepDecision::Invoke(_) => {
                        self.steps_taken += 1;
                        self.state = LoopState::Invoking;
                    }
                }
                Ok(self.state)
            }
            state => Err(OrchestrationError::InvalidTransition {
                state,
                action: "record_decision",
            }),
        }
    }

    /// Marks the current step's invocations as joined.
    ///
    /// Returns to `Reasoning` while budget remains, otherwise finishes.
    pub fn complete_invocations(&mut self) -> Result<LoopState, OrchestrationError> {
        match self.state {
            LoopState::Invoking => {
                self.state = if self.steps_taken >= self.budget {
                    LoopState::Done
                } else {
                    LoopState::Reasoning
                };
                Ok(self.state)
            }
            state => Err(OrchestrationError::InvalidTransition {
                state,
                action: "complete_invocations",
            }),
        }
    }

    /// Records a substrate fault. Terminal; the fallback path takes over.
    pub fn fail(&mut self) {
        if !self.is_terminal() {
            self.state = LoopState::Failed;
        }
    }
}
