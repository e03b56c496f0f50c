//! Step orchestration use case.
//!
//! Drives the `StepLoop` state machine: each reasoning phase asks the
//! planning model which of the enabled capabilities to invoke, the chosen
//! invocations run concurrently with a per-invocation deadline, and their
//! outcomes are folded into a request-scoped `AggregatedResults` value.
//!
//! A planning-call fault is the one unrecoverable failure here; individual
//! capability failures just become entries in the aggregate's error list.

use futures::future::join_all;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::conversation::Message;
use crate::domain::orchestration::{
    AggregatedResults, CapabilityName, CapabilityRegistry, CapabilityResult, LoopState,
    OrchestrationError, StepDecision, StepLoop, TravelIntent,
};
use crate::ports::{AiProvider, CapabilityInvoker, CompletionRequest};

const PLANNING_PROMPT: &str = "You are the planning step of a travel assistant. Call the \
    provided tools to retrieve the data the user's request still needs. Each tool may be \
    called with the parameters already extracted from the conversation. When everything \
    needed has been retrieved (or has failed), respond with a short acknowledgement and \
    no tool calls.";

/// What one orchestrated loop produced.
#[derive(Debug, Clone)]
pub struct LoopReport {
    /// Everything retrieved and every failure, across all steps.
    pub results: AggregatedResults,
    /// Terminal state of the loop (always `Done` on the `Ok` path).
    pub state: LoopState,
    /// Reasoning/invocation cycles consumed.
    pub steps_taken: u32,
}

/// Drives the bounded reasoning/invocation loop for one request.
pub struct StepOrchestrator {
    provider: Arc<dyn AiProvider>,
    registry: CapabilityRegistry,
    invokers: HashMap<CapabilityName, Arc<dyn CapabilityInvoker>>,
    invocation_timeout: Duration,
}

impl StepOrchestrator {
    /// Creates an orchestrator with no invokers registered.
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self {
            provider,
            registry: CapabilityRegistry::new(),
            invokers: HashMap::new(),
            invocation_timeout: Duration::from_secs(15),
        }
    }

    /// Registers the invoker backing one capability.
    pub fn with_invoker(mut self, invoker: Arc<dyn CapabilityInvoker>) -> Self {
        self.invokers.insert(invoker.capability(), invoker);
        self
    }

    /// Sets the per-invocation deadline.
    pub fn with_invocation_timeout(mut self, deadline: Duration) -> Self {
        self.invocation_timeout = deadline;
        self
    }

    /// Runs the loop for one classified request.
    ///
    /// Only capabilities the intent enabled are advertised to the planner;
    /// anything else it asks for is ignored.
    pub async fn run(
        &self,
        intent: &TravelIntent,
        prompt: &str,
        history: &[Message],
    ) -> Result<LoopReport, OrchestrationError> {
        let enabled = intent.capabilities_needed();
        let tools = self.registry.tools_for(&enabled);

        let mut results = AggregatedResults::new();
        let mut step_loop = StepLoop::new();
        step_loop.start()?;

        let mut transcript: Vec<Message> = history.to_vec();
        transcript.push(Message::user(prompt));

        while !step_loop.is_terminal() {
            let request = CompletionRequest::new()
                .with_system_prompt(PLANNING_PROMPT)
                .with_messages(transcript.clone())
                .with_tools(tools.clone())
                .with_temperature(0.0);

            let response = match self.provider.complete(request).await {
                Ok(response) => response,
                Err(e) => {
                    step_loop.fail();
                    return Err(OrchestrationError::Planning(e.to_string()));
                }
            };

            let calls = self.accepted_calls(&response.tool_calls, intent, &enabled);

            let decision = if calls.is_empty() {
                StepDecision::Finish
            } else {
                StepDecision::Invoke(calls.len())
            };

            if step_loop.record_decision(decision)? != LoopState::Invoking {
                break;
            }

            debug!(
                step = step_loop.steps_taken(),
                invocations = calls.len(),
                "executing invocation step"
            );

            let step_results = self.invoke_all(calls).await;
            transcript.push(Message::assistant(Self::describe_step(&step_results)));

            for result in step_results {
                results = results.aggregate(result);
            }

            step_loop.complete_invocations()?;
        }

        info!(
            steps = step_loop.steps_taken(),
            retrieved = ?results.retrieved(),
            errors = results.errors.len(),
            "orchestration loop finished"
        );

        Ok(LoopReport {
            results,
            state: step_loop.state(),
            steps_taken: step_loop.steps_taken(),
        })
    }

    /// Filters planner tool calls down to enabled, known capabilities and
    /// resolves each one's parameters.
    fn accepted_calls(
        &self,
        tool_calls: &[crate::ports::ToolCallRequest],
        intent: &TravelIntent,
        enabled: &[CapabilityName],
    ) -> Vec<(CapabilityName, Value)> {
        tool_calls
            .iter()
            .filter_map(|call| {
                let name = match CapabilityName::parse(&call.name) {
                    Some(name) => name,
                    None => {
                        warn!(tool = %call.name, "planner asked for an unknown tool; ignoring");
                        return None;
                    }
                };
                if !enabled.contains(&name) {
                    warn!(capability = %name, "planner asked for a disabled capability; ignoring");
                    return None;
                }

                // Planner arguments win; the intent's extraction is the
                // fallback when the planner passes nothing usable.
                let params = match &call.arguments {
                    Value::Object(map) if !map.is_empty() => call.arguments.clone(),
                    _ => intent.parameters_for(name).unwrap_or_else(|| json!({})),
                };
                Some((name, params))
            })
            .collect()
    }

    /// Runs one step's invocations concurrently, each under its deadline.
    async fn invoke_all(&self, calls: Vec<(CapabilityName, Value)>) -> Vec<CapabilityResult> {
        let futures = calls.into_iter().map(|(name, params)| async move {
            let invoker = match self.invokers.get(&name) {
                Some(invoker) => invoker,
                None => {
                    return CapabilityResult::failure(name, "no invoker registered");
                }
            };

            match timeout(self.invocation_timeout, invoker.invoke(params)).await {
                Ok(Ok(payload)) => CapabilityResult::success(payload),
                Ok(Err(e)) => CapabilityResult::failure(name, e.to_string()),
                Err(_) => CapabilityResult::failure(
                    name,
                    format!("timed out after {}s", self.invocation_timeout.as_secs()),
                ),
            }
        });

        join_all(futures).await
    }

    /// Renders one step's outcomes for the planner's transcript.
    fn describe_step(step_results: &[CapabilityResult]) -> String {
        let summary: Vec<Value> = step_results
            .iter()
            .map(|r| match r.payload() {
                Some(payload) => json!({
                    "capability": r.capability(),
                    "status": "success",
                    "records": payload.len(),
                }),
                None => json!({
                    "capability": r.capability(),
                    "status": "failed",
                    "error": r.error(),
                }),
            })
            .collect();

        format!("Tool results: {}", Value::Array(summary))
    }
}
