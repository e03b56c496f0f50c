//! End-to-end chat use case.
//!
//! Classify, orchestrate, synthesize: the whole pipeline for one validated
//! chat request. The handler is deliberately infallible - every fault inside
//! the pipeline degrades to a usable (possibly apologetic) answer, so the
//! HTTP layer only distinguishes invalid requests from served ones.

use tracing::{info, warn};

use crate::domain::conversation::Message;
use crate::domain::orchestration::{
    AggregatedResults, LoopState, OrchestrationOutcome, TravelIntent,
};

use super::classify_intent::IntentClassifier;
use super::orchestrate::StepOrchestrator;
use super::synthesize::ResponseSynthesizer;

/// Command for one chat turn.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub prompt: String,
    pub history: Vec<Message>,
}

/// Result of one chat turn.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub outcome: OrchestrationOutcome,
    /// Reasoning/invocation cycles consumed (zero on the generic path).
    pub steps_taken: u32,
    /// Terminal loop state (`Done` on the generic path, `Failed` when the
    /// planning substrate faulted).
    pub loop_state: LoopState,
}

/// Handler wiring the three pipeline stages together.
pub struct SendMessageHandler {
    classifier: IntentClassifier,
    orchestrator: StepOrchestrator,
    synthesizer: ResponseSynthesizer,
}

impl SendMessageHandler {
    pub fn new(
        classifier: IntentClassifier,
        orchestrator: StepOrchestrator,
        synthesizer: ResponseSynthesizer,
    ) -> Self {
        Self {
            classifier,
            orchestrator,
            synthesizer,
        }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> SendMessageResult {
        let intent = self.classifier.classify(&cmd.prompt, &cmd.history).await;
        let capabilities_used = intent.capabilities_needed();

        let (final_text, results, steps_taken, loop_state) = if intent.requires_lookups() {
            self.orchestrated_turn(&intent, &cmd).await
        } else {
            info!(rationale = %intent.rationale, "generic turn; skipping the loop");
            let text = self.synthesizer.converse(&cmd.prompt, &cmd.history).await;
            (text, AggregatedResults::new(), 0, LoopState::Done)
        };

        let mut history = cmd.history;
        history.push(Message::user(cmd.prompt));
        history.push(Message::assistant(final_text.clone()));

        SendMessageResult {
            outcome: OrchestrationOutcome {
                final_text,
                intent,
                results,
                capabilities_used,
                history,
            },
            steps_taken,
            loop_state,
        }
    }

    async fn orchestrated_turn(
        &self,
        intent: &TravelIntent,
        cmd: &SendMessageCommand,
    ) -> (String, AggregatedResults, u32, LoopState) {
        match self.orchestrator.run(intent, &cmd.prompt, &cmd.history).await {
            Ok(report) => {
                let text = self
                    .synthesizer
                    .summarize(&cmd.prompt, &cmd.history, intent, &report.results)
                    .await;
                (text, report.results, report.steps_taken, report.state)
            }
            Err(e) => {
                warn!(error = %e, "orchestration faulted; serving the fallback answer");
                (
                    self.synthesizer.fallback(),
                    AggregatedResults::new(),
                    0,
                    LoopState::Failed,
                )
            }
        }
    }
}
