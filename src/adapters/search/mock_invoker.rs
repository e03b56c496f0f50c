//! Mock capability invoker for testing.
//!
//! Returns queued outcomes in order and records every invocation, in the
//! same style as the mock AI provider.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::orchestration::{CapabilityName, CapabilityPayload};
use crate::ports::{CapabilityError, CapabilityInvoker};

/// Configurable invoker double.
#[derive(Clone)]
pub struct MockInvoker {
    capability: CapabilityName,
    outcomes: Arc<Mutex<VecDeque<Result<CapabilityPayload, CapabilityError>>>>,
    calls: Arc<Mutex<Vec<Value>>>,
}

impl MockInvoker {
    /// Creates a mock for the given capability.
    pub fn new(capability: CapabilityName) -> Self {
        Self {
            capability,
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful payload.
    pub fn with_payload(self, payload: CapabilityPayload) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(payload));
        self
    }

    /// Queues a failure.
    pub fn with_failure(self, error: CapabilityError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// Number of invocations recorded.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Parameters of every recorded invocation.
    pub fn get_calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }

    fn empty_payload(&self) -> CapabilityPayload {
        match self.capability {
            CapabilityName::Flights => CapabilityPayload::Flights(Vec::new()),
            CapabilityName::Hotels => CapabilityPayload::Hotels(Vec::new()),
            CapabilityName::Activities => CapabilityPayload::Activities(Vec::new()),
        }
    }
}

#[async_trait]
impl CapabilityInvoker for MockInvoker {
    fn capability(&self) -> CapabilityName {
        self.capability
    }

    async fn invoke(&self, params: Value) -> Result<CapabilityPayload, CapabilityError> {
        self.calls.lock().unwrap().push(params);

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.empty_payload()))
    }
}
