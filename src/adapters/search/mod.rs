//! Capability invoker adapters.
//!
//! Flight and hotel lookups call the travel search HTTP service; activity
//! suggestions are generated through the AI provider.

mod activity_generator;
mod flight_client;
mod hotel_client;
mod mock_invoker;

pub use activity_generator::ActivityGenerator;
pub use flight_client::FlightSearchClient;
pub use hotel_client::HotelSearchClient;
pub use mock_invoker::MockInvoker;

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::ports::CapabilityError;

/// Configuration shared by the search service clients.
#[derive(Debug, Clone)]
pub struct SearchClientConfig {
    /// Base URL of the travel search service.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SearchClientConfig {
    /// Creates a config with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Response envelope of the travel search service.
///
/// Every endpoint answers `{ "status": ..., "results": [...] }`; any status
/// other than "success" means the lookup produced nothing usable.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    pub status: String,
    #[serde(default)]
    pub results: Vec<Value>,
}

impl SearchEnvelope {
    /// Unwraps the results, rejecting non-success statuses.
    pub(crate) fn into_results(self) -> Result<Vec<Value>, CapabilityError> {
        if self.status == "success" {
            Ok(self.results)
        } else {
            Err(CapabilityError::BadStatus {
                status: self.status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_unwraps_success() {
        let envelope: SearchEnvelope =
            serde_json::from_value(json!({"status": "success", "results": [{"a": 1}]})).unwrap();
        let results = envelope.into_results().unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn envelope_rejects_non_success_status() {
        let envelope: SearchEnvelope =
            serde_json::from_value(json!({"status": "no_flights_found", "results": []})).unwrap();
        let err = envelope.into_results().unwrap_err();
        assert!(matches!(
            err,
            CapabilityError::BadStatus { ref status } if status == "no_flights_found"
        ));
    }

    #[test]
    fn envelope_tolerates_missing_results() {
        let envelope: SearchEnvelope =
            serde_json::from_value(json!({"status": "success"})).unwrap();
        assert!(envelope.into_results().unwrap().is_empty());
    }
}
