//! Flight search client.
//!
//! Calls `POST {base}/searchflight` on the travel search service with the
//! wire-format flight parameters and decodes the results into
//! [`FlightOption`] records. The service returns both directions of a round
//! trip as separate records; both are kept.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{SearchClientConfig, SearchEnvelope};
use crate::domain::orchestration::{CapabilityName, CapabilityPayload};
use crate::domain::travel::FlightOption;
use crate::ports::{CapabilityError, CapabilityInvoker};

/// Invoker for the flights capability.
pub struct FlightSearchClient {
    config: SearchClientConfig,
    client: Client,
}

impl FlightSearchClient {
    /// Creates a new client against the configured search service.
    pub fn new(config: SearchClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn endpoint(&self) -> String {
        format!("{}/searchflight", self.config.base_url)
    }
}

#[async_trait]
impl CapabilityInvoker for FlightSearchClient {
    fn capability(&self) -> CapabilityName {
        CapabilityName::Flights
    }

    async fn invoke(&self, params: Value) -> Result<CapabilityPayload, CapabilityError> {
        debug!(endpoint = %self.endpoint(), "searching flights");

        let response = self
            .client
            .post(self.endpoint())
            .json(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CapabilityError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    CapabilityError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "flight search answered with an error status");
            return Err(CapabilityError::BadStatus {
                status: status.to_string(),
            });
        }

        let envelope: SearchEnvelope = response
            .json()
            .await
            .map_err(|e| CapabilityError::MalformedPayload(e.to_string()))?;

        let flights = envelope
            .into_results()?
            .into_iter()
            .map(serde_json::from_value::<FlightOption>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CapabilityError::MalformedPayload(e.to_string()))?;

        debug!(count = flights.len(), "flight search succeeded");
        Ok(CapabilityPayload::Flights(flights))
    }
}
