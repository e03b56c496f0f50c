//! Hotel search client.
//!
//! Calls `POST {base}/searchhotel` on the travel search service and decodes
//! the results into [`HotelStay`] records.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{SearchClientConfig, SearchEnvelope};
use crate::domain::orchestration::{CapabilityName, CapabilityPayload};
use crate::domain::travel::HotelStay;
use crate::ports::{CapabilityError, CapabilityInvoker};

/// Invoker for the hotels capability.
pub struct HotelSearchClient {
    config: SearchClientConfig,
    client: Client,
}

impl HotelSearchClient {
    /// Creates a new client against the configured search service.
    pub fn new(config: SearchClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn endpoint(&self) -> String {
        format!("{}/searchhotel", self.config.base_url)
    }
}

#[async_trait]
impl CapabilityInvoker for HotelSearchClient {
    fn capability(&self) -> CapabilityName {
        CapabilityName::Hotels
    }

    async fn invoke(&self, params: Value) -> Result<CapabilityPayload, CapabilityError> {
        debug!(endpoint = %self.endpoint(), "searching hotels");

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
            warn!(%status, "hotel search answered with an error status");
            return Err(CapabilityError::BadStatus {
                status: status.to_string(),
            });
        }

        let envelope: SearchEnvelope = response
            .json()
            .await
            .map_err(|e| CapabilityError::MalformedPayload(e.to_string()))?;

        let hotels = envelope
            .into_results()?
            .into_iter()
            .map(serde_json::from_value::<HotelStay>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CapabilityError::MalformedPayload(e.to_string()))?;

        debug!(count = hotels.len(), "hotel search succeeded");
        Ok(CapabilityPayload::Hotels(hotels))
    }
}
