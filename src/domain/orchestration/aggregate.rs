//! Result aggregation - a pure fold over capability results.
//!
//! The accumulator is request-scoped and threaded by value through the
//! orchestration loop; concurrent requests never share one. Success replaces
//! that capability's slot (last success wins), failure appends to the
//! append-only error list. Success and failure accumulate independently:
//! a failure never evicts an earlier success and vice versa.

use serde::{Deserialize, Serialize};

use super::capability::{CapabilityName, CapabilityPayload, CapabilityResult};
use crate::domain::travel::{ActivityIdea, FlightOption, HotelStay};

/// Merged outputs and errors from every capability invocation in one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flights: Option<Vec<FlightOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotels: Option<Vec<HotelStay>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<ActivityIdea>>,
    /// Operator-facing failure descriptions, in arrival order.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl AggregatedResults {
    /// An empty accumulator for a new request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one capability result into the accumulator.
    ///
    /// Idempotent when applied twice with an identical successful payload.
    pub fn aggregate(mut self, result: CapabilityResult) -> Self {
        let (capability, outcome) = result.into_outcome();
        match outcome {
            Ok(payload) => match payload {
                CapabilityPayload::Flights(records) => self.flights = Some(records),
                CapabilityPayload::Hotels(records) => self.hotels = Some(records),
                CapabilityPayload::Activities(records) => self.activities = Some(records),
            },
            Err(error) => self.errors.push(format!("{capability}: {error}")),
        }
        self
    }

    /// Returns true if no payloads and no errors have been recorded.
    pub fn is_empty(&self) -> bool {
        self.flights.is_none()
            && self.hotels.is_none()
            && self.activities.is_none()
            && self.errors.is_empty()
    }

    /// Returns true if the given capability has a stored payload.
    pub fn has_payload(&self, capability: CapabilityName) -> bool {
        match capability {
            CapabilityName::Flights => self.flights.is_some(),
            CapabilityName::Hotels => self.hotels.is_some(),
            CapabilityName::Activities => self.activities.is_some(),
        }
    }

    /// Capabilities that produced at least one stored payload.
    pub fn retrieved(&self) -> Vec<CapabilityName> {
        CapabilityName::all()
            .iter()
            .copied()
            .filter(|c| self.has_payload(*c))
            .collect()
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    fn arb_result() -> impl Strategy<Value = CapabilityResult> {
        prop_oneof![
            Just(CapabilityResult::success(CapabilityPayload::Flights(vec![]))),
            Just(CapabilityResult::success(CapabilityPayload::Hotels(vec![]))),
            Just(CapabilityResult::success(CapabilityPayload::Activities(vec![]))),
            "[a-z]{1,12}".prop_map(|e| CapabilityResult::failure(CapabilityName::Flights, e)),
            "[a-z]{1,12}".prop_map(|e| CapabilityResult::failure(CapabilityName::Hotels, e)),
        ]
    }

    proptest! {
        #[test]
        fn errors_are_never_lost(results in prop::collection::vec(arb_result(), 0..20)) {
            let failures = results.iter().filter(|r| !r.is_success()).count();
            let acc = results
                .into_iter()
                .fold(AggregatedResults::new(), AggregatedResults::aggregate);
            prop_assert_eq!(acc.errors.len(), failures);
        }

        #[test]
        fn any_success_leaves_its_slot_populated(results in prop::collection::vec(arb_result(), 1..20)) {
            let acc = results
                .clone()
                .into_iter()
                .fold(AggregatedResults::new(), AggregatedResults::aggregate);
            for result in &results {
                if result.is_success() {
                    prop_assert!(acc.has_payload(result.capability()));
                }
            }
        }
    }
}
