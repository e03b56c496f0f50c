//! Classified intent and the completeness policy.
//!
//! The classifier's LLM call produces a `RawExtraction` - whatever trip
//! parameters could be read from the prompt and history. The completeness
//! policy below is pure code: a capability is enabled only when every
//! parameter it requires is already known, and missing parameters are never
//! guessed or fabricated.

use serde::{Deserialize, Serialize};

use super::capability::CapabilityName;

/// Parameters required to search flights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub travelers: u32,
}

/// Parameters required to search hotels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelParams {
    pub destination: String,
    pub check_in: String,
    pub check_out: String,
}

/// Parameters required to generate activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityParams {
    pub destination: String,
}

/// Raw trip parameters extracted by the classification LLM call.
///
/// Every field is optional; the extraction reports only what the prompt and
/// history actually state. `comprehensive` marks whole-trip requests
/// ("plan my vacation"), which are held to the stricter policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawExtraction {
    pub is_travel_request: bool,
    pub comprehensive: bool,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub travelers: Option<u32>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
}

/// The structured decision of which capabilities are needed.
///
/// Produced once per request and immutable afterward. A `None` slot means the
/// capability is disabled for this request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelIntent {
    pub flights: Option<FlightParams>,
    pub hotels: Option<HotelParams>,
    pub activities: Option<ActivityParams>,
    /// Human-readable explanation of the decision. Observability only; never
    /// consulted for control flow.
    pub rationale: String,
}

impl TravelIntent {
    /// The no-capability intent, used for generic conversation and for
    /// classification failures.
    pub fn none_needed(rationale: impl Into<String>) -> Self {
        Self {
            flights: None,
            hotels: None,
            activities: None,
            rationale: rationale.into(),
        }
    }

    /// Applies the completeness policy to an extraction.
    pub fn from_extraction(raw: RawExtraction) -> Self {
        if !raw.is_travel_request {
            return Self::none_needed("Generic conversation; no lookups needed.");
        }

        let mut missing_flights = Vec::new();
        if raw.origin.is_none() {
            missing_flights.push("origin");
        }
        if raw.destination.is_none() {
            missing_flights.push("destination");
        }
        if raw.departure_date.is_none() {
            missing_flights.push("departure date");
        }
        if raw.return_date.is_none() {
            missing_flights.push("return date");
        }
        if raw.travelers.is_none() {
            missing_flights.push("traveler count");
        }

        // Check-in/check-out default to the flight dates when not stated.
        let check_in = raw.check_in.clone().or_else(|| raw.departure_date.clone());
        let check_out = raw.check_out.clone().or_else(|| raw.return_date.clone());

        let mut missing_hotels = Vec::new();
        if raw.destination.is_none() {
            missing_hotels.push("destination");
        }
        if check_in.is_none() {
            missing_hotels.push("check-in date");
        }
        if check_out.is_none() {
            missing_hotels.push("check-out date");
        }

        // A whole-trip request with any missing flight or hotel parameter is
        // answered conversationally instead of with partial lookups.
        if raw.comprehensive && (!missing_flights.is_empty() || !missing_hotels.is_empty()) {
            let mut missing = missing_flights;
            for field in missing_hotels {
                if !missing.contains(&field) {
                    missing.push(field);
                }
            }
            return Self::none_needed(format!(
                "Trip planning request is missing required details ({}); \
                 asking the user instead of guessing.",
                missing.join(", ")
            ));
        }

        let flights = if missing_flights.is_empty() {
            Some(FlightParams {
                origin: raw.origin.clone().unwrap_or_default(),
                destination: raw.destination.clone().unwrap_or_default(),
                departure_date: raw.departure_date.clone().unwrap_or_default(),
                return_date: raw.return_date.clone().unwrap_or_default(),
                travelers: raw.travelers.unwrap_or_default(),
            })
        } else {
            None
        };

        let hotels = if missing_hotels.is_empty() {
            Some(HotelParams {
                destination: raw.destination.clone().unwrap_or_default(),
                check_in: check_in.unwrap_or_default(),
                check_out: check_out.unwrap_or_default(),
            })
        } else {
            None
        };

        let activities = raw
            .destination
            .as_ref()
            .map(|destination| ActivityParams {
                destination: destination.clone(),
            });

        let mut intent = Self {
            flights,
            hotels,
            activities,
            rationale: String::new(),
        };

        let enabled = intent.capabilities_needed();
        intent.rationale = if enabled.is_empty() {
            "Travel request, but no capability has complete parameters.".to_string()
        } else {
            format!(
                "Enabled {} with parameters taken from the conversation.",
                enabled
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };
        intent
    }

    /// Capabilities enabled by this intent, in declaration order.
    pub fn capabilities_needed(&self) -> Vec<CapabilityName> {
        let mut needed = Vec::new();
        if self.flights.is_some() {
            needed.push(CapabilityName::Flights);
        }
        if self.hotels.is_some() {
            needed.push(CapabilityName::Hotels);
        }
        if self.activities.is_some() {
            needed.push(CapabilityName::Activities);
        }
        needed
    }

    /// Returns true if any capability is enabled.
    pub fn requires_lookups(&self) -> bool {
        !self.capabilities_needed().is_empty()
    }

    /// The extracted parameters for one capability, as wire-format JSON.
    pub fn parameters_for(&self, name: CapabilityName) -> Option<serde_json::Value> {
        match name {
            CapabilityName::Flights => self
                .flights
                .as_ref()
                .and_then(|p| serde_json::to_value(p).ok()),
            CapabilityName::Hotels => self
                .hotels
                .as_ref()
                .and_then(|p| serde_json::to_value(p).ok()),
            CapabilityName::Activities => self
                .activities
                .as_ref()
                .and_then(|p| serde_json::to_value(p).ok()),
        }
    }
}
