//! Capability registry - the closed set of lookup operations.
//!
//! Capabilities are a fixed, compile-time enumerable set. The registry maps
//! each variant to a descriptor (description + parameter schema) used to
//! advertise the capability to the planning step. Dispatch is always by
//! tagged variant, never by free-form string, so the match stays exhaustive.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::travel::{ActivityIdea, FlightOption, HotelStay};

/// The closed set of lookup capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityName {
    /// Round-trip flight search.
    Flights,
    /// Hotel search at the destination.
    Hotels,
    /// Generated activity suggestions for the destination.
    Activities,
}

impl CapabilityName {
    /// All capabilities, in declaration order.
    pub fn all() -> &'static [CapabilityName] {
        &[Self::Flights, Self::Hotels, Self::Activities]
    }

    /// Wire-level name, as advertised to the planning step.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flights => "flights",
            Self::Hotels => "hotels",
            Self::Activities => "activities",
        }
    }

    /// Parses a planner-provided name back into the closed set.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "flights" => Some(Self::Flights),
            "hotels" => Some(Self::Hotels),
            "activities" => Some(Self::Activities),
            _ => None,
        }
    }
}

impl std::fmt::Display for CapabilityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema and documentation for one capability.
///
/// Used to advertise the capability to the AI planning step in tool-calling
/// format, and as the declared parameter contract for validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    name: CapabilityName,
    description: String,
    parameters_schema: Value,
}

impl CapabilityDescriptor {
    /// Creates a new descriptor.
    pub fn new(
        name: CapabilityName,
        description: impl Into<String>,
        parameters_schema: Value,
    ) -> Self {
        Self {
            name,
            description: description.into(),
            parameters_schema,
        }
    }

    /// Returns the capability this describes.
    pub fn name(&self) -> CapabilityName {
        self.name
    }

    /// Returns the human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the JSON parameter schema.
    pub fn parameters_schema(&self) -> &Value {
        &self.parameters_schema
    }

    /// Converts to OpenAI function-calling format.
    pub fn to_tool_format(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name.as_str(),
                "description": self.description,
                "parameters": self.parameters_schema
            }
        })
    }
}

static DESCRIPTORS: Lazy<[CapabilityDescriptor; 3]> = Lazy::new(|| {
    [
        CapabilityDescriptor::new(
            CapabilityName::Flights,
            "Search round-trip flights between an origin and a destination \
             for a given date range and traveler count",
            json!({
                "type": "object",
                "required": ["origin", "destination", "departureDate", "returnDate", "travelers"],
                "properties": {
                    "origin": { "type": "string", "description": "Departure city" },
                    "destination": { "type": "string", "description": "Arrival city" },
                    "departureDate": { "type": "string", "description": "Outbound date, YYYY-MM-DD" },
                    "returnDate": { "type": "string", "description": "Return date, YYYY-MM-DD" },
                    "travelers": { "type": "integer", "minimum": 1 }
                }
            }),
        ),
        CapabilityDescriptor::new(
            CapabilityName::Hotels,
            "Search hotels at a destination for a check-in/check-out range",
            json!({
                "type": "object",
                "required": ["destination", "checkIn", "checkOut"],
                "properties": {
                    "destination": { "type": "string" },
                    "checkIn": { "type": "string", "description": "Check-in date, YYYY-MM-DD" },
                    "checkOut": { "type": "string", "description": "Check-out date, YYYY-MM-DD" }
                }
            }),
        ),
        CapabilityDescriptor::new(
            CapabilityName::Activities,
            "Generate sightseeing and activity suggestions for a destination",
            json!({
                "type": "object",
                "required": ["destination"],
                "properties": {
                    "destination": { "type": "string" }
                }
            }),
        ),
    ]
});

/// Registry of all capability descriptors.
///
/// Holds exactly one descriptor per `CapabilityName` variant; the set is
/// fixed at build time.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityRegistry;

impl CapabilityRegistry {
    /// Creates the registry.
    pub fn new() -> Self {
        Self
    }

    /// Gets the descriptor for a capability.
    pub fn descriptor(&self, name: CapabilityName) -> &'static CapabilityDescriptor {
        match name {
            CapabilityName::Flights => &DESCRIPTORS[0],
            CapabilityName::Hotels => &DESCRIPTORS[1],
            CapabilityName::Activities => &DESCRIPTORS[2],
        }
    }

    /// Formats the descriptors for a subset of capabilities as tools.
    ///
    /// Only the capabilities the intent enabled are advertised to the
    /// planning step.
    pub fn tools_for(&self, enabled: &[CapabilityName]) -> Vec<Value> {
        enabled
            .iter()
            .map(|n| self.descriptor(*n).to_tool_format())
            .collect()
    }
}

/// Successful payload of one capability invocation.
///
/// The variant ties the records to their capability so a result can never be
/// filed under the wrong slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityPayload {
    Flights(Vec<FlightOption>),
    Hotels(Vec<HotelStay>),
    Activities(Vec<ActivityIdea>),
}

impl CapabilityPayload {
    /// The capability that produced this payload.
    pub fn capability(&self) -> CapabilityName {
        match self {
            Self::Flights(_) => CapabilityName::Flights,
            Self::Hotels(_) => CapabilityName::Hotels,
            Self::Activities(_) => CapabilityName::Activities,
        }
    }

    /// Number of records in the payload.
    pub fn len(&self) -> usize {
        match self {
            Self::Flights(v) => v.len(),
            Self::Hotels(v) => v.len(),
            Self::Activities(v) => v.len(),
        }
    }

    /// Returns true if the payload holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of one capability invocation.
///
/// Created once per invocation and never mutated. Failures carry operator
/// text only; they are never shown verbatim to the end user.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityResult {
    capability: CapabilityName,
    outcome: Result<CapabilityPayload, String>,
}

impl CapabilityResult {
    /// Creates a success result; the capability is derived from the payload.
    pub fn success(payload: CapabilityPayload) -> Self {
        Self {
            capability: payload.capability(),
            outcome: Ok(payload),
        }
    }

    /// Creates a failure result for a capability.
    pub fn failure(capability: CapabilityName, error: impl Into<String>) -> Self {
        Self {
            capability,
            outcome: Err(error.into()),
        }
    }

    /// The capability this result belongs to.
    pub fn capability(&self) -> CapabilityName {
        self.capability
    }

    /// Returns true on success.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The payload, if successful.
    pub fn payload(&self) -> Option<&CapabilityPayload> {
        self.outcome.as_ref().ok()
    }

    /// The error text, if failed.
    pub fn error(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }

    /// Consumes self into the underlying outcome.
    pub fn into_outcome(self) -> (CapabilityName, Result<CapabilityPayload, String>) {
        (self.capability, self.outcome)
    }
}
