//! Travel record types returned by the lookup capabilities.
//!
//! Field naming follows the wire format of the travel search API so records
//! pass through to the response metadata unchanged.

use serde::{Deserialize, Serialize};

/// One flight offer from the flight search service.
///
/// `price` is the total fare for all travelers, and `route` is rendered as
/// "Origin to Destination" (the service returns both directions of a round
/// trip as separate records).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOption {
    #[serde(default)]
    pub search_id: Option<String>,
    pub flight_name: String,
    pub flight_number: String,
    pub price: f64,
    pub departure_date: String,
    pub return_date: String,
    pub departure_time: String,
    pub travelers: u32,
    pub origin: String,
    pub destination: String,
    pub route: String,
}

/// One hotel offer from the hotel search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelStay {
    #[serde(default)]
    pub search_id: Option<String>,
    pub hotel_name: String,
    pub rate_per_night: f64,
    pub check_in: String,
    pub check_out: String,
    pub destination: String,
}

/// One generated activity suggestion.
///
/// Activities have no deterministic backing store; the generator produces
/// these from the destination alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityIdea {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
}
