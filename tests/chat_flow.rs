//! Integration tests for the chat endpoint.
//!
//! Exercise the full pipeline (validation, classification, orchestration,
//! synthesis) through the HTTP handler, with the mock AI provider and mock
//! invokers standing in for the model and the travel search service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use wayfinder::adapters::ai::{MockAiProvider, MockError};
use wayfinder::adapters::http::chat::handlers::chat;
use wayfinder::adapters::http::chat::ChatAppState;
use wayfinder::adapters::search::MockInvoker;
use wayfinder::adapters::validation::RequestValidator;
use wayfinder::application::{
    IntentClassifier, ResponseSynthesizer, SendMessageHandler, StepOrchestrator, FALLBACK_TEXT,
};
use wayfinder::domain::orchestration::{CapabilityName, CapabilityPayload, MAX_STEPS};
use wayfinder::domain::travel::HotelStay;
use wayfinder::ports::{CapabilityError, ToolCallRequest};

// =============================================================================
// Test Infrastructure
// =============================================================================

const TRAVEL_EXTRACTION: &str = r#"{"isTravelRequest": true, "comprehensive": false,
    "destination": "Mumbai", "checkIn": "2025-12-15", "checkOut": "2025-12-20"}"#;

const FULL_TRIP_EXTRACTION: &str = r#"{"isTravelRequest": true, "comprehensive": true,
    "origin": "Delhi", "destination": "Mumbai",
    "departureDate": "2025-12-15", "returnDate": "2025-12-20", "travelers": 2}"#;

fn hotel() -> HotelStay {
    HotelStay {
        search_id: Some("HT1".to_string()),
        hotel_name: "Taj Palace".to_string(),
        rate_per_night: 12000.0,
        check_in: "2025-12-15".to_string(),
        check_out: "2025-12-20".to_string(),
        destination: "Mumbai".to_string(),
    }
}

fn state_with(provider: MockAiProvider, invokers: Vec<MockInvoker>) -> ChatAppState {
    let provider = Arc::new(provider);
    let mut orchestrator = StepOrchestrator::new(provider.clone());
    for invoker in invokers {
        orchestrator = orchestrator.with_invoker(Arc::new(invoker));
    }

    ChatAppState {
        validator: RequestValidator::new(),
        handler: Arc::new(SendMessageHandler::new(
            IntentClassifier::new(provider.clone()),
            orchestrator,
            ResponseSynthesizer::new(provider),
        )),
    }
}

async fn post_chat(state: ChatAppState, body: Value) -> (StatusCode, Value) {
    let response = chat(State(state), Json(body)).await.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn missing_prompt_is_a_validation_error() {
    let state = state_with(MockAiProvider::new(), Vec::new());

    let (status, body) = post_chat(state, json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Validation error");
    assert_eq!(body["details"][0]["path"], "prompt");
}

#[tokio::test]
async fn bad_history_entries_are_reported_with_paths() {
    let state = state_with(MockAiProvider::new(), Vec::new());

    let (status, body) = post_chat(
        state,
        json!({
            "prompt": "hi",
            "history": [{"role": "wizard", "content": "zap"}]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["path"], "history[0].role");
}

#[tokio::test]
async fn both_history_conventions_are_accepted() {
    let provider = MockAiProvider::new()
        .with_response(r#"{"isTravelRequest": false}"#)
        .with_response("Hello again!");
    let state = state_with(provider, Vec::new());

    let (status, body) = post_chat(
        state,
        json!({
            "prompt": "Thanks",
            "history": [
                {"role": "user", "content": "Hi"},
                {"role": "model", "parts": [{"text": "Hello! "}, {"text": "Where to?"}]}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // Normalized to role/content, with "model" mapped to assistant.
    assert_eq!(body["history"][1]["role"], "assistant");
    assert_eq!(body["history"][1]["content"], "Hello! Where to?");
}

// =============================================================================
// Generic path
// =============================================================================

#[tokio::test]
async fn generic_prompt_skips_lookups_entirely() {
    let provider = MockAiProvider::new()
        .with_response(r#"{"isTravelRequest": false}"#)
        .with_response("The capital of France is Paris.");
    let hotels = MockInvoker::new(CapabilityName::Hotels);
    let state = state_with(provider, vec![hotels.clone()]);

    let (status, body) = post_chat(state, json!({"prompt": "Capital of France?"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], "The capital of France is Paris.");
    assert_eq!(body["metadata"]["stepsTaken"], 0);
    assert_eq!(body["metadata"]["loopState"], "done");
    assert!(body["metadata"]["capabilitiesUsed"]
        .as_array()
        .unwrap()
        .is_empty());
    assert_eq!(hotels.call_count(), 0);
}

#[tokio::test]
async fn comprehensive_request_with_missing_details_stays_conversational() {
    // "Plan my trip to Mumbai" with no dates: everything disabled.
    let provider = MockAiProvider::new()
        .with_response(r#"{"isTravelRequest": true, "comprehensive": true, "destination": "Mumbai"}"#)
        .with_response("Happy to plan! When are you travelling, and from where?");
    let hotels = MockInvoker::new(CapabilityName::Hotels);
    let state = state_with(provider, vec![hotels.clone()]);

    let (_, body) = post_chat(state, json!({"prompt": "Plan my trip to Mumbai"})).await;

    assert_eq!(body["success"], true);
    assert!(body["metadata"]["capabilitiesUsed"]
        .as_array()
        .unwrap()
        .is_empty());
    assert_eq!(hotels.call_count(), 0);
}

// =============================================================================
// Orchestrated path
// =============================================================================

#[tokio::test]
async fn hotel_request_retrieves_and_summarizes() {
    let provider = MockAiProvider::new()
        .with_response(TRAVEL_EXTRACTION)
        .with_tool_calls(vec![ToolCallRequest::new("hotels", json!({}))])
        .with_response("Retrieved.")
        .with_response("The Taj Palace has rooms at 12000 per night.");

    let hotels = MockInvoker::new(CapabilityName::Hotels)
        .with_payload(CapabilityPayload::Hotels(vec![hotel()]));
    let state = state_with(provider, vec![hotels]);

    let (status, body) = post_chat(state, json!({"prompt": "Hotels in Mumbai please"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["metadata"]["stepsTaken"], 1);
    assert_eq!(
        body["metadata"]["aggregatedResults"]["hotels"][0]["hotelName"],
        "Taj Palace"
    );
    // New exchange appended to the history.
    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["role"], "user");
    assert_eq!(history[1]["role"], "assistant");
}

#[tokio::test]
async fn partial_failure_still_succeeds_with_error_listed() {
    let provider = MockAiProvider::new()
        .with_response(FULL_TRIP_EXTRACTION)
        .with_tool_calls(vec![
            ToolCallRequest::new("flights", json!({})),
            ToolCallRequest::new("hotels", json!({})),
        ])
        .with_response("Retrieved.")
        .with_response("Hotels found; flights couldn't be retrieved right now.");

    let flights = MockInvoker::new(CapabilityName::Flights)
        .with_failure(CapabilityError::Network("connection refused".to_string()));
    let hotels = MockInvoker::new(CapabilityName::Hotels)
        .with_payload(CapabilityPayload::Hotels(vec![hotel()]));
    let state = state_with(provider, vec![flights, hotels]);

    let (status, body) = post_chat(state, json!({"prompt": "Plan my Mumbai trip"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let errors = body["metadata"]["aggregatedResults"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().starts_with("flights:"));
    assert!(body["metadata"]["aggregatedResults"]["hotels"].is_array());
    assert!(body["metadata"]["aggregatedResults"].get("flights").is_none());
}

#[tokio::test]
async fn greedy_planner_is_bounded_by_the_step_budget() {
    let mut provider = MockAiProvider::new().with_response(TRAVEL_EXTRACTION);
    for _ in 0..10 {
        provider = provider.with_tool_calls(vec![ToolCallRequest::new("hotels", json!({}))]);
    }
    // Synthesis answer after the loop is cut off.
    provider = provider.with_response("Here is what I found.");

    let hotels = MockInvoker::new(CapabilityName::Hotels);
    let state = state_with(provider, vec![hotels.clone()]);

    let (_, body) = post_chat(state, json!({"prompt": "Hotels in Mumbai"})).await;

    assert_eq!(body["metadata"]["stepsTaken"], MAX_STEPS);
    assert_eq!(body["metadata"]["loopState"], "done");
    assert_eq!(hotels.call_count(), MAX_STEPS as usize);
}

// =============================================================================
// Degraded paths
// =============================================================================

#[tokio::test]
async fn planner_fault_serves_the_fallback_answer() {
    let provider = MockAiProvider::new()
        .with_response(TRAVEL_EXTRACTION)
        .with_error(MockError::Unavailable {
            message: "down".to_string(),
        });
    let state = state_with(provider, vec![MockInvoker::new(CapabilityName::Hotels)]);

    let (status, body) = post_chat(state, json!({"prompt": "Hotels in Mumbai"})).await;

    // Degraded but served: the request itself did not fail.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], FALLBACK_TEXT);
    assert_eq!(body["metadata"]["loopState"], "failed");
}

#[tokio::test]
async fn classifier_fault_degrades_to_conversation() {
    let provider = MockAiProvider::new()
        .with_error(MockError::Network {
            message: "reset".to_string(),
        })
        .with_response("Let's talk travel! Where would you like to go?");
    let hotels = MockInvoker::new(CapabilityName::Hotels);
    let state = state_with(provider, vec![hotels.clone()]);

    let (status, body) = post_chat(state, json!({"prompt": "Plan something"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(hotels.call_count(), 0);
    assert!(body["metadata"]["intent"]["rationale"]
        .as_str()
        .unwrap()
        .contains("Classification failed"));
}
