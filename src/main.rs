//! Wayfinder server binary.
//!
//! Loads configuration, wires the pipeline (classifier, orchestrator,
//! synthesizer) onto the OpenAI provider and the travel search clients, and
//! serves the chat API.

use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::{BoxError, Json};
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wayfinder::adapters::ai::{OpenAiConfig, OpenAiProvider};
use wayfinder::adapters::http::chat::dto::ErrorResponse;
use wayfinder::adapters::http::chat::{chat_router, ChatAppState};
use wayfinder::adapters::search::{
    ActivityGenerator, FlightSearchClient, HotelSearchClient, SearchClientConfig,
};
use wayfinder::adapters::validation::RequestValidator;
use wayfinder::application::{
    IntentClassifier, ResponseSynthesizer, SendMessageHandler, StepOrchestrator,
};
use wayfinder::config::AppConfig;
use wayfinder::ports::AiProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let provider: Arc<dyn AiProvider> = Arc::new(OpenAiProvider::new(
        OpenAiConfig::new(config.ai.api_key.clone())
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(Duration::from_secs(config.ai.timeout_secs))
            .with_max_retries(config.ai.max_retries),
    ));

    let search_config = SearchClientConfig::new(&config.search.base_url)
        .with_timeout(Duration::from_secs(config.search.timeout_secs));

    let orchestrator = StepOrchestrator::new(provider.clone())
        .with_invoker(Arc::new(FlightSearchClient::new(search_config.clone())))
        .with_invoker(Arc::new(HotelSearchClient::new(search_config)))
        .with_invoker(Arc::new(ActivityGenerator::new(provider.clone())))
        .with_invocation_timeout(Duration::from_secs(config.search.timeout_secs));

    let handler = SendMessageHandler::new(
        IntentClassifier::new(provider.clone()),
        orchestrator,
        ResponseSynthesizer::new(provider),
    );

    let state = ChatAppState {
        validator: RequestValidator::new(),
        handler: Arc::new(handler),
    };

    let cors = {
        let origins = config.server.cors_origins_list();
        if origins.is_empty() {
            CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
        } else {
            let parsed = origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect::<Vec<_>>();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parsed))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = chat_router()
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                ))),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config.server.socket_addr();
    info!(%addr, "wayfinder listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Maps middleware faults (timeouts included) to the opaque 500 envelope.
async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<serde_json::Value>) {
    error!(error = %err, "request failed in middleware");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!(ErrorResponse::internal())),
    )
}
