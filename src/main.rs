//! Strategix API server.

use std::sync::Arc;

use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use strategix::adapters::advisory::{LlmAdvisoryGenerator, ResilientAdvisoryGenerator};
use strategix::adapters::ai::{ChatCompletionsConfig, ChatCompletionsProvider};
use strategix::adapters::http::{analysis_routes, AnalysisAppState};
use strategix::application::RunAnalysisHandler;
use strategix::config::AppConfig;
use strategix::domain::analysis::SensitivityEngine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let engine = Arc::new(SensitivityEngine::new(config.analysis.engine_options()));
    let advisor = Arc::new(build_advisor(&config)?);
    let handler = Arc::new(RunAnalysisHandler::new(engine, advisor));

    let state = AnalysisAppState::new(handler).with_verbose_errors(config.features.verbose_errors);
    let app = analysis_routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config))
            .layer(TimeoutLayer::new(config.server.request_timeout())),
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Strategix API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_advisor(config: &AppConfig) -> Result<ResilientAdvisoryGenerator, Box<dyn std::error::Error>> {
    let api_key = match config.ai.api_key() {
        Some(key) if config.features.enable_ai_advisory => key,
        _ => {
            warn!("AI advisory disabled; reports will use the template");
            return Ok(ResilientAdvisoryGenerator::template_only());
        }
    };

    let provider = ChatCompletionsProvider::new(
        ChatCompletionsConfig::new(api_key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries),
    )?;
    info!(model = %config.ai.model, "AI advisory enabled");

    Ok(ResilientAdvisoryGenerator::new(Arc::new(LlmAdvisoryGenerator::new(
        Arc::new(provider),
    ))))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
