//! Acumen server binary - composition root.

use std::sync::Arc;
use std::time::Duration;

use http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use acumen::adapters::ai::{GeminiConfig, GeminiProvider};
use acumen::adapters::http::assessment::{api_router, AppState};
use acumen::adapters::memory::FixedWindowRateLimiter;
use acumen::adapters::postgres::{PgAssessmentRepository, PgStarterQuestionSource};
use acumen::application::AssessmentEngine;
use acumen::config::AppConfig;

/// Message-endpoint limit: requests per assessment per window.
const MESSAGE_RATE_LIMIT: u32 = 20;
const MESSAGE_RATE_WINDOW_SECS: u64 = 60;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        model = %config.ai.model,
        "starting acumen"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let repository = Arc::new(PgAssessmentRepository::new(pool.clone()));
    let starters = Arc::new(PgStarterQuestionSource::new(pool));

    let gemini_config = GeminiConfig::new(config.ai.gemini_api_key.clone().unwrap_or_default())
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout());
    let provider = Arc::new(GeminiProvider::new(gemini_config)?);

    let engine = Arc::new(AssessmentEngine::new(
        repository.clone(),
        provider,
        starters.clone(),
    ));

    let state = AppState::new(engine, repository, starters).with_rate_limiter(Arc::new(
        FixedWindowRateLimiter::new(MESSAGE_RATE_LIMIT, MESSAGE_RATE_WINDOW_SECS),
    ));

    let app = api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
