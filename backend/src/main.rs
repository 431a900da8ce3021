//! LeafLens - Potato Disease Detection Backend
//!
//! Accepts leaf images from the mobile app, pre-filters non-leaf uploads,
//! classifies potato diseases with a pretrained model, and augments the
//! diagnosis with treatment advice and weather-based risk scoring.

use anyhow::Context;
use axum::{routing::get, Router};
use std::{net::SocketAddr, path::Path, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::WeatherClient;
use services::Classifier;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Classifier model, loaded once at startup and read-only afterwards
    pub classifier: Arc<Classifier>,
    /// Weather client; `None` when no API key is configured
    pub weather: Option<WeatherClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leaflens_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting LeafLens API server");
    tracing::info!("Environment: {}", config.environment);

    // Load the classifier eagerly: a single load before the server accepts
    // traffic, no lazy-initialization races, and a fast failure when the
    // model file is missing.
    let classifier = Classifier::load(Path::new(&config.model.path))
        .with_context(|| format!("loading classifier model from {}", config.model.path))?;

    let weather = if config.weather.api_key.is_empty() {
        tracing::warn!(
            "OpenWeatherMap API key not configured; weather risk assessment is disabled"
        );
        None
    } else {
        Some(WeatherClient::new(config.weather.api_key.clone()))
    };

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        classifier: Arc::new(classifier),
        weather,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "LeafLens API v2.0"
}
