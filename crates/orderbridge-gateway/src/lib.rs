//! orderbridge HTTP gateway.
//!
//! Serves v1-shaped order responses on top of a v2 upstream, exposes the
//! deprecation classifier as a monitoring endpoint, and replays the fixture
//! table as a mock v1/v2 API for everything else.

pub mod config;
pub mod error;
pub mod json;
pub mod routes;

pub use config::{Args, GatewayConfig};
pub use error::AppError;

use std::sync::Arc;

use axum::Router;
use orderbridge_client::{FixtureSource, ResponseSource};
use orderbridge_core::Classifier;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Source of upstream v1/v2 responses.
    pub upstream: Arc<dyn ResponseSource>,
    /// Fixture table served by the replay fallback.
    pub fixtures: Arc<FixtureSource>,
    /// Deprecation classifier.
    pub classifier: Classifier,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        upstream: Arc<dyn ResponseSource>,
        fixtures: FixtureSource,
        config: &GatewayConfig,
    ) -> Self {
        Self {
            upstream,
            fixtures: Arc::new(fixtures),
            classifier: Classifier::new(config.deprecation_policy),
        }
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::compat::routes())
        .merge(routes::monitor::routes())
        .fallback(routes::replay::replay)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
