//! HTTP surface over the crossway route planner

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{Router, routing::get};
use crossway_core::{InMemoryNetwork, RoutePlanner, RouterConfig};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

pub use config::{Args, ServerConfig};
pub use error::{ApiError, ServerError};

/// Shared, read-only state of all handlers
pub struct AppState {
    pub planner: RoutePlanner<InMemoryNetwork>,
}

impl AppState {
    pub fn new(
        network: InMemoryNetwork,
        router: RouterConfig,
    ) -> Result<Self, crossway_core::Error> {
        Ok(Self {
            planner: RoutePlanner::new(network, router)?,
        })
    }
}

pub fn app(state: Arc<AppState>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/route", get(routes::get_route).post(routes::post_route))
        .route("/search", get(routes::search_addresses))
        .route("/locate", get(routes::locate_address))
        .layer(ConcurrencyLimitLayer::new(config.concurrency_limit))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
