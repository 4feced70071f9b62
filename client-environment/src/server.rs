//! HTTP surface that hands the environment record to browser clients.
//!
//! The client application is served from another origin than this server,
//! so every response carries CORS headers. The record holds no secrets and
//! any origin may read it.

use axum::{Json, Router, extract::State, http::Method, routing::get};
use tower_http::cors::{Any, CorsLayer};

use crate::environment::Environment;

/// Path the record is served from.
pub const ENVIRONMENT_PATH: &str = "/environment.json";

/// Builds the router serving `environment`.
#[must_use]
pub fn router(environment: &'static Environment) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route(ENVIRONMENT_PATH, get(environment_json))
        .layer(cors)
        .with_state(environment)
}

async fn environment_json(State(environment): State<&'static Environment>) -> Json<&'static Environment> {
    tracing::debug!(production = environment.production, "serving environment");
    Json(environment)
}
