//! HTTP route handlers and router assembly.

pub mod users;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::ws;

/// Build the application router. Shared with the integration tests.
pub fn build_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        // Identity
        .route("/api/check-username", post(users::check_username))
        .route("/api/check-recipient", post(users::check_recipient))
        // WebSocket
        .route("/api/ws", get(ws::ws_handler))
        // Apply middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
