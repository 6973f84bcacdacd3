//! Relaypad Server
//!
//! A pure Axum server relaying messages and files between named clients
//! over WebSocket connections.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relaypad_server::{config::Config, db, routes, state::AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relaypad_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize database and shared state
    let config = Config::from_env();
    let db = db::init_database(&config.db_path);
    let bind_addr = config.bind_addr;
    let state = AppState::new(db, config);

    let app = routes::build_router(state);

    // Start server
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
