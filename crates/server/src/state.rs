//! Application state shared across request handlers.

use aurora_db::Aurora;
use std::sync::Arc;

use crate::config::Config;
use crate::presence::PresenceRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Aurora>,
    pub registry: Arc<PresenceRegistry>,
    pub config: Config,
}

impl AppState {
    pub fn new(db: Aurora, config: Config) -> Self {
        Self {
            db: Arc::new(db),
            registry: Arc::new(PresenceRegistry::new()),
            config,
        }
    }
}
