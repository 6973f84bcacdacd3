//! Relaypad server: a username-addressed real-time message relay.
//!
//! The presence registry binds usernames to live WebSocket connections and
//! the relay dispatcher forwards messages between them. An aurora-db backed
//! identity boundary reserves usernames before a client registers presence.

pub mod config;
pub mod db;
pub mod presence;
pub mod routes;
pub mod state;
pub mod ws;
