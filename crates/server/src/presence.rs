//! Presence registry: the username to connection binding table.

use std::collections::HashMap;

use relaypad_shared::{ServerEvent, WsEnvelope};
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// The sending half of one connection's outbound queue, plus the connection
/// id the registry uses as its removal key.
///
/// Clones are cheap and non-owning: dropping a handle never closes the
/// underlying socket, whose lifetime belongs to the connection task.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: Uuid,
    tx: mpsc::UnboundedSender<WsEnvelope<ServerEvent>>,
}

impl ConnectionHandle {
    pub fn new(tx: mpsc::UnboundedSender<WsEnvelope<ServerEvent>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tx,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Queue an event for this connection's writer task.
    ///
    /// A closed queue means the connection is already gone; the event is
    /// dropped, which is the accepted best-effort outcome for a receiver
    /// that disconnects between lookup and forward.
    pub fn forward(&self, event: WsEnvelope<ServerEvent>) {
        let _ = self.tx.send(event);
    }
}

/// Current username to connection bindings; the single source of truth for
/// who is reachable right now.
///
/// All three operations serialize on one lock. No I/O happens while the lock
/// is held: `lookup` clones the handle out, and forwarding is a channel push
/// that lands in the connection's writer task.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    entries: RwLock<HashMap<String, ConnectionHandle>>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `username` to `handle`.
    ///
    /// Last register wins: a previous binding for the username is silently
    /// replaced and the displaced connection is neither closed nor notified.
    /// Any binding this connection held under another name is evicted first,
    /// so a connection maps to at most one username.
    pub async fn register(&self, username: impl Into<String>, handle: ConnectionHandle) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, bound| bound.id != handle.id);
        entries.insert(username.into(), handle);
    }

    /// Current handle for `username`, if the user is reachable.
    pub async fn lookup(&self, username: &str) -> Option<ConnectionHandle> {
        self.entries.read().await.get(username).cloned()
    }

    /// Drop whatever binding this connection holds. No-op if it holds none.
    ///
    /// Linear scan; the map is bounded by the live connection count.
    pub async fn remove_by_handle(&self, handle: &ConnectionHandle) {
        self.entries
            .write()
            .await
            .retain(|_, bound| bound.id != handle.id);
    }
}
