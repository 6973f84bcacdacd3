//! WebSocket handler and relay dispatcher.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use relaypad_shared::{ClientCommand, ServerEvent, WsEnvelope};
use tokio::sync::mpsc;

use crate::presence::{ConnectionHandle, PresenceRegistry};
use crate::state::AppState;

/// Upper bound on a single inbound frame. Large enough for file payloads,
/// which travel base64-encoded inside one text frame.
const MAX_MESSAGE_BYTES: usize = 100 * 1024 * 1024;

/// WebSocket upgrade handler
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.max_message_size(MAX_MESSAGE_BYTES)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one client connection until the transport closes.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (forward_tx, mut forward_rx) = mpsc::unbounded_channel::<WsEnvelope<ServerEvent>>();
    let conn = ConnectionHandle::new(forward_tx);

    tracing::info!("Connection {} opened", conn.id());

    // Writer task: owns the sink, drains the outbound queue.
    let send_task = tokio::spawn(async move {
        while let Some(event) = forward_rx.recv().await {
            let json = serde_json::to_string(&event).unwrap_or_default();
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Main receive loop
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                match serde_json::from_str::<WsEnvelope<ClientCommand>>(&text) {
                    Ok(envelope) => dispatch(envelope, &conn, &state.registry).await,
                    Err(e) => {
                        // Malformed frames stop at this boundary and never
                        // reach the dispatcher.
                        tracing::debug!("Connection {}: dropping malformed frame: {}", conn.id(), e);
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Err(_) => break,
            _ => {}
        }
    }

    // Cleanup
    send_task.abort();
    state.registry.remove_by_handle(&conn).await;

    tracing::info!("Connection {} closed", conn.id());
}

/// Apply one client command against the registry.
async fn dispatch(
    envelope: WsEnvelope<ClientCommand>,
    conn: &ConnectionHandle,
    registry: &PresenceRegistry,
) {
    match envelope.payload {
        ClientCommand::Register { username } => {
            tracing::info!("User {} registered on connection {}", username, conn.id());
            registry.register(username, conn.clone()).await;
        }
        ClientCommand::SendMessage {
            sender,
            receiver,
            message,
            file,
        } => {
            // Lookup clones the handle out, so the registry lock is released
            // before anything is queued for the receiver.
            match registry.lookup(&receiver).await {
                Some(handle) => {
                    tracing::debug!("Relaying message from {} to {}", sender, receiver);
                    handle.forward(WsEnvelope::correlated(
                        ServerEvent::ReceiveMessage {
                            sender,
                            message,
                            file,
                        },
                        envelope.id,
                    ));
                }
                None => {
                    // Absent receiver is a normal outcome; the sender is not
                    // told. Best-effort contract.
                    tracing::debug!("Receiver {} not present, dropping message from {}", receiver, sender);
                }
            }
        }
    }
}
