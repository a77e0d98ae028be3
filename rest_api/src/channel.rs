// rest_api/src/channel.rs
//
// The live update channel: one persistent WebSocket per client,
// multiplexed over a single endpoint. Every successful mutation is fanned
// out to all connected sessions; clients may additionally declare interest
// in a patient by joining its room.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{Mutex, broadcast};
use uuid::Uuid;

use models::{ClientMessage, ServerEvent};

use crate::AppState;

/// Broadcast capacity. A session lagging behind this many events skips
/// the missed ones; there is no replay log.
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Subscription state for one connected session.
#[derive(Debug, Default)]
struct Session {
    rooms: HashSet<String>,
}

/// Shared state of the live update channel: the mutation-event fan-out
/// plus the registry of connected sessions and their room memberships.
#[derive(Clone)]
pub struct LiveChannel {
    events: broadcast::Sender<ServerEvent>,
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl LiveChannel {
    pub fn new() -> Self {
        let (events, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            events,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Fire-and-forget fan-out to every connected session. Delivery is
    /// global: room membership is tracked but never consulted.
    pub fn broadcast(&self, event: ServerEvent) {
        // Send only fails when nobody is subscribed, which is fine.
        let _ = self.events.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.events.subscribe()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    async fn register(&self) -> Uuid {
        let session_id = Uuid::new_v4();
        self.sessions
            .lock()
            .await
            .insert(session_id, Session::default());
        session_id
    }

    async fn discard(&self, session_id: Uuid) {
        self.sessions.lock().await.remove(&session_id);
    }

    async fn join_room(&self, session_id: Uuid, patient_id: &str) {
        if let Some(session) = self.sessions.lock().await.get_mut(&session_id) {
            session.rooms.insert(format!("patient-{}", patient_id));
        }
    }

    async fn leave_room(&self, session_id: Uuid, patient_id: &str) {
        if let Some(session) = self.sessions.lock().await.get_mut(&session_id) {
            session.rooms.remove(&format!("patient-{}", patient_id));
        }
    }

    async fn rooms_of(&self, session_id: Uuid) -> HashSet<String> {
        self.sessions
            .lock()
            .await
            .get(&session_id)
            .map(|s| s.rooms.clone())
            .unwrap_or_default()
    }
}

impl Default for LiveChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler for the `/ws` endpoint.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_session(socket, state.live))
}

async fn handle_session(socket: WebSocket, live: LiveChannel) {
    let session_id = live.register().await;
    tracing::info!("Client connected: {}", session_id);

    // No initial state is pushed; clients fetch snapshots over the REST
    // API and apply events from here on.
    let mut events = live.subscribe();
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let payload = match serde_json::to_string(&event) {
                        Ok(payload) => payload,
                        Err(err) => {
                            tracing::error!("Failed to serialize event: {}", err);
                            continue;
                        }
                    };
                    if sink.send(Message::Text(payload)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Session {} lagged, skipped {} events", session_id, skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    handle_client_message(&live, session_id, &text).await;
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {} // pings are answered by axum, binary frames ignored
                Some(Err(err)) => {
                    tracing::warn!("Session {} socket error: {}", session_id, err);
                    break;
                }
            },
        }
    }

    live.discard(session_id).await;
    tracing::info!("Client disconnected: {}", session_id);
}

async fn handle_client_message(live: &LiveChannel, session_id: Uuid, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::JoinPatientRoom { patient_id }) => {
            live.join_room(session_id, &patient_id).await;
            tracing::info!("Session {} joined patient room {}", session_id, patient_id);
        }
        Ok(ClientMessage::LeavePatientRoom { patient_id }) => {
            live.leave_room(session_id, &patient_id).await;
            tracing::info!("Session {} left patient room {}", session_id, patient_id);
        }
        Err(err) => {
            tracing::debug!("Ignoring unrecognized message from {}: {}", session_id, err);
        }
    }
}
