use crate::signaling::router_command::RouterCommand;
use crate::signaling::signaling_output::SignalingOutput;
use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use huddle_core::{PeerId, RoomStatus, ServerEvent};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, warn};

struct SignalingInner {
    peers: DashMap<PeerId, mpsc::UnboundedSender<Message>>,
}

/// Live sockets plus the handle to the router. Cheap to clone.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) router_tx: mpsc::Sender<RouterCommand>,
}

impl SignalingService {
    pub fn new(router_tx: mpsc::Sender<RouterCommand>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
            }),
            router_tx,
        }
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(peer_id, tx);
    }

    pub fn remove_peer(&self, peer_id: &PeerId) {
        self.inner.peers.remove(peer_id);
    }

    pub fn peer_count(&self) -> usize {
        self.inner.peers.len()
    }

    /// Asks the router whether a room exists and how many members it has.
    pub async fn query_room(&self, room_code: impl Into<String>) -> Result<RoomStatus> {
        let (reply, rx) = oneshot::channel();
        self.router_tx
            .send(RouterCommand::QueryRoom {
                room_code: room_code.into(),
                reply,
            })
            .await
            .context("signaling router is not running")?;

        rx.await.context("signaling router dropped the query")
    }

    pub(crate) fn send_signal(&self, peer_id: PeerId, event: &ServerEvent) {
        match serde_json::to_string(event) {
            Ok(json) => self.send_text(peer_id, json),
            Err(e) => error!("Failed to serialize server event: {}", e),
        }
    }

    fn send_text(&self, peer_id: PeerId, json: String) {
        if let Some(peer) = self.inner.peers.get(&peer_id) {
            if let Err(e) = peer.send(Message::Text(json.into())) {
                error!("Failed to send WS message to {}: {:?}", peer_id, e);
            }
        } else {
            warn!("Attempted to send signal to disconnected peer {}", peer_id);
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_event(&self, peer_id: PeerId, event: ServerEvent) {
        self.send_signal(peer_id, &event);
    }

    async fn broadcast(&self, peers: &[PeerId], event: ServerEvent) {
        let json = match serde_json::to_string(&event) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize server event: {}", e);
                return;
            }
        };

        for peer_id in peers {
            self.send_text(*peer_id, json.clone());
        }
    }
}
