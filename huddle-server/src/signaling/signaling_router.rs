use crate::error::SignalingError;
use crate::room::RoomState;
use crate::signaling::router_command::RouterCommand;
use crate::signaling::signaling_output::SignalingOutput;
use huddle_core::{ClientEvent, DEFAULT_USERNAME, PeerId, RoomCode, RoomStatus, ServerEvent};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Which relay a payload arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relay {
    Offer,
    Answer,
    IceCandidate,
}

/// Protocol handler. Owns all room state and applies one command at a time,
/// so every handler runs as a single atomic step.
pub struct SignalingRouter {
    state: RoomState,
    connected: HashSet<PeerId>,
    command_rx: mpsc::Receiver<RouterCommand>,
    output: Arc<dyn SignalingOutput>,
}

impl SignalingRouter {
    pub fn new(
        state: RoomState,
        command_rx: mpsc::Receiver<RouterCommand>,
        output: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            state,
            connected: HashSet::new(),
            command_rx,
            output,
        }
    }

    /// Runs until every command sender is dropped.
    pub async fn run(mut self) {
        info!("Signaling router started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!(
            rooms = self.state.room_count(),
            "Command channel closed. Signaling router stopped"
        );
    }

    pub async fn handle_command(&mut self, cmd: RouterCommand) {
        match cmd {
            RouterCommand::Connect { peer_id } => {
                self.connected.insert(peer_id);
                info!(peer = %peer_id, online = self.connected.len(), "Client connected");
            }

            RouterCommand::Event { peer_id, event } => self.dispatch(peer_id, event).await,

            RouterCommand::Rejected {
                peer_id,
                event,
                reason,
            } => self.handle_rejected(peer_id, &event, &reason).await,

            RouterCommand::Disconnect { peer_id } => self.handle_disconnect(peer_id).await,

            RouterCommand::QueryRoom { room_code, reply } => {
                let status = RoomCode::normalize(&room_code)
                    .map(|code| self.state.status(&code))
                    .unwrap_or(RoomStatus::MISSING);
                debug!(room = %room_code, ?status, "Room status queried");
                let _ = reply.send(status);
            }
        }
    }

    /// Read-only view of the state, for inspection in tests and tooling.
    pub fn state(&self) -> &RoomState {
        &self.state
    }

    async fn dispatch(&mut self, peer_id: PeerId, event: ClientEvent) {
        let name = event.name();

        let result = match event {
            ClientEvent::CreateRoom { username } => self.handle_create_room(peer_id, username).await,
            ClientEvent::JoinRoom {
                room_code,
                username,
            } => self.handle_join_room(peer_id, &room_code, username).await,
            ClientEvent::Offer { target, offer } => {
                self.handle_relay(peer_id, Relay::Offer, target, offer).await
            }
            ClientEvent::Answer { target, answer } => {
                self.handle_relay(peer_id, Relay::Answer, target, answer).await
            }
            ClientEvent::IceCandidate { target, candidate } => {
                self.handle_relay(peer_id, Relay::IceCandidate, target, candidate)
                    .await
            }
            ClientEvent::MicMuted {} => self.handle_mic(peer_id, true).await,
            ClientEvent::MicUnmuted {} => self.handle_mic(peer_id, false).await,
        };

        let Err(err) = result else {
            return;
        };

        match &err {
            SignalingError::Internal(_) => {
                error!(peer = %peer_id, event = name, error = %err, "Handler failed")
            }
            _ => warn!(peer = %peer_id, event = name, error = %err, "Rejected event"),
        }

        if let Some(reply) = error_reply(name, &err) {
            self.output.send_event(peer_id, reply).await;
        }
    }

    /// Answers a malformed frame the same way its handler would answer a
    /// validation failure.
    async fn handle_rejected(&mut self, peer_id: PeerId, event: &str, reason: &str) {
        warn!(peer = %peer_id, event, reason, "Malformed payload");

        let err = SignalingError::validation(format!("malformed {event} payload"));
        if let Some(reply) = error_reply(event, &err) {
            self.output.send_event(peer_id, reply).await;
        }
    }

    async fn handle_create_room(
        &mut self,
        peer_id: PeerId,
        username: Option<String>,
    ) -> Result<(), SignalingError> {
        let username = username.unwrap_or_else(|| DEFAULT_USERNAME.to_owned());
        let (room_code, previous) = self.state.create_room(peer_id, username.clone())?;

        if let Some(previous) = previous {
            debug!(peer = %peer_id, room = %previous, "Detached from previous room");
        }
        info!(
            peer = %peer_id,
            room = %room_code,
            %username,
            rooms = self.state.room_count(),
            "Room created"
        );

        self.output
            .send_event(peer_id, ServerEvent::RoomCreated { room_code })
            .await;
        Ok(())
    }

    async fn handle_join_room(
        &mut self,
        peer_id: PeerId,
        room_code: &str,
        username: Option<String>,
    ) -> Result<(), SignalingError> {
        let Some(code) = RoomCode::normalize(room_code) else {
            return Err(SignalingError::validation("room code is required"));
        };
        let username = username.unwrap_or_else(|| DEFAULT_USERNAME.to_owned());

        let outcome = self.state.join_room(peer_id, &code, username.clone())?;
        let others = outcome.others(&peer_id);

        if let Some(previous) = &outcome.previous {
            debug!(peer = %peer_id, room = %previous, "Detached from previous room");
        }
        info!(
            peer = %peer_id,
            room = %code,
            %username,
            members = outcome.users.len(),
            "Joined room"
        );

        self.output
            .send_event(
                peer_id,
                ServerEvent::RoomJoined {
                    room_code: code,
                    users: outcome.users,
                },
            )
            .await;

        if !others.is_empty() {
            self.output
                .broadcast(
                    &others,
                    ServerEvent::UserJoined {
                        socket_id: peer_id,
                        username,
                    },
                )
                .await;
        }
        Ok(())
    }

    /// Forwards an opaque payload to `target`. The target is not required to
    /// share a room with the sender.
    async fn handle_relay(
        &mut self,
        peer_id: PeerId,
        relay: Relay,
        target: Option<PeerId>,
        payload: Value,
    ) -> Result<(), SignalingError> {
        let Some(target) = target else {
            return Err(SignalingError::validation("target is required"));
        };

        let event = match relay {
            Relay::Offer => ServerEvent::Offer {
                offer: payload,
                from: peer_id,
            },
            Relay::Answer => ServerEvent::Answer {
                answer: payload,
                from: peer_id,
            },
            Relay::IceCandidate => ServerEvent::IceCandidate {
                candidate: payload,
                from: peer_id,
            },
        };

        debug!(from = %peer_id, to = %target, ?relay, "Relaying");
        self.output.send_event(target, event).await;
        Ok(())
    }

    async fn handle_mic(&mut self, peer_id: PeerId, muted: bool) -> Result<(), SignalingError> {
        let Some((room, others)) = self.state.room_mates(&peer_id) else {
            return Err(SignalingError::validation("not in a room"));
        };

        info!(peer = %peer_id, %room, muted, "Microphone state changed");

        let event = if muted {
            ServerEvent::UserMicMuted {
                socket_id: peer_id,
                muted,
            }
        } else {
            ServerEvent::UserMicUnmuted {
                socket_id: peer_id,
                muted,
            }
        };

        if !others.is_empty() {
            self.output.broadcast(&others, event).await;
        }
        Ok(())
    }

    async fn handle_disconnect(&mut self, peer_id: PeerId) {
        self.connected.remove(&peer_id);

        let Some(departure) = self.state.leave(&peer_id) else {
            info!(peer = %peer_id, "Client disconnected");
            return;
        };

        info!(
            peer = %peer_id,
            room = %departure.room,
            remaining = departure.remaining.len(),
            "Client disconnected, left room"
        );

        if !departure.remaining.is_empty() {
            self.output
                .broadcast(&departure.remaining, ServerEvent::UserLeft { sid: peer_id })
                .await;
        }
    }
}

/// Decides which failures the sender hears about.
///
/// join-room always answers with `join-error`; relays report missing
/// targets with `signal-error`; everything else is only logged.
fn error_reply(event: &str, err: &SignalingError) -> Option<ServerEvent> {
    match (event, err) {
        ("join-room", _) => Some(ServerEvent::JoinError {
            message: err.to_string(),
        }),
        ("offer" | "answer" | "ice-candidate", SignalingError::Validation(message)) => {
            Some(ServerEvent::SignalError {
                event: event.to_owned(),
                message: message.clone(),
            })
        }
        _ => None,
    }
}
