use crate::error::SignalingError;
use crate::room::connection_index::ConnectionIndex;
use crate::room::room_registry::RoomRegistry;
use huddle_core::{Member, PeerId, RoomCode, RoomStatus};

/// Result of a successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Every member of the room after the join, newcomer included.
    pub users: Vec<Member>,
    /// Room the connection was silently detached from, if it was elsewhere.
    pub previous: Option<RoomCode>,
}

impl JoinOutcome {
    pub fn others(&self, peer_id: &PeerId) -> Vec<PeerId> {
        self.users
            .iter()
            .map(|m| m.socket_id)
            .filter(|id| id != peer_id)
            .collect()
    }
}

/// Connection removed from a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room: RoomCode,
    pub remaining: Vec<PeerId>,
}

/// Room membership and the connection index, updated only in pairs.
///
/// Invariant: `peer` is listed in room `r` iff the index maps `peer` to `r`.
pub struct RoomState {
    registry: RoomRegistry,
    index: ConnectionIndex,
}

impl RoomState {
    pub fn new(registry: RoomRegistry) -> Self {
        Self {
            registry,
            index: ConnectionIndex::new(),
        }
    }

    /// Opens a new room with `peer_id` as its only member.
    pub fn create_room(
        &mut self,
        peer_id: PeerId,
        username: String,
    ) -> Result<(RoomCode, Option<RoomCode>), SignalingError> {
        let code = self.registry.create_room()?;
        let previous = self.detach(&peer_id).map(|departure| departure.room);
        self.attach(peer_id, &code, username)?;
        Ok((code, previous))
    }

    pub fn join_room(
        &mut self,
        peer_id: PeerId,
        code: &RoomCode,
        username: String,
    ) -> Result<JoinOutcome, SignalingError> {
        if !self.registry.exists(code) {
            return Err(SignalingError::RoomNotFound(code.clone()));
        }

        let moving = self
            .index
            .room_of(&peer_id)
            .is_some_and(|current| current != code);
        let previous = if moving {
            self.detach(&peer_id).map(|d| d.room)
        } else {
            None
        };

        self.attach(peer_id, code, username)?;
        let users = self.registry.list_members(code)?;

        Ok(JoinOutcome { users, previous })
    }

    /// Removes the connection from its room. `None` when it was in no room.
    pub fn leave(&mut self, peer_id: &PeerId) -> Option<Departure> {
        self.detach(peer_id)
    }

    pub fn room_of(&self, peer_id: &PeerId) -> Option<&RoomCode> {
        self.index.room_of(peer_id)
    }

    /// Other members of the connection's current room.
    pub fn room_mates(&self, peer_id: &PeerId) -> Option<(RoomCode, Vec<PeerId>)> {
        let room = self.index.room_of(peer_id)?;
        let members = self.registry.list_members(room).ok()?;
        let others = members
            .into_iter()
            .map(|m| m.socket_id)
            .filter(|id| id != peer_id)
            .collect();
        Some((room.clone(), others))
    }

    pub fn list_members(&self, code: &RoomCode) -> Option<Vec<Member>> {
        self.registry.list_members(code).ok()
    }

    pub fn status(&self, code: &RoomCode) -> RoomStatus {
        self.registry.status(code)
    }

    pub fn room_count(&self) -> usize {
        self.registry.room_count()
    }

    pub fn bound_connections(&self) -> usize {
        self.index.len()
    }

    /// Checks the membership invariant in both directions.
    pub fn is_consistent(&self) -> bool {
        let indexed = self
            .index
            .iter()
            .all(|(peer, room)| self.registry.contains_member(room, peer));

        let listed = self.registry.iter().all(|(room, members)| {
            members
                .iter()
                .all(|m| self.index.room_of(&m.socket_id) == Some(room))
        });

        indexed && listed
    }

    fn attach(&mut self, peer_id: PeerId, code: &RoomCode, username: String) -> Result<(), SignalingError> {
        self.registry.add_member(code, peer_id, username)?;
        self.index.bind(peer_id, code.clone());
        Ok(())
    }

    fn detach(&mut self, peer_id: &PeerId) -> Option<Departure> {
        let room = self.index.unbind(peer_id)?;
        // The room entry outlives its members, so this only misses if the
        // maps were already out of step.
        let _ = self.registry.remove_member(&room, peer_id);
        let remaining = self
            .registry
            .list_members(&room)
            .map(|members| members.into_iter().map(|m| m.socket_id).collect())
            .unwrap_or_default();
        Some(Departure { room, remaining })
    }
}
