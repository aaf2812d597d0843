use huddle_core::{PeerId, RoomCode};
use std::collections::HashMap;

/// Reverse lookup from a connection to the room it is in.
///
/// No validation happens here; [`RoomState`](crate::room::RoomState) keeps it
/// in step with the registry.
#[derive(Default)]
pub struct ConnectionIndex {
    rooms: HashMap<PeerId, RoomCode>,
}

impl ConnectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous binding, if any.
    pub fn bind(&mut self, peer_id: PeerId, room: RoomCode) -> Option<RoomCode> {
        self.rooms.insert(peer_id, room)
    }

    pub fn unbind(&mut self, peer_id: &PeerId) -> Option<RoomCode> {
        self.rooms.remove(peer_id)
    }

    pub fn room_of(&self, peer_id: &PeerId) -> Option<&RoomCode> {
        self.rooms.get(peer_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&PeerId, &RoomCode)> {
        self.rooms.iter()
    }
}
