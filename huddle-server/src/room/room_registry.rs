use crate::error::{RoomNotFound, SignalingError};
use crate::room::room_code::RoomCodeGenerator;
use huddle_core::{Member, PeerId, RoomCode, RoomStatus};
use std::collections::HashMap;

/// Rooms and their members, in join order.
///
/// Rooms are never removed once created, even after the last member leaves.
pub struct RoomRegistry {
    rooms: HashMap<RoomCode, Vec<Member>>,
    codes: RoomCodeGenerator,
}

impl RoomRegistry {
    pub fn new(codes: RoomCodeGenerator) -> Self {
        Self {
            rooms: HashMap::new(),
            codes,
        }
    }

    /// Registers an empty room under a fresh code.
    pub fn create_room(&mut self) -> Result<RoomCode, SignalingError> {
        let rooms = &self.rooms;
        let code = self.codes.generate(|code| rooms.contains_key(code))?;
        self.rooms.insert(code.clone(), Vec::new());
        Ok(code)
    }

    /// Inserts the member, or replaces its name in place if already present.
    pub fn add_member(
        &mut self,
        room: &RoomCode,
        peer_id: PeerId,
        username: String,
    ) -> Result<(), RoomNotFound> {
        let members = self.members_mut(room)?;

        match members.iter_mut().find(|m| m.socket_id == peer_id) {
            Some(existing) => existing.username = username,
            None => members.push(Member {
                socket_id: peer_id,
                username,
            }),
        }
        Ok(())
    }

    /// Returns whether an entry was removed.
    pub fn remove_member(&mut self, room: &RoomCode, peer_id: &PeerId) -> Result<bool, RoomNotFound> {
        let members = self.members_mut(room)?;
        let before = members.len();
        members.retain(|m| &m.socket_id != peer_id);
        Ok(members.len() != before)
    }

    pub fn list_members(&self, room: &RoomCode) -> Result<Vec<Member>, RoomNotFound> {
        self.rooms
            .get(room)
            .cloned()
            .ok_or_else(|| RoomNotFound(room.clone()))
    }

    pub fn exists(&self, room: &RoomCode) -> bool {
        self.rooms.contains_key(room)
    }

    pub fn member_count(&self, room: &RoomCode) -> Result<usize, RoomNotFound> {
        self.rooms
            .get(room)
            .map(Vec::len)
            .ok_or_else(|| RoomNotFound(room.clone()))
    }

    pub fn contains_member(&self, room: &RoomCode, peer_id: &PeerId) -> bool {
        self.rooms
            .get(room)
            .is_some_and(|members| members.iter().any(|m| &m.socket_id == peer_id))
    }

    pub fn status(&self, room: &RoomCode) -> RoomStatus {
        match self.member_count(room) {
            Ok(user_count) => RoomStatus {
                exists: true,
                user_count,
            },
            Err(_) => RoomStatus::MISSING,
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&RoomCode, &Vec<Member>)> {
        self.rooms.iter()
    }

    fn members_mut(&mut self, room: &RoomCode) -> Result<&mut Vec<Member>, RoomNotFound> {
        self.rooms
            .get_mut(room)
            .ok_or_else(|| RoomNotFound(room.clone()))
    }
}
