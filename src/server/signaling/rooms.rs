//! Room registry: live two-party sessions keyed by [`RoomId`].

use std::collections::HashMap;

use super::types::{ClientId, RoomId};
use crate::config::signaling::ROOM_ID_PREFIX;

/// One active session between exactly two clients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub caller: ClientId,
    pub answerer: ClientId,
}

impl Room {
    /// The member that is not `id`, or `None` if `id` is not a member.
    pub fn partner_of(&self, id: &ClientId) -> Option<ClientId> {
        if *id == self.caller {
            Some(self.answerer)
        } else if *id == self.answerer {
            Some(self.caller)
        } else {
            None
        }
    }

    pub fn members(&self) -> [ClientId; 2] {
        [self.caller, self.answerer]
    }
}

#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
    /// Last allocated sequence number; ids are never handed out twice.
    last_seq: u64,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new room and return its freshly allocated id.
    pub fn create(&mut self, caller: ClientId, answerer: ClientId) -> RoomId {
        self.last_seq += 1;
        let id = RoomId(format!("{}{}", ROOM_ID_PREFIX, self.last_seq));
        self.rooms.insert(
            id.clone(),
            Room {
                id: id.clone(),
                caller,
                answerer,
            },
        );
        id
    }

    pub fn get(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn remove(&mut self, id: &RoomId) -> Option<Room> {
        self.rooms.remove(id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }
}
