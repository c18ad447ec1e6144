//! Signaling state machine.
//!
//! [`Broker`] owns the connection registry, the waiting queue and the room
//! registry, and performs every state transition of the protocol: join,
//! leave, match, relay, end of call and disconnect. It never writes to a
//! socket. Each operation returns the [`Delivery`] list the caller must hand
//! to the sessions afterwards, so state mutation and network writes never
//! overlap.

use log::{debug, info};

use super::protocol::{Outbound, ServerMessage};
use super::queue::WaitingQueue;
use super::registry::ConnectionRegistry;
use super::rooms::{Room, RoomRegistry};
use super::types::{BrokerStats, Client, ClientId, Role};

/// One outbound frame addressed to a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub to: ClientId,
    pub outbound: Outbound,
}

impl Delivery {
    pub fn notify(to: ClientId, msg: ServerMessage) -> Self {
        Self {
            to,
            outbound: Outbound::Notify(msg),
        }
    }

    pub fn relay(to: ClientId, payload: String) -> Self {
        Self {
            to,
            outbound: Outbound::Relay(payload),
        }
    }
}

#[derive(Debug, Default)]
pub struct Broker {
    registry: ConnectionRegistry,
    queue: WaitingQueue,
    rooms: RoomRegistry,
}

impl Broker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection and greet it with `connected`.
    pub fn connect(&mut self, id: ClientId, username: Option<String>) -> Vec<Delivery> {
        let client = self.registry.register(id);
        let client_id = client.id;
        if let Some(username) = username {
            self.set_username(&client_id, username);
        }
        info!(
            "[Signaling] New user connected ({}). Total clients: {}",
            self.label(&client_id),
            self.registry.len()
        );
        vec![Delivery::notify(client_id, ServerMessage::Connected)]
    }

    /// Queue the client and pair the queue head if two clients are waiting.
    pub fn join_waiting(&mut self, id: &ClientId, username: Option<String>) -> Vec<Delivery> {
        let Some(client) = self.registry.lookup(id) else {
            debug!("[Signaling] join_waiting from unknown client {}", id);
            return Vec::new();
        };
        if client.is_matched() {
            debug!(
                "[Signaling] {} tried to join the waiting queue while in a room",
                self.label(id)
            );
            return Vec::new();
        }
        if let Some(username) = username {
            self.set_username(id, username);
        }
        if !self.queue.join(*id) {
            return Vec::new();
        }
        info!(
            "[Signaling] User {} joined waiting room. Waiting users: {}",
            self.label(id),
            self.queue.len()
        );

        let mut deliveries = vec![Delivery::notify(
            *id,
            ServerMessage::Waiting {
                queue_len: self.queue.len(),
            },
        )];
        deliveries.extend(self.try_match());
        deliveries
    }

    /// Remove the client from the waiting queue if it is there.
    pub fn leave_waiting(&mut self, id: &ClientId) {
        if self.queue.leave(id) {
            info!(
                "[Signaling] User {} left waiting room. Waiting users: {}",
                self.label(id),
                self.queue.len()
            );
        }
    }

    /// Forward a relay frame to the sender's room partner.
    /// Returns `None` when the sender has no room.
    pub fn relay(&self, sender: &ClientId, payload: String) -> Option<Delivery> {
        let room = self.room_of(sender)?;
        let Some(partner) = room.partner_of(sender) else {
            debug!("[Signaling] {} is not a member of {}", sender, room.id);
            return None;
        };
        Some(Delivery::relay(partner, payload))
    }

    /// Close the client's room and tell the partner.
    pub fn end_call(&mut self, id: &ClientId) -> Vec<Delivery> {
        let Some(room_id) = self.registry.lookup(id).and_then(|c| c.room.clone()) else {
            return Vec::new();
        };
        let Some(room) = self.rooms.remove(&room_id) else {
            // Stale id; the room was already torn down.
            if let Some(client) = self.registry.lookup_mut(id) {
                client.room = None;
            }
            return Vec::new();
        };

        for member in room.members() {
            if let Some(client) = self.registry.lookup_mut(&member) {
                if client.room.as_ref() == Some(&room.id) {
                    client.room = None;
                }
            }
        }

        let mut deliveries = Vec::new();
        if let Some(partner) = room.partner_of(id) {
            if self.registry.contains(&partner) {
                deliveries.push(Delivery::notify(partner, ServerMessage::CallEnded));
            }
        }
        info!(
            "[Signaling] Call ended for user {} in {}",
            self.label(id),
            room.id
        );
        deliveries
    }

    /// Full teardown for a closed connection. Safe to call more than once.
    pub fn disconnect(&mut self, id: &ClientId) -> Vec<Delivery> {
        if !self.registry.contains(id) {
            return Vec::new();
        }
        self.leave_waiting(id);
        let deliveries = self.end_call(id);
        let label = self.label(id);
        self.registry.unregister(id);
        info!(
            "[Signaling] User {} disconnected. Total clients: {}",
            label,
            self.registry.len()
        );
        deliveries
    }

    pub fn stats(&self) -> BrokerStats {
        BrokerStats {
            clients: self.registry.len(),
            waiting: self.queue.len(),
            rooms: self.rooms.len(),
        }
    }

    pub fn client(&self, id: &ClientId) -> Option<&Client> {
        self.registry.lookup(id)
    }

    pub fn room_of(&self, id: &ClientId) -> Option<&Room> {
        let room_id = self.registry.lookup(id)?.room.as_ref()?;
        self.rooms.get(room_id)
    }

    pub fn is_waiting(&self, id: &ClientId) -> bool {
        self.queue.contains(id)
    }

    fn try_match(&mut self) -> Vec<Delivery> {
        let mut deliveries = Vec::new();
        while let Some((caller, answerer)) = self.queue.pop_pair() {
            let room_id = self.rooms.create(caller, answerer);
            for (member, role) in [(caller, Role::Caller), (answerer, Role::Answerer)] {
                if let Some(client) = self.registry.lookup_mut(&member) {
                    client.room = Some(room_id.clone());
                }
                deliveries.push(Delivery::notify(
                    member,
                    ServerMessage::Matched {
                        room_id: room_id.clone(),
                        role,
                    },
                ));
            }
            info!(
                "[Signaling] Matched users {} and {} in room {}",
                self.label(&caller),
                self.label(&answerer),
                room_id
            );
        }
        deliveries
    }

    fn set_username(&mut self, id: &ClientId, username: String) {
        if let Some(client) = self.registry.lookup_mut(id) {
            client.username = username;
        }
    }

    /// Display name for logs, falling back to the connection id.
    fn label(&self, id: &ClientId) -> String {
        match self.registry.lookup(id) {
            Some(client) if !client.username.is_empty() => client.username.clone(),
            _ => id.to_string(),
        }
    }
}
