//! Connection registry: the single owner of every connected [`Client`].

use std::collections::HashMap;

use super::types::{Client, ClientId};

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    clients: HashMap<ClientId, Client>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh client with no name and no room.
    /// A live id is left untouched.
    pub fn register(&mut self, id: ClientId) -> &Client {
        self.clients.entry(id).or_insert_with(|| Client::new(id))
    }

    pub fn lookup(&self, id: &ClientId) -> Option<&Client> {
        self.clients.get(id)
    }

    pub fn lookup_mut(&mut self, id: &ClientId) -> Option<&mut Client> {
        self.clients.get_mut(id)
    }

    /// Remove a client. Returns `None` if it was already gone.
    pub fn unregister(&mut self, id: &ClientId) -> Option<Client> {
        self.clients.remove(id)
    }

    pub fn contains(&self, id: &ClientId) -> bool {
        self.clients.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::signaling::types::RoomId;

    #[test]
    fn register_creates_idle_client() {
        let mut registry = ConnectionRegistry::new();
        let id = ClientId::new();
        let client = registry.register(id);
        assert_eq!(client.id, id);
        assert!(client.username.is_empty());
        assert!(!client.is_matched());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_twice_keeps_existing_state() {
        let mut registry = ConnectionRegistry::new();
        let id = ClientId::new();
        registry.register(id);
        registry.lookup_mut(&id).unwrap().room = Some(RoomId("room_1".to_string()));
        registry.register(id);
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup(&id).unwrap().is_matched());
    }

    #[test]
    fn unregister_is_idempotent() {
        let mut registry = ConnectionRegistry::new();
        let id = ClientId::new();
        registry.register(id);
        assert!(registry.unregister(&id).is_some());
        assert!(registry.unregister(&id).is_none());
        assert!(registry.lookup(&id).is_none());
        assert!(registry.is_empty());
    }
}
