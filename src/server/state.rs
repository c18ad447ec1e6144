// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the address of the signaling server actor, shared between the
//! HTTP/WebSocket handlers.

use actix::Addr;
use crate::server::signaling::server::SignalingServer;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the signaling server actor (queue, rooms, relay).
    pub signaling_addr: Addr<SignalingServer>,
}

impl AppState {
    /// Create a new AppState with the given actor address.
    pub fn new(signaling_addr: Addr<SignalingServer>) -> Self {
        AppState { signaling_addr }
    }
}
