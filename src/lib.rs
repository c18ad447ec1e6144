//! Signaling broker for two-party WebRTC sessions.
//!
//! Clients connect over WebSocket, wait in a FIFO queue, are paired into
//! rooms of exactly two, and exchange session descriptions and ICE
//! candidates through the broker until one side hangs up or disconnects.

pub mod config;
pub mod server;
