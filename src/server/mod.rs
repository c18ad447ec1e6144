// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing
//! - Signaling logic (waiting queue, room pairing, negotiation relay)
//! - Broker counters over HTTP

pub mod state;
pub mod router;
pub mod signaling;
pub mod stats;
pub mod error;
