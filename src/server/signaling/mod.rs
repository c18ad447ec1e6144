/// Signaling module: client registry, waiting queue, rooms, and SDP/ICE relay.

pub mod broker;
pub mod messages;
pub mod protocol;
pub mod queue;
pub mod registry;
pub mod rooms;
pub mod server;
pub mod session;
pub mod types;
