//! Signaling configuration constants.
//!
//! Room naming and the human-readable status texts sent to waiting clients.

pub const ROOM_ID_PREFIX: &str = "room_";

/// Status text carried by the `waiting` notification.
pub fn waiting_status(queue_len: usize) -> String {
    format!("Waiting for another user... ({} users waiting)", queue_len)
}
