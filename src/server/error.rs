//! Error types shared by the signaling server.
//!
//! None of these are fatal to the process: protocol and delivery errors are
//! logged by the caller and the offending frame is dropped.

use thiserror::Error;

use crate::server::signaling::types::ClientId;

/// Errors raised while decoding or encoding a signaling frame.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The frame is not valid JSON.
    #[error("malformed message: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The frame is valid JSON but not an object.
    #[error("message is not a JSON object")]
    NotAnObject,

    /// The `type` field is missing or not a string.
    #[error("message has no string `type` field")]
    MissingType,

    /// The `type` field names a kind the broker does not handle.
    #[error("unknown message type: {0}")]
    UnknownKind(String),

    /// An outbound message could not be serialized.
    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors raised while handing an outbound frame to a session.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// No session is attached to this client id.
    #[error("no session for client {0}")]
    UnknownClient(ClientId),

    /// The outbound message could not be encoded.
    #[error(transparent)]
    Encode(#[from] ProtocolError),
}
