//! Wire format of the signaling protocol.
//!
//! Every frame is a JSON object with a required `type` field. Control frames
//! use the fixed [`Envelope`] shape; relay frames (`sdp`, `candidate`) are
//! forwarded as the complete object the sender wrote.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::{Role, RoomId};
use crate::config::signaling::waiting_status;
use crate::server::error::ProtocolError;

/// Fixed envelope used for broker notifications.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Kinds of frames forwarded verbatim to the room partner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayKind {
    Sdp,
    Candidate,
}

impl RelayKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelayKind::Sdp => "sdp",
            RelayKind::Candidate => "candidate",
        }
    }
}

/// Decoded client -> broker frame.
#[derive(Clone, Debug, PartialEq)]
pub enum ClientMessage {
    JoinWaiting { username: Option<String> },
    LeaveWaiting,
    Relay { kind: RelayKind, payload: String },
    EndCall,
}

/// Broker -> client notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerMessage {
    Connected,
    Waiting { queue_len: usize },
    Matched { room_id: RoomId, role: Role },
    CallEnded,
}

impl ServerMessage {
    pub fn to_envelope(&self) -> Envelope {
        match self {
            ServerMessage::Connected => Envelope {
                kind: "connected".to_string(),
                ..Envelope::default()
            },
            ServerMessage::Waiting { queue_len } => Envelope {
                kind: "waiting".to_string(),
                data: Some(waiting_status(*queue_len)),
                ..Envelope::default()
            },
            ServerMessage::Matched { room_id, role } => Envelope {
                kind: "matched".to_string(),
                room_id: Some(room_id.to_string()),
                data: Some(role.as_str().to_string()),
                ..Envelope::default()
            },
            ServerMessage::CallEnded => Envelope {
                kind: "call_ended".to_string(),
                ..Envelope::default()
            },
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(&self.to_envelope()).map_err(ProtocolError::Encode)
    }
}

/// What a delivery carries: a notification, or a relayed frame already encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outbound {
    Notify(ServerMessage),
    Relay(String),
}

impl Outbound {
    pub fn encode(self) -> Result<String, ProtocolError> {
        match self {
            Outbound::Notify(msg) => msg.encode(),
            Outbound::Relay(payload) => Ok(payload),
        }
    }
}

/// Decode one text frame.
pub fn decode(text: &str) -> Result<ClientMessage, ProtocolError> {
    let value: Value = serde_json::from_str(text).map_err(ProtocolError::Malformed)?;
    let object = match value {
        Value::Object(object) => object,
        _ => return Err(ProtocolError::NotAnObject),
    };
    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ProtocolError::MissingType)?
        .to_string();

    match kind.as_str() {
        "join_waiting" => Ok(ClientMessage::JoinWaiting {
            username: object
                .get("username")
                .and_then(Value::as_str)
                .map(str::to_string),
        }),
        "leave_waiting" => Ok(ClientMessage::LeaveWaiting),
        "end_call" => Ok(ClientMessage::EndCall),
        "sdp" => relay(RelayKind::Sdp, object),
        "candidate" => relay(RelayKind::Candidate, object),
        _ => Err(ProtocolError::UnknownKind(kind)),
    }
}

fn relay(kind: RelayKind, object: Map<String, Value>) -> Result<ClientMessage, ProtocolError> {
    let payload = serde_json::to_string(&object).map_err(ProtocolError::Encode)?;
    Ok(ClientMessage::Relay { kind, payload })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_join_with_username() {
        let msg = decode(r#"{"type":"join_waiting","username":"alice"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::JoinWaiting {
                username: Some("alice".to_string())
            }
        );
    }

    #[test]
    fn decodes_join_without_username() {
        let msg = decode(r#"{"type":"join_waiting"}"#).unwrap();
        assert_eq!(msg, ClientMessage::JoinWaiting { username: None });
    }

    #[test]
    fn decodes_control_kinds() {
        assert_eq!(decode(r#"{"type":"leave_waiting"}"#).unwrap(), ClientMessage::LeaveWaiting);
        assert_eq!(decode(r#"{"type":"end_call"}"#).unwrap(), ClientMessage::EndCall);
    }

    #[test]
    fn relay_keeps_every_field_in_order() {
        let text = r#"{"type":"candidate","candidate":{"candidate":"candidate:1 1 UDP 2122 10.0.0.2 5000 typ host","sdpMid":"0","sdpMLineIndex":0},"zeta":[1,2,3],"alpha":null}"#;
        match decode(text).unwrap() {
            ClientMessage::Relay { kind, payload } => {
                assert_eq!(kind, RelayKind::Candidate);
                assert_eq!(payload, text);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(decode("{not json"), Err(ProtocolError::Malformed(_))));
    }

    #[test]
    fn rejects_non_object() {
        assert!(matches!(decode("[1,2]"), Err(ProtocolError::NotAnObject)));
    }

    #[test]
    fn rejects_missing_or_non_string_type() {
        assert!(matches!(decode(r#"{"data":"x"}"#), Err(ProtocolError::MissingType)));
        assert!(matches!(decode(r#"{"type":5}"#), Err(ProtocolError::MissingType)));
    }

    #[test]
    fn rejects_unknown_kind() {
        match decode(r#"{"type":"dance"}"#) {
            Err(ProtocolError::UnknownKind(kind)) => assert_eq!(kind, "dance"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn encodes_notifications_without_empty_fields() {
        assert_eq!(ServerMessage::Connected.encode().unwrap(), r#"{"type":"connected"}"#);
        assert_eq!(ServerMessage::CallEnded.encode().unwrap(), r#"{"type":"call_ended"}"#);
        let matched = ServerMessage::Matched {
            room_id: RoomId("room_1".to_string()),
            role: Role::Answerer,
        };
        assert_eq!(
            matched.encode().unwrap(),
            r#"{"type":"matched","room_id":"room_1","data":"answerer"}"#
        );
    }

    #[test]
    fn waiting_carries_queue_length() {
        let envelope = ServerMessage::Waiting { queue_len: 3 }.to_envelope();
        assert_eq!(envelope.kind, "waiting");
        assert_eq!(
            envelope.data.as_deref(),
            Some("Waiting for another user... (3 users waiting)")
        );
    }
}
