//! WebSocket session handler for signaling.
//!
//! This actor manages a single client's connection. Text frames are decoded
//! and forwarded to the signaling server as typed messages; frames the server
//! hands back are written to the socket. Stopping the actor, for any reason,
//! reports the disconnect.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, warn};

use super::messages::Deliver;
use super::protocol::{self, ClientMessage};
use super::server::{
    Connect, Disconnect, EndCall, JoinWaiting, LeaveWaiting, Relay, SignalingServer,
};
use super::types::ClientId;
use crate::server::error::ProtocolError;

/// Represents one client's WebSocket connection.
pub struct SignalingSession {
    pub client_id: ClientId,
    /// Display name given on the upgrade request, handed over on connect.
    pub username: Option<String>,
    pub server_addr: Addr<SignalingServer>,
}

impl SignalingSession {
    fn handle_text(&self, text: &str) {
        let client_id = self.client_id;
        match protocol::decode(text) {
            Ok(ClientMessage::JoinWaiting { username }) => {
                self.server_addr.do_send(JoinWaiting { client_id, username });
            }
            Ok(ClientMessage::LeaveWaiting) => {
                self.server_addr.do_send(LeaveWaiting { client_id });
            }
            Ok(ClientMessage::Relay { kind, payload }) => {
                self.server_addr.do_send(Relay {
                    client_id,
                    kind,
                    payload,
                });
            }
            Ok(ClientMessage::EndCall) => {
                self.server_addr.do_send(EndCall { client_id });
            }
            Err(ProtocolError::UnknownKind(kind)) => {
                warn!("[Session] Unknown message type from {}: {}", client_id, kind);
            }
            Err(e) => {
                warn!("[Session] Error parsing message from {}: {}", client_id, e);
            }
        }
    }
}

impl Actor for SignalingSession {
    type Context = ws::WebsocketContext<Self>;

    /// Registers the client with the signaling server.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.server_addr.do_send(Connect {
            client_id: self.client_id,
            username: self.username.take(),
            addr: ctx.address().recipient(),
        });
    }

    /// Runs the full teardown for this client.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.server_addr.do_send(Disconnect {
            client_id: self.client_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for SignalingSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => self.handle_text(&text),
            Ok(ws::Message::Binary(_)) => {
                debug!("[Session] Ignored binary frame from {}", self.client_id);
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => (),
            Err(e) => {
                warn!("[Session] Transport error for {}: {}", self.client_id, e);
                ctx.stop();
            }
        }
    }
}

impl Handler<Deliver> for SignalingSession {
    type Result = ();

    fn handle(&mut self, msg: Deliver, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

/// Display name from the `username` query parameter, percent-decoded.
pub fn username_from_query(query: &str) -> Option<String> {
    query.split('&').find_map(|kv| {
        let mut split = kv.splitn(2, '=');
        match (split.next(), split.next()) {
            (Some("username"), Some(name)) => urlencoding::decode(name)
                .ok()
                .map(|name| name.into_owned()),
            _ => None,
        }
    })
}

/// WebSocket endpoint for signaling sessions.
///
/// Accepts upgrades from any origin. Optional query parameter: `username`.
pub async fn ws_signaling(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let username = username_from_query(req.query_string());

    ws::start(
        SignalingSession {
            client_id: ClientId::new(),
            username,
            server_addr: data.signaling_addr.clone(),
        },
        &req,
        stream,
    )
}
