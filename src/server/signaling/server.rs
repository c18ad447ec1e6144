//! Signaling server actor.
//!
//! Owns the [`Broker`] and the mailbox of every connected session. The actor
//! mailbox serializes all join, leave, match, relay, end and disconnect
//! operations, so each handler runs as one indivisible step. Outbound frames
//! are queued on the target session's mailbox after the state change; the
//! session actor does the socket write.

use actix::prelude::*;
use log::{debug, warn};
use std::collections::HashMap;

use super::broker::{Broker, Delivery};
use super::messages::Deliver;
use super::protocol::RelayKind;
use super::types::{BrokerStats, ClientId};
use crate::server::error::DeliveryError;

pub struct SignalingServer {
    broker: Broker,
    /// Mailboxes of connected sessions, keyed like the registry.
    sessions: HashMap<ClientId, Recipient<Deliver>>,
}

impl SignalingServer {
    pub fn new() -> Self {
        Self {
            broker: Broker::new(),
            sessions: HashMap::new(),
        }
    }

    /// Hand every delivery to its session. Failures are logged and dropped.
    fn dispatch(&self, deliveries: Vec<Delivery>) {
        for delivery in deliveries {
            if let Err(e) = self.deliver(delivery) {
                warn!("[Signaling] Dropped outbound message: {}", e);
            }
        }
    }

    fn deliver(&self, delivery: Delivery) -> Result<(), DeliveryError> {
        let to = delivery.to;
        let recipient = self
            .sessions
            .get(&to)
            .ok_or(DeliveryError::UnknownClient(to))?;
        let text = delivery.outbound.encode()?;
        recipient.do_send(Deliver(text));
        Ok(())
    }
}

impl Default for SignalingServer {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for SignalingServer {
    type Context = Context<Self>;
}

/// Message: a session opened; register it and greet the client.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub client_id: ClientId,
    pub username: Option<String>,
    pub addr: Recipient<Deliver>,
}

/// Message: the session's transport closed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub client_id: ClientId,
}

/// Message: client asks to be paired.
#[derive(Message)]
#[rtype(result = "()")]
pub struct JoinWaiting {
    pub client_id: ClientId,
    pub username: Option<String>,
}

/// Message: client stops waiting.
#[derive(Message)]
#[rtype(result = "()")]
pub struct LeaveWaiting {
    pub client_id: ClientId,
}

/// Message: negotiation frame for the room partner.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Relay {
    pub client_id: ClientId,
    pub kind: RelayKind,
    pub payload: String,
}

/// Message: client hangs up.
#[derive(Message)]
#[rtype(result = "()")]
pub struct EndCall {
    pub client_id: ClientId,
}

/// Message: read the current counters.
#[derive(Message)]
#[rtype(result = "BrokerStats")]
pub struct GetStats;

impl Handler<Connect> for SignalingServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        self.sessions.insert(msg.client_id, msg.addr);
        let deliveries = self.broker.connect(msg.client_id, msg.username);
        self.dispatch(deliveries);
    }
}

impl Handler<Disconnect> for SignalingServer {
    type Result = ();

    /// Leave the queue, end any call, then forget the session.
    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        let deliveries = self.broker.disconnect(&msg.client_id);
        self.sessions.remove(&msg.client_id);
        self.dispatch(deliveries);
    }
}

impl Handler<JoinWaiting> for SignalingServer {
    type Result = ();

    fn handle(&mut self, msg: JoinWaiting, _ctx: &mut Self::Context) -> Self::Result {
        let deliveries = self.broker.join_waiting(&msg.client_id, msg.username);
        self.dispatch(deliveries);
    }
}

impl Handler<LeaveWaiting> for SignalingServer {
    type Result = ();

    fn handle(&mut self, msg: LeaveWaiting, _ctx: &mut Self::Context) -> Self::Result {
        self.broker.leave_waiting(&msg.client_id);
    }
}

impl Handler<Relay> for SignalingServer {
    type Result = ();

    fn handle(&mut self, msg: Relay, _ctx: &mut Self::Context) -> Self::Result {
        match self.broker.relay(&msg.client_id, msg.payload) {
            Some(delivery) => self.dispatch(vec![delivery]),
            None => debug!(
                "[Signaling] Dropped {} from {}: not in a room",
                msg.kind.as_str(),
                msg.client_id
            ),
        }
    }
}

impl Handler<EndCall> for SignalingServer {
    type Result = ();

    fn handle(&mut self, msg: EndCall, _ctx: &mut Self::Context) -> Self::Result {
        let deliveries = self.broker.end_call(&msg.client_id);
        self.dispatch(deliveries);
    }
}

impl Handler<GetStats> for SignalingServer {
    type Result = MessageResult<GetStats>;

    fn handle(&mut self, _msg: GetStats, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.broker.stats())
    }
}
