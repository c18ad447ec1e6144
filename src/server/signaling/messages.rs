use actix::prelude::*;

/// One encoded text frame to be written by a session actor.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
#[rtype(result = "()")]
pub struct Deliver(pub String);
