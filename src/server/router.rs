//! HTTP and WebSocket routing configuration.
//!
//! Defines the signaling WebSocket endpoint and the stats endpoint.

use actix_web::web;
use crate::config::server::{STATS_PATH, WS_PATH};
use crate::server::signaling::session::ws_signaling;
use crate::server::stats::stats;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(WS_PATH)
            .route(web::get().to(ws_signaling))
    )
    .service(
        web::resource(STATS_PATH)
            .route(web::get().to(stats))
    );
}
