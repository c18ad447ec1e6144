//! Main entry point for the signaling server.
//!
//! Initializes logging and the actor system, loads the bind address, and
//! launches the HTTP server with the signaling WebSocket endpoint.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::{error, info};
use pairing_signal::config::server::ServerConfig;
use pairing_signal::server::{router, state::AppState};
use pairing_signal::server::signaling::server::SignalingServer;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from RUST_LOG (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env().map_err(|e| {
        error!("[Server] {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    // Start the SignalingServer actor (owns clients, waiting queue and rooms).
    let signaling_addr = SignalingServer::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(AppState::new(signaling_addr));

    info!("[Server] Server started at {}:{}", config.host, config.port);

    // Any origin may open a signaling session.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(router::config)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
