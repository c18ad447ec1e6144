/// Main configuration module.
/// 
/// Re-exports submodules for HTTP server and signaling configuration.
pub mod server;
pub mod signaling;
