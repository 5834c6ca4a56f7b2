//! HTTP Inbound Adapter
//!
//! Axum routes for the provider hooks: session creation, authorization and
//! webhook ingress.

mod handlers;
mod server;

pub use handlers::AppState;
pub use server::HttpServer;
