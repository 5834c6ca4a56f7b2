//! # Reepay Provider Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the reqwest gateway client
//! - Wire the provider and reconciler against the in-memory host
//! - Start the hook HTTP server
//!
//! The in-memory host stands in for the commerce platform; a production
//! deployment replaces it with the platform's own port implementations.

mod config;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reepay_gateway::ReepayClient;
use reepay_hex::{Reconciler, ReepayProvider, inbound::HttpServer};
use reepay_host::MemoryHost;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,reepay_app=debug,reepay_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting reepay hook server on port {}", config.port);

    // Commerce host (in-memory stand-in for the platform)
    let host = Arc::new(MemoryHost::new());

    // Gateway client and payment session adapter
    let gateway = ReepayClient::new(&config.reepay);
    let provider = ReepayProvider::new(gateway, host.clone(), host.clone(), config.reepay.clone());

    // Webhook channel: ingress publishes, the reconciler consumes
    let (events_tx, events_rx) = mpsc::channel(64);
    let reconciler = Reconciler::new(
        host.clone(),
        host.clone(),
        host.clone(),
        host.clone(),
        events_rx,
    );
    let reconciler_task = tokio::spawn(reconciler.run());

    // Create and run the hook server
    let server = HttpServer::new(provider, host, events_tx);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Server shutdown dropped the channel sender; let the reconciler drain
    let _ = reconciler_task.await;
    Ok(())
}
