//! HTTP server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

use reepay_types::domain::webhook::WebhookEvent;
use reepay_types::ports::{CartService, GatewayClient};

use super::handlers::{self, AppState};
use crate::ReepayProvider;

/// HTTP server exposing the provider hook routes.
pub struct HttpServer<G: GatewayClient> {
    state: Arc<AppState<G>>,
}

impl<G: GatewayClient> HttpServer<G> {
    /// Creates a new hook server with the given provider and collaborators.
    pub fn new(
        provider: ReepayProvider<G>,
        carts: Arc<dyn CartService>,
        events: mpsc::Sender<WebhookEvent>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                provider,
                carts,
                events,
            }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/hooks/reepay/authorize", post(handlers::authorize::<G>))
            .route("/hooks/reepay/session", post(handlers::create_session::<G>))
            .route("/hooks/reepay/event", post(handlers::receive_event::<G>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Hook server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
