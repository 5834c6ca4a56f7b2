//! HTTP request handlers for the hook routes.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tokio::sync::mpsc;

use reepay_types::domain::CartId;
use reepay_types::domain::webhook::WebhookEvent;
use reepay_types::dto::{AuthorizeRequest, SessionRequest};
use reepay_types::error::{AppError, CommerceError, ProviderError};
use reepay_types::ports::{CartService, GatewayClient, PaymentProvider};

use crate::ReepayProvider;
use crate::security;

/// Application state shared across handlers.
pub struct AppState<G: GatewayClient> {
    pub provider: ReepayProvider<G>,
    pub carts: Arc<dyn CartService>,
    /// Sending side of the webhook channel; the reconciler consumes it.
    pub events: mpsc::Sender<WebhookEvent>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        ApiError(err.into())
    }
}

impl From<CommerceError> for ApiError {
    fn from(err: CommerceError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::InvalidData(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// `POST /hooks/reepay/authorize`
///
/// Returns the session's stored provider data plus the freshly computed
/// status. `payment_data.paymentMethod` is accepted and passed through.
#[tracing::instrument(skip(state, req), fields(cart_id = %req.cart_id))]
pub async fn authorize<G: GatewayClient>(
    State(state): State<Arc<AppState<G>>>,
    Json(req): Json<AuthorizeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let cart = state.carts.retrieve(&CartId::from(req.cart_id)).await?;
    let session = cart.payment_session.as_ref().ok_or_else(|| {
        AppError::InvalidData("cart has no active payment session".into())
    })?;

    let context = req
        .payment_data
        .payment_method
        .unwrap_or(serde_json::Value::Null);
    let authorization = state.provider.authorize_payment(session, context).await?;

    Ok(Json(serde_json::json!({ "data": authorization })))
}

/// `POST /hooks/reepay/session`
///
/// Creates a gateway checkout session for the cart and returns the raw
/// gateway response.
#[tracing::instrument(skip(state, req), fields(cart_id = %req.cart_id))]
pub async fn create_session<G: GatewayClient>(
    State(state): State<Arc<AppState<G>>>,
    Json(req): Json<SessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let cart = state.carts.retrieve(&CartId::from(req.cart_id)).await?;
    let session = state.provider.create_session(&cart).await?;

    Ok(Json(serde_json::json!({ "data": session })))
}

/// `POST /hooks/reepay/event`
///
/// Verifies the event signature and forwards the event to the reconciler.
/// The 200 acknowledges delivery only; processing happens asynchronously.
#[tracing::instrument(skip(state, event), fields(event_type = %event.event_type))]
pub async fn receive_event<G: GatewayClient>(
    State(state): State<Arc<AppState<G>>>,
    Json(event): Json<WebhookEvent>,
) -> Response {
    let verified = state
        .provider
        .options()
        .webhook_secret
        .as_deref()
        .is_some_and(|secret| {
            security::verify_event_signature(secret, &event.timestamp, &event.id, &event.signature)
        });

    if !verified {
        return (StatusCode::UNAUTHORIZED, "Unauthorized webhook event").into_response();
    }

    if let Err(error) = state.events.send(event).await {
        tracing::error!(%error, "webhook channel closed, event dropped");
    }

    StatusCode::OK.into_response()
}
