//! Outbound port to the Reepay HTTP API.

use serde_json::Value;

use crate::domain::gateway::{
    Charge, CheckoutSession, CheckoutSessionRequest, Invoice, Refund, RefundRequest,
};
use crate::error::GatewayError;

/// Remote gateway operations the provider depends on.
///
/// Every call maps to exactly one HTTP request: no caching, no retries.
/// Implementations log failed responses at the call site and return the
/// error unchanged.
#[async_trait::async_trait]
pub trait GatewayClient: Send + Sync + 'static {
    /// Creates a hosted checkout session (`POST /charge` on the checkout API).
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, GatewayError>;

    /// Fetches invoice state (`GET /invoice/{id}`).
    async fn get_invoice(&self, id: &str) -> Result<Invoice, GatewayError>;

    /// Fetches the full charge body (`GET /charge/{id}`).
    async fn get_charge(&self, id: &str) -> Result<Charge, GatewayError>;

    /// Settles an authorized charge (`POST /charge/{handle}/settle`).
    async fn settle_charge(&self, handle: &str) -> Result<Charge, GatewayError>;

    /// Refunds a settled charge (`POST /refund`).
    async fn refund(&self, request: &RefundRequest) -> Result<Refund, GatewayError>;

    /// Cancels an authorized charge (`POST /charge/{handle}/cancel`).
    async fn cancel_charge(&self, handle: &str) -> Result<Charge, GatewayError>;

    /// Deletes a created charge (`DELETE /charge/{handle}`), returning the
    /// raw response body.
    async fn delete_charge(&self, handle: &str) -> Result<Value, GatewayError>;
}
