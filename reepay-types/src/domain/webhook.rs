//! Inbound webhook event shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event type that triggers order reconciliation.
pub const INVOICE_AUTHORIZED: &str = "invoice_authorized";

/// Idempotency action (and channel topic) for received gateway events.
pub const EVENT_RECEIVED: &str = "reepay.event_received";

/// A signed notification delivered by the gateway.
///
/// Transient: consumed once by the reconciler and discarded. `timestamp`
/// stays the raw string it was delivered with because the signature covers
/// `timestamp + id` byte for byte.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Webhook delivery id; part of the signed payload.
    pub id: String,
    pub timestamp: String,
    /// Hex-encoded HMAC-SHA256 over `timestamp + id`.
    pub signature: String,
    pub event_type: String,
    /// Identifier of the underlying gateway event; the dedup scope.
    pub event_id: String,
    /// Invoice handle the event refers to; the cart id for charge events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WebhookEvent {
    /// The string the webhook signature is computed over.
    pub fn signed_payload(&self) -> String {
        format!("{}{}", self.timestamp, self.id)
    }
}
