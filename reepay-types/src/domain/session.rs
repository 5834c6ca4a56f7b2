//! Payment session state and the provider data blob this plugin maintains.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use utoipa::ToSchema;

use super::cart::CartId;
use super::gateway::InvoiceState;

/// Platform-side status of a payment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentSessionStatus {
    #[default]
    Initial,
    Pending,
    Authorized,
    Captured,
    Canceled,
}

impl From<InvoiceState> for PaymentSessionStatus {
    /// Canonical gateway-state to platform-status translation.
    fn from(state: InvoiceState) -> Self {
        match state {
            InvoiceState::Created => Self::Pending,
            InvoiceState::Authorized => Self::Authorized,
            InvoiceState::Settled => Self::Captured,
            InvoiceState::Failed => Self::Canceled,
            InvoiceState::Unknown => Self::Initial,
        }
    }
}

impl std::fmt::Display for PaymentSessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Initial => "initial",
            Self::Pending => "pending",
            Self::Authorized => "authorized",
            Self::Captured => "captured",
            Self::Canceled => "canceled",
        };
        write!(f, "{s}")
    }
}

/// Provider-specific data stored on a payment session.
///
/// The platform treats this as an opaque JSON object. The plugin reads and
/// writes a handful of well-known keys (`handle`, `invoice`, `id`,
/// `action.url`) and passes everything else through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentData(Map<String, Value>);

impl PaymentData {
    /// Empty data; what `create_payment` yields for anonymous carts.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Session data as stored after checkout session creation.
    pub fn for_session(session_id: &str, url: &str, cart_id: &CartId) -> Self {
        let mut map = Map::new();
        map.insert("id".into(), Value::String(session_id.to_string()));
        map.insert("action".into(), json!({ "url": url }));
        map.insert("invoice".into(), Value::String(cart_id.to_string()));
        Self(map)
    }

    /// Wraps a JSON value; anything but an object becomes empty data.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Gateway-assigned invoice identifier, if present.
    pub fn invoice(&self) -> Option<&str> {
        self.str_field("invoice")
    }

    /// Client-assigned charge handle, if present.
    pub fn handle(&self) -> Option<&str> {
        self.str_field("handle")
    }

    /// Identifier used for invoice status lookups: `invoice`, then `handle`.
    pub fn lookup_id(&self) -> Option<&str> {
        self.invoice().or_else(|| self.handle())
    }

    /// Identifier used for settle/refund/cancel/delete calls.
    ///
    /// The stored `invoice` is the cart id, which is also the client-assigned
    /// charge handle, so it serves as the fallback.
    pub fn charge_handle(&self) -> Option<&str> {
        self.handle().or_else(|| self.invoice())
    }

    /// Checkout URL the customer is redirected to.
    pub fn action_url(&self) -> Option<&str> {
        self.0
            .get("action")
            .and_then(|action| action.get("url"))
            .and_then(Value::as_str)
    }

    /// Shallow merge: keys in `update` replace keys in `self`.
    pub fn merge(&self, update: &PaymentData) -> PaymentData {
        let mut merged = self.0.clone();
        for (key, value) in &update.0 {
            merged.insert(key.clone(), value.clone());
        }
        PaymentData(merged)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Platform-side representation of an in-progress payment.
///
/// Owned by the platform; the adapter only reads and writes `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    pub id: String,
    pub provider_id: String,
    pub data: PaymentData,
    pub status: PaymentSessionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_to_status_mapping() {
        assert_eq!(
            PaymentSessionStatus::from(InvoiceState::Created),
            PaymentSessionStatus::Pending
        );
        assert_eq!(
            PaymentSessionStatus::from(InvoiceState::Authorized),
            PaymentSessionStatus::Authorized
        );
        assert_eq!(
            PaymentSessionStatus::from(InvoiceState::Settled),
            PaymentSessionStatus::Captured
        );
        assert_eq!(
            PaymentSessionStatus::from(InvoiceState::Failed),
            PaymentSessionStatus::Canceled
        );
        assert_eq!(
            PaymentSessionStatus::from(InvoiceState::Unknown),
            PaymentSessionStatus::Initial
        );
    }

    #[test]
    fn test_session_data_shape() {
        let data = PaymentData::for_session("cs_1", "https://checkout.example/cs_1", &"cart_123".into());
        assert_eq!(data.invoice(), Some("cart_123"));
        assert_eq!(data.action_url(), Some("https://checkout.example/cs_1"));
        assert_eq!(data.str_field("id"), Some("cs_1"));
        assert_eq!(data.charge_handle(), Some("cart_123"));
    }

    #[test]
    fn test_merge_is_shallow_and_update_wins() {
        let data = PaymentData::from_value(json!({"handle": "h_1", "keep": true}));
        let update = PaymentData::from_value(json!({"handle": "h_2", "extra": 1}));

        let merged = data.merge(&update);
        assert_eq!(merged.handle(), Some("h_2"));
        assert_eq!(merged.as_map().get("keep"), Some(&Value::Bool(true)));
        assert_eq!(merged.as_map().get("extra"), Some(&json!(1)));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let data = PaymentData::from_value(json!({"a": 1, "b": 2}));
        let update = PaymentData::from_value(json!({"b": 3}));

        let once = data.merge(&update);
        let twice = once.merge(&update);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_lookup_prefers_invoice_over_handle() {
        let data = PaymentData::from_value(json!({"invoice": "inv_1", "handle": "h_1"}));
        assert_eq!(data.lookup_id(), Some("inv_1"));
        assert_eq!(data.charge_handle(), Some("h_1"));

        let handle_only = PaymentData::from_value(json!({"handle": "h_1"}));
        assert_eq!(handle_only.lookup_id(), Some("h_1"));
    }
}
