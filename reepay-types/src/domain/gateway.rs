//! Request and response shapes for the Reepay HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body for creating a checkout session on the checkout API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    /// Always `false` here: the charge is authorized only and settled later.
    pub settle: bool,
    pub order: CheckoutOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutOrder {
    /// Client-assigned charge handle; the cart id.
    pub handle: String,
    /// Amount in the currency's smallest unit.
    pub amount: i64,
    /// Uppercase ISO currency code.
    pub currency: String,
    pub customer: CheckoutCustomer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutCustomer {
    pub email: String,
}

/// Response from the checkout session endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted checkout page for the customer.
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lifecycle state of a gateway invoice or charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceState {
    Created,
    Authorized,
    Settled,
    Failed,
    /// Any state this plugin does not act on.
    #[serde(other)]
    Unknown,
}

/// Invoice as returned by `GET /invoice/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub state: InvoiceState,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full charge body returned by the management API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charge {
    pub state: InvoiceState,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for `POST /refund`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Invoice handle to refund against.
    pub invoice: String,
    /// Idempotency key for the refund, generated fresh per attempt.
    pub key: String,
    /// Amount to refund in the currency's smallest unit.
    pub amount: i64,
}

/// Terminal state of a refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefundState {
    Refunded,
    Failed,
    Processing,
    #[serde(other)]
    Unknown,
}

/// Response from `POST /refund`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Refund {
    pub state: RefundState,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_states_deserialize() {
        let invoice: Invoice = serde_json::from_value(json!({"state": "cancelled"})).unwrap();
        assert_eq!(invoice.state, InvoiceState::Unknown);

        let invoice: Invoice = serde_json::from_value(json!({"state": "authorized"})).unwrap();
        assert_eq!(invoice.state, InvoiceState::Authorized);
    }

    #[test]
    fn test_checkout_request_skips_absent_options() {
        let request = CheckoutSessionRequest {
            settle: false,
            order: CheckoutOrder {
                handle: "cart_123".into(),
                amount: 1000,
                currency: "DKK".into(),
                customer: CheckoutCustomer {
                    email: "buyer@example.com".into(),
                },
            },
            payment_methods: None,
            accept_url: Some("https://shop.example/checkout/payment".into()),
            cancel_url: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("payment_methods").is_none());
        assert!(value.get("cancel_url").is_none());
        assert_eq!(value["order"]["handle"], "cart_123");
        assert_eq!(value["settle"], json!(false));
    }

    #[test]
    fn test_charge_keeps_extra_fields() {
        let charge: Charge = serde_json::from_value(json!({
            "state": "settled",
            "handle": "cart_123",
            "amount": 1000
        }))
        .unwrap();
        assert_eq!(charge.state, InvoiceState::Settled);
        assert_eq!(charge.extra.get("handle"), Some(&json!("cart_123")));
    }
}
