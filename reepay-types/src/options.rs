//! Provider configuration.

use serde::{Deserialize, Serialize};

/// Options recognized by the Reepay provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReepayOptions {
    /// Private API key; sent as Basic auth on every gateway call.
    pub api_key: String,
    /// Secret for verifying inbound webhook signatures. Without it every
    /// webhook delivery is rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_secret: Option<String>,
    /// Where the gateway redirects the customer after successful payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_url: Option<String>,
    /// Where the gateway redirects the customer on cancel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    /// Restricts which payment methods the hosted checkout offers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<Vec<String>>,
}

impl ReepayOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            webhook_secret: None,
            accept_url: None,
            cancel_url: None,
            payment_methods: None,
        }
    }
}
