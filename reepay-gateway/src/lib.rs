//! # Reepay Gateway Client
//!
//! Typed reqwest client for the two Reepay API surfaces: the checkout API
//! (hosted session creation) and the management API (invoices, charges,
//! refunds). Implements the `GatewayClient` port.
//!
//! Every call is a single remote request. Failures are logged with the
//! response body at the call site and returned unchanged; retry policy
//! belongs to the caller (for webhooks, to the gateway's redelivery).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use reepay_types::ReepayOptions;
use reepay_types::domain::gateway::{
    Charge, CheckoutSession, CheckoutSessionRequest, Invoice, Refund, RefundRequest,
};
use reepay_types::error::GatewayError;
use reepay_types::ports::GatewayClient;

const CHECKOUT_BASE_URL: &str = "https://checkout-api.reepay.com/v1/session";
const API_BASE_URL: &str = "https://api.reepay.com/v1";

/// HTTP client for the Reepay gateway.
///
/// Stateless beyond configuration; cheap to clone.
#[derive(Clone)]
pub struct ReepayClient {
    checkout_base: String,
    api_base: String,
    auth_header: String,
    http: Client,
}

impl ReepayClient {
    /// Creates a client against the production Reepay endpoints.
    pub fn new(options: &ReepayOptions) -> Self {
        Self {
            checkout_base: CHECKOUT_BASE_URL.to_string(),
            api_base: API_BASE_URL.to_string(),
            auth_header: basic_auth_header(&options.api_key),
            http: Client::new(),
        }
    }

    /// Overrides both base URLs; used by tests against a local stub.
    pub fn with_base_urls(
        mut self,
        checkout_base: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        self.checkout_base = checkout_base.into().trim_end_matches('/').to_string();
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Sends the request and checks the status; returns the raw body.
    async fn send_raw(&self, request: RequestBuilder, op: &str) -> Result<String, GatewayError> {
        let response = self
            .authed(request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::error!(op, status = status.as_u16(), %body, "gateway call failed");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        op: &str,
    ) -> Result<T, GatewayError> {
        let body = self.send_raw(request, op).await?;
        serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl GatewayClient for ReepayClient {
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        let url = format!("{}/charge", self.checkout_base);
        self.send(self.http.post(url).json(request), "create_checkout_session")
            .await
    }

    async fn get_invoice(&self, id: &str) -> Result<Invoice, GatewayError> {
        let url = format!("{}/invoice/{}", self.api_base, id);
        self.send(self.http.get(url), "get_invoice").await
    }

    async fn get_charge(&self, id: &str) -> Result<Charge, GatewayError> {
        let url = format!("{}/charge/{}", self.api_base, id);
        self.send(self.http.get(url), "get_charge").await
    }

    async fn settle_charge(&self, handle: &str) -> Result<Charge, GatewayError> {
        let url = format!("{}/charge/{}/settle", self.api_base, handle);
        self.send(self.http.post(url), "settle_charge").await
    }

    async fn refund(&self, request: &RefundRequest) -> Result<Refund, GatewayError> {
        let url = format!("{}/refund", self.api_base);
        self.send(self.http.post(url).json(request), "refund").await
    }

    async fn cancel_charge(&self, handle: &str) -> Result<Charge, GatewayError> {
        let url = format!("{}/charge/{}/cancel", self.api_base, handle);
        self.send(self.http.post(url), "cancel_charge").await
    }

    async fn delete_charge(&self, handle: &str) -> Result<serde_json::Value, GatewayError> {
        let url = format!("{}/charge/{}", self.api_base, handle);
        let body = self.send_raw(self.http.delete(url), "delete_charge").await?;
        // The gateway replies with an empty body on successful deletion.
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// `Basic` auth token: the base64-encoded API key, empty password.
fn basic_auth_header(api_key: &str) -> String {
    format!("Basic {}", BASE64.encode(api_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_header_encodes_api_key() {
        // base64("priv_key") == "cHJpdl9rZXk="
        assert_eq!(basic_auth_header("priv_key"), "Basic cHJpdl9rZXk=");
    }

    #[test]
    fn test_base_url_override_trims_trailing_slash() {
        let options = ReepayOptions::new("priv_key");
        let client = ReepayClient::new(&options)
            .with_base_urls("http://localhost:1234/checkout/", "http://localhost:1234/api/");
        assert_eq!(client.checkout_base, "http://localhost:1234/checkout");
        assert_eq!(client.api_base, "http://localhost:1234/api");
    }

    #[test]
    fn test_default_base_urls() {
        let options = ReepayOptions::new("priv_key");
        let client = ReepayClient::new(&options);
        assert_eq!(client.checkout_base, CHECKOUT_BASE_URL);
        assert_eq!(client.api_base, API_BASE_URL);
    }
}
