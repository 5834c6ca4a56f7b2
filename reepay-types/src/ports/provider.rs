//! Payment provider capability port.

use serde_json::Value;

use crate::domain::gateway::Charge;
use crate::domain::{Cart, PaymentData, PaymentSession, PaymentSessionStatus};
use crate::dto::PaymentAuthorization;
use crate::error::ProviderError;

/// The capability set a payment provider exposes to the platform.
///
/// One concrete variant exists per gateway integration; the platform talks
/// to this trait only. Errors are logged where they occur and propagated
/// unchanged - a provider never swallows failures.
#[async_trait::async_trait]
pub trait PaymentProvider: Send + Sync + 'static {
    /// Stable identifier the platform registers this provider under.
    fn identifier(&self) -> &'static str;

    /// Creates the provider-side payment state for a cart.
    ///
    /// Returns empty data when the cart has no identified customer yet.
    async fn create_payment(&self, cart: &Cart) -> Result<PaymentData, ProviderError>;

    /// Resolves the platform status for stored payment data.
    async fn get_status(&self, data: &PaymentData) -> Result<PaymentSessionStatus, ProviderError>;

    /// Authorization for this gateway is a status read: the gateway already
    /// decided the outcome in its own checkout flow.
    async fn authorize_payment(
        &self,
        session: &PaymentSession,
        context: Value,
    ) -> Result<PaymentAuthorization, ProviderError>;

    /// Settles the charge and returns the full charge data.
    async fn capture_payment(&self, data: &PaymentData) -> Result<Charge, ProviderError>;

    /// Refunds `amount` against the charge and returns the full charge data.
    async fn refund_payment(&self, data: &PaymentData, amount: i64)
    -> Result<Charge, ProviderError>;

    /// Cancels the charge, returning the raw gateway response.
    async fn cancel_payment(&self, data: &PaymentData) -> Result<Charge, ProviderError>;

    /// Deletes the charge, returning the raw gateway response.
    async fn delete_payment(&self, data: &PaymentData) -> Result<Value, ProviderError>;

    /// Saved payment methods are not supported by this provider.
    async fn retrieve_saved_methods(&self, customer_id: &str)
    -> Result<Vec<Value>, ProviderError>;

    /// Full charge data for the session.
    async fn get_payment_data(&self, session: &PaymentSession) -> Result<Charge, ProviderError>;

    /// Pure shallow merge of an update over stored data; no remote call.
    fn update_payment_data(&self, data: &PaymentData, update: &PaymentData) -> PaymentData;

    /// Updating a payment session is equivalent to recreating it.
    async fn update_payment(
        &self,
        session_data: &PaymentData,
        cart: &Cart,
    ) -> Result<PaymentData, ProviderError>;
}
