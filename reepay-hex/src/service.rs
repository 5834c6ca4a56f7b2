//! Reepay payment session adapter.
//!
//! Implements the platform's `PaymentProvider` capability set on top of the
//! `GatewayClient` port, translating between platform payment sessions and
//! gateway request/response shapes. Contains NO transport logic.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use reepay_types::domain::gateway::{
    Charge, CheckoutCustomer, CheckoutOrder, CheckoutSession, CheckoutSessionRequest, InvoiceState,
    RefundRequest, RefundState,
};
use reepay_types::dto::PaymentAuthorization;
use reepay_types::error::ProviderError;
use reepay_types::ports::{GatewayClient, PaymentProvider, RegionService, TotalsService};
use reepay_types::{
    Cart, PROVIDER_ID, PaymentData, PaymentSession, PaymentSessionStatus, ReepayOptions,
};

/// Payment session adapter for the Reepay gateway.
///
/// Generic over `G: GatewayClient` - the transport is injected at compile
/// time. Totals and region resolution come from the host platform.
pub struct ReepayProvider<G: GatewayClient> {
    gateway: G,
    totals: Arc<dyn TotalsService>,
    regions: Arc<dyn RegionService>,
    options: ReepayOptions,
}

impl<G: GatewayClient> ReepayProvider<G> {
    pub fn new(
        gateway: G,
        totals: Arc<dyn TotalsService>,
        regions: Arc<dyn RegionService>,
        options: ReepayOptions,
    ) -> Self {
        Self {
            gateway,
            totals,
            regions,
            options,
        }
    }

    pub fn options(&self) -> &ReepayOptions {
        &self.options
    }

    /// Builds and posts the gateway checkout request for a cart.
    ///
    /// The order handle is the cart id, so gateway-side charges stay
    /// addressable by cart.
    pub async fn create_session(&self, cart: &Cart) -> Result<CheckoutSession, ProviderError> {
        let total = self.totals.get_total(cart).await?;
        let region = self.regions.retrieve(&cart.region_id).await?;

        let request = CheckoutSessionRequest {
            settle: false,
            order: CheckoutOrder {
                handle: cart.id.to_string(),
                amount: total,
                currency: region.currency_code.to_uppercase(),
                customer: CheckoutCustomer {
                    email: cart.email.clone().unwrap_or_default(),
                },
            },
            payment_methods: self.options.payment_methods.clone(),
            accept_url: self.options.accept_url.clone(),
            cancel_url: self.options.cancel_url.clone(),
        };

        let session = self
            .gateway
            .create_checkout_session(&request)
            .await
            .inspect_err(|error| {
                tracing::error!(%error, cart_id = %cart.id, "checkout session creation failed");
            })?;
        Ok(session)
    }

    /// Full charge retrieval by `invoice`, falling back to `handle`.
    async fn retrieve_charge(&self, data: &PaymentData) -> Result<Charge, ProviderError> {
        let id = data.lookup_id().ok_or(ProviderError::MissingData("invoice"))?;
        let charge = self
            .gateway
            .get_charge(id)
            .await
            .inspect_err(|error| tracing::error!(%error, charge = id, "charge retrieval failed"))?;
        Ok(charge)
    }

    fn charge_handle<'a>(&self, data: &'a PaymentData) -> Result<&'a str, ProviderError> {
        data.charge_handle()
            .ok_or(ProviderError::MissingData("handle"))
    }
}

#[async_trait::async_trait]
impl<G: GatewayClient> PaymentProvider for ReepayProvider<G> {
    fn identifier(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn create_payment(&self, cart: &Cart) -> Result<PaymentData, ProviderError> {
        // No session without an identified customer.
        match cart.email.as_deref() {
            Some(email) if !email.is_empty() => {
                let session = self.create_session(cart).await?;
                Ok(PaymentData::for_session(&session.id, &session.url, &cart.id))
            }
            _ => Ok(PaymentData::new()),
        }
    }

    async fn get_status(&self, data: &PaymentData) -> Result<PaymentSessionStatus, ProviderError> {
        let id = data.lookup_id().ok_or(ProviderError::MissingData("invoice"))?;
        let invoice = self
            .gateway
            .get_invoice(id)
            .await
            .inspect_err(|error| tracing::error!(%error, invoice = id, "status lookup failed"))?;
        Ok(invoice.state.into())
    }

    async fn authorize_payment(
        &self,
        session: &PaymentSession,
        _context: Value,
    ) -> Result<PaymentAuthorization, ProviderError> {
        let status = self.get_status(&session.data).await?;
        Ok(PaymentAuthorization {
            data: session.data.clone(),
            status,
        })
    }

    async fn capture_payment(&self, data: &PaymentData) -> Result<Charge, ProviderError> {
        let handle = self.charge_handle(data)?;
        let settled = self
            .gateway
            .settle_charge(handle)
            .await
            .inspect_err(|error| tracing::error!(%error, handle, "settle failed"))?;

        if settled.state != InvoiceState::Settled {
            return Err(ProviderError::InvalidArgument(
                "Could not process capture".into(),
            ));
        }

        self.retrieve_charge(data).await
    }

    async fn refund_payment(
        &self,
        data: &PaymentData,
        amount: i64,
    ) -> Result<Charge, ProviderError> {
        let handle = self.charge_handle(data)?;
        let request = RefundRequest {
            invoice: handle.to_string(),
            key: Uuid::new_v4().to_string(),
            amount,
        };

        let refunded = self
            .gateway
            .refund(&request)
            .await
            .inspect_err(|error| tracing::error!(%error, handle, "refund failed"))?;

        if refunded.state != RefundState::Refunded {
            return Err(ProviderError::InvalidArgument(
                "Could not process refund".into(),
            ));
        }

        self.retrieve_charge(data).await
    }

    async fn cancel_payment(&self, data: &PaymentData) -> Result<Charge, ProviderError> {
        let handle = self.charge_handle(data)?;
        let charge = self
            .gateway
            .cancel_charge(handle)
            .await
            .inspect_err(|error| tracing::error!(%error, handle, "cancel failed"))?;
        Ok(charge)
    }

    async fn delete_payment(&self, data: &PaymentData) -> Result<Value, ProviderError> {
        let handle = self.charge_handle(data)?;
        let raw = self
            .gateway
            .delete_charge(handle)
            .await
            .inspect_err(|error| tracing::error!(%error, handle, "delete failed"))?;
        Ok(raw)
    }

    async fn retrieve_saved_methods(
        &self,
        _customer_id: &str,
    ) -> Result<Vec<Value>, ProviderError> {
        Ok(Vec::new())
    }

    async fn get_payment_data(&self, session: &PaymentSession) -> Result<Charge, ProviderError> {
        self.retrieve_charge(&session.data).await
    }

    fn update_payment_data(&self, data: &PaymentData, update: &PaymentData) -> PaymentData {
        data.merge(update)
    }

    async fn update_payment(
        &self,
        _session_data: &PaymentData,
        cart: &Cart,
    ) -> Result<PaymentData, ProviderError> {
        self.create_payment(cart).await
    }
}
