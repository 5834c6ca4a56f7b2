//! Webhook event reconciliation.
//!
//! Single consumer of the webhook channel. Converts `invoice_authorized`
//! events into exactly-once order creation; every other event type is
//! accepted and ignored.
//!
//! Duplicate deliveries are defused twice over: an order-existence check
//! (covers the race against the synchronous browser-side completion) and
//! the platform's idempotency-key store (covers concurrent or repeated
//! completion attempts for the same event).

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use reepay_types::PROVIDER_ID;
use reepay_types::domain::webhook::{EVENT_RECEIVED, INVOICE_AUTHORIZED, WebhookEvent};
use reepay_types::domain::{CartId, ResourceType};
use reepay_types::error::CommerceError;
use reepay_types::ports::{CartCompletionStrategy, CartService, IdempotencyKeys, OrderService};

/// Consumes gateway events and drives idempotent order creation.
pub struct Reconciler {
    carts: Arc<dyn CartService>,
    orders: Arc<dyn OrderService>,
    idempotency: Arc<dyn IdempotencyKeys>,
    completion: Arc<dyn CartCompletionStrategy>,
    events: mpsc::Receiver<WebhookEvent>,
}

impl Reconciler {
    pub fn new(
        carts: Arc<dyn CartService>,
        orders: Arc<dyn OrderService>,
        idempotency: Arc<dyn IdempotencyKeys>,
        completion: Arc<dyn CartCompletionStrategy>,
        events: mpsc::Receiver<WebhookEvent>,
    ) -> Self {
        Self {
            carts,
            orders,
            idempotency,
            completion,
            events,
        }
    }

    /// Runs until the sending side of the channel is dropped.
    ///
    /// Events are handled strictly one at a time, so handling for a given
    /// event id is never re-entered concurrently.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        info!("reconciler started");
        while let Some(event) = self.events.recv().await {
            if let Err(error) = self.handle_event(&event).await {
                error!(%error, event_id = %event.event_id, "event handling failed");
            }
        }
        info!("webhook channel closed, reconciler stopping");
    }

    async fn handle_event(&self, event: &WebhookEvent) -> Result<(), CommerceError> {
        match event.event_type.as_str() {
            INVOICE_AUTHORIZED => self.handle_authorization(event).await,
            other => {
                debug!(event_type = other, "ignoring gateway event");
                Ok(())
            }
        }
    }

    #[instrument(skip(self, event), fields(event_id = %event.event_id))]
    async fn handle_authorization(&self, event: &WebhookEvent) -> Result<(), CommerceError> {
        let Some(invoice) = event.invoice.as_deref() else {
            warn!("authorization event carries no invoice field, skipping");
            return Ok(());
        };
        let cart_id = CartId::from(invoice);

        // The customer may have closed their browser before the synchronous
        // completion path created the order; conversely, if that path won,
        // this delivery is a redundant confirmation.
        if self.orders.retrieve_by_cart_id(&cart_id).await?.is_some() {
            debug!(cart_id = %cart_id, "order already exists, nothing to do");
            return Ok(());
        }

        let key = match self
            .idempotency
            .initialize_request(
                &event.event_id,
                ResourceType::Event,
                serde_json::json!({ "id": cart_id }),
                EVENT_RECEIVED,
            )
            .await
        {
            Ok(key) => key,
            Err(error) => {
                // Deliberate drop: a key-store outage must not take down the
                // dispatch loop, and the gateway redelivers unacknowledged
                // events.
                error!(%error, cart_id = %cart_id, "idempotency key initialization failed, dropping event");
                return Ok(());
            }
        };

        self.carts.set_payment_session(&cart_id, PROVIDER_ID).await?;
        let order = self.completion.complete(&cart_id, &key).await?;
        info!(cart_id = %cart_id, order_id = %order.id, "cart completed from webhook");
        Ok(())
    }
}
