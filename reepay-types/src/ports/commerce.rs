//! Ports onto the host commerce platform.
//!
//! Cart, order and idempotency-key persistence live on the platform side;
//! this plugin only consumes them as capabilities.

use serde_json::Value;

use crate::domain::{Cart, CartId, IdempotencyKey, Order, Region, ResourceType};
use crate::error::CommerceError;

/// Cart operations the plugin needs from the platform.
#[async_trait::async_trait]
pub trait CartService: Send + Sync + 'static {
    async fn retrieve(&self, cart_id: &CartId) -> Result<Cart, CommerceError>;

    /// Marks the given provider's session as the cart's active one.
    /// Idempotent: repeating the call for the same provider is a no-op.
    async fn set_payment_session(
        &self,
        cart_id: &CartId,
        provider_id: &str,
    ) -> Result<(), CommerceError>;
}

/// Order lookups.
#[async_trait::async_trait]
pub trait OrderService: Send + Sync + 'static {
    /// Returns the order created from the cart, if one exists.
    async fn retrieve_by_cart_id(&self, cart_id: &CartId) -> Result<Option<Order>, CommerceError>;
}

/// Converts a cart into a persisted order.
///
/// Implementations own the order-creation transaction and must honor the
/// idempotency key: a second completion under the same key must not create
/// a second order.
#[async_trait::async_trait]
pub trait CartCompletionStrategy: Send + Sync + 'static {
    async fn complete(&self, cart_id: &CartId, key: &IdempotencyKey)
    -> Result<Order, CommerceError>;
}

/// The platform's idempotency-key store.
#[async_trait::async_trait]
pub trait IdempotencyKeys: Send + Sync + 'static {
    /// Creates the key for the given scope, or returns the previously
    /// created one when the same request is seen again.
    async fn initialize_request(
        &self,
        request_id: &str,
        resource_type: ResourceType,
        resource: Value,
        action: &str,
    ) -> Result<IdempotencyKey, CommerceError>;
}

/// Order total computation.
#[async_trait::async_trait]
pub trait TotalsService: Send + Sync + 'static {
    /// Total for the cart in the currency's smallest unit.
    async fn get_total(&self, cart: &Cart) -> Result<i64, CommerceError>;
}

/// Region lookups, used to resolve the order currency.
#[async_trait::async_trait]
pub trait RegionService: Send + Sync + 'static {
    async fn retrieve(&self, region_id: &str) -> Result<Region, CommerceError>;
}
