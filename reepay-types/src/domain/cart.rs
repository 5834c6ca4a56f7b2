//! Cart, region and order shapes exchanged with the host platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::session::PaymentSession;

/// Identifier of a cart, assigned by the host platform.
///
/// Doubles as the client-assigned charge `handle` on the gateway side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CartId(String);

impl CartId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CartId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CartId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cart as far as this plugin needs to see it.
///
/// The platform owns the full cart model; only the fields the adapter and
/// reconciler read cross the port boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    /// Customer email; a gateway session is only created once this is set.
    pub email: Option<String>,
    pub region_id: String,
    /// The currently active payment session, if any.
    pub payment_session: Option<PaymentSession>,
}

/// Region data resolved through the `RegionService` port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    /// ISO currency code in any case; uppercased before hitting the gateway.
    pub currency_code: String,
}

/// Unique identifier for an Order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Creates a new random OrderId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An order created from a completed cart.
///
/// Invariant: at most one order exists per cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub cart_id: CartId,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(cart_id: CartId) -> Self {
        Self {
            id: OrderId::new(),
            cart_id,
            created_at: Utc::now(),
        }
    }
}
