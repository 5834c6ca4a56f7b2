//! Port traits (interfaces for adapters).
//!
//! These are the contracts the application layer depends on. The gateway
//! port is implemented by this workspace's reqwest adapter; the commerce
//! ports are implemented by the hosting platform (or the in-memory host
//! for development and tests).

mod commerce;
mod gateway;
mod provider;

pub use commerce::{
    CartCompletionStrategy, CartService, IdempotencyKeys, OrderService, RegionService,
    TotalsService,
};
pub use gateway::GatewayClient;
pub use provider::PaymentProvider;
