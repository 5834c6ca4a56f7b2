//! # Reepay Hex
//!
//! Application layer for the Reepay provider plugin.
//!
//! ## Architecture
//!
//! - `service/` - The payment session adapter (`ReepayProvider`)
//! - `inbound/` - HTTP adapter (Axum hook routes)
//! - `reconciler/` - Webhook event consumer driving order completion
//! - `security/` - Webhook signature verification
//!
//! The adapter is generic over `G: GatewayClient`, so tests run against an
//! in-process mock while production wires the reqwest client. Commerce
//! collaborators (carts, orders, idempotency keys, completion) are injected
//! as trait objects.

pub mod inbound;
pub mod reconciler;
pub mod security;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use reconciler::Reconciler;
pub use service::ReepayProvider;
