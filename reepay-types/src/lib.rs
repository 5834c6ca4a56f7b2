//! # Reepay Types
//!
//! Domain types and port traits for the Reepay payment provider plugin.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Cart, PaymentSession, gateway resources)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for the hook route boundaries
//! - `error/` - Gateway, commerce, provider and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod options;
pub mod ports;

/// Identifier the platform registers this provider under.
pub const PROVIDER_ID: &str = "reepay";

// Re-export commonly used types
pub use domain::{
    Cart, CartId, Charge, CheckoutSession, IdempotencyKey, Invoice, InvoiceState, Order, OrderId,
    PaymentData, PaymentSession, PaymentSessionStatus, Region, ResourceType, WebhookEvent,
};
pub use dto::*;
pub use error::{AppError, CommerceError, GatewayError, ProviderError};
pub use options::ReepayOptions;
pub use ports::{GatewayClient, PaymentProvider};
