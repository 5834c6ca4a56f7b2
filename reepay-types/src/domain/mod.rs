//! Domain models for the provider plugin.

pub mod cart;
pub mod gateway;
pub mod idempotency;
pub mod session;
pub mod webhook;

pub use cart::{Cart, CartId, Order, OrderId, Region};
pub use gateway::{
    Charge, CheckoutCustomer, CheckoutOrder, CheckoutSession, CheckoutSessionRequest, Invoice,
    InvoiceState, Refund, RefundRequest, RefundState,
};
pub use idempotency::{IdempotencyKey, ResourceType};
pub use session::{PaymentData, PaymentSession, PaymentSessionStatus};
pub use webhook::WebhookEvent;
