//! # Reepay Host
//!
//! In-memory implementation of the commerce-platform ports: carts, orders,
//! regions, totals, idempotency keys and the cart-completion strategy.
//!
//! Stand-in host used by the dev binary and by tests. A real deployment
//! plugs the plugin into the platform's own services instead; nothing here
//! survives a restart.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;
use uuid::Uuid;

use reepay_types::domain::{
    Cart, CartId, IdempotencyKey, Order, OrderId, PaymentData, PaymentSession,
    PaymentSessionStatus, Region, ResourceType,
};
use reepay_types::error::CommerceError;
use reepay_types::ports::{
    CartCompletionStrategy, CartService, IdempotencyKeys, OrderService, RegionService,
    TotalsService,
};

/// In-memory commerce host backing all platform ports.
#[derive(Default)]
pub struct MemoryHost {
    carts: Mutex<HashMap<CartId, Cart>>,
    orders: Mutex<HashMap<CartId, Order>>,
    regions: Mutex<HashMap<String, Region>>,
    totals: Mutex<HashMap<CartId, i64>>,
    /// `(request_id, action)` scope to issued key.
    keys: Mutex<HashMap<(String, String), IdempotencyKey>>,
    /// Keys a completion has already succeeded under.
    completed: Mutex<HashMap<String, OrderId>>,
    completion_calls: AtomicUsize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_cart(&self, cart: Cart) {
        self.carts.lock().unwrap().insert(cart.id.clone(), cart);
    }

    pub fn insert_order(&self, order: Order) {
        self.orders
            .lock()
            .unwrap()
            .insert(order.cart_id.clone(), order);
    }

    pub fn insert_region(&self, region: Region) {
        self.regions
            .lock()
            .unwrap()
            .insert(region.id.clone(), region);
    }

    pub fn set_total(&self, cart_id: &CartId, total: i64) {
        self.totals.lock().unwrap().insert(cart_id.clone(), total);
    }

    pub fn cart(&self, cart_id: &CartId) -> Option<Cart> {
        self.carts.lock().unwrap().get(cart_id).cloned()
    }

    pub fn order_for_cart(&self, cart_id: &CartId) -> Option<Order> {
        self.orders.lock().unwrap().get(cart_id).cloned()
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn key_count(&self) -> usize {
        self.keys.lock().unwrap().len()
    }

    /// Number of times the completion strategy was invoked.
    pub fn completion_calls(&self) -> usize {
        self.completion_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CartService for MemoryHost {
    async fn retrieve(&self, cart_id: &CartId) -> Result<Cart, CommerceError> {
        self.cart(cart_id).ok_or(CommerceError::NotFound)
    }

    async fn set_payment_session(
        &self,
        cart_id: &CartId,
        provider_id: &str,
    ) -> Result<(), CommerceError> {
        let mut carts = self.carts.lock().unwrap();
        let cart = carts.get_mut(cart_id).ok_or(CommerceError::NotFound)?;

        match &cart.payment_session {
            Some(session) if session.provider_id == provider_id => {}
            _ => {
                cart.payment_session = Some(PaymentSession {
                    id: Uuid::new_v4().to_string(),
                    provider_id: provider_id.to_string(),
                    data: PaymentData::new(),
                    status: PaymentSessionStatus::Initial,
                });
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl OrderService for MemoryHost {
    async fn retrieve_by_cart_id(&self, cart_id: &CartId) -> Result<Option<Order>, CommerceError> {
        Ok(self.order_for_cart(cart_id))
    }
}

#[async_trait::async_trait]
impl IdempotencyKeys for MemoryHost {
    async fn initialize_request(
        &self,
        request_id: &str,
        _resource_type: ResourceType,
        _resource: Value,
        action: &str,
    ) -> Result<IdempotencyKey, CommerceError> {
        let mut keys = self.keys.lock().unwrap();
        let key = keys
            .entry((request_id.to_string(), action.to_string()))
            .or_insert_with(|| IdempotencyKey::new(Uuid::new_v4().to_string()));
        Ok(key.clone())
    }
}

#[async_trait::async_trait]
impl CartCompletionStrategy for MemoryHost {
    async fn complete(
        &self,
        cart_id: &CartId,
        key: &IdempotencyKey,
    ) -> Result<Order, CommerceError> {
        self.completion_calls.fetch_add(1, Ordering::SeqCst);

        let mut completed = self.completed.lock().unwrap();
        let mut orders = self.orders.lock().unwrap();

        // Same key seen before: return the order it produced.
        if let Some(order_id) = completed.get(&key.idempotency_key) {
            if let Some(order) = orders.values().find(|o| o.id == *order_id) {
                return Ok(order.clone());
            }
        }

        // Another path may have completed the cart already.
        if let Some(order) = orders.get(cart_id) {
            completed.insert(key.idempotency_key.clone(), order.id);
            return Ok(order.clone());
        }

        if !self.carts.lock().unwrap().contains_key(cart_id) {
            return Err(CommerceError::NotFound);
        }

        let order = Order::new(cart_id.clone());
        orders.insert(cart_id.clone(), order.clone());
        completed.insert(key.idempotency_key.clone(), order.id);
        Ok(order)
    }
}

#[async_trait::async_trait]
impl TotalsService for MemoryHost {
    async fn get_total(&self, cart: &Cart) -> Result<i64, CommerceError> {
        Ok(self
            .totals
            .lock()
            .unwrap()
            .get(&cart.id)
            .copied()
            .unwrap_or(0))
    }
}

#[async_trait::async_trait]
impl RegionService for MemoryHost {
    async fn retrieve(&self, region_id: &str) -> Result<Region, CommerceError> {
        self.regions
            .lock()
            .unwrap()
            .get(region_id)
            .cloned()
            .ok_or(CommerceError::NotFound)
    }
}
