//! ReepayProvider unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use reepay_types::domain::gateway::{
        Charge, CheckoutSession, CheckoutSessionRequest, Invoice, InvoiceState, Refund,
        RefundRequest, RefundState,
    };
    use reepay_types::error::{CommerceError, GatewayError, ProviderError};
    use reepay_types::ports::{GatewayClient, PaymentProvider, RegionService, TotalsService};
    use reepay_types::{
        Cart, PaymentData, PaymentSession, PaymentSessionStatus, ReepayOptions, Region,
    };

    use crate::ReepayProvider;

    /// Scripted gateway for testing the adapter without transport.
    #[derive(Clone)]
    pub struct MockGateway {
        invoice_state: InvoiceState,
        settle_state: InvoiceState,
        refund_state: RefundState,
        calls: Arc<Mutex<Vec<String>>>,
        last_checkout: Arc<Mutex<Option<CheckoutSessionRequest>>>,
    }

    impl MockGateway {
        pub fn new() -> Self {
            Self {
                invoice_state: InvoiceState::Authorized,
                settle_state: InvoiceState::Settled,
                refund_state: RefundState::Refunded,
                calls: Arc::new(Mutex::new(Vec::new())),
                last_checkout: Arc::new(Mutex::new(None)),
            }
        }

        fn with_invoice_state(mut self, state: InvoiceState) -> Self {
            self.invoice_state = state;
            self
        }

        fn with_settle_state(mut self, state: InvoiceState) -> Self {
            self.settle_state = state;
            self
        }

        fn with_refund_state(mut self, state: RefundState) -> Self {
            self.refund_state = state;
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
    }

    #[async_trait::async_trait]
    impl GatewayClient for MockGateway {
        async fn create_checkout_session(
            &self,
            request: &CheckoutSessionRequest,
        ) -> Result<CheckoutSession, GatewayError> {
            self.record("create_checkout_session");
            *self.last_checkout.lock().unwrap() = Some(request.clone());
            Ok(CheckoutSession {
                id: "cs_1".into(),
                url: "https://checkout.example/cs_1".into(),
                extra: Default::default(),
            })
        }

        async fn get_invoice(&self, id: &str) -> Result<Invoice, GatewayError> {
            self.record(format!("get_invoice:{id}"));
            Ok(Invoice {
                state: self.invoice_state,
                extra: Default::default(),
            })
        }

        async fn get_charge(&self, id: &str) -> Result<Charge, GatewayError> {
            self.record(format!("get_charge:{id}"));
            Ok(Charge {
                state: self.invoice_state,
                extra: Default::default(),
            })
        }

        async fn settle_charge(&self, handle: &str) -> Result<Charge, GatewayError> {
            self.record(format!("settle_charge:{handle}"));
            Ok(Charge {
                state: self.settle_state,
                extra: Default::default(),
            })
        }

        async fn refund(&self, request: &RefundRequest) -> Result<Refund, GatewayError> {
            self.record(format!("refund:{}:{}", request.invoice, request.amount));
            Ok(Refund {
                state: self.refund_state,
                extra: Default::default(),
            })
        }

        async fn cancel_charge(&self, handle: &str) -> Result<Charge, GatewayError> {
            self.record(format!("cancel_charge:{handle}"));
            Ok(Charge {
                state: self.invoice_state,
                extra: Default::default(),
            })
        }

        async fn delete_charge(&self, handle: &str) -> Result<serde_json::Value, GatewayError> {
            self.record(format!("delete_charge:{handle}"));
            Ok(json!({ "handle": handle, "deleted": true }))
        }
    }

    /// Fixed totals and region resolution.
    struct StaticCommerce {
        total: i64,
        currency: &'static str,
    }

    #[async_trait::async_trait]
    impl TotalsService for StaticCommerce {
        async fn get_total(&self, _cart: &Cart) -> Result<i64, CommerceError> {
            Ok(self.total)
        }
    }

    #[async_trait::async_trait]
    impl RegionService for StaticCommerce {
        async fn retrieve(&self, region_id: &str) -> Result<Region, CommerceError> {
            Ok(Region {
                id: region_id.to_string(),
                currency_code: self.currency.to_string(),
            })
        }
    }

    fn options() -> ReepayOptions {
        ReepayOptions {
            api_key: "priv_key".into(),
            webhook_secret: Some("whsec_123".into()),
            accept_url: Some("https://shop.example/checkout/payment".into()),
            cancel_url: Some("https://shop.example/checkout".into()),
            payment_methods: Some(vec!["card".into()]),
        }
    }

    fn provider(gateway: MockGateway) -> ReepayProvider<MockGateway> {
        let commerce = Arc::new(StaticCommerce {
            total: 1000,
            currency: "dkk",
        });
        ReepayProvider::new(gateway, commerce.clone(), commerce, options())
    }

    fn cart(email: Option<&str>) -> Cart {
        Cart {
            id: "cart_123".into(),
            email: email.map(String::from),
            region_id: "reg_dk".into(),
            payment_session: None,
        }
    }

    fn handle_data() -> PaymentData {
        PaymentData::from_value(json!({"handle": "cart_123"}))
    }

    #[tokio::test]
    async fn test_create_payment_without_email_is_empty() {
        let gateway = MockGateway::new();
        let provider = provider(gateway.clone());

        let data = provider.create_payment(&cart(None)).await.unwrap();

        assert!(data.is_empty());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_payment_builds_checkout_request() {
        let gateway = MockGateway::new();
        let provider = provider(gateway.clone());

        let data = provider
            .create_payment(&cart(Some("buyer@example.com")))
            .await
            .unwrap();

        assert_eq!(data.invoice(), Some("cart_123"));
        assert_eq!(data.action_url(), Some("https://checkout.example/cs_1"));

        let request = gateway.last_checkout.lock().unwrap().clone().unwrap();
        assert!(!request.settle);
        assert_eq!(request.order.handle, "cart_123");
        assert_eq!(request.order.amount, 1000);
        assert_eq!(request.order.currency, "DKK");
        assert_eq!(request.order.customer.email, "buyer@example.com");
        assert_eq!(
            request.accept_url.as_deref(),
            Some("https://shop.example/checkout/payment")
        );
        assert_eq!(request.payment_methods, Some(vec!["card".to_string()]));
    }

    #[tokio::test]
    async fn test_get_status_maps_every_state() {
        let cases = [
            (InvoiceState::Created, PaymentSessionStatus::Pending),
            (InvoiceState::Authorized, PaymentSessionStatus::Authorized),
            (InvoiceState::Settled, PaymentSessionStatus::Captured),
            (InvoiceState::Failed, PaymentSessionStatus::Canceled),
            (InvoiceState::Unknown, PaymentSessionStatus::Initial),
        ];

        for (state, expected) in cases {
            let gateway = MockGateway::new().with_invoice_state(state);
            let provider = provider(gateway);
            let status = provider.get_status(&handle_data()).await.unwrap();
            assert_eq!(status, expected, "state {state:?}");
        }
    }

    #[tokio::test]
    async fn test_get_status_prefers_invoice_over_handle() {
        let gateway = MockGateway::new();
        let provider = provider(gateway.clone());

        let data = PaymentData::from_value(json!({"invoice": "inv_1", "handle": "h_1"}));
        provider.get_status(&data).await.unwrap();

        assert_eq!(gateway.calls(), vec!["get_invoice:inv_1".to_string()]);
    }

    #[tokio::test]
    async fn test_get_status_without_identifiers_fails() {
        let provider = provider(MockGateway::new());
        let result = provider.get_status(&PaymentData::new()).await;
        assert!(matches!(result, Err(ProviderError::MissingData("invoice"))));
    }

    #[tokio::test]
    async fn test_authorize_returns_stored_data_and_status() {
        let gateway = MockGateway::new().with_invoice_state(InvoiceState::Authorized);
        let provider = provider(gateway);

        let session = PaymentSession {
            id: "ps_1".into(),
            provider_id: "reepay".into(),
            data: handle_data(),
            status: PaymentSessionStatus::Pending,
        };

        let authorization = provider
            .authorize_payment(&session, json!({"type": "card"}))
            .await
            .unwrap();

        assert_eq!(authorization.status, PaymentSessionStatus::Authorized);
        assert_eq!(authorization.data, session.data);
    }

    #[tokio::test]
    async fn test_capture_settled_retrieves_full_charge() {
        let gateway = MockGateway::new().with_settle_state(InvoiceState::Settled);
        let provider = provider(gateway.clone());

        provider.capture_payment(&handle_data()).await.unwrap();

        assert_eq!(
            gateway.calls(),
            vec![
                "settle_charge:cart_123".to_string(),
                "get_charge:cart_123".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_capture_not_settled_fails_without_retrieval() {
        let gateway = MockGateway::new().with_settle_state(InvoiceState::Authorized);
        let provider = provider(gateway.clone());

        let result = provider.capture_payment(&handle_data()).await;

        assert!(matches!(result, Err(ProviderError::InvalidArgument(_))));
        // no retrieval call follows a failed capture
        assert_eq!(gateway.calls(), vec!["settle_charge:cart_123".to_string()]);
    }

    #[tokio::test]
    async fn test_refund_uses_handle_and_amount() {
        let gateway = MockGateway::new();
        let provider = provider(gateway.clone());

        provider.refund_payment(&handle_data(), 250).await.unwrap();

        assert_eq!(
            gateway.calls(),
            vec![
                "refund:cart_123:250".to_string(),
                "get_charge:cart_123".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_refund_state_mismatch_fails() {
        let gateway = MockGateway::new().with_refund_state(RefundState::Processing);
        let provider = provider(gateway.clone());

        let result = provider.refund_payment(&handle_data(), 250).await;

        assert!(matches!(result, Err(ProviderError::InvalidArgument(_))));
        assert_eq!(gateway.calls(), vec!["refund:cart_123:250".to_string()]);
    }

    #[tokio::test]
    async fn test_cancel_and_delete_pass_through() {
        let gateway = MockGateway::new();
        let provider = provider(gateway.clone());

        provider.cancel_payment(&handle_data()).await.unwrap();
        let raw = provider.delete_payment(&handle_data()).await.unwrap();

        // delete surfaces the raw gateway response
        assert_eq!(raw, json!({ "handle": "cart_123", "deleted": true }));
        assert_eq!(
            gateway.calls(),
            vec![
                "cancel_charge:cart_123".to_string(),
                "delete_charge:cart_123".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_saved_methods_are_not_supported() {
        let provider = provider(MockGateway::new());
        let methods = provider.retrieve_saved_methods("cus_1").await.unwrap();
        assert!(methods.is_empty());
    }

    #[tokio::test]
    async fn test_update_payment_data_is_pure_merge() {
        let gateway = MockGateway::new();
        let provider = provider(gateway.clone());

        let data = PaymentData::from_value(json!({"handle": "h_1", "keep": 1}));
        let update = PaymentData::from_value(json!({"handle": "h_2"}));

        let merged = provider.update_payment_data(&data, &update);

        assert_eq!(merged.handle(), Some("h_2"));
        assert_eq!(merged.as_map().get("keep"), Some(&json!(1)));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_payment_recreates_session() {
        let gateway = MockGateway::new();
        let provider = provider(gateway.clone());

        let data = provider
            .update_payment(&handle_data(), &cart(Some("buyer@example.com")))
            .await
            .unwrap();

        assert_eq!(data.invoice(), Some("cart_123"));
        assert_eq!(gateway.calls(), vec!["create_checkout_session".to_string()]);
    }
}
