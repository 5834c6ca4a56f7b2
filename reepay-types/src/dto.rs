//! Data Transfer Objects (DTOs) for the hook routes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{PaymentData, PaymentSessionStatus};
use crate::error::AppError;

/// Body of `POST /hooks/reepay/authorize`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorizeRequest {
    /// Cart whose payment session is being authorized
    #[schema(example = "cart_123")]
    pub cart_id: String,
    /// Provider the session belongs to
    #[schema(example = "reepay")]
    pub provider_id: String,
    pub payment_data: PaymentDataEnvelope,
}

impl AuthorizeRequest {
    /// All three fields are required and must be non-empty.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.cart_id.trim().is_empty() {
            return Err(AppError::InvalidData("cart_id is required".into()));
        }
        if self.provider_id.trim().is_empty() {
            return Err(AppError::InvalidData("provider_id is required".into()));
        }
        Ok(())
    }
}

/// Payment method details from the storefront; passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentDataEnvelope {
    #[serde(rename = "paymentMethod", default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<Value>,
}

/// Body of `POST /hooks/reepay/session`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionRequest {
    #[schema(example = "cart_123")]
    pub cart_id: String,
}

impl SessionRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.cart_id.trim().is_empty() {
            return Err(AppError::InvalidData("cart_id is required".into()));
        }
        Ok(())
    }
}

/// Result of authorizing a payment session: the stored provider data plus
/// the freshly computed status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentAuthorization {
    #[schema(value_type = Object)]
    pub data: PaymentData,
    pub status: PaymentSessionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_request_requires_non_empty_fields() {
        let request = AuthorizeRequest {
            cart_id: "cart_123".into(),
            provider_id: "reepay".into(),
            payment_data: PaymentDataEnvelope {
                payment_method: None,
            },
        };
        assert!(request.validate().is_ok());

        let empty_cart = AuthorizeRequest {
            cart_id: "  ".into(),
            ..request.clone()
        };
        assert!(matches!(
            empty_cart.validate(),
            Err(AppError::InvalidData(_))
        ));

        let empty_provider = AuthorizeRequest {
            provider_id: String::new(),
            ..request
        };
        assert!(matches!(
            empty_provider.validate(),
            Err(AppError::InvalidData(_))
        ));
    }
}
