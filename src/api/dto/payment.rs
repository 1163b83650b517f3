//! DTOs for payment endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::infrastructure::payment::GatewayOrder;

/// Request to create a gateway order. Amount is in rupees.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,
}

/// Response describing the created gateway order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
    /// Amount in paise, as the gateway reports it.
    pub amount: i64,
    pub currency: String,
}

impl From<GatewayOrder> for CreateOrderResponse {
    fn from(order: GatewayOrder) -> Self {
        Self {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
        }
    }
}

/// Request to mark a user subscribed after a settled payment.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub payment_id: Option<String>,
    pub subscription_type: Option<String>,
}
