//! Placeholder payment gateway for environments without credentials.

use super::service::{GatewayOrder, PaymentError, PaymentGateway, PaymentResult};
use async_trait::async_trait;
use tracing::info;

/// Gateway that rejects every order.
pub struct NullPaymentGateway;

impl NullPaymentGateway {
    pub fn new() -> Self {
        info!("Using NullPaymentGateway (payments disabled)");
        Self
    }
}

impl Default for NullPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for NullPaymentGateway {
    async fn create_order(
        &self,
        _amount: i64,
        _currency: &str,
        _receipt: &str,
    ) -> PaymentResult<GatewayOrder> {
        Err(PaymentError::Disabled)
    }
}
