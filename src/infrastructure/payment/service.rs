//! Payment gateway trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to the payment gateway.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment request error: {0}")]
    Request(String),
    #[error("Payment gateway rejected the request: {0}")]
    Provider(String),
    #[error("Payment gateway is not configured")]
    Disabled,
}

/// Result type for payment operations.
pub type PaymentResult<T> = Result<T, PaymentError>;

/// An order created at the gateway, to be settled client-side.
#[derive(Debug, Clone)]
pub struct GatewayOrder {
    pub id: String,
    /// Amount in the currency's minor unit (paise for INR).
    pub amount: i64,
    pub currency: String,
}

/// Trait for the external payment gateway.
///
/// # Implementations
///
/// - [`crate::infrastructure::payment::HttpPaymentGateway`] - gateway REST API client
/// - [`crate::infrastructure::payment::NullPaymentGateway`] - rejects orders when unconfigured
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates an order for the given minor-unit amount.
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> PaymentResult<GatewayOrder>;
}
