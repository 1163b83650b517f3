//! Subscription payments: order creation and post-payment marking.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::warn;

use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::payment::{GatewayOrder, PaymentGateway};

/// Fixed receipt tag sent with every gateway order.
const ORDER_RECEIPT: &str = "order_rcptid_11";

/// Order currency; amounts are converted to paise before hitting the
/// gateway.
const ORDER_CURRENCY: &str = "INR";

/// Service for payment-gateway orders and subscription state.
pub struct PaymentService {
    gateway: Arc<dyn PaymentGateway>,
    user_repository: Arc<dyn UserRepository>,
}

impl PaymentService {
    /// Creates a new payment service.
    pub fn new(gateway: Arc<dyn PaymentGateway>, user_repository: Arc<dyn UserRepository>) -> Self {
        Self {
            gateway,
            user_repository,
        }
    }

    /// Creates a gateway order for an amount given in rupees.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the gateway call fails.
    pub async fn create_order(&self, amount: i64) -> Result<GatewayOrder, AppError> {
        self.gateway
            .create_order(amount * 100, ORDER_CURRENCY, ORDER_RECEIPT)
            .await
            .map_err(|e| {
                warn!(error = %e, "gateway order creation failed");
                AppError::internal("Error creating order", json!({}))
            })
    }

    /// Marks a user as subscribed after a settled payment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no user has the given email.
    pub async fn mark_subscribed(
        &self,
        email: &str,
        payment_id: &str,
        subscription_type: Option<&str>,
    ) -> Result<(), AppError> {
        let updated = self
            .user_repository
            .mark_subscribed(email, payment_id, subscription_type, Utc::now())
            .await?;

        if updated == 0 {
            return Err(AppError::not_found(
                "User not found",
                json!({ "email": email }),
            ));
        }

        Ok(())
    }
}
