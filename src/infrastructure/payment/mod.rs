//! Payment gateway integration.
//!
//! - [`PaymentGateway`] - order-creation contract
//! - [`HttpPaymentGateway`] - provider REST API client
//! - [`NullPaymentGateway`] - rejects orders when unconfigured

mod http_payment_gateway;
mod null_payment_gateway;
pub mod service;

pub use http_payment_gateway::HttpPaymentGateway;
pub use null_payment_gateway::NullPaymentGateway;
pub use service::{GatewayOrder, PaymentError, PaymentGateway, PaymentResult};
