//! Utility functions shared across the application:
//!
//! - [`otp`] - One-time password generation
//! - [`address`] - City derivation from free-text addresses
//! - [`flexible`] - Defensive deserializers for loosely-typed payload fields

pub mod address;
pub mod flexible;
pub mod otp;
