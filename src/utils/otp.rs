//! One-time password generation for email verification and password reset.

use rand::Rng;

/// Number of digits in a generated OTP.
const OTP_DIGITS: u32 = 6;

/// Generates a random numeric one-time password.
///
/// Always returns exactly six digits; leading zeros are preserved.
pub fn generate_otp() -> String {
    let upper = 10u32.pow(OTP_DIGITS);
    let value = rand::rng().random_range(0..upper);
    format!("{:06}", value)
}
