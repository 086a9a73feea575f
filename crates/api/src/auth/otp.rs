//! One-time verification code generation.

use rand::RngCore;

/// Codes are valid for 15 minutes.
pub const OTP_TTL_MINUTES: i64 = 15;

/// Generate a 6-character hex verification code.
pub fn generate_code() -> String {
    let mut bytes = [0u8; 3];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_six_hex_chars() {
        let code = generate_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
