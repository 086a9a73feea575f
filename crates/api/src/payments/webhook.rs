//! Webhook signature verification.
//!
//! Stripe signs each delivery with HMAC-SHA256 over `"<timestamp>.<body>"`
//! and sends the result in the `Stripe-Signature` header as
//! `t=<timestamp>,v1=<signature>`. Verification must happen against the raw
//! request body, before any JSON parsing.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// The delivery's signature header was missing pieces or did not match.
#[derive(Debug, thiserror::Error)]
#[error("Invalid webhook signature")]
pub struct SignatureError;

/// Verify a webhook delivery's signature header against the raw payload.
pub fn verify_signature(
    payload: &[u8],
    signature_header: &str,
    webhook_secret: &str,
) -> Result<(), SignatureError> {
    let mut timestamp = None;
    let mut signature = None;

    for part in signature_header.split(',') {
        match part.split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signature = Some(value),
            _ => {}
        }
    }

    let (timestamp, signature) = match (timestamp, signature) {
        (Some(t), Some(s)) => (t, s),
        _ => return Err(SignatureError),
    };

    let mut mac =
        HmacSha256::new_from_slice(webhook_secret.as_bytes()).map_err(|_| SignatureError)?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    let expected = hex::encode(mac.finalize().into_bytes());

    if expected.as_bytes().ct_eq(signature.as_bytes()).into() {
        Ok(())
    } else {
        Err(SignatureError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(payload: &[u8], timestamp: &str, secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_a_correctly_signed_payload() {
        let secret = "whsec_test";
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let header = format!("t=1700000000,v1={}", sign(payload, "1700000000", secret));

        assert!(verify_signature(payload, &header, secret).is_ok());
    }

    #[test]
    fn rejects_a_tampered_payload() {
        let secret = "whsec_test";
        let header = format!("t=1700000000,v1={}", sign(b"original", "1700000000", secret));

        assert!(verify_signature(b"tampered", &header, secret).is_err());
    }

    #[test]
    fn rejects_a_wrong_secret() {
        let payload = b"payload";
        let header = format!("t=1,v1={}", sign(payload, "1", "whsec_a"));

        assert!(verify_signature(payload, &header, "whsec_b").is_err());
    }

    #[test]
    fn rejects_a_malformed_header() {
        assert!(verify_signature(b"payload", "v1=abc", "secret").is_err());
        assert!(verify_signature(b"payload", "t=1", "secret").is_err());
        assert!(verify_signature(b"payload", "", "secret").is_err());
    }
}
