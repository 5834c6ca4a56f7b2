//! Webhook signature utilities.
//!
//! The gateway signs each event with HMAC-SHA256 over the concatenation of
//! the event's `timestamp` and `id` fields, hex-encoded.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the expected signature for an event.
pub fn sign_event(secret: &str, timestamp: &str, id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    mac.update(id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies an event signature using constant-time comparison.
pub fn verify_event_signature(secret: &str, timestamp: &str, id: &str, signature: &str) -> bool {
    let expected = sign_event(secret, timestamp, id);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_deterministic_hex_sha256() {
        let a = sign_event("whsec_123", "2015-06-25T12:10:00.64Z", "wh_1");
        let b = sign_event("whsec_123", "2015-06-25T12:10:00.64Z", "wh_1");

        assert_eq!(a, b);
        // hex-encoded SHA-256 output
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verification_accepts_own_signature() {
        let signature = sign_event("whsec_123", "T", "I");
        assert!(verify_event_signature("whsec_123", "T", "I", &signature));
    }

    #[test]
    fn test_verification_rejects_tampering() {
        let signature = sign_event("whsec_123", "T", "I");

        assert!(!verify_event_signature("whsec_123", "T2", "I", &signature));
        assert!(!verify_event_signature("whsec_123", "T", "I2", &signature));
        assert!(!verify_event_signature("other_secret", "T", "I", &signature));
        assert!(!verify_event_signature("whsec_123", "T", "I", "deadbeef"));
    }

    #[test]
    fn test_concatenation_order_matters() {
        // HMAC(timestamp + id), not HMAC(id + timestamp)
        let forward = sign_event("whsec_123", "AB", "C");
        let swapped = sign_event("whsec_123", "C", "AB");
        let joined = sign_event("whsec_123", "A", "BC");

        assert_ne!(forward, swapped);
        // same concatenated bytes give the same signature regardless of split
        assert_eq!(forward, joined);
    }
}
