//! HMAC-SHA256 request signing.

use hmac::{Hmac, Mac as _};
use secrecy::{ExposeSecret as _, SecretString};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Number of leading signature characters that may appear in logs.
const MASK_PREFIX_LEN: usize = 15;

/// Signs `body` with the shared secret, producing the `X-Signature-256`
/// header value: `sha256=` followed by 64 lowercase hex characters.
#[must_use]
pub fn sign(secret: &SecretString, body: &[u8]) -> String {
    // HMAC accepts keys of any length, so construction cannot fail.
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

/// Truncates a signature for operator-visible output.
///
/// A full signature is a valid proof-of-possession of the secret for that
/// exact body; only this masked prefix is ever logged.
#[must_use]
pub fn masked(signature: &str) -> String {
    let prefix: String = signature.chars().take(MASK_PREFIX_LEN).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value)
    }

    // Reference digests computed with an independent HMAC-SHA256
    // implementation (Python's hmac/hashlib).
    #[test]
    fn matches_reference_digests() {
        assert_eq!(
            sign(&secret("k"), b"{}"),
            "sha256=add853b103fbcc936a194f9eb15e29c4ff08af6e47d5d1bca4f20218e31e4fff"
        );
        assert_eq!(
            sign(&secret("webhook-secret"), b"{\"alert\":\"test\"}"),
            "sha256=847f43551de31219032f5147c18eb785d53c23e961cd995a42afe389b4f74a8b"
        );
        assert_eq!(
            sign(
                &secret("top-secret"),
                concat!(
                    "{\"action_run_link\":\"https://github.com/ada/submission/actions/runs/1234567890\",",
                    "\"email\":\"ada@example.com\",\"name\":\"Ada Lovelace\",",
                    "\"repository_link\":\"https://github.com/ada/submission\",",
                    "\"resume_link\":\"https://example.com/resume.pdf\",",
                    "\"timestamp\":\"2026-01-06T16:59:37.571Z\"}"
                )
                .as_bytes()
            ),
            "sha256=be9b6f7eb04bf171d393272f7d971dd6b386a989e2cd20ce78249233f4581e8e"
        );
    }

    #[test]
    fn shape_is_prefix_plus_64_lowercase_hex() {
        let sig = sign(&secret("k"), b"{}");
        let digest = sig.strip_prefix("sha256=").expect("sha256= prefix");
        assert_eq!(digest.len(), 64, "SHA-256 digest is 32 bytes / 64 hex chars");
        assert!(
            digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
            "digest must be lowercase hex"
        );
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let sig_a = sign(&secret("webhook-secret"), b"{\"alert\":\"test\"}");
        let sig_b = sign(&secret("webhook-secret"), b"{\"alert\":\"test\"}");
        assert_eq!(sig_a, sig_b, "same (secret, body) must sign identically");
    }

    #[test]
    fn sensitive_to_one_byte_body_change() {
        assert_eq!(
            sign(&secret("webhook-secret"), b"{\"alert\":\"test \"}"),
            "sha256=5c0ddf82c969c722e81ccf8e2fd0ad24baf48a421e4ccd4f2fd7d2656d5e0afc"
        );
        assert_ne!(
            sign(&secret("webhook-secret"), b"{\"alert\":\"test\"}"),
            sign(&secret("webhook-secret"), b"{\"alert\":\"test \"}"),
            "a one-byte body change must change the signature"
        );
    }

    #[test]
    fn sensitive_to_secret_change() {
        assert_eq!(
            sign(&secret("webhook-secrets"), b"{\"alert\":\"test\"}"),
            "sha256=21396582a336a67a0a7f36ef25cde026510bcbe1e678eeebcb8299c3042d2c45"
        );
        assert_ne!(
            sign(&secret("webhook-secret"), b"{\"alert\":\"test\"}"),
            sign(&secret("webhook-secrets"), b"{\"alert\":\"test\"}"),
            "a different secret must change the signature"
        );
    }

    #[test]
    fn masked_keeps_at_most_15_chars() {
        let sig = sign(&secret("k"), b"{}");
        let masked = masked(&sig);
        assert_eq!(masked, "sha256=add853b1...");
        assert_eq!(masked.len(), MASK_PREFIX_LEN + 3);
        assert!(!masked.contains(&sig[15..30]), "digest tail must not leak");
    }

    #[test]
    fn masked_handles_short_input() {
        assert_eq!(masked("sha256="), "sha256=...");
    }
}
