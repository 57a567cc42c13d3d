//! PKCE (Proof Key for Code Exchange) verification.
//!
//! Implements S256 and plain code challenge verification per RFC 7636.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// Verify a PKCE S256 code challenge.
///
/// Computes `BASE64URL(SHA256(code_verifier))` and compares to the stored challenge.
#[must_use]
pub fn verify_s256(code_verifier: &str, code_challenge: &str) -> bool {
    let hash = Sha256::digest(code_verifier.as_bytes());
    let computed = URL_SAFE_NO_PAD.encode(hash);
    computed == code_challenge
}

/// Verify a verifier against a stored challenge for the given method.
///
/// Missing method defaults to "plain" per RFC 7636 §4.3.
#[must_use]
pub fn verify(code_verifier: &str, code_challenge: &str, method: Option<&str>) -> bool {
    match method {
        Some("S256") => verify_s256(code_verifier, code_challenge),
        Some("plain") | None => code_verifier == code_challenge,
        Some(_) => false,
    }
}
