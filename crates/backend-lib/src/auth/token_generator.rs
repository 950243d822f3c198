// ============================
// crates/backend-lib/src/auth/token_generator.rs
// ============================
//! Session token minting.
//!
//! A token is handed out without checking the table for a clash, so it
//! carries 256 random bits from the thread-local CSPRNG and is encoded
//! with the URL-safe base64 alphabet to travel in a query string as-is.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

const SESSION_TOKEN_BYTES: usize = 32;

/// Fresh 43-character session token
pub fn generate_secure_token() -> String {
    random_token(SESSION_TOKEN_BYTES)
}

/// `len` random bytes, base64url without padding
pub(crate) fn random_token(len: usize) -> String {
    let mut raw = vec![0u8; len];
    rand::rng().fill_bytes(&mut raw);
    URL_SAFE_NO_PAD.encode(raw)
}
