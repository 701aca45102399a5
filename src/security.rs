//! Security helpers (invite tokens, salted hashing)

use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a random invite token. The raw token is emailed to the
/// recipient ONCE; only its salted hash is stored.
pub fn generate_invite_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();

    (0..32)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Hash `secret` with `salt` using SHA-256.
/// Output is hex-encoded.
pub fn hash_secret_sha256_hex(secret: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(secret.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
