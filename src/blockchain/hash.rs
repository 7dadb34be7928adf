use sha2::{Digest, Sha256};

/// Width of a digest in hex characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// SHA-256 of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
