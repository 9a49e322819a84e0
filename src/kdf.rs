//! Key derivation from an ECDH shared secret to symmetric key bytes.

use sha2::{Digest, Sha256};

/// Default other-info bound into every derived key.
pub const DEFAULT_OTHER_INFO: &[u8] = b"elliptic-curve-demo";

pub trait KeyDerivation {
    /// Derive `output_len` bytes of key material from `secret`.
    fn derive(&self, secret: &[u8], output_len: usize) -> Vec<u8>;
}

/// Single-step concatenation KDF (NIST SP 800-56A) over SHA-256:
/// `K = H(1 || Z || OtherInfo) || H(2 || Z || OtherInfo) || …`, truncated to length.
#[derive(Clone, Debug)]
pub struct ConcatKdf {
    other_info: Vec<u8>,
}

impl ConcatKdf {
    pub fn new(other_info: &[u8]) -> Self {
        Self {
            other_info: other_info.to_vec(),
        }
    }
}

impl Default for ConcatKdf {
    fn default() -> Self {
        Self::new(DEFAULT_OTHER_INFO)
    }
}

impl KeyDerivation for ConcatKdf {
    fn derive(&self, secret: &[u8], output_len: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(output_len);
        let mut counter: u32 = 1;
        while out.len() < output_len {
            let mut hasher = Sha256::new();
            hasher.update(counter.to_be_bytes());
            hasher.update(secret);
            hasher.update(&self.other_info);
            out.extend_from_slice(&hasher.finalize());
            counter += 1;
        }
        out.truncate(output_len);
        out
    }
}
