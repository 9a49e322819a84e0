//! Message digests with a caller-chosen output length, used to hash messages into the
//! group-order field before signing.

use sha2::{Digest, Sha256};

/// A hash function that emits exactly `output_len` bytes.
pub trait MessageDigest {
    fn digest(&self, message: &[u8], output_len: usize) -> Vec<u8>;
}

/// SHA-256 stretched or truncated to the requested length.
///
/// Up to 32 bytes the output is a prefix of `SHA256(message)`, so for 256-bit group orders
/// this is plain SHA-256 and interoperates with standard ECDSA. Longer outputs concatenate
/// `SHA256(counter || message)` blocks with a big-endian 32-bit counter starting at 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Digest;

impl MessageDigest for Sha256Digest {
    fn digest(&self, message: &[u8], output_len: usize) -> Vec<u8> {
        if output_len <= Sha256::output_size() {
            let mut out = Sha256::digest(message).to_vec();
            out.truncate(output_len);
            return out;
        }
        let mut out = Vec::with_capacity(output_len);
        let mut counter: u32 = 1;
        while out.len() < output_len {
            let mut hasher = Sha256::new();
            hasher.update(counter.to_be_bytes());
            hasher.update(message);
            out.extend_from_slice(&hasher.finalize());
            counter += 1;
        }
        out.truncate(output_len);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_sha256_prefix() {
        let full = Sha256Digest.digest(b"foobar", 32);
        assert_eq!(
            full,
            hex_literal("c3ab8ff13720e8ad9047dd39466b3c8974e592c2fa383d4a3960714caef0c4f2")
        );
        assert_eq!(Sha256Digest.digest(b"foobar", 1), vec![0xc3]);
        assert!(Sha256Digest.digest(b"foobar", 0).is_empty());
    }

    #[test]
    fn digest_consistency() {
        let h1 = Sha256Digest.digest(b"hello world", 16);
        let h2 = Sha256Digest.digest(b"hello world", 16);
        assert_eq!(h1, h2, "digest must be deterministic");

        let h3 = Sha256Digest.digest(b"other message", 16);
        assert_ne!(h1, h3, "different messages produce different digests");
    }

    #[test]
    fn long_digest_length() {
        for len in [33, 40, 64, 100] {
            assert_eq!(Sha256Digest.digest(b"abc", len).len(), len);
        }
        // prefixes of the stretched output agree
        let long = Sha256Digest.digest(b"abc", 100);
        assert_eq!(&long[..64], &Sha256Digest.digest(b"abc", 64)[..]);
    }

    fn hex_literal(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }
}
