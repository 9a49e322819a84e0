//! Authenticated symmetric encryption for the hybrid encryption scheme.

use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, CHACHA20_POLY1305, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::{Error, Result};

/// An AEAD that produces self-contained tokens: whatever it needs to decrypt (nonce, tag)
/// travels inside the token.
pub trait SymmetricCipher {
    /// Required key length in bytes.
    fn key_len(&self) -> usize;

    fn encrypt(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>>;

    /// Fails with [`Error::DecryptionFailed`] when the token does not authenticate under `key`.
    fn decrypt(&self, key: &[u8], token: &[u8]) -> Result<Vec<u8>>;
}

/// ChaCha20-Poly1305 from `ring`. Tokens are `nonce || ciphertext || tag` with a fresh
/// random 96-bit nonce per message.
#[derive(Clone, Debug)]
pub struct ChaCha20Poly1305 {
    rng: SystemRandom,
}

impl ChaCha20Poly1305 {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    fn key(key: &[u8]) -> Option<LessSafeKey> {
        UnboundKey::new(&CHACHA20_POLY1305, key)
            .ok()
            .map(LessSafeKey::new)
    }
}

impl Default for ChaCha20Poly1305 {
    fn default() -> Self {
        Self::new()
    }
}

impl SymmetricCipher for ChaCha20Poly1305 {
    fn key_len(&self) -> usize {
        CHACHA20_POLY1305.key_len()
    }

    fn encrypt(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        let key = Self::key(key).ok_or(Error::EncryptionFailed)?;

        let mut nonce = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce)
            .map_err(|_| Error::Randomness("system random source unavailable".into()))?;

        let mut in_out = message.to_vec();
        key.seal_in_place_append_tag(
            Nonce::assume_unique_for_key(nonce),
            Aad::empty(),
            &mut in_out,
        )
        .map_err(|_| Error::EncryptionFailed)?;

        let mut token = Vec::with_capacity(NONCE_LEN + in_out.len());
        token.extend_from_slice(&nonce);
        token.extend_from_slice(&in_out);
        Ok(token)
    }

    fn decrypt(&self, key: &[u8], token: &[u8]) -> Result<Vec<u8>> {
        let key = Self::key(key).ok_or(Error::DecryptionFailed)?;
        if token.len() < NONCE_LEN + CHACHA20_POLY1305.tag_len() {
            return Err(Error::DecryptionFailed);
        }
        let (nonce, sealed) = token.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce).map_err(|_| Error::DecryptionFailed)?;

        let mut in_out = sealed.to_vec();
        let plaintext_len = key
            .open_in_place(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| Error::DecryptionFailed)?
            .len();
        in_out.truncate(plaintext_len);
        Ok(in_out)
    }
}
