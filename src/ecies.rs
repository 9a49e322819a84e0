//! Hybrid encryption: an ephemeral Diffie-Hellman exchange on the curve feeds the KDF,
//! and the derived key drives the authenticated cipher.

use num_bigint::BigUint;
use num_traits::Zero;
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::aead::SymmetricCipher;
use crate::context::SignatureContext;
use crate::error::{Error, Result};
use crate::hash::MessageDigest;
use crate::kdf::KeyDerivation;
use crate::point::CurvePoint;

/// Output of [`SignatureContext::encrypt`]. Both parts are needed to decrypt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedMessage {
    pub ciphertext: Vec<u8>,
    pub ephemeral_public_key: CurvePoint,
}

impl<D: MessageDigest, K: KeyDerivation, C: SymmetricCipher> SignatureContext<D, K, C> {
    /// Symmetric key from the x-coordinate of a shared point, serialized as minimal
    /// big-endian bytes (empty for zero).
    pub fn derive_symmetric_key(&self, shared_secret: &CurvePoint) -> Vec<u8> {
        let x = shared_secret.x().value();
        let secret = if x.is_zero() {
            Vec::new()
        } else {
            x.to_bytes_be()
        };
        self.kdf.derive(&secret, self.cipher.key_len())
    }

    pub fn encrypt(&self, message: &[u8], public_key: &CurvePoint) -> Result<EncryptedMessage> {
        self.encrypt_with_rng(message, public_key, &mut OsRng)
    }

    pub fn encrypt_with_rng<R: TryRngCore + ?Sized>(
        &self,
        message: &[u8],
        public_key: &CurvePoint,
        rng: &mut R,
    ) -> Result<EncryptedMessage> {
        self.check_point(public_key)?;
        let d = self.ephemeral_scalar(rng)?;
        let ephemeral_public_key = self.generator().multiply(&d)?;
        let shared_secret = public_key.multiply(&d)?;

        let key = self.derive_symmetric_key(&shared_secret);
        let ciphertext = self.cipher.encrypt(&key, message)?;
        Ok(EncryptedMessage {
            ciphertext,
            ephemeral_public_key,
        })
    }

    /// Recovers the shared point as `ephemeral_public_key * private_key`, which equals
    /// `public_key * d` from the sender's side.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        ephemeral_public_key: &CurvePoint,
        private_key: &BigUint,
    ) -> Result<Vec<u8>> {
        self.check_point(ephemeral_public_key)?;
        let private_key = self.private_scalar(private_key)?;
        let shared_secret = ephemeral_public_key.multiply(private_key.value())?;

        let key = self.derive_symmetric_key(&shared_secret);
        self.cipher.decrypt(&key, ciphertext).map_err(|e| {
            log::debug!("hybrid decryption failed: {e}");
            Error::DecryptionFailed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::toy_context;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_round_trip() {
        let ctx = toy_context();
        let mut rng = StdRng::seed_from_u64(11);
        for message in [&b"foobar"[..], b"", &[0xffu8; 300]] {
            let pair = ctx.generate_key_pair_with_rng(&mut rng).unwrap();
            let encrypted = ctx
                .encrypt_with_rng(message, &pair.public_key, &mut rng)
                .unwrap();
            let plaintext = ctx
                .decrypt(
                    &encrypted.ciphertext,
                    &encrypted.ephemeral_public_key,
                    &pair.private_key,
                )
                .unwrap();
            assert_eq!(plaintext, message);
        }
    }

    #[test]
    fn test_shared_secret_agreement() {
        let ctx = toy_context();
        let (a, b) = (BigUint::from(17u8), BigUint::from(150u8));
        let pub_a = ctx.derive_public_key(&a).unwrap();
        let pub_b = ctx.derive_public_key(&b).unwrap();
        assert_eq!(pub_a.multiply(&b).unwrap(), pub_b.multiply(&a).unwrap());
        assert_eq!(
            ctx.derive_symmetric_key(&pub_a.multiply(&b).unwrap()),
            ctx.derive_symmetric_key(&pub_b.multiply(&a).unwrap())
        );
        assert_eq!(ctx.derive_symmetric_key(&pub_a).len(), 32);
    }

    #[test]
    fn test_wrong_private_key_fails() {
        let ctx = toy_context();
        let public_key = ctx.derive_public_key(&BigUint::from(17u8)).unwrap();
        let encrypted = ctx.encrypt(b"foobar", &public_key).unwrap();
        let res = ctx.decrypt(
            &encrypted.ciphertext,
            &encrypted.ephemeral_public_key,
            &BigUint::from(18u8),
        );
        assert_eq!(res, Err(Error::DecryptionFailed));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let ctx = toy_context();
        let private_key = BigUint::from(17u8);
        let public_key = ctx.derive_public_key(&private_key).unwrap();
        let mut encrypted = ctx.encrypt(b"foobar", &public_key).unwrap();
        encrypted.ciphertext[13] ^= 0x80;
        let res = ctx.decrypt(
            &encrypted.ciphertext,
            &encrypted.ephemeral_public_key,
            &private_key,
        );
        assert_eq!(res, Err(Error::DecryptionFailed));
    }

    #[test]
    fn test_public_key_from_other_curve() {
        let ctx = toy_context();
        let other = crate::curve::Curve::from_ints(
            crate::field::Field::from_u64(223).unwrap(),
            0,
            7,
        )
        .unwrap();
        let res = ctx.encrypt(b"foobar", &other.point_of(47, 71).unwrap());
        assert!(matches!(res, Err(Error::CurveMismatch)));
    }
}
