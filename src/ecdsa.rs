use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::aead::SymmetricCipher;
use crate::context::SignatureContext;
use crate::error::{Error, Result};
use crate::field_element::FieldElement;
use crate::hash::MessageDigest;
use crate::kdf::KeyDerivation;
use crate::point::CurvePoint;

/// An ECDSA signature; both components are elements of the group-order field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: FieldElement,
    pub s: FieldElement,
}

impl Signature {
    pub fn new(r: FieldElement, s: FieldElement) -> Self {
        Self { r, s }
    }
}

impl<D: MessageDigest, K: KeyDerivation, C: SymmetricCipher> SignatureContext<D, K, C> {
    /// Sign with a nonce drawn from the OS random source.
    pub fn sign(&self, message: &[u8], private_key: &BigUint) -> Result<Signature> {
        self.sign_with_rng(message, private_key, &mut OsRng)
    }

    /// `r = (k·G).x mod n`, `s = (h + r·d) / k` for a fresh nonce `k`.
    ///
    /// Reusing `k` for two messages under the same key reveals the key, so every call draws
    /// a new one. Nonces giving `r = 0` or `s = 0` are discarded.
    pub fn sign_with_rng<R: TryRngCore + ?Sized>(
        &self,
        message: &[u8],
        private_key: &BigUint,
        rng: &mut R,
    ) -> Result<Signature> {
        let d = self.private_scalar(private_key)?;
        let h = self.hash_to_field(message);
        if d.is_zero() && h.is_zero() {
            // s = h / k would be zero for every nonce
            return Err(Error::UnsupportedOperation(
                "the zero key cannot sign a message hashing to zero",
            ));
        }
        loop {
            let k = self.ephemeral_scalar(rng)?;
            let nonce_point = self.generator().multiply(&k)?;

            let r = self.scalar_field().reduce(nonce_point.x().value().clone());
            if r.is_zero() {
                log::debug!("nonce gave r = 0, drawing another");
                continue;
            }

            let k = self.scalar_field().reduce(k);
            let s = h.add(&r.mul(&d)?)?.div(&k)?;
            if s.is_zero() {
                log::debug!("nonce gave s = 0, drawing another");
                continue;
            }
            return Ok(Signature { r, s });
        }
    }

    /// Never errors: malformed signatures, `r = 0`, `s = 0` and keys from another curve
    /// all verify as `false`.
    pub fn verify(&self, message: &[u8], signature: &Signature, public_key: &CurvePoint) -> bool {
        match self.check_signature(message, signature, public_key) {
            Ok(valid) => {
                if !valid {
                    log::debug!("signature does not match message and key");
                }
                valid
            }
            Err(e) => {
                log::debug!("rejecting malformed signature: {e}");
                false
            }
        }
    }

    #[allow(non_snake_case)]
    fn check_signature(
        &self,
        message: &[u8],
        signature: &Signature,
        public_key: &CurvePoint,
    ) -> Result<bool> {
        self.check_point(public_key)?;
        let Signature { r, s } = signature;
        if r.is_zero() {
            return Ok(false);
        }

        let h = self.hash_to_field(message);
        let w = s.invert()?;
        let u = w.mul(&h)?;
        let v = w.mul(r)?;

        let Q = self
            .generator()
            .multiply(u.value())?
            .add(&public_key.multiply(v.value())?)?;
        if Q.is_infinity() {
            return Ok(false);
        }
        Ok(&self.scalar_field().reduce(Q.x().value().clone()) == r)
    }
}
