use num_bigint::BigUint;
use num_traits::One;
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::aead::{ChaCha20Poly1305, SymmetricCipher};
use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::field::Field;
use crate::field_element::FieldElement;
use crate::hash::{MessageDigest, Sha256Digest};
use crate::kdf::{ConcatKdf, KeyDerivation};
use crate::point::CurvePoint;

/// Domain parameters shared by signing, verification and hybrid encryption: a curve, a
/// generator and the order of the subgroup it generates.
///
/// The order must be prime for signatures to work; it is used as the modulus of the scalar
/// field that messages are hashed into and signatures live in. The digest, KDF and cipher
/// are pluggable; [`SignatureContext::new`] picks SHA-256, the SHA-256 concatenation KDF
/// and ChaCha20-Poly1305.
///
/// Immutable once built, so a single context can be shared between threads.
#[derive(Clone, Debug)]
pub struct SignatureContext<D = Sha256Digest, K = ConcatKdf, C = ChaCha20Poly1305> {
    curve: Curve,
    generator: CurvePoint,
    order: BigUint,
    scalar_field: Field,
    pub(crate) digest: D,
    pub(crate) kdf: K,
    pub(crate) cipher: C,
}

/// A private scalar together with `generator * private_key`.
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub private_key: BigUint,
    pub public_key: CurvePoint,
}

impl SignatureContext {
    pub fn new(curve: Curve, order: BigUint, generator: CurvePoint) -> Result<Self> {
        Self::with_primitives(
            curve,
            order,
            generator,
            Sha256Digest,
            ConcatKdf::default(),
            ChaCha20Poly1305::new(),
        )
    }
}

impl<D: MessageDigest, K: KeyDerivation, C: SymmetricCipher> SignatureContext<D, K, C> {
    /// Checks that the generator lies on `curve`, is not the identity, and that
    /// `generator * order` is the identity.
    pub fn with_primitives(
        curve: Curve,
        order: BigUint,
        generator: CurvePoint,
        digest: D,
        kdf: K,
        cipher: C,
    ) -> Result<Self> {
        if generator.curve() != &curve {
            return Err(Error::CurveMismatch);
        }
        if generator.is_infinity() {
            return Err(Error::InvalidParameters(
                "generator is the point at infinity".into(),
            ));
        }
        let scalar_field = Field::new(order.clone()).map_err(|_| {
            Error::InvalidParameters(format!("group order {order} must be greater than one"))
        })?;
        if !generator.multiply(&order)?.is_infinity() {
            return Err(Error::InvalidParameters(format!(
                "generator {generator} does not have order {order}"
            )));
        }
        Ok(Self {
            curve,
            generator,
            order,
            scalar_field,
            digest,
            kdf,
            cipher,
        })
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn generator(&self) -> &CurvePoint {
        &self.generator
    }

    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// The field of integers modulo the group order.
    pub fn scalar_field(&self) -> &Field {
        &self.scalar_field
    }

    /// Uniformly random private key in `[0, order)`, drawn from the OS.
    pub fn generate_private_key(&self) -> Result<BigUint> {
        self.generate_private_key_with_rng(&mut OsRng)
    }

    pub fn generate_private_key_with_rng<R: TryRngCore + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<BigUint> {
        random_below(rng, &BigUint::ZERO, &self.order)
    }

    /// Random one-time scalar in `[1, order)` for nonces and ephemeral keys.
    pub(crate) fn ephemeral_scalar<R: TryRngCore + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<BigUint> {
        random_below(rng, &BigUint::one(), &self.order)
    }

    pub fn derive_public_key(&self, private_key: &BigUint) -> Result<CurvePoint> {
        let private_key = self.private_scalar(private_key)?;
        self.generator.multiply(private_key.value())
    }

    pub fn generate_key_pair(&self) -> Result<KeyPair> {
        self.generate_key_pair_with_rng(&mut OsRng)
    }

    pub fn generate_key_pair_with_rng<R: TryRngCore + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<KeyPair> {
        let private_key = self.generate_private_key_with_rng(rng)?;
        let public_key = self.derive_public_key(&private_key)?;
        Ok(KeyPair {
            private_key,
            public_key,
        })
    }

    /// Number of digest bytes needed to cover the group order: `ceil(log2(order) / 8)`.
    pub fn digest_len(&self) -> usize {
        let bits = (&self.order - 1u8).bits();
        bits.div_ceil(8) as usize
    }

    /// Hash a message into the scalar field, reading the digest as a big-endian integer.
    pub fn hash_to_field(&self, message: &[u8]) -> FieldElement {
        let digest = self.digest.digest(message, self.digest_len());
        self.scalar_field.reduce(BigUint::from_bytes_be(&digest))
    }

    /// Private keys must already lie in `[0, order)`.
    pub(crate) fn private_scalar(&self, private_key: &BigUint) -> Result<FieldElement> {
        self.scalar_field.gen(private_key.clone(), true)
    }

    pub(crate) fn check_point(&self, point: &CurvePoint) -> Result<()> {
        if point.curve() != &self.curve {
            return Err(Error::CurveMismatch);
        }
        Ok(())
    }
}

/// Rejection-sample an integer in `[lower, bound)`.
fn random_below<R: TryRngCore + ?Sized>(
    rng: &mut R,
    lower: &BigUint,
    bound: &BigUint,
) -> Result<BigUint> {
    let bits = bound.bits();
    let mut bytes = vec![0u8; bits.div_ceil(8) as usize];
    // clear the bits above the bound's top bit so each draw succeeds with probability > 1/2
    let mask = 0xffu8 >> (bytes.len() as u64 * 8 - bits);
    loop {
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| Error::Randomness(e.to_string()))?;
        bytes[0] &= mask;
        let candidate = BigUint::from_bytes_be(&bytes);
        if &candidate >= lower && &candidate < bound {
            return Ok(candidate);
        }
    }
}
