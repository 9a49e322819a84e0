use std::fmt;
use std::ops::Neg;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};
use crate::field::Field;

/// An element of a [`Field`], always normalized into `[0, modulus)`.
///
/// Elements carry their field. Every binary operation checks that both operands share a
/// field and fails with [`Error::FieldMismatch`] otherwise; equality across fields is
/// simply `false`. Ordering is by value first, then by field.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldElement {
    value: BigUint,
    field: Field,
}

impl FieldElement {
    /// `value` must already be reduced; use [`Field::gen`] or [`Field::reduce`] otherwise.
    pub(crate) fn from_parts(value: BigUint, field: Field) -> Self {
        debug_assert!(&value < field.modulus());
        Self { value, field }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn same_field(&self, other: &Self) -> Result<()> {
        if self.field != other.field {
            return Err(Error::FieldMismatch {
                left: self.field.modulus().clone(),
                right: other.field.modulus().clone(),
            });
        }
        Ok(())
    }

    fn not_invertible(&self) -> Error {
        Error::NotInvertible {
            value: self.value.clone(),
            modulus: self.field.modulus().clone(),
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.same_field(other)?;
        Ok(self.field.reduce(&self.value + &other.value))
    }

    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.same_field(other)?;
        Ok(self
            .field
            .reduce(&self.value + self.field.modulus() - &other.value))
    }

    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.same_field(other)?;
        Ok(self.field.reduce(&self.value * &other.value))
    }

    /// Multiply by a small integer constant, as in `2·y` or `3·x²`.
    pub fn times(&self, k: u32) -> Self {
        self.field.reduce(&self.value * k)
    }

    /// True division: `self · other⁻¹`.
    pub fn div(&self, other: &Self) -> Result<Self> {
        self.same_field(other)?;
        self.mul(&other.invert()?)
    }

    /// Integer floor division of the underlying values. This is not the field inverse.
    pub fn floor_div(&self, other: &Self) -> Result<Self> {
        self.same_field(other)?;
        if other.is_zero() {
            return Err(other.not_invertible());
        }
        Ok(self.field.reduce(self.value.div_floor(&other.value)))
    }

    pub fn pow(&self, exponent: &BigUint) -> Self {
        Self::from_parts(
            self.value.modpow(exponent, self.field.modulus()),
            self.field.clone(),
        )
    }

    /// Three-argument power. The modulus is fixed by the field, so an override is rejected.
    pub fn pow_mod(&self, exponent: &BigUint, modulus: Option<&BigUint>) -> Result<Self> {
        if modulus.is_some() {
            return Err(Error::UnsupportedOperation(
                "cannot specify a modulus for a field element power",
            ));
        }
        Ok(self.pow(exponent))
    }

    pub fn square(&self) -> Self {
        self.field.reduce(&self.value * &self.value)
    }

    pub fn neg(&self) -> Self {
        if self.value.is_zero() {
            return self.clone();
        }
        Self::from_parts(self.field.modulus() - &self.value, self.field.clone())
    }

    /// Multiplicative inverse via the extended Euclidean algorithm, carried out on field
    /// elements so the Bézout coefficient `t` stays normalized throughout.
    pub fn invert(&self) -> Result<Self> {
        if self.value.is_zero() {
            return Err(self.not_invertible());
        }
        let zero = self.field.zero();
        let q = self.field.reduce(self.field.modulus() / &self.value);

        let mut t = self.field.one();
        let mut new_t = zero.sub(&q)?;
        let mut r = self.clone();
        let mut new_r = zero.sub(&q.mul(self)?)?;

        while !new_r.is_zero() {
            let q = r.floor_div(&new_r)?;

            let next_t = t.sub(&q.mul(&new_t)?)?;
            t = std::mem::replace(&mut new_t, next_t);

            let next_r = r.sub(&q.mul(&new_r)?)?;
            r = std::mem::replace(&mut new_r, next_r);
        }

        // r is gcd(modulus, value)
        if r.value > BigUint::one() {
            return Err(self.not_invertible());
        }
        Ok(t)
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self::Output {
        FieldElement::neg(&self)
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> Self::Output {
        FieldElement::neg(self)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}mod{}", self.value, self.field.modulus())
    }
}
