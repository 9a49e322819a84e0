use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};
use crate::field_element::FieldElement;

/// The ring of integers modulo `modulus`, a prime field F_p when the modulus is prime.
///
/// Two fields are equal iff their moduli are equal. The modulus is shared behind an `Arc`,
/// so cloning a field (and every element, which carries its field) is cheap.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Field {
    modulus: Arc<BigUint>,
}

impl Field {
    pub fn new(modulus: BigUint) -> Result<Self> {
        if modulus <= BigUint::one() {
            return Err(Error::InvalidModulus(modulus));
        }
        Ok(Self {
            modulus: Arc::new(modulus),
        })
    }

    pub fn from_u64(modulus: u64) -> Result<Self> {
        Self::new(BigUint::from(modulus))
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Build an element from any integer.
    ///
    /// Non-strict construction reduces `value` modulo the field size, so negative and
    /// oversized inputs are accepted. Strict construction requires `0 <= value < modulus`.
    pub fn gen(&self, value: impl Into<BigInt>, strict: bool) -> Result<FieldElement> {
        let value: BigInt = value.into();
        let modulus = BigInt::from_biguint(Sign::Plus, self.modulus().clone());
        if strict && (value.sign() == Sign::Minus || value >= modulus) {
            return Err(Error::InvalidElement {
                value,
                modulus: self.modulus().clone(),
            });
        }
        // mod_floor against a positive modulus is never negative
        let (_, reduced) = value.mod_floor(&modulus).into_parts();
        Ok(FieldElement::from_parts(reduced, self.clone()))
    }

    /// Reduce an unsigned value into the field.
    pub fn reduce(&self, value: BigUint) -> FieldElement {
        FieldElement::from_parts(value % self.modulus(), self.clone())
    }

    pub fn zero(&self) -> FieldElement {
        FieldElement::from_parts(BigUint::zero(), self.clone())
    }

    pub fn one(&self) -> FieldElement {
        FieldElement::from_parts(BigUint::one(), self.clone())
    }

    /// All elements in ascending order. Calling it again restarts the sequence.
    pub fn elements(&self) -> Elements {
        Elements {
            field: self.clone(),
            next: BigUint::zero(),
        }
    }

    /// Maps every square `v` to the ascending list of its roots.
    ///
    /// Squares each element once, so this is only usable for small moduli.
    pub fn quadratic_residues(&self) -> BTreeMap<FieldElement, Vec<FieldElement>> {
        let mut residues: BTreeMap<FieldElement, Vec<FieldElement>> = BTreeMap::new();
        for e in self.elements() {
            residues.entry(e.square()).or_default().push(e);
        }
        residues
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "F_{}", self.modulus)
    }
}

/// Lazy ascending walk over every element of a [`Field`].
#[derive(Clone, Debug)]
pub struct Elements {
    field: Field,
    next: BigUint,
}

impl Iterator for Elements {
    type Item = FieldElement;

    fn next(&mut self) -> Option<Self::Item> {
        if &self.next >= self.field.modulus() {
            return None;
        }
        let value = self.next.clone();
        self.next += 1u8;
        Some(FieldElement::from_parts(value, self.field.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.field.modulus() - &self.next;
        match usize::try_from(&remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
