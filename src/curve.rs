use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;

use crate::error::{Error, Result};
use crate::field::Field;
use crate::field_element::FieldElement;
use crate::point::CurvePoint;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Weierstrass {
    field: Field,
    a: FieldElement,
    b: FieldElement,
}

/// A short Weierstrass curve `y² = x³ + a·x + b` over a [`Field`].
///
/// Cheap to clone; every point holds a handle to its curve.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Curve {
    inner: Arc<Weierstrass>,
}

impl Curve {
    pub fn new(field: Field, a: FieldElement, b: FieldElement) -> Result<Self> {
        for coefficient in [&a, &b] {
            if coefficient.field() != &field {
                return Err(Error::FieldMismatch {
                    left: field.modulus().clone(),
                    right: coefficient.field().modulus().clone(),
                });
            }
        }
        Ok(Self {
            inner: Arc::new(Weierstrass { field, a, b }),
        })
    }

    /// Coefficients given as plain integers are reduced into the field, so `a = -4` works.
    pub fn from_ints(field: Field, a: impl Into<BigInt>, b: impl Into<BigInt>) -> Result<Self> {
        let a = field.gen(a, false)?;
        let b = field.gen(b, false)?;
        Self::new(field, a, b)
    }

    pub fn field(&self) -> &Field {
        &self.inner.field
    }

    pub fn a(&self) -> &FieldElement {
        &self.inner.a
    }

    pub fn b(&self) -> &FieldElement {
        &self.inner.b
    }

    /// Right-hand side of the curve equation, `x³ + a·x + b`.
    pub fn rhs(&self, x: &FieldElement) -> Result<FieldElement> {
        x.square().mul(x)?.add(&self.a().mul(x)?)?.add(self.b())
    }

    pub fn contains(&self, x: &FieldElement, y: &FieldElement) -> Result<bool> {
        Ok(y.square() == self.rhs(x)?)
    }

    /// Validated point from integer coordinates, reduced into the field.
    pub fn point_of(&self, x: impl Into<BigInt>, y: impl Into<BigInt>) -> Result<CurvePoint> {
        let x = self.field().gen(x, false)?;
        let y = self.field().gen(y, false)?;
        self.point_of_elements(x, y)
    }

    /// Validated point from coordinates already in the curve's field.
    pub fn point_of_elements(&self, x: FieldElement, y: FieldElement) -> Result<CurvePoint> {
        if !self.contains(&x, &y)? {
            return Err(Error::NotOnCurve {
                x: x.value().clone(),
                y: y.value().clone(),
            });
        }
        Ok(CurvePoint::from_parts(x, y, self.clone(), false))
    }

    /// The group identity. By convention its coordinates are `(0, 0)`.
    pub fn infinity(&self) -> CurvePoint {
        let zero = self.field().zero();
        CurvePoint::from_parts(zero.clone(), zero, self.clone(), true)
    }

    /// Every point of the curve, infinity included, in sorted order.
    ///
    /// Walks the whole field and builds its quadratic-residue table, so this is meant for
    /// exploring toy curves, never for cryptographic sizes.
    pub fn all_points(&self) -> Result<BTreeSet<CurvePoint>> {
        let residues = self.field().quadratic_residues();
        let mut points = BTreeSet::from([self.infinity()]);
        for x in self.field().elements() {
            let y_sqr = self.rhs(&x)?;
            if let Some(ys) = residues.get(&y_sqr) {
                for y in ys {
                    points.insert(CurvePoint::from_parts(
                        x.clone(),
                        y.clone(),
                        self.clone(),
                        false,
                    ));
                }
            }
        }
        Ok(points)
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "y^2 = x^3 + {}x + {} over {}",
            self.a().value(),
            self.b().value(),
            self.field()
        )
    }
}
