use std::{collections::HashSet, fmt, ops::Neg};

use num_bigint::BigUint;
use num_traits::Zero;

use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::field_element::FieldElement;

/// A point on a [`Curve`], or the point at infinity.
///
/// Finite points are validated once when built through [`Curve::point_of`]; every group
/// operation produces a fresh, re-validated point.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CurvePoint {
    x: FieldElement,
    y: FieldElement,
    infinite: bool,
    curve: Curve,
}

impl CurvePoint {
    pub(crate) fn from_parts(
        x: FieldElement,
        y: FieldElement,
        curve: Curve,
        infinite: bool,
    ) -> Self {
        Self {
            x,
            y,
            infinite,
            curve,
        }
    }

    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Check if the point is at infinity.
    pub fn is_infinity(&self) -> bool {
        self.infinite
    }

    fn same_curve(&self, other: &Self) -> Result<()> {
        if self.curve != other.curve {
            return Err(Error::CurveMismatch);
        }
        Ok(())
    }

    /// Chord-and-tangent addition.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.same_curve(other)?;
        if self.infinite {
            return Ok(other.clone());
        }
        if other.infinite {
            return Ok(self.clone());
        }

        let (p, q) = (self, other);

        // Vertical line: q is the inverse of p (also covers doubling a point with y = 0)
        if p.x == q.x && p.y == -&q.y {
            return Ok(self.curve.infinity());
        }

        let m = if p == q {
            // tangent slope (3·x² + a) / (2·y)
            p.x.square()
                .times(3)
                .add(self.curve.a())?
                .div(&p.y.times(2))?
        } else {
            // chord slope (y2 - y1) / (x2 - x1)
            q.y.sub(&p.y)?.div(&q.x.sub(&p.x)?)?
        };

        let x = m.square().sub(&p.x)?.sub(&q.x)?;
        let y = m.mul(&p.x.sub(&x)?)?.sub(&p.y)?;
        self.curve.point_of_elements(x, y)
    }

    /// Point doubling: P + P
    pub fn double(&self) -> Result<Self> {
        self.add(self)
    }

    pub fn negate(&self) -> Self {
        if self.infinite {
            return self.clone();
        }
        Self {
            x: self.x.clone(),
            y: -&self.y,
            infinite: false,
            curve: self.curve.clone(),
        }
    }

    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.add(&other.negate())
    }

    /// Scalar multiplication by double-and-add over the big-endian bits of `k`.
    ///
    /// Not constant time: the sequence of doublings and additions leaks the bits of `k`.
    /// Errors only surface over non-prime moduli, where a slope denominator may have no
    /// inverse.
    pub fn multiply(&self, k: &BigUint) -> Result<Self> {
        if k.is_zero() {
            return Ok(self.curve.infinity());
        }
        // the most significant bit is consumed by starting from `self`
        let mut value = self.clone();
        for i in (0..k.bits() - 1).rev() {
            value = value.double()?;
            if k.bit(i) {
                value = value.add(self)?;
            }
        }
        Ok(value)
    }

    /// The cyclic subgroup generated by this point: `P, 2P, 3P, …` up to and including
    /// infinity, each point exactly once. Calling it again restarts the walk.
    pub fn subgroup(&self) -> Subgroup {
        Subgroup {
            base: self.clone(),
            next: Some(Ok(self.clone())),
            seen: HashSet::new(),
        }
    }
}

impl Neg for CurvePoint {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl Neg for &CurvePoint {
    type Output = CurvePoint;
    fn neg(self) -> CurvePoint {
        self.negate()
    }
}

impl fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.infinite {
            return write!(f, "(inf)");
        }
        write!(f, "({},{})", self.x.value(), self.y.value())
    }
}

/// Iterator behind [`CurvePoint::subgroup`]. Stops as soon as a multiple repeats.
#[derive(Clone, Debug)]
pub struct Subgroup {
    base: CurvePoint,
    next: Option<Result<CurvePoint>>,
    seen: HashSet<CurvePoint>,
}

impl Iterator for Subgroup {
    type Item = Result<CurvePoint>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = match self.next.take()? {
            Ok(point) => point,
            Err(e) => return Some(Err(e)),
        };
        if !self.seen.insert(current.clone()) {
            log::trace!("subgroup of {} closed after {} points", self.base, self.seen.len());
            return None;
        }
        if !self.base.is_infinity() {
            self.next = Some(current.add(&self.base));
        }
        Some(Ok(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    fn curve223() -> Curve {
        // y² = x³ + 7 over F₂₂₃
        Curve::from_ints(Field::from_u64(223).unwrap(), 0, 7).unwrap()
    }

    fn curve191() -> Curve {
        Curve::from_ints(Field::from_u64(191).unwrap(), -4, 0).unwrap()
    }

    #[test]
    fn test_add() {
        let ec = curve223();
        let additions = vec![
            // (x1, y1, x2, y2, x3, y3)
            (192, 105, 17, 56, 170, 142),
            (47, 71, 117, 141, 60, 139),
            (143, 98, 76, 66, 47, 71),
        ];
        for (x1, y1, x2, y2, x3, y3) in additions {
            let a = ec.point_of(x1, y1).unwrap();
            let b = ec.point_of(x2, y2).unwrap();
            let c = ec.point_of(x3, y3).unwrap();
            assert_eq!(a.add(&b).unwrap(), c);
        }
    }

    #[test]
    fn test_addition_191() {
        let ec = curve191();
        let p = ec.point_of(2, 0).unwrap();
        let q = ec.point_of(3, 46).unwrap();
        assert_eq!(p.add(&q).unwrap(), ec.point_of(10, 14).unwrap());

        let p = ec.point_of(3, 46).unwrap();
        let q = ec.point_of(3, 145).unwrap();
        assert_eq!(p.add(&q).unwrap(), ec.infinity());
    }

    #[test]
    fn test_doubling_two_torsion_point() {
        let ec = curve191();
        let p = ec.point_of(2, 0).unwrap();
        assert_eq!(p.double().unwrap(), ec.infinity());
    }

    #[test]
    fn test_identity() {
        let ec = curve223();
        let p = ec.point_of(47, 71).unwrap();
        let inf = ec.infinity();
        assert_eq!(p.add(&inf).unwrap(), p);
        assert_eq!(inf.add(&p).unwrap(), p);
        assert_eq!(inf.add(&inf).unwrap(), inf);
        assert_eq!(-&inf, inf);
    }

    #[test]
    fn test_commutative_and_associative() {
        let ec = curve223();
        let p = ec.point_of(192, 105).unwrap();
        let q = ec.point_of(17, 56).unwrap();
        let r = ec.point_of(47, 71).unwrap();
        assert_eq!(p.add(&q).unwrap(), q.add(&p).unwrap());
        assert_eq!(
            p.add(&q).unwrap().add(&r).unwrap(),
            p.add(&q.add(&r).unwrap()).unwrap()
        );
    }

    #[test]
    fn test_multiplication_matches_repeated_addition() {
        let ec = curve191();
        let q = ec.point_of(3, 46).unwrap();
        let mut expected = q.clone();
        for k in 2u32..=7 {
            expected = expected.add(&q).unwrap();
            assert_eq!(q.multiply(&BigUint::from(k)).unwrap(), expected, "k = {k}");
        }
        assert_eq!(
            q.multiply(&BigUint::from(7u8)).unwrap(),
            ec.point_of(160, 112).unwrap()
        );
    }

    #[test]
    fn test_scalar_mul() {
        let ec = curve223();
        let multiplications: Vec<(u8, i64, i64, i64, i64)> = vec![
            // (coefficient, x1, y1, x2, y2)
            (2, 192, 105, 49, 71),
            (2, 143, 98, 64, 168),
            (2, 47, 71, 36, 111),
            (4, 47, 71, 194, 51),
            (8, 47, 71, 116, 55),
        ];
        for (c, x1, y1, x2, y2) in multiplications {
            let a = ec.point_of(x1, y1).unwrap();
            let b = ec.point_of(x2, y2).unwrap();
            assert_eq!(a.multiply(&BigUint::from(c)).unwrap(), b);
        }
        let a = ec.point_of(47, 71).unwrap();
        assert_eq!(a.multiply(&BigUint::from(21u8)).unwrap(), ec.infinity());
        assert_eq!(a.multiply(&BigUint::zero()).unwrap(), ec.infinity());
        assert_eq!(a.multiply(&BigUint::from(1u8)).unwrap(), a);
    }

    #[test]
    fn test_neg() {
        let ec = curve223();
        let a = ec.point_of(47, 71).unwrap();
        let neg_a = ec.point_of(47, 223 - 71).unwrap();
        assert_eq!(-&a, neg_a);
        assert_eq!(a.add(&neg_a).unwrap(), ec.infinity());
        assert_eq!(a.sub(&a).unwrap(), ec.infinity());
    }

    #[test]
    fn test_inverse_pairs_sum_to_infinity() {
        let ec = Curve::from_ints(Field::from_u64(17).unwrap(), 0, 7).unwrap();
        for p in ec.all_points().unwrap() {
            assert_eq!(p.add(&-&p).unwrap(), ec.infinity(), "{p}");
        }
    }

    #[test]
    fn test_points_of_different_curves_do_not_mix() {
        let p = curve223().point_of(47, 71).unwrap();
        let other = Curve::from_ints(Field::from_u64(223).unwrap(), 1, 1).unwrap();
        assert_eq!(p.add(&other.infinity()), Err(Error::CurveMismatch));
    }

    #[test]
    fn test_subgroup() {
        let ec = curve223();
        let p = ec.point_of(47, 71).unwrap();
        let group: Vec<_> = p.subgroup().collect::<Result<_>>().unwrap();
        assert_eq!(group.len(), 21);
        assert_eq!(group[0], p);
        assert_eq!(group[1], ec.point_of(36, 111).unwrap());
        assert_eq!(group[20], ec.infinity());
        let distinct: HashSet<_> = group.iter().collect();
        assert_eq!(distinct.len(), 21);

        // restartable
        assert_eq!(p.subgroup().count(), 21);
        assert_eq!(ec.infinity().subgroup().count(), 1);
    }

    #[test]
    fn test_display() {
        let ec = curve223();
        assert_eq!(ec.point_of(47, 71).unwrap().to_string(), "(47,71)");
    }
}
