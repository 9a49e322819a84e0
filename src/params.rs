use num_bigint::BigUint;

use crate::context::SignatureContext;
use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::field::Field;

/// Domain parameters as hex strings: curve `y² = x³ + a·x + b` over F_modulus, generator
/// `(gx, gy)` and the generator's order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveParams {
    pub name: &'static str,
    pub modulus: &'static str,
    pub a: &'static str,
    pub b: &'static str,
    pub gx: &'static str,
    pub gy: &'static str,
    pub order: &'static str,
}

impl CurveParams {
    pub fn curve(&self) -> Result<Curve> {
        let field = Field::new(parse_hex(self.name, "modulus", self.modulus)?)?;
        let a = parse_hex(self.name, "a", self.a)?;
        let b = parse_hex(self.name, "b", self.b)?;
        Curve::new(field.clone(), field.reduce(a), field.reduce(b))
    }

    /// Parse and validate every parameter, then build a context with the default primitives.
    pub fn context(&self) -> Result<SignatureContext> {
        let curve = self.curve()?;
        let gx = parse_hex(self.name, "gx", self.gx)?;
        let gy = parse_hex(self.name, "gy", self.gy)?;
        let generator = curve.point_of(gx, gy)?;
        let order = parse_hex(self.name, "order", self.order)?;
        SignatureContext::new(curve, order, generator)
    }
}

fn parse_hex(curve: &str, what: &str, hex: &str) -> Result<BigUint> {
    BigUint::parse_bytes(hex.as_bytes(), 16).ok_or_else(|| {
        Error::InvalidParameters(format!("{curve}: {what} is not a hex number: {hex:?}"))
    })
}
