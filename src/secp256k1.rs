use crate::context::SignatureContext;
use crate::error::Result;
use crate::params::CurveParams;

/// secp256k1: `y² = x³ + 7` over F_p with p = 2^256 − 2^32 − 977.
pub const SECP256K1: CurveParams = CurveParams {
    name: "secp256k1",
    modulus: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
    a: "0",
    b: "7",
    gx: "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
    gy: "483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8",
    order: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
};

pub fn context() -> Result<SignatureContext> {
    SECP256K1.context()
}
