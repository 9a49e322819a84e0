use num_bigint::{BigInt, BigUint};

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid modulus {0}: a field needs a modulus greater than one")]
    InvalidModulus(BigUint),

    #[error("{value} is an invalid element of the field of size {modulus}")]
    InvalidElement { value: BigInt, modulus: BigUint },

    #[error("cannot combine elements of different fields: {left} and {right}")]
    FieldMismatch { left: BigUint, right: BigUint },

    #[error("cannot combine points of different curves")]
    CurveMismatch,

    #[error("({x},{y}) is not a point on the curve")]
    NotOnCurve { x: BigUint, y: BigUint },

    #[error("{value} has no inverse modulo {modulus}")]
    NotInvertible { value: BigUint, modulus: BigUint },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error("invalid curve parameters: {0}")]
    InvalidParameters(String),

    #[error("random source failure: {0}")]
    Randomness(String),

    #[error("symmetric encryption failed")]
    EncryptionFailed,

    #[error("decryption failed: authentication error or wrong key")]
    DecryptionFailed,
}

pub type Result<T> = std::result::Result<T, Error>;
