//! Prime-field arithmetic, short Weierstrass curve groups, and ECDSA / ECIES-style
//! protocols built on them, written out from first principles.
//!
//! **For demonstration and education only.** Nothing here runs in constant time, nothing
//! resists side channels, and keys are never protected in memory. Use a vetted library
//! for anything that matters.
//!
//! Layers, leaves first: [`field`] and [`field_element`] (modular arithmetic),
//! [`curve`] and [`point`] (the group law), and [`SignatureContext`] (keys, signatures
//! and hybrid encryption, with pluggable [`hash`], [`kdf`] and [`aead`] primitives).

pub mod aead;
pub mod context;
pub mod curve;
pub mod ecdsa;
pub mod ecies;
pub mod error;
pub mod field;
pub mod field_element;
pub mod hash;
pub mod kdf;
pub mod params;
pub mod point;
pub mod secp256k1;

pub use context::{KeyPair, SignatureContext};
pub use curve::Curve;
pub use ecdsa::Signature;
pub use ecies::EncryptedMessage;
pub use error::{Error, Result};
pub use field::Field;
pub use field_element::FieldElement;
pub use params::CurveParams;
pub use point::CurvePoint;
