//! A mid-level secp256k1 library built on an arbitrary-precision integer
//! engine.
//!
//! `curvefun` provides the curve-level building blocks for Bitcoin-family
//! cryptocurrencies: the fixed secp256k1 domain parameters, affine point
//! arithmetic, private keys and the public-key point codec. Higher-level
//! signature and wallet functionality live in the `sigfun` and `walletfun`
//! crates which are built on top of this one.
//!
//! Field elements and scalars are [`BigInt`]s reduced modulo the relevant
//! modulus before they are stored, so every value you can get your hands on
//! is already normalized. The point at infinity is deliberately *not*
//! representable; operations whose true result is the identity element fail
//! with [`PointError::AtInfinity`] instead.
//!
//! ```
//! use curvefun::{Curve, PrivateKey};
//!
//! let curve = Curve::secp256k1();
//! let key = PrivateKey::from_hex(
//!     "0000000000000000000000000000000000000000000000000000000000000001",
//! )
//! .unwrap();
//! // The public key of the scalar 1 is the base point itself.
//! assert_eq!(key.public_point().unwrap(), curve.g);
//! ```
//!
//! [`BigInt`]: num_bigint::BigInt
//! [`PointError::AtInfinity`]: crate::point::PointError::AtInfinity

pub mod curve;
pub mod hex;
pub mod op;
pub mod point;
pub mod pubkey;
pub mod secret;

pub use curve::{Curve, SECP256K1};
pub use point::{Parity, Point, PointError};
pub use secret::{KeyError, PrivateKey};

pub use num_bigint;
pub use rand_core;
