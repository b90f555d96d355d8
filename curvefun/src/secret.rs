//! Private keys: scalars in `[1, n−1]` and their generation.

use crate::{
    curve::Curve,
    hex,
    point::{Point, PointError},
};
use core::fmt;
use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, Zero};
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

/// Error from creating a private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The supplied hex did not parse as a non-negative integer.
    InvalidHex,
    /// The scalar is outside `[1, n−1]`.
    OutOfRange,
    /// The operating system's random source is unavailable or reported
    /// itself as non-cryptographic.
    WeakRandomSource,
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeyError::InvalidHex => write!(f, "private key is not valid hex"),
            KeyError::OutOfRange => write!(f, "private key is not in the [1, n-1] range"),
            KeyError::WeakRandomSource => {
                write!(f, "the system is unable to produce cryptographic randomness")
            }
        }
    }
}

impl std::error::Error for KeyError {}

/// Distinguishes keys generated in the same nanosecond on the same machine.
static GENERATION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A secp256k1 private key: a scalar `k` with `1 ≤ k ≤ n−1`.
///
/// The scalar is immutable once set. The corresponding public-key point is
/// recomputed from `k·G` on every call to [`public_point`] rather than
/// cached.
///
/// ```
/// use curvefun::PrivateKey;
/// let key = PrivateKey::generate().unwrap();
/// let point = key.public_point().unwrap();
/// assert!(curvefun::Curve::secp256k1().is_on_curve(&point));
/// ```
///
/// [`public_point`]: Self::public_point
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    k: BigInt,
}

impl PrivateKey {
    /// Generates a fresh random private key from the operating system's
    /// CSPRNG.
    ///
    /// Equivalent to [`generate_with_entropy`] with no extra seed material.
    ///
    /// [`generate_with_entropy`]: Self::generate_with_entropy
    pub fn generate() -> Result<Self, KeyError> {
        Self::generate_with_entropy(&[])
    }

    /// Generates a fresh random private key, mixing caller-supplied seed
    /// material (keyboard noise, mouse movements, …) into the derivation.
    ///
    /// The scalar is SHA-256 of OS randomness, the wall clock, a process-wide
    /// counter and `extra`, resampled until it lands in `[1, n−1]`. Since `n`
    /// is within one bit of `2²⁵⁶` the loop terminates almost immediately.
    ///
    /// Fails with [`KeyError::WeakRandomSource`] when the OS random source
    /// cannot be read.
    pub fn generate_with_entropy(extra: &[u8]) -> Result<Self, KeyError> {
        let curve = Curve::secp256k1();
        let max = &curve.n - BigInt::one();

        loop {
            let mut random = [0u8; 256];
            OsRng
                .try_fill_bytes(&mut random)
                .map_err(|_| KeyError::WeakRandomSource)?;
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0);
            let counter = GENERATION_COUNTER.fetch_add(1, Ordering::Relaxed);

            let digest = Sha256::new()
                .chain_update(random)
                .chain_update(nanos.to_be_bytes())
                .chain_update(counter.to_be_bytes())
                .chain_update(extra)
                .finalize();

            let k = BigInt::from_bytes_be(Sign::Plus, &digest);
            if !k.is_zero() && k <= max {
                return Ok(PrivateKey { k });
            }
        }
    }

    /// Validates an externally supplied hex scalar as a private key.
    ///
    /// Fails with [`KeyError::OutOfRange`] unless `1 ≤ k ≤ n−1`.
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let k = BigInt::parse_bytes(hex.as_bytes(), 16).ok_or(KeyError::InvalidHex)?;
        if k.is_negative() {
            return Err(KeyError::InvalidHex);
        }
        Self::from_scalar(k)
    }

    /// Validates a scalar as a private key.
    pub fn from_scalar(k: BigInt) -> Result<Self, KeyError> {
        let curve = Curve::secp256k1();
        if k.is_zero() || k.is_negative() || k > &curve.n - BigInt::one() {
            return Err(KeyError::OutOfRange);
        }
        Ok(PrivateKey { k })
    }

    /// The scalar itself.
    pub fn secret_scalar(&self) -> &BigInt {
        &self.k
    }

    /// The scalar as 64 zero-padded hex digits.
    pub fn to_hex(&self) -> String {
        hex::pad64(&self.k.to_str_radix(16))
    }

    /// The public-key point `k·G`.
    pub fn public_point(&self) -> Result<Point, PointError> {
        let curve = Curve::secp256k1();
        curve.mul(&self.k, &curve.g)
    }
}

// Keep the scalar out of debug output.
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PrivateKey(<secret>)")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::curve::Curve;

    #[test]
    fn scalar_one_yields_the_base_point() {
        let key = PrivateKey::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        let point = key.public_point().unwrap();
        assert_eq!(point, Curve::secp256k1().g);
    }

    #[test]
    fn range_validation() {
        let curve = Curve::secp256k1();
        assert_eq!(PrivateKey::from_hex("00"), Err(KeyError::OutOfRange));
        assert_eq!(
            PrivateKey::from_scalar(curve.n.clone()),
            Err(KeyError::OutOfRange)
        );
        assert!(PrivateKey::from_scalar(&curve.n - BigInt::one()).is_ok());
        assert_eq!(PrivateKey::from_hex("zz"), Err(KeyError::InvalidHex));
    }

    #[test]
    fn to_hex_is_zero_padded() {
        let key = PrivateKey::from_hex("01").unwrap();
        assert_eq!(key.to_hex().len(), 64);
        assert!(key.to_hex().ends_with('1'));
    }

    #[test]
    fn generated_keys_are_in_range_and_distinct() {
        let curve = Curve::secp256k1();
        let a = PrivateKey::generate().unwrap();
        let b = PrivateKey::generate_with_entropy(b"extra entropy").unwrap();
        for key in [&a, &b] {
            assert!(key.secret_scalar() > &BigInt::zero());
            assert!(key.secret_scalar() < &curve.n);
        }
        assert_ne!(a, b);
    }
}
