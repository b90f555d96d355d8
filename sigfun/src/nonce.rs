//! Per-signature nonce generation.
//!
//! ECDSA leaks the private key if a nonce is ever biased or reused, so the
//! only built-in source is the operating system's CSPRNG, stretched through
//! SHA-256 together with the wall clock and reduced mod `n`. Callers who
//! need reproducible signatures (tests, cross-implementation vectors) pass
//! an explicit nonce to [`sign`] instead.
//!
//! [`sign`]: crate::sign

use crate::SignatureError;
use curvefun::Curve;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::Zero;
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// A fresh random nonce in `[1, n−1]`.
///
/// Fails with [`SignatureError::WeakRandomSource`] when the OS random source
/// cannot be read.
pub fn random_nonce() -> Result<BigInt, SignatureError> {
    let curve = Curve::secp256k1();
    loop {
        let mut random = [0u8; 256];
        OsRng
            .try_fill_bytes(&mut random)
            .map_err(|_| SignatureError::WeakRandomSource)?;
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);

        let digest = Sha256::new()
            .chain_update(random)
            .chain_update(nanos.to_be_bytes())
            .finalize();

        let nonce = BigInt::from_bytes_be(Sign::Plus, &digest).mod_floor(&curve.n);
        if !nonce.is_zero() {
            return Ok(nonce);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nonces_are_in_range_and_distinct() {
        let curve = Curve::secp256k1();
        let a = random_nonce().unwrap();
        let b = random_nonce().unwrap();
        assert!(!a.is_zero() && a < curve.n);
        assert!(!b.is_zero() && b < curve.n);
        assert_ne!(a, b);
    }
}
