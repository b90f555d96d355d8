//! Modular number theory over the arbitrary-precision integer engine.
//!
//! These are the handful of exact operations the curve arithmetic is built
//! from: modular inverse via the extended Euclidean algorithm, the Legendre
//! symbol, and the square root modulo a prime `p ≡ 3 (mod 4)`. Everything
//! here is a pure function of its inputs.

use core::fmt;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Error from a modular operation with no solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpError {
    /// The operand and modulus share a common factor, so no inverse exists.
    NotCoprime,
    /// The modulus is not `≡ 3 (mod 4)`; the square-root shortcut used here
    /// does not apply.
    UnsupportedModulus,
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OpError::NotCoprime => write!(f, "operand is not coprime with the modulus"),
            OpError::UnsupportedModulus => {
                write!(f, "square roots are only supported modulo p ≡ 3 (mod 4)")
            }
        }
    }
}

impl std::error::Error for OpError {}

/// The inverse of `a` modulo `m`, as a value in `[0, m)`.
///
/// Fails with [`OpError::NotCoprime`] when `gcd(a, m) ≠ 1`.
///
/// # Examples
/// ```
/// use curvefun::op::mod_inverse;
/// use num_bigint::BigInt;
/// let inv = mod_inverse(&BigInt::from(3), &BigInt::from(7)).unwrap();
/// assert_eq!(inv, BigInt::from(5));
/// ```
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> Result<BigInt, OpError> {
    let a = a.mod_floor(m);
    let ext = a.extended_gcd(m);
    if !ext.gcd.is_one() {
        return Err(OpError::NotCoprime);
    }
    Ok(ext.x.mod_floor(m))
}

/// The Legendre symbol `(a/p)`: `1` if `a` is a quadratic residue mod `p`,
/// `-1` if it is a non-residue, `0` if `p` divides `a`.
pub fn legendre_symbol(a: &BigInt, p: &BigInt) -> i8 {
    let exponent = (p - BigInt::one()) / BigInt::from(2);
    let symbol = a.mod_floor(p).modpow(&exponent, p);
    if symbol.is_zero() {
        0
    } else if symbol.is_one() {
        1
    } else {
        -1
    }
}

/// Both square roots of `a` modulo the prime `p`, or `None` when `a` is a
/// non-residue.
///
/// There are always two roots in a prime field: if `r² ≡ a` then
/// `(p−r)² ≡ a` as well. Only `p ≡ 3 (mod 4)` is supported (which holds for
/// the secp256k1 field prime), where `r = a^((p+1)/4) mod p`.
pub fn sqrt_mod_p(a: &BigInt, p: &BigInt) -> Result<Option<(BigInt, BigInt)>, OpError> {
    if legendre_symbol(a, p) != 1 {
        return Ok(None);
    }

    if (p % BigInt::from(4)) != BigInt::from(3) {
        return Err(OpError::UnsupportedModulus);
    }

    let exponent = (p + BigInt::one()) / BigInt::from(4);
    let root = a.mod_floor(p).modpow(&exponent, p);
    let other = (p - &root).mod_floor(p);
    Ok(Some((root, other)))
}

#[cfg(test)]
mod test {
    use super::*;

    fn int(v: i64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn mod_inverse_small() {
        assert_eq!(mod_inverse(&int(3), &int(7)).unwrap(), int(5));
        assert_eq!(mod_inverse(&int(2), &int(11)).unwrap(), int(6));
        // negative operands are reduced first
        assert_eq!(mod_inverse(&int(-4), &int(7)).unwrap(), int(5));
    }

    #[test]
    fn mod_inverse_not_coprime() {
        assert_eq!(mod_inverse(&int(4), &int(8)), Err(OpError::NotCoprime));
        assert_eq!(mod_inverse(&int(0), &int(7)), Err(OpError::NotCoprime));
    }

    #[test]
    fn legendre() {
        // 4 = 2² is a residue mod 11, 2 is not
        assert_eq!(legendre_symbol(&int(4), &int(11)), 1);
        assert_eq!(legendre_symbol(&int(2), &int(11)), -1);
        assert_eq!(legendre_symbol(&int(22), &int(11)), 0);
    }

    #[test]
    fn sqrt_small_prime() {
        let (r1, r2) = sqrt_mod_p(&int(4), &int(11)).unwrap().unwrap();
        let mut roots = [r1, r2];
        roots.sort();
        assert_eq!(roots, [int(2), int(9)]);
    }

    #[test]
    fn sqrt_non_residue() {
        assert_eq!(sqrt_mod_p(&int(2), &int(11)).unwrap(), None);
    }

    #[test]
    fn sqrt_unsupported_modulus() {
        // 4 is a residue mod 13, but 13 ≡ 1 (mod 4)
        assert_eq!(
            sqrt_mod_p(&int(4), &int(13)),
            Err(OpError::UnsupportedModulus)
        );
    }
}
