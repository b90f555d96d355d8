//! Bitcoin-compatible ECDSA over secp256k1, with public-key recovery.
//!
//! The engine is state-free: [`sign`], [`verify`] and
//! [`recover_public_key`] are plain functions over the hash, the scalars and
//! the curve constants. Message hashes enter as 32-byte digests; signatures
//! are `(R, S)` scalar pairs that can be framed either as the fixed
//! two-integer DER sequence or as the 64-byte compact form used inside
//! signed-message envelopes.
//!
//! ```
//! use curvefun::PrivateKey;
//! use sha2::{Digest, Sha256};
//!
//! let key = PrivateKey::generate().unwrap();
//! let hash: [u8; 32] = Sha256::digest(b"Attack at dawn").into();
//! let signature = sigfun::sign(&hash, &key, None).unwrap();
//! let public_key = key.public_point().unwrap();
//! assert!(sigfun::verify(&public_key, &signature, &hash));
//! ```
#![allow(non_snake_case)]

pub mod nonce;
mod recovery;
mod signature;

pub use recovery::{candidate_flags, recover_public_key};
pub use signature::Signature;

use core::fmt;
use curvefun::{
    Curve, Point, PointError, PrivateKey,
    op::{self, OpError},
    pubkey::{self, PubKeyError},
};
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::Zero;

/// Error from signing, verifying or recovering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// A hex, DER or public-key encoding was malformed.
    InvalidEncoding,
    /// The signing nonce is unusable (zero, or not coprime with the group
    /// order).
    BadNonce,
    /// The operating system's random source is unavailable or reported
    /// itself as non-cryptographic.
    WeakRandomSource,
    /// A recovery flag outside `[27, 34]`.
    InvalidRecoveryFlag,
    /// A curve operation failed.
    Point(PointError),
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SignatureError::InvalidEncoding => write!(f, "malformed signature or key encoding"),
            SignatureError::BadNonce => write!(f, "the signing nonce is unusable"),
            SignatureError::WeakRandomSource => {
                write!(f, "the system is unable to produce cryptographic randomness")
            }
            SignatureError::InvalidRecoveryFlag => {
                write!(f, "recovery flag must be between 27 and 34 inclusive")
            }
            SignatureError::Point(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SignatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SignatureError::Point(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PointError> for SignatureError {
    fn from(e: PointError) -> Self {
        SignatureError::Point(e)
    }
}

impl From<OpError> for SignatureError {
    fn from(e: OpError) -> Self {
        SignatureError::Point(PointError::Op(e))
    }
}

impl From<PubKeyError> for SignatureError {
    fn from(_: PubKeyError) -> Self {
        SignatureError::InvalidEncoding
    }
}

/// Signs a 32-byte message hash.
///
/// `R` is the x-coordinate of `nonce·G` and
/// `S = nonce⁻¹·(hash + k·R) mod n`. When `nonce` is `None` a fresh one is
/// drawn from [`nonce::random_nonce`]; a caller-supplied nonce is reduced
/// mod `n` first and must not reduce to zero. Never reuse a nonce across
/// two different messages.
pub fn sign(
    hash: &[u8; 32],
    key: &PrivateKey,
    nonce: Option<&BigInt>,
) -> Result<Signature, SignatureError> {
    let curve = Curve::secp256k1();
    let nonce = match nonce {
        Some(nonce) => {
            let reduced = nonce.mod_floor(&curve.n);
            if reduced.is_zero() {
                return Err(SignatureError::BadNonce);
            }
            reduced
        }
        None => nonce::random_nonce()?,
    };

    let R = curve.mul(&nonce, &curve.g)?;
    let r = R.x().clone();

    let h = BigInt::from_bytes_be(Sign::Plus, hash);
    let nonce_inv = op::mod_inverse(&nonce, &curve.n).map_err(|_| SignatureError::BadNonce)?;
    let s = (nonce_inv * (h + key.secret_scalar() * &r)).mod_floor(&curve.n);

    if r.is_zero() || s.is_zero() {
        return Err(SignatureError::BadNonce);
    }
    Ok(Signature::new(r, s))
}

/// Signs a 32-byte message hash and frames the result as a DER hex string.
pub fn sign_to_der(
    hash: &[u8; 32],
    key: &PrivateKey,
    nonce: Option<&BigInt>,
) -> Result<String, SignatureError> {
    Ok(sign(hash, key, nonce)?.to_der())
}

/// Verifies a signature against a public-key point.
///
/// Computes `u1 = S⁻¹·hash mod n` and `u2 = S⁻¹·R mod n`; the signature is
/// valid iff the x-coordinate of `u1·G + u2·Q` equals `R` mod `n`. Any
/// arithmetic dead end (a zero scalar, an unrepresentable intermediate
/// point) means the signature is simply invalid.
pub fn verify(public_key: &Point, signature: &Signature, hash: &[u8; 32]) -> bool {
    let curve = Curve::secp256k1();
    let (r, s) = signature.as_tuple();
    if r.is_zero() || r >= &curve.p || s.is_zero() || s >= &curve.n {
        return false;
    }

    let s_inv = match op::mod_inverse(s, &curve.n) {
        Ok(inv) => inv,
        Err(_) => return false,
    };
    let h = BigInt::from_bytes_be(Sign::Plus, hash);
    let u1 = (&s_inv * h).mod_floor(&curve.n);
    let u2 = (&s_inv * r).mod_floor(&curve.n);

    let U1 = match curve.mul(&u1, &curve.g) {
        Ok(pt) => pt,
        Err(_) => return false,
    };
    let U2 = match curve.mul(&u2, public_key) {
        Ok(pt) => pt,
        Err(_) => return false,
    };
    let R = match curve.add(&U1, &U2) {
        Ok(pt) => pt,
        Err(_) => return false,
    };

    R.x().mod_floor(&curve.n) == r.mod_floor(&curve.n)
}

/// [`verify`] for a hex-encoded public key (compressed or uncompressed).
pub fn verify_encoded(
    public_key: &str,
    signature: &Signature,
    hash: &[u8; 32],
) -> Result<bool, SignatureError> {
    let point = pubkey::parse(public_key)?;
    Ok(verify(&point, signature, hash))
}

/// Parses a DER-framed signature and delegates to [`verify_encoded`].
pub fn verify_der(public_key: &str, der: &str, hash: &[u8; 32]) -> Result<bool, SignatureError> {
    let signature = Signature::from_der(der)?;
    verify_encoded(public_key, &signature, hash)
}
