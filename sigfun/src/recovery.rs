//! Public-key recovery from an `(R, S)` signature and a recovery flag.
//!
//! A signature determines up to four candidate public keys: two possible
//! x-coordinates (`R` itself, or `R + n` when the nonce point's x exceeded
//! the group order) times two y-parities. The 1-byte flag pins the
//! candidate so verifiers don't have to guess:
//!
//! * flags `27..=30` — uncompressed signer key
//! * flags `31..=34` — compressed signer key (normalize by subtracting 4)
//! * after normalizing, `recid = flag − 27`; bit 1 selects the `R + n`
//!   x-candidate, bit 0 set means the candidate `y` is odd
//!
//! The signer picks the flag at signing time by brute force: try each
//! candidate and keep the one that recovers its own key (see
//! `walletfun::Wallet::sign_message`).

use crate::{Signature, SignatureError, verify};
use curvefun::{Curve, Parity, Point, op, pubkey};
use num_bigint::{BigInt, Sign};
use num_traits::Zero;

/// The four candidate flags a signer searches: `27..=30`, or `31..=34` for a
/// compressed key.
pub fn candidate_flags(compressed: bool) -> core::ops::RangeInclusive<u8> {
    if compressed { 31..=34 } else { 27..=30 }
}

/// Recovers the public key a signature was made with, as a hex encoding
/// (compressed when the flag says so).
///
/// Returns `Ok(None)` when the flag doesn't lead to a candidate point — no
/// point has the implied x-coordinate, or the candidate fails re-verification
/// against the signature. A flag outside `[27, 34]` fails with
/// [`SignatureError::InvalidRecoveryFlag`].
pub fn recover_public_key(
    flag: u8,
    signature: &Signature,
    hash: &[u8; 32],
) -> Result<Option<String>, SignatureError> {
    if !(27..=34).contains(&flag) {
        return Err(SignatureError::InvalidRecoveryFlag);
    }
    let curve = Curve::secp256k1();
    let compressed = flag >= 31;
    let flag = if compressed { flag - 4 } else { flag };
    let recid = flag - 27;

    let (r, s) = signature.as_tuple();
    if r.is_zero() || r >= &curve.n || s.is_zero() || s >= &curve.n {
        return Ok(None);
    }

    // step 1.1: the candidate x-coordinate
    let x = if recid & 2 != 0 {
        r + &curve.n
    } else {
        r.clone()
    };
    if x >= curve.p {
        return Ok(None);
    }

    // step 1.3: lift x to a point of the flagged parity
    let parity = if recid & 1 == 0 {
        Parity::Even
    } else {
        Parity::Odd
    };
    let y = match curve.lift_x(&x, parity)? {
        Some(y) => y,
        None => return Ok(None),
    };
    let R_point = Point::from_coordinates(x, y);

    // step 1.6.1: Q = R⁻¹·(S·R_point − hash·G)
    let h = BigInt::from_bytes_be(Sign::Plus, hash);
    let hG = curve.mul(&h, &curve.g)?;
    let sR = curve.mul(s, &R_point)?;
    let sum = curve.add(&sR, &curve.negate(&hG))?;
    let r_inv = op::mod_inverse(r, &curve.n)?;
    let Q = curve.mul(&r_inv, &sum)?;

    let encoded = if compressed {
        pubkey::to_compressed(&Q)
    } else {
        pubkey::to_uncompressed(&Q)
    };

    // recovery is only trusted if the candidate actually verifies
    if verify(&Q, signature, hash) {
        Ok(Some(encoded))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sign;
    use curvefun::PrivateKey;
    use sha2::{Digest, Sha256};

    #[test]
    fn out_of_range_flags_are_rejected() {
        let signature = Signature::new(BigInt::from(1), BigInt::from(1));
        let hash = [0u8; 32];
        for flag in [0u8, 26, 35, 255] {
            assert_eq!(
                recover_public_key(flag, &signature, &hash),
                Err(SignatureError::InvalidRecoveryFlag)
            );
        }
    }

    #[test]
    fn some_candidate_flag_recovers_the_signer() {
        let key = PrivateKey::from_hex("1b2e4a7c").unwrap();
        let hash: [u8; 32] = Sha256::digest(b"recover me").into();
        let signature = sign(&hash, &key, None).unwrap();
        let point = key.public_point().unwrap();

        for (compressed, expected) in [
            (true, pubkey::to_compressed(&point)),
            (false, pubkey::to_uncompressed(&point)),
        ] {
            let recovered = candidate_flags(compressed)
                .filter_map(|flag| recover_public_key(flag, &signature, &hash).unwrap())
                .find(|candidate| candidate == &expected);
            assert_eq!(recovered, Some(expected));
        }
    }

    #[test]
    fn flag_encoding_split() {
        assert_eq!(candidate_flags(false), 27..=30);
        assert_eq!(candidate_flags(true), 31..=34);
    }
}
