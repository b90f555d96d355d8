//! The `(R, S)` signature value and its wire framings.

use crate::SignatureError;
use curvefun::hex;
use num_bigint::{BigInt, Sign};

/// An ECDSA signature: the scalar pair `(R, S)`, both reduced into the
/// group-order range by construction.
///
/// Two framings are supported: the fixed two-integer DER sequence
/// (`30 len 02 lenR R 02 lenS S`, single-byte lengths only) and the 64-byte
/// compact `R ‖ S` form used inside signed-message envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub R: BigInt,
    pub S: BigInt,
}

impl Signature {
    /// Assembles a signature from its two scalars.
    pub fn new(r: BigInt, s: BigInt) -> Self {
        Signature { R: r, S: s }
    }

    /// Both scalars, `R` first.
    pub fn as_tuple(&self) -> (&BigInt, &BigInt) {
        (&self.R, &self.S)
    }

    /// `R` as even-length hex.
    pub fn r_hex(&self) -> String {
        hex::pad_even(&self.R.to_str_radix(16))
    }

    /// `S` as even-length hex.
    pub fn s_hex(&self) -> String {
        hex::pad_even(&self.S.to_str_radix(16))
    }

    /// The 64-byte compact form: `R` and `S` as 32-byte big-endian integers.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[0..32].copy_from_slice(&scalar_bytes_32(&self.R));
        bytes[32..64].copy_from_slice(&scalar_bytes_32(&self.S));
        bytes
    }

    /// Reads the 64-byte compact form back.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Signature {
            R: BigInt::from_bytes_be(Sign::Plus, &bytes[0..32]),
            S: BigInt::from_bytes_be(Sign::Plus, &bytes[32..64]),
        }
    }

    /// Frames the signature as the DER hex sequence
    /// `30 len 02 lenR R 02 lenS S`.
    pub fn to_der(&self) -> String {
        let r = self.r_hex();
        let s = self.s_hex();
        let body = format!("02{:02x}{}02{:02x}{}", r.len() / 2, r, s.len() / 2, s);
        format!("30{:02x}{}", body.len() / 2, body)
    }

    /// Parses the DER hex framing produced by [`to_der`](Self::to_der).
    ///
    /// Lengths are single bytes, read positionally; any leading byte other
    /// than `30` (or a truncated or oversized integer) fails with
    /// [`SignatureError::InvalidEncoding`].
    pub fn from_der(der: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(der).map_err(|_| SignatureError::InvalidEncoding)?;
        if bytes.len() < 6 || bytes[0] != 0x30 || bytes[2] != 0x02 {
            return Err(SignatureError::InvalidEncoding);
        }

        let r_len = bytes[3] as usize;
        let r_end = 4 + r_len;
        let r = bytes.get(4..r_end).ok_or(SignatureError::InvalidEncoding)?;

        let s_tag = *bytes.get(r_end).ok_or(SignatureError::InvalidEncoding)?;
        let s_len = *bytes.get(r_end + 1).ok_or(SignatureError::InvalidEncoding)? as usize;
        if s_tag != 0x02 {
            return Err(SignatureError::InvalidEncoding);
        }
        let s = bytes
            .get(r_end + 2..r_end + 2 + s_len)
            .ok_or(SignatureError::InvalidEncoding)?;

        // 33 allows one byte of zero padding but nothing wider than a scalar
        if r_len > 33 || s_len > 33 {
            return Err(SignatureError::InvalidEncoding);
        }
        if (r_len == 33 && r[0] != 0) || (s_len == 33 && s[0] != 0) {
            return Err(SignatureError::InvalidEncoding);
        }

        Ok(Signature {
            R: BigInt::from_bytes_be(Sign::Plus, r),
            S: BigInt::from_bytes_be(Sign::Plus, s),
        })
    }
}

fn scalar_bytes_32(v: &BigInt) -> [u8; 32] {
    let (_, bytes) = v.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}
