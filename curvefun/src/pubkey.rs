//! The public-key point codec.
//!
//! A point serializes to one of two tagged hex encodings: uncompressed
//! `04 ‖ x ‖ y` (130 hex digits) or compressed `02/03 ‖ x` (66 hex digits,
//! the tag recording the parity of `y`). Compression is lossless: the curve
//! equation pins `y²`, so the parity tag picks the unique matching root.

use crate::{
    curve::Curve,
    hex,
    point::{Parity, Point, PointError},
};
use core::fmt;
use num_bigint::BigInt;

/// Length in hex digits of an uncompressed public-key encoding.
const UNCOMPRESSED_LEN: usize = 130;
/// Length in hex digits of a compressed public-key encoding.
const COMPRESSED_LEN: usize = 66;

/// Error from parsing a public-key encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PubKeyError {
    /// Wrong length, unknown tag byte, non-hex digits, or coordinates that
    /// are not on the curve.
    InvalidEncoding,
    /// The x-coordinate has no square root on the curve, so no point with
    /// the encoded x exists.
    NoSquareRoot,
}

impl fmt::Display for PubKeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PubKeyError::InvalidEncoding => write!(f, "invalid public key encoding"),
            PubKeyError::NoSquareRoot => {
                write!(f, "no point on the curve has the encoded x-coordinate")
            }
        }
    }
}

impl std::error::Error for PubKeyError {}

impl From<PointError> for PubKeyError {
    fn from(_: PointError) -> Self {
        PubKeyError::NoSquareRoot
    }
}

/// The uncompressed encoding `04 ‖ x ‖ y`.
pub fn to_uncompressed(point: &Point) -> String {
    format!("04{}{}", point.x_hex(), point.y_hex())
}

/// The compressed encoding: `02 ‖ x` for even `y`, `03 ‖ x` for odd `y`.
///
/// # Examples
/// ```
/// use curvefun::{pubkey, Curve};
/// assert_eq!(
///     pubkey::to_compressed(&Curve::secp256k1().g),
///     "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
/// );
/// ```
pub fn to_compressed(point: &Point) -> String {
    format!("{}{}", point.parity().tag(), point.x_hex())
}

/// Parses either public-key encoding back into a point, decompressing via
/// the curve equation when given the 66-digit form.
///
/// Anything that is not exactly one of the two shapes fails with
/// [`PubKeyError::InvalidEncoding`]; so does an uncompressed encoding whose
/// coordinates do not satisfy the curve equation.
pub fn parse(encoded: &str) -> Result<Point, PubKeyError> {
    let curve = Curve::secp256k1();
    match (encoded.len(), encoded.get(..2)) {
        (UNCOMPRESSED_LEN, Some("04")) => {
            let x = parse_coordinate(&encoded[2..66])?;
            let y = parse_coordinate(&encoded[66..130])?;
            let point = Point::from_coordinates(x, y);
            if !curve.is_on_curve(&point) {
                return Err(PubKeyError::InvalidEncoding);
            }
            Ok(point)
        }
        (COMPRESSED_LEN, Some(tag)) => {
            let parity = Parity::from_tag(tag).ok_or(PubKeyError::InvalidEncoding)?;
            let x = parse_coordinate(&encoded[2..66])?;
            let y = curve
                .lift_x(&x, parity)?
                .ok_or(PubKeyError::NoSquareRoot)?;
            Ok(Point::from_coordinates(x, y))
        }
        _ => Err(PubKeyError::InvalidEncoding),
    }
}

fn parse_coordinate(digits: &str) -> Result<BigInt, PubKeyError> {
    // round-trip through the byte decoder so stray characters are rejected
    let bytes = hex::decode(digits).map_err(|_| PubKeyError::InvalidEncoding)?;
    Ok(BigInt::from_bytes_be(num_bigint::Sign::Plus, &bytes))
}
