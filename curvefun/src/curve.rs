//! The secp256k1 domain parameters.

use crate::point::Point;
use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_traits::Zero;

/// The domain parameters of a short Weierstrass curve `y² = x³ + a·x + b`
/// over the prime field `GF(p)`, together with a base point `g` of order `n`.
///
/// The only instance constructed by this library is [`SECP256K1`], the curve
/// specified in [_SEC 2: Recommended Elliptic Curve Domain Parameters_] and
/// used in Bitcoin. It is built once at first use and shared by reference
/// everywhere; none of the arithmetic re-derives it per call.
///
/// ```
/// use curvefun::Curve;
/// let curve = Curve::secp256k1();
/// assert!(curve.is_on_curve(&curve.g));
/// ```
///
/// [_SEC 2: Recommended Elliptic Curve Domain Parameters_]: https://www.secg.org/sec2-v2.pdf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    /// Coefficient of the linear term (`0` for secp256k1).
    pub a: BigInt,
    /// The constant term (`7` for secp256k1).
    pub b: BigInt,
    /// The field prime.
    pub p: BigInt,
    /// The order of the group generated by `g`.
    pub n: BigInt,
    /// The base point.
    pub g: Point,
}

impl Curve {
    /// The process-wide secp256k1 instance.
    pub fn secp256k1() -> &'static Curve {
        &SECP256K1
    }
}

fn parse_hex(hex: &[u8]) -> BigInt {
    BigInt::parse_bytes(hex, 16).expect("curve constant is valid hex")
}

lazy_static! {
    /// The secp256k1 curve: `a = 0`, `b = 7`, the 256-bit field prime and the
    /// standard base point.
    pub static ref SECP256K1: Curve = Curve {
        a: BigInt::zero(),
        b: BigInt::from(7),
        p: parse_hex(b"fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
        n: parse_hex(b"fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
        g: Point::from_coordinates(
            parse_hex(b"79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
            parse_hex(b"483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
        ),
    };
}
