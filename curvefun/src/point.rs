//! Affine point arithmetic on a short Weierstrass curve.
//!
//! Points are plain `(x, y)` pairs of field elements reduced modulo the
//! curve's prime. There is no representation of the point at infinity:
//! operations whose mathematical result is the identity element fail with
//! [`PointError::AtInfinity`] and every caller has to handle that case
//! explicitly. Doubling or adding an order-dividing pair is therefore
//! unsupported; this is a known functional limitation, not an oversight.

use crate::{
    curve::Curve,
    hex,
    op::{self, OpError},
};
use core::fmt;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// A point on the curve, in affine coordinates.
///
/// Both coordinates are kept reduced into `[0, p)`. Equality is exact
/// coordinate equality.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    x: BigInt,
    y: BigInt,
}

impl Point {
    /// Assembles a point from reduced coordinates.
    ///
    /// No curve membership check is done here; untrusted encodings go
    /// through [`pubkey::parse`] which validates against the curve equation.
    ///
    /// [`pubkey::parse`]: crate::pubkey::parse
    pub fn from_coordinates(x: BigInt, y: BigInt) -> Self {
        debug_assert!(!x.is_negative() && !y.is_negative());
        Point { x, y }
    }

    /// The x-coordinate.
    pub fn x(&self) -> &BigInt {
        &self.x
    }

    /// The y-coordinate.
    pub fn y(&self) -> &BigInt {
        &self.y
    }

    /// The x-coordinate as 64 zero-padded hex digits.
    pub fn x_hex(&self) -> String {
        hex::pad64(&self.x.to_str_radix(16))
    }

    /// The y-coordinate as 64 zero-padded hex digits.
    pub fn y_hex(&self) -> String {
        hex::pad64(&self.y.to_str_radix(16))
    }

    /// Whether the y-coordinate is even or odd, which is what the compressed
    /// encoding's `02`/`03` tag records.
    pub fn parity(&self) -> Parity {
        Parity::of(&self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.parity().tag(), self.x_hex())
    }
}

/// The parity of a y-coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// An even y-coordinate (compressed tag `02`).
    Even,
    /// An odd y-coordinate (compressed tag `03`).
    Odd,
}

impl Parity {
    /// The parity of a field element.
    pub fn of(v: &BigInt) -> Parity {
        if v.is_even() { Parity::Even } else { Parity::Odd }
    }

    /// The compressed-encoding tag byte as two hex digits.
    pub fn tag(self) -> &'static str {
        match self {
            Parity::Even => "02",
            Parity::Odd => "03",
        }
    }

    /// Parses a compressed-encoding tag.
    pub fn from_tag(tag: &str) -> Option<Parity> {
        match tag {
            "02" => Some(Parity::Even),
            "03" => Some(Parity::Odd),
            _ => None,
        }
    }
}

/// Error from a point operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointError {
    /// The true result is the point at infinity, which has no representation
    /// here.
    AtInfinity,
    /// A computed point failed the curve-equation check, which indicates
    /// corrupted arithmetic or an invalid input point.
    NotOnCurve,
    /// A modular operation had no solution.
    Op(OpError),
}

impl fmt::Display for PointError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PointError::AtInfinity => {
                write!(f, "the result is the point at infinity, which is not representable")
            }
            PointError::NotOnCurve => write!(f, "the resulting point is not on the curve"),
            PointError::Op(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PointError::Op(e) => Some(e),
            _ => None,
        }
    }
}

impl From<OpError> for PointError {
    fn from(e: OpError) -> Self {
        PointError::Op(e)
    }
}

impl Curve {
    /// Doubles a point: the tangent-line chord construction with slope
    /// `(3x² + a)·(2y)⁻¹`.
    ///
    /// Fails with [`PointError::AtInfinity`] when `y ≡ 0`, i.e. when
    /// `gcd(2y, p) ≠ 1`.
    pub fn double(&self, pt: &Point) -> Result<Point, PointError> {
        let two_y = (BigInt::from(2) * pt.y()).mod_floor(&self.p);
        if !two_y.gcd(&self.p).is_one() {
            return Err(PointError::AtInfinity);
        }

        let three_x2 = BigInt::from(3) * pt.x() * pt.x();
        let slope = ((three_x2 + &self.a) * op::mod_inverse(&two_y, &self.p)?).mod_floor(&self.p);

        let x = (&slope * &slope - pt.x() - pt.x()).mod_floor(&self.p);
        let y = (&slope * (pt.x() - &x) - pt.y()).mod_floor(&self.p);
        Ok(Point { x, y })
    }

    /// Adds two points with the chord construction, delegating to
    /// [`double`](Self::double) when they coincide.
    ///
    /// Fails with [`PointError::AtInfinity`] for an antipodal pair (equal `x`,
    /// opposite `y`), where the chord is vertical.
    pub fn add(&self, p1: &Point, p2: &Point) -> Result<Point, PointError> {
        if p1 == p2 {
            return self.double(p1);
        }
        if (p1.x() - p2.x()).mod_floor(&self.p).is_zero() {
            return Err(PointError::AtInfinity);
        }

        let dx_inv = op::mod_inverse(&(p1.x() - p2.x()), &self.p)?;
        let slope = ((p1.y() - p2.y()) * dx_inv).mod_floor(&self.p);

        let x = (&slope * &slope - p1.x() - p2.x()).mod_floor(&self.p);
        let y = (&slope * (p1.x() - &x) - p1.y()).mod_floor(&self.p);
        Ok(Point { x, y })
    }

    /// Multiplies a point by a positive scalar with binary double-and-add,
    /// walking the bits of `k` most-significant first and skipping the
    /// implicit leading 1.
    ///
    /// `k = 0` fails with [`PointError::AtInfinity`] since the identity is
    /// not representable. The result is checked against the curve equation
    /// before being returned and fails with [`PointError::NotOnCurve`]
    /// otherwise, so silent arithmetic corruption cannot leak a bogus point.
    pub fn mul(&self, k: &BigInt, pt: &Point) -> Result<Point, PointError> {
        if !k.is_positive() {
            return Err(PointError::AtInfinity);
        }

        let bits = k.to_str_radix(2);
        let mut acc = pt.clone();
        for bit in bits.chars().skip(1) {
            acc = self.double(&acc)?;
            if bit == '1' {
                acc = self.add(&acc, pt)?;
            }
        }

        if !self.is_on_curve(&acc) {
            return Err(PointError::NotOnCurve);
        }
        Ok(acc)
    }

    /// The point reflected across the x-axis: `(x, p − y)`.
    pub fn negate(&self, pt: &Point) -> Point {
        let y = (-pt.y()).mod_floor(&self.p);
        Point {
            x: pt.x().clone(),
            y,
        }
    }

    /// Checks the curve equation `y² ≡ x³ + a·x + b (mod p)`.
    pub fn is_on_curve(&self, pt: &Point) -> bool {
        let lhs = (pt.y() * pt.y()).mod_floor(&self.p);
        let rhs = (pt.x().modpow(&BigInt::from(3), &self.p) + &self.a * pt.x() + &self.b)
            .mod_floor(&self.p);
        lhs == rhs
    }

    /// The y-coordinate of the given parity for an x-coordinate, via the
    /// curve equation and the square root mod `p`.
    ///
    /// Returns `None` when `x³ + a·x + b` is a non-residue (no point with
    /// that x-coordinate exists) or when neither root has the requested
    /// parity.
    pub fn lift_x(&self, x: &BigInt, parity: Parity) -> Result<Option<BigInt>, PointError> {
        let alpha = (x.modpow(&BigInt::from(3), &self.p) + &self.a * x + &self.b)
            .mod_floor(&self.p);
        let (r1, r2) = match op::sqrt_mod_p(&alpha, &self.p)? {
            Some(roots) => roots,
            None => return Ok(None),
        };
        for root in [r1, r2] {
            if Parity::of(&root) == parity {
                return Ok(Some(root));
            }
        }
        Ok(None)
    }
}
