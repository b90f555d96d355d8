//! End-to-end checks of the curve arithmetic against the codec.

use curvefun::{Curve, Parity, PrivateKey, pubkey};
use num_bigint::BigInt;

#[test]
fn compression_round_trip_for_random_keys() {
    for _ in 0..4 {
        let key = PrivateKey::generate().unwrap();
        let point = key.public_point().unwrap();
        let compressed = pubkey::to_compressed(&point);
        assert_eq!(pubkey::parse(&compressed).unwrap(), point);
    }
}

#[test]
fn doubling_keeps_points_on_the_curve() {
    let curve = Curve::secp256k1();
    let mut point = curve.g.clone();
    for _ in 0..16 {
        point = curve.double(&point).unwrap();
        assert!(curve.is_on_curve(&point));
    }
}

#[test]
fn scalar_mul_distributes_over_addition() {
    // (2 + 3)·G == 2·G + 3·G
    let curve = Curve::secp256k1();
    let two_g = curve.mul(&BigInt::from(2), &curve.g).unwrap();
    let three_g = curve.mul(&BigInt::from(3), &curve.g).unwrap();
    let five_g = curve.mul(&BigInt::from(5), &curve.g).unwrap();
    assert_eq!(curve.add(&two_g, &three_g).unwrap(), five_g);
}

#[test]
fn lift_x_matches_the_parity_tag() {
    let curve = Curve::secp256k1();
    let key = PrivateKey::from_hex("0123456789abcdef").unwrap();
    let point = key.public_point().unwrap();
    let lifted = curve
        .lift_x(point.x(), point.parity())
        .unwrap()
        .unwrap();
    assert_eq!(&lifted, point.y());
    // the other parity gives the reflected point
    let other = match point.parity() {
        Parity::Even => Parity::Odd,
        Parity::Odd => Parity::Even,
    };
    let reflected = curve.lift_x(point.x(), other).unwrap().unwrap();
    let negated = curve.negate(&point);
    assert_eq!(&reflected, negated.y());
}
