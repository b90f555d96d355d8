//! Arbitrary-precision Base58.
//!
//! A byte string (as hex) is treated as one big integer and repeatedly
//! divided by 58, mapping remainders through the 58-symbol alphabet. Since
//! leading zero bytes vanish under base conversion they are carried
//! separately: each one becomes a literal `'1'` (the zero symbol) in the
//! output and re-expands to `00` on decode.
//!
//! The `little_endian` flag picks the digit orientation. `true` is the
//! standard order used by addresses (most-significant symbol first); `false`
//! leaves the division output as-is, least-significant first, which some
//! historical exports used.

use core::fmt;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};

/// The 58-character alphabet: digits and letters minus the confusable
/// `0`, `O`, `I` and `l`.
const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Error from Base58 conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base58Error {
    /// A character outside the 58-symbol alphabet.
    InvalidSymbol(char),
    /// The input hex was malformed or did not denote a whole number of
    /// bytes.
    InvalidHex,
}

impl fmt::Display for Base58Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Base58Error::InvalidSymbol(c) => {
                write!(f, "'{}' is not a base58 symbol", c)
            }
            Base58Error::InvalidHex => write!(f, "input is not an even-length hex string"),
        }
    }
}

impl std::error::Error for Base58Error {}

fn symbol_value(symbol: char) -> Option<u8> {
    ALPHABET
        .iter()
        .position(|&c| c as char == symbol)
        .map(|position| position as u8)
}

/// Encodes a hex byte string in Base58.
///
/// # Examples
/// ```
/// use walletfun::base58;
/// assert_eq!(base58::encode("61", true).unwrap(), "2g");
/// // leading zero bytes are preserved as '1' symbols
/// assert_eq!(base58::encode("0061", true).unwrap(), "12g");
/// ```
pub fn encode(hex: &str, little_endian: bool) -> Result<String, Base58Error> {
    if hex.is_empty() {
        return Ok(String::new());
    }
    if hex.len() % 2 != 0 {
        return Err(Base58Error::InvalidHex);
    }
    let mut value = BigInt::parse_bytes(hex.as_bytes(), 16).ok_or(Base58Error::InvalidHex)?;
    if value.is_negative() {
        return Err(Base58Error::InvalidHex);
    }

    let radix = BigInt::from(58);
    let mut digits = String::new();
    while !value.is_zero() {
        let (quotient, remainder) = value.div_rem(&radix);
        value = quotient;
        let index = remainder.to_usize().unwrap_or(0);
        digits.push(ALPHABET[index] as char);
    }

    for chunk in hex.as_bytes().chunks(2) {
        if chunk == b"00" {
            digits.push('1');
        } else {
            break;
        }
    }

    Ok(if little_endian {
        digits.chars().rev().collect()
    } else {
        digits
    })
}

/// Decodes a Base58 string back to hex.
///
/// Fails with [`Base58Error::InvalidSymbol`] on any character outside the
/// alphabet. The output always denotes a whole number of bytes: odd-length
/// values get a leading zero digit.
pub fn decode(encoded: &str, little_endian: bool) -> Result<String, Base58Error> {
    let mut symbols: Vec<char> = encoded.chars().collect();
    if !little_endian {
        symbols.reverse();
    }

    let radix = BigInt::from(58);
    let mut value = BigInt::zero();
    for &symbol in &symbols {
        let digit = symbol_value(symbol).ok_or(Base58Error::InvalidSymbol(symbol))?;
        value = value * &radix + BigInt::from(digit);
    }

    let digits = if value.is_zero() {
        String::new()
    } else {
        value.to_str_radix(16)
    };

    let leading_zero_bytes = symbols.iter().take_while(|&&c| c == '1').count();
    let mut hex = String::with_capacity(leading_zero_bytes * 2 + digits.len() + 1);
    for _ in 0..leading_zero_bytes {
        hex.push_str("00");
    }
    hex.push_str(&digits);

    if hex.len() % 2 != 0 {
        hex.insert(0, '0');
    }
    Ok(hex)
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    // from the reference client's base58 test set
    const VECTORS: &[(&str, &str)] = &[
        ("", ""),
        ("61", "2g"),
        ("626262", "a3gV"),
        ("636363", "aPEr"),
        ("73696d706c792061206c6f6e6720737472696e67", "2cFupjhnEsSn59qHXstmK2ffpLv2"),
        ("516b6fcd0f", "ABnLTmg"),
        ("bf4f89001e670274dd", "3SEo3LWLoPntC"),
        ("572e4794", "3EFU7m"),
        ("ecac89cad93923c02321", "EJDM8drfXA6uyA"),
        ("10c8511e", "Rt5zm"),
        ("00000000000000000000", "1111111111"),
    ];

    #[test]
    fn reference_vectors() {
        for &(hex, base58) in VECTORS {
            assert_eq!(encode(hex, true).unwrap(), base58, "encode {}", hex);
            assert_eq!(decode(base58, true).unwrap(), hex, "decode {}", base58);
        }
    }

    #[test]
    fn orientation_flag_reverses_the_digits() {
        let forward = encode("626262", true).unwrap();
        let backward = encode("626262", false).unwrap();
        assert_eq!(forward.chars().rev().collect::<String>(), backward);
        assert_eq!(decode(&backward, false).unwrap(), "626262");
    }

    #[test]
    fn rejects_symbols_outside_the_alphabet() {
        for bad in ["0", "O", "I", "l", "2g+"] {
            assert!(matches!(
                decode(bad, true),
                Err(Base58Error::InvalidSymbol(_))
            ));
        }
    }

    #[test]
    fn rejects_odd_length_hex() {
        assert_eq!(encode("abc", true), Err(Base58Error::InvalidHex));
    }

    #[test]
    fn leading_zero_bytes_round_trip() {
        for zeros in 1..=4 {
            let hex = format!("{}61", "00".repeat(zeros));
            let encoded = encode(&hex, true).unwrap();
            assert!(encoded.starts_with(&"1".repeat(zeros)));
            assert_eq!(decode(&encoded, true).unwrap(), hex);
        }
    }

    proptest! {
        #[test]
        fn round_trips_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let hex = curvefun::hex::encode(&bytes);
            let encoded = encode(&hex, true).unwrap();
            prop_assert_eq!(decode(&encoded, true).unwrap(), hex);
        }

        #[test]
        fn round_trips_in_either_orientation(bytes in proptest::collection::vec(any::<u8>(), 0..32)) {
            let hex = curvefun::hex::encode(&bytes);
            let encoded = encode(&hex, false).unwrap();
            prop_assert_eq!(decode(&encoded, false).unwrap(), hex);
        }
    }
}
