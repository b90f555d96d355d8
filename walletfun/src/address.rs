//! HASH160, Base58Check and the Wallet Import Format.
//!
//! An address is `Base58(version ‖ HASH160(pubkey) ‖ checksum)` where the
//! checksum is the first 4 bytes of the double-SHA256 of everything before
//! it. The version prefix is configuration (`00` for the Bitcoin main
//! network, `6f` for testnet), not a constant. WIF wraps a private-key
//! scalar in the same framing, with an optional trailing `01` marking that
//! the corresponding public key should be used compressed.

use crate::base58::{self, Base58Error};
use core::fmt;
use curvefun::hex::{self, HexError};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Error from an address or WIF codec operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The decoded payload had an impossible shape.
    InvalidEncoding,
    /// The Base58 layer rejected the string.
    Base58(Base58Error),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AddressError::InvalidEncoding => write!(f, "invalid address encoding"),
            AddressError::Base58(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AddressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AddressError::Base58(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Base58Error> for AddressError {
    fn from(e: Base58Error) -> Self {
        AddressError::Base58(e)
    }
}

impl From<HexError> for AddressError {
    fn from(_: HexError) -> Self {
        AddressError::InvalidEncoding
    }
}

/// `RIPEMD160(SHA256(bytes))` of a hex-encoded public key, as hex.
pub fn hash160(pub_key: &str) -> Result<String, AddressError> {
    let bytes = hex::decode(pub_key)?;
    let digest = Ripemd160::digest(Sha256::digest(&bytes));
    Ok(hex::encode(&digest))
}

fn checksum(bytes: &[u8]) -> [u8; 4] {
    let digest = Sha256::digest(Sha256::digest(bytes));
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Base58Check: prefix the payload with the version byte, append the first
/// 4 bytes of its double-SHA256, and Base58-encode the whole thing.
pub fn base58check_encode(payload: &str, version_prefix: &str) -> Result<String, AddressError> {
    let prefixed = format!("{}{}", version_prefix, payload);
    let bytes = hex::decode(&prefixed)?;
    let full = format!("{}{}", prefixed, hex::encode(&checksum(&bytes)));
    Ok(base58::encode(&full, true)?)
}

/// Strips the version byte and checksum off a Base58Check string and returns
/// the payload hex.
///
/// The checksum is *not* verified here — decoding untrusted input is the
/// job of [`validate_address`], which reports a boolean instead of failing.
pub fn base58check_decode(encoded: &str) -> Result<String, AddressError> {
    let payload = base58::decode(encoded, true)?;
    if payload.len() < 10 {
        return Err(AddressError::InvalidEncoding);
    }
    Ok(payload[2..payload.len() - 8].to_string())
}

/// Whether a string is a well-formed address: Base58, exactly 25 bytes, and
/// the trailing 4 bytes match the double-SHA256 checksum of the first 21.
pub fn validate_address(address: &str) -> bool {
    let Ok(payload) = base58::decode(address, true) else {
        return false;
    };
    let Ok(bytes) = hex::decode(&payload) else {
        return false;
    };
    if bytes.len() != 25 {
        return false;
    }
    checksum(&bytes[..21]) == bytes[21..]
}

/// A private key recovered from its WIF export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedWif {
    /// The 32-byte scalar as 64 hex digits.
    pub private_key: String,
    /// Whether the export carried the `01` compressed-public-key marker.
    pub compressed: bool,
}

/// Exports a private key in Wallet Import Format.
///
/// `compressed` appends the `01` marker byte before framing. `reversed`
/// applies the historical whole-string reversal some early exports used;
/// it is **not** part of standard WIF, so pass `false` unless byte-for-byte
/// compatibility with those exports is required.
pub fn wif_encode(
    private_key: &str,
    version_prefix: &str,
    compressed: bool,
    reversed: bool,
) -> Result<String, AddressError> {
    let payload = if compressed {
        format!("{}01", private_key)
    } else {
        private_key.to_string()
    };
    let encoded = base58check_encode(&payload, version_prefix)?;
    Ok(if reversed {
        encoded.chars().rev().collect()
    } else {
        encoded
    })
}

/// Reads a WIF export back, stripping the compression marker when present.
///
/// The payload must be exactly 32 bytes, or 33 with a trailing `01`;
/// anything else fails with [`AddressError::InvalidEncoding`].
pub fn wif_decode(wif: &str, reversed: bool) -> Result<DecodedWif, AddressError> {
    let forward: String = if reversed {
        wif.chars().rev().collect()
    } else {
        wif.to_string()
    };
    let payload = base58check_decode(&forward)?;
    match payload.len() {
        66 if payload.ends_with("01") => Ok(DecodedWif {
            private_key: payload[..64].to_string(),
            compressed: true,
        }),
        64 => Ok(DecodedWif {
            private_key: payload,
            compressed: false,
        }),
        _ => Err(AddressError::InvalidEncoding),
    }
}

/// Whether a string is a well-formed (non-reversed) WIF export: Base58 with
/// a valid trailing checksum over the rest of the payload.
pub fn validate_wif_key(wif: &str) -> bool {
    let Ok(payload) = base58::decode(wif, true) else {
        return false;
    };
    let Ok(bytes) = hex::decode(&payload) else {
        return false;
    };
    if bytes.len() < 5 {
        return false;
    }
    let split = bytes.len() - 4;
    checksum(&bytes[..split]) == bytes[split..]
}
