//! The wallet: address derivation and the signed-message protocol.
//!
//! A signed message commits to `double-SHA256(magic ‖ varint(len) ‖ message)`
//! where the magic defaults to the network's `"… Signed Message:\n"` banner,
//! itself varint-prefixed. The signature travels in a text envelope together
//! with the plaintext and the signer's address, with the recovery flag as
//! the first byte of the Base64 payload so the verifier can reconstruct the
//! public key without being told it.

use crate::address::{self, AddressError};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use core::fmt;
use curvefun::{PointError, PrivateKey, pubkey};
use num_bigint::BigInt;
use sha2::{Digest, Sha256};
use sigfun::{Signature, SignatureError, candidate_flags, recover_public_key};

/// Error from a wallet operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The wallet was built without a private key but the operation needs
    /// one.
    NoPrivateKey,
    /// None of the four candidate recovery flags reproduced the signer's own
    /// public key; the signature is internally inconsistent.
    NoValidFlag,
    /// A signed-message envelope could not be parsed.
    MalformedEnvelope,
    /// The message is too long for a varint length prefix.
    OversizedMessage,
    /// A curve operation failed.
    Point(PointError),
    /// The signature engine failed.
    Signature(SignatureError),
    /// An address codec operation failed.
    Address(AddressError),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WalletError::NoPrivateKey => write!(f, "wallet does not have a private key"),
            WalletError::NoValidFlag => write!(f, "unable to find a valid recovery flag"),
            WalletError::MalformedEnvelope => write!(f, "malformed signed-message envelope"),
            WalletError::OversizedMessage => write!(f, "message is too long to sign"),
            WalletError::Point(e) => write!(f, "{}", e),
            WalletError::Signature(e) => write!(f, "{}", e),
            WalletError::Address(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for WalletError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WalletError::Point(e) => Some(e),
            WalletError::Signature(e) => Some(e),
            WalletError::Address(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PointError> for WalletError {
    fn from(e: PointError) -> Self {
        WalletError::Point(e)
    }
}

impl From<SignatureError> for WalletError {
    fn from(e: SignatureError) -> Self {
        WalletError::Signature(e)
    }
}

impl From<AddressError> for WalletError {
    fn from(e: AddressError) -> Self {
        WalletError::Address(e)
    }
}

/// A wallet: an optional private key plus the network configuration used to
/// render addresses and message magic.
///
/// ```
/// use curvefun::PrivateKey;
/// use walletfun::Wallet;
///
/// let wallet = Wallet::new(Some(PrivateKey::generate().unwrap()));
/// let envelope = wallet.sign_message("hello", true, None).unwrap();
/// assert!(wallet.check_signature_for_raw_message(&envelope).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Wallet {
    private_key: Option<PrivateKey>,
    network_prefix: String,
    network_name: String,
    message_magic: Option<String>,
}

impl Default for Wallet {
    fn default() -> Self {
        Wallet::new(None)
    }
}

impl Wallet {
    /// A wallet on the Bitcoin main network (version prefix `00`).
    ///
    /// A wallet without a private key can still verify signed messages and
    /// derive nothing else.
    pub fn new(private_key: Option<PrivateKey>) -> Self {
        Wallet {
            private_key,
            network_prefix: "00".to_string(),
            network_name: "Bitcoin".to_string(),
            message_magic: None,
        }
    }

    /// Sets the network version prefix (`00` main network, `6f` testnet).
    pub fn set_network_prefix(&mut self, prefix: &str) {
        if !prefix.is_empty() {
            self.network_prefix = prefix.to_string();
        }
    }

    /// The current network version prefix.
    pub fn network_prefix(&self) -> &str {
        &self.network_prefix
    }

    /// Sets the network name used in envelopes and the default magic.
    pub fn set_network_name(&mut self, name: &str) {
        if !name.is_empty() {
            self.network_name = name.to_string();
        }
    }

    /// The current network name.
    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    /// Overrides the message magic. The override is used verbatim, with no
    /// varint prefix; pass `None` to restore the default.
    pub fn set_message_magic(&mut self, magic: Option<String>) {
        self.message_magic = magic;
    }

    /// The magic prefix messages are hashed under: the custom override if
    /// set, otherwise `varint(len(m)) ‖ m` for
    /// `m = "<network> Signed Message:\n"`.
    pub fn message_magic(&self) -> Result<Vec<u8>, WalletError> {
        match &self.message_magic {
            Some(magic) => Ok(magic.as_bytes().to_vec()),
            None => {
                let banner = format!("{} Signed Message:\n", self.network_name);
                let mut bytes = var_int(banner.len())?;
                bytes.extend_from_slice(banner.as_bytes());
                Ok(bytes)
            }
        }
    }

    /// The address of the compressed public key.
    pub fn address(&self) -> Result<String, WalletError> {
        let point = self.private_key()?.public_point()?;
        let der = pubkey::to_compressed(&point);
        Ok(address::base58check_encode(
            &address::hash160(&der)?,
            &self.network_prefix,
        )?)
    }

    /// The address of the uncompressed public key.
    pub fn uncompressed_address(&self) -> Result<String, WalletError> {
        let point = self.private_key()?.public_point()?;
        let der = pubkey::to_uncompressed(&point);
        Ok(address::base58check_encode(
            &address::hash160(&der)?,
            &self.network_prefix,
        )?)
    }

    fn private_key(&self) -> Result<&PrivateKey, WalletError> {
        self.private_key.as_ref().ok_or(WalletError::NoPrivateKey)
    }

    /// The double-SHA256 commitment a signed message makes:
    /// `magic ‖ varint(len(message)) ‖ message`.
    fn message_hash(&self, message: &str) -> Result<[u8; 32], WalletError> {
        let mut data = self.message_magic()?;
        data.extend(var_int(message.len())?);
        data.extend_from_slice(message.as_bytes());
        Ok(sha256d(&data))
    }

    /// Signs a message in the Satoshi client's envelope format.
    ///
    /// The recovery flag embedded in the envelope is found by brute force:
    /// each of the four candidates is run through recovery and the one that
    /// reproduces the signer's own key wins. For a correctly computed
    /// signature one always matches; [`WalletError::NoValidFlag`] therefore
    /// signals an internal-consistency fault, not bad input.
    pub fn sign_message(
        &self,
        message: &str,
        compressed: bool,
        nonce: Option<&BigInt>,
    ) -> Result<String, WalletError> {
        let hash = self.message_hash(message)?;
        let key = self.private_key()?;
        let signature = sigfun::sign(&hash, key, nonce)?;

        let point = key.public_point()?;
        let own_encoding = if compressed {
            pubkey::to_compressed(&point)
        } else {
            pubkey::to_uncompressed(&point)
        };
        let flag = find_recovery_flag(candidate_flags(compressed), &own_encoding, &signature, &hash)?
            .ok_or(WalletError::NoValidFlag)?;

        let address = if compressed {
            self.address()?
        } else {
            self.uncompressed_address()?
        };

        let mut payload = Vec::with_capacity(65);
        payload.push(flag);
        payload.extend_from_slice(&signature.to_bytes());

        let network = self.network_name.to_uppercase();
        Ok(format!(
            "\n-----BEGIN {network} SIGNED MESSAGE-----\n{message}\n-----BEGIN SIGNATURE-----\n{address}\n{encoded}\n-----END {network} SIGNED MESSAGE-----",
            encoded = STANDARD.encode(&payload),
        ))
    }

    /// Checks a signed message given the pieces separately: recompute the
    /// hash, recover the public key from the `flag ‖ R ‖ S` payload, derive
    /// its address and compare.
    pub fn check_signature_for_message(
        &self,
        address: &str,
        encoded_signature: &str,
        message: &str,
    ) -> Result<bool, WalletError> {
        let hash = self.message_hash(message)?;

        let raw = STANDARD
            .decode(encoded_signature.trim())
            .map_err(|_| WalletError::MalformedEnvelope)?;
        if raw.len() != 65 {
            return Err(WalletError::MalformedEnvelope);
        }
        let flag = raw[0];
        let mut compact = [0u8; 64];
        compact.copy_from_slice(&raw[1..65]);
        let signature = Signature::from_bytes(compact);

        let recovered = match recover_public_key(flag, &signature, &hash)? {
            Some(key) => key,
            None => return Ok(false),
        };
        let derived = address::base58check_encode(
            &address::hash160(&recovered)?,
            &self.network_prefix,
        )?;
        Ok(derived == address)
    }

    /// Checks a full signed-message envelope as produced by
    /// [`sign_message`](Self::sign_message).
    pub fn check_signature_for_raw_message(&self, raw: &str) -> Result<bool, WalletError> {
        let network = self.network_name.to_uppercase();
        let begin = format!("-----BEGIN {network} SIGNED MESSAGE-----\n");
        let begin_signature = "\n-----BEGIN SIGNATURE-----\n";
        let end = format!("\n-----END {network} SIGNED MESSAGE-----");

        let message_start = raw
            .find(&begin)
            .ok_or(WalletError::MalformedEnvelope)?
            + begin.len();
        let signature_at = raw[message_start..]
            .find(begin_signature)
            .ok_or(WalletError::MalformedEnvelope)?
            + message_start;
        let message = &raw[message_start..signature_at];

        let tail_start = signature_at + begin_signature.len();
        let end_at = raw[tail_start..]
            .find(&end)
            .ok_or(WalletError::MalformedEnvelope)?
            + tail_start;
        let (address, signature) = raw[tail_start..end_at]
            .split_once('\n')
            .ok_or(WalletError::MalformedEnvelope)?;

        self.check_signature_for_message(address.trim(), signature.trim(), message)
    }
}

/// The first flag in `flags` whose recovered public key equals `target`.
///
/// The search space is a fixed four-element enumeration, so this is a pure
/// lookup, not a probabilistic loop.
pub fn find_recovery_flag(
    flags: impl IntoIterator<Item = u8>,
    target: &str,
    signature: &Signature,
    hash: &[u8; 32],
) -> Result<Option<u8>, SignatureError> {
    for flag in flags {
        if recover_public_key(flag, signature, hash)?.as_deref() == Some(target) {
            return Ok(Some(flag));
        }
    }
    Ok(None)
}

fn sha256d(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

fn var_int(length: usize) -> Result<Vec<u8>, WalletError> {
    if length < 0xfd {
        Ok(vec![length as u8])
    } else if length <= 0xffff {
        let mut bytes = vec![0xfd];
        bytes.extend_from_slice(&(length as u16).to_le_bytes());
        Ok(bytes)
    } else if length <= 0xffff_ffff {
        let mut bytes = vec![0xfe];
        bytes.extend_from_slice(&(length as u32).to_le_bytes());
        Ok(bytes)
    } else {
        Err(WalletError::OversizedMessage)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_wallet() -> Wallet {
        let key = PrivateKey::from_hex(
            "0101010101010101010101010101010101010101010101010101010101010101",
        )
        .unwrap();
        Wallet::new(Some(key))
    }

    #[test]
    fn known_addresses_for_the_unit_scalar() {
        let wallet = Wallet::new(Some(PrivateKey::from_hex("01").unwrap()));
        assert_eq!(wallet.address().unwrap(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(
            wallet.uncompressed_address().unwrap(),
            "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"
        );
    }

    #[test]
    fn default_magic_is_the_varint_prefixed_banner() {
        let wallet = Wallet::default();
        let magic = wallet.message_magic().unwrap();
        assert_eq!(magic[0] as usize, magic.len() - 1);
        assert_eq!(&magic[1..], b"Bitcoin Signed Message:\n");
    }

    #[test]
    fn custom_magic_is_used_verbatim() {
        let mut wallet = Wallet::default();
        wallet.set_message_magic(Some("my own magic".to_string()));
        assert_eq!(wallet.message_magic().unwrap(), b"my own magic".to_vec());
    }

    #[test]
    fn keyless_wallets_refuse_to_sign() {
        let wallet = Wallet::default();
        assert!(matches!(
            wallet.sign_message("hi", true, None),
            Err(WalletError::NoPrivateKey)
        ));
        assert!(matches!(wallet.address(), Err(WalletError::NoPrivateKey)));
    }

    #[test]
    fn var_int_widths() {
        assert_eq!(var_int(0x10).unwrap(), vec![0x10]);
        assert_eq!(var_int(0xfd).unwrap(), vec![0xfd, 0xfd, 0x00]);
        assert_eq!(var_int(0x1234).unwrap(), vec![0xfd, 0x34, 0x12]);
        assert_eq!(
            var_int(0x0001_0000).unwrap(),
            vec![0xfe, 0x00, 0x00, 0x01, 0x00]
        );
    }

    #[test]
    fn malformed_signature_payloads_are_rejected() {
        let wallet = test_wallet();
        let address = wallet.address().unwrap();
        assert!(matches!(
            wallet.check_signature_for_message(&address, "not base64 !!!", "hi"),
            Err(WalletError::MalformedEnvelope)
        ));
        // valid base64 of the wrong length
        assert!(matches!(
            wallet.check_signature_for_message(&address, &STANDARD.encode([0u8; 10]), "hi"),
            Err(WalletError::MalformedEnvelope)
        ));
    }
}
