//! Bitcoin-compatible addresses, WIF exports and signed messages.
//!
//! This crate is the text-encoding and protocol layer on top of
//! [`curvefun`] (curve arithmetic, keys) and [`sigfun`] (recoverable ECDSA):
//!
//! * [`base58`] — arbitrary-precision Base58 with leading-zero preservation
//! * [`address`] — HASH160, Base58Check, address/WIF validation
//! * [`wallet`] — the `"Signed Message"` envelope protocol
//!
//! ```
//! use curvefun::PrivateKey;
//! use walletfun::Wallet;
//!
//! let wallet = Wallet::new(Some(PrivateKey::generate().unwrap()));
//! let envelope = wallet.sign_message("pay to the order of...", true, None).unwrap();
//! assert!(wallet.check_signature_for_raw_message(&envelope).unwrap());
//! ```

pub mod address;
pub mod base58;
pub mod wallet;

pub use address::{AddressError, DecodedWif};
pub use base58::Base58Error;
pub use wallet::{Wallet, WalletError, find_recovery_flag};
