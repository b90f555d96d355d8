//! End-to-end exercises of the signed-message protocol.

use curvefun::PrivateKey;
use walletfun::{Wallet, WalletError};

fn wallet_with_key(fill: u8) -> Wallet {
    let key = PrivateKey::from_hex(&curvefun::hex::encode(&[fill; 32])).unwrap();
    Wallet::new(Some(key))
}

#[test]
fn sign_and_verify_round_trip_compressed() {
    let wallet = wallet_with_key(0x01);
    let envelope = wallet.sign_message("hello world", true, None).unwrap();
    assert!(wallet.check_signature_for_raw_message(&envelope).unwrap());
}

#[test]
fn sign_and_verify_round_trip_uncompressed() {
    let wallet = wallet_with_key(0x02);
    let envelope = wallet.sign_message("hello world", false, None).unwrap();
    assert!(wallet.check_signature_for_raw_message(&envelope).unwrap());
}

#[test]
fn envelope_carries_the_expected_framing() {
    let wallet = wallet_with_key(0x03);
    let envelope = wallet.sign_message("framed", true, None).unwrap();
    assert!(envelope.contains("-----BEGIN BITCOIN SIGNED MESSAGE-----"));
    assert!(envelope.contains("framed"));
    assert!(envelope.contains("-----BEGIN SIGNATURE-----"));
    assert!(envelope.contains(&wallet.address().unwrap()));
    assert!(envelope.contains("-----END BITCOIN SIGNED MESSAGE-----"));
}

#[test]
fn verification_fails_for_a_different_message() {
    let wallet = wallet_with_key(0x04);
    let envelope = wallet.sign_message("the real message", true, None).unwrap();
    let tampered = envelope.replace("the real message", "a forged message");
    assert_eq!(wallet.check_signature_for_raw_message(&tampered).unwrap(), false);
}

#[test]
fn verification_fails_for_someone_elses_address() {
    let signer = wallet_with_key(0x05);
    let other = wallet_with_key(0x06);
    let envelope = signer.sign_message("mine", true, None).unwrap();
    let swapped = envelope.replace(
        &signer.address().unwrap(),
        &other.address().unwrap(),
    );
    assert_eq!(signer.check_signature_for_raw_message(&swapped).unwrap(), false);
}

#[test]
fn custom_magic_changes_the_commitment() {
    let mut signer = wallet_with_key(0x07);
    signer.set_message_magic(Some("custom magic".to_string()));
    let envelope = signer.sign_message("msg", true, None).unwrap();
    assert!(signer.check_signature_for_raw_message(&envelope).unwrap());

    // a default-magic wallet hashes differently, so the signature cannot check out
    let default_wallet = wallet_with_key(0x07);
    assert_eq!(
        default_wallet.check_signature_for_raw_message(&envelope).unwrap(),
        false
    );
}

#[test]
fn other_networks_get_their_own_markers_and_addresses() {
    let mut wallet = wallet_with_key(0x08);
    wallet.set_network_name("Zetacoin");
    wallet.set_network_prefix("50");
    let envelope = wallet.sign_message("on another chain", true, None).unwrap();
    assert!(envelope.contains("-----BEGIN ZETACOIN SIGNED MESSAGE-----"));
    assert!(wallet.check_signature_for_raw_message(&envelope).unwrap());
}

#[test]
fn long_messages_use_the_wide_varint() {
    let wallet = wallet_with_key(0x09);
    let message = "x".repeat(300);
    let envelope = wallet.sign_message(&message, true, None).unwrap();
    assert!(wallet.check_signature_for_raw_message(&envelope).unwrap());
}

#[test]
fn garbage_envelopes_are_malformed_not_false() {
    let wallet = wallet_with_key(0x0a);
    assert!(matches!(
        wallet.check_signature_for_raw_message("no markers here"),
        Err(WalletError::MalformedEnvelope)
    ));
}
