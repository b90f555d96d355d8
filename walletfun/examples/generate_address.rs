//! Generate a fresh key pair and print its address and WIF export.

use curvefun::PrivateKey;
use walletfun::{Wallet, address};

fn main() {
    let key = PrivateKey::generate().expect("OS randomness is available");
    let wif = address::wif_encode(&key.to_hex(), "80", true, false).expect("key encodes");

    let wallet = Wallet::new(Some(key));
    println!("address: {}", wallet.address().expect("address derives"));
    println!("wif:     {wif}");
}
