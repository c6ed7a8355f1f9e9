//! Fuzz target for identity key decoding.
//!
//! Conversion to the exchange curve must accept or reject arbitrary
//! 32-byte strings without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use cachet_crypto::IdentityPublicKey;

fuzz_target!(|data: &[u8]| {
    if let Ok(key) = IdentityPublicKey::from_bytes(data) {
        let _ = key.to_exchange();
    }
});
