//! Fuzz target for opening arbitrary blobs.
//!
//! Opening a fuzzed blob with a fixed seed must return a clean error (or,
//! for the vanishingly unlikely valid blob, a payload) without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use cachet_crypto::IdentitySeed;
use cachet_envelope::open;

fuzz_target!(|data: &[u8]| {
    let seed = IdentitySeed::from([0x42u8; 32]);
    let _ = open(&seed, data);
});
