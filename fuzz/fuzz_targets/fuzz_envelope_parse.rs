//! Fuzz target for envelope container parsing.
//!
//! Arbitrary bytes must parse or be rejected with a structural error;
//! parsing must never panic, and a successful parse must expose only
//! in-bounds records.

#![no_main]

use libfuzzer_sys::fuzz_target;
use cachet_envelope::EnvelopeView;

fuzz_target!(|data: &[u8]| {
    if let Ok(view) = EnvelopeView::parse(data) {
        for index in 0..view.recipient_count() {
            let _ = view.record(index);
        }
        let _ = view.record(view.recipient_count());
        let _ = view.body();
    }
});
