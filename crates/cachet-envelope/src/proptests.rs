//! Property-based tests for the envelope operations.

use proptest::prelude::*;

use cachet_crypto::{IdentityPublicKey, IdentitySeed};

use crate::wire::{min_envelope_size, EnvelopeView};
use crate::{open, seal, EnvelopeError};

fn identities(seeds: &[[u8; 32]]) -> (Vec<IdentitySeed>, Vec<IdentityPublicKey>) {
    let seeds: Vec<_> = seeds.iter().map(|s| IdentitySeed::from(*s)).collect();
    let publics = seeds.iter().map(|s| s.public_key()).collect();
    (seeds, publics)
}

proptest! {
    // Sealing walks one DH per recipient, so keep counts small here; the
    // integration suite covers the ten-recipient scenarios.

    /// Every listed recipient recovers the exact payload.
    #[test]
    fn all_recipients_roundtrip(
        seed_bytes in prop::collection::vec(prop::array::uniform32(any::<u8>()), 1..5),
        plaintext in prop::collection::vec(any::<u8>(), 0..500)
    ) {
        let (seeds, publics) = identities(&seed_bytes);

        let blob = seal(&publics, &plaintext).unwrap();
        for seed in &seeds {
            prop_assert_eq!(open(seed, &blob).unwrap(), plaintext.clone());
        }
    }

    /// A seed outside the recipient list cannot open the envelope.
    #[test]
    fn outsiders_rejected(
        seed_bytes in prop::collection::vec(prop::array::uniform32(any::<u8>()), 1..4),
        outsider in prop::array::uniform32(any::<u8>()),
        plaintext in prop::collection::vec(any::<u8>(), 1..200)
    ) {
        prop_assume!(!seed_bytes.contains(&outsider));

        let (_, publics) = identities(&seed_bytes);
        let blob = seal(&publics, &plaintext).unwrap();

        let result = open(&IdentitySeed::from(outsider), &blob);
        prop_assert_eq!(result.unwrap_err(), EnvelopeError::DecryptFailure);
    }

    /// Flipping any bit of the sealed body is detected.
    #[test]
    fn body_tamper_detected(
        seed_bytes in prop::collection::vec(prop::array::uniform32(any::<u8>()), 1..3),
        plaintext in prop::collection::vec(any::<u8>(), 1..200),
        offset in any::<usize>(),
        bit in 0u8..8
    ) {
        let (seeds, publics) = identities(&seed_bytes);
        let mut blob = seal(&publics, &plaintext).unwrap();

        let body_start = min_envelope_size(seed_bytes.len()) - 16;
        let index = body_start + offset % (blob.len() - body_start);
        blob[index] ^= 1 << bit;

        for seed in &seeds {
            prop_assert_eq!(open(seed, &blob).unwrap_err(), EnvelopeError::DecryptFailure);
        }
    }

    /// Every prefix strictly shorter than the minimum size is reported as
    /// truncated.
    #[test]
    fn truncation_detected(
        seed_bytes in prop::collection::vec(prop::array::uniform32(any::<u8>()), 1..3),
        plaintext in prop::collection::vec(any::<u8>(), 0..100),
        cut in any::<usize>()
    ) {
        let (seeds, publics) = identities(&seed_bytes);
        let blob = seal(&publics, &plaintext).unwrap();

        let len = cut % min_envelope_size(seed_bytes.len());
        let result = open(&seeds[0], &blob[..len]);
        prop_assert_eq!(result.unwrap_err(), EnvelopeError::TruncatedBlob);
    }

    /// Opening does not mutate the blob and is repeatable.
    #[test]
    fn open_is_idempotent(
        seed in prop::array::uniform32(any::<u8>()),
        plaintext in prop::collection::vec(any::<u8>(), 0..300)
    ) {
        let seed = IdentitySeed::from(seed);
        let blob = seal(&[seed.public_key()], &plaintext).unwrap();
        let pristine = blob.clone();

        let first = open(&seed, &blob).unwrap();
        let second = open(&seed, &blob).unwrap();

        prop_assert_eq!(&first, &plaintext);
        prop_assert_eq!(first, second);
        prop_assert_eq!(blob, pristine);
    }

    /// Two envelopes over identical input never share key material.
    #[test]
    fn sealing_is_fresh(
        seed in prop::array::uniform32(any::<u8>()),
        plaintext in prop::collection::vec(any::<u8>(), 0..200)
    ) {
        let seed = IdentitySeed::from(seed);
        let publics = [seed.public_key()];

        let a = seal(&publics, &plaintext).unwrap();
        let b = seal(&publics, &plaintext).unwrap();

        let view_a = EnvelopeView::parse(&a).unwrap();
        let view_b = EnvelopeView::parse(&b).unwrap();

        prop_assert_ne!(view_a.ephemeral(), view_b.ephemeral());
        prop_assert_ne!(
            view_a.record(0).unwrap().wrapped,
            view_b.record(0).unwrap().wrapped
        );
        prop_assert_ne!(view_a.body(), view_b.body());
    }
}
