//! Property-based tests for the primitive layer.
//!
//! These verify the relations the envelope depends on for arbitrary
//! inputs:
//!
//! - Conversion consistency (a seed's scalar image matches its public
//!   key's point image)
//! - Derivation determinism and input sensitivity
//! - Wrap/seal roundtrips and rejection of mismatched material

use proptest::prelude::*;

use crate::{
    derive_seal_material, derive_wrap_material, open_payload, seal_payload, unwrap_secret,
    wrap_secret, ExchangeSecret, Fingerprint, IdentityPublicKey, IdentitySeed, PayloadSecret,
};

proptest! {
    /// The X25519 pair converted from a seed must match the pair converted
    /// from its public key, for every seed.
    #[test]
    fn identity_conversion_consistent(seed in prop::array::uniform32(any::<u8>())) {
        let seed = IdentitySeed::from(seed);

        let from_seed = seed.to_exchange().public_key();
        let from_public = seed.public_key().to_exchange().unwrap();

        prop_assert_eq!(from_seed, from_public);
    }

    /// Decoding arbitrary bytes as a public key either succeeds or fails
    /// cleanly; it never panics.
    #[test]
    fn arbitrary_public_key_bytes_handled(bytes in prop::array::uniform32(any::<u8>())) {
        let _ = IdentityPublicKey::from(bytes).to_exchange();
    }

    /// Exchange between the converted images of two seeds is symmetric.
    #[test]
    fn converted_exchange_symmetric(
        a in prop::array::uniform32(any::<u8>()),
        b in prop::array::uniform32(any::<u8>())
    ) {
        let a = IdentitySeed::from(a);
        let b = IdentitySeed::from(b);

        let a_scalar = a.to_exchange();
        let b_scalar = b.to_exchange();

        let ab = a_scalar.diffie_hellman(&b_scalar.public_key()).unwrap();
        let ba = b_scalar.diffie_hellman(&a_scalar.public_key()).unwrap();

        prop_assert_eq!(ab.as_bytes(), ba.as_bytes());
    }

    /// Wrap material is a pure function of its three inputs.
    #[test]
    fn wrap_material_deterministic(
        ephemeral in prop::array::uniform32(any::<u8>()),
        recipient in prop::array::uniform32(any::<u8>())
    ) {
        let ephemeral = ExchangeSecret::from(ephemeral);
        let recipient = ExchangeSecret::from(recipient);
        let recipient_pub = recipient.public_key();
        let point = ephemeral.diffie_hellman(&recipient_pub).unwrap();

        let a = derive_wrap_material(&point, &ephemeral.public_key(), &recipient_pub);
        let b = derive_wrap_material(&point, &ephemeral.public_key(), &recipient_pub);

        prop_assert_eq!(a.key(), b.key());
        prop_assert_eq!(a.iv(), b.iv());
    }

    /// Seal material is a pure function of the payload secret, and distinct
    /// secrets give distinct material.
    #[test]
    fn seal_material_deterministic_and_sensitive(
        s1 in prop::array::uniform32(any::<u8>()),
        s2 in prop::array::uniform32(any::<u8>())
    ) {
        let first = PayloadSecret::from(s1);
        let second = PayloadSecret::from(s2);

        let first_material_a = derive_seal_material(&first);
        let first_material_b = derive_seal_material(&first);
        prop_assert_eq!(first_material_a.key(), first_material_b.key());

        if s1 != s2 {
            let second_material = derive_seal_material(&second);
            prop_assert_ne!(first_material_a.key(), second_material.key());
        }
    }

    /// Wrapping then unwrapping under the same material is the identity.
    #[test]
    fn wrap_roundtrip(
        secret in prop::array::uniform32(any::<u8>()),
        ephemeral in prop::array::uniform32(any::<u8>()),
        recipient in prop::array::uniform32(any::<u8>())
    ) {
        let secret = PayloadSecret::from(secret);
        let ephemeral = ExchangeSecret::from(ephemeral);
        let recipient_pub = ExchangeSecret::from(recipient).public_key();
        let point = ephemeral.diffie_hellman(&recipient_pub).unwrap();
        let material = derive_wrap_material(&point, &ephemeral.public_key(), &recipient_pub);

        let unwrapped = unwrap_secret(&wrap_secret(&secret, &material), &material);
        prop_assert_eq!(secret.as_bytes(), unwrapped.as_bytes());
    }

    /// Seal/open roundtrip for arbitrary payloads.
    #[test]
    fn seal_roundtrip(
        secret in prop::array::uniform32(any::<u8>()),
        plaintext in prop::collection::vec(any::<u8>(), 0..2000)
    ) {
        let material = derive_seal_material(&PayloadSecret::from(secret));

        let body = seal_payload(&plaintext, &material).unwrap();
        let opened = open_payload(&body, &material).unwrap();

        prop_assert_eq!(plaintext, opened);
    }

    /// Flipping any bit of a sealed body breaks the tag.
    #[test]
    fn sealed_body_tamper_detected(
        secret in prop::array::uniform32(any::<u8>()),
        plaintext in prop::collection::vec(any::<u8>(), 1..200),
        index in any::<usize>(),
        bit in 0u8..8
    ) {
        let material = derive_seal_material(&PayloadSecret::from(secret));
        let mut body = seal_payload(&plaintext, &material).unwrap();

        let index = index % body.len();
        body[index] ^= 1 << bit;

        prop_assert!(open_payload(&body, &material).is_err());
    }

    /// Fingerprints are deterministic over the exchange key.
    #[test]
    fn fingerprint_deterministic(scalar in prop::array::uniform32(any::<u8>())) {
        let public = ExchangeSecret::from(scalar).public_key();
        prop_assert_eq!(Fingerprint::of(&public), Fingerprint::of(&public));
    }
}
