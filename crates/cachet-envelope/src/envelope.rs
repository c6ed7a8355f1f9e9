//! Sealing and opening envelopes.
//!
//! A sealed envelope carries one payload encrypted once, plus one wrapped
//! copy of the payload secret per recipient:
//!
//! 1. A fresh X25519 ephemeral keypair and a fresh 32-byte payload secret
//!    are sampled per envelope.
//! 2. The payload is sealed under AES-256-GCM material derived from the
//!    payload secret.
//! 3. For each recipient, the secret is wrapped under AES-256-CTR material
//!    derived from the ephemeral/recipient exchange.
//!
//! Opening mirrors this with only the recipient's Ed25519 seed: convert,
//! exchange, unwrap, unseal. The GCM tag is the only authenticator — a
//! wrong seed or a tampered blob surfaces as the same `DecryptFailure`.
//!
//! Both operations are synchronous, keep no state between calls, and hold
//! every intermediate secret in a zeroize-on-drop type so failure paths
//! wipe as reliably as success paths.

use cachet_crypto::{
    derive_seal_material, derive_wrap_material, open_payload, seal_payload, unwrap_secret,
    wrap_secret, ExchangeSecret, Fingerprint, IdentityPublicKey, IdentitySeed, PayloadSecret,
};

use crate::error::{EnvelopeError, Result};
use crate::limits::MAX_RECIPIENTS;
use crate::wire::{self, EnvelopeView, RecipientRecord};

/// Seal a payload for a list of recipients.
///
/// Returns the envelope blob. Records appear in recipient-list order;
/// duplicate recipients are permitted and simply produce duplicate
/// records.
///
/// # Errors
///
/// - `InvalidParameter` if the list is empty or exceeds the u16 count field
/// - `InvalidPublicKey` if any recipient key fails point decoding
/// - `RngFailure` if the system random source fails
/// - `CryptoFailure` if a cipher primitive fails
///
/// On error no partial blob is produced.
pub fn seal(recipients: &[IdentityPublicKey], plaintext: &[u8]) -> Result<Vec<u8>> {
    if recipients.is_empty() || recipients.len() > MAX_RECIPIENTS {
        return Err(EnvelopeError::InvalidParameter);
    }

    let ephemeral = ExchangeSecret::generate()?;
    let ephemeral_public = ephemeral.public_key();

    let payload_secret = PayloadSecret::generate()?;
    let seal_material = derive_seal_material(&payload_secret);
    let body = seal_payload(plaintext, &seal_material)?;

    let mut records = Vec::with_capacity(recipients.len());
    for recipient in recipients {
        let recipient_public = recipient.to_exchange()?;
        let point = ephemeral.diffie_hellman(&recipient_public)?;
        let material = derive_wrap_material(&point, &ephemeral_public, &recipient_public);
        records.push(RecipientRecord {
            fingerprint: Fingerprint::of(&recipient_public),
            wrapped: wrap_secret(&payload_secret, &material),
        });
    }

    Ok(wire::assemble(&ephemeral_public, &records, &body))
}

/// Open an envelope with a recipient's Ed25519 seed.
///
/// Returns the payload. The blob is never mutated; opening twice yields
/// the same plaintext.
///
/// # Errors
///
/// - `TruncatedBlob` / `InvalidBlob` if the blob fails structural parsing
/// - `DecryptFailure` if the seed matches no record, the blob was tampered
///   with, or the ciphertext was substituted
pub fn open(seed: &IdentitySeed, blob: &[u8]) -> Result<Vec<u8>> {
    let view = EnvelopeView::parse(blob)?;

    let my_secret = seed.to_exchange();
    let my_public = my_secret.public_key();
    let my_fingerprint = Fingerprint::of(&my_public);

    // No fingerprint match still runs a full trial decryption against the
    // last record, so a caller absent from the table takes the same path
    // as one holding the wrong key. The trial fails at the tag check.
    let index = view
        .find(&my_fingerprint)
        .unwrap_or(view.recipient_count() - 1);
    let record = view.record(index).ok_or(EnvelopeError::InvalidBlob)?;

    let point = my_secret
        .diffie_hellman(view.ephemeral())
        .map_err(|_| EnvelopeError::DecryptFailure)?;
    let material = derive_wrap_material(&point, view.ephemeral(), &my_public);
    let candidate = unwrap_secret(&record.wrapped, &material);

    let seal_material = derive_seal_material(&candidate);
    open_payload(view.body(), &seal_material).map_err(|_| EnvelopeError::DecryptFailure)
}
