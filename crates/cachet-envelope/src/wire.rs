//! Envelope container layout.
//!
//! The blob is a single fixed-offset concatenation with no versioning and
//! no padding:
//!
//! ```text
//! offset  size           field
//! 0       2              recipient count  (little-endian u16, >= 1)
//! 2       32             ephemeral X25519 public key
//! 34      count * 39     recipient table  (7-byte fingerprint || 32-byte
//!                        wrapped secret, in sender list order)
//! ...     rest           sealed body      (ciphertext || 16-byte GCM tag)
//! ```
//!
//! The GCM nonce is derived from the payload secret and never transmitted.
//! The minimum valid size is therefore `34 + 39 * count + 16`.

use cachet_crypto::exchange::PUBLIC_KEY_SIZE;
use cachet_crypto::kdf::FINGERPRINT_SIZE;
use cachet_crypto::symmetric::{TAG_SIZE, WRAPPED_SECRET_SIZE};
use cachet_crypto::{ExchangePublicKey, Fingerprint, WrappedSecret};

use crate::error::{EnvelopeError, Result};

/// Size of the recipient count field in bytes.
pub const COUNT_SIZE: usize = 2;

/// Size of the fixed header (count plus ephemeral key) in bytes.
pub const HEADER_SIZE: usize = COUNT_SIZE + PUBLIC_KEY_SIZE;

/// Size of one recipient table entry in bytes.
pub const RECORD_SIZE: usize = FINGERPRINT_SIZE + WRAPPED_SECRET_SIZE;

/// Smallest valid envelope for the given recipient count.
pub fn min_envelope_size(recipients: usize) -> usize {
    HEADER_SIZE + recipients * RECORD_SIZE + TAG_SIZE
}

/// One entry of the recipient table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecipientRecord {
    /// Fingerprint of the recipient's exchange public key.
    pub fingerprint: Fingerprint,
    /// The payload secret wrapped for this recipient.
    pub wrapped: WrappedSecret,
}

/// Assemble an envelope blob from its parts.
///
/// The caller guarantees `records` is non-empty and fits the u16 count
/// field; [`crate::seal`] enforces both before building any record.
pub(crate) fn assemble(
    ephemeral: &ExchangePublicKey,
    records: &[RecipientRecord],
    body: &[u8],
) -> Vec<u8> {
    let mut blob = Vec::with_capacity(HEADER_SIZE + records.len() * RECORD_SIZE + body.len());
    blob.extend_from_slice(&(records.len() as u16).to_le_bytes());
    blob.extend_from_slice(ephemeral.as_bytes());
    for record in records {
        blob.extend_from_slice(record.fingerprint.as_bytes());
        blob.extend_from_slice(record.wrapped.as_bytes());
    }
    blob.extend_from_slice(body);
    blob
}

/// A zero-copy parse of an envelope blob.
///
/// Parsing validates only the structure: the count field, the header, and
/// that the blob is long enough for the recipient table plus a sealed
/// body. Whether any record can actually be opened is a matter for
/// [`crate::open`].
#[derive(Debug)]
pub struct EnvelopeView<'a> {
    ephemeral: ExchangePublicKey,
    recipient_count: usize,
    records: &'a [u8],
    body: &'a [u8],
}

impl<'a> EnvelopeView<'a> {
    /// Parse an envelope blob.
    ///
    /// # Errors
    ///
    /// - `TruncatedBlob` if the blob is shorter than the header, or shorter
    ///   than the declared recipient table plus a GCM tag
    /// - `InvalidBlob` if the recipient count is zero
    pub fn parse(blob: &'a [u8]) -> Result<Self> {
        if blob.len() < HEADER_SIZE {
            return Err(EnvelopeError::TruncatedBlob);
        }

        let recipient_count = u16::from_le_bytes([blob[0], blob[1]]) as usize;
        if recipient_count == 0 {
            return Err(EnvelopeError::InvalidBlob);
        }
        if blob.len() < min_envelope_size(recipient_count) {
            return Err(EnvelopeError::TruncatedBlob);
        }

        let mut ephemeral = [0u8; PUBLIC_KEY_SIZE];
        ephemeral.copy_from_slice(&blob[COUNT_SIZE..HEADER_SIZE]);

        let table_end = HEADER_SIZE + recipient_count * RECORD_SIZE;
        Ok(Self {
            ephemeral: ExchangePublicKey::from(ephemeral),
            recipient_count,
            records: &blob[HEADER_SIZE..table_end],
            body: &blob[table_end..],
        })
    }

    /// The ephemeral public key the sender published.
    pub fn ephemeral(&self) -> &ExchangePublicKey {
        &self.ephemeral
    }

    /// Number of recipient records.
    pub fn recipient_count(&self) -> usize {
        self.recipient_count
    }

    /// Get the record at `index`, if in range.
    pub fn record(&self, index: usize) -> Option<RecipientRecord> {
        if index >= self.recipient_count {
            return None;
        }
        let offset = index * RECORD_SIZE;
        let entry = &self.records[offset..offset + RECORD_SIZE];
        Some(RecipientRecord {
            fingerprint: Fingerprint::from_bytes(&entry[..FINGERPRINT_SIZE])
                .expect("record slice has fingerprint size"),
            wrapped: WrappedSecret::from_bytes(&entry[FINGERPRINT_SIZE..])
                .expect("record slice has wrapped secret size"),
        })
    }

    /// Index of the first record whose fingerprint matches.
    ///
    /// Each comparison is constant-time; the scan order is public
    /// information (it mirrors the sender's recipient list).
    pub fn find(&self, fingerprint: &Fingerprint) -> Option<usize> {
        (0..self.recipient_count).find(|&index| {
            self.record(index)
                .is_some_and(|record| record.fingerprint.constant_time_eq(fingerprint))
        })
    }

    /// The sealed body (ciphertext plus tag).
    pub fn body(&self) -> &'a [u8] {
        self.body
    }
}
