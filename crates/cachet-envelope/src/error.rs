//! Error types for envelope operations.
//!
//! Each failure variant corresponds to exactly one [`StatusCode`] table
//! entry, and its `Display` output is that entry's fixed string. Primitive
//! errors from the crypto layer are mapped here and never leak through the
//! public API.

use thiserror::Error;

use cachet_crypto::CryptoError;

use crate::status::StatusCode;

/// Errors that can occur while sealing or opening an envelope.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The recipient list is empty or larger than the wire format can hold.
    #[error("invalid parameter")]
    InvalidParameter,

    /// A recipient Ed25519 key is malformed or not on the curve.
    #[error("invalid recipient public key")]
    InvalidPublicKey,

    /// Envelope header fields are inconsistent.
    #[error("malformed envelope header")]
    InvalidBlob,

    /// The envelope is shorter than its header implies.
    #[error("envelope is truncated")]
    TruncatedBlob,

    /// The random source failed to produce entropy.
    #[error("random source failure")]
    RngFailure,

    /// A cipher primitive reported failure while sealing.
    #[error("cipher failure while sealing")]
    CryptoFailure,

    /// Tag mismatch, wrong key, or tampered ciphertext while opening.
    #[error("unable to decrypt envelope")]
    DecryptFailure,
}

impl EnvelopeError {
    /// Get the stable status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParameter => StatusCode::InvalidParameter,
            Self::InvalidPublicKey => StatusCode::InvalidPublicKey,
            Self::InvalidBlob => StatusCode::InvalidBlob,
            Self::TruncatedBlob => StatusCode::TruncatedBlob,
            Self::RngFailure => StatusCode::RngFailure,
            Self::CryptoFailure => StatusCode::CryptoFailure,
            Self::DecryptFailure => StatusCode::DecryptFailure,
        }
    }
}

// This mapping covers the sealing path. The opening path maps every
// primitive failure to DecryptFailure explicitly, because a low-order
// ephemeral key in a received blob is attacker-supplied input there, not a
// local cipher fault.
impl From<CryptoError> for EnvelopeError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidPublicKey => Self::InvalidPublicKey,
            CryptoError::InvalidKeyLength { .. } => Self::InvalidParameter,
            CryptoError::Rng(_) => Self::RngFailure,
            CryptoError::Encryption(_) | CryptoError::LowOrderPoint => Self::CryptoFailure,
            CryptoError::Decryption => Self::DecryptFailure,
        }
    }
}

/// Result type for envelope operations.
pub type Result<T> = std::result::Result<T, EnvelopeError>;
