//! Stable status codes for envelope operations.
//!
//! Callers compare against these strings and indices across versions, so
//! both are frozen: new codes may be appended, existing entries never
//! change. Messages carry no interpolated data, which keeps variable (and
//! potentially secret-adjacent) state out of every failure path.

use serde::{Deserialize, Serialize};

/// Stable result codes for sealing and opening envelopes.
///
/// Index 0 is the success sentinel; its message is the empty string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum StatusCode {
    /// Operation completed.
    Success = 0,
    /// Caller supplied an empty recipient list or an impossible size.
    InvalidParameter = 1,
    /// A recipient Ed25519 key is malformed or not on the curve.
    InvalidPublicKey = 2,
    /// Envelope header fields are inconsistent.
    InvalidBlob = 3,
    /// Envelope is shorter than its header implies.
    TruncatedBlob = 4,
    /// The random source failed to produce entropy.
    RngFailure = 5,
    /// A cipher primitive reported failure while sealing.
    CryptoFailure = 6,
    /// Tag mismatch, wrong key, or tampered ciphertext while opening.
    DecryptFailure = 7,
}

impl StatusCode {
    /// Get the fixed message for this status.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "",
            Self::InvalidParameter => "invalid parameter",
            Self::InvalidPublicKey => "invalid recipient public key",
            Self::InvalidBlob => "malformed envelope header",
            Self::TruncatedBlob => "envelope is truncated",
            Self::RngFailure => "random source failure",
            Self::CryptoFailure => "cipher failure while sealing",
            Self::DecryptFailure => "unable to decrypt envelope",
        }
    }

    /// Convert from u8.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Success),
            1 => Some(Self::InvalidParameter),
            2 => Some(Self::InvalidPublicKey),
            3 => Some(Self::InvalidBlob),
            4 => Some(Self::TruncatedBlob),
            5 => Some(Self::RngFailure),
            6 => Some(Self::CryptoFailure),
            7 => Some(Self::DecryptFailure),
            _ => None,
        }
    }

    /// Whether this status is the success sentinel.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
