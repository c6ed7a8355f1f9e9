//! Error types for cryptographic operations.

use thiserror::Error;

/// Errors that can occur during cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Invalid key length.
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length.
        expected: usize,
        /// Actual key length.
        actual: usize,
    },

    /// An Ed25519 public key failed to decode as a canonical curve point.
    #[error("Invalid Ed25519 public key encoding")]
    InvalidPublicKey,

    /// A Diffie-Hellman exchange produced a low-order shared point.
    #[error("Key exchange produced a low-order shared point")]
    LowOrderPoint,

    /// Encryption failed.
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed (invalid ciphertext or key).
    #[error("Decryption failed: invalid ciphertext or key")]
    Decryption,

    /// Random number generation failed.
    #[error("Random number generation failed: {0}")]
    Rng(String),
}

/// Result type for cryptographic operations.
pub type Result<T> = std::result::Result<T, CryptoError>;
