//! AES symmetric layers of the envelope.
//!
//! Two ciphers with two distinct jobs:
//!
//! - **AES-256-CTR** wraps the 32-byte payload secret for each recipient.
//!   The wrap carries no authenticator of its own; a wrong unwrap simply
//!   yields a candidate secret whose derived seal key fails the tag check.
//! - **AES-256-GCM** seals the payload with empty additional data. The tag
//!   is appended to the ciphertext and is the sole authenticator of the
//!   envelope.

use aes::Aes256;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::kdf::{PayloadSecret, SealMaterial, WrapMaterial, PAYLOAD_SECRET_SIZE};
use crate::{CryptoError, Result};

/// Size of a wrapped payload secret in bytes (CTR keeps the length).
pub const WRAPPED_SECRET_SIZE: usize = PAYLOAD_SECRET_SIZE;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

type Aes256Ctr = Ctr128BE<Aes256>;

/// The AES-256-CTR encryption of a payload secret under one recipient's
/// wrap material.
///
/// This is public wire data; it reveals nothing without the matching
/// exchange key.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappedSecret([u8; WRAPPED_SECRET_SIZE]);

impl WrappedSecret {
    /// Create from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != WRAPPED_SECRET_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: WRAPPED_SECRET_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; WRAPPED_SECRET_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Get the wrapped secret as bytes.
    pub fn as_bytes(&self) -> &[u8; WRAPPED_SECRET_SIZE] {
        &self.0
    }

    /// Convert to byte array.
    pub fn to_bytes(&self) -> [u8; WRAPPED_SECRET_SIZE] {
        self.0
    }
}

impl std::fmt::Debug for WrappedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WrappedSecret({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

/// Encrypt the payload secret under one recipient's wrap material.
pub fn wrap_secret(secret: &PayloadSecret, material: &WrapMaterial) -> WrappedSecret {
    let mut block = *secret.as_bytes();
    let mut cipher = Aes256Ctr::new(material.key().into(), material.iv().into());
    cipher.apply_keystream(&mut block);
    WrappedSecret(block)
}

/// Decrypt a wrapped secret into a candidate payload secret.
///
/// CTR offers no integrity: the result is only known to be the real secret
/// once the payload tag verifies.
pub fn unwrap_secret(wrapped: &WrappedSecret, material: &WrapMaterial) -> PayloadSecret {
    let mut block = wrapped.0;
    let mut cipher = Aes256Ctr::new(material.key().into(), material.iv().into());
    cipher.apply_keystream(&mut block);
    let secret = PayloadSecret::from(block);
    block.zeroize();
    secret
}

/// Seal a payload with AES-256-GCM and empty additional data.
///
/// Returns `ciphertext || tag`.
///
/// # Errors
///
/// Returns `CryptoError::Encryption` if the cipher reports failure.
pub fn seal_payload(plaintext: &[u8], material: &SealMaterial) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(material.key().into());
    cipher
        .encrypt(Nonce::from_slice(material.nonce()), plaintext)
        .map_err(|_| CryptoError::Encryption("AES-256-GCM sealing failed".into()))
}

/// Open a sealed payload.
///
/// # Errors
///
/// Returns `CryptoError::Decryption` if the body is shorter than a tag, the
/// tag check fails, or the key material is wrong. The tag comparison inside
/// the cipher is constant-time.
pub fn open_payload(body: &[u8], material: &SealMaterial) -> Result<Vec<u8>> {
    if body.len() < TAG_SIZE {
        return Err(CryptoError::Decryption);
    }
    let cipher = Aes256Gcm::new(material.key().into());
    cipher
        .decrypt(Nonce::from_slice(material.nonce()), body)
        .map_err(|_| CryptoError::Decryption)
}
