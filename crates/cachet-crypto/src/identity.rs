//! Ed25519 identity keys and their Curve25519 images.
//!
//! Recipients are addressed by long-term Ed25519 keys, but the envelope
//! exchanges secrets over X25519. Both views live on Curve25519, so each
//! identity key has an exact Montgomery image:
//!
//! - public: decode the Edwards point and apply the birational map
//!   `u = (1 + y) / (1 - y)`
//! - private: the low 32 bytes of SHA-512(seed), clamped per RFC 7748
//!
//! The conversions are pure functions; a seed and its public key always map
//! to a matching X25519 pair.

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::exchange::{ExchangePublicKey, ExchangeSecret};
use crate::{CryptoError, Result};

/// Size of an Ed25519 public key in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of an Ed25519 private key seed in bytes.
pub const SEED_SIZE: usize = 32;

/// An Ed25519 identity public key.
///
/// Construction does not validate the curve point; decoding happens in
/// [`IdentityPublicKey::to_exchange`], which is where a malformed encoding
/// is reported.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityPublicKey {
    bytes: [u8; PUBLIC_KEY_SIZE],
}

impl IdentityPublicKey {
    /// Create from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; PUBLIC_KEY_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Get the key as bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.bytes
    }

    /// Convert to byte array.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.bytes
    }

    /// Convert to the corresponding X25519 public key.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidPublicKey` if the bytes are not a
    /// canonical Edwards point encoding.
    pub fn to_exchange(&self) -> Result<ExchangePublicKey> {
        let edwards =
            VerifyingKey::from_bytes(&self.bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(ExchangePublicKey::from(edwards.to_montgomery().to_bytes()))
    }
}

impl From<[u8; PUBLIC_KEY_SIZE]> for IdentityPublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self { bytes }
    }
}

impl std::fmt::Debug for IdentityPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IdentityPublicKey({:02x}{:02x}..)",
            self.bytes[0], self.bytes[1]
        )
    }
}

/// An Ed25519 private key seed.
///
/// The seed is the only long-term secret a recipient holds; both the
/// Ed25519 public key and the X25519 decryption scalar derive from it.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct IdentitySeed {
    bytes: [u8; SEED_SIZE],
}

impl IdentitySeed {
    /// Generate a new random seed.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Rng` if the system random source fails.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; SEED_SIZE];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CryptoError::Rng(e.to_string()))?;
        Ok(Self { bytes })
    }

    /// Create from raw bytes.
    ///
    /// # Security
    ///
    /// Only use bytes from a secure source.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SEED_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: SEED_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; SEED_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Derive the Ed25519 public key per RFC 8032.
    pub fn public_key(&self) -> IdentityPublicKey {
        let signing = SigningKey::from_bytes(&self.bytes);
        IdentityPublicKey::from(signing.verifying_key().to_bytes())
    }

    /// Convert to the corresponding X25519 private scalar.
    ///
    /// The scalar is the low half of SHA-512(seed) with the RFC 7748 clamp
    /// applied: bits 0-2 of the first byte cleared, bit 7 of the last byte
    /// cleared, bit 6 of the last byte set.
    pub fn to_exchange(&self) -> ExchangeSecret {
        let mut hash = Sha512::digest(self.bytes);

        let mut scalar = [0u8; 32];
        scalar.copy_from_slice(&hash[..32]);
        scalar[0] &= 248;
        scalar[31] &= 127;
        scalar[31] |= 64;

        let secret = ExchangeSecret::from(scalar);
        hash.as_mut_slice().zeroize();
        scalar.zeroize();
        secret
    }
}

impl From<[u8; SEED_SIZE]> for IdentitySeed {
    fn from(bytes: [u8; SEED_SIZE]) -> Self {
        Self { bytes }
    }
}

impl std::fmt::Debug for IdentitySeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IdentitySeed([REDACTED])")
    }
}

// Clone intentionally NOT implemented for IdentitySeed: long-term secrets
// must not be duplicated in memory.
