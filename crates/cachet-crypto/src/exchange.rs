//! X25519 Diffie-Hellman key exchange.
//!
//! The envelope performs one ephemeral key exchange per recipient, all of
//! them against the same single-use scalar, so the secret type here is
//! reusable rather than consumed on first use.
//!
//! ## Security Notes
//!
//! - Private scalars and shared points are zeroized on drop
//! - Exchanges that land on a low-order point are rejected
//! - Shared points must go through the derivation chain, never directly
//!   into a cipher

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{CryptoError, Result};

/// Size of an X25519 public key in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of an X25519 private scalar in bytes.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Size of a shared point in bytes.
pub const SHARED_POINT_SIZE: usize = 32;

/// X25519 public key for key exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangePublicKey {
    bytes: [u8; PUBLIC_KEY_SIZE],
}

impl ExchangePublicKey {
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
}

impl From<[u8; PUBLIC_KEY_SIZE]> for ExchangePublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self { bytes }
    }
}

impl std::fmt::Debug for ExchangePublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ExchangePublicKey({:02x}{:02x}..)",
            self.bytes[0], self.bytes[1]
        )
    }
}

/// X25519 private scalar for key exchange.
///
/// Used both for the per-envelope ephemeral key and for the scalar image of
/// a recipient's long-term identity seed.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ExchangeSecret {
    bytes: [u8; PRIVATE_KEY_SIZE],
}

impl ExchangeSecret {
    /// Generate a new random private scalar.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Rng` if the system random source fails.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; PRIVATE_KEY_SIZE];
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
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: PRIVATE_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; PRIVATE_KEY_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Get the corresponding public key.
    pub fn public_key(&self) -> ExchangePublicKey {
        let secret = StaticSecret::from(self.bytes);
        let public = PublicKey::from(&secret);
        ExchangePublicKey::from(public.to_bytes())
    }

    /// Perform Diffie-Hellman key exchange with the peer's public key.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::LowOrderPoint` if the peer key is a low-order
    /// point and the exchange therefore contributed no secret material.
    pub fn diffie_hellman(&self, peer_public: &ExchangePublicKey) -> Result<SharedPoint> {
        let secret = StaticSecret::from(self.bytes);
        let peer = PublicKey::from(peer_public.bytes);
        let shared = secret.diffie_hellman(&peer);
        if !shared.was_contributory() {
            return Err(CryptoError::LowOrderPoint);
        }
        Ok(SharedPoint {
            bytes: shared.to_bytes(),
        })
    }
}

impl From<[u8; PRIVATE_KEY_SIZE]> for ExchangeSecret {
    fn from(bytes: [u8; PRIVATE_KEY_SIZE]) -> Self {
        Self { bytes }
    }
}

impl std::fmt::Debug for ExchangeSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExchangeSecret([REDACTED])")
    }
}

// Clone intentionally NOT implemented for ExchangeSecret: private scalars
// must not be duplicated in memory.

/// Shared point produced by a Diffie-Hellman exchange.
///
/// This is raw curve output and must be fed to the derivation chain, not
/// used as an encryption key.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedPoint {
    bytes: [u8; SHARED_POINT_SIZE],
}

impl SharedPoint {
    /// Get the shared point as bytes.
    pub fn as_bytes(&self) -> &[u8; SHARED_POINT_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for SharedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SharedPoint([REDACTED])")
    }
}
