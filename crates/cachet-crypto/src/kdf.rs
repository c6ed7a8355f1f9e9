//! SHAKE256 key derivation chain.
//!
//! One XOF covers every derivation in the envelope, with the domains kept
//! apart by disjoint input shapes. Output lengths and byte order are part of
//! the wire format and must never change:
//!
//! ```text
//! wrap material:  SHAKE256(Q || ephemeralPub || recipientPub), 48 bytes
//!                 -> [0..32] AES-256-CTR key, [32..48] IV
//! seal material:  SHAKE256(S), 44 bytes
//!                 -> [0..32] AES-256-GCM key, [32..44] nonce
//! fingerprint:    SHAKE256(recipientPub), 16 bytes -> first 7
//! ```
//!
//! Binding both public keys into the wrap derivation ties each wrapped
//! record to the exact key pair that produced it; the seal nonce is derived
//! from the per-envelope payload secret, so it is fresh whenever the secret
//! is.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::exchange::{ExchangePublicKey, SharedPoint};
use crate::{CryptoError, Result};

/// Size of the AES-256-CTR wrap key in bytes.
pub const WRAP_KEY_SIZE: usize = 32;

/// Size of the AES-256-CTR wrap IV in bytes.
pub const WRAP_IV_SIZE: usize = 16;

/// Size of the AES-256-GCM seal key in bytes.
pub const SEAL_KEY_SIZE: usize = 32;

/// Size of the AES-256-GCM seal nonce in bytes.
pub const SEAL_NONCE_SIZE: usize = 12;

/// Size of the per-envelope payload secret in bytes.
pub const PAYLOAD_SECRET_SIZE: usize = 32;

/// Size of a recipient fingerprint in bytes.
pub const FINGERPRINT_SIZE: usize = 7;

/// XOF read length the fingerprint is truncated from.
const FINGERPRINT_DIGEST_SIZE: usize = 16;

/// The random 32-byte root secret of one envelope.
///
/// Every recipient receives the same payload secret, wrapped under its own
/// exchange key; the seal key and nonce both derive from it.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PayloadSecret {
    bytes: [u8; PAYLOAD_SECRET_SIZE],
}

impl PayloadSecret {
    /// Sample a fresh payload secret.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Rng` if the system random source fails.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; PAYLOAD_SECRET_SIZE];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CryptoError::Rng(e.to_string()))?;
        Ok(Self { bytes })
    }

    /// Get the secret as bytes.
    ///
    /// # Security
    ///
    /// The bytes must only ever feed the derivation chain or the wrap
    /// cipher; never log or persist them.
    pub fn as_bytes(&self) -> &[u8; PAYLOAD_SECRET_SIZE] {
        &self.bytes
    }
}

impl From<[u8; PAYLOAD_SECRET_SIZE]> for PayloadSecret {
    fn from(bytes: [u8; PAYLOAD_SECRET_SIZE]) -> Self {
        Self { bytes }
    }
}

impl std::fmt::Debug for PayloadSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PayloadSecret([REDACTED])")
    }
}

/// Key and IV for wrapping the payload secret under one recipient.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct WrapMaterial {
    key: [u8; WRAP_KEY_SIZE],
    iv: [u8; WRAP_IV_SIZE],
}

impl WrapMaterial {
    /// Get the AES-256-CTR key.
    pub fn key(&self) -> &[u8; WRAP_KEY_SIZE] {
        &self.key
    }

    /// Get the AES-256-CTR IV.
    pub fn iv(&self) -> &[u8; WRAP_IV_SIZE] {
        &self.iv
    }
}

impl std::fmt::Debug for WrapMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WrapMaterial([REDACTED])")
    }
}

/// Key and nonce for sealing the payload.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SealMaterial {
    key: [u8; SEAL_KEY_SIZE],
    nonce: [u8; SEAL_NONCE_SIZE],
}

impl SealMaterial {
    /// Get the AES-256-GCM key.
    pub fn key(&self) -> &[u8; SEAL_KEY_SIZE] {
        &self.key
    }

    /// Get the AES-256-GCM nonce.
    pub fn nonce(&self) -> &[u8; SEAL_NONCE_SIZE] {
        &self.nonce
    }
}

impl std::fmt::Debug for SealMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SealMaterial([REDACTED])")
    }
}

/// Derive the wrap key and IV for one recipient.
///
/// The input is `Q || ephemeralPub || recipientPub`; both sides of the
/// exchange must pass the public keys in this order or the derived
/// material will not match.
pub fn derive_wrap_material(
    point: &SharedPoint,
    ephemeral: &ExchangePublicKey,
    recipient: &ExchangePublicKey,
) -> WrapMaterial {
    let mut hasher = Shake256::default();
    hasher.update(point.as_bytes());
    hasher.update(ephemeral.as_bytes());
    hasher.update(recipient.as_bytes());

    let mut material = WrapMaterial {
        key: [0u8; WRAP_KEY_SIZE],
        iv: [0u8; WRAP_IV_SIZE],
    };
    let mut reader = hasher.finalize_xof();
    reader.read(&mut material.key);
    reader.read(&mut material.iv);
    material
}

/// Derive the seal key and nonce from the payload secret.
pub fn derive_seal_material(secret: &PayloadSecret) -> SealMaterial {
    let mut hasher = Shake256::default();
    hasher.update(secret.as_bytes());

    let mut material = SealMaterial {
        key: [0u8; SEAL_KEY_SIZE],
        nonce: [0u8; SEAL_NONCE_SIZE],
    };
    let mut reader = hasher.finalize_xof();
    reader.read(&mut material.key);
    reader.read(&mut material.nonce);
    material
}

/// A 7-byte recipient fingerprint.
///
/// Computed as the first 7 bytes of `SHAKE256(recipientPub, 16)`. The
/// truncation is part of the wire format. A fingerprint only indexes
/// records; a collision costs the decoder one failed trial decryption and
/// nothing more.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint([u8; FINGERPRINT_SIZE]);

impl Fingerprint {
    /// Compute the fingerprint of an exchange public key.
    pub fn of(public: &ExchangePublicKey) -> Self {
        let mut hasher = Shake256::default();
        hasher.update(public.as_bytes());

        let mut digest = [0u8; FINGERPRINT_DIGEST_SIZE];
        hasher.finalize_xof().read(&mut digest);

        let mut bytes = [0u8; FINGERPRINT_SIZE];
        bytes.copy_from_slice(&digest[..FINGERPRINT_SIZE]);
        Self(bytes)
    }

    /// Create from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 7 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != FINGERPRINT_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: FINGERPRINT_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; FINGERPRINT_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Get the fingerprint as bytes.
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_SIZE] {
        &self.0
    }

    /// Convert to byte array.
    pub fn to_bytes(&self) -> [u8; FINGERPRINT_SIZE] {
        self.0
    }

    /// Compare against another fingerprint in constant time.
    pub fn constant_time_eq(&self, other: &Fingerprint) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fingerprint(")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}
