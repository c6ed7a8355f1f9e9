//! # cachet-crypto
//!
//! Cryptographic primitives for the cachet sealed envelope.
//!
//! This crate provides the building blocks the envelope layer composes:
//!
//! - **Identity keys**: Ed25519 seeds and public keys, with their exact
//!   Curve25519 images for key exchange
//! - **Key Exchange**: X25519 with low-order point rejection
//! - **Key Derivation**: a SHAKE256 chain producing cipher material and
//!   recipient fingerprints
//! - **Symmetric Encryption**: AES-256-CTR secret wrapping and AES-256-GCM
//!   payload sealing
//!
//! ## Security
//!
//! All secret data implements `Zeroize` and is wiped on drop, so secrets
//! created inside a failed operation do not outlive it. Debug output for
//! secret types is redacted. Fingerprint comparisons are constant-time.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod exchange;
pub mod identity;
pub mod kdf;
pub mod symmetric;

#[cfg(test)]
mod proptests;

pub use error::{CryptoError, Result};
pub use exchange::{ExchangePublicKey, ExchangeSecret, SharedPoint};
pub use identity::{IdentityPublicKey, IdentitySeed};
pub use kdf::{
    derive_seal_material, derive_wrap_material, Fingerprint, PayloadSecret, SealMaterial,
    WrapMaterial,
};
pub use symmetric::{open_payload, seal_payload, unwrap_secret, wrap_secret, WrappedSecret};
