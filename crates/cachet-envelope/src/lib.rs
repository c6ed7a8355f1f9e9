//! # cachet-envelope
//!
//! A multi-recipient sealed envelope: one opaque blob any listed recipient
//! can open with only its own Ed25519 seed.
//!
//! ```
//! use cachet_crypto::IdentitySeed;
//! use cachet_envelope::{open, seal};
//!
//! let alice = IdentitySeed::generate().unwrap();
//! let bob = IdentitySeed::generate().unwrap();
//!
//! let blob = seal(&[alice.public_key(), bob.public_key()], b"hello").unwrap();
//!
//! assert_eq!(open(&alice, &blob).unwrap(), b"hello");
//! assert_eq!(open(&bob, &blob).unwrap(), b"hello");
//! ```
//!
//! ## What the envelope does and does not promise
//!
//! - Any listed recipient recovers the payload; nobody else does.
//! - The GCM tag authenticates the payload; any bit flip in the body is
//!   detected. It does NOT authenticate the sender — provenance is out of
//!   scope.
//! - The ephemeral keypair gives per-envelope forward secrecy for the
//!   payload key, not for recipient identity keys.
//! - All recipients share the payload secret by construction; nothing
//!   stops one recipient passing the blob (or payload) to another party.
//!
//! ## Stability
//!
//! The wire layout ([`wire`]) and the status table ([`status`]) are frozen;
//! there is no version byte.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod envelope;
pub mod error;
pub mod limits;
pub mod status;
pub mod wire;

#[cfg(test)]
mod proptests;

pub use envelope::{open, seal};
pub use error::{EnvelopeError, Result};
pub use status::StatusCode;
pub use wire::{EnvelopeView, RecipientRecord};
