//! Two-party verification of AES-GCM tags.
//!
//! The GHASH key `H` is never reconstructed. Instead each party holds additive shares of the
//! powers `H^1 .. H^n` and of the encrypted initial counter block `E_K(J0)`. One party
//! evaluates GHASH on its shares, adds its share of `E_K(J0)` and the tag share received from
//! the peer, and compares the sum against the tag appended to the ciphertext.
//!
//! ```text
//! tag == partial_ghash(aad, ciphertext, power_shares) + encrypted_iv_share + tag_share
//! ```
//!
//! [`verify`] is the entry point for already decoded values. [`TagVerifier`] adds
//! configuration, parsing of serialized [`TagRequest`]s and parallel batch verification.

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod encoding;
mod error;
pub mod ghash;
mod request;
pub mod tag;
mod verifier;

pub use config::{VerifierConfig, VerifierConfigBuilder, VerifierConfigBuilderError};
pub use encoding::ShareEncoding;
pub use error::{ErrorKind, TagError};
pub use ghash::PowerShareTable;
pub use request::{TagInput, TagRequest};
pub use tag::{Ciphertext, VerificationResult};
pub use verifier::{verify, TagVerifier};

pub use gf2_128::Gf2_128;
