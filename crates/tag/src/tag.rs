//! Tag reconstruction and comparison.

use gf2_128::Gf2_128;
use subtle::ConstantTimeEq;

use crate::TagError;

/// Length of an AES-GCM tag in bytes.
pub const TAG_LEN: usize = 16;

/// An AES-GCM ciphertext with its trailing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    body: Vec<u8>,
    tag: [u8; TAG_LEN],
}

impl Ciphertext {
    /// Splits `bytes` into the encrypted payload and the trailing tag.
    pub fn new(mut bytes: Vec<u8>) -> Result<Self, TagError> {
        if bytes.len() < TAG_LEN {
            return Err(TagError::ciphertext_too_short(bytes.len()));
        }

        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&bytes[bytes.len() - TAG_LEN..]);
        bytes.truncate(bytes.len() - TAG_LEN);

        Ok(Self { body: bytes, tag })
    }

    /// Returns the encrypted payload, without the tag.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the tag.
    pub fn tag(&self) -> &[u8; TAG_LEN] {
        &self.tag
    }
}

impl TryFrom<Vec<u8>> for Ciphertext {
    type Error = TagError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl TryFrom<&[u8]> for Ciphertext {
    type Error = TagError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::new(bytes.to_vec())
    }
}

/// Outcome of a tag verification.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationResult {
    /// The reconstructed tag matches the tag of the ciphertext.
    Verified,
    /// The reconstructed tag does not match.
    AuthenticationFailed,
}

impl VerificationResult {
    /// Returns `true` if the tag was verified.
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationResult::Verified)
    }
}

impl From<VerificationResult> for bool {
    fn from(result: VerificationResult) -> Self {
        result.is_verified()
    }
}

/// Combines the local GHASH share, the local share of the encrypted counter block and the
/// peer's tag share into the full tag.
pub fn reconstruct_tag(
    partial_ghash: Gf2_128,
    encrypted_iv_share: Gf2_128,
    tag_share: Gf2_128,
) -> Gf2_128 {
    partial_ghash + encrypted_iv_share + tag_share
}

/// Compares the tag of a ciphertext with a reconstructed tag in constant time.
pub fn check_tag(expected: &[u8; TAG_LEN], reconstructed: Gf2_128) -> VerificationResult {
    let reconstructed = reconstructed.to_be_bytes();

    if bool::from(expected.as_slice().ct_eq(reconstructed.as_slice())) {
        VerificationResult::Verified
    } else {
        VerificationResult::AuthenticationFailed
    }
}
