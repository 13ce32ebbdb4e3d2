use gf2_128::Gf2_128;
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    config::VerifierConfig,
    encoding::parse_aad_hex,
    ghash::{block_count, partial_ghash, PowerShareTable},
    request::{TagInput, TagRequest},
    tag::{check_tag, reconstruct_tag, Ciphertext},
    TagError, VerificationResult,
};

/// Verifies an AES-GCM tag from this party's shares and the peer's tag share.
///
/// The number of GHASH blocks is only bounded by `power_shares`; use a [`TagVerifier`] to
/// enforce [`VerifierConfig::max_blocks`]. A tag mismatch is returned as
/// [`VerificationResult::AuthenticationFailed`], an error means the inputs could not be
/// verified at all.
///
/// # Arguments
///
/// * `aad_hex` - Hex encoded associated data.
/// * `ciphertext` - Ciphertext followed by the 16-byte tag.
/// * `power_shares` - Shares of `H^1 .. H^n`.
/// * `encrypted_iv_share` - Share of the encrypted initial counter block.
/// * `tag_share` - The peer's tag share.
pub fn verify(
    aad_hex: &str,
    ciphertext: &[u8],
    power_shares: &PowerShareTable,
    encrypted_iv_share: Gf2_128,
    tag_share: Gf2_128,
) -> Result<VerificationResult, TagError> {
    let aad = parse_aad_hex(aad_hex)?;
    let ciphertext = Ciphertext::try_from(ciphertext)?;

    verify_parts(
        &aad,
        &ciphertext,
        power_shares,
        encrypted_iv_share,
        tag_share,
        None,
    )
}

/// Tag verifier.
///
/// Holds no state besides its configuration, so a single instance can verify any number of
/// tags, including concurrently.
#[derive(Debug, Clone, Default)]
pub struct TagVerifier {
    config: VerifierConfig,
}

impl TagVerifier {
    /// Creates a new verifier.
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    /// Returns the verifier configuration.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verifies a tag.
    pub fn verify(&self, input: &TagInput) -> Result<VerificationResult, TagError> {
        verify_parts(
            &input.aad,
            &input.ciphertext,
            &input.power_shares,
            input.encrypted_iv_share,
            input.tag_share,
            Some(self.config.max_blocks()),
        )
    }

    /// Parses a serialized request and verifies its tag.
    pub fn verify_request(&self, request: &TagRequest) -> Result<VerificationResult, TagError> {
        let input = request.load(self.config.share_encoding())?;
        self.verify(&input)
    }

    /// Verifies many tags in parallel.
    ///
    /// Returns one result per input, in the same order.
    pub fn verify_batch(&self, inputs: &[TagInput]) -> Vec<Result<VerificationResult, TagError>> {
        inputs.par_iter().map(|input| self.verify(input)).collect()
    }

    /// Parses and verifies many serialized requests in parallel.
    ///
    /// Returns one result per request, in the same order.
    pub fn verify_request_batch(
        &self,
        requests: &[TagRequest],
    ) -> Vec<Result<VerificationResult, TagError>> {
        requests
            .par_iter()
            .map(|request| self.verify_request(request))
            .collect()
    }
}

/// Checks a tag, rejecting inputs that need more than `max_blocks` GHASH blocks.
///
/// A share table that is too short is reported before the block limit.
#[instrument(level = "debug", skip_all, err)]
fn verify_parts(
    aad: &[u8],
    ciphertext: &Ciphertext,
    power_shares: &PowerShareTable,
    encrypted_iv_share: Gf2_128,
    tag_share: Gf2_128,
    max_blocks: Option<usize>,
) -> Result<VerificationResult, TagError> {
    let blocks = block_count(aad.len(), ciphertext.body().len());
    if power_shares.len() < blocks {
        return Err(TagError::insufficient_shares(blocks, power_shares.len()));
    }

    if let Some(max_blocks) = max_blocks {
        if blocks > max_blocks {
            return Err(TagError::input_too_long(blocks, max_blocks));
        }
    }

    let ghash_share = partial_ghash(aad, ciphertext.body(), power_shares)?;
    let tag = reconstruct_tag(ghash_share, encrypted_iv_share, tag_share);
    let result = check_tag(ciphertext.tag(), tag);

    debug!(blocks, verified = result.is_verified(), "tag checked");

    Ok(result)
}
