//! Verifier configuration.

use serde::{Deserialize, Serialize};

use crate::encoding::ShareEncoding;

/// Largest number of powers of `H` produced by the 2PC GHASH setup.
pub const DEFAULT_MAX_BLOCKS: usize = 1026;

/// Configuration for a [`TagVerifier`](crate::TagVerifier).
#[derive(derive_builder::Builder, Clone, Debug, Deserialize, Serialize)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct VerifierConfig {
    /// Maximum number of GHASH blocks, including the length block, a single
    /// verification may need.
    #[builder(default = "DEFAULT_MAX_BLOCKS")]
    #[serde(default = "default_max_blocks")]
    max_blocks: usize,
    /// Bit and byte order of serialized shares.
    #[builder(default)]
    #[serde(default)]
    share_encoding: ShareEncoding,
}

fn default_max_blocks() -> usize {
    DEFAULT_MAX_BLOCKS
}

impl VerifierConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.max_blocks == Some(0) {
            return Err("max_blocks must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl VerifierConfig {
    /// Creates a new builder for `VerifierConfig`.
    pub fn builder() -> VerifierConfigBuilder {
        VerifierConfigBuilder::default()
    }

    /// Returns the maximum number of GHASH blocks.
    pub fn max_blocks(&self) -> usize {
        self.max_blocks
    }

    /// Returns the encoding of serialized shares.
    pub fn share_encoding(&self) -> ShareEncoding {
        self.share_encoding
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_blocks: DEFAULT_MAX_BLOCKS,
            share_encoding: ShareEncoding::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = VerifierConfig::builder().build().unwrap();

        assert_eq!(config.max_blocks(), DEFAULT_MAX_BLOCKS);
        assert_eq!(config.share_encoding(), ShareEncoding::Mpc);
    }

    #[test]
    fn test_builder_rejects_zero_blocks() {
        let err = VerifierConfig::builder().max_blocks(0).build().unwrap_err();

        assert!(err.to_string().contains("max_blocks"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: VerifierConfig =
            serde_json::from_str(r#"{ "share_encoding": "native" }"#).unwrap();

        assert_eq!(config.max_blocks(), DEFAULT_MAX_BLOCKS);
        assert_eq!(config.share_encoding(), ShareEncoding::Native);
    }
}
