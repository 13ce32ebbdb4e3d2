use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};
use gcm2pc_tag::{
    encoding::{
        parse_aad_hex, parse_ciphertext_json, parse_iv_share, parse_power_shares,
        parse_tag_share,
    },
    Ciphertext, TagInput, TagRequest, TagVerifier, VerificationResult, VerifierConfig,
};
use tracing::{debug, error, info};

use crate::cli::{Cli, Command};

/// Outcome of a command, determines the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    /// Every tag verified.
    Verified,
    /// At least one tag did not match, every input could be verified.
    AuthenticationFailed,
    /// At least one input could not be verified.
    Error,
}

impl Status {
    /// Returns the process exit code.
    pub(crate) fn code(self) -> u8 {
        match self {
            Status::Verified => 0,
            Status::AuthenticationFailed => 1,
            Status::Error => 2,
        }
    }
}

impl From<VerificationResult> for Status {
    fn from(value: VerificationResult) -> Self {
        match value {
            VerificationResult::Verified => Status::Verified,
            VerificationResult::AuthenticationFailed => Status::AuthenticationFailed,
        }
    }
}

/// Runs a command, writing verdicts to `out`.
///
/// Errors are logged and reported as [`Status::Error`].
pub(crate) fn execute(cli: Cli, out: &mut impl Write) -> Status {
    match run(cli, out) {
        Ok(status) => status,
        Err(err) => {
            error!("{err:#}");
            Status::Error
        }
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<Status> {
    let config = VerifierConfig::builder()
        .max_blocks(cli.max_blocks)
        .share_encoding(cli.share_encoding.into())
        .build()?;

    debug!(?config, "verifier config loaded");

    let verifier = TagVerifier::new(config);

    match cli.command {
        Command::Verify {
            power_shares,
            iv_share,
            ciphertext,
            aad,
            tag_share,
        } => {
            let encoding = verifier.config().share_encoding();
            let input = TagInput {
                aad: parse_aad_hex(&aad).context("invalid associated data")?,
                ciphertext: Ciphertext::new(
                    parse_ciphertext_json(&read(&ciphertext)?)
                        .context("invalid ciphertext file")?,
                )?,
                power_shares: parse_power_shares(&read(&power_shares)?, encoding)
                    .context("invalid powers of H share file")?,
                encrypted_iv_share: parse_iv_share(&read(&iv_share)?, encoding)
                    .context("invalid encrypted IV share file")?,
                tag_share: parse_tag_share(&tag_share).context("invalid tag share")?,
            };

            let result = verifier.verify(&input)?;
            writeln!(out, "{}", describe(result))?;

            Ok(result.into())
        }
        Command::Batch { input } => {
            let requests: Vec<TagRequest> = serde_json::from_str(&read(&input)?)
                .with_context(|| format!("invalid requests file {}", input.display()))?;

            info!(count = requests.len(), "verifying tags");

            let mut status = Status::Verified;
            for (idx, result) in verifier.verify_request_batch(&requests).iter().enumerate() {
                match result {
                    Ok(result) => {
                        writeln!(out, "{idx}: {}", describe(*result))?;
                        if !result.is_verified() && status == Status::Verified {
                            status = Status::AuthenticationFailed;
                        }
                    }
                    Err(err) => {
                        writeln!(out, "{idx}: error: {err}")?;
                        status = Status::Error;
                    }
                }
            }

            Ok(status)
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn describe(result: VerificationResult) -> &'static str {
    match result {
        VerificationResult::Verified => "verified",
        VerificationResult::AuthenticationFailed => "authentication failed",
    }
}
