use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use gcm2pc_tag::{config::DEFAULT_MAX_BLOCKS, ShareEncoding};

#[derive(Parser)]
#[command(version, about, name = "gcm2pc-verify", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
    /// Maximum number of GHASH blocks per tag.
    #[arg(long, default_value_t = DEFAULT_MAX_BLOCKS, global = true)]
    pub(crate) max_blocks: usize,
    /// Bit and byte order of the share files.
    #[arg(long, value_enum, default_value = "mpc", global = true)]
    pub(crate) share_encoding: Encoding,
    /// Log filter, e.g. `debug` or `gcm2pc_tag=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub(crate) log_level: Option<String>,
    /// Log output format.
    #[arg(long, value_enum, default_value = "compact", global = true)]
    pub(crate) log_format: LogFormat,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Verifies a single tag from share files.
    Verify {
        /// File with the shares of the powers of H, one bit string per line.
        #[arg(long)]
        power_shares: PathBuf,
        /// File with the share of the encrypted IV as a bit string.
        #[arg(long)]
        iv_share: PathBuf,
        /// File with the ciphertext, including the tag, as a JSON array of bytes.
        #[arg(long)]
        ciphertext: PathBuf,
        /// Associated data as hex.
        #[arg(long, default_value = "")]
        aad: String,
        /// The peer's tag share as a decimal integer.
        #[arg(long)]
        tag_share: String,
    },
    /// Verifies a JSON array of tag requests.
    Batch {
        /// Path to the requests file.
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Encoding {
    /// Shares as produced by the MPC backend.
    Mpc,
    /// Shares in GCM block order.
    Native,
}

impl From<Encoding> for ShareEncoding {
    fn from(value: Encoding) -> Self {
        match value {
            Encoding::Mpc => ShareEncoding::Mpc,
            Encoding::Native => ShareEncoding::Native,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verify() {
        let cli = Cli::try_parse_from([
            "gcm2pc-verify",
            "verify",
            "--power-shares",
            "poh",
            "--iv-share",
            "eiv",
            "--ciphertext",
            "ciphertext",
            "--aad",
            "1703030010",
            "--tag-share",
            "12345",
        ])
        .unwrap();

        assert_eq!(cli.max_blocks, DEFAULT_MAX_BLOCKS);
        assert_eq!(cli.share_encoding, Encoding::Mpc);
        assert_eq!(cli.log_format, LogFormat::Compact);
        let Command::Verify { aad, tag_share, .. } = cli.command else {
            panic!("expected verify command");
        };
        assert_eq!(aad, "1703030010");
        assert_eq!(tag_share, "12345");
    }

    #[test]
    fn test_parse_batch_with_globals() {
        let cli = Cli::try_parse_from([
            "gcm2pc-verify",
            "batch",
            "-i",
            "requests.json",
            "--share-encoding",
            "native",
            "--max-blocks",
            "64",
        ])
        .unwrap();

        assert_eq!(cli.max_blocks, 64);
        assert_eq!(ShareEncoding::from(cli.share_encoding), ShareEncoding::Native);
        assert!(matches!(cli.command, Command::Batch { .. }));
    }

    #[test]
    fn test_parse_missing_tag_share() {
        assert!(Cli::try_parse_from(["gcm2pc-verify", "verify", "--power-shares", "poh"]).is_err());
    }
}
