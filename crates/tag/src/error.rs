use core::fmt;
use std::error::Error;

/// A tag verification error.
///
/// Errors are raised for inputs that cannot be verified at all. A tag that does not match is
/// not an error, see [`VerificationResult`](crate::VerificationResult).
#[derive(Debug, thiserror::Error)]
pub struct TagError {
    kind: ErrorKind,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

/// The kind of a [`TagError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A hexadecimal, binary, decimal or JSON encoding could not be parsed.
    MalformedInput,
    /// The ciphertext is too short to contain a tag.
    CiphertextTooShort,
    /// There are fewer shares of powers of `H` than GHASH blocks.
    InsufficientShares,
    /// The input needs more GHASH blocks than the configured maximum.
    InputTooLong,
}

impl TagError {
    fn new<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self {
            kind,
            source: Some(source.into()),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub(crate) fn malformed<E>(source: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self::new(ErrorKind::MalformedInput, source)
    }

    pub(crate) fn ciphertext_too_short(len: usize) -> Self {
        Self::new(
            ErrorKind::CiphertextTooShort,
            format!("ciphertext has {len} bytes, at least 16 are required for the tag"),
        )
    }

    pub(crate) fn insufficient_shares(required: usize, available: usize) -> Self {
        Self::new(
            ErrorKind::InsufficientShares,
            format!("{required} powers of H are required, only {available} were provided"),
        )
    }

    pub(crate) fn input_too_long(blocks: usize, max: usize) -> Self {
        Self::new(
            ErrorKind::InputTooLong,
            format!("input needs {blocks} blocks, the maximum is {max}"),
        )
    }
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::MalformedInput => write!(f, "malformed input")?,
            ErrorKind::CiphertextTooShort => write!(f, "ciphertext too short")?,
            ErrorKind::InsufficientShares => write!(f, "insufficient shares")?,
            ErrorKind::InputTooLong => write!(f, "input too long")?,
        }

        if let Some(ref source) = self.source {
            write!(f, " caused by: {}", source)?;
        }

        Ok(())
    }
}
