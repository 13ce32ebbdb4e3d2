//! Parsing of serialized shares, ciphertexts and associated data.
//!
//! The MPC backend that produces the shares renders a 128-bit word with its bytes in reverse
//! order and the bits of the whole word reflected relative to the GCM block convention used by
//! [`Gf2_128`]. [`mpc_to_native`] undoes both. The transformation is an involution, so the
//! same function also maps native values back into the MPC convention.

use gf2_128::Gf2_128;
use serde::{Deserialize, Serialize};

use crate::{ghash::PowerShareTable, TagError};

/// Bit and byte order of serialized shares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareEncoding {
    /// Shares come from the MPC backend and are byte-swapped and bit-reflected.
    #[default]
    Mpc,
    /// Shares are big-endian integers in GCM bit order.
    Native,
}

impl ShareEncoding {
    /// Converts a serialized share into a field element.
    pub fn decode(&self, value: u128) -> Gf2_128 {
        match self {
            ShareEncoding::Mpc => Gf2_128::new(mpc_to_native(value)),
            ShareEncoding::Native => Gf2_128::new(value),
        }
    }

    /// Converts a field element into its serialized integer form.
    pub fn encode(&self, value: Gf2_128) -> u128 {
        match self {
            ShareEncoding::Mpc => native_to_mpc(value.inner()),
            ShareEncoding::Native => value.inner(),
        }
    }
}

/// Converts a word from the MPC convention into GCM block order.
///
/// Reverses the byte order of the 32 hex digit rendering, then reverses all 128 bits.
pub fn mpc_to_native(value: u128) -> u128 {
    value.swap_bytes().reverse_bits()
}

/// Converts a word from GCM block order into the MPC convention.
pub fn native_to_mpc(value: u128) -> u128 {
    mpc_to_native(value)
}

/// Parses a string of binary digits into an unsigned integer.
///
/// Leading zeros are allowed, but the value must fit in 128 bits.
pub fn parse_bits(bits: &str) -> Result<u128, TagError> {
    let bits = bits.trim();

    if bits.is_empty() {
        return Err(TagError::malformed("empty bit string"));
    }

    if let Some(c) = bits.chars().find(|c| !matches!(c, '0' | '1')) {
        return Err(TagError::malformed(format!(
            "unexpected character {c:?} in bit string"
        )));
    }

    u128::from_str_radix(bits, 2).map_err(TagError::malformed)
}

/// Parses the shares of the powers of `H`, one bit string per line.
///
/// Line `i` (counting from 1) holds the share of `H^i`.
pub fn parse_power_shares(
    input: &str,
    encoding: ShareEncoding,
) -> Result<PowerShareTable, TagError> {
    let input = input.strip_suffix('\n').unwrap_or(input);

    if input.trim().is_empty() {
        return Err(TagError::malformed("no shares of powers of H"));
    }

    input
        .split('\n')
        .enumerate()
        .map(|(idx, line)| {
            parse_bits(line)
                .map(|value| encoding.decode(value))
                .map_err(|err| TagError::malformed(format!("share of H^{}: {err}", idx + 1)))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(PowerShareTable::new)
}

/// Parses the share of the encrypted initial counter block.
///
/// Only the first line is read.
pub fn parse_iv_share(input: &str, encoding: ShareEncoding) -> Result<Gf2_128, TagError> {
    let line = input.lines().next().unwrap_or_default();

    parse_bits(line).map(|value| encoding.decode(value))
}

/// Parses the peer's tag share, a decimal integer.
///
/// The integer is the big-endian value of the share block, so no reordering is applied.
pub fn parse_tag_share(input: &str) -> Result<Gf2_128, TagError> {
    let input = input.trim();

    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TagError::malformed(format!(
            "tag share {input:?} is not a decimal integer"
        )));
    }

    input
        .parse::<u128>()
        .map(Gf2_128::new)
        .map_err(TagError::malformed)
}

/// Decodes hex encoded associated data.
pub fn parse_aad_hex(input: &str) -> Result<Vec<u8>, TagError> {
    hex::decode(input.trim()).map_err(TagError::malformed)
}

/// A ciphertext byte, serialized either as a number or as a decimal string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ByteValue {
    /// A JSON number.
    Number(u64),
    /// A decimal string.
    Decimal(String),
}

impl ByteValue {
    /// Returns the byte, if the value is in range.
    pub fn to_byte(&self) -> Result<u8, TagError> {
        match self {
            ByteValue::Number(n) => u8::try_from(*n)
                .map_err(|_| TagError::malformed(format!("{n} is not a byte value"))),
            ByteValue::Decimal(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s
                .parse::<u8>()
                .map_err(|_| TagError::malformed(format!("{s:?} is not a byte value"))),
            ByteValue::Decimal(s) => {
                Err(TagError::malformed(format!("{s:?} is not a decimal byte")))
            }
        }
    }
}

impl From<u8> for ByteValue {
    fn from(value: u8) -> Self {
        ByteValue::Number(value.into())
    }
}

/// Converts a list of serialized byte values into bytes.
pub fn decode_bytes(values: &[ByteValue]) -> Result<Vec<u8>, TagError> {
    values.iter().map(ByteValue::to_byte).collect()
}

/// Parses a ciphertext serialized as a JSON array of byte values.
pub fn parse_ciphertext_json(input: &str) -> Result<Vec<u8>, TagError> {
    let values: Vec<ByteValue> = serde_json::from_str(input).map_err(TagError::malformed)?;

    decode_bytes(&values)
}
