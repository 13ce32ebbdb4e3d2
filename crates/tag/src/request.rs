use gf2_128::Gf2_128;
use serde::{Deserialize, Serialize};

use crate::{
    encoding::{
        decode_bytes, parse_aad_hex, parse_iv_share, parse_power_shares, parse_tag_share,
        ByteValue, ShareEncoding,
    },
    ghash::PowerShareTable,
    tag::Ciphertext,
    TagError,
};

/// A tag verification request in its serialized form.
///
/// This is the shape produced by the notary when it hands a tag over for verification: the
/// share values are bit strings, the ciphertext is a list of byte values and the associated
/// data is hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRequest {
    /// Shares of `H^1 .. H^n`, one bit string per line.
    pub power_shares: String,
    /// Share of the encrypted initial counter block as a bit string.
    pub iv_share: String,
    /// Ciphertext including the trailing tag.
    pub ciphertext: Vec<ByteValue>,
    /// Hex encoded associated data.
    pub aad: String,
    /// Peer's tag share as a decimal integer.
    pub tag_share: String,
}

impl TagRequest {
    /// Parses every field of the request.
    pub fn load(&self, encoding: ShareEncoding) -> Result<TagInput, TagError> {
        let power_shares = parse_power_shares(&self.power_shares, encoding)?;
        let encrypted_iv_share = parse_iv_share(&self.iv_share, encoding)?;
        let ciphertext = Ciphertext::new(decode_bytes(&self.ciphertext)?)?;
        let aad = parse_aad_hex(&self.aad)?;
        let tag_share = parse_tag_share(&self.tag_share)?;

        Ok(TagInput {
            aad,
            ciphertext,
            power_shares,
            encrypted_iv_share,
            tag_share,
        })
    }
}

/// Everything needed to verify one tag, in canonical form.
#[derive(Debug, Clone)]
pub struct TagInput {
    /// Associated data.
    pub aad: Vec<u8>,
    /// Ciphertext and tag.
    pub ciphertext: Ciphertext,
    /// This party's shares of the powers of `H`.
    pub power_shares: PowerShareTable,
    /// This party's share of the encrypted initial counter block.
    pub encrypted_iv_share: Gf2_128,
    /// The peer's tag share.
    pub tag_share: Gf2_128,
}
