//! GHASH over secret shares of the powers of the hash subkey.
//!
//! GHASH is usually evaluated with Horner's rule, `acc = (acc + b_k) * H`. A party that only
//! holds additive shares of `H^1 .. H^n` cannot do that, but since the polynomial is linear in
//! the powers it can evaluate
//!
//! ```text
//! b_1 * H^m + b_2 * H^(m-1) + ... + b_m * H
//! ```
//!
//! on its own shares. The outputs of both parties add up to the GHASH output.

use core::fmt;

use gf2_128::Gf2_128;
use tracing::{instrument, trace};
use zeroize::Zeroize;

use crate::TagError;

/// Size of a GHASH block in bytes.
pub const BLOCK_LEN: usize = 16;

/// Additive shares of the powers of the GHASH key `H`.
///
/// The table is 1-indexed: [`PowerShareTable::get(i)`](PowerShareTable::get) is the share of
/// `H^i`. Shares are zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct PowerShareTable(Vec<Gf2_128>);

impl PowerShareTable {
    /// Creates a new table, `shares[0]` being the share of `H^1`.
    pub fn new(shares: Vec<Gf2_128>) -> Self {
        Self(shares)
    }

    /// Returns the number of powers in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table holds no powers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the share of `H^power`.
    pub fn get(&self, power: usize) -> Option<Gf2_128> {
        power
            .checked_sub(1)
            .and_then(|idx| self.0.get(idx))
            .copied()
    }

    /// Returns the shares of `H^1 .. H^n` in ascending order.
    pub fn as_slice(&self) -> &[Gf2_128] {
        &self.0
    }
}

impl From<Vec<Gf2_128>> for PowerShareTable {
    fn from(shares: Vec<Gf2_128>) -> Self {
        Self::new(shares)
    }
}

impl fmt::Debug for PowerShareTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PowerShareTable")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl Drop for PowerShareTable {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Returns the number of GHASH blocks for the given lengths, including the length block.
pub fn block_count(aad_len: usize, ciphertext_len: usize) -> usize {
    aad_len.div_ceil(BLOCK_LEN) + ciphertext_len.div_ceil(BLOCK_LEN) + 1
}

/// Builds the GHASH input blocks.
///
/// The associated data and the ciphertext are each zero-padded to a multiple of the block
/// length, followed by the block holding both bit lengths.
pub fn build_ghash_blocks(aad: &[u8], ciphertext: &[u8]) -> Vec<Gf2_128> {
    let associated_data_bitlen = (aad.len() as u64) * 8;
    let text_bitlen = (ciphertext.len() as u64) * 8;

    let len_block = ((associated_data_bitlen as u128) << 64) + (text_bitlen as u128);

    let mut blocks = Vec::with_capacity(block_count(aad.len(), ciphertext.len()));
    blocks.extend(aad.chunks(BLOCK_LEN).map(to_block));
    blocks.extend(ciphertext.chunks(BLOCK_LEN).map(to_block));
    blocks.push(Gf2_128::new(len_block));

    blocks
}

/// Converts a chunk of at most 16 bytes into a block, padding with zeros on the right.
fn to_block(chunk: &[u8]) -> Gf2_128 {
    let mut block = [0u8; BLOCK_LEN];
    block[..chunk.len()].copy_from_slice(chunk);
    Gf2_128::from_be_bytes(block)
}

/// Computes this party's share of `GHASH(H, aad, ciphertext)`.
///
/// # Arguments
///
/// * `aad` - Associated data.
/// * `ciphertext` - Ciphertext without the tag.
/// * `shares` - Shares of the powers of `H`, at least one per GHASH block.
#[instrument(level = "trace", skip_all, err)]
pub fn partial_ghash(
    aad: &[u8],
    ciphertext: &[u8],
    shares: &PowerShareTable,
) -> Result<Gf2_128, TagError> {
    let required = block_count(aad.len(), ciphertext.len());
    if shares.len() < required {
        return Err(TagError::insufficient_shares(required, shares.len()));
    }

    let blocks = build_ghash_blocks(aad, ciphertext);
    debug_assert_eq!(blocks.len(), required);

    trace!(blocks = blocks.len(), powers = shares.len(), "evaluating ghash");

    // The first block is multiplied with the highest power, the length block with H.
    let output = blocks
        .iter()
        .zip(shares.as_slice()[..blocks.len()].iter().rev())
        .fold(Gf2_128::zero(), |acc, (block, share)| acc + *block * *share);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use ghash::{
        universal_hash::{KeyInit, UniversalHash as UniversalHashReference},
        GHash as GhashReference,
    };
    use gf2_128::powers;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rstest::rstest;

    fn ghash_reference_impl(h: u128, aad: &[u8], ciphertext: &[u8]) -> Gf2_128 {
        let mut ghash = GhashReference::new(&h.to_be_bytes().into());
        ghash.update_padded(aad);
        ghash.update_padded(ciphertext);
        let len_block =
            (((aad.len() as u128) * 8) << 64) + ((ciphertext.len() as u128) * 8);
        ghash.update(&[len_block.to_be_bytes().into()]);
        let mac: [u8; 16] = ghash.finalize().into();
        Gf2_128::from_be_bytes(mac)
    }

    /// Splits `value` into two random additive shares.
    fn split(rng: &mut StdRng, value: Gf2_128) -> (Gf2_128, Gf2_128) {
        let mask = Gf2_128::new(rng.random());
        (mask, value + mask)
    }

    #[test]
    fn test_block_count() {
        assert_eq!(block_count(0, 0), 1);
        assert_eq!(block_count(13, 0), 2);
        assert_eq!(block_count(0, 16), 2);
        assert_eq!(block_count(16, 17), 4);
        assert_eq!(block_count(5, 5), 3);
    }

    #[test]
    fn test_build_ghash_blocks() {
        let aad = [0xaa; 5];
        let ciphertext = [0xcc; 17];

        let blocks = build_ghash_blocks(&aad, &ciphertext);

        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].to_be_bytes()[..5], [0xaa; 5]);
        assert_eq!(blocks[0].to_be_bytes()[5..], [0; 11]);
        assert_eq!(blocks[1], Gf2_128::from_be_bytes([0xcc; 16]));
        assert_eq!(blocks[2].to_be_bytes()[0], 0xcc);
        assert_eq!(blocks[2].to_be_bytes()[1..], [0; 15]);
        assert_eq!(blocks[3], Gf2_128::new((40 << 64) + 136));
    }

    #[test]
    fn test_known_vector_single_block() {
        // Test case 2 of the GCM specification, evaluated with the plain powers of H.
        let h = Gf2_128::new(0x66e94bd4ef8a2c3b884cfa59ca342b2e);
        let ciphertext = 0x0388dace60b6a392f328c2b971b2fe78_u128.to_be_bytes();
        let table = PowerShareTable::new(powers(h, 2));

        let output = partial_ghash(&[], &ciphertext, &table).unwrap();

        assert_eq!(output, Gf2_128::new(0xf38cbb1ad69223dcc3457ae5b6b0f885));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(0, 16)]
    #[case(13, 0)]
    #[case(13, 14)]
    #[case(16, 32)]
    #[case(20, 70)]
    fn test_ghash_output(#[case] aad_len: usize, #[case] ciphertext_len: usize) {
        let mut rng = StdRng::seed_from_u64(0);
        let h: u128 = rng.random();
        let aad: Vec<u8> = (0..aad_len).map(|_| rng.random()).collect();
        let ciphertext: Vec<u8> = (0..ciphertext_len).map(|_| rng.random()).collect();

        let table = PowerShareTable::new(powers(Gf2_128::new(h), 8));

        assert_eq!(
            partial_ghash(&aad, &ciphertext, &table).unwrap(),
            ghash_reference_impl(h, &aad, &ciphertext)
        );
    }

    #[test]
    fn test_ghash_output_shared() {
        let mut rng = StdRng::seed_from_u64(1);
        let h: u128 = rng.random();
        let aad: Vec<u8> = (0..13).map(|_| rng.random()).collect();
        let ciphertext: Vec<u8> = (0..30).map(|_| rng.random()).collect();

        let (shares_a, shares_b): (Vec<_>, Vec<_>) = powers(Gf2_128::new(h), 10)
            .into_iter()
            .map(|power| split(&mut rng, power))
            .unzip();

        let output_a = partial_ghash(&aad, &ciphertext, &shares_a.into()).unwrap();
        let output_b = partial_ghash(&aad, &ciphertext, &shares_b.into()).unwrap();

        assert_eq!(output_a + output_b, ghash_reference_impl(h, &aad, &ciphertext));
    }

    #[test]
    fn test_extra_powers_are_ignored() {
        let mut rng = StdRng::seed_from_u64(2);
        let h = Gf2_128::new(rng.random());
        let ciphertext: Vec<u8> = (0..16).map(|_| rng.random()).collect();

        let exact = PowerShareTable::new(powers(h, 2));
        let long = PowerShareTable::new(powers(h, 100));

        assert_eq!(
            partial_ghash(&[], &ciphertext, &exact).unwrap(),
            partial_ghash(&[], &ciphertext, &long).unwrap()
        );
    }

    #[test]
    fn test_insufficient_shares() {
        let h = Gf2_128::new(3);
        let table = PowerShareTable::new(powers(h, 2));

        let err = partial_ghash(&[0; 1], &[0; 16], &table).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InsufficientShares);
    }

    #[test]
    fn test_empty_table() {
        let table = PowerShareTable::new(vec![]);

        assert!(table.is_empty());
        assert_eq!(table.get(0), None);
        assert_eq!(
            partial_ghash(&[], &[], &table).unwrap_err().kind(),
            ErrorKind::InsufficientShares
        );
    }
}
