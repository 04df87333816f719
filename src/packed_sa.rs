use bincode::config as bincode_config;
use bitpacking::{BitPacker, BitPacker8x as Packer};
use serde::{Deserialize, Serialize};
use std::io::prelude::*;
use std::io::Result;

// Little endian of b"PSA8": packed suffix array, BitPacker8x blocks.
const MAGIC_PSA8: u32 = 0x3841_5350;

/// Bit-packed form of a suffix array, ready for serialization.
///
/// Ranks are packed in fixed-width blocks of `Packer::BLOCK_LEN` values;
/// the final block is padded with zeros up to the block length, and the
/// true value count is kept in the header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackedSuffixArray {
    magic: u32,
    length: u64,
    bits: u8,
    data: Vec<u8>,
}

impl PackedSuffixArray {
    pub fn from_sa(sa: &[u32]) -> Self {
        let bits = rank_bits(sa);
        let packed_block = bits as usize * Packer::BLOCK_LEN / 8;
        let blocks = sa.len() / Packer::BLOCK_LEN;

        let packer = Packer::new();
        let mut data = vec![0u8; ceil_div(sa.len(), Packer::BLOCK_LEN) * packed_block];

        let (whole, rest) = sa.split_at(blocks * Packer::BLOCK_LEN);
        let mut out = data.chunks_mut(packed_block);
        for block in whole.chunks(Packer::BLOCK_LEN) {
            packer.compress(block, out.next().unwrap(), bits);
        }
        if !rest.is_empty() {
            let mut padded = [0u32; Packer::BLOCK_LEN];
            padded[..rest.len()].copy_from_slice(rest);
            packer.compress(&padded, out.next().unwrap(), bits);
        }

        PackedSuffixArray {
            magic: MAGIC_PSA8,
            length: sa.len() as u64,
            bits,
            data,
        }
    }

    pub fn into_sa(self) -> Vec<u32> {
        assert_eq!(self.magic, MAGIC_PSA8);
        let length = self.length as usize;
        let packed_block = self.bits as usize * Packer::BLOCK_LEN / 8;
        assert_eq!(
            self.data.len(),
            ceil_div(length, Packer::BLOCK_LEN) * packed_block
        );

        let packer = Packer::new();
        let mut sa = Vec::with_capacity(length);
        let mut block = [0u32; Packer::BLOCK_LEN];
        for chunk in self.data.chunks(packed_block) {
            packer.decompress(chunk, &mut block, self.bits);
            let remain = length - sa.len();
            sa.extend_from_slice(&block[..remain.min(Packer::BLOCK_LEN)]);
        }

        sa
    }

    pub fn dump<W: Write>(&self, file: W) -> Result<()> {
        let mut cfg = bincode_config();
        cfg.little_endian();
        cfg.serialize_into(file, self).map_err(error_conv)
    }

    pub fn dump_bytes(&self) -> Result<Vec<u8>> {
        let mut cfg = bincode_config();
        cfg.little_endian();
        cfg.serialize(self).map_err(error_conv)
    }

    pub fn load<R: Read>(file: R) -> Result<Self> {
        let mut cfg = bincode_config();
        cfg.little_endian();
        let packed: PackedSuffixArray = cfg.deserialize_from(file).map_err(error_conv)?;
        packed.validate()
    }

    pub fn load_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cfg = bincode_config();
        cfg.little_endian();
        let packed: PackedSuffixArray = cfg.deserialize(bytes).map_err(error_conv)?;
        packed.validate()
    }

    fn validate(self) -> Result<Self> {
        use std::io::{Error, ErrorKind};

        let packed_block = self.bits as usize * Packer::BLOCK_LEN / 8;
        let expected = ceil_div(self.length as usize, Packer::BLOCK_LEN) * packed_block;
        if self.magic != MAGIC_PSA8 || self.bits < 1 || self.bits > 32 || self.data.len() != expected {
            Err(Error::new(ErrorKind::InvalidData, "malformed packed suffix array"))
        } else {
            Ok(self)
        }
    }
}

/// Width in bits of the largest rank, at least one.
fn rank_bits(sa: &[u32]) -> u8 {
    let max = sa.iter().copied().max().unwrap_or(0).max(1);
    (32 - max.leading_zeros()) as u8
}

fn ceil_div(x: usize, y: usize) -> usize {
    x / y + usize::from(x % y != 0)
}

fn error_conv(err: bincode::Error) -> std::io::Error {
    use bincode::ErrorKind as BincodeErrorKind;
    use std::io::{Error, ErrorKind as IoErrorKind};

    match *err {
        BincodeErrorKind::Io(e) => e,
        e => Error::new(IoErrorKind::InvalidData, e),
    }
}
