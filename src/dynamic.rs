//! Parses the dynamic-Huffman block header: the code-length-code table, then
//! the literal/length and distance code-length sequences it encodes.

use crate::bitreader::BitReader;
use crate::error::{safety_check, InflateError, Result};
use crate::huffman::HuffmanTable;
use crate::streams::ByteSource;

/// Maximum literal/length alphabet size (symbols 0..=287, of which 286/287
/// are reserved and never legally decoded -- see the cap applied below).
pub const LITLEN_CAP: usize = 288;
/// Maximum distance alphabet size (codes 0..=31, of which 30/31 are
/// reserved).
pub const DIST_CAP: usize = 32;
/// The code-length-code alphabet has exactly 19 symbols.
pub const CODELEN_CAP: usize = 19;

const CODELEN_PERMUTATION: [usize; 19] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Built, scratch-reused copies of the three tables needed to decode a
/// dynamic block. Reused as scratch across calls by [`crate::Inflater`],
/// exactly as it reuses the fixed-table capacity.
pub struct DynamicTables {
    pub codelen: HuffmanTable<CODELEN_CAP>,
    pub litlen: HuffmanTable<LITLEN_CAP>,
    pub dist: HuffmanTable<DIST_CAP>,
}

impl DynamicTables {
    pub fn new() -> Self {
        DynamicTables {
            codelen: HuffmanTable::new(),
            litlen: HuffmanTable::new(),
            dist: HuffmanTable::new(),
        }
    }

    /// Read a dynamic-Huffman block header and rebuild `self.litlen` and
    /// `self.dist` from it.
    pub fn build<S: ByteSource>(&mut self, reader: &mut BitReader<'_, S>) -> Result<()> {
        let hlit = reader.fetch(5)? as usize + 257;
        let hdist = reader.fetch(5)? as usize + 1;
        let hclen = reader.fetch(4)? as usize + 4;

        safety_check!(hlit <= 286 && hclen <= 19);

        let mut codelen_lens = [0u8; CODELEN_CAP];
        for i in 0..hclen {
            codelen_lens[CODELEN_PERMUTATION[i]] = reader.fetch(3)? as u8;
        }
        self.codelen.build(&codelen_lens)?;

        let total = hlit + hdist;
        let mut combined = [0u8; LITLEN_CAP + DIST_CAP];
        let mut i = 0usize;
        while i < total {
            let sym = self.codelen.decode_symbol(reader)?;
            match sym {
                0..=15 => {
                    combined[i] = sym as u8;
                    i += 1;
                }
                16 => {
                    let repeat = reader.fetch(2)? as usize + 3;
                    safety_check!(i > 0);
                    safety_check!(i + repeat <= total);
                    let prev = combined[i - 1];
                    for _ in 0..repeat {
                        combined[i] = prev;
                        i += 1;
                    }
                }
                17 => {
                    let repeat = reader.fetch(3)? as usize + 3;
                    safety_check!(i + repeat <= total);
                    i += repeat;
                }
                18 => {
                    let repeat = reader.fetch(7)? as usize + 11;
                    safety_check!(i + repeat <= total);
                    i += repeat;
                }
                _ => return Err(InflateError::Corrupt),
            }
        }

        self.litlen.build(&combined[..hlit])?;
        self.dist.build(&combined[hlit..hlit + hdist])?;
        self.litlen.cap_valid_codes(286);
        self.dist.cap_valid_codes(30);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streams::SliceSource;

    #[test]
    fn rejects_hlit_over_286() {
        // hlit field stores hlit-257; max legal raw value is 286-257=29,
        // field is 5 bits so max representable raw is 31 -> hlit=288, corrupt.
        let raw_hlit = 31u16; // hlit = 288
        let raw_hdist = 0u16; // hdist = 1
        let raw_hclen = 0u16; // hclen = 4
        let mut bits = 0u32;
        let mut nbits = 0u32;
        let mut push = |val: u16, n: u32| {
            bits |= (val as u32) << nbits;
            nbits += n;
        };
        push(raw_hlit, 5);
        push(raw_hdist, 5);
        push(raw_hclen, 4);
        let bytes = bits.to_le_bytes();
        let mut src = SliceSource::new(&bytes);
        let mut r = BitReader::new(&mut src);
        let mut t = DynamicTables::new();
        assert_eq!(t.build(&mut r), Err(InflateError::Corrupt));
    }
}
