//! Top-level driver: reads block headers, dispatches to the right block
//! processor, flushes the window, and finalizes the CRC-32.

use crate::bitreader::BitReader;
use crate::blocks::{run_dynamic_block, run_fixed_block, run_stored_block, BTYPE_DYNAMIC, BTYPE_FIXED, BTYPE_RESERVED, BTYPE_STORED};
use crate::dynamic::DynamicTables;
use crate::error::{InflateError, Result};
use crate::streams::{ByteSink, ByteSource, CallbackSink, CallbackSource, SliceSource};
use crate::window::SlidingWindow;

/// Bytes consumed from input and the CRC-32 of the bytes produced, reported
/// after a successful call to [`Inflater::decompress`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecompressResult {
    pub bytes_read: u64,
    pub crc32: u32,
}

/// The crate's long-lived decoder handle. Owns the scratch space that's
/// worth reusing across calls (the dynamic Huffman tables); everything else
/// needed for one decode is constructed fresh inside `decompress`.
pub struct Inflater {
    dynamic_tables: DynamicTables,
    window: SlidingWindow,
    last_error: Option<InflateError>,
}

impl Inflater {
    pub fn new() -> Self {
        Inflater {
            dynamic_tables: DynamicTables::new(),
            window: SlidingWindow::new(),
            last_error: None,
        }
    }

    /// Return this decoder to its initial state, ready for a new stream.
    /// Not load-bearing for correctness (every code path overwrites its
    /// scratch state before reading it), but documents the lifecycle and
    /// mirrors the original's explicit re-zeroing entry point.
    pub fn reset(&mut self) {
        self.window.reset();
        self.last_error = None;
    }

    pub fn last_error(&self) -> Option<InflateError> {
        self.last_error
    }

    /// Decompress a full DEFLATE stream from `input`, pushing output bytes
    /// to `output` as they're produced.
    pub fn decompress<S: ByteSource>(
        &mut self,
        input: &mut S,
        output: &mut dyn ByteSink,
    ) -> Result<DecompressResult> {
        self.window.reset();
        self.last_error = None;

        let result = self.decompress_inner(input, output);
        if let Err(e) = result {
            self.last_error = Some(e);
        }
        result
    }

    /// Convenience entry point over a one-shot in-memory buffer.
    pub fn decompress_slice(&mut self, input: &[u8], output: &mut dyn ByteSink) -> Result<DecompressResult> {
        let mut src = SliceSource::new(input);
        self.decompress(&mut src, output)
    }

    /// Convenience entry point over a caller-supplied pull callback.
    pub fn decompress_callback(
        &mut self,
        pull: impl FnMut(&mut [u8]) -> usize,
        output: &mut dyn ByteSink,
    ) -> Result<DecompressResult> {
        let mut src = CallbackSource::new(pull);
        self.decompress(&mut src, output)
    }

    fn decompress_inner<S: ByteSource>(
        &mut self,
        input: &mut S,
        output: &mut dyn ByteSink,
    ) -> Result<DecompressResult> {
        let mut reader = BitReader::new(input);

        loop {
            let bfinal = reader.fetch(1)?;
            let btype = reader.fetch(2)?;

            match btype {
                BTYPE_STORED => run_stored_block(&mut reader, &mut self.window, output)?,
                BTYPE_FIXED => run_fixed_block(&mut reader, &mut self.window, output)?,
                BTYPE_DYNAMIC => run_dynamic_block(&mut reader, &mut self.dynamic_tables, &mut self.window, output)?,
                BTYPE_RESERVED => return Err(InflateError::Corrupt),
                _ => unreachable!("fetch(2) never returns a value outside 0..=3"),
            }

            if bfinal != 0 {
                break;
            }
        }

        self.window.flush(output)?;

        Ok(DecompressResult {
            bytes_read: reader.bytes_consumed(),
            crc32: self.window.crc32(),
        })
    }
}

impl Default for Inflater {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot convenience wrapper: decompress `input` entirely into a
/// freshly-allocated `Vec<u8>`, returning it alongside the CRC-32.
pub fn inflate_to_vec(input: &[u8]) -> Result<(Vec<u8>, u32)> {
    let mut out = Vec::new();
    let crc32 = {
        let mut sink = CallbackSink::new(|bytes: &[u8]| {
            out.extend_from_slice(bytes);
            bytes.len()
        });
        let mut inflater = Inflater::new();
        inflater.decompress_slice(input, &mut sink)?.crc32
    };
    Ok((out, crc32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(input: &[u8]) -> Result<(Vec<u8>, u32)> {
        inflate_to_vec(input)
    }

    #[test]
    fn empty_stream() {
        let (out, crc) = decode(&[0x03, 0x00]).unwrap();
        assert!(out.is_empty());
        assert_eq!(crc, 0x0000_0000);
    }

    #[test]
    fn single_fixed_literal() {
        let (out, crc) = decode(&[0x63, 0x74, 0x04, 0x00]).unwrap();
        assert_eq!(out, b"A");
        assert_eq!(crc, 0xD3D9_9E8B);
    }

    #[test]
    fn stored_block_hi() {
        let (out, crc) = decode(&[0x01, 0x02, 0x00, 0xFD, 0xFF, b'H', b'i']).unwrap();
        assert_eq!(out, b"Hi");
        assert_eq!(crc, 0xD893_2AAC);
    }

    #[test]
    fn corrupt_stored_block_header_is_rejected() {
        let err = decode(&[0x01, 0x02, 0x00, 0x00, 0x00, b'H', b'i']).unwrap_err();
        assert_eq!(err, InflateError::Corrupt);
    }

    #[test]
    fn reset_allows_reuse_across_streams() {
        let mut inflater = Inflater::new();
        let mut out1 = Vec::new();
        {
            let mut sink = CallbackSink::new(|b: &[u8]| {
                out1.extend_from_slice(b);
                b.len()
            });
            inflater.decompress_slice(&[0x63, 0x74, 0x04, 0x00], &mut sink).unwrap();
        }
        assert_eq!(out1, b"A");

        inflater.reset();

        let mut out2 = Vec::new();
        {
            let mut sink = CallbackSink::new(|b: &[u8]| {
                out2.extend_from_slice(b);
                b.len()
            });
            inflater
                .decompress_slice(&[0x01, 0x02, 0x00, 0xFD, 0xFF, b'H', b'i'], &mut sink)
                .unwrap();
        }
        assert_eq!(out2, b"Hi");
    }
}
