//! The three DEFLATE block processors (stored, fixed, dynamic) and the
//! shared Huffman inflation loop they funnel into.

use crate::bitreader::BitReader;
use crate::dynamic::DynamicTables;
use crate::error::{safety_check, InflateError, Result};
use crate::huffman::HuffmanTable;
use crate::streams::{ByteSink, ByteSource};
use crate::tables::{fixed_dist_table, fixed_litlen_table, DIST_BASE, DIST_EXTRA_BITS, LENGTH_BASE, LENGTH_EXTRA_BITS};
use crate::window::SlidingWindow;

pub const BTYPE_STORED: u16 = 0b00;
pub const BTYPE_FIXED: u16 = 0b01;
pub const BTYPE_DYNAMIC: u16 = 0b10;
pub const BTYPE_RESERVED: u16 = 0b11;

/// Run one stored (uncompressed) block: byte-align, read the length header,
/// then copy exactly `len` raw bytes through the window.
pub fn run_stored_block<S: ByteSource>(
    reader: &mut BitReader<'_, S>,
    window: &mut SlidingWindow,
    sink: &mut dyn ByteSink,
) -> Result<()> {
    reader.discard_to_byte()?;
    let len = reader.read_aligned_u16()?;
    let nlen = reader.read_aligned_u16()?;
    safety_check!(len == !nlen);
    for _ in 0..len {
        let b = reader.read_raw_byte()?;
        window.emit_literal(sink, b)?;
    }
    Ok(())
}

/// Run a Huffman-coded block (fixed or dynamic) given its literal/length and
/// distance tables.
pub fn run_huffman_block<S: ByteSource, const L: usize, const D: usize>(
    reader: &mut BitReader<'_, S>,
    litlen: &HuffmanTable<L>,
    dist: &HuffmanTable<D>,
    window: &mut SlidingWindow,
    sink: &mut dyn ByteSink,
) -> Result<()> {
    loop {
        let sym = litlen.decode_symbol(reader)?;
        if sym < 256 {
            window.emit_literal(sink, sym as u8)?;
            continue;
        }
        if sym == 256 {
            return Ok(());
        }
        safety_check!(sym <= 285);

        let i = (sym - 257) as usize;
        let extra = reader.fetch(LENGTH_EXTRA_BITS[i] as u32)?;
        let length = LENGTH_BASE[i] + extra;

        let d = dist.decode_symbol(reader)?;
        safety_check!((d as usize) < DIST_BASE.len());
        let dextra = reader.fetch(DIST_EXTRA_BITS[d as usize] as u32)?;
        let distance = DIST_BASE[d as usize] + dextra as u32;

        window.copy(sink, length, distance)?;
    }
}

pub fn run_fixed_block<S: ByteSource>(
    reader: &mut BitReader<'_, S>,
    window: &mut SlidingWindow,
    sink: &mut dyn ByteSink,
) -> Result<()> {
    run_huffman_block(reader, fixed_litlen_table(), fixed_dist_table(), window, sink)
}

pub fn run_dynamic_block<S: ByteSource>(
    reader: &mut BitReader<'_, S>,
    tables: &mut DynamicTables,
    window: &mut SlidingWindow,
    sink: &mut dyn ByteSink,
) -> Result<()> {
    tables.build(reader)?;
    run_huffman_block(reader, &tables.litlen, &tables.dist, window, sink)
}
