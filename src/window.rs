//! The 32 KiB sliding window: simultaneously the LZ77 back-reference history
//! and the staging buffer for output, flushed through a [`ByteSink`] whenever
//! it fills or at end-of-stream.

use crate::error::{InflateError, Result};
use crate::streams::ByteSink;

pub const WINDOW_SIZE: usize = 32 * 1024;

pub struct SlidingWindow {
    buf: Box<[u8; WINDOW_SIZE]>,
    cpos: usize,
    filled: bool,
    crc: crc32fast::Hasher,
}

impl SlidingWindow {
    pub fn new() -> Self {
        SlidingWindow {
            buf: Box::new([0u8; WINDOW_SIZE]),
            cpos: 0,
            filled: false,
            crc: crc32fast::Hasher::new(),
        }
    }

    pub fn reset(&mut self) {
        self.cpos = 0;
        self.filled = false;
        self.crc = crc32fast::Hasher::new();
    }

    pub fn crc32(&self) -> u32 {
        self.crc.clone().finalize()
    }

    /// Write one literal byte, flushing the window through `sink` if it just
    /// filled.
    pub fn emit_literal(&mut self, sink: &mut dyn ByteSink, b: u8) -> Result<()> {
        self.buf[self.cpos] = b;
        self.cpos += 1;
        if self.cpos == WINDOW_SIZE {
            self.flush(sink)?;
        }
        Ok(())
    }

    /// Replay `length` bytes starting `distance` bytes before the current
    /// write position, byte-by-byte (the source may still be being written,
    /// which is what makes this correct for overlapping copies where
    /// `distance < length`).
    pub fn copy(&mut self, sink: &mut dyn ByteSink, length: u16, distance: u32) -> Result<()> {
        if distance == 0 || distance as usize > WINDOW_SIZE {
            return Err(InflateError::Corrupt);
        }

        let mut src = match self.cpos.checked_sub(distance as usize) {
            Some(s) => s,
            None => {
                if !self.filled {
                    return Err(InflateError::Corrupt);
                }
                self.cpos + WINDOW_SIZE - distance as usize
            }
        };
        for _ in 0..length {
            let b = self.buf[src];
            src = if src + 1 == WINDOW_SIZE { 0 } else { src + 1 };
            self.emit_literal(sink, b)?;
        }
        Ok(())
    }

    /// Flush the bytes written so far this fill cycle, updating the running
    /// CRC-32 over exactly those bytes.
    pub fn flush(&mut self, sink: &mut dyn ByteSink) -> Result<()> {
        let pending = &self.buf[..self.cpos];
        self.crc.update(pending);
        let written = sink.write(pending);
        if written < pending.len() {
            return Err(InflateError::Output);
        }
        if self.cpos == WINDOW_SIZE {
            self.filled = true;
        }
        self.cpos = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streams::CallbackSink;

    fn collecting_sink(out: &mut Vec<u8>) -> CallbackSink<'_> {
        CallbackSink::new(move |bytes| {
            out.extend_from_slice(bytes);
            bytes.len()
        })
    }

    #[test]
    fn emit_literal_accumulates_without_flushing() {
        let mut w = SlidingWindow::new();
        let mut out = Vec::new();
        let mut sink = collecting_sink(&mut out);
        w.emit_literal(&mut sink, b'A').unwrap();
        w.emit_literal(&mut sink, b'B').unwrap();
        w.flush(&mut sink).unwrap();
        assert_eq!(out, b"AB");
    }

    #[test]
    fn overlapping_copy_produces_run_length_expansion() {
        let mut w = SlidingWindow::new();
        let mut out = Vec::new();
        let mut sink = collecting_sink(&mut out);
        w.emit_literal(&mut sink, b'A').unwrap();
        w.copy(&mut sink, 4, 1).unwrap();
        w.flush(&mut sink).unwrap();
        assert_eq!(out, b"AAAAA");
    }

    #[test]
    fn copy_before_any_output_is_corrupt() {
        let mut w = SlidingWindow::new();
        let mut out = Vec::new();
        let mut sink = collecting_sink(&mut out);
        assert_eq!(w.copy(&mut sink, 3, 1), Err(InflateError::Corrupt));
    }

    #[test]
    fn window_flushes_at_capacity_and_continues() {
        let mut w = SlidingWindow::new();
        let mut out = Vec::new();
        let mut sink = collecting_sink(&mut out);
        for _ in 0..WINDOW_SIZE {
            w.emit_literal(&mut sink, b'x').unwrap();
        }
        assert!(w.filled);
        assert_eq!(out.len(), WINDOW_SIZE);
        w.emit_literal(&mut sink, b'y').unwrap();
        w.flush(&mut sink).unwrap();
        assert_eq!(out.len(), WINDOW_SIZE + 1);
        assert_eq!(out[WINDOW_SIZE], b'y');
    }

    #[test]
    fn copy_can_wrap_around_window_boundary() {
        let mut w = SlidingWindow::new();
        let mut out = Vec::new();
        let mut sink = collecting_sink(&mut out);
        for _ in 0..WINDOW_SIZE {
            w.emit_literal(&mut sink, b'x').unwrap();
        }
        // Distance = WINDOW_SIZE references the very first byte written,
        // which now sits right at the wrap boundary.
        w.copy(&mut sink, 2, WINDOW_SIZE as u32).unwrap();
        w.flush(&mut sink).unwrap();
        assert_eq!(&out[WINDOW_SIZE..], b"xx");
    }
}
