//! A small, from-scratch DEFLATE (RFC 1951) decompressor.
//!
//! The core here only understands the DEFLATE compressed-data format: the
//! payload carried inside ZIP, gzip, and zlib streams once their own
//! container headers/trailers are stripped. Container parsing, compression,
//! and random access are all out of scope -- see `src/bin/inflate.rs` for a
//! CLI that layers a minimal gzip-membership stripper on top of this crate.

#[macro_use]
extern crate static_assertions;

pub mod bitreader;
mod blocks;
mod dynamic;
pub mod error;
pub mod huffman;
pub mod inflate;
pub mod streams;
mod tables;
pub mod window;

pub use error::{ErrnoEquivalent, InflateError, Result};
pub use inflate::{inflate_to_vec, DecompressResult, Inflater};
pub use streams::{ByteSink, ByteSource, CallbackSink, CallbackSource, SliceSource};
