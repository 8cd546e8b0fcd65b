//! Byte-level input/output adapters. Generalizes the teacher's
//! `DeflateInput`/`DeflateOutput` traits into a simpler pull/push pair that
//! doesn't need overread bookkeeping, since the simplified bit reader pulls
//! exactly one byte at a time.

mod byte_sink;
mod byte_source;

pub use byte_sink::{ByteSink, CallbackSink};
pub use byte_source::{ByteSource, CallbackSource, SliceSource};
