use std::fmt;

/// Errno-equivalent classification, mirroring the mapping a C implementation
/// would hand back from `errno` (`EIO`/`ERANGE`/`EILSEQ`/`EPERM`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrnoEquivalent {
    Io,
    OutOfRange,
    IllegalSequence,
    NotPermitted,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InflateError {
    /// The input adapter could not supply a byte that decoding required.
    Input,
    /// The output adapter rejected or short-wrote bytes.
    Output,
    /// The bit stream itself violates the format.
    Corrupt,
    /// A contract violation inside the decoder (a bug, not a bad stream).
    Internal,
}

impl InflateError {
    pub fn errno_equivalent(self) -> ErrnoEquivalent {
        match self {
            InflateError::Input => ErrnoEquivalent::Io,
            InflateError::Output => ErrnoEquivalent::OutOfRange,
            InflateError::Corrupt => ErrnoEquivalent::IllegalSequence,
            InflateError::Internal => ErrnoEquivalent::NotPermitted,
        }
    }
}

impl fmt::Display for InflateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            InflateError::Input => "input stream ended before decoding finished",
            InflateError::Output => "output sink rejected or short-wrote bytes",
            InflateError::Corrupt => "compressed data is corrupt",
            InflateError::Internal => "internal decoder invariant violated",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for InflateError {}

pub type Result<T> = std::result::Result<T, InflateError>;

/// Return `Err(InflateError::Corrupt)` unless `cond` holds.
macro_rules! safety_check {
    ($cond:expr) => {
        if !($cond) {
            return Err($crate::error::InflateError::Corrupt);
        }
    };
}

pub(crate) use safety_check;
