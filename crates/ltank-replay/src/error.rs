//! Error types for solution and save-file I/O.

use std::fmt;
use std::io;

/// Errors from encoding or decoding solutions and save records.
///
/// Every variant is recoverable: a corrupt solution file is reported as
/// "no solution available", never as a process failure.
#[derive(Debug)]
pub enum CodecError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// Fewer bytes than the header declares.
    Truncated {
        /// Bytes the layout requires.
        needed: usize,
        /// Bytes actually present.
        available: usize,
    },
    /// An entry byte outside the five-symbol code table.
    UnknownEntry {
        /// Byte offset within the file.
        offset: usize,
        /// The offending value.
        byte: u8,
    },
    /// More entries than a `u16` count can express.
    TooManyEntries {
        /// Number of entries requested.
        count: usize,
    },
    /// A save-file version tag with no matching hook.
    UnsupportedSaveVersion {
        /// The tag supplied by the save framework.
        tag: u8,
    },
    /// A length-prefixed string was not valid UTF-8.
    InvalidString {
        /// Description of the decoding failure.
        detail: String,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Truncated { needed, available } => {
                write!(f, "truncated data: need {needed} bytes, have {available}")
            }
            Self::UnknownEntry { offset, byte } => {
                write!(f, "unknown replay entry {byte:#04x} at offset {offset}")
            }
            Self::TooManyEntries { count } => {
                write!(f, "{count} entries exceed the solution format limit")
            }
            Self::UnsupportedSaveVersion { tag } => {
                write!(f, "unsupported save version tag {tag}")
            }
            Self::InvalidString { detail } => write!(f, "invalid string: {detail}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
