//! Error types for the grin compressor.
//!
//! Every failure is fatal to the operation that raised it and is returned to
//! the caller as a structured value. Nothing is retried and nothing is
//! silently patched up: a damaged archive never yields a best-effort decode.

use std::fmt;

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Huffman: tree construction, serialization, encode/decode failures
/// - Container: the magic-number header around an archive
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman codec error (e.g., truncated archive, invalid symbol)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Container header error
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// The part of an archive being decoded when a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveSection {
    /// The serialized tree at the start of the archive
    Tree,
    /// The bit-packed codes following the tree
    Body,
}

impl fmt::Display for ArchiveSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveSection::Tree => f.write_str("tree"),
            ArchiveSection::Body => f.write_str("body"),
        }
    }
}

/// Huffman codec errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols with non-zero frequency (cannot build a tree)
    #[error("empty frequency table: cannot build huffman tree")]
    EmptyFrequencyTable,

    /// Value outside the 9-bit symbol alphabet (0-255 bytes, 256 = EOF)
    #[error("invalid symbol {0}: must be in 0..=256")]
    InvalidSymbol(u16),

    /// The same symbol appears in more than one leaf of a serialized tree
    #[error("symbol {0} appears in more than one leaf")]
    DuplicateSymbol(u16),

    /// Bit source ran dry before the tree or the EOF code was complete
    #[error("truncated archive: ran out of bits in {section} at bit position {position}")]
    TruncatedArchive {
        section: ArchiveSection,
        position: usize,
    },

    /// Bit sequence that leads nowhere in the tree
    #[error("invalid huffman code at bit position {position}")]
    InvalidCode { position: usize },

    /// Input byte has no leaf in the tree used for encoding
    #[error("no code for symbol {0}")]
    MissingCode(u16),
}

/// Container header errors.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:#010x}, got {actual:#010x}")]
    InvalidMagic { expected: u32, actual: u32 },

    /// Container is too short to hold a header
    #[error("container too short: need at least {required} bytes, got {actual}")]
    TooShort { required: usize, actual: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Rewrite a bit-source exhaustion into a truncated-archive error.
    ///
    /// Decoding passes read from a `BitReader`, which only knows it ran out of
    /// bits; the caller knows which part of the archive it was in.
    pub(crate) fn truncated_in(self, section: ArchiveSection, position: usize) -> Self {
        match self {
            Error::BitIo(BitIoError::UnexpectedEof) => {
                HuffmanError::TruncatedArchive { section, position }.into()
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_in_rewrites_eof() {
        let err: Error = BitIoError::UnexpectedEof.into();
        let err = err.truncated_in(ArchiveSection::Body, 17);
        assert!(matches!(
            err,
            Error::Huffman(HuffmanError::TruncatedArchive {
                section: ArchiveSection::Body,
                position: 17
            })
        ));
    }

    #[test]
    fn test_truncated_in_keeps_other_errors() {
        let err: Error = HuffmanError::InvalidSymbol(300).into();
        let err = err.truncated_in(ArchiveSection::Tree, 0);
        assert!(matches!(err, Error::Huffman(HuffmanError::InvalidSymbol(300))));
    }

    #[test]
    fn test_display_messages() {
        let err = HuffmanError::TruncatedArchive {
            section: ArchiveSection::Tree,
            position: 9,
        };
        assert_eq!(
            err.to_string(),
            "truncated archive: ran out of bits in tree at bit position 9"
        );

        let err = ContainerError::InvalidMagic {
            expected: 0x736,
            actual: 0,
        };
        assert_eq!(
            err.to_string(),
            "invalid magic number: expected 0x00000736, got 0x00000000"
        );
    }
}
