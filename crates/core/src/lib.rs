//! grin-core: lossless file compression with a Huffman prefix code
//!
//! The code covers the 256 byte values plus a synthetic end-of-file symbol.
//! An archive holds the serialized tree followed by the bit-packed codes of
//! the input and the EOF code; decoding stops at the EOF code, so no length
//! field is needed anywhere.
//!
//! # Architecture
//!
//! - `bitio`: MSB-first bit reading/writing over byte buffers
//! - `symbol`: the 9-bit alphabet and frequency counting
//! - `tree`: tree construction and its self-delimiting serialization
//! - `code_table`: symbol → code lookup for encoding
//! - `encoder` / `decoder`: the two passes over an archive
//! - `container`: the `.grin` magic-number header
//! - `metrics`: sizes and timing of one session
//!
//! # Example
//! ```
//! let archive = grin_core::compress(b"abracadabra").unwrap();
//! assert_eq!(grin_core::decompress(&archive).unwrap(), b"abracadabra");
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and returned to the caller
//! - **No shared state**: every session owns its table, tree and cursor
//! - **Deterministic**: equal frequency tables build identical trees

pub mod bitio;
pub mod code_table;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod metrics;
pub mod symbol;
pub mod tree;

// Re-export commonly used types
pub use decoder::{decompress, decompress_with_metrics};
pub use encoder::{compress, compress_with_metrics};
pub use error::{Error, Result};
pub use metrics::Metrics;
pub use symbol::{FrequencyTable, Symbol};
pub use tree::HuffmanTree;
