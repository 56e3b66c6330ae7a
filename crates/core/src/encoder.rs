//! Encode pass: raw bytes to archive.
//!
//! # Archive Layout
//!
//! ```text
//! +---------------------+
//! | serialized tree     |  self-terminating, see `tree`
//! +---------------------+
//! | code of each byte   |  in input order
//! +---------------------+
//! | code of EOF         |  terminator; there is no length field
//! +---------------------+
//! | zero padding        |  up to the next byte boundary
//! +---------------------+
//! ```
//!
//! Empty input still gets the EOF code, so an empty file is never confused
//! with a truncated archive.

use crate::bitio::BitWriter;
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::metrics::Metrics;
use crate::symbol::{FrequencyTable, Symbol};
use crate::tree::HuffmanTree;

/// Write the code of every byte of `input`, then the EOF code.
///
/// Returns the number of bits written.
///
/// # Errors
/// `HuffmanError::MissingCode` if a byte (or EOF) has no leaf in the tree
/// the table was built from.
pub fn encode_body(codes: &CodeTable, input: &[u8], writer: &mut BitWriter) -> Result<u64> {
    let start = writer.bit_len();
    for &byte in input {
        write_symbol(codes, Symbol::from(byte), writer)?;
    }
    write_symbol(codes, Symbol::EOF, writer)?;
    Ok((writer.bit_len() - start) as u64)
}

fn write_symbol(codes: &CodeTable, symbol: Symbol, writer: &mut BitWriter) -> Result<()> {
    let code = codes
        .get(symbol)
        .ok_or(HuffmanError::MissingCode(symbol.value()))?;
    code.write_to(writer)
}

/// Append a complete archive (tree, body, EOF) for `input` to `writer`.
///
/// The writer is not finished, so callers may put a header in front.
pub fn encode_archive(input: &[u8], writer: &mut BitWriter, metrics: &mut Metrics) -> Result<()> {
    let table = FrequencyTable::from_bytes(input);
    let tree = HuffmanTree::from_frequencies(&table)?;
    let codes = CodeTable::from_tree(&tree);

    let tree_start = writer.bit_len();
    tree.serialize(writer)?;
    let tree_bits = (writer.bit_len() - tree_start) as u64;
    let body_bits = encode_body(&codes, input, writer)?;

    metrics.original_bytes = input.len() as u64;
    metrics.distinct_symbols = table.len();
    metrics.max_code_length = codes.max_length();
    metrics.tree_bits = tree_bits;
    metrics.body_bits = body_bits;
    metrics.symbols_coded = input.len() as u64 + 1;

    tracing::debug!(
        "encoded {} bytes: {} symbols, tree {} bits, body {} bits",
        input.len(),
        table.len(),
        tree_bits,
        body_bits
    );
    Ok(())
}

/// Compress `input` into a bare archive.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    compress_with_metrics(input, &mut Metrics::new())
}

/// Compress `input` into a bare archive, recording what happened.
pub fn compress_with_metrics(input: &[u8], metrics: &mut Metrics) -> Result<Vec<u8>> {
    let mut writer = BitWriter::new();
    encode_archive(input, &mut writer, metrics)?;
    let archive = writer.finish();

    metrics.archive_bytes = archive.len() as u64;
    metrics.complete();
    Ok(archive)
}
