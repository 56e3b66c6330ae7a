//! Decode pass: archive back to raw bytes.
//!
//! # State Machine
//!
//! ```text
//! AtRoot --bit--> Descending --bit--> ... --> LeafReached
//! LeafReached[byte] -> emit byte, AtRoot
//! LeafReached[EOF]  -> done
//! ```
//!
//! Decoding ends at the EOF leaf, not at the end of the buffer: padding after
//! the EOF code is never read. Running out of bits before the EOF leaf is a
//! `TruncatedArchive` error; missing bits are never assumed to be zero.

use crate::bitio::BitReader;
use crate::error::{ArchiveSection, HuffmanError, Result};
use crate::metrics::Metrics;
use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node};

/// Follow bits from the root of `tree` to the next leaf.
pub fn decode_symbol(tree: &HuffmanTree, reader: &mut BitReader<'_>) -> Result<Symbol> {
    let start = reader.position();

    if let Some(symbol) = tree.lone_symbol() {
        if read_body_bit(reader, start)? {
            return Err(HuffmanError::InvalidCode { position: start }.into());
        }
        return Ok(symbol);
    }

    let mut node = tree.root();

    loop {
        match node {
            Node::Leaf(symbol) => return Ok(*symbol),
            Node::Internal { left, right } => {
                node = if read_body_bit(reader, start)? {
                    right.as_ref()
                } else {
                    left.as_ref()
                };
            }
        }
    }
}

/// Reports truncation at the start of the code being read.
fn read_body_bit(reader: &mut BitReader<'_>, code_start: usize) -> Result<bool> {
    reader
        .read_bit()
        .map_err(|e| e.truncated_in(ArchiveSection::Body, code_start))
}

/// Decode symbols until the EOF leaf, returning the bytes before it.
///
/// `reader` must be positioned on the first bit after the serialized tree.
/// Returns the decoded bytes and the number of codes read (EOF included).
pub fn decode_body(tree: &HuffmanTree, reader: &mut BitReader<'_>) -> Result<(Vec<u8>, u64)> {
    let mut output = Vec::new();
    let mut codes = 0u64;
    loop {
        let symbol = decode_symbol(tree, reader)?;
        codes += 1;
        match symbol.as_byte() {
            Some(byte) => output.push(byte),
            None => return Ok((output, codes)),
        }
    }
}

/// Read a complete archive (tree, body, EOF) from `reader`.
pub fn decode_archive(reader: &mut BitReader<'_>, metrics: &mut Metrics) -> Result<Vec<u8>> {
    let tree_start = reader.position();
    let tree = HuffmanTree::deserialize(reader)?;
    let body_start = reader.position();
    let (output, codes) = decode_body(&tree, reader)?;

    let leaves = tree.leaves();
    metrics.original_bytes = output.len() as u64;
    metrics.distinct_symbols = leaves.len();
    metrics.max_code_length = leaves.iter().map(|&(_, depth)| depth).max().unwrap_or(0);
    metrics.tree_bits = (body_start - tree_start) as u64;
    metrics.body_bits = (reader.position() - body_start) as u64;
    metrics.symbols_coded = codes;

    tracing::debug!(
        "decoded {} bytes: {} symbols, tree {} bits, body {} bits, {} padding bits ignored",
        output.len(),
        leaves.len(),
        metrics.tree_bits,
        metrics.body_bits,
        reader.bits_remaining()
    );
    Ok(output)
}

/// Decompress a bare archive.
pub fn decompress(archive: &[u8]) -> Result<Vec<u8>> {
    decompress_with_metrics(archive, &mut Metrics::new())
}

/// Decompress a bare archive, recording what happened.
pub fn decompress_with_metrics(archive: &[u8], metrics: &mut Metrics) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(archive);
    let output = decode_archive(&mut reader, metrics)?;

    metrics.archive_bytes = archive.len() as u64;
    metrics.complete();
    Ok(output)
}
