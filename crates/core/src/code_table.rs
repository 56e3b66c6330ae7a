//! Symbol → code lookup derived from a Huffman tree.
//!
//! Built with one walk of the tree, recording the path to every leaf
//! (0 = left, 1 = right). Encoding then costs one table lookup per byte
//! instead of a tree search.

use std::fmt;

use crate::bitio::BitWriter;
use crate::error::Result;
use crate::symbol::Symbol;
use crate::tree::HuffmanTree;

/// Longest code a tree over 257 distinct symbols can produce.
pub const MAX_CODE_LENGTH: usize = Symbol::COUNT - 1;

const WORDS: usize = MAX_CODE_LENGTH / 64;

/// A root-to-leaf path: up to 256 bits, first step in the top bit of word 0.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Code {
    words: [u64; WORDS],
    len: u16,
}

impl Code {
    const EMPTY: Code = Code {
        words: [0; WORDS],
        len: 0,
    };

    /// The path one step further down.
    fn child(mut self, right: bool) -> Code {
        let i = self.len as usize;
        if right {
            self.words[i / 64] |= 1 << (63 - i % 64);
        }
        self.len += 1;
        self
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit `i` of the path, `true` meaning "go right". `None` past the end.
    pub fn bit(&self, i: usize) -> Option<bool> {
        (i < self.len()).then(|| (self.words[i / 64] >> (63 - i % 64)) & 1 == 1)
    }

    /// Append the code to `writer`, first step first.
    pub fn write_to(&self, writer: &mut BitWriter) -> Result<()> {
        let mut remaining = self.len();
        for &word in &self.words {
            if remaining == 0 {
                break;
            }
            let take = remaining.min(64);
            writer.write_bits(word >> (64 - take), take)?;
            remaining -= take;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len() {
            f.write_str(if self.bit(i) == Some(true) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Codes for every symbol of one tree.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Option<Code>; Symbol::COUNT],
    max_length: usize,
}

impl CodeTable {
    /// Walk `tree` once and record the path to every leaf.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = [None; Symbol::COUNT];
        let mut max_length = 0;

        tree.for_each_leaf(Code::EMPTY, Code::child, |symbol, code| {
            max_length = max_length.max(code.len());
            codes[symbol.index()] = Some(code);
        });

        Self { codes, max_length }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes[symbol.index()].as_ref()
    }

    /// Length of the longest code in the table.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Symbols that have a code, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        Self::symbols().zip(self.codes.iter()).filter_map(|(s, c)| Some((s, c.as_ref()?)))
    }

    fn symbols() -> impl Iterator<Item = Symbol> {
        (0..Symbol::COUNT as u16).filter_map(|v| Symbol::new(v).ok())
    }
}
