//! The 9-bit symbol alphabet and the frequency table built over it.

use std::fmt;

use crate::error::{HuffmanError, Result};

/// One of the 257 values the code assigns a bit pattern to.
///
/// 0-255 are literal byte values, 256 is the end-of-file sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u16);

impl Symbol {
    /// End-of-file sentinel. Marks the end of the encoded body.
    pub const EOF: Symbol = Symbol(256);

    /// Number of bits a symbol occupies in a serialized tree.
    pub const BITS: usize = 9;

    /// Size of the alphabet (256 bytes + EOF).
    pub const COUNT: usize = 257;

    /// Validate a raw value.
    ///
    /// # Errors
    /// `HuffmanError::InvalidSymbol` for values above 256.
    pub fn new(value: u16) -> Result<Self> {
        if value as usize >= Self::COUNT {
            return Err(HuffmanError::InvalidSymbol(value).into());
        }
        Ok(Symbol(value))
    }

    pub fn value(self) -> u16 {
        self.0
    }

    pub fn is_eof(self) -> bool {
        self == Self::EOF
    }

    /// The literal byte, or `None` for EOF.
    pub fn as_byte(self) -> Option<u8> {
        u8::try_from(self.0).ok()
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Symbol(byte as u16)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_byte() {
            Some(b) if b.is_ascii_graphic() => write!(f, "{:#04x} '{}'", b, b as char),
            Some(b) => write!(f, "{:#04x}", b),
            None => f.write_str("EOF"),
        }
    }
}

/// Occurrence counts for every symbol of the alphabet.
///
/// A count of zero means the symbol is absent: it gets no leaf in the tree.
/// The table is a plain value owned by whoever is building a tree; nothing is
/// shared between encode sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; Symbol::COUNT],
}

impl FrequencyTable {
    /// Create a table with every count at zero.
    pub fn new() -> Self {
        Self {
            counts: [0; Symbol::COUNT],
        }
    }

    /// Count every byte of `data`, plus exactly one EOF.
    ///
    /// EOF is always present so the tree always has a path to it, even for
    /// empty input or input that uses all 256 byte values.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table.counts[Symbol::EOF.index()] = 1;
        table
    }

    /// Add `count` occurrences of `symbol`, saturating at `u64::MAX`.
    pub fn add(&mut self, symbol: Symbol, count: u64) {
        let slot = &mut self.counts[symbol.index()];
        *slot = slot.saturating_add(count);
    }

    /// Replace the count of `symbol`. Setting zero removes it.
    pub fn set(&mut self, symbol: Symbol, count: u64) {
        self.counts[symbol.index()] = count;
    }

    pub fn get(&self, symbol: Symbol) -> u64 {
        self.counts[symbol.index()]
    }

    /// Number of symbols with a non-zero count.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter_map(|(value, &count)| (count > 0).then_some((Symbol(value as u16), count)))
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |sum, &c| sum.saturating_add(c))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
