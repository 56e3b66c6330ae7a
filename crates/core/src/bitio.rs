//! Bit-level I/O over in-memory byte buffers.
//!
//! `BitWriter` and `BitReader` are the only way the codec touches archive
//! bytes. Both are MSB-first: the first bit written lands in bit 7 of the
//! first byte.
//!
//! # Padding Rules
//! - BitWriter: `finish` pads the final partial byte with zeros
//! - BitReader: cannot tell padding from data; the decoder stops at the EOF
//!   code and never looks at what follows it
//!
//! # Example
//! ```
//! use grin_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bit(true).unwrap();
//! writer.write_bits(0b0_0100_0001, 9).unwrap();
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1001_0000, 0b0100_0000]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert!(reader.read_bit().unwrap());
//! assert_eq!(reader.read_bits(9).unwrap(), 0x41);
//! assert!(reader.has_more_bits()); // six padding bits remain
//! ```

use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a growable byte buffer.
///
/// # Invariants
/// - `pending` holds the `pending_bits` most recent bits, left-aligned
/// - `pending_bits` is always < 8; a full byte is moved to `bytes` at once
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    pending: u8,
    pending_bits: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if bit {
            self.pending |= 0x80 >> self.pending_bits;
        }
        self.pending_bits += 1;
        if self.pending_bits == 8 {
            self.bytes.push(self.pending);
            self.pending = 0;
            self.pending_bits = 0;
        }
        Ok(())
    }

    /// Append the low `count` bits of `value`, most significant first.
    ///
    /// Writing `0b101` with `count = 3` appends the bits 1, 0, 1.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            let room = 8 - self.pending_bits as usize;
            let take = remaining.min(room);
            let shift = remaining - take;
            let chunk = ((value >> shift) & ((1u64 << take) - 1)) as u8;

            self.pending |= chunk << (room - take);
            self.pending_bits += take as u8;
            if self.pending_bits == 8 {
                self.bytes.push(self.pending);
                self.pending = 0;
                self.pending_bits = 0;
            }
            remaining = shift;
        }

        Ok(())
    }

    /// Flush the partial byte (zero-padded) and return the output.
    ///
    /// This consumes the writer, so no buffered bit can be left behind.
    pub fn finish(mut self) -> Vec<u8> {
        if self.pending_bits > 0 {
            self.bytes.push(self.pending);
        }
        self.bytes
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.pending_bits as usize
    }
}

/// Reads bits MSB-first from a byte slice.
///
/// # Invariants
/// - `position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new BitReader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` if the buffer is exhausted.
    pub fn read_bit(&mut self) -> Result<bool> {
        if !self.has_more_bits() {
            return Err(BitIoError::UnexpectedEof.into());
        }
        let byte = self.data[self.position / 8];
        let bit = (byte >> (7 - self.position % 8)) & 1 == 1;
        self.position += 1;
        Ok(bit)
    }

    /// Read `count` bits (0-64) as an unsigned value, first bit most significant.
    ///
    /// On error the reader does not move.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        let mut remaining = count;
        while remaining > 0 {
            let offset = self.position % 8;
            let available = 8 - offset;
            let take = remaining.min(available);

            let byte = self.data[self.position / 8] as u64;
            let bits = (byte >> (available - take)) & ((1u64 << take) - 1);
            result = (result << take) | bits;

            self.position += take;
            remaining -= take;
        }

        Ok(result)
    }

    /// Whether at least one more bit can be read.
    pub fn has_more_bits(&self) -> bool {
        self.position < self.data.len() * 8
    }

    /// Return the number of bits remaining in the buffer.
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.position
    }

    /// Return the current bit position.
    pub fn position(&self) -> usize {
        self.position
    }
}
