//! `.grin` container: a magic number in front of an archive.
//!
//! # Container Format
//!
//! ```text
//! +------------------+
//! | Magic (4 bytes)  |  0x00000736, big-endian (32 bits, MSB-first)
//! +------------------+
//! | archive          |  tree + codes + EOF code + padding
//! | (variable)       |
//! +------------------+
//! ```
//!
//! The archive starts on a byte boundary, so `unpack` is just a header check
//! followed by the archive decoder.

use crate::bitio::{BitReader, BitWriter};
use crate::decoder::decode_archive;
use crate::encoder::encode_archive;
use crate::error::{ContainerError, Result};
use crate::metrics::Metrics;

/// Magic number identifying a `.grin` file.
pub const MAGIC: u32 = 0x736;

/// Size of the container header in bytes
pub const HEADER_SIZE: usize = 4;

/// Compress `input` into a container.
pub fn pack(input: &[u8]) -> Result<Vec<u8>> {
    pack_with_metrics(input, &mut Metrics::new())
}

/// Compress `input` into a container, recording what happened.
///
/// `metrics.archive_bytes` counts the header too: it is the file size.
pub fn pack_with_metrics(input: &[u8], metrics: &mut Metrics) -> Result<Vec<u8>> {
    let mut writer = BitWriter::new();
    writer.write_bits(MAGIC as u64, 32)?;
    encode_archive(input, &mut writer, metrics)?;
    let bytes = writer.finish();

    metrics.archive_bytes = bytes.len() as u64;
    metrics.complete();
    Ok(bytes)
}

/// Check the header of a container and return the magic number found.
///
/// # Errors
/// - `ContainerError::TooShort` if fewer than 4 bytes are present
/// - `ContainerError::InvalidMagic` if the magic number doesn't match
pub fn read_header(reader: &mut BitReader<'_>) -> Result<u32> {
    if reader.bits_remaining() < HEADER_SIZE * 8 {
        return Err(ContainerError::TooShort {
            required: HEADER_SIZE,
            actual: reader.bits_remaining() / 8,
        }
        .into());
    }

    let magic = reader.read_bits(32)? as u32;
    if magic != MAGIC {
        return Err(ContainerError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }
    Ok(magic)
}

/// Decompress a container.
pub fn unpack(bytes: &[u8]) -> Result<Vec<u8>> {
    unpack_with_metrics(bytes, &mut Metrics::new())
}

/// Decompress a container, recording what happened.
pub fn unpack_with_metrics(bytes: &[u8], metrics: &mut Metrics) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(bytes);
    read_header(&mut reader)?;
    let output = decode_archive(&mut reader, metrics)?;

    metrics.archive_bytes = bytes.len() as u64;
    metrics.complete();
    Ok(output)
}
