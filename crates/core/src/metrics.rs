//! Metrics collected while compressing or decompressing one file.
//!
//! A `Metrics` value belongs to a single session. The encode and decode
//! entry points fill in what they observe; the CLI prints the summary.
//!
//! # Thread Safety
//!
//! The `Metrics` struct is NOT shared. Sessions running in parallel each keep
//! their own and merge nothing.

use std::time::{Duration, Instant};

/// Observed sizes, code statistics and timing for one session.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the session started
    pub start_time: Instant,

    /// When the session ended (set on completion)
    pub end_time: Option<Instant>,

    // === Sizes ===
    /// Bytes of uncompressed data (input of encode, output of decode)
    pub original_bytes: u64,

    /// Bytes of archive (output of encode, input of decode)
    pub archive_bytes: u64,

    // === Code ===
    /// Symbols with a leaf in the tree, EOF included
    pub distinct_symbols: usize,

    /// Length of the longest code
    pub max_code_length: usize,

    /// Bits taken by the serialized tree
    pub tree_bits: u64,

    /// Bits taken by the codes, EOF code included
    pub body_bits: u64,

    /// Codes written or read, EOF included
    pub symbols_coded: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            original_bytes: 0,
            archive_bytes: 0,
            distinct_symbols: 0,
            max_code_length: 0,
            tree_bits: 0,
            body_bits: 0,
            symbols_coded: 0,
        }
    }

    /// Mark the session as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compute compression ratio (archive / original).
    ///
    /// Returns 0.0 if the original was empty.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            self.archive_bytes as f64 / self.original_bytes as f64
        }
    }

    /// Average code length over every coded symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbols_coded == 0 {
            0.0
        } else {
            self.body_bits as f64 / self.symbols_coded as f64
        }
    }

    /// Compute throughput of uncompressed data in bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.original_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("Original: {} bytes ({:.2} KiB)", self.original_bytes, self.original_bytes as f64 / 1024.0);
        println!("Archive:  {} bytes ({:.2} KiB)", self.archive_bytes, self.archive_bytes as f64 / 1024.0);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!();

        println!("=== Code ===");
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Max code length: {} bits", self.max_code_length);
        println!("Tree: {} bits", self.tree_bits);
        println!("Body: {} bits ({} codes, {:.3} bits/symbol)", self.body_bits, self.symbols_coded, self.bits_per_symbol());
        println!();

        println!("Throughput: {:.2} MiB/s", self.throughput_bps() / 1024.0 / 1024.0);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
