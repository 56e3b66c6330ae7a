//! Sample data for integration tests.
//!
//! Generated data mixes sections with very different statistics so the
//! trees built from it are neither trivial nor balanced:
//! - runs of one byte (highly compressible)
//! - text-like data over a small alphabet
//! - short repeating patterns
//! - random bytes (incompressible)

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `size_bytes` of mixed-compressibility data, reproducible by seed.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = (size_bytes - data.len()).min(rng.gen_range(64..=2048));

        match rng.gen_range(0..10u8) {
            0..=2 => {
                let byte_value: u8 = rng.gen();
                data.extend(std::iter::repeat(byte_value).take(section));
            }
            3..=5 => {
                let alphabet = b"etaoin shrdlu.,\n";
                for _ in 0..section {
                    // skew towards the front of the alphabet
                    let idx = rng.gen_range(0..alphabet.len()).min(rng.gen_range(0..alphabet.len()));
                    data.push(alphabet[idx]);
                }
            }
            6..=7 => {
                let pattern: Vec<u8> = (0..rng.gen_range(3..=24)).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(section));
            }
            _ => {
                for _ in 0..section {
                    data.push(rng.gen());
                }
            }
        }
    }

    data
}
