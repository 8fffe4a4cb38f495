//! Deterministic random stream derivation
//!
//! Each generator component draws from its own named stream, derived
//! from the master seed with SHA-256. A (seed, name) pair always yields
//! the same sequence, and extra draws in one component never shift the
//! output of another.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sha2::{Digest, Sha256};

/// Derives the sub-seed for a named stream from the master seed
pub fn derive_seed(master_seed: u64, stream_name: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(master_seed.to_le_bytes());
    hasher.update(stream_name.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Creates the random stream for a named generator component
pub fn stream(master_seed: u64, stream_name: &str) -> StdRng {
    StdRng::seed_from_u64(derive_seed(master_seed, stream_name))
}
