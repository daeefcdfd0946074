//! Randomness source shared by every backend operation that needs entropy.
//!
//! # Security
//!
//! The OS source uses getrandom (e.g. `/dev/urandom` or `getrandom(2)` on
//! Linux, `BCryptGenRandom` on Windows). The seeded source is a ChaCha20
//! stream and is reproducible by construction; never use it for real keys.

use std::sync::Mutex;

use rand_chacha::{
    ChaCha20Rng,
    rand_core::{RngCore, SeedableRng},
};

use crate::config::RngSource;

/// Randomness could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngUnavailable;

/// Thread-safe CSPRNG handle.
pub enum SystemRng {
    /// OS CSPRNG
    Os,
    /// Seeded ChaCha20 stream, serialized behind a mutex
    Seeded(Box<Mutex<ChaCha20Rng>>),
}

impl SystemRng {
    /// Build the handle for a configured source.
    pub fn from_source(source: &RngSource) -> Self {
        match source {
            RngSource::Os => Self::Os,
            RngSource::Seeded { seed } => {
                Self::Seeded(Box::new(Mutex::new(ChaCha20Rng::from_seed(*seed))))
            },
        }
    }

    /// Fill `buffer` with random bytes.
    pub fn fill(&self, buffer: &mut [u8]) -> Result<(), RngUnavailable> {
        match self {
            Self::Os => getrandom::fill(buffer).map_err(|e| {
                tracing::debug!(error = %e, "OS RNG unavailable");
                RngUnavailable
            }),
            Self::Seeded(rng) => {
                let mut rng = rng.lock().map_err(|_| RngUnavailable)?;
                rng.fill_bytes(buffer);
                Ok(())
            },
        }
    }

    /// Fresh ChaCha20 stream keyed from this source.
    ///
    /// Used where a dependency wants an `RngCore` to draw from directly.
    pub fn fork(&self) -> Result<ChaCha20Rng, RngUnavailable> {
        let mut seed = [0u8; 32];
        self.fill(&mut seed)?;
        Ok(ChaCha20Rng::from_seed(seed))
    }
}

impl std::fmt::Debug for SystemRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Os => f.write_str("SystemRng::Os"),
            Self::Seeded(_) => f.write_str("SystemRng::Seeded"),
        }
    }
}
