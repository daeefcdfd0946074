//! Backend configuration.

use serde::{Deserialize, Serialize};

/// Where the backend draws randomness from.
///
/// Every random draw (keypair generation, sealed-box ephemeral keys,
/// `random_fill`) goes through the configured source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RngSource {
    /// Operating system CSPRNG.
    #[default]
    Os,
    /// Deterministic ChaCha20 stream from a fixed seed.
    ///
    /// Only for tests and simulations: two backends with the same seed
    /// produce the same keys.
    Seeded {
        /// ChaCha20 seed
        seed: [u8; 32],
    },
}

/// Configuration for [`crate::RustCryptoBackend`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Randomness source
    #[serde(default)]
    pub rng: RngSource,
}

impl BackendConfig {
    /// Deterministic configuration seeded with `seed`.
    pub fn seeded(seed: [u8; 32]) -> Self {
        Self { rng: RngSource::Seeded { seed } }
    }
}
