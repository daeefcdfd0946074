use brine_crypto::Backend;

use crate::{context::Crypto, contract::Call, error::Result};

impl<B: Backend> Crypto<B> {
    /// Fill `buffer` with bytes from the backend's CSPRNG.
    ///
    /// An empty buffer succeeds without consulting the backend. An
    /// unavailable entropy source is reported as a backend failure.
    pub fn random_fill(&self, buffer: &mut [u8]) -> Result<()> {
        if buffer.is_empty() {
            return Ok(());
        }
        Call::new("random_fill").status(self.backend().random_fill(buffer))
    }
}
