//! Backend ownership and process-wide initialization.
//!
//! [`Crypto`] owns a backend and is the receiver for every primitive. Building
//! one runs the backend's `init` and checks its status, so holding a `Crypto`
//! proves the backend is ready.
//!
//! Most processes want exactly one, set up once at startup: [`init`] and
//! [`init_with`] guard a single global instance with a [`OnceLock`]. Repeated
//! or racing calls return the same instance (or the same error) and never
//! initialize the backend twice.

use std::sync::OnceLock;

use brine_crypto::{Backend, BackendConfig, Primitive, RngSource, RustCryptoBackend};

use crate::{contract::check_status, error::Result};

/// Entry point for every primitive.
///
/// Stateless operations take `&self` and may be called concurrently from any
/// number of threads; the backend carries no per-call state.
#[derive(Debug)]
pub struct Crypto<B: Backend = RustCryptoBackend> {
    backend: B,
}

impl<B: Backend> Crypto<B> {
    /// Initialize `backend` and take ownership of it.
    pub fn with_backend(backend: B) -> Result<Self> {
        check_status("init", backend.init())?;
        Ok(Self { backend })
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Algorithm name of a primitive family (e.g. `"poly1305"`).
    pub fn primitive(&self, primitive: Primitive) -> &'static str {
        self.backend.primitive(primitive)
    }
}

impl Crypto {
    /// Production backend with the given configuration.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Self::with_backend(RustCryptoBackend::new(config))
    }
}

static GLOBAL: OnceLock<Result<Crypto>> = OnceLock::new();

/// Initialize the process-wide instance with the default configuration.
///
/// Idempotent and thread-safe. Call it once from process bootstrap; later
/// calls return the same instance.
pub fn init() -> Result<&'static Crypto> {
    init_with(&BackendConfig::default())
}

/// Initialize the process-wide instance with `config`.
///
/// Only the first call's configuration takes effect. If that first
/// initialization failed, every later call returns the same error.
pub fn init_with(config: &BackendConfig) -> Result<&'static Crypto> {
    GLOBAL
        .get_or_init(|| {
            let result = Crypto::new(config);
            match &result {
                Ok(_) => tracing::info!(
                    seeded = matches!(config.rng, RngSource::Seeded { .. }),
                    "crypto backend initialized"
                ),
                Err(e) => tracing::error!(error = %e, "crypto backend initialization failed"),
            }
            result
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// The process-wide instance, if [`init`] has completed successfully.
pub fn global() -> Option<&'static Crypto> {
    GLOBAL.get().and_then(|result| result.as_ref().ok())
}
