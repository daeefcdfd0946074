//! Incremental one-time authentication (Poly1305).
//!
//! # Lifecycle
//!
//! ```text
//!   new ──▶ Uninitialized ──init(key)──▶ Initialized ──update(chunk)──┐
//!                                          ▲    │ ▲                   │
//!                                          │    │ └───────────────────┘
//!                                 init(key)│    ▼
//!                                          └── finalize(out) (state kept)
//! ```
//!
//! `update` and `finalize` before `init` are constraint violations and never
//! reach the backend. `finalize` does not consume the state: further updates
//! extend the same message and a later `finalize` covers everything absorbed.
//! `init` again restarts with a new key.
//!
//! A one-time key must authenticate exactly one message. Reusing a key for two
//! different messages lets an observer forge tags.
//!
//! Cloning a [`OneTimeAuth`] copies the accumulator; the clone and the
//! original then evolve independently, which allows tagging several messages
//! that share a prefix without re-absorbing it.

use brine_crypto::{
    Backend, RustCryptoBackend,
    sizes::{ONETIMEAUTH_BYTES, ONETIMEAUTH_KEYBYTES},
};
use zeroize::Zeroize;

use crate::{
    context::Crypto,
    contract::{Call, Expect},
    ct,
    error::{ConstraintViolation, Result},
};

/// Streaming Poly1305 authenticator bound to a [`Crypto`] instance.
///
/// Not meant to be shared between threads while it is being updated; it is
/// `Send`, so move it or clone it instead.
pub struct OneTimeAuth<'a, B: Backend = RustCryptoBackend> {
    crypto: &'a Crypto<B>,
    state: B::OneTimeAuthState,
    initialized: bool,
}

impl<B: Backend> Clone for OneTimeAuth<'_, B> {
    fn clone(&self) -> Self {
        Self { crypto: self.crypto, state: self.state.clone(), initialized: self.initialized }
    }
}

impl<B: Backend> std::fmt::Debug for OneTimeAuth<'_, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneTimeAuth")
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl<'a, B: Backend> OneTimeAuth<'a, B> {
    /// Uninitialized authenticator. Call [`OneTimeAuth::init`] before use.
    pub fn new(crypto: &'a Crypto<B>) -> Self {
        Self { crypto, state: B::OneTimeAuthState::default(), initialized: false }
    }

    /// Authenticator already initialized with `key`.
    pub fn with_key(crypto: &'a Crypto<B>, key: &[u8]) -> Result<Self> {
        let mut auth = Self::new(crypto);
        auth.init(key)?;
        Ok(auth)
    }

    /// Whether `init` has succeeded on this state.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Start a new message under `key`, discarding any previous progress.
    ///
    /// If the backend rejects the key the authenticator is left
    /// uninitialized.
    pub fn init(&mut self, key: &[u8]) -> Result<()> {
        let call = Call::new("onetimeauth_init");
        call.validate(&[Expect::size(key.len(), ONETIMEAUTH_KEYBYTES, "ONETIMEAUTH_KEYBYTES")])?;
        let key = call.fixed(key)?;

        self.initialized = false;
        let status = self.crypto.backend().onetimeauth_init(&mut self.state, key);
        if let Err(e) = call.status(status) {
            self.state = B::OneTimeAuthState::default();
            return Err(e);
        }

        self.initialized = true;
        tracing::trace!("onetimeauth initialized");
        Ok(())
    }

    /// Absorb all of `input`.
    pub fn update(&mut self, input: &[u8]) -> Result<()> {
        self.update_range(input, 0, input.len())
    }

    /// Absorb `input[offset..offset + length]`.
    pub fn update_range(&mut self, input: &[u8], offset: usize, length: usize) -> Result<()> {
        let call = Call::new("onetimeauth_update");
        call.range(input.len(), offset, length)?;
        self.require_initialized(call)?;

        let chunk = &input[offset..offset + length];
        call.status(self.crypto.backend().onetimeauth_update(&mut self.state, chunk))?;
        tracing::trace!(bytes = length, "onetimeauth update");
        Ok(())
    }

    /// Write the tag for everything absorbed so far to the start of `out`.
    ///
    /// The state is left untouched.
    pub fn finalize(&self, out: &mut [u8]) -> Result<()> {
        self.finalize_at(out, 0)
    }

    /// Write the tag into `out[offset..offset + ONETIMEAUTH_BYTES]`.
    ///
    /// Bytes of `out` outside that window are not touched.
    pub fn finalize_at(&self, out: &mut [u8], offset: usize) -> Result<()> {
        let call = Call::new("onetimeauth_final");
        call.range(out.len(), offset, ONETIMEAUTH_BYTES)?;
        self.require_initialized(call)?;

        let tag = call.fixed_mut(&mut out[offset..offset + ONETIMEAUTH_BYTES])?;
        call.status(self.crypto.backend().onetimeauth_final(&self.state, tag))?;
        tracing::trace!("onetimeauth finalized");
        Ok(())
    }

    /// The tag for everything absorbed so far, as an array.
    pub fn tag(&self) -> Result<[u8; ONETIMEAUTH_BYTES]> {
        let mut tag = [0u8; ONETIMEAUTH_BYTES];
        self.finalize(&mut tag)?;
        Ok(tag)
    }

    fn require_initialized(&self, call: Call) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(call.reject(ConstraintViolation::Uninitialized { operation: call.operation() }))
        }
    }
}

impl<B: Backend> Crypto<B> {
    /// One-shot Poly1305 tag of `message` under `key`.
    pub fn onetimeauth(&self, out: &mut [u8], message: &[u8], key: &[u8]) -> Result<()> {
        Call::new("onetimeauth").validate(&[
            Expect::size(out.len(), ONETIMEAUTH_BYTES, "ONETIMEAUTH_BYTES"),
            Expect::size(key.len(), ONETIMEAUTH_KEYBYTES, "ONETIMEAUTH_KEYBYTES"),
        ])?;

        let mut auth = OneTimeAuth::with_key(self, key)?;
        auth.update(message)?;
        auth.finalize(out)
    }

    /// Check a one-shot Poly1305 tag in constant time.
    pub fn onetimeauth_verify(&self, tag: &[u8], message: &[u8], key: &[u8]) -> Result<bool> {
        Call::new("onetimeauth_verify").validate(&[
            Expect::size(tag.len(), ONETIMEAUTH_BYTES, "ONETIMEAUTH_BYTES"),
            Expect::size(key.len(), ONETIMEAUTH_KEYBYTES, "ONETIMEAUTH_KEYBYTES"),
        ])?;

        let mut expected = [0u8; ONETIMEAUTH_BYTES];
        self.onetimeauth(&mut expected, message, key)?;
        let valid = ct::is_equal(tag, &expected);
        expected.zeroize();
        Ok(valid)
    }
}
