//! Backend capability interface.
//!
//! Decouples the calling-safety layer from the code that actually runs the
//! primitives. Production uses [`crate::RustCryptoBackend`]; tests wrap it to
//! observe which calls reach the backend.

use zeroize::Zeroize;

use crate::sizes::{
    AUTH_BYTES, AUTH_KEYBYTES, BOX_BEFORENMBYTES, BOX_MACBYTES, BOX_NONCEBYTES,
    BOX_PUBLICKEYBYTES, BOX_SECRETKEYBYTES, BOX_SEEDBYTES, ONETIMEAUTH_BYTES,
    ONETIMEAUTH_KEYBYTES,
};

/// Status returned by a successful backend call.
pub const STATUS_OK: i32 = 0;

/// Status returned by a failed backend call.
pub const STATUS_FAILURE: i32 = -1;

/// Primitive families whose algorithm names can be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Multi-use message authentication (`auth`)
    Auth,
    /// One-time authenticator (`onetimeauth`)
    OneTimeAuth,
    /// Public-key authenticated encryption (`box`)
    Box,
}

/// Native primitive provider.
///
/// Fixed-size arguments are arrays, so a backend never sees a mis-sized key,
/// nonce or tag. Variable-length buffers are slices whose lengths the facade
/// has already checked; implementations must still return
/// [`STATUS_FAILURE`] rather than panic if they disagree.
///
/// # Invariants
///
/// - `init` is idempotent and must succeed before any other call is made
/// - Every method returns [`STATUS_OK`] on success, anything else on failure
/// - `onetimeauth_final` does not consume or invalidate the state
/// - On a failed decryption the plaintext buffer must not hold unverified
///   plaintext
pub trait Backend: Send + Sync + 'static {
    /// In-progress one-time authenticator state.
    ///
    /// `Default` yields an uninitialized state; `Clone` must be a deep copy so
    /// that two continuations evolve independently.
    type OneTimeAuthState: Clone + Default + Send;

    /// One-time backend setup. Repeated calls are no-ops.
    fn init(&self) -> i32;

    /// Algorithm name for a primitive family.
    fn primitive(&self, primitive: Primitive) -> &'static str;

    /// Compute a multi-use MAC over `message`.
    fn auth(
        &self,
        tag: &mut [u8; AUTH_BYTES],
        message: &[u8],
        key: &[u8; AUTH_KEYBYTES],
    ) -> i32;

    /// Seed `state` from a one-time key, discarding anything it held.
    fn onetimeauth_init(
        &self,
        state: &mut Self::OneTimeAuthState,
        key: &[u8; ONETIMEAUTH_KEYBYTES],
    ) -> i32;

    /// Absorb `chunk` into `state`.
    fn onetimeauth_update(&self, state: &mut Self::OneTimeAuthState, chunk: &[u8]) -> i32;

    /// Compute the tag for everything absorbed so far.
    fn onetimeauth_final(
        &self,
        state: &Self::OneTimeAuthState,
        tag: &mut [u8; ONETIMEAUTH_BYTES],
    ) -> i32;

    /// Generate a fresh keypair from the backend's CSPRNG.
    fn box_keypair(
        &self,
        public_key: &mut [u8; BOX_PUBLICKEYBYTES],
        secret_key: &mut [u8; BOX_SECRETKEYBYTES],
    ) -> i32;

    /// Derive a keypair deterministically from `seed`.
    fn box_seed_keypair(
        &self,
        public_key: &mut [u8; BOX_PUBLICKEYBYTES],
        secret_key: &mut [u8; BOX_SECRETKEYBYTES],
        seed: &[u8; BOX_SEEDBYTES],
    ) -> i32;

    /// Scalar multiplication of the base point (public key from private key).
    fn scalarmult_base(
        &self,
        public_key: &mut [u8; BOX_PUBLICKEYBYTES],
        secret_key: &[u8; BOX_SECRETKEYBYTES],
    ) -> i32;

    /// Precompute the shared key for a (remote public, local secret) pair.
    fn box_beforenm(
        &self,
        shared_key: &mut [u8; BOX_BEFORENMBYTES],
        public_key: &[u8; BOX_PUBLICKEYBYTES],
        secret_key: &[u8; BOX_SECRETKEYBYTES],
    ) -> i32;

    /// Encrypt under a shared key, writing the MAC separately.
    fn box_detached_afternm(
        &self,
        ciphertext: &mut [u8],
        mac: &mut [u8; BOX_MACBYTES],
        plaintext: &[u8],
        nonce: &[u8; BOX_NONCEBYTES],
        shared_key: &[u8; BOX_BEFORENMBYTES],
    ) -> i32;

    /// Verify and decrypt under a shared key with a separate MAC.
    fn box_open_detached_afternm(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        mac: &[u8; BOX_MACBYTES],
        nonce: &[u8; BOX_NONCEBYTES],
        shared_key: &[u8; BOX_BEFORENMBYTES],
    ) -> i32;

    /// Encrypt anonymously to `public_key`.
    fn box_seal(
        &self,
        ciphertext: &mut [u8],
        plaintext: &[u8],
        public_key: &[u8; BOX_PUBLICKEYBYTES],
    ) -> i32;

    /// Open a sealed box addressed to the given keypair.
    fn box_seal_open(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        public_key: &[u8; BOX_PUBLICKEYBYTES],
        secret_key: &[u8; BOX_SECRETKEYBYTES],
    ) -> i32;

    /// Fill `buffer` from the CSPRNG.
    fn random_fill(&self, buffer: &mut [u8]) -> i32;

    /// Combined mode under a shared key: `ciphertext = MAC || encrypted`.
    fn box_easy_afternm(
        &self,
        ciphertext: &mut [u8],
        plaintext: &[u8],
        nonce: &[u8; BOX_NONCEBYTES],
        shared_key: &[u8; BOX_BEFORENMBYTES],
    ) -> i32 {
        let Some((mac, body)) = ciphertext.split_first_chunk_mut::<BOX_MACBYTES>() else {
            return STATUS_FAILURE;
        };
        self.box_detached_afternm(body, mac, plaintext, nonce, shared_key)
    }

    /// Open a combined-mode box under a shared key.
    fn box_open_easy_afternm(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        nonce: &[u8; BOX_NONCEBYTES],
        shared_key: &[u8; BOX_BEFORENMBYTES],
    ) -> i32 {
        let Some((mac, body)) = ciphertext.split_first_chunk::<BOX_MACBYTES>() else {
            return STATUS_FAILURE;
        };
        self.box_open_detached_afternm(plaintext, body, mac, nonce, shared_key)
    }

    /// Combined-mode encryption from a keypair.
    fn box_easy(
        &self,
        ciphertext: &mut [u8],
        plaintext: &[u8],
        nonce: &[u8; BOX_NONCEBYTES],
        public_key: &[u8; BOX_PUBLICKEYBYTES],
        secret_key: &[u8; BOX_SECRETKEYBYTES],
    ) -> i32 {
        with_shared_key(self, public_key, secret_key, |shared_key| {
            self.box_easy_afternm(ciphertext, plaintext, nonce, shared_key)
        })
    }

    /// Open a combined-mode box from a keypair.
    fn box_open_easy(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        nonce: &[u8; BOX_NONCEBYTES],
        public_key: &[u8; BOX_PUBLICKEYBYTES],
        secret_key: &[u8; BOX_SECRETKEYBYTES],
    ) -> i32 {
        with_shared_key(self, public_key, secret_key, |shared_key| {
            self.box_open_easy_afternm(plaintext, ciphertext, nonce, shared_key)
        })
    }

    /// Detached-mode encryption from a keypair.
    fn box_detached(
        &self,
        ciphertext: &mut [u8],
        mac: &mut [u8; BOX_MACBYTES],
        plaintext: &[u8],
        nonce: &[u8; BOX_NONCEBYTES],
        public_key: &[u8; BOX_PUBLICKEYBYTES],
        secret_key: &[u8; BOX_SECRETKEYBYTES],
    ) -> i32 {
        with_shared_key(self, public_key, secret_key, |shared_key| {
            self.box_detached_afternm(ciphertext, mac, plaintext, nonce, shared_key)
        })
    }

    /// Detached-mode decryption from a keypair.
    fn box_open_detached(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        mac: &[u8; BOX_MACBYTES],
        nonce: &[u8; BOX_NONCEBYTES],
        public_key: &[u8; BOX_PUBLICKEYBYTES],
        secret_key: &[u8; BOX_SECRETKEYBYTES],
    ) -> i32 {
        with_shared_key(self, public_key, secret_key, |shared_key| {
            self.box_open_detached_afternm(plaintext, ciphertext, mac, nonce, shared_key)
        })
    }
}

/// Run `op` with a freshly precomputed shared key, wiping the key afterwards.
fn with_shared_key<B, F>(
    backend: &B,
    public_key: &[u8; BOX_PUBLICKEYBYTES],
    secret_key: &[u8; BOX_SECRETKEYBYTES],
    op: F,
) -> i32
where
    B: Backend + ?Sized,
    F: FnOnce(&[u8; BOX_BEFORENMBYTES]) -> i32,
{
    let mut shared_key = [0u8; BOX_BEFORENMBYTES];
    let status = backend.box_beforenm(&mut shared_key, public_key, secret_key);
    let status = if status == STATUS_OK { op(&shared_key) } else { status };
    shared_key.zeroize();
    status
}
