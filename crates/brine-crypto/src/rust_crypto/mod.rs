//! Production backend on the RustCrypto stack.
//!
//! | Family        | Algorithm                      | Crates                             |
//! |---------------|--------------------------------|------------------------------------|
//! | `auth`        | HMAC-SHA512/256                | `hmac`, `sha2`                     |
//! | `onetimeauth` | Poly1305                       | `poly1305`                         |
//! | `box`         | X25519 + XSalsa20-Poly1305     | `x25519-dalek`, `salsa20`, `crypto_secretbox` |
//! | `box_seal`    | libsodium sealed box           | `crypto_box`                       |
//! | random        | OS or seeded ChaCha20          | `getrandom`, `rand_chacha`         |

mod auth;
mod curve_box;
mod onetimeauth;

pub use onetimeauth::Poly1305State;

use crate::{
    backend::{Backend, Primitive, STATUS_FAILURE, STATUS_OK},
    config::BackendConfig,
    rng::SystemRng,
    sizes::{
        AUTH_BYTES, AUTH_KEYBYTES, BOX_BEFORENMBYTES, BOX_MACBYTES, BOX_NONCEBYTES,
        BOX_PUBLICKEYBYTES, BOX_SECRETKEYBYTES, BOX_SEEDBYTES, ONETIMEAUTH_BYTES,
        ONETIMEAUTH_KEYBYTES,
    },
};

/// Bytes drawn from the RNG during `init` to prove it is usable.
const RNG_PROBE_SIZE: usize = 16;

/// Backend implemented with pure-Rust primitives.
#[derive(Debug)]
pub struct RustCryptoBackend {
    rng: SystemRng,
}

impl RustCryptoBackend {
    /// Backend drawing randomness from the configured source.
    pub fn new(config: &BackendConfig) -> Self {
        Self { rng: SystemRng::from_source(&config.rng) }
    }
}

impl Default for RustCryptoBackend {
    fn default() -> Self {
        Self::new(&BackendConfig::default())
    }
}

fn status<E>(result: Result<(), E>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(_) => STATUS_FAILURE,
    }
}

impl Backend for RustCryptoBackend {
    type OneTimeAuthState = Poly1305State;

    fn init(&self) -> i32 {
        // Nothing to set up besides making sure entropy is available.
        let mut probe = [0u8; RNG_PROBE_SIZE];
        status(self.rng.fill(&mut probe))
    }

    fn primitive(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::Auth => "hmacsha512256",
            Primitive::OneTimeAuth => "poly1305",
            Primitive::Box => "curve25519xsalsa20poly1305",
        }
    }

    fn auth(
        &self,
        tag: &mut [u8; AUTH_BYTES],
        message: &[u8],
        key: &[u8; AUTH_KEYBYTES],
    ) -> i32 {
        *tag = auth::hmac_sha512_256(message, key);
        STATUS_OK
    }

    fn onetimeauth_init(
        &self,
        state: &mut Poly1305State,
        key: &[u8; ONETIMEAUTH_KEYBYTES],
    ) -> i32 {
        state.init(key);
        STATUS_OK
    }

    fn onetimeauth_update(&self, state: &mut Poly1305State, chunk: &[u8]) -> i32 {
        if state.update(chunk) { STATUS_OK } else { STATUS_FAILURE }
    }

    fn onetimeauth_final(&self, state: &Poly1305State, tag: &mut [u8; ONETIMEAUTH_BYTES]) -> i32 {
        match state.tag() {
            Some(computed) => {
                *tag = computed;
                STATUS_OK
            },
            None => STATUS_FAILURE,
        }
    }

    fn box_keypair(
        &self,
        public_key: &mut [u8; BOX_PUBLICKEYBYTES],
        secret_key: &mut [u8; BOX_SECRETKEYBYTES],
    ) -> i32 {
        status(curve_box::random_keypair(&self.rng).map(|(pk, sk)| {
            *public_key = pk;
            *secret_key = sk;
        }))
    }

    fn box_seed_keypair(
        &self,
        public_key: &mut [u8; BOX_PUBLICKEYBYTES],
        secret_key: &mut [u8; BOX_SECRETKEYBYTES],
        seed: &[u8; BOX_SEEDBYTES],
    ) -> i32 {
        (*public_key, *secret_key) = curve_box::seed_keypair(seed);
        STATUS_OK
    }

    fn scalarmult_base(
        &self,
        public_key: &mut [u8; BOX_PUBLICKEYBYTES],
        secret_key: &[u8; BOX_SECRETKEYBYTES],
    ) -> i32 {
        *public_key = curve_box::public_from_secret(secret_key);
        STATUS_OK
    }

    fn box_beforenm(
        &self,
        shared_key: &mut [u8; BOX_BEFORENMBYTES],
        public_key: &[u8; BOX_PUBLICKEYBYTES],
        secret_key: &[u8; BOX_SECRETKEYBYTES],
    ) -> i32 {
        status(curve_box::beforenm(public_key, secret_key).map(|key| *shared_key = key))
    }

    fn box_detached_afternm(
        &self,
        ciphertext: &mut [u8],
        mac: &mut [u8; BOX_MACBYTES],
        plaintext: &[u8],
        nonce: &[u8; BOX_NONCEBYTES],
        shared_key: &[u8; BOX_BEFORENMBYTES],
    ) -> i32 {
        status(
            curve_box::seal_detached(ciphertext, plaintext, nonce, shared_key)
                .map(|tag| *mac = tag),
        )
    }

    fn box_open_detached_afternm(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        mac: &[u8; BOX_MACBYTES],
        nonce: &[u8; BOX_NONCEBYTES],
        shared_key: &[u8; BOX_BEFORENMBYTES],
    ) -> i32 {
        status(curve_box::open_detached(plaintext, ciphertext, mac, nonce, shared_key))
    }

    fn box_seal(
        &self,
        ciphertext: &mut [u8],
        plaintext: &[u8],
        public_key: &[u8; BOX_PUBLICKEYBYTES],
    ) -> i32 {
        status(curve_box::seal(ciphertext, plaintext, public_key, &self.rng))
    }

    fn box_seal_open(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        public_key: &[u8; BOX_PUBLICKEYBYTES],
        secret_key: &[u8; BOX_SECRETKEYBYTES],
    ) -> i32 {
        status(curve_box::seal_open(plaintext, ciphertext, public_key, secret_key))
    }

    fn random_fill(&self, buffer: &mut [u8]) -> i32 {
        status(self.rng.fill(buffer))
    }
}
