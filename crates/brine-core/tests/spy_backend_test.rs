//! Validation-before-dispatch tests.
//!
//! A counting backend wraps the production one. Every constraint violation
//! must leave its counter at zero, and every successful call must reach it.

use std::sync::atomic::{AtomicUsize, Ordering};

use brine_core::{
    Backend, BackendConfig, ConstraintViolation, Crypto, OneTimeAuth, Primitive,
    RustCryptoBackend,
    sizes::{
        AUTH_BYTES, AUTH_KEYBYTES, BOX_BEFORENMBYTES, BOX_MACBYTES, BOX_NONCEBYTES,
        BOX_PUBLICKEYBYTES, BOX_SEALBYTES, BOX_SECRETKEYBYTES, BOX_SEEDBYTES, ONETIMEAUTH_BYTES,
        ONETIMEAUTH_KEYBYTES,
    },
};
use brine_crypto::Poly1305State;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
struct SpyBackend {
    inner: RustCryptoBackend,
    calls: AtomicUsize,
}

impl SpyBackend {
    fn new() -> Self {
        Self {
            inner: RustCryptoBackend::new(&BackendConfig::seeded([0x33; 32])),
            calls: AtomicUsize::new(0),
        }
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl Backend for SpyBackend {
    type OneTimeAuthState = Poly1305State;

    fn init(&self) -> i32 {
        self.inner.init()
    }

    fn primitive(&self, primitive: Primitive) -> &'static str {
        self.inner.primitive(primitive)
    }

    fn auth(&self, tag: &mut [u8; AUTH_BYTES], message: &[u8], key: &[u8; AUTH_KEYBYTES]) -> i32 {
        self.hit();
        self.inner.auth(tag, message, key)
    }

    fn onetimeauth_init(
        &self,
        state: &mut Poly1305State,
        key: &[u8; ONETIMEAUTH_KEYBYTES],
    ) -> i32 {
        self.hit();
        self.inner.onetimeauth_init(state, key)
    }

    fn onetimeauth_update(&self, state: &mut Poly1305State, chunk: &[u8]) -> i32 {
        self.hit();
        self.inner.onetimeauth_update(state, chunk)
    }

    fn onetimeauth_final(&self, state: &Poly1305State, tag: &mut [u8; ONETIMEAUTH_BYTES]) -> i32 {
        self.hit();
        self.inner.onetimeauth_final(state, tag)
    }

    fn box_keypair(
        &self,
        public_key: &mut [u8; BOX_PUBLICKEYBYTES],
        secret_key: &mut [u8; BOX_SECRETKEYBYTES],
    ) -> i32 {
        self.hit();
        self.inner.box_keypair(public_key, secret_key)
    }

    fn box_seed_keypair(
        &self,
        public_key: &mut [u8; BOX_PUBLICKEYBYTES],
        secret_key: &mut [u8; BOX_SECRETKEYBYTES],
        seed: &[u8; BOX_SEEDBYTES],
    ) -> i32 {
        self.hit();
        self.inner.box_seed_keypair(public_key, secret_key, seed)
    }

    fn scalarmult_base(
        &self,
        public_key: &mut [u8; BOX_PUBLICKEYBYTES],
        secret_key: &[u8; BOX_SECRETKEYBYTES],
    ) -> i32 {
        self.hit();
        self.inner.scalarmult_base(public_key, secret_key)
    }

    fn box_beforenm(
        &self,
        shared_key: &mut [u8; BOX_BEFORENMBYTES],
        public_key: &[u8; BOX_PUBLICKEYBYTES],
        secret_key: &[u8; BOX_SECRETKEYBYTES],
    ) -> i32 {
        self.hit();
        self.inner.box_beforenm(shared_key, public_key, secret_key)
    }

    fn box_detached_afternm(
        &self,
        ciphertext: &mut [u8],
        mac: &mut [u8; BOX_MACBYTES],
        plaintext: &[u8],
        nonce: &[u8; BOX_NONCEBYTES],
        shared_key: &[u8; BOX_BEFORENMBYTES],
    ) -> i32 {
        self.hit();
        self.inner.box_detached_afternm(ciphertext, mac, plaintext, nonce, shared_key)
    }

    fn box_open_detached_afternm(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        mac: &[u8; BOX_MACBYTES],
        nonce: &[u8; BOX_NONCEBYTES],
        shared_key: &[u8; BOX_BEFORENMBYTES],
    ) -> i32 {
        self.hit();
        self.inner.box_open_detached_afternm(plaintext, ciphertext, mac, nonce, shared_key)
    }

    fn box_seal(
        &self,
        ciphertext: &mut [u8],
        plaintext: &[u8],
        public_key: &[u8; BOX_PUBLICKEYBYTES],
    ) -> i32 {
        self.hit();
        self.inner.box_seal(ciphertext, plaintext, public_key)
    }

    fn box_seal_open(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        public_key: &[u8; BOX_PUBLICKEYBYTES],
        secret_key: &[u8; BOX_SECRETKEYBYTES],
    ) -> i32 {
        self.hit();
        self.inner.box_seal_open(plaintext, ciphertext, public_key, secret_key)
    }

    fn random_fill(&self, buffer: &mut [u8]) -> i32 {
        self.hit();
        self.inner.random_fill(buffer)
    }
}

/// Show rejected calls with `RUST_LOG=brine_core=debug`.
fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init();
}

fn spy() -> Crypto<SpyBackend> {
    init_tracing();
    Crypto::with_backend(SpyBackend::new()).expect("spy init")
}

fn calls(crypto: &Crypto<SpyBackend>) -> usize {
    crypto.backend().calls.load(Ordering::SeqCst)
}

#[test]
fn auth_violations_never_reach_backend() {
    let crypto = spy();
    let mut tag = [0u8; AUTH_BYTES];

    assert!(crypto.auth(&mut tag[..31], b"m", &[0u8; AUTH_KEYBYTES]).is_err());
    assert!(crypto.auth(&mut tag, b"m", &[0u8; 33]).is_err());
    assert!(crypto.auth_verify(&tag[..1], b"m", &[0u8; AUTH_KEYBYTES]).is_err());
    assert_eq!(calls(&crypto), 0);

    crypto.auth(&mut tag, b"m", &[0u8; AUTH_KEYBYTES]).unwrap();
    assert_eq!(calls(&crypto), 1);
}

#[test]
fn box_violations_never_reach_backend() {
    let crypto = spy();
    let pk = [1u8; BOX_PUBLICKEYBYTES];
    let sk = [2u8; BOX_SECRETKEYBYTES];
    let key = [3u8; BOX_BEFORENMBYTES];
    let nonce = [0u8; BOX_NONCEBYTES];
    let short_nonce = [0u8; BOX_NONCEBYTES - 1];
    let mut mac = [0u8; BOX_MACBYTES];
    let mut pt = [0u8; 8];
    let mut ct = [0u8; 8 + BOX_MACBYTES];
    let mut sealed = [0u8; 8 + BOX_SEALBYTES];

    let failures = [
        crypto.box_easy(&mut ct[1..], &pt, &nonce, &pk, &sk),
        crypto.box_easy(&mut ct, &pt, &short_nonce, &pk, &sk),
        crypto.box_open_easy(&mut pt, &ct, &nonce, &pk[..31], &sk),
        crypto.box_detached(&mut ct[..7], &mut mac, &pt, &nonce, &pk, &sk),
        crypto.box_open_detached(&mut pt, &ct[..8], &mac[..15], &nonce, &pk, &sk),
        crypto.box_beforenm(&mut [0u8; 31], &pk, &sk),
        crypto.box_easy_afternm(&mut ct, &pt, &nonce, &key[..16]),
        crypto.box_open_easy_afternm(&mut pt[..7], &ct, &nonce, &key),
        crypto.box_detached_afternm(&mut ct[..8], &mut mac, &pt, &short_nonce, &key),
        crypto.box_open_detached_afternm(&mut pt, &ct[..9], &mac, &nonce, &key),
        crypto.box_seal(&mut sealed[..8 + BOX_MACBYTES], &pt, &pk),
        crypto.box_seal_open(&mut pt, &sealed, &pk, &sk[..1]),
        crypto.box_keypair(&mut [0u8; 32], &mut [0u8; 16]),
        crypto.box_seed_keypair(&mut [0u8; 32], &mut [0u8; 32], &[0u8; 31]),
        crypto.public_from_private(&mut [0u8; 33], &sk),
    ];

    for result in failures {
        assert!(result.unwrap_err().is_constraint_violation());
    }
    assert_eq!(calls(&crypto), 0);
}

#[test]
fn streaming_misuse_never_reaches_backend() {
    let crypto = spy();
    let mut auth = OneTimeAuth::new(&crypto);
    let mut out = [0u8; ONETIMEAUTH_BYTES];

    let err = auth.update(b"early").unwrap_err();
    assert_eq!(
        err.violation(),
        Some(&ConstraintViolation::Uninitialized { operation: "onetimeauth_update" })
    );
    assert!(auth.finalize(&mut out).is_err());
    assert!(auth.init(&[0u8; ONETIMEAUTH_KEYBYTES - 1]).is_err());
    assert_eq!(calls(&crypto), 0);

    auth.init(&[0u8; ONETIMEAUTH_KEYBYTES]).unwrap();
    assert!(auth.update_range(b"abc", 2, 2).is_err());
    assert!(auth.finalize_at(&mut out, 1).is_err());
    assert_eq!(calls(&crypto), 1);

    auth.update(b"abc").unwrap();
    auth.finalize(&mut out).unwrap();
    assert_eq!(calls(&crypto), 3);
}

#[test]
fn one_shot_violations_never_reach_backend() {
    let crypto = spy();
    let mut out = [0u8; ONETIMEAUTH_BYTES + 1];

    assert!(crypto.onetimeauth(&mut out, b"m", &[0u8; ONETIMEAUTH_KEYBYTES]).is_err());
    assert!(crypto.onetimeauth_verify(&out[..15], b"m", &[0u8; ONETIMEAUTH_KEYBYTES]).is_err());
    assert_eq!(calls(&crypto), 0);
}

#[test]
fn empty_random_fill_skips_backend() {
    let crypto = spy();

    crypto.random_fill(&mut []).unwrap();
    assert_eq!(calls(&crypto), 0);

    crypto.random_fill(&mut [0u8; 8]).unwrap();
    assert_eq!(calls(&crypto), 1);
}

#[test]
fn keypair_mode_is_composed_from_backend_core() {
    let crypto = spy();
    let (mut pk, mut sk) = ([0u8; BOX_PUBLICKEYBYTES], [0u8; BOX_SECRETKEYBYTES]);
    crypto.box_keypair(&mut pk, &mut sk).unwrap();
    let before = calls(&crypto);

    let mut ct = [0u8; 3 + BOX_MACBYTES];
    crypto.box_easy(&mut ct, b"abc", &[0u8; BOX_NONCEBYTES], &pk, &sk).unwrap();

    // beforenm + detached_afternm
    assert_eq!(calls(&crypto) - before, 2);
}
