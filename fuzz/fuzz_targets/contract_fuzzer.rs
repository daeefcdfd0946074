//! Fuzz target for the size contract
//!
//! Calls every stateless entry point with arbitrarily sized buffers.
//!
//! # Strategy
//!
//! - Buffer lengths drawn independently, clustered around the real sizes
//!   (exact, one short, one long, empty, arbitrary)
//! - Ciphertext lengths around `plaintext + MAC` and `plaintext + SEAL`
//! - Random key material, so decryptions mostly fail authentication
//!
//! # Invariants
//!
//! - No entry point panics, whatever the sizes
//! - A call with every size correct is never a constraint violation
//! - A call with any size wrong is always a constraint violation
//! - Decrypting a freshly encrypted box with the right keys succeeds

#![no_main]

use std::sync::OnceLock;

use arbitrary::Arbitrary;
use brine_core::{
    BackendConfig, Crypto, Result,
    sizes::{
        AUTH_BYTES, AUTH_KEYBYTES, BOX_BEFORENMBYTES, BOX_MACBYTES, BOX_NONCEBYTES,
        BOX_PUBLICKEYBYTES, BOX_SEALBYTES, BOX_SECRETKEYBYTES,
    },
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Len {
    Exact,
    Short,
    Long,
    Empty,
    Any(u8),
}

impl Len {
    fn resolve(self, exact: usize) -> usize {
        match self {
            Len::Exact => exact,
            Len::Short => exact.saturating_sub(1),
            Len::Long => exact + 1,
            Len::Empty => 0,
            Len::Any(n) => n as usize,
        }
    }
}

#[derive(Debug, Arbitrary)]
enum Operation {
    Auth { out: Len, key: Len },
    AuthVerify { tag: Len, key: Len },
    BoxEasy { ciphertext: Len, nonce: Len, pk: Len, sk: Len },
    BoxOpenEasy { ciphertext: Len, nonce: Len, pk: Len, sk: Len },
    BoxDetached { ciphertext: Len, mac: Len, nonce: Len, pk: Len, sk: Len },
    BoxOpenDetachedAfternm { ciphertext: Len, mac: Len, nonce: Len, key: Len },
    BoxBeforenm { key: Len, pk: Len, sk: Len },
    BoxSeal { ciphertext: Len, pk: Len },
    BoxSealOpen { ciphertext: Len, pk: Len, sk: Len },
    Roundtrip { nonce: [u8; BOX_NONCEBYTES], seed: [u8; 32] },
}

#[derive(Debug, Arbitrary)]
struct Scenario {
    plaintext: Vec<u8>,
    fill: u8,
    operations: Vec<Operation>,
}

fn crypto() -> &'static Crypto {
    static CRYPTO: OnceLock<Crypto> = OnceLock::new();
    CRYPTO.get_or_init(|| {
        let Ok(crypto) = Crypto::new(&BackendConfig::seeded([0u8; 32])) else {
            unreachable!("seeded backend always initializes")
        };
        crypto
    })
}

/// Check the invariant linking size correctness and the error kind.
fn check(result: Result<()>, sizes_ok: bool) {
    match result {
        Ok(()) => assert!(sizes_ok, "call with wrong sizes succeeded"),
        Err(e) if sizes_ok => assert!(e.is_backend_failure(), "valid sizes rejected: {e}"),
        Err(e) => assert!(e.is_constraint_violation(), "wrong sizes reached backend: {e}"),
    }
}

fn check_bool(result: Result<bool>, sizes_ok: bool) {
    check(result.map(|_| ()), sizes_ok);
}

fuzz_target!(|scenario: Scenario| {
    let crypto = crypto();
    let pt = &scenario.plaintext;
    let buf = |len: usize| vec![scenario.fill; len];

    for op in scenario.operations {
        match op {
            Operation::Auth { out, key } => {
                let (o, k) = (out.resolve(AUTH_BYTES), key.resolve(AUTH_KEYBYTES));
                let ok = o == AUTH_BYTES && k == AUTH_KEYBYTES;
                check(crypto.auth(&mut buf(o), pt, &buf(k)), ok);
            },
            Operation::AuthVerify { tag, key } => {
                let (t, k) = (tag.resolve(AUTH_BYTES), key.resolve(AUTH_KEYBYTES));
                let ok = t == AUTH_BYTES && k == AUTH_KEYBYTES;
                check_bool(crypto.auth_verify(&buf(t), pt, &buf(k)), ok);
            },
            Operation::BoxEasy { ciphertext, nonce, pk, sk } => {
                let c = ciphertext.resolve(pt.len() + BOX_MACBYTES);
                let (n, p, s) = (
                    nonce.resolve(BOX_NONCEBYTES),
                    pk.resolve(BOX_PUBLICKEYBYTES),
                    sk.resolve(BOX_SECRETKEYBYTES),
                );
                let ok = c == pt.len() + BOX_MACBYTES
                    && n == BOX_NONCEBYTES
                    && p == BOX_PUBLICKEYBYTES
                    && s == BOX_SECRETKEYBYTES;
                check(crypto.box_easy(&mut buf(c), pt, &buf(n), &buf(p), &buf(s)), ok);
            },
            Operation::BoxOpenEasy { ciphertext, nonce, pk, sk } => {
                let c = ciphertext.resolve(pt.len() + BOX_MACBYTES);
                let (n, p, s) = (
                    nonce.resolve(BOX_NONCEBYTES),
                    pk.resolve(BOX_PUBLICKEYBYTES),
                    sk.resolve(BOX_SECRETKEYBYTES),
                );
                let ok = c == pt.len() + BOX_MACBYTES
                    && n == BOX_NONCEBYTES
                    && p == BOX_PUBLICKEYBYTES
                    && s == BOX_SECRETKEYBYTES;
                let mut out = buf(pt.len());
                check(crypto.box_open_easy(&mut out, &buf(c), &buf(n), &buf(p), &buf(s)), ok);
            },
            Operation::BoxDetached { ciphertext, mac, nonce, pk, sk } => {
                let c = ciphertext.resolve(pt.len());
                let (m, n, p, s) = (
                    mac.resolve(BOX_MACBYTES),
                    nonce.resolve(BOX_NONCEBYTES),
                    pk.resolve(BOX_PUBLICKEYBYTES),
                    sk.resolve(BOX_SECRETKEYBYTES),
                );
                let ok = c == pt.len()
                    && m == BOX_MACBYTES
                    && n == BOX_NONCEBYTES
                    && p == BOX_PUBLICKEYBYTES
                    && s == BOX_SECRETKEYBYTES;
                check(
                    crypto.box_detached(&mut buf(c), &mut buf(m), pt, &buf(n), &buf(p), &buf(s)),
                    ok,
                );
            },
            Operation::BoxOpenDetachedAfternm { ciphertext, mac, nonce, key } => {
                let c = ciphertext.resolve(pt.len());
                let (m, n, k) = (
                    mac.resolve(BOX_MACBYTES),
                    nonce.resolve(BOX_NONCEBYTES),
                    key.resolve(BOX_BEFORENMBYTES),
                );
                let ok = c == pt.len()
                    && m == BOX_MACBYTES
                    && n == BOX_NONCEBYTES
                    && k == BOX_BEFORENMBYTES;
                let mut out = buf(pt.len());
                check(
                    crypto.box_open_detached_afternm(&mut out, &buf(c), &buf(m), &buf(n), &buf(k)),
                    ok,
                );
            },
            Operation::BoxBeforenm { key, pk, sk } => {
                let (k, p, s) = (
                    key.resolve(BOX_BEFORENMBYTES),
                    pk.resolve(BOX_PUBLICKEYBYTES),
                    sk.resolve(BOX_SECRETKEYBYTES),
                );
                let ok =
                    k == BOX_BEFORENMBYTES && p == BOX_PUBLICKEYBYTES && s == BOX_SECRETKEYBYTES;
                check(crypto.box_beforenm(&mut buf(k), &buf(p), &buf(s)), ok);
            },
            Operation::BoxSeal { ciphertext, pk } => {
                let c = ciphertext.resolve(pt.len() + BOX_SEALBYTES);
                let p = pk.resolve(BOX_PUBLICKEYBYTES);
                let ok = c == pt.len() + BOX_SEALBYTES && p == BOX_PUBLICKEYBYTES;
                check(crypto.box_seal(&mut buf(c), pt, &buf(p)), ok);
            },
            Operation::BoxSealOpen { ciphertext, pk, sk } => {
                let c = ciphertext.resolve(pt.len() + BOX_SEALBYTES);
                let (p, s) = (pk.resolve(BOX_PUBLICKEYBYTES), sk.resolve(BOX_SECRETKEYBYTES));
                let ok = c == pt.len() + BOX_SEALBYTES
                    && p == BOX_PUBLICKEYBYTES
                    && s == BOX_SECRETKEYBYTES;
                let mut out = buf(pt.len());
                check(crypto.box_seal_open(&mut out, &buf(c), &buf(p), &buf(s)), ok);
            },
            Operation::Roundtrip { nonce, seed } => {
                let (mut pk, mut sk) = ([0u8; BOX_PUBLICKEYBYTES], [0u8; BOX_SECRETKEYBYTES]);
                assert!(crypto.box_seed_keypair(&mut pk, &mut sk, &seed).is_ok());

                let mut ciphertext = vec![0u8; pt.len() + BOX_MACBYTES];
                assert!(crypto.box_easy(&mut ciphertext, pt, &nonce, &pk, &sk).is_ok());

                let mut opened = vec![0u8; pt.len()];
                assert!(crypto.box_open_easy(&mut opened, &ciphertext, &nonce, &pk, &sk).is_ok());
                assert_eq!(&opened, pt, "roundtrip must restore the plaintext");
            },
        }
    }
});
