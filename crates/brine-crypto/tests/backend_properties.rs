//! Property-based tests for the RustCrypto backend.
//!
//! These drive the `Backend` trait directly, below the facade's size checks,
//! to pin down the status contract: variable-length mismatches and forged
//! input produce a failure status, never a panic.

use brine_crypto::{
    Backend, BackendConfig, Poly1305State, RustCryptoBackend, STATUS_FAILURE, STATUS_OK,
    sizes::{BOX_BEFORENMBYTES, BOX_MACBYTES, BOX_NONCEBYTES, BOX_SEALBYTES, ONETIMEAUTH_BYTES},
};
use proptest::prelude::*;

fn backend() -> RustCryptoBackend {
    RustCryptoBackend::new(&BackendConfig::seeded([0x21; 32]))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Feeding a message byte by byte or all at once yields the same tag.
    #[test]
    fn prop_poly1305_chunk_independent(
        message in prop::collection::vec(any::<u8>(), 0..300),
        key in any::<[u8; 32]>(),
    ) {
        let backend = backend();

        let mut whole = Poly1305State::default();
        prop_assert_eq!(backend.onetimeauth_init(&mut whole, &key), STATUS_OK);
        prop_assert_eq!(backend.onetimeauth_update(&mut whole, &message), STATUS_OK);

        let mut bytewise = Poly1305State::default();
        prop_assert_eq!(backend.onetimeauth_init(&mut bytewise, &key), STATUS_OK);
        for byte in &message {
            let status = backend.onetimeauth_update(&mut bytewise, std::slice::from_ref(byte));
            prop_assert_eq!(status, STATUS_OK);
        }

        let mut tag_whole = [0u8; ONETIMEAUTH_BYTES];
        let mut tag_bytewise = [0u8; ONETIMEAUTH_BYTES];
        prop_assert_eq!(backend.onetimeauth_final(&whole, &mut tag_whole), STATUS_OK);
        prop_assert_eq!(backend.onetimeauth_final(&bytewise, &mut tag_bytewise), STATUS_OK);
        prop_assert_eq!(tag_whole, tag_bytewise);
    }

    /// Detached encryption round-trips under any shared key and nonce.
    #[test]
    fn prop_detached_afternm_roundtrip(
        message in prop::collection::vec(any::<u8>(), 0..256),
        key in any::<[u8; BOX_BEFORENMBYTES]>(),
        nonce in any::<[u8; BOX_NONCEBYTES]>(),
    ) {
        let backend = backend();
        let mut ciphertext = vec![0u8; message.len()];
        let mut mac = [0u8; BOX_MACBYTES];
        prop_assert_eq!(
            backend.box_detached_afternm(&mut ciphertext, &mut mac, &message, &nonce, &key),
            STATUS_OK
        );

        let mut plaintext = vec![0u8; message.len()];
        prop_assert_eq!(
            backend.box_open_detached_afternm(&mut plaintext, &ciphertext, &mac, &nonce, &key),
            STATUS_OK
        );
        prop_assert_eq!(plaintext, message);
    }

    /// Mismatched variable-length buffers are a failure status, not a panic.
    #[test]
    fn prop_length_mismatch_is_failure(
        plaintext_len in 0usize..64,
        ciphertext_len in 0usize..64,
    ) {
        prop_assume!(plaintext_len != ciphertext_len);
        let backend = backend();
        let mut mac = [0u8; BOX_MACBYTES];

        let status = backend.box_detached_afternm(
            &mut vec![0u8; ciphertext_len],
            &mut mac,
            &vec![0u8; plaintext_len],
            &[0u8; BOX_NONCEBYTES],
            &[1u8; BOX_BEFORENMBYTES],
        );
        prop_assert_eq!(status, STATUS_FAILURE);

        let status = backend.box_seal(
            &mut vec![0u8; ciphertext_len],
            &vec![0u8; plaintext_len],
            &[9u8; 32],
        );
        prop_assert_eq!(status == STATUS_OK, ciphertext_len == plaintext_len + BOX_SEALBYTES);
    }
}
