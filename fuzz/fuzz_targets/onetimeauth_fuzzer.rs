//! Fuzz target for the streaming one-time authenticator
//!
//! Drives `OneTimeAuth` through arbitrary sequences of lifecycle calls and
//! compares it with a model that records the absorbed bytes.
//!
//! # Strategy
//!
//! - Random interleavings of init, update, update_range, finalize, clone
//! - Offsets and lengths near and beyond the buffer bounds (including values
//!   whose sum overflows)
//! - Keys of arbitrary length
//!
//! # Invariants
//!
//! - Calls before a successful init are constraint violations
//! - Rejected calls leave the state unchanged
//! - After any accepted sequence the tag equals the one-shot tag over the
//!   concatenation of everything absorbed since the last init
//! - A clone continues independently from the original

#![no_main]

use std::sync::OnceLock;

use arbitrary::Arbitrary;
use brine_core::{
    BackendConfig, Crypto, OneTimeAuth,
    sizes::{ONETIMEAUTH_BYTES, ONETIMEAUTH_KEYBYTES},
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Step {
    Init { key: Vec<u8> },
    Update { data: Vec<u8> },
    UpdateRange { data: Vec<u8>, offset: usize, length: usize },
    Finalize { out_len: u8, offset: u8 },
    /// Clone, feed `data` to one copy, keep the untouched one.
    Fork { data: Vec<u8> },
}

/// Reference model: the key and every byte absorbed since `init`.
struct Model {
    key: Option<Vec<u8>>,
    absorbed: Vec<u8>,
}

fn crypto() -> &'static Crypto {
    static CRYPTO: OnceLock<Crypto> = OnceLock::new();
    CRYPTO.get_or_init(|| {
        let Ok(crypto) = Crypto::new(&BackendConfig::seeded([1u8; 32])) else {
            unreachable!("seeded backend always initializes")
        };
        crypto
    })
}

fn expected_tag(model: &Model) -> Option<[u8; ONETIMEAUTH_BYTES]> {
    let key = model.key.as_ref()?;
    let mut tag = [0u8; ONETIMEAUTH_BYTES];
    assert!(crypto().onetimeauth(&mut tag, &model.absorbed, key).is_ok());
    Some(tag)
}

fuzz_target!(|steps: Vec<Step>| {
    let crypto = crypto();
    let mut auth = OneTimeAuth::new(crypto);
    let mut model = Model { key: None, absorbed: Vec::new() };

    for step in steps {
        match step {
            Step::Init { key } => {
                let result = auth.init(&key);
                if key.len() == ONETIMEAUTH_KEYBYTES {
                    assert!(result.is_ok(), "valid key rejected");
                    model = Model { key: Some(key), absorbed: Vec::new() };
                } else {
                    assert!(result.is_err_and(|e| e.is_constraint_violation()));
                }
            },

            Step::Update { data } => {
                let result = auth.update(&data);
                if model.key.is_some() {
                    assert!(result.is_ok());
                    model.absorbed.extend_from_slice(&data);
                } else {
                    assert!(result.is_err_and(|e| e.is_constraint_violation()));
                }
            },

            Step::UpdateRange { data, offset, length } => {
                let result = auth.update_range(&data, offset, length);
                let in_bounds = offset.checked_add(length).is_some_and(|end| end <= data.len());
                if in_bounds && model.key.is_some() {
                    assert!(result.is_ok());
                    model.absorbed.extend_from_slice(&data[offset..offset + length]);
                } else {
                    assert!(result.is_err_and(|e| e.is_constraint_violation()));
                }
            },

            Step::Finalize { out_len, offset } => {
                let (out_len, offset) = (out_len as usize, offset as usize);
                let mut out = vec![0u8; out_len];
                let result = auth.finalize_at(&mut out, offset);

                match expected_tag(&model) {
                    Some(tag) if offset + ONETIMEAUTH_BYTES <= out_len => {
                        assert!(result.is_ok());
                        assert_eq!(&out[offset..offset + ONETIMEAUTH_BYTES], &tag);
                    },
                    _ => assert!(result.is_err_and(|e| e.is_constraint_violation())),
                }
            },

            Step::Fork { data } => {
                let original = auth.clone();
                let _ = auth.update(&data);

                // The original must not have observed the update.
                if let Some(tag) = expected_tag(&model) {
                    assert_eq!(original.tag().ok(), Some(tag), "clone leaked into original");
                }
                auth = original;
            },
        }
    }
});
