//! Incremental Poly1305 with a typed accumulator.
//!
//! `poly1305` only absorbs whole 16-byte blocks incrementally, so the
//! accumulator keeps the trailing partial block aside until either more input
//! completes it or the tag is requested. Finalization runs on a copy of the
//! accumulator, which keeps the state usable afterwards.

use poly1305::{
    Block, Key, Poly1305,
    universal_hash::{KeyInit, UniversalHash},
};
use zeroize::Zeroize;

use crate::sizes::{ONETIMEAUTH_BYTES, ONETIMEAUTH_KEYBYTES};

const BLOCK_SIZE: usize = 16;

/// One-time authenticator state.
///
/// `Default` is the uninitialized state; every update or finalize on it
/// fails. Cloning copies the whole running computation.
#[derive(Clone, Default)]
pub struct Poly1305State {
    active: Option<Accumulator>,
}

#[derive(Clone)]
struct Accumulator {
    mac: Poly1305,
    /// Bytes of a not-yet-complete block
    pending: [u8; BLOCK_SIZE],
    pending_len: usize,
}

impl Drop for Accumulator {
    fn drop(&mut self) {
        self.pending.zeroize();
    }
}

impl Poly1305State {
    /// True once a key has been loaded.
    pub fn is_initialized(&self) -> bool {
        self.active.is_some()
    }

    /// Discard any previous computation and start over with `key`.
    pub(crate) fn init(&mut self, key: &[u8; ONETIMEAUTH_KEYBYTES]) {
        let mac = Poly1305::new(Key::from_slice(key));
        self.active = Some(Accumulator { mac, pending: [0u8; BLOCK_SIZE], pending_len: 0 });
    }

    /// Absorb `input`. Returns `false` if the state is uninitialized.
    pub(crate) fn update(&mut self, mut input: &[u8]) -> bool {
        let Some(acc) = self.active.as_mut() else {
            return false;
        };

        if acc.pending_len > 0 {
            let take = (BLOCK_SIZE - acc.pending_len).min(input.len());
            acc.pending[acc.pending_len..acc.pending_len + take].copy_from_slice(&input[..take]);
            acc.pending_len += take;
            input = &input[take..];

            if acc.pending_len < BLOCK_SIZE {
                return true;
            }
            acc.mac.update(&[Block::clone_from_slice(&acc.pending)]);
            acc.pending_len = 0;
        }

        let mut blocks = input.chunks_exact(BLOCK_SIZE);
        for block in blocks.by_ref() {
            acc.mac.update(&[Block::clone_from_slice(block)]);
        }

        let rest = blocks.remainder();
        acc.pending[..rest.len()].copy_from_slice(rest);
        acc.pending_len = rest.len();
        true
    }

    /// Tag over everything absorbed so far, or `None` if uninitialized.
    pub(crate) fn tag(&self) -> Option<[u8; ONETIMEAUTH_BYTES]> {
        let acc = self.active.as_ref()?;
        let tag = acc.mac.clone().compute_unpadded(&acc.pending[..acc.pending_len]);

        let mut out = [0u8; ONETIMEAUTH_BYTES];
        out.copy_from_slice(&tag);
        Some(out)
    }
}

impl std::fmt::Debug for Poly1305State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poly1305State")
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}
