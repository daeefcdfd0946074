//! Brine Calling-Safety Facade
//!
//! Every entry point checks its buffers against the primitive's size contract
//! before anything reaches the native backend, and translates the backend's
//! integer status into a typed error. The streaming one-time authenticator is
//! the only stateful piece; its lifecycle is enforced here as well.
//!
//! # Call Path
//!
//! ```text
//! caller slices
//!        │
//!        ▼
//! Expect table (argument order) ── first mismatch ──▶ Error::Constraint
//!        │
//!        ▼
//! slice → [u8; N] for fixed-size arguments
//!        │
//!        ▼
//! Backend call ── non-zero status ──▶ Error::Backend
//!        │
//!        ▼
//! Ok(..)
//! ```
//!
//! # Error Handling
//!
//! - [`Error::Constraint`]: wrong sizes, out-of-range offsets, or an
//!   authenticator used before `init`. A bug in the caller.
//! - [`Error::Backend`]: the primitive itself failed. For every `*_open*` and
//!   verify operation this means the input is not authentic.
//!
//! `auth_verify` and `onetimeauth_verify` report a mismatching tag as
//! `Ok(false)` and compare in constant time.
//!
//! # Security
//!
//! - Nonces are the caller's responsibility and must never repeat under the
//!   same key
//! - A one-time authenticator key authenticates exactly one message
//! - Failed decryptions never leave unverified plaintext in the output
//! - Secret intermediates are zeroized; nothing secret is logged
//!
//! # Usage
//!
//! ```no_run
//! use brine_core::{
//!     init,
//!     sizes::{BOX_MACBYTES, BOX_NONCEBYTES, BOX_PUBLICKEYBYTES, BOX_SECRETKEYBYTES},
//! };
//!
//! let crypto = init()?;
//! let (mut pk, mut sk) = ([0u8; BOX_PUBLICKEYBYTES], [0u8; BOX_SECRETKEYBYTES]);
//! crypto.box_keypair(&mut pk, &mut sk)?;
//!
//! let nonce = [0u8; BOX_NONCEBYTES];
//! let mut sealed = vec![0u8; 5 + BOX_MACBYTES];
//! crypto.box_easy(&mut sealed, b"hello", &nonce, &pk, &sk)?;
//! # Ok::<(), brine_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod auth;
pub mod context;
pub mod contract;
pub mod ct;
mod curve_box;
pub mod error;
pub mod onetimeauth;
mod random;

pub use brine_crypto::{Backend, BackendConfig, Primitive, RngSource, RustCryptoBackend, sizes};
pub use context::{Crypto, global, init, init_with};
pub use contract::{Expect, check_offset_params, check_size, check_status, validate};
pub use error::{ConstraintViolation, Error, Result};
pub use onetimeauth::OneTimeAuth;
