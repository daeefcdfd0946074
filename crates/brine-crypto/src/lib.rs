//! Brine Native Primitive Backend
//!
//! The capability surface the Brine facade dispatches to once every caller
//! buffer has been validated. Nothing in here checks caller intent: a backend
//! receives fixed-size keys, nonces and tags as arrays, variable-length
//! message buffers as slices, and answers with an integer status.
//!
//! # Layering
//!
//! ```text
//! caller buffers
//!        │
//!        ▼
//! brine-core: size contract ─── violation ──▶ ConstraintViolation
//!        │
//!        ▼
//! Backend trait (this crate)
//!        │
//!        ▼ status code
//! brine-core: status translation ─── non-zero ──▶ BackendFailure
//! ```
//!
//! # Primitives
//!
//! - `auth`: HMAC-SHA512 truncated to 256 bits
//! - `onetimeauth`: Poly1305, incremental (init → update* → final)
//! - `box`: X25519 key agreement, HSalsa20 key derivation, XSalsa20-Poly1305
//! - `box_seal`: anonymous sealed boxes with an ephemeral sender key
//! - `random_fill`: the configured CSPRNG
//!
//! # Status Codes
//!
//! [`STATUS_OK`] means success. Any other value is a failure; the
//! [`RustCryptoBackend`] reports [`STATUS_FAILURE`]. Backends must never
//! panic on a length mismatch between variable-length buffers, they report a
//! failure instead.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod backend;
pub mod config;
pub mod rng;
pub mod rust_crypto;
pub mod sizes;

pub use backend::{Backend, Primitive, STATUS_FAILURE, STATUS_OK};
pub use config::{BackendConfig, RngSource};
pub use rust_crypto::{Poly1305State, RustCryptoBackend};
