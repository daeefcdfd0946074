//! Fixed byte lengths for every primitive.
//!
//! The facade validates caller buffers against these values before any
//! backend call. Backends take fixed-size arguments as arrays of exactly these
//! lengths.

/// HMAC-SHA512/256 tag length.
pub const AUTH_BYTES: usize = 32;

/// HMAC-SHA512/256 key length.
pub const AUTH_KEYBYTES: usize = 32;

/// Poly1305 tag length.
pub const ONETIMEAUTH_BYTES: usize = 16;

/// Poly1305 one-time key length.
pub const ONETIMEAUTH_KEYBYTES: usize = 32;

/// X25519 public key length.
pub const BOX_PUBLICKEYBYTES: usize = 32;

/// X25519 private scalar length.
pub const BOX_SECRETKEYBYTES: usize = 32;

/// Seed length for deterministic keypair derivation.
pub const BOX_SEEDBYTES: usize = 32;

/// XSalsa20 nonce length.
pub const BOX_NONCEBYTES: usize = 24;

/// Poly1305 tag carried by every box.
pub const BOX_MACBYTES: usize = 16;

/// Precomputed shared key length (`beforenm`).
pub const BOX_BEFORENMBYTES: usize = 32;

/// Sealed box overhead: ephemeral public key followed by the box MAC.
pub const BOX_SEALBYTES: usize = BOX_PUBLICKEYBYTES + BOX_MACBYTES;
