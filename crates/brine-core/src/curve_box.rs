//! Public-key authenticated encryption (curve25519xsalsa20poly1305).
//!
//! Three families share one size contract:
//!
//! - keypair mode (`box_easy`, `box_detached`): derive the shared key per
//!   call from a remote public key and a local secret key
//! - precomputed mode (`*_afternm`): reuse a key from [`Crypto::box_beforenm`]
//! - sealed boxes (`box_seal`): anonymous sender, recipient keypair opens
//!
//! Combined-mode ciphertexts are `MAC || encrypted` and exactly
//! [`BOX_MACBYTES`] longer than the plaintext. Detached mode keeps the two
//! apart and the ciphertext is as long as the plaintext. Sealed boxes carry
//! [`BOX_SEALBYTES`] of overhead.
//!
//! Nonces are never generated here: a nonce must not repeat under the same
//! key pair, and keeping track of that is the caller's job.
//!
//! A failed open surfaces as [`Error::Backend`](crate::Error::Backend), and
//! the plaintext buffer then holds no unverified plaintext.

use brine_crypto::{
    Backend,
    sizes::{
        BOX_BEFORENMBYTES, BOX_MACBYTES, BOX_NONCEBYTES, BOX_PUBLICKEYBYTES, BOX_SEALBYTES,
        BOX_SECRETKEYBYTES, BOX_SEEDBYTES,
    },
};

use crate::{
    context::Crypto,
    contract::{Call, Expect},
    error::Result,
};

const fn nonce(len: usize) -> Expect {
    Expect::size(len, BOX_NONCEBYTES, "BOX_NONCEBYTES")
}

const fn public_key(len: usize) -> Expect {
    Expect::size(len, BOX_PUBLICKEYBYTES, "BOX_PUBLICKEYBYTES")
}

const fn secret_key(len: usize) -> Expect {
    Expect::size(len, BOX_SECRETKEYBYTES, "BOX_SECRETKEYBYTES")
}

const fn shared_key(len: usize) -> Expect {
    Expect::size(len, BOX_BEFORENMBYTES, "BOX_BEFORENMBYTES")
}

const fn mac(len: usize) -> Expect {
    Expect::size(len, BOX_MACBYTES, "BOX_MACBYTES")
}

const fn combined(ciphertext: usize, plaintext: usize) -> Expect {
    Expect::sum(ciphertext, plaintext, BOX_MACBYTES, "plaintext.len() + BOX_MACBYTES")
}

const fn detached(ciphertext: usize, plaintext: usize) -> Expect {
    Expect::size(ciphertext, plaintext, "plaintext.len()")
}

const fn sealed(ciphertext: usize, plaintext: usize) -> Expect {
    Expect::sum(ciphertext, plaintext, BOX_SEALBYTES, "plaintext.len() + BOX_SEALBYTES")
}

impl<B: Backend> Crypto<B> {
    /// Generate a fresh keypair from the backend's CSPRNG.
    pub fn box_keypair(&self, public_key_out: &mut [u8], secret_key_out: &mut [u8]) -> Result<()> {
        let call = Call::new("box_keypair");
        call.validate(&[public_key(public_key_out.len()), secret_key(secret_key_out.len())])?;

        let status = self
            .backend()
            .box_keypair(call.fixed_mut(public_key_out)?, call.fixed_mut(secret_key_out)?);
        call.status(status)
    }

    /// Derive a keypair deterministically from a [`BOX_SEEDBYTES`] seed.
    pub fn box_seed_keypair(
        &self,
        public_key_out: &mut [u8],
        secret_key_out: &mut [u8],
        seed: &[u8],
    ) -> Result<()> {
        let call = Call::new("box_seed_keypair");
        call.validate(&[
            public_key(public_key_out.len()),
            secret_key(secret_key_out.len()),
            Expect::size(seed.len(), BOX_SEEDBYTES, "BOX_SEEDBYTES"),
        ])?;

        let status = self.backend().box_seed_keypair(
            call.fixed_mut(public_key_out)?,
            call.fixed_mut(secret_key_out)?,
            call.fixed(seed)?,
        );
        call.status(status)
    }

    /// Recompute the public key belonging to `secret_key_in`.
    pub fn public_from_private(
        &self,
        public_key_out: &mut [u8],
        secret_key_in: &[u8],
    ) -> Result<()> {
        let call = Call::new("public_from_private");
        call.validate(&[public_key(public_key_out.len()), secret_key(secret_key_in.len())])?;

        let status = self
            .backend()
            .scalarmult_base(call.fixed_mut(public_key_out)?, call.fixed(secret_key_in)?);
        call.status(status)
    }

    /// Encrypt and authenticate `plaintext` from `sk` to `pk`.
    ///
    /// `ciphertext` must be exactly `plaintext.len() + BOX_MACBYTES` long.
    pub fn box_easy(
        &self,
        ciphertext: &mut [u8],
        plaintext: &[u8],
        nonce_in: &[u8],
        pk: &[u8],
        sk: &[u8],
    ) -> Result<()> {
        let call = Call::new("box_easy");
        call.validate(&[
            combined(ciphertext.len(), plaintext.len()),
            nonce(nonce_in.len()),
            public_key(pk.len()),
            secret_key(sk.len()),
        ])?;

        let status = self.backend().box_easy(
            ciphertext,
            plaintext,
            call.fixed(nonce_in)?,
            call.fixed(pk)?,
            call.fixed(sk)?,
        );
        call.status(status)
    }

    /// Verify and decrypt a combined-mode box from `pk` to `sk`.
    pub fn box_open_easy(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        nonce_in: &[u8],
        pk: &[u8],
        sk: &[u8],
    ) -> Result<()> {
        let call = Call::new("box_open_easy");
        call.validate(&[
            combined(ciphertext.len(), plaintext.len()),
            nonce(nonce_in.len()),
            public_key(pk.len()),
            secret_key(sk.len()),
        ])?;

        let status = self.backend().box_open_easy(
            plaintext,
            ciphertext,
            call.fixed(nonce_in)?,
            call.fixed(pk)?,
            call.fixed(sk)?,
        );
        call.status(status)
    }

    /// Encrypt with the MAC written to its own buffer.
    pub fn box_detached(
        &self,
        ciphertext: &mut [u8],
        mac_out: &mut [u8],
        plaintext: &[u8],
        nonce_in: &[u8],
        pk: &[u8],
        sk: &[u8],
    ) -> Result<()> {
        let call = Call::new("box_detached");
        call.validate(&[
            detached(ciphertext.len(), plaintext.len()),
            mac(mac_out.len()),
            nonce(nonce_in.len()),
            public_key(pk.len()),
            secret_key(sk.len()),
        ])?;

        let status = self.backend().box_detached(
            ciphertext,
            call.fixed_mut(mac_out)?,
            plaintext,
            call.fixed(nonce_in)?,
            call.fixed(pk)?,
            call.fixed(sk)?,
        );
        call.status(status)
    }

    /// Verify `mac_in` and decrypt a detached-mode box.
    pub fn box_open_detached(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        mac_in: &[u8],
        nonce_in: &[u8],
        pk: &[u8],
        sk: &[u8],
    ) -> Result<()> {
        let call = Call::new("box_open_detached");
        call.validate(&[
            detached(ciphertext.len(), plaintext.len()),
            mac(mac_in.len()),
            nonce(nonce_in.len()),
            public_key(pk.len()),
            secret_key(sk.len()),
        ])?;

        let status = self.backend().box_open_detached(
            plaintext,
            ciphertext,
            call.fixed(mac_in)?,
            call.fixed(nonce_in)?,
            call.fixed(pk)?,
            call.fixed(sk)?,
        );
        call.status(status)
    }

    /// Precompute the shared key for `pk` and `sk`.
    ///
    /// The result is as sensitive as `sk`; wipe it when done.
    pub fn box_beforenm(&self, shared_key_out: &mut [u8], pk: &[u8], sk: &[u8]) -> Result<()> {
        let call = Call::new("box_beforenm");
        call.validate(&[
            shared_key(shared_key_out.len()),
            public_key(pk.len()),
            secret_key(sk.len()),
        ])?;

        let status = self.backend().box_beforenm(
            call.fixed_mut(shared_key_out)?,
            call.fixed(pk)?,
            call.fixed(sk)?,
        );
        call.status(status)
    }

    /// [`Crypto::box_easy`] with a precomputed shared key.
    pub fn box_easy_afternm(
        &self,
        ciphertext: &mut [u8],
        plaintext: &[u8],
        nonce_in: &[u8],
        key: &[u8],
    ) -> Result<()> {
        let call = Call::new("box_easy_afternm");
        call.validate(&[
            combined(ciphertext.len(), plaintext.len()),
            nonce(nonce_in.len()),
            shared_key(key.len()),
        ])?;

        let status = self.backend().box_easy_afternm(
            ciphertext,
            plaintext,
            call.fixed(nonce_in)?,
            call.fixed(key)?,
        );
        call.status(status)
    }

    /// [`Crypto::box_open_easy`] with a precomputed shared key.
    pub fn box_open_easy_afternm(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        nonce_in: &[u8],
        key: &[u8],
    ) -> Result<()> {
        let call = Call::new("box_open_easy_afternm");
        call.validate(&[
            combined(ciphertext.len(), plaintext.len()),
            nonce(nonce_in.len()),
            shared_key(key.len()),
        ])?;

        let status = self.backend().box_open_easy_afternm(
            plaintext,
            ciphertext,
            call.fixed(nonce_in)?,
            call.fixed(key)?,
        );
        call.status(status)
    }

    /// [`Crypto::box_detached`] with a precomputed shared key.
    pub fn box_detached_afternm(
        &self,
        ciphertext: &mut [u8],
        mac_out: &mut [u8],
        plaintext: &[u8],
        nonce_in: &[u8],
        key: &[u8],
    ) -> Result<()> {
        let call = Call::new("box_detached_afternm");
        call.validate(&[
            detached(ciphertext.len(), plaintext.len()),
            mac(mac_out.len()),
            nonce(nonce_in.len()),
            shared_key(key.len()),
        ])?;

        let status = self.backend().box_detached_afternm(
            ciphertext,
            call.fixed_mut(mac_out)?,
            plaintext,
            call.fixed(nonce_in)?,
            call.fixed(key)?,
        );
        call.status(status)
    }

    /// [`Crypto::box_open_detached`] with a precomputed shared key.
    pub fn box_open_detached_afternm(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        mac_in: &[u8],
        nonce_in: &[u8],
        key: &[u8],
    ) -> Result<()> {
        let call = Call::new("box_open_detached_afternm");
        call.validate(&[
            detached(ciphertext.len(), plaintext.len()),
            mac(mac_in.len()),
            nonce(nonce_in.len()),
            shared_key(key.len()),
        ])?;

        let status = self.backend().box_open_detached_afternm(
            plaintext,
            ciphertext,
            call.fixed(mac_in)?,
            call.fixed(nonce_in)?,
            call.fixed(key)?,
        );
        call.status(status)
    }

    /// Encrypt `plaintext` anonymously to `pk`.
    ///
    /// The sender keypair is ephemeral and discarded; only the holder of the
    /// matching secret key can open the result.
    pub fn box_seal(&self, ciphertext: &mut [u8], plaintext: &[u8], pk: &[u8]) -> Result<()> {
        let call = Call::new("box_seal");
        call.validate(&[sealed(ciphertext.len(), plaintext.len()), public_key(pk.len())])?;

        let status = self.backend().box_seal(ciphertext, plaintext, call.fixed(pk)?);
        call.status(status)
    }

    /// Open a sealed box addressed to the keypair `(pk, sk)`.
    pub fn box_seal_open(
        &self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        pk: &[u8],
        sk: &[u8],
    ) -> Result<()> {
        let call = Call::new("box_seal_open");
        call.validate(&[
            sealed(ciphertext.len(), plaintext.len()),
            public_key(pk.len()),
            secret_key(sk.len()),
        ])?;

        let status =
            self.backend().box_seal_open(plaintext, ciphertext, call.fixed(pk)?, call.fixed(sk)?);
        call.status(status)
    }
}
