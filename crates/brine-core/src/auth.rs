//! Multi-use message authentication (HMAC-SHA512/256).

use brine_crypto::{
    Backend,
    sizes::{AUTH_BYTES, AUTH_KEYBYTES},
};
use zeroize::Zeroize;

use crate::{
    context::Crypto,
    contract::{Call, Expect},
    ct,
    error::Result,
};

impl<B: Backend> Crypto<B> {
    /// Write the authenticator of `message` under `key` into `out`.
    ///
    /// `out` must be [`AUTH_BYTES`] long and `key` [`AUTH_KEYBYTES`].
    pub fn auth(&self, out: &mut [u8], message: &[u8], key: &[u8]) -> Result<()> {
        let call = Call::new("auth");
        call.validate(&[
            Expect::size(out.len(), AUTH_BYTES, "AUTH_BYTES"),
            Expect::size(key.len(), AUTH_KEYBYTES, "AUTH_KEYBYTES"),
        ])?;

        let status = self.backend().auth(call.fixed_mut(out)?, message, call.fixed(key)?);
        call.status(status)
    }

    /// Check `tag` against `message` under `key`.
    ///
    /// A mismatching tag is `Ok(false)`, not an error. The comparison runs in
    /// constant time with respect to the tag contents.
    pub fn auth_verify(&self, tag: &[u8], message: &[u8], key: &[u8]) -> Result<bool> {
        let call = Call::new("auth_verify");
        call.validate(&[
            Expect::size(tag.len(), AUTH_BYTES, "AUTH_BYTES"),
            Expect::size(key.len(), AUTH_KEYBYTES, "AUTH_KEYBYTES"),
        ])?;

        let mut expected = [0u8; AUTH_BYTES];
        let status = self.backend().auth(&mut expected, message, call.fixed(key)?);
        call.status(status)?;

        let valid = ct::is_equal(tag, &expected);
        expected.zeroize();
        Ok(valid)
    }
}
