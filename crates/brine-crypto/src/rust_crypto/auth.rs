//! HMAC-SHA512/256: HMAC-SHA512 truncated to its first 32 bytes.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::Zeroize;

use crate::sizes::{AUTH_BYTES, AUTH_KEYBYTES};

type HmacSha512 = Hmac<Sha512>;

/// Compute the truncated HMAC tag for `message`.
pub(crate) fn hmac_sha512_256(message: &[u8], key: &[u8; AUTH_KEYBYTES]) -> [u8; AUTH_BYTES] {
    let Ok(mut mac) = HmacSha512::new_from_slice(key) else {
        unreachable!("HMAC accepts keys of any length");
    };
    mac.update(message);
    let mut full = mac.finalize().into_bytes();

    let mut tag = [0u8; AUTH_BYTES];
    tag.copy_from_slice(&full[..AUTH_BYTES]);
    full.as_mut_slice().zeroize();
    tag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_key_hello_known_answer() {
        let tag = hmac_sha512_256(b"hello", &[0u8; AUTH_KEYBYTES]);
        assert_eq!(
            hex::encode(tag),
            "01365fbac98a843d2e7d51f75ea17306cdd8b0128b762eb56ded6600656f72a5"
        );
    }

    #[test]
    fn tag_depends_on_key() {
        let mut key = [0u8; AUTH_KEYBYTES];
        let tag1 = hmac_sha512_256(b"message", &key);
        key[31] = 1;
        let tag2 = hmac_sha512_256(b"message", &key);
        assert_ne!(tag1, tag2);
    }

    #[test]
    fn empty_message_is_authenticated() {
        let tag = hmac_sha512_256(b"", &[9u8; AUTH_KEYBYTES]);
        assert_ne!(tag, [0u8; AUTH_BYTES]);
    }
}
