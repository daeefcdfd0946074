//! curve25519xsalsa20poly1305 boxes.
//!
//! Key agreement is X25519 followed by HSalsa20 over the shared point with an
//! all-zero input, which yields the `beforenm` key. Every per-message
//! operation is XSalsa20-Poly1305 under that key. Sealed boxes come from
//! `crypto_box`, which implements the libsodium construction (ephemeral
//! sender key, BLAKE2b-derived nonce).

use crypto_box::{PublicKey as BoxPublicKey, SecretKey as BoxSecretKey};
use crypto_secretbox::{
    XSalsa20Poly1305,
    aead::{AeadInPlace, KeyInit},
};
use salsa20::{
    cipher::{consts::U10, generic_array::GenericArray},
    hsalsa,
};
use sha2::{Digest, Sha512};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroize;

use crate::{
    rng::SystemRng,
    sizes::{
        BOX_BEFORENMBYTES, BOX_MACBYTES, BOX_NONCEBYTES, BOX_PUBLICKEYBYTES, BOX_SECRETKEYBYTES,
        BOX_SEEDBYTES,
    },
};

/// Failure inside a box operation. Carries no detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BoxFailure;

/// Public key for a private scalar.
pub(crate) fn public_from_secret(
    secret_key: &[u8; BOX_SECRETKEYBYTES],
) -> [u8; BOX_PUBLICKEYBYTES] {
    let secret = StaticSecret::from(*secret_key);
    PublicKey::from(&secret).to_bytes()
}

/// libsodium-compatible deterministic keypair: the secret is the first half
/// of SHA-512(seed).
pub(crate) fn seed_keypair(
    seed: &[u8; BOX_SEEDBYTES],
) -> ([u8; BOX_PUBLICKEYBYTES], [u8; BOX_SECRETKEYBYTES]) {
    let mut digest = Sha512::digest(seed);
    let mut secret_key = [0u8; BOX_SECRETKEYBYTES];
    secret_key.copy_from_slice(&digest[..BOX_SECRETKEYBYTES]);
    digest.as_mut_slice().zeroize();

    (public_from_secret(&secret_key), secret_key)
}

/// Fresh keypair from the configured RNG.
pub(crate) fn random_keypair(
    rng: &SystemRng,
) -> Result<([u8; BOX_PUBLICKEYBYTES], [u8; BOX_SECRETKEYBYTES]), BoxFailure> {
    let mut secret_key = [0u8; BOX_SECRETKEYBYTES];
    rng.fill(&mut secret_key).map_err(|_| BoxFailure)?;
    Ok((public_from_secret(&secret_key), secret_key))
}

/// X25519 + HSalsa20 shared key.
///
/// Rejects peers whose public key forces an all-zero shared point.
pub(crate) fn beforenm(
    public_key: &[u8; BOX_PUBLICKEYBYTES],
    secret_key: &[u8; BOX_SECRETKEYBYTES],
) -> Result<[u8; BOX_BEFORENMBYTES], BoxFailure> {
    let secret = StaticSecret::from(*secret_key);
    let shared = secret.diffie_hellman(&PublicKey::from(*public_key));
    if !shared.was_contributory() {
        return Err(BoxFailure);
    }

    let mut derived = hsalsa::<U10>(shared.as_bytes().into(), &GenericArray::default());
    let mut shared_key = [0u8; BOX_BEFORENMBYTES];
    shared_key.copy_from_slice(&derived);
    derived.as_mut_slice().zeroize();
    Ok(shared_key)
}

/// Encrypt `plaintext` into `ciphertext` (same length), returning the MAC.
pub(crate) fn seal_detached(
    ciphertext: &mut [u8],
    plaintext: &[u8],
    nonce: &[u8; BOX_NONCEBYTES],
    shared_key: &[u8; BOX_BEFORENMBYTES],
) -> Result<[u8; BOX_MACBYTES], BoxFailure> {
    if ciphertext.len() != plaintext.len() {
        return Err(BoxFailure);
    }

    let cipher = XSalsa20Poly1305::new(shared_key.into());
    ciphertext.copy_from_slice(plaintext);

    let Ok(tag) = cipher.encrypt_in_place_detached(nonce.into(), b"", ciphertext) else {
        ciphertext.zeroize();
        return Err(BoxFailure);
    };

    let mut mac = [0u8; BOX_MACBYTES];
    mac.copy_from_slice(&tag);
    Ok(mac)
}

/// Verify `mac` and decrypt `ciphertext` into `plaintext` (same length).
///
/// On failure `plaintext` is wiped.
pub(crate) fn open_detached(
    plaintext: &mut [u8],
    ciphertext: &[u8],
    mac: &[u8; BOX_MACBYTES],
    nonce: &[u8; BOX_NONCEBYTES],
    shared_key: &[u8; BOX_BEFORENMBYTES],
) -> Result<(), BoxFailure> {
    if ciphertext.len() != plaintext.len() {
        return Err(BoxFailure);
    }

    let cipher = XSalsa20Poly1305::new(shared_key.into());
    plaintext.copy_from_slice(ciphertext);

    cipher.decrypt_in_place_detached(nonce.into(), b"", plaintext, mac.into()).map_err(|_| {
        plaintext.zeroize();
        BoxFailure
    })
}

/// Anonymous encryption to `public_key` into a caller-sized buffer.
pub(crate) fn seal(
    ciphertext: &mut [u8],
    plaintext: &[u8],
    public_key: &[u8; BOX_PUBLICKEYBYTES],
    rng: &SystemRng,
) -> Result<(), BoxFailure> {
    let mut ephemeral_rng = rng.fork().map_err(|_| BoxFailure)?;
    let sealed = BoxPublicKey::from(*public_key)
        .seal(&mut ephemeral_rng, plaintext)
        .map_err(|_| BoxFailure)?;

    if sealed.len() != ciphertext.len() {
        return Err(BoxFailure);
    }
    ciphertext.copy_from_slice(&sealed);
    Ok(())
}

/// Open a sealed box. `public_key` must belong to `secret_key`.
pub(crate) fn seal_open(
    plaintext: &mut [u8],
    ciphertext: &[u8],
    public_key: &[u8; BOX_PUBLICKEYBYTES],
    secret_key: &[u8; BOX_SECRETKEYBYTES],
) -> Result<(), BoxFailure> {
    let secret = BoxSecretKey::from(*secret_key);
    if secret.public_key().as_bytes() != public_key {
        return Err(BoxFailure);
    }

    let mut opened = secret.unseal(ciphertext).map_err(|_| BoxFailure)?;
    let result = if opened.len() == plaintext.len() {
        plaintext.copy_from_slice(&opened);
        Ok(())
    } else {
        Err(BoxFailure)
    };
    opened.zeroize();
    result
}
