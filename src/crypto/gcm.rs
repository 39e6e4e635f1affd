//! AES-GCM using RustCrypto.

use aes_gcm::aead::{self, AeadInPlace, KeyInit};
use aes_gcm::Aes128Gcm;

use super::dtls_aead::{Aad, Nonce, GCM_TAG_LEN};
use crate::Error;

/// AES-128-GCM keyed for one direction.
pub struct AesGcm(Box<Aes128Gcm>);

impl std::fmt::Debug for AesGcm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AesGcm::Aes128").finish()
    }
}

impl AesGcm {
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        let cipher = Aes128Gcm::new_from_slice(key)
            .map_err(|_| Error::Derivation(format!("Invalid key size for AES-GCM: {}", key.len())))?;
        Ok(AesGcm(Box::new(cipher)))
    }

    /// Encrypt in place, appending the 16 byte tag.
    pub fn seal(&self, buf: &mut Vec<u8>, aad: &Aad, nonce: &Nonce) -> Result<(), Error> {
        let nonce = aead::Nonce::<Aes128Gcm>::from_slice(&nonce.0);
        self.0
            .encrypt_in_place(nonce, &aad.0, buf)
            .map_err(|_| Error::Crypto("AES-GCM encryption failed".to_string()))
    }

    /// Verify and strip the tag, decrypting in place.
    ///
    /// Every failure maps to [`Error::Authentication`].
    pub fn open(&self, buf: &mut Vec<u8>, aad: &Aad, nonce: &Nonce) -> Result<(), Error> {
        if buf.len() < GCM_TAG_LEN {
            return Err(Error::Authentication);
        }

        let nonce = aead::Nonce::<Aes128Gcm>::from_slice(&nonce.0);
        self.0
            .decrypt_in_place(nonce, &aad.0, buf)
            .map_err(|_| Error::Authentication)
    }
}
