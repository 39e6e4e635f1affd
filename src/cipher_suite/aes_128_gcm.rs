use std::sync::Arc;

use parking_lot::RwLock;

use super::CipherSuite;
use crate::config::{Config, ExplicitNonce};
use crate::crypto::dtls_aead::{Aad, Iv, Nonce};
use crate::crypto::dtls_aead::{DTLS_AEAD_OVERHEAD, DTLS_EXPLICIT_NONCE_LEN, GCM_TAG_LEN};
use crate::crypto::{key_expansion, AesGcm};
use crate::record::RecordHeader;
use crate::types::{CipherSuiteId, ClientCertificateType, HashAlgorithm};
use crate::Error;

// Key block sizes mandated by RFC 5288 for AES-128-GCM.
const PRF_MAC_LEN: usize = 0;
const PRF_KEY_LEN: usize = 16;
const PRF_IV_LEN: usize = 4;

/// Write key and fixed IV for one direction.
#[derive(Debug)]
struct DirectionalKeys {
    cipher: AesGcm,
    iv: Iv,
}

impl DirectionalKeys {
    fn new(key: &[u8], iv: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            cipher: AesGcm::new(key)?,
            iv: Iv::new(iv)?,
        })
    }
}

#[derive(Debug)]
struct GcmKeys {
    /// Our own write keys, used to encrypt.
    local: DirectionalKeys,
    /// The peer's write keys, used to decrypt.
    remote: DirectionalKeys,
}

/// TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 (RFC 5289).
#[derive(Debug)]
pub struct EcdheEcdsaAes128GcmSha256 {
    config: Arc<Config>,
    keys: RwLock<Option<GcmKeys>>,
}

impl EcdheEcdsaAes128GcmSha256 {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            keys: RwLock::new(None),
        }
    }

    fn explicit_nonce(&self, header: &RecordHeader) -> [u8; DTLS_EXPLICIT_NONCE_LEN] {
        match self.config.explicit_nonce() {
            ExplicitNonce::Sequence => header.sequence.to_bytes(),
            ExplicitNonce::Random => rand::random(),
        }
    }
}

impl Default for EcdheEcdsaAes128GcmSha256 {
    fn default() -> Self {
        Self::new(Arc::new(Config::default()))
    }
}

impl CipherSuite for EcdheEcdsaAes128GcmSha256 {
    fn id(&self) -> CipherSuiteId {
        CipherSuiteId::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256
    }

    fn certificate_type(&self) -> ClientCertificateType {
        ClientCertificateType::ECDSA_SIGN
    }

    fn hash_algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::SHA256
    }

    fn is_psk(&self) -> bool {
        false
    }

    fn is_initialized(&self) -> bool {
        self.keys.read().is_some()
    }

    fn init(
        &self,
        master_secret: &[u8],
        client_random: &[u8],
        server_random: &[u8],
        is_client: bool,
    ) -> Result<(), Error> {
        // Held across the derivation so no reader sees a half installed key.
        let mut keys = self.keys.write();

        if keys.is_some() {
            warn!("Refusing to re-initialize {}", self.id());
            return Err(Error::AlreadyInitialized);
        }

        let block = key_expansion(
            master_secret,
            client_random,
            server_random,
            PRF_MAC_LEN,
            PRF_KEY_LEN,
            PRF_IV_LEN,
            self.hash_algorithm(),
        )?;

        let client = DirectionalKeys::new(&block.client_write_key, &block.client_write_iv)?;
        let server = DirectionalKeys::new(&block.server_write_key, &block.server_write_iv)?;

        let (local, remote) = if is_client {
            (client, server)
        } else {
            (server, client)
        };

        *keys = Some(GcmKeys { local, remote });

        debug!(
            "{} initialized as {}",
            self.id(),
            if is_client { "client" } else { "server" }
        );

        Ok(())
    }

    fn encrypt(&self, header: &RecordHeader, plaintext: &[u8]) -> Result<Vec<u8>, Error> {
        let keys = self.keys.read();
        let Some(keys) = keys.as_ref() else {
            return Err(Error::NotInitialized);
        };

        if plaintext.len() > self.config.max_plaintext_len() {
            return Err(Error::RecordTooLarge(plaintext.len()));
        }

        // A truncated sequence would repeat an earlier nonce under the same key.
        if !header.sequence.is_valid() {
            warn!("Refusing to encrypt record {}", header.sequence);
            return Err(Error::SequenceOverflow(header.sequence.sequence_number));
        }

        let explicit_nonce = self.explicit_nonce(header);
        let nonce = Nonce::new(&keys.local.iv, &explicit_nonce);
        let aad = Aad::new(header, plaintext.len() as u16);

        let mut ciphertext = Vec::with_capacity(plaintext.len() + GCM_TAG_LEN);
        ciphertext.extend_from_slice(plaintext);
        keys.local.cipher.seal(&mut ciphertext, &aad, &nonce)?;

        // Wire fragment: explicit_nonce(8) || ciphertext || tag(16)
        let header = RecordHeader {
            length: (DTLS_EXPLICIT_NONCE_LEN + ciphertext.len()) as u16,
            ..*header
        };

        let mut out = Vec::with_capacity(RecordHeader::HEADER_LEN + header.length as usize);
        header.serialize(&mut out);
        out.extend_from_slice(&explicit_nonce);
        out.extend_from_slice(&ciphertext);

        trace!("Encrypted record {} ({} bytes)", header.sequence, plaintext.len());

        Ok(out)
    }

    fn decrypt(&self, raw: &[u8]) -> Result<Vec<u8>, Error> {
        let keys = self.keys.read();
        let Some(keys) = keys.as_ref() else {
            return Err(Error::NotInitialized);
        };

        if raw.len() < RecordHeader::HEADER_LEN + DTLS_AEAD_OVERHEAD {
            return Err(Error::RecordTooShort(raw.len()));
        }

        let (fragment, header) =
            RecordHeader::parse(raw).map_err(|_| Error::RecordTooShort(raw.len()))?;

        // The length is authenticated through the AAD, a mismatch can never verify.
        if header.length as usize != fragment.len() {
            debug!("Record {} length field mismatch", header.sequence);
            return Err(Error::Authentication);
        }

        let (explicit_nonce, ciphertext) = fragment.split_at(DTLS_EXPLICIT_NONCE_LEN);
        let explicit_nonce: [u8; DTLS_EXPLICIT_NONCE_LEN] = explicit_nonce
            .try_into()
            .map_err(|_| Error::Authentication)?;

        let plaintext_len = ciphertext.len() - GCM_TAG_LEN;
        let aad = Aad::new(&header, plaintext_len as u16);
        let nonce = Nonce::new(&keys.remote.iv, &explicit_nonce);

        let mut plaintext = ciphertext.to_vec();
        if let Err(e) = keys.remote.cipher.open(&mut plaintext, &aad, &nonce) {
            debug!("Failed to authenticate record {}", header.sequence);
            return Err(e);
        }

        trace!("Decrypted record {} ({} bytes)", header.sequence, plaintext.len());

        Ok(plaintext)
    }
}
