//! AEAD record protection for a negotiated cipher suite.
//!
//! A [`CipherSuite`] is created uninitialized when the suite is chosen, gets
//! its keys exactly once through [`CipherSuite::init`] when the master secret
//! and both randoms are known, and from then on protects records in both
//! directions. Each side encrypts with its own write key and decrypts with
//! the peer's, so a client and a server initialized from the same secret are
//! mirror images of each other.
//!
//! ```
//! use std::sync::Arc;
//! use dtls_core::{cipher_suite_for_id, CipherSuiteId, Config};
//! use dtls_core::{ContentType, RecordHeader, Sequence};
//!
//! let config = Arc::new(Config::default());
//! let id = CipherSuiteId::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256;
//!
//! let client = cipher_suite_for_id(id, config.clone()).unwrap();
//! let server = cipher_suite_for_id(id, config).unwrap();
//!
//! let master_secret = [0x42; 48];
//! let (client_random, server_random) = ([1; 32], [2; 32]);
//! client.init(&master_secret, &client_random, &server_random, true).unwrap();
//! server.init(&master_secret, &client_random, &server_random, false).unwrap();
//!
//! let header = RecordHeader::new(ContentType::ApplicationData, Sequence::new(1, 0));
//! let record = client.encrypt(&header, b"ping").unwrap();
//! assert_eq!(server.decrypt(&record).unwrap(), b"ping");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::record::RecordHeader;
use crate::types::{CipherSuiteId, ClientCertificateType, HashAlgorithm};
use crate::Error;

mod aes_128_gcm;

pub use aes_128_gcm::EcdheEcdsaAes128GcmSha256;

/// Operations shared by every cipher suite.
///
/// All methods take `&self`; implementations guard their key state internally
/// so one instance can be shared between the send and receive paths.
pub trait CipherSuite: Send + Sync + fmt::Debug {
    /// IANA identifier.
    fn id(&self) -> CipherSuiteId;

    /// IANA name of the suite.
    fn name(&self) -> String {
        self.id().to_string()
    }

    /// Signature type expected on the peer certificate.
    fn certificate_type(&self) -> ClientCertificateType;

    /// Hash used by the PRF (and so by the Finished and session hash computations).
    fn hash_algorithm(&self) -> HashAlgorithm;

    fn is_psk(&self) -> bool;

    /// Whether key material has been installed.
    fn is_initialized(&self) -> bool;

    /// Derive and install the keys for this connection.
    ///
    /// May only succeed once; a second call fails with [`Error::AlreadyInitialized`].
    fn init(
        &self,
        master_secret: &[u8],
        client_random: &[u8],
        server_random: &[u8],
        is_client: bool,
    ) -> Result<(), Error>;

    /// Protect `plaintext` as the fragment of the record described by `header`.
    ///
    /// Returns the complete record, header included. The header's length
    /// field is ignored and rewritten.
    fn encrypt(&self, header: &RecordHeader, plaintext: &[u8]) -> Result<Vec<u8>, Error>;

    /// Verify and decrypt a complete protected record, returning the plaintext.
    fn decrypt(&self, raw: &[u8]) -> Result<Vec<u8>, Error>;
}

/// A fresh, uninitialized instance of the suite with the given id.
///
/// Returns `None` for suites this crate does not implement.
pub fn cipher_suite_for_id(id: CipherSuiteId, config: Arc<Config>) -> Option<Box<dyn CipherSuite>> {
    match id {
        CipherSuiteId::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 => {
            Some(Box::new(EcdheEcdsaAes128GcmSha256::new(config)))
        }
        CipherSuiteId::Unknown(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        let config = Arc::new(Config::default());

        let suite = cipher_suite_for_id(CipherSuiteId::from_u16(0xC02B), config.clone()).unwrap();
        assert_eq!(suite.id(), CipherSuiteId::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256);
        assert!(!suite.is_initialized());

        assert!(cipher_suite_for_id(CipherSuiteId::from_u16(0xC02C), config).is_none());
    }
}
