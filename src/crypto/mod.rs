//! Cryptographic primitives used by the cipher suites and the handshake cache.

pub mod dtls_aead;
mod gcm;
pub mod hash;
pub mod prf;

pub(crate) use gcm::AesGcm;
pub use hash::Hash;
pub use prf::{key_expansion, prf_tls12, KeyBlock};
