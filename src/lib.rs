//! DTLS 1.2 record protection and handshake transcript cache.
//!
//! Two independent pieces used by a DTLS handshake controller:
//!
//! * [`CipherSuite`]: derives per-direction AEAD keys from the master secret
//!   and protects records with them. One concrete suite is provided,
//!   [`EcdheEcdsaAes128GcmSha256`].
//! * [`HandshakeCache`]: records every handshake message exchanged, drops
//!   retransmitted duplicates, and hands back messages in whatever order a
//!   computation needs them, including the canonical [session hash]
//!   order used by the extended master secret.
//!
//! Both are safe to share between threads. They never take each other's locks.
//!
//! [session hash]: HandshakeCache::session_hash

#![forbid(unsafe_code)]
#![warn(clippy::all)]

#[macro_use]
extern crate log;

mod error;
pub use error::Error;

mod config;
pub use config::{Config, ConfigBuilder, ExplicitNonce, MAX_PLAINTEXT_LEN};

mod types;
pub use types::{ClientCertificateType, CipherSuiteId, ContentType, HandshakeType};
pub use types::{HashAlgorithm, ProtocolVersion, Sequence};

mod record;
pub use record::RecordHeader;

pub mod crypto;

mod cipher_suite;
pub use cipher_suite::{cipher_suite_for_id, CipherSuite, EcdheEcdsaAes128GcmSha256};

mod handshake_cache;
pub use handshake_cache::{HandshakeCache, HandshakeCacheItem, PullRule, SESSION_HASH_RULES};

mod util;
