//! Shared helpers for the integration tests.
//!
//! Import it from other test files via `mod common;`.

#![allow(unused)]

use std::sync::Arc;

use dtls_core::{cipher_suite_for_id, CipherSuite, CipherSuiteId, Config};
use dtls_core::{ContentType, RecordHeader, Sequence};

pub const MASTER_SECRET: [u8; 48] = [
    0x91, 0x4c, 0x2e, 0x07, 0x3b, 0xd5, 0x60, 0x1a, 0x8f, 0x12, 0x44, 0xe0, 0x5d, 0x7c, 0x23, 0x9e,
    0x02, 0xb8, 0x66, 0xf1, 0x0d, 0x3a, 0xc4, 0x57, 0x19, 0xe2, 0x7b, 0x80, 0x35, 0x4f, 0xa6, 0x6d,
    0xc0, 0x1e, 0x92, 0x38, 0x77, 0x0b, 0xd9, 0x4a, 0x63, 0x25, 0xfe, 0x81, 0x1c, 0xb3, 0x50, 0x0f,
];

pub const CLIENT_RANDOM: [u8; 32] = [0x11; 32];
pub const SERVER_RANDOM: [u8; 32] = [0x22; 32];

pub const SUITE: CipherSuiteId = CipherSuiteId::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256;

/// Uninitialized suite with the default config.
pub fn new_suite() -> Box<dyn CipherSuite> {
    cipher_suite_for_id(SUITE, Arc::new(Config::default())).expect("supported suite")
}

/// A client and a server suite initialized from the same secret.
pub fn initialized_pair() -> (Box<dyn CipherSuite>, Box<dyn CipherSuite>) {
    let client = new_suite();
    let server = new_suite();

    client
        .init(&MASTER_SECRET, &CLIENT_RANDOM, &SERVER_RANDOM, true)
        .expect("client init");
    server
        .init(&MASTER_SECRET, &CLIENT_RANDOM, &SERVER_RANDOM, false)
        .expect("server init");

    (client, server)
}

pub fn app_data_header(epoch: u16, seq: u64) -> RecordHeader {
    RecordHeader::new(ContentType::ApplicationData, Sequence::new(epoch, seq))
}
