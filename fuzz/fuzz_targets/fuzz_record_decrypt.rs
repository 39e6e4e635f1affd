#![no_main]

//! Fuzz target for record header parsing and AEAD record decryption.
//!
//! Arbitrary bytes are fed through `RecordHeader::parse` and into `decrypt`
//! of an initialized suite, both raw and wrapped in a well formed
//! application data header so the AEAD open path is reached. Every input
//! must come back as `Ok` or `Err`, never a panic.

use libfuzzer_sys::fuzz_target;

use dtls_core::{CipherSuite, EcdheEcdsaAes128GcmSha256, RecordHeader};

/// Maximum DTLS fragment size
const MAX_FRAGMENT_SIZE: usize = 16384;

fuzz_target!(|data: &[u8]| {
    let _ = RecordHeader::parse(data);

    let suite = EcdheEcdsaAes128GcmSha256::default();
    if suite.init(&[0x0b; 48], &[0x11; 32], &[0x22; 32], false).is_err() {
        return;
    }

    // Test the input as-is (even small inputs exercise error paths)
    let _ = suite.decrypt(data);

    if !data.is_empty() {
        let frag_len = data.len().min(MAX_FRAGMENT_SIZE);

        let mut record = Vec::with_capacity(RecordHeader::HEADER_LEN + frag_len);
        record.push(23u8); // ContentType::ApplicationData
        record.extend_from_slice(&[0xFE, 0xFD]); // DTLS 1.2
        record.extend_from_slice(&[0, 1]); // epoch 1
        record.extend_from_slice(&[0, 0, 0, 0, 0, 1]); // sequence 1
        record.extend_from_slice(&(frag_len as u16).to_be_bytes());
        record.extend_from_slice(&data[..frag_len]);

        let _ = suite.decrypt(&record);
    }
});
