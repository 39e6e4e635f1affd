//! DTLS 1.2 AEAD record formatting types and constants.

use zeroize::Zeroize;

use crate::record::RecordHeader;
use crate::Error;

/// Explicit nonce length for DTLS AEAD records.
///
/// The explicit nonce is transmitted with each record.
pub const DTLS_EXPLICIT_NONCE_LEN: usize = 8;

/// GCM authentication tag length.
pub const GCM_TAG_LEN: usize = 16;

/// Overhead per AEAD record (explicit nonce + tag).
pub const DTLS_AEAD_OVERHEAD: usize = DTLS_EXPLICIT_NONCE_LEN + GCM_TAG_LEN; // 24

/// Fixed length of the implicit IV (salt) for AES-GCM suites.
pub const FIXED_IV_LEN: usize = 4;

/// Fixed IV portion for DTLS AEAD. Wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Iv([u8; FIXED_IV_LEN]);

impl Iv {
    pub fn new(iv: &[u8]) -> Result<Self, Error> {
        let iv: [u8; FIXED_IV_LEN] = iv
            .try_into()
            .map_err(|_| Error::Derivation(format!("Invalid fixed IV length: {}", iv.len())))?;
        Ok(Self(iv))
    }
}

impl Drop for Iv {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for Iv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Iv(..)")
    }
}

/// Full AEAD nonce (fixed IV + explicit nonce).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce(pub [u8; 12]);

impl Nonce {
    pub fn new(iv: &Iv, explicit_nonce: &[u8; DTLS_EXPLICIT_NONCE_LEN]) -> Self {
        let mut nonce = [0u8; 12];
        nonce[..FIXED_IV_LEN].copy_from_slice(&iv.0);
        nonce[FIXED_IV_LEN..].copy_from_slice(explicit_nonce);
        Self(nonce)
    }
}

/// Additional Authenticated Data for a DTLS 1.2 record.
///
/// epoch(2) || seq_num(6) || content_type(1) || version(2) || plaintext_length(2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aad(pub [u8; 13]);

impl Aad {
    /// Build the AAD from the record header and the plaintext length.
    ///
    /// The header's own length field is not used; it covers the protected fragment.
    pub fn new(header: &RecordHeader, plaintext_len: u16) -> Self {
        let mut aad = [0u8; 13];
        aad[..8].copy_from_slice(&header.sequence.to_bytes());
        aad[8] = header.content_type.as_u8();
        aad[9..11].copy_from_slice(&header.version.as_u16().to_be_bytes());
        aad[11..13].copy_from_slice(&plaintext_len.to_be_bytes());
        Aad(aad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentType, Sequence};

    #[test]
    fn aead_constants() {
        assert_eq!(DTLS_EXPLICIT_NONCE_LEN, 8);
        assert_eq!(GCM_TAG_LEN, 16);
        assert_eq!(DTLS_AEAD_OVERHEAD, 24);
    }

    #[test]
    fn nonce_layout() {
        let iv = Iv::new(&[0xA1, 0xA2, 0xA3, 0xA4]).unwrap();
        let nonce = Nonce::new(&iv, &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(
            nonce.0,
            [0xA1, 0xA2, 0xA3, 0xA4, 1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn iv_rejects_wrong_length() {
        assert!(Iv::new(&[0; 3]).is_err());
        assert!(Iv::new(&[0; 12]).is_err());
    }

    #[test]
    fn aad_layout() {
        let header = RecordHeader::new(ContentType::ApplicationData, Sequence::new(1, 5));
        let aad = Aad::new(&header, 0x0102);
        assert_eq!(
            aad.0,
            [0, 1, 0, 0, 0, 0, 0, 5, 23, 0xFE, 0xFD, 0x01, 0x02]
        );
    }
}
