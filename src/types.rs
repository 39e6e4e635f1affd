//! Wire-level enumerations shared by the record protection and the handshake cache.

use std::fmt;

use nom::number::complete::{be_u16, be_u8};
use nom::IResult;

// ============================================================================
// Handshake Type
// ============================================================================

/// Handshake message types (RFC 5246 Section 7.4, RFC 6347 Section 4.3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandshakeType {
    HelloRequest,
    ClientHello,
    ServerHello,
    HelloVerifyRequest,
    Certificate,
    ServerKeyExchange,
    CertificateRequest,
    ServerHelloDone,
    CertificateVerify,
    ClientKeyExchange,
    Finished,
    Unknown(u8),
}

impl HandshakeType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => HandshakeType::HelloRequest,
            1 => HandshakeType::ClientHello,
            2 => HandshakeType::ServerHello,
            3 => HandshakeType::HelloVerifyRequest,
            11 => HandshakeType::Certificate,
            12 => HandshakeType::ServerKeyExchange,
            13 => HandshakeType::CertificateRequest,
            14 => HandshakeType::ServerHelloDone,
            15 => HandshakeType::CertificateVerify,
            16 => HandshakeType::ClientKeyExchange,
            20 => HandshakeType::Finished,
            _ => HandshakeType::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            HandshakeType::HelloRequest => 0,
            HandshakeType::ClientHello => 1,
            HandshakeType::ServerHello => 2,
            HandshakeType::HelloVerifyRequest => 3,
            HandshakeType::Certificate => 11,
            HandshakeType::ServerKeyExchange => 12,
            HandshakeType::CertificateRequest => 13,
            HandshakeType::ServerHelloDone => 14,
            HandshakeType::CertificateVerify => 15,
            HandshakeType::ClientKeyExchange => 16,
            HandshakeType::Finished => 20,
            HandshakeType::Unknown(value) => *value,
        }
    }
}

// ============================================================================
// Content Type
// ============================================================================

/// DTLS record content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    ChangeCipherSpec,
    Alert,
    Handshake,
    ApplicationData,
    /// Unknown content type. Kept verbatim so it still lands in the AAD.
    Unknown(u8),
}

impl Default for ContentType {
    fn default() -> Self {
        Self::Unknown(0)
    }
}

impl ContentType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            20 => ContentType::ChangeCipherSpec,
            21 => ContentType::Alert,
            22 => ContentType::Handshake,
            23 => ContentType::ApplicationData,
            _ => ContentType::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            ContentType::ChangeCipherSpec => 20,
            ContentType::Alert => 21,
            ContentType::Handshake => 22,
            ContentType::ApplicationData => 23,
            ContentType::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], ContentType> {
        let (input, byte) = be_u8(input)?;
        Ok((input, Self::from_u8(byte)))
    }
}

// ============================================================================
// Protocol Version
// ============================================================================

/// Record layer protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum ProtocolVersion {
    DTLS1_0,
    DTLS1_2,
    Unknown(u16),
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::DTLS1_2
    }
}

impl ProtocolVersion {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0xFEFF => ProtocolVersion::DTLS1_0,
            0xFEFD => ProtocolVersion::DTLS1_2,
            _ => ProtocolVersion::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            ProtocolVersion::DTLS1_0 => 0xFEFF,
            ProtocolVersion::DTLS1_2 => 0xFEFD,
            ProtocolVersion::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], ProtocolVersion> {
        let (input, value) = be_u16(input)?;
        Ok((input, Self::from_u16(value)))
    }
}

// ============================================================================
// Sequence Number
// ============================================================================

/// DTLS record sequence number (epoch + sequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sequence {
    /// The epoch (incremented on key change).
    pub epoch: u16,
    /// The sequence number within the epoch (technically u48).
    pub sequence_number: u64,
}

impl Sequence {
    /// Largest value the 48 bit wire field can hold.
    pub const MAX_SEQUENCE_NUMBER: u64 = (1 << 48) - 1;

    pub fn new(epoch: u16, sequence_number: u64) -> Self {
        Self {
            epoch,
            sequence_number,
        }
    }

    /// Whether the sequence number fits the 48 bit wire field.
    pub fn is_valid(&self) -> bool {
        self.sequence_number <= Self::MAX_SEQUENCE_NUMBER
    }

    /// The 8 byte wire form: epoch(2) followed by the low 48 bits of the sequence.
    ///
    /// Bits above 48 are dropped; check [`is_valid`](Self::is_valid) first.
    pub fn to_bytes(&self) -> [u8; 8] {
        let mut out = self.sequence_number.to_be_bytes();
        out[..2].copy_from_slice(&self.epoch.to_be_bytes());
        out
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[epoch: {}, sequence_number: {}]",
            self.epoch, self.sequence_number,
        )
    }
}

// ============================================================================
// Hash Algorithms
// ============================================================================

/// Hash algorithms (RFC 5246 Section 7.4.1.4.1).
///
/// Used for the PRF and for transcript hashing. Only SHA-256 and SHA-384
/// are implemented; the rest are kept so peers' values can be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum HashAlgorithm {
    None,
    MD5,
    SHA1,
    SHA224,
    SHA256,
    SHA384,
    SHA512,
    Unknown(u8),
}

impl HashAlgorithm {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => HashAlgorithm::None,
            1 => HashAlgorithm::MD5,
            2 => HashAlgorithm::SHA1,
            3 => HashAlgorithm::SHA224,
            4 => HashAlgorithm::SHA256,
            5 => HashAlgorithm::SHA384,
            6 => HashAlgorithm::SHA512,
            _ => HashAlgorithm::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            HashAlgorithm::None => 0,
            HashAlgorithm::MD5 => 1,
            HashAlgorithm::SHA1 => 2,
            HashAlgorithm::SHA224 => 3,
            HashAlgorithm::SHA256 => 4,
            HashAlgorithm::SHA384 => 5,
            HashAlgorithm::SHA512 => 6,
            HashAlgorithm::Unknown(value) => *value,
        }
    }
}

// ============================================================================
// Client Certificate Type
// ============================================================================

/// Certificate types (RFC 5246 Section 7.4.4, RFC 4492 Section 5.5).
///
/// A cipher suite names the one it expects the peer certificate to sign with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum ClientCertificateType {
    RSA_SIGN,
    DSS_SIGN,
    RSA_FIXED_DH,
    DSS_FIXED_DH,
    RSA_EPHEMERAL_DH,
    DSS_EPHEMERAL_DH,
    FORTEZZA_DMS,
    ECDSA_SIGN,
    Unknown(u8),
}

impl ClientCertificateType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => ClientCertificateType::RSA_SIGN,
            2 => ClientCertificateType::DSS_SIGN,
            3 => ClientCertificateType::RSA_FIXED_DH,
            4 => ClientCertificateType::DSS_FIXED_DH,
            5 => ClientCertificateType::RSA_EPHEMERAL_DH,
            6 => ClientCertificateType::DSS_EPHEMERAL_DH,
            20 => ClientCertificateType::FORTEZZA_DMS,
            64 => ClientCertificateType::ECDSA_SIGN,
            _ => ClientCertificateType::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            ClientCertificateType::RSA_SIGN => 1,
            ClientCertificateType::DSS_SIGN => 2,
            ClientCertificateType::RSA_FIXED_DH => 3,
            ClientCertificateType::DSS_FIXED_DH => 4,
            ClientCertificateType::RSA_EPHEMERAL_DH => 5,
            ClientCertificateType::DSS_EPHEMERAL_DH => 6,
            ClientCertificateType::FORTEZZA_DMS => 20,
            ClientCertificateType::ECDSA_SIGN => 64,
            ClientCertificateType::Unknown(value) => *value,
        }
    }
}

// ============================================================================
// Cipher Suite Identifier
// ============================================================================

/// IANA cipher suite identifiers this crate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum CipherSuiteId {
    /// ECDHE with ECDSA authentication, AES-128-GCM, SHA-256
    TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256, // 0xC02B

    /// Unknown or unsupported cipher suite by its IANA value
    Unknown(u16),
}

impl CipherSuiteId {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0xC02B => CipherSuiteId::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
            _ => CipherSuiteId::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CipherSuiteId::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 => 0xC02B,
            CipherSuiteId::Unknown(value) => *value,
        }
    }

    /// The IANA registry name, or `None` for unknown suites.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            CipherSuiteId::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 => {
                Some("TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256")
            }
            CipherSuiteId::Unknown(_) => None,
        }
    }
}

impl fmt::Display for CipherSuiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown(0x{:04X})", self.as_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_type_wire_values() {
        for v in 0..=u8::MAX {
            assert_eq!(HandshakeType::from_u8(v).as_u8(), v);
        }
        assert_eq!(HandshakeType::from_u8(16), HandshakeType::ClientKeyExchange);
        assert_eq!(HandshakeType::from_u8(99), HandshakeType::Unknown(99));
    }

    #[test]
    fn sequence_wire_form() {
        let seq = Sequence::new(0x0102, 0x0000_0304_0506_0708);
        assert_eq!(seq.to_bytes(), [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
    }

    #[test]
    fn sequence_bound() {
        assert!(Sequence::new(u16::MAX, Sequence::MAX_SEQUENCE_NUMBER).is_valid());
        assert!(!Sequence::new(0, Sequence::MAX_SEQUENCE_NUMBER + 1).is_valid());
        assert_eq!(
            Sequence::new(u16::MAX, Sequence::MAX_SEQUENCE_NUMBER).to_bytes(),
            [0xFF; 8]
        );
    }

    #[test]
    fn cipher_suite_id_display() {
        let id = CipherSuiteId::from_u16(0xC02B);
        assert_eq!(id, CipherSuiteId::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256);
        assert_eq!(id.to_string(), "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256");
        assert_eq!(CipherSuiteId::from_u16(0x00AB).to_string(), "Unknown(0x00AB)");
    }

    #[test]
    fn unknown_values_are_preserved() {
        assert_eq!(ContentType::from_u8(99).as_u8(), 99);
        assert_eq!(ProtocolVersion::from_u16(0x1234).as_u16(), 0x1234);
        assert_eq!(ClientCertificateType::from_u8(64), ClientCertificateType::ECDSA_SIGN);
    }
}
