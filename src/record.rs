//! DTLS 1.2 record header.

use nom::number::complete::be_u16;
use nom::IResult;

use crate::types::{ContentType, ProtocolVersion, Sequence};
use crate::util::be_u48;

/// DTLS 1.2 record header (RFC 6347 Section 4.1).
///
/// Unknown content types and versions are parsed rather than rejected; the
/// header is authenticated as AAD, so any altered byte fails decryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordHeader {
    pub content_type: ContentType,
    pub version: ProtocolVersion,
    pub sequence: Sequence,
    /// Length of the fragment following the header.
    pub length: u16,
}

impl RecordHeader {
    /// content_type(1) + version(2) + epoch(2) + seq(6) + length(2)
    pub const HEADER_LEN: usize = 13;

    pub fn new(content_type: ContentType, sequence: Sequence) -> Self {
        Self {
            content_type,
            version: ProtocolVersion::DTLS1_2,
            sequence,
            length: 0,
        }
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], RecordHeader> {
        let (input, content_type) = ContentType::parse(input)?; // u8
        let (input, version) = ProtocolVersion::parse(input)?; // u16
        let (input, epoch) = be_u16(input)?; // u16
        let (input, sequence_number) = be_u48(input)?; // u48
        let (input, length) = be_u16(input)?; // u16

        Ok((
            input,
            RecordHeader {
                content_type,
                version,
                sequence: Sequence {
                    epoch,
                    sequence_number,
                },
                length,
            },
        ))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        output.push(self.content_type.as_u8());
        output.extend_from_slice(&self.version.as_u16().to_be_bytes());
        output.extend_from_slice(&self.sequence.to_bytes());
        output.extend_from_slice(&self.length.to_be_bytes());
    }
}
