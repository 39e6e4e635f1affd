use std::ops::RangeFrom;

use nom::error::{make_error, ErrorKind, ParseError};
use nom::{Err, IResult, InputIter, InputLength, Slice};

/// Big endian 48 bit integer, the width of a DTLS record sequence number.
pub fn be_u48<I, E: ParseError<I>>(input: I) -> IResult<I, u64, E>
where
    I: Slice<RangeFrom<usize>> + InputIter<Item = u8> + InputLength,
{
    const BOUND: usize = 6;

    if input.input_len() < BOUND {
        return Err(Err::Error(make_error(input, ErrorKind::Eof)));
    }

    let value = input
        .iter_elements()
        .take(BOUND)
        .fold(0u64, |acc, byte| (acc << 8) | byte as u64);

    Ok((input.slice(BOUND..), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_u48() {
        let input: &[u8] = &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xAA];
        let (rest, value) = be_u48::<_, nom::error::Error<&[u8]>>(input).unwrap();
        assert_eq!(value, 0xFFFF_FFFF_FFFE);
        assert_eq!(rest, &[0xAA]);
    }

    #[test]
    fn parse_u48_eof() {
        let input: &[u8] = &[0x01, 0x02, 0x03];
        assert!(be_u48::<_, nom::error::Error<&[u8]>>(input).is_err());
    }
}
