//! Encode and decode entry points.

use std::io::Write;

use crate::bits::{padding_for, BitReader, BitWriter};
use crate::canonical::CanonicalCode;
use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::frame::Header;
use crate::freq::FrequencyTable;
use crate::tree::CodeTable;

/// Encode `data` into a self-contained frame.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_to(data, &mut out)?;
    Ok(out)
}

/// Encode `data` straight into `w`.
///
/// The first pass over `data` gathers frequencies, from which the code and the
/// payload length (hence the padding) follow; the header is written before any
/// payload byte, and the second pass streams the payload.
pub fn encode_to<W: Write>(data: &[u8], w: &mut W) -> Result<()> {
    let freq = FrequencyTable::from_bytes(data);
    let code = CanonicalCode::from_frequencies(&freq)?;
    let payload_bits = code.payload_bits(&freq);
    let header = Header::new(&code, padding_for(payload_bits));

    log::debug!(
        "encoding {} bytes: {} symbols, max code length {}, {} payload bits",
        data.len(),
        code.len(),
        code.max_len(),
        payload_bits
    );
    log::trace!("length counts {:?}", header.length_counts());

    header.write(w)?;

    let padding = pack_payload(data, code.code_table(), w)?;
    debug_assert_eq!(padding, header.padding());
    Ok(())
}

/// Pack the code of every byte of `data` into `w`, returning the padding.
///
/// # Errors
/// Returns `Error::UncodedSymbol` if `table` has no code for a byte.
fn pack_payload<W: Write>(data: &[u8], table: &CodeTable, w: &mut W) -> Result<u8> {
    let mut bits = BitWriter::new(w);
    for &b in data {
        let c = table.get(b).ok_or(Error::UncodedSymbol(b))?;
        bits.push_code(c)?;
    }
    let (_, padding) = bits.finish()?;
    Ok(padding)
}

/// Decode a frame produced by [`encode`].
///
/// # Errors
/// - `Error::MalformedHeader` if the header does not fit the buffer or
///   describes an impossible code.
/// - `Error::TruncatedPayload` if the padding exceeds the payload.
/// - `Error::InvalidBitStream` if the payload does not split into codewords.
pub fn decode(blob: &[u8]) -> Result<Vec<u8>> {
    let (header, payload) = Header::parse(blob)?;
    let code = header.canonical_code()?;
    let bits = BitReader::new(payload, header.padding()).ok_or(Error::TruncatedPayload {
        padding: header.padding(),
        available: payload.len() * 8,
    })?;

    log::debug!(
        "decoding {} payload bits: {} symbols, max code length {}",
        bits.bit_len(),
        code.len(),
        code.max_len()
    );

    let out = Decoder::new(&code).decode_bits(bits)?;
    log::debug!("decoded {} bytes", out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_frame() {
        let blob = encode(&[]).unwrap();
        assert_eq!(blob, vec![0, 0]);
        assert!(decode(&blob).unwrap().is_empty());
    }

    #[test]
    fn test_single_symbol_frame() {
        let blob = encode(b"aaaaa").unwrap();
        // padding 3, max_len 1, one symbol of length 1, five `0` bits
        assert_eq!(blob, vec![3, 1, 1, b'a', 0x00]);
        assert_eq!(decode(&blob).unwrap(), b"aaaaa".to_vec());
    }

    #[test]
    fn test_known_frame() {
        let blob = encode(b"AAAAAAAABBBCCD").unwrap();
        // A=0 B=10 C=110 D=111: 23 bits, padding 1
        assert_eq!(&blob[..9], &[1, 3, 1, 1, 2, b'A', b'B', b'C', b'D']);
        assert_eq!(
            &blob[9..],
            &[0b0000_0000, 0b1010_1011, 0b0110_1110]
        );
        assert_eq!(decode(&blob).unwrap(), b"AAAAAAAABBBCCD".to_vec());
    }

    #[test]
    fn test_all_bytes_uses_zero_count() {
        let data: Vec<u8> = (0..=255).collect();
        let blob = encode(&data).unwrap();
        assert_eq!(&blob[..10], &[0, 8, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(decode(&blob).unwrap(), data);
    }

    #[test]
    fn test_truncated_payload() {
        assert!(matches!(
            decode(&[5, 1, 1, b'a']),
            Err(Error::TruncatedPayload { padding: 5, available: 0 })
        ));
    }

    #[test]
    fn test_uncoded_byte_fails_loudly() {
        let code = CanonicalCode::rebuild(vec![b'a', b'b'], vec![1, 1]).unwrap();
        let mut out = Vec::new();
        let err = pack_payload(b"abca", code.code_table(), &mut out).unwrap_err();
        assert!(matches!(err, Error::UncodedSymbol(b'c')));

        let mut out = Vec::new();
        assert_eq!(pack_payload(b"abba", code.code_table(), &mut out).unwrap(), 4);
        assert_eq!(out, vec![0b0110_0000]);
    }

    #[test]
    fn test_payload_without_alphabet() {
        assert!(matches!(
            decode(&[0, 0, 0xFF]),
            Err(Error::InvalidBitStream { bit: 0 })
        ));
    }
}
