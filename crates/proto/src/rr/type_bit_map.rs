// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! type bit map helper definitions, the NSEC(3) "type bit maps" field

use std::collections::BTreeMap;

use crate::error::{ProtoErrorKind, ProtoResult};
use crate::rr::RecordType;
use crate::serialize::binary::{BinDecoder, BinEncoder};

/// Encode the set of record types as [RFC 4034 section 4.1.2](https://tools.ietf.org/html/rfc4034#section-4.1.2)
/// type bit maps:
///
/// ```text
///    Type Bit Maps Field = ( Window Block # | Bitmap Length | Bitmap )+
/// ```
///
/// Blocks are emitted in increasing numerical order, trailing zero octets omitted.
pub(crate) fn encode_type_bit_maps(
    encoder: &mut BinEncoder<'_>,
    types: &[RecordType],
) -> ProtoResult<()> {
    let mut windows: BTreeMap<u8, Vec<u8>> = BTreeMap::new();

    // collect the bitmaps
    for rr_type in types {
        let code = u16::from(*rr_type);
        let window = (code >> 8) as u8;
        let low = (code & 0x00FF) as u8;

        let bit_map = windows.entry(window).or_default();
        let index = low / 8;
        let bit = 0b1000_0000 >> (low % 8);

        if bit_map.len() < (index as usize + 1) {
            bit_map.resize(index as usize + 1, 0_u8);
        }

        bit_map[index as usize] |= bit;
    }

    // output bitmaps
    for (window, bitmap) in windows {
        encoder.emit(window)?;
        // the bitmap is at most 32 bytes based on the above logic
        encoder.emit(bitmap.len() as u8)?;
        for bits in bitmap {
            encoder.emit(bits)?;
        }
    }

    Ok(())
}

/// Reads `bit_map_len` bytes of type bit maps from the decoder
pub(crate) fn decode_type_bit_maps(
    decoder: &mut BinDecoder<'_>,
    bit_map_len: usize,
) -> ProtoResult<Vec<RecordType>> {
    let mut record_types = Vec::new();
    let mut state = BitMapReadState::Window;

    // loop through all the bytes in the bitmap
    for _ in 0..bit_map_len {
        let current_byte = decoder.read_u8()?;

        state = match state {
            BitMapReadState::Window => BitMapReadState::Len {
                window: current_byte,
            },
            BitMapReadState::Len { window } => {
                if current_byte == 0 || current_byte > 32 {
                    return Err(ProtoErrorKind::Msg(format!(
                        "FormErr: invalid NSEC(3) bitmap length: {current_byte}"
                    ))
                    .into());
                }
                BitMapReadState::RecordType {
                    window,
                    len: current_byte,
                    left: current_byte,
                }
            }
            BitMapReadState::RecordType { window, len, left } => {
                // window is the Window Block #, len the Bitmap Length, current_byte the Bitmap
                let mut bit_map = current_byte;

                for i in 0..8 {
                    if bit_map & 0b1000_0000 == 0b1000_0000 {
                        // len - left is the index of this byte in the bitmap, times 8 for
                        // the bits, plus the bit within the current byte
                        let low_byte = (len - left) * 8 + i;
                        let rr_type = (u16::from(window) << 8) | u16::from(low_byte);
                        record_types.push(RecordType::from(rr_type));
                    }
                    bit_map <<= 1;
                }

                // move to the next section of the bit_map
                let left = left - 1;
                if left == 0 {
                    // we've exhausted this Window, move to the next
                    BitMapReadState::Window
                } else {
                    // continue reading this Window
                    BitMapReadState::RecordType { window, len, left }
                }
            }
        };
    }

    if !matches!(state, BitMapReadState::Window) {
        return Err(ProtoErrorKind::Msg("FormErr: truncated NSEC(3) bitmap".to_string()).into());
    }

    Ok(record_types)
}

enum BitMapReadState {
    Window,
    Len { window: u8 },
    RecordType { window: u8, len: u8, left: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let types = vec![
            RecordType::NS,
            RecordType::SOA,
            RecordType::TXT,
            RecordType::RRSIG,
            RecordType::DNSKEY,
            RecordType::NSEC3PARAM,
        ];

        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            encode_type_bit_maps(&mut encoder, &types).expect("encoding error");
        }

        let mut decoder = BinDecoder::new(&bytes);
        let read = decode_type_bit_maps(&mut decoder, bytes.len()).expect("decoding error");
        assert_eq!(types, read);
    }

    #[test]
    fn test_high_window() {
        let types = vec![RecordType::A, RecordType::Unknown(65534)];

        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            encode_type_bit_maps(&mut encoder, &types).expect("encoding error");
        }

        let mut decoder = BinDecoder::new(&bytes);
        let read = decode_type_bit_maps(&mut decoder, bytes.len()).expect("decoding error");
        assert_eq!(types, read);
    }

    #[test]
    fn test_truncated_bitmap() {
        // window 0, claims 4 bytes of bitmap, provides 1
        let bytes = [0_u8, 4, 0b0100_0000];
        let mut decoder = BinDecoder::new(&bytes);
        assert!(decode_type_bit_maps(&mut decoder, bytes.len()).is_err());
    }
}
