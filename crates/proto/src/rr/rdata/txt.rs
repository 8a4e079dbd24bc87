// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! text records for storing arbitrary data

use std::fmt;

use crate::error::ProtoResult;
use crate::serialize::binary::{BinDecoder, BinEncoder};

/// [RFC 1035, DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987](https://tools.ietf.org/html/rfc1035)
///
/// ```text
/// 3.3.14. TXT RDATA format
///
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     /                   TXT-DATA                    /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///
/// where:
///
/// TXT-DATA        One or more <character-string>s.
///
/// TXT RRs are used to hold descriptive text.  The semantics of the text
/// depends on the domain where it is found.
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct TXT {
    txt_data: Vec<Vec<u8>>,
}

impl TXT {
    /// Creates a new TXT record data from a list of strings
    pub fn new(txt_data: Vec<String>) -> Self {
        Self {
            txt_data: txt_data.into_iter().map(String::into_bytes).collect(),
        }
    }

    /// Creates a new TXT record data from raw byte strings
    pub fn from_bytes(txt_data: Vec<Vec<u8>>) -> Self {
        Self { txt_data }
    }

    /// Returns the raw character strings of this TXT record
    pub fn txt_data(&self) -> &[Vec<u8>] {
        &self.txt_data
    }

    /// Returns the encoded length of all character strings, including length octets
    pub fn wire_len(&self) -> usize {
        self.txt_data.iter().map(|s| s.len() + 1).sum()
    }
}

pub(crate) fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> ProtoResult<TXT> {
    let data_len = decoder.len();
    let mut strings = Vec::with_capacity(1);

    while data_len - decoder.len() < rdata_length as usize {
        strings.push(decoder.read_character_data()?.to_vec());
    }
    Ok(TXT { txt_data: strings })
}

pub(crate) fn emit(encoder: &mut BinEncoder<'_>, txt: &TXT) -> ProtoResult<()> {
    for s in txt.txt_data() {
        encoder.emit_character_data(s)?;
    }
    Ok(())
}

/// Write a single character-string in presentation form: always quoted, with
/// `"` and `\` escaped, an embedded newline rendered `\n`, and other
/// non-printable bytes as decimal `\DDD`.
pub(crate) fn write_char_str(f: &mut fmt::Formatter<'_>, data: &[u8]) -> fmt::Result {
    write!(f, "\"")?;
    for b in data {
        match b {
            b'"' => write!(f, "\\\"")?,
            b'\\' => write!(f, "\\\\")?,
            b'\n' => write!(f, "\\n")?,
            b if *b >= 0x20 && *b < 0x7f => write!(f, "{}", char::from(*b))?,
            b => write!(f, "\\{b:03}")?,
        }
    }
    write!(f, "\"")
}

impl fmt::Display for TXT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for s in &self.txt_data {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write_char_str(f, s)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let rdata = TXT::new(vec!["Test me some".to_string(), "more please".to_string()]);

        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            emit(&mut encoder, &rdata).unwrap();
        }

        let mut decoder = BinDecoder::new(&bytes);
        let read_rdata = read(&mut decoder, bytes.len() as u16).expect("decoding error");
        assert_eq!(read_rdata, rdata);
    }

    #[test]
    fn test_display_escapes_newline() {
        let rdata = TXT::new(vec!["a\n bc".to_string()]);
        assert_eq!(rdata.to_string(), "\"a\\n bc\"");
    }

    #[test]
    fn test_truncated_char_str() {
        // claims 4 bytes of string, provides 2
        let bytes = [4_u8, b'a', b'b'];
        let mut decoder = BinDecoder::new(&bytes);
        assert!(read(&mut decoder, bytes.len() as u16).is_err());
    }
}
