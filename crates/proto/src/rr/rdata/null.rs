// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! null record type, generally not used except as an internal tool for representing null data

use std::fmt;

use crate::error::ProtoResult;
use crate::serialize::binary::{BinDecoder, BinEncoder};

/// [RFC 1035, DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987](https://tools.ietf.org/html/rfc1035)
///
/// ```text
/// 3.3.10. NULL RDATA format (EXPERIMENTAL)
///
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     /                  <anything>                   /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///
/// Anything at all may be in the RDATA field so long as it is 65535 octets
/// or less.
/// ```
///
/// This also carries the opaque rdata of unknown record types, RFC 3597.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct NULL {
    anything: Vec<u8>,
}

impl NULL {
    /// Construct a new NULL RData
    pub const fn new() -> Self {
        Self {
            anything: Vec::new(),
        }
    }

    /// Constructs a new NULL RData with the associated data
    pub fn with(anything: Vec<u8>) -> Self {
        Self { anything }
    }

    /// Returns the buffer of this NULL RData
    pub fn anything(&self) -> &[u8] {
        &self.anything
    }
}

pub(crate) fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> ProtoResult<NULL> {
    let rdata_length = rdata_length as usize;
    if rdata_length > 0 {
        let anything = decoder.read_vec(rdata_length)?;
        Ok(NULL::with(anything))
    } else {
        Ok(NULL::new())
    }
}

pub(crate) fn emit(encoder: &mut BinEncoder<'_>, nil: &NULL) -> ProtoResult<()> {
    encoder.emit_vec(nil.anything())
}

/// [RFC 3597](https://tools.ietf.org/html/rfc3597), unknown rdata presentation form:
/// `\# <length> <hex octets>`
impl fmt::Display for NULL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\# {}", self.anything.len())?;
        if !self.anything.is_empty() {
            write!(f, " ")?;
            for b in &self.anything {
                write!(f, "{b:02x}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let rdata = NULL::with(vec![0, 1, 2, 3, 4, 5, 6, 7]);

        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            emit(&mut encoder, &rdata).unwrap();
        }

        let mut decoder = BinDecoder::new(&bytes);
        let read_rdata = read(&mut decoder, bytes.len() as u16).expect("decoding error");
        assert_eq!(read_rdata, rdata);
        assert_eq!(rdata.to_string(), "\\# 8 0001020304050607");
    }
}
