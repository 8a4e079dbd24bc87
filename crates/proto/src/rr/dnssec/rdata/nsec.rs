// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! NSEC record types

use std::fmt;

use crate::error::{ProtoErrorKind, ProtoResult};
use crate::rr::type_bit_map::{decode_type_bit_maps, encode_type_bit_maps};
use crate::rr::{Name, RecordType};
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncoder};

/// [RFC 4034](https://tools.ietf.org/html/rfc4034#section-4), DNSSEC Resource Records, March 2005
///
/// ```text
/// 4.1.  NSEC RDATA Wire Format
///
///    The RDATA of the NSEC RR is as shown below:
///
///                         1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
///     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    /                      Next Domain Name                         /
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    /                       Type Bit Maps                           /
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// This crate only reads and writes the record; chain construction and
/// authenticated denial proofs are not implemented here.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NSEC {
    next_domain_name: Name,
    type_bit_maps: Vec<RecordType>,
}

impl NSEC {
    /// Constructs a new NSEC RData
    ///
    /// # Arguments
    ///
    /// * `next_domain_name` - the name labels of the next ordered name in the zone
    /// * `type_bit_maps` - a bit map of the types that exist at this name
    pub fn new(next_domain_name: Name, type_bit_maps: Vec<RecordType>) -> Self {
        Self {
            next_domain_name,
            type_bit_maps,
        }
    }

    /// The next name in the canonical ordering of the zone
    pub fn next_domain_name(&self) -> &Name {
        &self.next_domain_name
    }

    /// The record types that exist at the owner of this record
    pub fn type_bit_maps(&self) -> &[RecordType] {
        &self.type_bit_maps
    }
}

pub(crate) fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> ProtoResult<NSEC> {
    let start_idx = decoder.index();

    let next_domain_name = Name::read(decoder)?;

    let bit_map_len = (rdata_length as usize)
        .checked_sub(decoder.index() - start_idx)
        .ok_or_else(|| ProtoErrorKind::Message("invalid rdata length in NSEC"))?;
    let type_bit_maps = decode_type_bit_maps(decoder, bit_map_len)?;

    Ok(NSEC::new(next_domain_name, type_bit_maps))
}

pub(crate) fn emit(encoder: &mut BinEncoder<'_>, rdata: &NSEC) -> ProtoResult<()> {
    // the next name is never compressed, and is lowercased in the canonical form
    if encoder.is_canonical_names() {
        rdata
            .next_domain_name()
            .to_lowercase()
            .emit_as_canonical(encoder, true)?;
    } else {
        rdata.next_domain_name().emit_as_canonical(encoder, true)?;
    }

    encode_type_bit_maps(encoder, rdata.type_bit_maps())
}

/// [RFC 4034, section 4.2](https://tools.ietf.org/html/rfc4034#section-4.2), presentation
/// form: `NextDomainName Type1 Type2 ...`
impl fmt::Display for NSEC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.next_domain_name.to_ascii())?;

        for ty in &self.type_bit_maps {
            write!(f, " {ty}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_round_trip() {
        let rdata = NSEC::new(
            Name::from_str("miek.nl.").unwrap(),
            vec![RecordType::TXT, RecordType::RRSIG, RecordType::NSEC],
        );

        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            emit(&mut encoder, &rdata).unwrap();
        }

        let mut decoder = BinDecoder::new(&bytes);
        let read_rdata = read(&mut decoder, bytes.len() as u16).expect("decoding error");
        assert_eq!(read_rdata, rdata);
        assert_eq!(read_rdata.to_string(), "miek.nl. TXT RRSIG NSEC");
    }
}
