// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! NSEC3 hashed authenticated denial record

use std::fmt;

use data_encoding::BASE32HEX_NOPAD;

use crate::error::{ProtoErrorKind, ProtoResult};
use crate::rr::dnssec::rdata::nsec3param::write_salt;
use crate::rr::type_bit_map::{decode_type_bit_maps, encode_type_bit_maps};
use crate::rr::RecordType;
use crate::serialize::binary::{BinDecoder, BinEncoder};

/// [RFC 5155](https://tools.ietf.org/html/rfc5155#section-3), NSEC3, March 2008
///
/// ```text
/// 3.1.  RDATA Fields
///
///                         1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
///     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |   Hash Alg.   |     Flags     |          Iterations           |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |  Salt Length  |                     Salt                      /
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |  Hash Length  |             Next Hashed Owner Name            /
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    /                         Type Bit Maps                         /
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// As with NSEC, only the record codec lives here; hashing names into the
/// chain and proving denials are out of scope.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NSEC3 {
    hash_algorithm: u8,
    flags: u8,
    iterations: u16,
    salt: Vec<u8>,
    next_hashed_owner_name: Vec<u8>,
    type_bit_maps: Vec<RecordType>,
}

impl NSEC3 {
    /// Constructs a new NSEC3 record
    ///
    /// The full flags octet is kept; the reserved bits round-trip untouched.
    pub fn new(
        hash_algorithm: u8,
        flags: u8,
        iterations: u16,
        salt: Vec<u8>,
        next_hashed_owner_name: Vec<u8>,
        type_bit_maps: Vec<RecordType>,
    ) -> Self {
        Self {
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_hashed_owner_name,
            type_bit_maps,
        }
    }

    /// The hash algorithm used to hash names, 1 for SHA-1
    pub fn hash_algorithm(&self) -> u8 {
        self.hash_algorithm
    }

    /// The flags field, bit 0 is opt-out, the rest is reserved
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// The opt-out flag
    pub fn opt_out(&self) -> bool {
        self.flags & 0b0000_0001 == 0b0000_0001
    }

    /// Additional hash iterations applied to each name
    pub fn iterations(&self) -> u16 {
        self.iterations
    }

    /// The salt appended to names before hashing
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// The raw hash bytes of the next name in the hash order of the zone
    pub fn next_hashed_owner_name(&self) -> &[u8] {
        &self.next_hashed_owner_name
    }

    /// The record types that exist at the original owner name
    pub fn type_bit_maps(&self) -> &[RecordType] {
        &self.type_bit_maps
    }
}

pub(crate) fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> ProtoResult<NSEC3> {
    let start_idx = decoder.index();

    let hash_algorithm = decoder.read_u8()?;
    let flags = decoder.read_u8()?;
    let iterations = decoder.read_u16()?;

    let salt_len = decoder.read_u8()? as usize;
    let salt = decoder.read_vec(salt_len)?;

    let hash_len = decoder.read_u8()? as usize;
    let next_hashed_owner_name = decoder.read_vec(hash_len)?;

    let bit_map_len = (rdata_length as usize)
        .checked_sub(decoder.index() - start_idx)
        .ok_or_else(|| ProtoErrorKind::Message("invalid rdata length in NSEC3"))?;
    let type_bit_maps = decode_type_bit_maps(decoder, bit_map_len)?;

    Ok(NSEC3::new(
        hash_algorithm,
        flags,
        iterations,
        salt,
        next_hashed_owner_name,
        type_bit_maps,
    ))
}

pub(crate) fn emit(encoder: &mut BinEncoder<'_>, rdata: &NSEC3) -> ProtoResult<()> {
    encoder.emit_u8(rdata.hash_algorithm())?;
    encoder.emit_u8(rdata.flags())?;
    encoder.emit_u16(rdata.iterations())?;
    encoder.emit_u8(rdata.salt().len() as u8)?;
    encoder.emit_vec(rdata.salt())?;
    encoder.emit_u8(rdata.next_hashed_owner_name().len() as u8)?;
    encoder.emit_vec(rdata.next_hashed_owner_name())?;
    encode_type_bit_maps(encoder, rdata.type_bit_maps())
}

/// [RFC 5155, section 3.3](https://tools.ietf.org/html/rfc5155#section-3.3), presentation
/// form: the next hashed owner in unpadded base32hex, the salt in hex
impl fmt::Display for NSEC3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{alg} {flags} {iterations} ",
            alg = self.hash_algorithm,
            flags = self.flags,
            iterations = self.iterations,
        )?;
        write_salt(f, &self.salt)?;
        write!(f, " {}", BASE32HEX_NOPAD.encode(&self.next_hashed_owner_name))?;

        for ty in &self.type_bit_maps {
            write!(f, " {ty}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let next = BASE32HEX_NOPAD
            .decode(b"P90DG1KE8QEAN0B01613LHQDG0SOJ0TA")
            .unwrap();
        let rdata = NSEC3::new(
            1,
            1,
            5,
            vec![0x30, 0x92, 0x3C, 0x44, 0xC6, 0xCB, 0xBB, 0x8F],
            next,
            vec![
                RecordType::NS,
                RecordType::SOA,
                RecordType::TXT,
                RecordType::RRSIG,
                RecordType::DNSKEY,
                RecordType::NSEC3PARAM,
            ],
        );

        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            emit(&mut encoder, &rdata).unwrap();
        }

        let mut decoder = BinDecoder::new(&bytes);
        let read_rdata = read(&mut decoder, bytes.len() as u16).expect("decoding error");
        assert_eq!(read_rdata, rdata);
        assert_eq!(
            read_rdata.to_string(),
            "1 1 5 30923C44C6CBBB8F P90DG1KE8QEAN0B01613LHQDG0SOJ0TA NS SOA TXT RRSIG DNSKEY NSEC3PARAM"
        );
    }
}
