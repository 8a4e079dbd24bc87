// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! parameters used for the nsec3 hash method

use std::fmt;

use crate::error::ProtoResult;
use crate::serialize::binary::{BinDecoder, BinEncoder};

/// [RFC 5155](https://tools.ietf.org/html/rfc5155#section-4), NSEC3, March 2008
///
/// ```text
/// 4.1.  RDATA Fields
///
///    The RDATA of the NSEC3PARAM RR is as shown below:
///
///                         1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
///     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |   Hash Alg.   |     Flags     |          Iterations           |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |  Salt Length  |                     Salt                      /
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct NSEC3PARAM {
    hash_algorithm: u8,
    flags: u8,
    iterations: u16,
    salt: Vec<u8>,
}

impl NSEC3PARAM {
    /// Constructs a new NSEC3PARAM RData
    ///
    /// The full flags octet is kept; the reserved bits round-trip untouched.
    pub fn new(hash_algorithm: u8, flags: u8, iterations: u16, salt: Vec<u8>) -> Self {
        Self {
            hash_algorithm,
            flags,
            iterations,
            salt,
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
}

pub(crate) fn read(decoder: &mut BinDecoder<'_>) -> ProtoResult<NSEC3PARAM> {
    let hash_algorithm = decoder.read_u8()?;
    let flags = decoder.read_u8()?;
    let iterations = decoder.read_u16()?;
    let salt_len = decoder.read_u8()? as usize;
    let salt = decoder.read_vec(salt_len)?;

    Ok(NSEC3PARAM::new(hash_algorithm, flags, iterations, salt))
}

pub(crate) fn emit(encoder: &mut BinEncoder<'_>, rdata: &NSEC3PARAM) -> ProtoResult<()> {
    encoder.emit_u8(rdata.hash_algorithm())?;
    encoder.emit_u8(rdata.flags())?;
    encoder.emit_u16(rdata.iterations())?;
    encoder.emit_u8(rdata.salt().len() as u8)?;
    encoder.emit_vec(rdata.salt())
}

/// Write a salt in presentation form, uppercase hex with `-` for the empty salt
pub(crate) fn write_salt(f: &mut fmt::Formatter<'_>, salt: &[u8]) -> fmt::Result {
    if salt.is_empty() {
        return write!(f, "-");
    }
    for b in salt {
        write!(f, "{b:02X}")?;
    }
    Ok(())
}

/// [RFC 5155, section 4.3](https://tools.ietf.org/html/rfc5155#section-4.3), presentation
/// form: `HashAlg Flags Iterations Salt`
impl fmt::Display for NSEC3PARAM {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{alg} {flags} {iterations} ",
            alg = self.hash_algorithm,
            flags = self.flags,
            iterations = self.iterations,
        )?;
        write_salt(f, &self.salt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let rdata = NSEC3PARAM::new(1, 0, 5, vec![0x30, 0x92, 0x3C, 0x44, 0xC6, 0xCB, 0xBB, 0x8F]);

        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            emit(&mut encoder, &rdata).unwrap();
        }

        let mut decoder = BinDecoder::new(&bytes);
        let read_rdata = read(&mut decoder).expect("decoding error");
        assert_eq!(read_rdata, rdata);
        assert_eq!(read_rdata.to_string(), "1 0 5 30923C44C6CBBB8F");
    }

    #[test]
    fn test_empty_salt() {
        let rdata = NSEC3PARAM::new(1, 1, 0, vec![]);
        assert!(rdata.opt_out());
        assert_eq!(rdata.to_string(), "1 1 0 -");
    }

    #[test]
    fn test_reserved_flags_round_trip() {
        let rdata = NSEC3PARAM::new(1, 0b1000_0001, 0, vec![]);

        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            emit(&mut encoder, &rdata).unwrap();
        }

        let mut decoder = BinDecoder::new(&bytes);
        let read_rdata = read(&mut decoder).expect("decoding error");
        assert_eq!(read_rdata, rdata);
        assert_eq!(read_rdata.flags(), 0b1000_0001);
    }
}
