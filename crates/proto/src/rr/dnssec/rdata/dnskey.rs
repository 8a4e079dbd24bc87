// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! public key record data for signing zone records

use std::fmt;

use data_encoding::BASE64;

use crate::error::{DnsSecResult, ProtoErrorKind, ProtoResult};
use crate::rr::dnssec::rdata::DS;
use crate::rr::dnssec::{Algorithm, DigestType};
use crate::rr::Name;
use crate::serialize::binary::{BinDecoder, BinEncoder};

/// [RFC 4034](https://tools.ietf.org/html/rfc4034#section-2), DNSSEC Resource Records, March 2005
///
/// ```text
/// 2.1.  DNSKEY RDATA Wire Format
///
///    The RDATA for a DNSKEY RR consists of a 2 octet Flags Field, a 1
///    octet Protocol Field, a 1 octet Algorithm Field, and the Public Key
///    Field.
///
///                         1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
///     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |              Flags            |    Protocol   |   Algorithm   |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    /                                                               /
///    /                            Public Key                         /
///    /                                                               /
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///
/// 2.1.5.  Notes on DNSKEY RDATA Design
///
///    Although the Protocol Field always has value 3, it is retained for
///    backward compatibility with early versions of the KEY record.
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct DNSKEY {
    zone_key: bool,
    secure_entry_point: bool,
    revoke: bool,
    algorithm: Algorithm,
    public_key: Vec<u8>,
}

impl DNSKEY {
    /// Construct a new DNSKEY RData
    ///
    /// # Arguments
    ///
    /// * `zone_key` - this key is used to sign Zone resource records
    /// * `secure_entry_point` - this key is used to sign DNSKEYs that sign the Zone records
    /// * `revoke` - this key has been revoked
    /// * `algorithm` - the algorithm this key signs records with
    /// * `public_key` - the public key material in its DNSKEY encoding
    pub fn new(
        zone_key: bool,
        secure_entry_point: bool,
        revoke: bool,
        algorithm: Algorithm,
        public_key: Vec<u8>,
    ) -> Self {
        Self {
            zone_key,
            secure_entry_point,
            revoke,
            algorithm,
            public_key,
        }
    }

    /// Construct from the numeric flags field, e.g. 256 for a ZSK, 257 for a KSK
    pub fn from_flags(flags: u16, algorithm: Algorithm, public_key: Vec<u8>) -> Self {
        Self::new(
            flags & 0b0000_0001_0000_0000 != 0,
            flags & 0b0000_0000_0000_0001 != 0,
            flags & 0b0000_0000_1000_0000 != 0,
            algorithm,
            public_key,
        )
    }

    /// The numeric flags field of this key
    pub fn flags(&self) -> u16 {
        let mut flags: u16 = 0;
        if self.zone_key {
            flags |= 0b0000_0001_0000_0000;
        }
        if self.secure_entry_point {
            flags |= 0b0000_0000_0000_0001;
        }
        if self.revoke {
            flags |= 0b0000_0000_1000_0000;
        }

        flags
    }

    /// [RFC 4034, section 2.1.1](https://tools.ietf.org/html/rfc4034#section-2.1.1), bit 7
    /// of the flags: this key holds a DNS zone key
    pub fn zone_key(&self) -> bool {
        self.zone_key
    }

    /// [RFC 4034, section 2.1.1](https://tools.ietf.org/html/rfc4034#section-2.1.1), bit 15
    /// of the flags: a key signing key, KSK
    pub fn secure_entry_point(&self) -> bool {
        self.secure_entry_point
    }

    /// [RFC 5011](https://tools.ietf.org/html/rfc5011), the revoke bit
    pub fn revoke(&self) -> bool {
        self.revoke
    }

    /// The algorithm this key signs with
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The public key material in the encoding of the algorithm
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// The key tag is calculated as a hash to more quickly lookup a DNSKEY.
    ///
    /// [RFC 2535](https://tools.ietf.org/html/rfc2535), Appendix C
    ///
    /// ```text
    ///  The key tag field in the SIG RR is just a means of more efficiently
    ///  selecting the correct KEY RR to use when there is more than one KEY
    ///  RR candidate available...
    ///
    ///  for ( ac = 0, i = 0; i < keysize; ++i )
    ///      ac += (i&1) ? key[i] : key[i]<<8;
    ///  ac += (ac>>16) & 0xFFFF;
    ///  return ac & 0xFFFF;
    /// ```
    ///
    /// For algorithm 1 (RSA/MD5) the tag is instead the most significant 16
    /// of the least significant 24 bits of the public key modulus.
    pub fn calculate_key_tag(&self) -> ProtoResult<u16> {
        // the older tag rule reads straight out of the modulus
        if self.algorithm == Algorithm::RSAMD5 {
            let modulus = self.public_key();
            if modulus.len() < 3 {
                return Err("RSAMD5 public key too short for key tag".into());
            }
            let tag = (u16::from(modulus[modulus.len() - 3]) << 8)
                | u16::from(modulus[modulus.len() - 2]);
            return Ok(tag);
        }

        let mut bytes: Vec<u8> = Vec::with_capacity(512);
        {
            let mut e = BinEncoder::new(&mut bytes);
            emit(&mut e, self)?;
        }
        Ok(Self::calculate_key_tag_internal(&bytes))
    }

    /// The checksum of the rdata as 16-bit big-endian words
    pub fn calculate_key_tag_internal(bytes: &[u8]) -> u16 {
        let mut ac: u32 = 0;
        for (i, k) in bytes.iter().enumerate() {
            ac += u32::from(*k) << if i & 0x01 != 0 { 0 } else { 8 };
        }
        ac += ac >> 16;
        (ac & 0xFFFF) as u16
    }

    /// Creates a message digest over this key, used for the DS record
    ///
    /// ```text
    /// 5.1.4.  The Digest Field
    ///
    ///    The digest is calculated by concatenating the canonical form of the
    ///    fully qualified owner name of the DNSKEY RR with the DNSKEY RDATA,
    ///    and then applying the digest algorithm.
    ///
    ///      digest = digest_algorithm( DNSKEY owner name | DNSKEY RDATA);
    ///
    ///       "|" denotes concatenation
    ///
    ///      DNSKEY RDATA = Flags | Protocol | Algorithm | Public Key.
    /// ```
    pub fn to_digest(&self, name: &Name, digest_type: DigestType) -> DnsSecResult<Vec<u8>> {
        let mut buf: Vec<u8> = Vec::new();
        {
            let mut encoder: BinEncoder<'_> = BinEncoder::new(&mut buf);
            encoder.set_canonical_names(true);
            name.to_lowercase().emit_as_canonical(&mut encoder, true)?;
            emit(&mut encoder, self)?;
        }

        digest_type.digest(&buf)
    }

    /// Creates the DS record for this key, owned by `name`
    pub fn to_ds(&self, name: &Name, digest_type: DigestType) -> DnsSecResult<DS> {
        Ok(DS::new(
            self.calculate_key_tag()?,
            self.algorithm,
            digest_type,
            self.to_digest(name, digest_type)?,
        ))
    }
}

pub(crate) fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> ProtoResult<DNSKEY> {
    let flags = decoder.read_u16()?;

    //    The Protocol Field MUST have value 3, and the DNSKEY RR MUST be
    //    treated as invalid during signature verification if it is found to be
    //    some value other than 3.
    let protocol = decoder.read_u8()?;
    if protocol != 3 {
        return Err(ProtoErrorKind::DnsKeyProtocolNot3(protocol).into());
    }

    let algorithm = Algorithm::from_u8(decoder.read_u8()?);

    // the public key is the left-over bytes minus 4 for the first fields
    let key_len = (rdata_length as usize)
        .checked_sub(4)
        .ok_or_else(|| ProtoErrorKind::Message("invalid rdata length in DNSKEY"))?;
    let public_key = decoder.read_vec(key_len)?;

    Ok(DNSKEY::from_flags(flags, algorithm, public_key))
}

pub(crate) fn emit(encoder: &mut BinEncoder<'_>, rdata: &DNSKEY) -> ProtoResult<()> {
    encoder.emit_u16(rdata.flags())?;
    encoder.emit_u8(3)?; // always 3, the protocol
    encoder.emit_u8(rdata.algorithm().into())?;
    encoder.emit_vec(rdata.public_key())
}

/// [RFC 4034, section 2.2](https://tools.ietf.org/html/rfc4034#section-2.2), presentation
/// form: `Flags Protocol Algorithm PublicKey`
impl fmt::Display for DNSKEY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{flags} 3 {alg} {key}",
            flags = self.flags(),
            alg = u8::from(self.algorithm),
            key = BASE64.encode(&self.public_key)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::binary::BinDecoder;

    #[test]
    fn test_round_trip() {
        let rdata = DNSKEY::new(true, true, false, Algorithm::RSASHA256, vec![0, 1, 2, 3]);
        assert_eq!(rdata.flags(), 257);

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
    fn test_reject_protocol_not_3() {
        // flags 256, protocol 2, algorithm 8, no key
        let bytes = [1_u8, 0, 2, 8];
        let mut decoder = BinDecoder::new(&bytes);
        assert!(read(&mut decoder, bytes.len() as u16).is_err());
    }

    #[test]
    fn test_calculate_key_tag_checksum() {
        let test_text = "The quick brown fox jumps over the lazy dog";
        let test_vectors = vec![
            (vec![], 0),
            (vec![0, 0, 0, 0], 0),
            (vec![0xff, 0xff, 0xff, 0xff], 0xffff),
            (vec![1, 0, 0, 0], 0x0100),
            (vec![0, 1, 0, 0], 0x0001),
            (vec![0, 0, 1, 0], 0x0100),
            (test_text.as_bytes().to_vec(), 0x8d5b),
        ];

        for (input_data, exp_result) in test_vectors {
            let result = DNSKEY::calculate_key_tag_internal(&input_data);
            assert_eq!(result, exp_result);
        }
    }

    #[test]
    fn test_rsamd5_key_tag_reads_modulus() {
        // a fake RSAMD5 key: exponent length 1, exponent 3, modulus ...
        let key = vec![1, 3, 0xAA, 0xBB, 0xCC, 0xDD];
        let dnskey = DNSKEY::new(true, false, false, Algorithm::RSAMD5, key);
        assert_eq!(dnskey.calculate_key_tag().unwrap(), 0xBBCC);
    }
}
