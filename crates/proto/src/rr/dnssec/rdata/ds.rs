// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! pointer record from parent zone to child zone for dnskey proof

use std::fmt;

use crate::error::ProtoResult;
use crate::rr::dnssec::{Algorithm, DigestType};
use crate::serialize::binary::{BinDecoder, BinEncoder};

/// [RFC 4034](https://tools.ietf.org/html/rfc4034#section-5), DNSSEC Resource Records, March 2005
///
/// ```text
/// 5.1.  DS RDATA Wire Format
///
///    The RDATA for a DS RR consists of a 2 octet Key Tag field, a 1 octet
///    Algorithm field, a 1 octet Digest Type field, and a Digest field.
///
///                         1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
///     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |           Key Tag             |  Algorithm    |  Digest Type  |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    /                                                               /
///    /                            Digest                             /
///    /                                                               /
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct DS {
    key_tag: u16,
    algorithm: Algorithm,
    digest_type: DigestType,
    digest: Vec<u8>,
}

impl DS {
    /// Constructs a new DS RData
    ///
    /// # Arguments
    ///
    /// * `key_tag` - the key_tag associated to the DNSKEY
    /// * `algorithm` - algorithm as specified in the DNSKEY
    /// * `digest_type` - hash algorithm used to validate the DNSKEY
    /// * `digest` - hash of the DNSKEY
    pub fn new(key_tag: u16, algorithm: Algorithm, digest_type: DigestType, digest: Vec<u8>) -> Self {
        Self {
            key_tag,
            algorithm,
            digest_type,
            digest,
        }
    }

    /// The key tag of the DNSKEY this DS refers to, copied verbatim
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// The algorithm of the referenced DNSKEY
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The digest algorithm that produced the digest field
    pub fn digest_type(&self) -> DigestType {
        self.digest_type
    }

    /// The digest over the canonical owner name and DNSKEY rdata
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }
}

pub(crate) fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> ProtoResult<DS> {
    let key_tag = decoder.read_u16()?;
    let algorithm = Algorithm::from_u8(decoder.read_u8()?);
    let digest_type_value = decoder.read_u8()?;

    let digest_len = (rdata_length as usize)
        .checked_sub(4)
        .ok_or("invalid rdata length in DS")?;
    let digest = decoder.read_vec(digest_len)?;

    let digest_type = digest_type(digest_type_value)?;

    Ok(DS::new(key_tag, algorithm, digest_type, digest))
}

fn digest_type(value: u8) -> ProtoResult<DigestType> {
    match value {
        1 => Ok(DigestType::SHA1),
        2 => Ok(DigestType::SHA256),
        4 => Ok(DigestType::SHA384),
        _ => Err(format!("unsupported DS digest type: {value}").into()),
    }
}

pub(crate) fn emit(encoder: &mut BinEncoder<'_>, rdata: &DS) -> ProtoResult<()> {
    encoder.emit_u16(rdata.key_tag())?;
    encoder.emit_u8(rdata.algorithm().into())?;
    encoder.emit_u8(rdata.digest_type().into())?;
    encoder.emit_vec(rdata.digest())
}

/// [RFC 4034, section 5.3](https://tools.ietf.org/html/rfc4034#section-5.3), presentation
/// form: `KeyTag Algorithm DigestType Digest`, the digest in lowercase hex
impl fmt::Display for DS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{tag} {alg} {ty} ",
            tag = self.key_tag,
            alg = u8::from(self.algorithm),
            ty = u8::from(self.digest_type),
        )?;
        for b in &self.digest {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}
