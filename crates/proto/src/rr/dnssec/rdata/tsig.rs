// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! TSIG for secret key authentication of transactions
//!
//! [RFC 8945](https://www.rfc-editor.org/rfc/rfc8945), Secret Key Transaction Authentication for DNS

use std::fmt;
use std::str::FromStr;

use crate::error::{ProtoErrorKind, ProtoResult};
use crate::rr::{DNSClass, Name, Record, RecordType};
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncodable, BinEncoder};

/// [RFC 8945, section 4.2](https://www.rfc-editor.org/rfc/rfc8945#section-4.2)
///
/// ```text
///   The RDATA for a TSIG RR consists of a number of fields, described below:
///
///                        1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
///    0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///   /                         Algorithm Name                        /
///   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///   |                                                               |
///   |          Time Signed          +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///   |                               |            Fudge              |
///   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///   |          MAC Size             |                               /
///   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+             MAC               /
///   /                                                               /
///   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///   |          Original ID          |            Error              |
///   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///   |          Other Len            |                               /
///   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+           Other Data          /
///   /                                                               /
///   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TSIG {
    algorithm: TsigAlgorithm,
    time: u64,
    fudge: u16,
    mac: Vec<u8>,
    oid: u16,
    error: u16,
    other: Vec<u8>,
}

impl TSIG {
    /// Constructs a new TSIG rdata
    ///
    /// # Arguments
    ///
    /// * `algorithm` - the HMAC algorithm of the MAC
    /// * `time` - number of seconds since unix epoch, lower 48 bits on the wire
    /// * `fudge` - tolerated clock skew in seconds
    /// * `mac` - the message authentication code
    /// * `oid` - the original ID of the message, before any forwarder rewrote it
    /// * `error` - extended RCODE of the server answer
    /// * `other` - the server real time in case of a BADTIME error, else empty
    pub fn new(
        algorithm: TsigAlgorithm,
        time: u64,
        fudge: u16,
        mac: Vec<u8>,
        oid: u16,
        error: u16,
        other: Vec<u8>,
    ) -> Self {
        Self {
            algorithm,
            time,
            fudge,
            mac,
            oid,
            error,
            other,
        }
    }

    /// Returns the algorithm of the MAC
    pub fn algorithm(&self) -> &TsigAlgorithm {
        &self.algorithm
    }

    /// The time this MAC was computed, seconds since unix epoch
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Tolerated clock skew, in seconds
    pub fn fudge(&self) -> u16 {
        self.fudge
    }

    /// The message authentication code
    pub fn mac(&self) -> &[u8] {
        &self.mac
    }

    /// The original id of the message
    pub fn oid(&self) -> u16 {
        self.oid
    }

    /// The TSIG error field
    pub fn error(&self) -> u16 {
        self.error
    }

    /// Other data, only used with the BADTIME error
    pub fn other(&self) -> &[u8] {
        &self.other
    }

    /// Returns a copy with the MAC replaced
    pub fn set_mac(self, mac: Vec<u8>) -> Self {
        Self { mac, ..self }
    }

    /// Write the canonical TSIG variables for MAC computation, the rdata with
    /// the MAC and original ID excluded
    ///
    /// [RFC 8945, section 4.3.3](https://www.rfc-editor.org/rfc/rfc8945#section-4.3.3)
    pub(crate) fn emit_tsig_for_mac(
        &self,
        encoder: &mut BinEncoder<'_>,
        key_name: &Name,
    ) -> ProtoResult<()> {
        key_name.to_lowercase().emit_as_canonical(encoder, true)?;
        DNSClass::ANY.emit(encoder)?;
        encoder.emit_u32(0)?; // TTL of a TSIG is 0
        self.algorithm.to_name().to_lowercase().emit_as_canonical(encoder, true)?;
        encoder.emit_u48(self.time)?;
        encoder.emit_u16(self.fudge)?;
        encoder.emit_u16(self.error)?;
        encoder.emit_u16(self.other.len() as u16)?;
        encoder.emit_vec(&self.other)?;
        Ok(())
    }

    /// Build the record to attach as the final entry of the additional section
    pub fn to_record(&self, key_name: Name) -> Record {
        let mut record = Record::with(key_name, RecordType::TSIG, 0);
        record.set_dns_class(DNSClass::ANY);
        record.set_data(Some(crate::rr::RData::DNSSEC(
            super::DNSSECRData::TSIG(self.clone()),
        )));
        record
    }
}

pub(crate) fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> ProtoResult<TSIG> {
    let start_idx = decoder.index();

    let algorithm = TsigAlgorithm::from_name(Name::read(decoder)?);
    let time = decoder.read_u48()?;
    let fudge = decoder.read_u16()?;

    let mac_size = decoder.read_u16()? as usize;
    let mac = decoder.read_vec(mac_size)?;

    let oid = decoder.read_u16()?;
    let error = decoder.read_u16()?;

    let other_len = decoder.read_u16()? as usize;
    let other = decoder.read_vec(other_len)?;

    if decoder.index() - start_idx != rdata_length as usize {
        return Err(ProtoErrorKind::Message("invalid rdata length in TSIG").into());
    }

    Ok(TSIG::new(algorithm, time, fudge, mac, oid, error, other))
}

pub(crate) fn emit(encoder: &mut BinEncoder<'_>, tsig: &TSIG) -> ProtoResult<()> {
    // the algorithm name is a name field, never compressed nor lowercased, RFC 8945
    tsig.algorithm.to_name().emit_as_canonical(encoder, true)?;
    encoder.emit_u48(tsig.time)?;
    encoder.emit_u16(tsig.fudge)?;
    encoder.emit_u16(tsig.mac.len() as u16)?;
    encoder.emit_vec(&tsig.mac)?;
    encoder.emit_u16(tsig.oid)?;
    encoder.emit_u16(tsig.error)?;
    encoder.emit_u16(tsig.other.len() as u16)?;
    encoder.emit_vec(&tsig.other)
}

impl fmt::Display for TSIG {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{algorithm} {time} {fudge} ",
            algorithm = self.algorithm.to_name().to_ascii(),
            time = self.time,
            fudge = self.fudge,
        )?;
        for b in &self.mac {
            write!(f, "{b:02X}")?;
        }
        write!(
            f,
            " {oid} {error} ",
            oid = self.oid,
            error = self.error,
        )?;
        for b in &self.other {
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

/// The HMAC algorithm of a TSIG, identified on the wire by a domain name
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
#[non_exhaustive]
pub enum TsigAlgorithm {
    /// HMAC-MD5.SIG-ALG.REG.INT, the mandatory algorithm of RFC 2845
    HmacMd5,
    /// hmac-sha1
    HmacSha1,
    /// hmac-sha256
    HmacSha256,
    /// an unsupported algorithm, kept by name
    Unknown(Name),
}

impl TsigAlgorithm {
    /// Return the DNS name identifying the algorithm
    pub fn to_name(&self) -> Name {
        match self {
            Self::HmacMd5 => Name::from_str("hmac-md5.sig-alg.reg.int."),
            Self::HmacSha1 => Name::from_str("hmac-sha1."),
            Self::HmacSha256 => Name::from_str("hmac-sha256."),
            Self::Unknown(name) => return name.clone(),
        }
        .expect("algorithm names are valid")
    }

    /// Map a wire name to the algorithm
    pub fn from_name(name: Name) -> Self {
        let lower = name.to_lowercase().to_ascii();
        match lower.as_str() {
            "hmac-md5.sig-alg.reg.int." => Self::HmacMd5,
            "hmac-sha1." => Self::HmacSha1,
            "hmac-sha256." => Self::HmacSha256,
            _ => Self::Unknown(name),
        }
    }
}
