// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! record data enum variants

use std::fmt;

use enum_as_inner::EnumAsInner;
use tracing::warn;

#[cfg(feature = "dnssec")]
use crate::rr::dnssec::rdata::DNSSECRData;
use crate::{
    error::{ProtoErrorKind, ProtoResult},
    rr::{
        rdata::{a, aaaa, loc, mx, name, null, opt, soa, srv, txt},
        rdata::{A, AAAA, CNAME, LOC, MX, NS, NULL, OPT, PTR, SOA, SRV, TXT},
        RecordType,
    },
    serialize::binary::{BinDecodable, BinDecoder, BinEncodable, BinEncoder},
};

/// Record data enum variants for all valid DNS data types.
///
/// This is the dispatch table of the crate: every record type pairs one read
/// and one emit function (plus a presentation form). Adding a record type
/// means adding an rdata module and its arms here.
#[derive(Debug, EnumAsInner, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum RData {
    /// IPv4 address
    A(A),
    /// IPv6 address
    AAAA(AAAA),
    /// Canonical name
    CNAME(CNAME),
    /// Geographic location
    LOC(LOC),
    /// Mail exchange
    MX(MX),
    /// Authoritative nameserver
    NS(NS),
    /// Opaque data, the NULL type
    NULL(NULL),
    /// EDNS options pseudo record
    OPT(OPT),
    /// Domain name pointer
    PTR(PTR),
    /// Start of authority
    SOA(SOA),
    /// Service locator
    SRV(SRV),
    /// Text strings
    TXT(TXT),
    /// DNSSEC record data, see `DNSSECRData` for the variants
    #[cfg(feature = "dnssec")]
    DNSSEC(DNSSECRData),
    /// Record with a type code this registry does not know, opaque rdata per RFC 3597
    Unknown {
        /// numeric type code
        code: u16,
        /// the bytes of the rdata
        rdata: NULL,
    },
    /// No record data, RFC 2136 uses zero-length rdata in prerequisites
    ZERO,
}

impl RData {
    /// Read the RData from the data stream
    ///
    /// The rdata_length is the `RDLENGTH` field of the record; exactly that many
    /// bytes must be consumed or the message is malformed.
    pub fn read(
        decoder: &mut BinDecoder<'_>,
        record_type: RecordType,
        rdata_length: u16,
    ) -> ProtoResult<Self> {
        let start_idx = decoder.index();

        let result = match record_type {
            RecordType::A => a::A::read(decoder).map(Self::A),
            RecordType::AAAA => aaaa::AAAA::read(decoder).map(Self::AAAA),
            RecordType::CNAME => name::read(decoder).map(|n| Self::CNAME(CNAME(n))),
            RecordType::LOC => loc::read(decoder).map(Self::LOC),
            RecordType::MX => mx::read(decoder).map(Self::MX),
            RecordType::NS => name::read(decoder).map(|n| Self::NS(NS(n))),
            RecordType::NULL => null::read(decoder, rdata_length).map(Self::NULL),
            RecordType::OPT => opt::read(decoder, rdata_length).map(Self::OPT),
            RecordType::PTR => name::read(decoder).map(|n| Self::PTR(PTR(n))),
            RecordType::SOA => soa::read(decoder).map(Self::SOA),
            RecordType::SRV => srv::read(decoder).map(Self::SRV),
            RecordType::TXT => txt::read(decoder, rdata_length).map(Self::TXT),
            #[cfg(feature = "dnssec")]
            rt if rt.is_dnssec() || rt == RecordType::TSIG => {
                DNSSECRData::read(decoder, record_type, rdata_length).map(Self::DNSSEC)
            }
            RecordType::ZERO => Ok(Self::ZERO),
            rt => null::read(decoder, rdata_length).map(|rdata| Self::Unknown {
                code: rt.into(),
                rdata,
            }),
        }?;

        // we should have read rdata_length, but we did not
        let read = decoder.index() - start_idx;
        if read != rdata_length as usize {
            return Err(ProtoErrorKind::IncorrectRDataLengthRead {
                read,
                len: rdata_length as usize,
            }
            .into());
        }

        Ok(result)
    }

    /// Write the RData from the given encoder
    pub fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()> {
        match self {
            Self::A(address) => address.emit(encoder),
            Self::AAAA(address) => address.emit(encoder),
            Self::CNAME(cname) => name::emit(encoder, cname),
            Self::LOC(loc) => loc::emit(encoder, loc),
            Self::MX(mx) => mx::emit(encoder, mx),
            Self::NS(ns) => name::emit(encoder, ns),
            Self::NULL(nil) => null::emit(encoder, nil),
            Self::OPT(opt) => opt::emit(encoder, opt),
            Self::PTR(ptr) => name::emit(encoder, ptr),
            Self::SOA(soa) => soa::emit(encoder, soa),
            Self::SRV(srv) => srv::emit(encoder, srv),
            Self::TXT(txt) => txt::emit(encoder, txt),
            #[cfg(feature = "dnssec")]
            Self::DNSSEC(rdata) => rdata.emit(encoder),
            Self::Unknown { rdata, .. } => null::emit(encoder, rdata),
            Self::ZERO => Ok(()),
        }
    }

    /// Returns the type of this RData
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A(..) => RecordType::A,
            Self::AAAA(..) => RecordType::AAAA,
            Self::CNAME(..) => RecordType::CNAME,
            Self::LOC(..) => RecordType::LOC,
            Self::MX(..) => RecordType::MX,
            Self::NS(..) => RecordType::NS,
            Self::NULL(..) => RecordType::NULL,
            Self::OPT(..) => RecordType::OPT,
            Self::PTR(..) => RecordType::PTR,
            Self::SOA(..) => RecordType::SOA,
            Self::SRV(..) => RecordType::SRV,
            Self::TXT(..) => RecordType::TXT,
            #[cfg(feature = "dnssec")]
            Self::DNSSEC(rdata) => rdata.record_type(),
            Self::Unknown { code, .. } => RecordType::Unknown(*code),
            Self::ZERO => RecordType::ZERO,
        }
    }

    /// If this is an A or AAAA record type, then an IpAddr will be returned
    pub fn ip_addr(&self) -> Option<std::net::IpAddr> {
        match self {
            Self::A(a) => Some(std::net::IpAddr::from(a.0)),
            Self::AAAA(aaaa) => Some(std::net::IpAddr::from(aaaa.0)),
            _ => None,
        }
    }

    /// The canonical wire form of the rdata for RRset ordering and signing,
    /// RFC 4034 section 6
    pub(crate) fn to_canonical_bytes(&self) -> ProtoResult<Vec<u8>> {
        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            encoder.set_canonical_names(self.record_type().is_canonicalized_in_rdata());
            self.emit(&mut encoder)?;
        }
        Ok(bytes)
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A(address) => fmt::Display::fmt(address, f),
            Self::AAAA(address) => fmt::Display::fmt(address, f),
            Self::CNAME(cname) => fmt::Display::fmt(cname, f),
            Self::LOC(loc) => fmt::Display::fmt(loc, f),
            Self::MX(mx) => fmt::Display::fmt(mx, f),
            Self::NS(ns) => fmt::Display::fmt(ns, f),
            Self::NULL(nil) => fmt::Display::fmt(nil, f),
            Self::OPT(opt) => fmt::Display::fmt(opt, f),
            Self::PTR(ptr) => fmt::Display::fmt(ptr, f),
            Self::SOA(soa) => fmt::Display::fmt(soa, f),
            Self::SRV(srv) => fmt::Display::fmt(srv, f),
            Self::TXT(txt) => fmt::Display::fmt(txt, f),
            #[cfg(feature = "dnssec")]
            Self::DNSSEC(rdata) => fmt::Display::fmt(rdata, f),
            Self::Unknown { rdata, .. } => fmt::Display::fmt(rdata, f),
            Self::ZERO => Ok(()),
        }
    }
}

/// Log a warning when rdata of an unexpected type shows up in a context that
/// expects something specific, e.g. an OPT record without OPT rdata.
pub(crate) fn warn_rdata_misuse(expected: RecordType, got: &RData) {
    if got.record_type() != expected {
        warn!(
            "unexpected rdata type, expected {expected}, got {got_type}",
            got_type = got.record_type()
        );
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::dbg_macro, clippy::print_stdout)]

    use std::str::FromStr;

    use super::*;
    use crate::rr::Name;

    fn round_trip(rdata: &RData) {
        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            rdata.emit(&mut encoder).expect("encoding failed");
        }

        let mut decoder = BinDecoder::new(&bytes);
        let read = RData::read(&mut decoder, rdata.record_type(), bytes.len() as u16)
            .expect("decoding failed");
        assert_eq!(&read, rdata);
    }

    #[test]
    fn test_rdata_round_trips() {
        round_trip(&RData::A(A::new(192, 0, 2, 1)));
        round_trip(&RData::AAAA(AAAA::from_str("2001:db8::1").unwrap()));
        round_trip(&RData::CNAME(CNAME(Name::from_str("www.example.com.").unwrap())));
        round_trip(&RData::MX(MX::new(10, Name::from_str("mx.example.com.").unwrap())));
        round_trip(&RData::NS(NS(Name::from_str("ns.example.com.").unwrap())));
        round_trip(&RData::TXT(TXT::new(vec!["abc".to_string()])));
        round_trip(&RData::Unknown {
            code: 65280,
            rdata: NULL::with(vec![1, 2, 3, 4]),
        });
    }

    #[test]
    fn test_read_validates_rdlength() {
        // an A record's rdata with a lying rdlength
        let bytes = [192_u8, 0, 2, 1];
        let mut decoder = BinDecoder::new(&bytes);
        assert!(RData::read(&mut decoder, RecordType::A, 3).is_err());
    }
}
