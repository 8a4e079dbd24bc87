// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! All record data structures and their serialization for DNSSEC

pub mod dnskey;
pub mod ds;
pub mod nsec;
pub mod nsec3;
pub mod nsec3param;
pub mod rrsig;
pub mod tsig;

use std::fmt;

use enum_as_inner::EnumAsInner;

use crate::error::{ProtoErrorKind, ProtoResult};
use crate::rr::RecordType;
use crate::serialize::binary::{BinDecoder, BinEncoder};

pub use self::dnskey::DNSKEY;
pub use self::ds::DS;
pub use self::nsec::NSEC;
pub use self::nsec3::NSEC3;
pub use self::nsec3param::NSEC3PARAM;
pub use self::rrsig::RRSIG;
pub use self::tsig::TSIG;

/// The DNSSEC subset of record data
#[derive(Debug, EnumAsInner, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum DNSSECRData {
    /// DNSKEY key material
    DNSKEY(DNSKEY),
    /// DS delegation signer
    DS(DS),
    /// NSEC authenticated denial
    NSEC(NSEC),
    /// NSEC3 hashed authenticated denial
    NSEC3(NSEC3),
    /// NSEC3 parameters
    NSEC3PARAM(NSEC3PARAM),
    /// RRSIG signature over an RRset
    RRSIG(RRSIG),
    /// TSIG transaction signature
    TSIG(TSIG),
}

impl DNSSECRData {
    pub(crate) fn read(
        decoder: &mut BinDecoder<'_>,
        record_type: RecordType,
        rdata_length: u16,
    ) -> ProtoResult<Self> {
        match record_type {
            RecordType::DNSKEY => dnskey::read(decoder, rdata_length).map(Self::DNSKEY),
            RecordType::DS => ds::read(decoder, rdata_length).map(Self::DS),
            RecordType::NSEC => nsec::read(decoder, rdata_length).map(Self::NSEC),
            RecordType::NSEC3 => nsec3::read(decoder, rdata_length).map(Self::NSEC3),
            RecordType::NSEC3PARAM => nsec3param::read(decoder).map(Self::NSEC3PARAM),
            RecordType::RRSIG => rrsig::read(decoder, rdata_length).map(Self::RRSIG),
            RecordType::TSIG => tsig::read(decoder, rdata_length).map(Self::TSIG),
            _ => Err(ProtoErrorKind::Msg(format!(
                "unexpected DNSSEC record type: {record_type}"
            ))
            .into()),
        }
    }

    pub(crate) fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()> {
        match self {
            Self::DNSKEY(dnskey) => dnskey::emit(encoder, dnskey),
            Self::DS(ds) => ds::emit(encoder, ds),
            Self::NSEC(nsec) => nsec::emit(encoder, nsec),
            Self::NSEC3(nsec3) => nsec3::emit(encoder, nsec3),
            Self::NSEC3PARAM(nsec3param) => nsec3param::emit(encoder, nsec3param),
            Self::RRSIG(rrsig) => rrsig::emit(encoder, rrsig),
            Self::TSIG(tsig) => tsig::emit(encoder, tsig),
        }
    }

    pub(crate) fn record_type(&self) -> RecordType {
        match self {
            Self::DNSKEY(..) => RecordType::DNSKEY,
            Self::DS(..) => RecordType::DS,
            Self::NSEC(..) => RecordType::NSEC,
            Self::NSEC3(..) => RecordType::NSEC3,
            Self::NSEC3PARAM(..) => RecordType::NSEC3PARAM,
            Self::RRSIG(..) => RecordType::RRSIG,
            Self::TSIG(..) => RecordType::TSIG,
        }
    }
}

impl fmt::Display for DNSSECRData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DNSKEY(dnskey) => fmt::Display::fmt(dnskey, f),
            Self::DS(ds) => fmt::Display::fmt(ds, f),
            Self::NSEC(nsec) => fmt::Display::fmt(nsec, f),
            Self::NSEC3(nsec3) => fmt::Display::fmt(nsec3, f),
            Self::NSEC3PARAM(nsec3param) => fmt::Display::fmt(nsec3param, f),
            Self::RRSIG(rrsig) => fmt::Display::fmt(rrsig, f),
            Self::TSIG(tsig) => fmt::Display::fmt(tsig, f),
        }
    }
}
