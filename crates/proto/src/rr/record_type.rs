// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! record type definitions

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::{ProtoError, ProtoErrorKind, ProtoResult};
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncodable, BinEncoder};

/// The type of the resource record.
///
/// This is the registry of supported record types; it is bijective with both
/// the numeric type code and the mnemonic string, where unassigned codes map
/// through `Unknown` and the RFC 3597 `TYPE<n>` mnemonic.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[allow(dead_code)]
#[non_exhaustive]
pub enum RecordType {
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) IPv4 Address record
    A,
    /// [RFC 3596](https://tools.ietf.org/html/rfc3596) IPv6 address record
    AAAA,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) All cached records, aka ANY
    ANY,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Authoritative Zone Transfer
    AXFR,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Canonical name record
    CNAME,
    /// [RFC 4034](https://tools.ietf.org/html/rfc4034) DNS Key record
    DNSKEY,
    /// [RFC 4034](https://tools.ietf.org/html/rfc4034) Delegation signer
    DS,
    /// [RFC 1996](https://tools.ietf.org/html/rfc1996) Incremental Zone Transfer
    IXFR,
    /// [RFC 1876](https://tools.ietf.org/html/rfc1876) Location record
    LOC,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Mail exchange record
    MX,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Name server record
    NS,
    /// [RFC 4034](https://tools.ietf.org/html/rfc4034) Next-Secure record
    NSEC,
    /// [RFC 5155](https://tools.ietf.org/html/rfc5155) NSEC record version 3
    NSEC3,
    /// [RFC 5155](https://tools.ietf.org/html/rfc5155) NSEC3 parameters
    NSEC3PARAM,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Null server record, for testing
    NULL,
    /// [RFC 6891](https://tools.ietf.org/html/rfc6891) Option
    OPT,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Pointer record
    PTR,
    /// [RFC 4034](https://tools.ietf.org/html/rfc4034) DNSSEC signature
    RRSIG,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) and [RFC 2308](https://tools.ietf.org/html/rfc2308) Start of [a zone of] authority record
    SOA,
    /// [RFC 2782](https://tools.ietf.org/html/rfc2782) Service locator
    SRV,
    /// [RFC 8945](https://tools.ietf.org/html/rfc8945) Transaction Signature
    TSIG,
    /// [RFC 1035](https://tools.ietf.org/html/rfc1035) Text record
    TXT,
    /// Unknown Record type, or unsupported
    Unknown(u16),
    /// This corresponds to a record type of 0, unspecified
    ZERO,
}

impl RecordType {
    /// Returns true if this is an ANY
    #[inline]
    pub fn is_any(self) -> bool {
        self == Self::ANY
    }

    /// Returns true if this is a SOA
    #[inline]
    pub fn is_soa(self) -> bool {
        self == Self::SOA
    }

    /// Returns true if this is an A or an AAAA record
    #[inline]
    pub fn is_ip_addr(self) -> bool {
        matches!(self, Self::A | Self::AAAA)
    }

    /// Returns true if this is a DNSSEC RecordType
    #[inline]
    pub fn is_dnssec(self) -> bool {
        matches!(
            self,
            Self::DNSKEY | Self::DS | Self::NSEC | Self::NSEC3 | Self::NSEC3PARAM | Self::RRSIG
        )
    }

    /// Per [RFC 4034 section 6.2](https://tools.ietf.org/html/rfc4034#section-6.2), DNS
    /// names in the RDATA of these types are lowercased in the DNSSEC canonical form.
    /// For all other types, the RDATA is left untouched.
    #[inline]
    pub(crate) fn is_canonicalized_in_rdata(self) -> bool {
        matches!(
            self,
            Self::CNAME
                | Self::MX
                | Self::NS
                | Self::NSEC
                | Self::PTR
                | Self::RRSIG
                | Self::SOA
                | Self::SRV
        )
    }

    /// Names in the RDATA of the well-known RFC 1035 types may be compressed on the wire;
    /// RFC 3597 forbids compression in the RDATA of anything newer.
    #[inline]
    pub(crate) fn allows_compression_in_rdata(self) -> bool {
        matches!(
            self,
            Self::CNAME | Self::MX | Self::NS | Self::PTR | Self::SOA
        )
    }
}

impl FromStr for RecordType {
    type Err = ProtoError;

    /// Convert `&str` to `RecordType`
    ///
    /// ```
    /// use std::str::FromStr;
    /// use juniper_proto::rr::record_type::RecordType;
    ///
    /// let var: RecordType = RecordType::from_str("A").unwrap();
    /// assert_eq!(RecordType::A, var);
    /// ```
    fn from_str(str: &str) -> ProtoResult<Self> {
        match str {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::AAAA),
            "AXFR" => Ok(Self::AXFR),
            "CNAME" => Ok(Self::CNAME),
            "DNSKEY" => Ok(Self::DNSKEY),
            "DS" => Ok(Self::DS),
            "IXFR" => Ok(Self::IXFR),
            "LOC" => Ok(Self::LOC),
            "MX" => Ok(Self::MX),
            "NS" => Ok(Self::NS),
            "NSEC" => Ok(Self::NSEC),
            "NSEC3" => Ok(Self::NSEC3),
            "NSEC3PARAM" => Ok(Self::NSEC3PARAM),
            "NULL" => Ok(Self::NULL),
            "OPT" => Ok(Self::OPT),
            "PTR" => Ok(Self::PTR),
            "RRSIG" => Ok(Self::RRSIG),
            "SOA" => Ok(Self::SOA),
            "SRV" => Ok(Self::SRV),
            "TSIG" => Ok(Self::TSIG),
            "TXT" => Ok(Self::TXT),
            "ANY" | "*" => Ok(Self::ANY),
            // RFC 3597 generic mnemonic, e.g. TYPE65534
            _ if str.len() > 4 && str.starts_with("TYPE") => str[4..]
                .parse::<u16>()
                .map(Self::from)
                .map_err(|_| ProtoErrorKind::UnknownRecordTypeStr(str.to_string()).into()),
            _ => Err(ProtoErrorKind::UnknownRecordTypeStr(str.to_string()).into()),
        }
    }
}

impl From<u16> for RecordType {
    /// Convert from `u16` to `RecordType`
    ///
    /// ```
    /// use juniper_proto::rr::record_type::RecordType;
    ///
    /// let var = RecordType::from(1);
    /// assert_eq!(RecordType::A, var);
    /// ```
    fn from(value: u16) -> Self {
        match value {
            0 => Self::ZERO,
            1 => Self::A,
            2 => Self::NS,
            5 => Self::CNAME,
            6 => Self::SOA,
            10 => Self::NULL,
            12 => Self::PTR,
            15 => Self::MX,
            16 => Self::TXT,
            29 => Self::LOC,
            33 => Self::SRV,
            41 => Self::OPT,
            43 => Self::DS,
            46 => Self::RRSIG,
            47 => Self::NSEC,
            48 => Self::DNSKEY,
            50 => Self::NSEC3,
            51 => Self::NSEC3PARAM,
            250 => Self::TSIG,
            251 => Self::IXFR,
            252 => Self::AXFR,
            255 => Self::ANY,
            // all unknown record types
            _ => Self::Unknown(value),
        }
    }
}

impl From<RecordType> for u16 {
    /// Convert from `RecordType` to `u16`
    ///
    /// ```
    /// use juniper_proto::rr::record_type::RecordType;
    ///
    /// let var: u16 = RecordType::A.into();
    /// assert_eq!(1, var);
    /// ```
    fn from(rt: RecordType) -> Self {
        match rt {
            RecordType::ZERO => 0,
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::NULL => 10,
            RecordType::PTR => 12,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::LOC => 29,
            RecordType::SRV => 33,
            RecordType::OPT => 41,
            RecordType::DS => 43,
            RecordType::RRSIG => 46,
            RecordType::NSEC => 47,
            RecordType::DNSKEY => 48,
            RecordType::NSEC3 => 50,
            RecordType::NSEC3PARAM => 51,
            RecordType::TSIG => 250,
            RecordType::IXFR => 251,
            RecordType::AXFR => 252,
            RecordType::ANY => 255,
            RecordType::Unknown(code) => code,
        }
    }
}

impl BinEncodable for RecordType {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()> {
        encoder.emit_u16((*self).into())
    }
}

impl<'r> BinDecodable<'r> for RecordType {
    fn read(decoder: &mut BinDecoder<'r>) -> ProtoResult<Self> {
        Ok(Self::from(decoder.read_u16()?))
    }
}

impl PartialOrd<Self> for RecordType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RecordType {
    fn cmp(&self, other: &Self) -> Ordering {
        u16::from(*self).cmp(&u16::from(*other))
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Self::A => f.write_str("A"),
            Self::AAAA => f.write_str("AAAA"),
            Self::ANY => f.write_str("ANY"),
            Self::AXFR => f.write_str("AXFR"),
            Self::CNAME => f.write_str("CNAME"),
            Self::DNSKEY => f.write_str("DNSKEY"),
            Self::DS => f.write_str("DS"),
            Self::IXFR => f.write_str("IXFR"),
            Self::LOC => f.write_str("LOC"),
            Self::MX => f.write_str("MX"),
            Self::NS => f.write_str("NS"),
            Self::NSEC => f.write_str("NSEC"),
            Self::NSEC3 => f.write_str("NSEC3"),
            Self::NSEC3PARAM => f.write_str("NSEC3PARAM"),
            Self::NULL => f.write_str("NULL"),
            Self::OPT => f.write_str("OPT"),
            Self::PTR => f.write_str("PTR"),
            Self::RRSIG => f.write_str("RRSIG"),
            Self::SOA => f.write_str("SOA"),
            Self::SRV => f.write_str("SRV"),
            Self::TSIG => f.write_str("TSIG"),
            Self::TXT => f.write_str("TXT"),
            Self::Unknown(code) => write!(f, "TYPE{code}"),
            Self::ZERO => f.write_str("ZERO"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_bijection() {
        for code in [1_u16, 2, 5, 6, 10, 12, 15, 16, 29, 33, 41, 43, 46, 47, 48, 50, 51, 250] {
            let rt = RecordType::from(code);
            assert_ne!(rt, RecordType::Unknown(code));
            assert_eq!(u16::from(rt), code);

            let name = rt.to_string();
            assert_eq!(RecordType::from_str(&name).unwrap(), rt);
        }
    }

    #[test]
    fn test_generic_type_mnemonic() {
        assert_eq!(
            RecordType::from_str("TYPE65534").unwrap(),
            RecordType::Unknown(65534)
        );
        assert_eq!(RecordType::Unknown(65534).to_string(), "TYPE65534");
        // TYPE mnemonics of registered codes collapse into the registered type
        assert_eq!(RecordType::from_str("TYPE1").unwrap(), RecordType::A);
        assert!(RecordType::from_str("AAP").is_err());
        assert!(RecordType::from_str("TYPEX").is_err());
    }
}
