// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! All defined response codes in DNS

use std::fmt;

/// The status code of the response to a query.
///
/// [RFC 1035, DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987](https://tools.ietf.org/html/rfc1035)
///
/// The 4-bit RCODE of the header is extended by 8 high bits carried in the
/// EDNS OPT TTL field, RFC 6891.
#[derive(Debug, Default, Eq, PartialEq, PartialOrd, Ord, Hash, Copy, Clone)]
#[non_exhaustive]
pub enum ResponseCode {
    /// No Error [RFC 1035](https://tools.ietf.org/html/rfc1035)
    #[default]
    NoError,
    /// Format Error [RFC 1035](https://tools.ietf.org/html/rfc1035)
    FormErr,
    /// Server Failure [RFC 1035](https://tools.ietf.org/html/rfc1035)
    ServFail,
    /// Non-Existent Domain [RFC 1035](https://tools.ietf.org/html/rfc1035)
    NXDomain,
    /// Not Implemented [RFC 1035](https://tools.ietf.org/html/rfc1035)
    NotImp,
    /// Query Refused [RFC 1035](https://tools.ietf.org/html/rfc1035)
    Refused,
    /// Name Exists when it should not [RFC 2136](https://tools.ietf.org/html/rfc2136)
    YXDomain,
    /// RR Set Exists when it should not [RFC 2136](https://tools.ietf.org/html/rfc2136)
    YXRRSet,
    /// RR Set that should exist does not [RFC 2136](https://tools.ietf.org/html/rfc2136)
    NXRRSet,
    /// Server Not Authoritative for zone [RFC 2136](https://tools.ietf.org/html/rfc2136)
    /// or Not Authorized [RFC 8945](https://tools.ietf.org/html/rfc8945)
    NotAuth,
    /// Name not contained in zone [RFC 2136](https://tools.ietf.org/html/rfc2136)
    NotZone,
    /// Bad OPT Version [RFC 6891](https://tools.ietf.org/html/rfc6891#section-9)
    BADVERS,
    /// TSIG Signature Failure [RFC 8945](https://tools.ietf.org/html/rfc8945)
    BADSIG,
    /// Key not recognized [RFC 8945](https://tools.ietf.org/html/rfc8945)
    BADKEY,
    /// Signature out of time window [RFC 8945](https://tools.ietf.org/html/rfc8945)
    BADTIME,
    /// Unknown or unsupported response code
    Unknown(u16),
}

impl ResponseCode {
    /// returns the lower 4 bits of the response code (for the header)
    pub fn low(self) -> u8 {
        (u16::from(self) & 0x000F) as u8
    }

    /// returns the high 8 bits for the EDNS portion of the response code
    pub fn high(self) -> u8 {
        ((u16::from(self) & 0x0FF0) >> 4) as u8
    }

    /// Combines the EDNS high and the header low bits into the response code
    ///
    /// # Arguments
    ///
    /// * `high` - the high bits from the EDNS record
    /// * `low` - the low bits from the message header
    pub fn from(high: u8, low: u8) -> Self {
        ((u16::from(high) << 4) | (u16::from(low) & 0x000F)).into()
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoError => "NoError",
            Self::FormErr => "FormErr",
            Self::ServFail => "ServFail",
            Self::NXDomain => "NXDomain",
            Self::NotImp => "NotImp",
            Self::Refused => "Refused",
            Self::YXDomain => "YXDomain",
            Self::YXRRSet => "YXRRSet",
            Self::NXRRSet => "NXRRSet",
            Self::NotAuth => "NotAuth",
            Self::NotZone => "NotZone",
            Self::BADVERS => "BADVERS",
            Self::BADSIG => "BADSIG",
            Self::BADKEY => "BADKEY",
            Self::BADTIME => "BADTIME",
            Self::Unknown(_) => "Unknown",
        };

        f.write_str(s)
    }
}

impl From<ResponseCode> for u16 {
    fn from(rt: ResponseCode) -> Self {
        match rt {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NXDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::YXDomain => 6,
            ResponseCode::YXRRSet => 7,
            ResponseCode::NXRRSet => 8,
            ResponseCode::NotAuth => 9,
            ResponseCode::NotZone => 10,
            ResponseCode::BADVERS => 16,
            ResponseCode::BADSIG => 16,
            ResponseCode::BADKEY => 17,
            ResponseCode::BADTIME => 18,
            ResponseCode::Unknown(code) => code,
        }
    }
}

impl From<u16> for ResponseCode {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::NoError,
            1 => Self::FormErr,
            2 => Self::ServFail,
            3 => Self::NXDomain,
            4 => Self::NotImp,
            5 => Self::Refused,
            6 => Self::YXDomain,
            7 => Self::YXRRSet,
            8 => Self::NXRRSet,
            9 => Self::NotAuth,
            10 => Self::NotZone,
            // BADVERS and BADSIG share 16, the context distinguishes them; BADVERS is
            // the only one that appears in a header + OPT combination.
            16 => Self::BADVERS,
            17 => Self::BADKEY,
            18 => Self::BADTIME,
            _ => Self::Unknown(value),
        }
    }
}
