// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! IPv6 address record data
//!
//! [RFC 3596, DNS Extensions to Support IPv6, October 2003](https://tools.ietf.org/html/rfc3596)
//!
//! ```text
//! 2.2 AAAA data format
//!
//!    A 128 bit IPv6 address is encoded in the data portion of an AAAA
//!    resource record in network byte order (high-order byte first).
//! ```
use std::fmt;
use std::net::Ipv6Addr;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::{ProtoError, ProtoResult};
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncodable, BinEncoder};

/// The AAAA record type, an IPv6 address
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct AAAA(pub Ipv6Addr);

impl Deref for AAAA {
    type Target = Ipv6Addr;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Ipv6Addr> for AAAA {
    fn from(aaaa: Ipv6Addr) -> Self {
        Self(aaaa)
    }
}

impl From<AAAA> for Ipv6Addr {
    fn from(aaaa: AAAA) -> Self {
        aaaa.0
    }
}

impl FromStr for AAAA {
    type Err = ProtoError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv6Addr::from_str(s)
            .map(Self)
            .map_err(|e| ProtoError::from(format!("invalid IPv6 address: {e}")))
    }
}

impl BinEncodable for AAAA {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()> {
        self.0.emit(encoder)
    }
}

impl<'r> BinDecodable<'r> for AAAA {
    fn read(decoder: &mut BinDecoder<'r>) -> ProtoResult<Self> {
        Ipv6Addr::read(decoder).map(Self)
    }
}

impl fmt::Display for AAAA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let rdata = AAAA::from_str("::1").unwrap();
        let bytes = rdata.to_bytes().unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(AAAA::from_bytes(&bytes).unwrap(), rdata);
        assert_eq!(rdata.to_string(), "::1");
    }
}
