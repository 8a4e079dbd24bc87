// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! start of authority record defining ownership and defaults for the zone

use std::fmt;

use crate::error::ProtoResult;
use crate::rr::domain::Name;
use crate::rr::rdata::name;
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncoder};

/// [RFC 1035, DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987](https://tools.ietf.org/html/rfc1035)
///
/// ```text
/// 3.3.13. SOA RDATA format
///
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     /                     MNAME                     /
///     /                                               /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     /                     RNAME                     /
///     /                                               /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    SERIAL                     |
///     |                                               |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    REFRESH                    |
///     |                                               |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                     RETRY                     |
///     |                                               |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    EXPIRE                     |
///     |                                               |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    MINIMUM                    |
///     |                                               |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct SOA {
    mname: Name,
    rname: Name,
    serial: u32,
    refresh: u32,
    retry: u32,
    expire: u32,
    minimum: u32,
}

impl SOA {
    /// Creates a new SOA record data.
    ///
    /// # Arguments
    ///
    /// * `mname` - the name of the primary or authority for this zone.
    /// * `rname` - the name of the responsible party for this zone, e.g. an email address.
    /// * `serial` - the serial number of the zone, used for caching purposes.
    /// * `refresh` - the amount of time to wait before a zone is resynched.
    /// * `retry` - the minimum period to wait if there is a failure during refresh.
    /// * `expire` - the time until this primary is no longer authoritative for the zone.
    /// * `minimum` - no zone records should have time-to-live values less than this minimum.
    pub fn new(
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    ) -> Self {
        Self {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        }
    }

    /// The name of the primary nameserver for the zone
    pub fn mname(&self) -> &Name {
        &self.mname
    }

    /// The responsible party, e.g. `admin@example.com` as `admin.example.com`
    pub fn rname(&self) -> &Name {
        &self.rname
    }

    /// The serial of the zone
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// The refresh interval for secondaries
    pub fn refresh(&self) -> u32 {
        self.refresh
    }

    /// The retry interval on refresh failure
    pub fn retry(&self) -> u32 {
        self.retry
    }

    /// The expiry of authority on the secondary
    pub fn expire(&self) -> u32 {
        self.expire
    }

    /// The minimum (negative-caching) ttl of the zone
    pub fn minimum(&self) -> u32 {
        self.minimum
    }
}

pub(crate) fn read(decoder: &mut BinDecoder<'_>) -> ProtoResult<SOA> {
    Ok(SOA {
        mname: Name::read(decoder)?,
        rname: Name::read(decoder)?,
        serial: decoder.read_u32()?,
        refresh: decoder.read_u32()?,
        retry: decoder.read_u32()?,
        expire: decoder.read_u32()?,
        minimum: decoder.read_u32()?,
    })
}

pub(crate) fn emit(encoder: &mut BinEncoder<'_>, soa: &SOA) -> ProtoResult<()> {
    name::emit(encoder, soa.mname())?;
    name::emit(encoder, soa.rname())?;
    encoder.emit_u32(soa.serial())?;
    encoder.emit_u32(soa.refresh())?;
    encoder.emit_u32(soa.retry())?;
    encoder.emit_u32(soa.expire())?;
    encoder.emit_u32(soa.minimum())
}

impl fmt::Display for SOA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{mname} {rname} {serial} {refresh} {retry} {expire} {minimum}",
            mname = self.mname.to_ascii(),
            rname = self.rname.to_ascii(),
            serial = self.serial,
            refresh = self.refresh,
            retry = self.retry,
            expire = self.expire,
            minimum = self.minimum,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_round_trip() {
        let rdata = SOA::new(
            Name::from_str("m.example.com.").unwrap(),
            Name::from_str("admin.example.com.").unwrap(),
            1,
            2,
            3,
            4,
            5,
        );

        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            emit(&mut encoder, &rdata).unwrap();
        }

        let mut decoder = BinDecoder::new(&bytes);
        let read_rdata = read(&mut decoder).expect("decoding error");
        assert_eq!(read_rdata, rdata);
    }
}
