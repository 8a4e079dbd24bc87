// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! location record for describing the physical location of a host

use std::fmt;

use crate::error::ProtoResult;
use crate::serialize::binary::{BinDecoder, BinEncoder};

/// [RFC 1876, A Means for Expressing Location Information in the DNS, January 1996](https://tools.ietf.org/html/rfc1876)
///
/// ```text
/// 2. RDATA Format
///
///        MSB                                           LSB
///        +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///       0|        VERSION        |         SIZE          |
///        +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///       2|       HORIZ PRE       |       VERT PRE        |
///        +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///       4|                   LATITUDE                    |
///        +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///       8|                   LONGITUDE                   |
///        +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///      12|                   ALTITUDE                    |
///        +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// LATITUDE and LONGITUDE are thousandths of a second of arc offset from
/// 2^31; ALTITUDE is centimeters above a base 100000m below the WGS 84
/// reference spheroid; SIZE and the precisions are exponent-coded
/// centimeter values, `mantissa << 4 | exponent`.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct LOC {
    version: u8,
    size: u8,
    horiz_pre: u8,
    vert_pre: u8,
    latitude: u32,
    longitude: u32,
    altitude: u32,
}

/// 2^31, the equator and the prime meridian
const MID: u32 = 0x8000_0000;
/// altitude base, centimeters below the reference spheroid
const ALT_BASE: i64 = 10_000_000;

/// default SIZE, 1m
pub(crate) const DEFAULT_SIZE: u8 = 0x12;
/// default HORIZ PRE, 10,000m
pub(crate) const DEFAULT_HORIZ_PRE: u8 = 0x16;
/// default VERT PRE, 10m
pub(crate) const DEFAULT_VERT_PRE: u8 = 0x13;

impl LOC {
    /// Construct a LOC from the raw wire fields
    pub fn new(
        version: u8,
        size: u8,
        horiz_pre: u8,
        vert_pre: u8,
        latitude: u32,
        longitude: u32,
        altitude: u32,
    ) -> Self {
        Self {
            version,
            size,
            horiz_pre,
            vert_pre,
            latitude,
            longitude,
            altitude,
        }
    }

    /// Version, always 0
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Diameter of the enclosing sphere, exponent coded centimeters
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Horizontal precision, exponent coded centimeters
    pub fn horiz_pre(&self) -> u8 {
        self.horiz_pre
    }

    /// Vertical precision, exponent coded centimeters
    pub fn vert_pre(&self) -> u8 {
        self.vert_pre
    }

    /// Latitude, thousandths of a second of arc offset from 2^31, north positive
    pub fn latitude(&self) -> u32 {
        self.latitude
    }

    /// Longitude, thousandths of a second of arc offset from 2^31, east positive
    pub fn longitude(&self) -> u32 {
        self.longitude
    }

    /// Altitude, centimeters above the -100000m base
    pub fn altitude(&self) -> u32 {
        self.altitude
    }
}

pub(crate) fn read(decoder: &mut BinDecoder<'_>) -> ProtoResult<LOC> {
    Ok(LOC {
        version: decoder.read_u8()?,
        size: decoder.read_u8()?,
        horiz_pre: decoder.read_u8()?,
        vert_pre: decoder.read_u8()?,
        latitude: decoder.read_u32()?,
        longitude: decoder.read_u32()?,
        altitude: decoder.read_u32()?,
    })
}

pub(crate) fn emit(encoder: &mut BinEncoder<'_>, loc: &LOC) -> ProtoResult<()> {
    encoder.emit_u8(loc.version)?;
    encoder.emit_u8(loc.size)?;
    encoder.emit_u8(loc.horiz_pre)?;
    encoder.emit_u8(loc.vert_pre)?;
    encoder.emit_u32(loc.latitude)?;
    encoder.emit_u32(loc.longitude)?;
    encoder.emit_u32(loc.altitude)
}

/// Encode a centimeter value into the exponent form, `mantissa << 4 | exponent`
pub(crate) fn encode_precision(mut cm: u64) -> u8 {
    let mut exponent = 0_u8;
    while cm >= 10 && exponent < 9 {
        cm /= 10;
        exponent += 1;
    }
    ((cm as u8) << 4) | exponent
}

fn decode_precision(coded: u8) -> u64 {
    let mantissa = u64::from(coded >> 4);
    let exponent = u32::from(coded & 0x0F);
    mantissa * 10_u64.pow(exponent.min(9))
}

fn write_meters_from_cm(f: &mut fmt::Formatter<'_>, cm: i64) -> fmt::Result {
    let sign = if cm < 0 { "-" } else { "" };
    let cm = cm.unsigned_abs();
    write!(f, "{sign}{}.{:02}m", cm / 100, cm % 100)
}

fn write_arc(f: &mut fmt::Formatter<'_>, offset: u32, pos: char, neg: char) -> fmt::Result {
    let (mut ms, hemisphere) = if offset >= MID {
        (offset - MID, pos)
    } else {
        (MID - offset, neg)
    };

    let degrees = ms / 3_600_000;
    ms %= 3_600_000;
    let minutes = ms / 60_000;
    ms %= 60_000;

    write!(
        f,
        "{degrees:02} {minutes:02} {}.{:03} {hemisphere}",
        ms / 1000,
        ms % 1000
    )
}

impl fmt::Display for LOC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_arc(f, self.latitude, 'N', 'S')?;
        write!(f, " ")?;
        write_arc(f, self.longitude, 'E', 'W')?;
        write!(f, " ")?;
        write_meters_from_cm(f, i64::from(self.altitude) - ALT_BASE)?;
        write!(f, " ")?;
        write_meters_from_cm(f, decode_precision(self.size) as i64)?;
        write!(f, " ")?;
        write_meters_from_cm(f, decode_precision(self.horiz_pre) as i64)?;
        write!(f, " ")?;
        write_meters_from_cm(f, decode_precision(self.vert_pre) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let rdata = LOC::new(
            0,
            DEFAULT_SIZE,
            DEFAULT_HORIZ_PRE,
            DEFAULT_VERT_PRE,
            MID + ((51 * 3600 + 30 * 60) * 1000 + 12_748),
            MID - ((7 * 60) * 1000 + 39_611),
            ALT_BASE as u32,
        );

        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            emit(&mut encoder, &rdata).unwrap();
        }
        assert_eq!(bytes.len(), 16);

        let mut decoder = BinDecoder::new(&bytes);
        let read_rdata = read(&mut decoder).expect("decoding error");
        assert_eq!(read_rdata, rdata);

        assert_eq!(
            rdata.to_string(),
            "51 30 12.748 N 00 07 39.611 W 0.00m 1.00m 10000.00m 10.00m"
        );
    }

    #[test]
    fn test_precision_coding() {
        assert_eq!(encode_precision(0), 0x00);
        assert_eq!(encode_precision(100), 0x12);
        assert_eq!(encode_precision(1_000_000), 0x16);
        assert_eq!(decode_precision(0x12), 100);
        assert_eq!(decode_precision(0x16), 1_000_000);
    }

    #[test]
    fn test_zero_minute_latitude() {
        let rdata = LOC::new(
            0,
            0,
            0,
            0,
            MID + 51 * 3_600_000,
            MID - ((7 * 60) * 1000 + 39_611),
            ALT_BASE as u32,
        );

        assert_eq!(
            rdata.to_string(),
            "51 00 0.000 N 00 07 39.611 W 0.00m 0.00m 0.00m 0.00m"
        );
    }
}
