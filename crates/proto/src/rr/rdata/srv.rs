// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! service records for identifying port mapping for specific services on a host

use std::fmt;

use crate::error::ProtoResult;
use crate::rr::domain::Name;
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncoder};

/// [RFC 2782, DNS SRV RR, February 2000](https://tools.ietf.org/html/rfc2782)
///
/// ```text
/// The format of the SRV RR
///
///  _Service._Proto.Name TTL Class SRV Priority Weight Port Target
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct SRV {
    priority: u16,
    weight: u16,
    port: u16,
    target: Name,
}

impl SRV {
    /// Creates a new SRV record data
    pub fn new(priority: u16, weight: u16, port: u16, target: Name) -> Self {
        Self {
            priority,
            weight,
            port,
            target,
        }
    }

    /// The priority of this target host, lower is preferred
    pub fn priority(&self) -> u16 {
        self.priority
    }

    /// A server selection mechanism among targets with equal priority
    pub fn weight(&self) -> u16 {
        self.weight
    }

    /// The port on this target host of this service
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The domain name of the target host
    pub fn target(&self) -> &Name {
        &self.target
    }
}

pub(crate) fn read(decoder: &mut BinDecoder<'_>) -> ProtoResult<SRV> {
    Ok(SRV::new(
        decoder.read_u16()?,
        decoder.read_u16()?,
        decoder.read_u16()?,
        Name::read(decoder)?,
    ))
}

pub(crate) fn emit(encoder: &mut BinEncoder<'_>, srv: &SRV) -> ProtoResult<()> {
    encoder.emit_u16(srv.priority())?;
    encoder.emit_u16(srv.weight())?;
    encoder.emit_u16(srv.port())?;

    // post RFC 1035 type, the target is never compressed, RFC 3597
    if encoder.is_canonical_names() {
        srv.target().to_lowercase().emit_as_canonical(encoder, true)
    } else {
        srv.target().emit_as_canonical(encoder, true)
    }
}

impl fmt::Display for SRV {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{priority} {weight} {port} {target}",
            priority = self.priority,
            weight = self.weight,
            port = self.port,
            target = self.target.to_ascii(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_round_trip() {
        let rdata = SRV::new(1, 2, 443, Name::from_str("www.example.com.").unwrap());

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
