// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Binary serialization types

mod decoder;
mod encoder;

use std::net::{Ipv4Addr, Ipv6Addr};

pub use self::decoder::BinDecoder;
pub use self::encoder::{BinEncoder, EncodeMode, Place};

use crate::error::ProtoResult;

/// A type which can be encoded into the DNS binary format
pub trait BinEncodable {
    /// Write the type to the stream
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()>;

    /// Returns the object in binary form
    fn to_bytes(&self) -> ProtoResult<Vec<u8>> {
        let mut bytes = Vec::<u8>::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            self.emit(&mut encoder)?;
        }

        Ok(bytes)
    }
}

/// A trait for types which are serializable to and from the DNS binary format
pub trait BinDecodable<'r>: Sized {
    /// Read the type from the stream
    fn read(decoder: &mut BinDecoder<'r>) -> ProtoResult<Self>;

    /// Returns the object from its binary form
    fn from_bytes(bytes: &'r [u8]) -> ProtoResult<Self> {
        let mut decoder = BinDecoder::new(bytes);
        Self::read(&mut decoder)
    }
}

impl BinEncodable for u16 {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()> {
        encoder.emit_u16(*self)
    }
}

impl<'r> BinDecodable<'r> for u16 {
    fn read(decoder: &mut BinDecoder<'r>) -> ProtoResult<Self> {
        decoder.read_u16()
    }
}

impl BinEncodable for u32 {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()> {
        encoder.emit_u32(*self)
    }
}

impl<'r> BinDecodable<'r> for u32 {
    fn read(decoder: &mut BinDecoder<'r>) -> ProtoResult<Self> {
        decoder.read_u32()
    }
}

impl BinEncodable for Ipv4Addr {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()> {
        encoder.emit_vec(&self.octets())
    }
}

impl<'r> BinDecodable<'r> for Ipv4Addr {
    fn read(decoder: &mut BinDecoder<'r>) -> ProtoResult<Self> {
        let bytes = decoder.read_slice(4)?;
        Ok(Self::new(bytes[0], bytes[1], bytes[2], bytes[3]))
    }
}

impl BinEncodable for Ipv6Addr {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()> {
        encoder.emit_vec(&self.octets())
    }
}

impl<'r> BinDecodable<'r> for Ipv6Addr {
    fn read(decoder: &mut BinDecoder<'r>) -> ProtoResult<Self> {
        let bytes = decoder.read_slice(16)?;
        let mut octets = [0_u8; 16];
        octets.copy_from_slice(bytes);
        Ok(Self::from(octets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<T>(data: T)
    where
        T: BinEncodable + for<'r> BinDecodable<'r> + PartialEq + std::fmt::Debug,
    {
        let bytes = data.to_bytes().expect("encoding failed");
        let got = T::from_bytes(&bytes).expect("decoding failed");
        assert_eq!(got, data);
    }

    #[test]
    fn test_ints() {
        round_trip(0xCAFE_u16);
        round_trip(0xDEAD_BEEF_u32);
    }

    #[test]
    fn test_ip_addrs() {
        round_trip("192.168.0.1".parse::<Ipv4Addr>().unwrap());
        round_trip("2001:db8::1".parse::<Ipv6Addr>().unwrap());
    }
}
