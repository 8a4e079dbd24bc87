// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Record data whose rdata is a single domain name, i.e. CNAME, NS and PTR

use std::fmt;
use std::ops::Deref;

use crate::error::ProtoResult;
use crate::rr::domain::Name;
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncoder};

macro_rules! name_rdata {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, PartialEq, Eq, Hash, Clone)]
        pub struct $name(pub Name);

        impl Deref for $name {
            type Target = Name;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.to_ascii())
            }
        }
    };
}

name_rdata!(CNAME, "The canonical name record, RFC 1035");
name_rdata!(NS, "An authoritative name server record, RFC 1035");
name_rdata!(PTR, "A domain name pointer, RFC 1035");

/// Read a single domain name rdata from the decoder
pub(crate) fn read(decoder: &mut BinDecoder<'_>) -> ProtoResult<Name> {
    Name::read(decoder)
}

/// Write a single domain name rdata
///
/// These are the well-known RFC 1035 types: the name may be compressed, and is
/// lowercased in the DNSSEC canonical form.
pub(crate) fn emit(encoder: &mut BinEncoder<'_>, name: &Name) -> ProtoResult<()> {
    let lowercase = encoder.is_canonical_names();
    name.emit_with_lowercase(encoder, lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::binary::BinDecodable;
    use std::str::FromStr;

    #[test]
    fn test_round_trip() {
        let name = Name::from_str("WWW.example.com.").unwrap();

        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            emit(&mut encoder, &name).unwrap();
        }

        let mut decoder = BinDecoder::new(&bytes);
        let read = Name::read(&mut decoder).unwrap();
        // case is preserved outside of canonical form
        assert!(read.eq_case(&name));
    }

    #[test]
    fn test_canonical_lowercases() {
        let name = Name::from_str("WWW.example.com.").unwrap();

        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            encoder.set_canonical_names(true);
            emit(&mut encoder, &name).unwrap();
        }

        let mut decoder = BinDecoder::new(&bytes);
        let read = Name::read(&mut decoder).unwrap();
        assert!(read.eq_case(&name.to_lowercase()));
    }
}
