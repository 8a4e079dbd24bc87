// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! record data parsing dispatch, tokens into `RData` per record type

#[cfg(feature = "dnssec")]
use crate::rr::dnssec::rdata::DNSSECRData;
use crate::rr::{
    rdata::{CNAME, NS, PTR},
    Name, RData, RecordType,
};
use crate::serialize::txt::errors::{ParseError, ParseResult};
use crate::serialize::txt::rdata_parsers::*;
use crate::serialize::txt::Tok;

/// Attempts to parse a slice of tokens into the RData of the specified record type.
///
/// This is the text side of the per-type dispatch table: every record type
/// pairs one token parser here with its wire codec in `RData`.
pub(crate) fn parse(
    record_type: RecordType,
    tokens: &[Tok],
    origin: Option<&Name>,
) -> ParseResult<RData> {
    // any record type may carry the RFC 3597 generic form
    if tokens.first().map_or(false, |t| t.text == "\\#") {
        let rdata = unknown::parse(tokens)?;
        return Ok(RData::Unknown {
            code: record_type.into(),
            rdata,
        });
    }

    let rdata = match record_type {
        RecordType::A => RData::A(a::parse(tokens)?),
        RecordType::AAAA => RData::AAAA(aaaa::parse(tokens)?),
        RecordType::ANY => return Err(ParseError::from("parsing ANY doesn't make sense")),
        RecordType::AXFR => return Err(ParseError::from("parsing AXFR doesn't make sense")),
        RecordType::CNAME => RData::CNAME(CNAME(name::parse(tokens, origin, "CNAME target")?)),
        #[cfg(feature = "dnssec")]
        RecordType::DNSKEY => RData::DNSSEC(DNSSECRData::DNSKEY(dnskey::parse(tokens)?)),
        #[cfg(feature = "dnssec")]
        RecordType::DS => RData::DNSSEC(DNSSECRData::DS(ds::parse(tokens)?)),
        RecordType::IXFR => return Err(ParseError::from("parsing IXFR doesn't make sense")),
        RecordType::LOC => RData::LOC(loc::parse(tokens)?),
        RecordType::MX => RData::MX(mx::parse(tokens, origin)?),
        RecordType::NS => RData::NS(NS(name::parse(tokens, origin, "NS nameserver")?)),
        #[cfg(feature = "dnssec")]
        RecordType::NSEC => RData::DNSSEC(DNSSECRData::NSEC(nsec::parse(tokens, origin)?)),
        #[cfg(feature = "dnssec")]
        RecordType::NSEC3 => RData::DNSSEC(DNSSECRData::NSEC3(nsec3::parse(tokens)?)),
        #[cfg(feature = "dnssec")]
        RecordType::NSEC3PARAM => {
            RData::DNSSEC(DNSSECRData::NSEC3PARAM(nsec3param::parse(tokens)?))
        }
        RecordType::NULL => RData::NULL(unknown::parse(tokens)?),
        RecordType::OPT => return Err(ParseError::from("parsing OPT doesn't make sense")),
        RecordType::PTR => RData::PTR(PTR(name::parse(tokens, origin, "PTR target")?)),
        #[cfg(feature = "dnssec")]
        RecordType::RRSIG => RData::DNSSEC(DNSSECRData::RRSIG(rrsig::parse(tokens, origin)?)),
        RecordType::SOA => RData::SOA(soa::parse(tokens, origin)?),
        RecordType::SRV => RData::SRV(srv::parse(tokens, origin)?),
        RecordType::TSIG => return Err(ParseError::from("TSIG is only used on the wire")),
        RecordType::TXT => RData::TXT(txt::parse(tokens)?),
        RecordType::ZERO => RData::ZERO,
        r => {
            return Err(ParseError::from(format!(
                "unsupported record type for parsing: {r}"
            )))
        }
    };

    Ok(rdata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::txt::Pos;
    use std::str::FromStr;

    fn toks(line: &str) -> Vec<Tok> {
        line.split_whitespace()
            .map(|text| Tok {
                text: text.to_string(),
                quoted: false,
                pos: Pos { line: 1, col: 1 },
            })
            .collect()
    }

    #[test]
    fn test_a() {
        let rdata = parse(RecordType::A, &toks("192.168.0.1"), None).unwrap();
        assert_eq!(rdata.to_string(), "192.168.0.1");
    }

    #[test]
    fn test_generic_rdata_any_type() {
        let rdata = parse(RecordType::Unknown(65280), &toks("\\# 4 0a000001"), None).unwrap();
        assert_eq!(rdata.record_type(), RecordType::Unknown(65280));
        assert_eq!(rdata.to_string(), "\\# 4 0a000001");
    }

    #[test]
    fn test_relative_names_qualified() {
        let origin = Name::from_str("miek.nl.").unwrap();
        let rdata = parse(RecordType::NS, &toks("b"), Some(&origin)).unwrap();
        assert_eq!(rdata.to_string(), "b.miek.nl.");
    }

    #[test]
    fn test_meta_types_refused() {
        assert!(parse(RecordType::ANY, &toks("x"), None).is_err());
        assert!(parse(RecordType::OPT, &toks("x"), None).is_err());
        assert!(parse(RecordType::AXFR, &toks("x"), None).is_err());
    }
}
