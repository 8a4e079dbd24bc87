// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! public key record data for signing zone records

use data_encoding::BASE64;

use crate::rr::dnssec::rdata::DNSKEY;
use crate::rr::dnssec::Algorithm;
use crate::serialize::txt::errors::{ParseError, ParseErrorKind, ParseResult};
use crate::serialize::txt::rdata_parsers::{concat_remaining, next_field};
use crate::serialize::txt::Tok;

/// Parse the RData from a set of tokens: `Flags Protocol Algorithm PublicKey`
///
/// The key material may be split over any number of tokens.
pub(crate) fn parse(tokens: &[Tok]) -> ParseResult<DNSKEY> {
    let mut tokens = tokens.iter();

    let flags = next_field(&mut tokens, "DNSKEY flags")?.u16("DNSKEY flags")?;

    let protocol = next_field(&mut tokens, "DNSKEY protocol")?;
    if protocol.u8("DNSKEY protocol")? != 3 {
        return Err(protocol.bad("DNSKEY protocol"));
    }

    let algorithm = next_field(&mut tokens, "DNSKEY algorithm")?.u8("DNSKEY algorithm")?;

    let key = concat_remaining(&mut tokens);
    if key.is_empty() {
        return Err(ParseError::from(ParseErrorKind::MissingToken(
            "DNSKEY public key",
        )));
    }
    let public_key = BASE64.decode(key.as_bytes())?;

    Ok(DNSKEY::from_flags(
        flags,
        Algorithm::from_u8(algorithm),
        public_key,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::txt::Pos;

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
    fn test_parse() {
        let dnskey = parse(&toks("256 3 5 AQAB")).unwrap();
        assert_eq!(dnskey.flags(), 256);
        assert_eq!(dnskey.algorithm(), Algorithm::RSASHA1);
        assert_eq!(dnskey.public_key(), &[1, 0, 1]);
    }

    #[test]
    fn test_split_key_material() {
        // key split over tokens, e.g. from a parenthesized multi line form
        let dnskey = parse(&toks("257 3 14 AQ AB")).unwrap();
        assert_eq!(dnskey.public_key(), &[1, 0, 1]);
    }

    #[test]
    fn test_bad_protocol() {
        assert!(parse(&toks("256 2 5 AQAB")).is_err());
    }
}
