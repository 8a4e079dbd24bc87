// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! NSEC authenticated denial record

use crate::rr::dnssec::rdata::NSEC;
use crate::rr::Name;
use crate::serialize::txt::errors::ParseResult;
use crate::serialize::txt::rdata_parsers::next_field;
use crate::serialize::txt::Tok;

/// Parse the RData from a set of tokens: `NextDomainName Type1 Type2 ...`
pub(crate) fn parse(tokens: &[Tok], origin: Option<&Name>) -> ParseResult<NSEC> {
    let mut tokens = tokens.iter();

    let next_domain_name =
        next_field(&mut tokens, "NSEC next domain name")?.name(origin, "NSEC next domain name")?;

    let mut type_bit_maps = Vec::new();
    for token in tokens {
        type_bit_maps.push(token.record_type("NSEC type bitmap")?);
    }

    Ok(NSEC::new(next_domain_name, type_bit_maps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rr::RecordType;
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
        let nsec = parse(&toks("miek.nl. TXT RRSIG NSEC TYPE65534"), None).unwrap();
        assert_eq!(nsec.next_domain_name().to_ascii(), "miek.nl.");
        assert_eq!(
            nsec.type_bit_maps(),
            &[
                RecordType::TXT,
                RecordType::RRSIG,
                RecordType::NSEC,
                RecordType::Unknown(65534),
            ]
        );
    }
}
