// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! start of authority record

use crate::rr::rdata::SOA;
use crate::rr::Name;
use crate::serialize::txt::errors::ParseResult;
use crate::serialize::txt::rdata_parsers::next_field;
use crate::serialize::txt::zone::Parser;
use crate::serialize::txt::Tok;

/// Parse the RData from a set of tokens
///
/// The five numeric zone parameters accept the TTL suffix forms, e.g. `2w`
/// for the expire value.
pub(crate) fn parse(tokens: &[Tok], origin: Option<&Name>) -> ParseResult<SOA> {
    let mut tokens = tokens.iter();

    let mname = next_field(&mut tokens, "SOA mname")?.name(origin, "SOA mname")?;
    let rname = next_field(&mut tokens, "SOA rname")?.name(origin, "SOA rname")?;

    let mut zone_parameter = || -> ParseResult<u32> {
        let token = next_field(&mut tokens, "SOA zone parameter")?;
        Parser::parse_time(&token.text).map_err(|_| token.bad("SOA zone parameter"))
    };

    let serial = zone_parameter()?;
    let refresh = zone_parameter()?;
    let retry = zone_parameter()?;
    let expire = zone_parameter()?;
    let minimum = zone_parameter()?;

    Ok(SOA::new(mname, rname, serial, refresh, retry, expire, minimum))
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
    fn test_parse_with_suffixes() {
        let soa = parse(&toks("a6.nstld.com. hostmaster.nic.name. 203362132 5m 5m 2w 300"), None)
            .unwrap();
        assert_eq!(soa.serial(), 203362132);
        assert_eq!(soa.refresh(), 300);
        assert_eq!(soa.retry(), 300);
        assert_eq!(soa.expire(), 1_209_600);
        assert_eq!(soa.minimum(), 300);
    }

    #[test]
    fn test_bad_zone_parameter() {
        let err = parse(&toks("m. a. monkey 1 2 3 4"), None).unwrap_err();
        assert!(
            err.to_string().starts_with("dns: bad SOA zone parameter: \"monkey\""),
            "{err}"
        );
    }
}
