// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! mail exchange, email, record

use crate::rr::rdata::MX;
use crate::rr::Name;
use crate::serialize::txt::errors::ParseResult;
use crate::serialize::txt::rdata_parsers::next_field;
use crate::serialize::txt::Tok;

/// Parse the RData from a set of tokens
pub(crate) fn parse(tokens: &[Tok], origin: Option<&Name>) -> ParseResult<MX> {
    let mut tokens = tokens.iter();

    let preference = next_field(&mut tokens, "MX preference")?.u16("MX preference")?;
    let exchange = next_field(&mut tokens, "MX exchange")?.name(origin, "MX exchange")?;

    Ok(MX::new(preference, exchange))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::txt::Pos;

    fn tok(text: &str) -> Tok {
        Tok {
            text: text.to_string(),
            quoted: false,
            pos: Pos { line: 1, col: 1 },
        }
    }

    #[test]
    fn test_parse() {
        let mx = parse(&[tok("10"), tok("mx.miek.nl.")], None).unwrap();
        assert_eq!(mx.preference(), 10);
        assert_eq!(mx.exchange().to_ascii(), "mx.miek.nl.");
    }

    #[test]
    fn test_bad_preference() {
        let err = parse(&[tok("a0"), tok("miek.nl.")], None).unwrap_err();
        assert_eq!(err.to_string(), "dns: bad MX preference: \"a0\" at line: 1:1");
    }
}
