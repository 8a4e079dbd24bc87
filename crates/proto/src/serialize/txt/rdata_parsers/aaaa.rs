// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parser for AAAA text form

use std::str::FromStr;

use crate::rr::rdata::AAAA;
use crate::serialize::txt::errors::ParseResult;
use crate::serialize::txt::rdata_parsers::next_field;
use crate::serialize::txt::Tok;

/// Parse the RData from a set of tokens
pub(crate) fn parse(tokens: &[Tok]) -> ParseResult<AAAA> {
    let mut tokens = tokens.iter();
    let address = next_field(&mut tokens, "AAAA address")?;
    AAAA::from_str(&address.text).map_err(|_| address.bad("AAAA address"))
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
        assert!(parse(&[tok("::1")]).is_ok());
    }

    #[test]
    fn test_bad_address() {
        let err = parse(&[tok("::x")]).unwrap_err();
        assert!(err.to_string().contains("::x"), "{err}");
    }
}
