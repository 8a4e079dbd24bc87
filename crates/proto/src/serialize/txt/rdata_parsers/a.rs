// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parser for A text form

use std::str::FromStr;

use crate::rr::rdata::A;
use crate::serialize::txt::errors::ParseResult;
use crate::serialize::txt::rdata_parsers::next_field;
use crate::serialize::txt::Tok;

/// Parse the RData from a set of tokens
pub(crate) fn parse(tokens: &[Tok]) -> ParseResult<A> {
    let mut tokens = tokens.iter();
    let address = next_field(&mut tokens, "A address")?;
    A::from_str(&address.text).map_err(|_| address.bad("A address"))
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
        let a = parse(&[tok("127.0.0.1")]).unwrap();
        assert_eq!(a, A::new(127, 0, 0, 1));
    }

    #[test]
    fn test_out_of_range_octet() {
        let err = parse(&[tok("327.0.0.1")]).unwrap_err();
        assert!(err.to_string().contains("327.0.0.1"), "{err}");
    }
}
