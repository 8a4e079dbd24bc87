// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! text records for storing arbitrary data

use crate::rr::rdata::TXT;
use crate::serialize::txt::errors::{ParseError, ParseErrorKind, ParseResult};
use crate::serialize::txt::Tok;

/// Parse the RData from a set of tokens
///
/// One or more quoted or bare strings; every token is one character-string of
/// at most 255 bytes.
pub(crate) fn parse(tokens: &[Tok]) -> ParseResult<TXT> {
    if tokens.is_empty() {
        return Err(ParseError::from(ParseErrorKind::MissingToken("TXT data")));
    }

    let mut strings = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token.text.len() > 255 {
            return Err(token.bad("TXT character-string, too long"));
        }
        strings.push(token.text.clone().into_bytes());
    }

    Ok(TXT::from_bytes(strings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::txt::Pos;

    fn tok(text: &str, quoted: bool) -> Tok {
        Tok {
            text: text.to_string(),
            quoted,
            pos: Pos { line: 1, col: 1 },
        }
    }

    #[test]
    fn test_parse() {
        let txt = parse(&[tok("abc", true), tok("DEF", true)]).unwrap();
        assert_eq!(txt.to_string(), "\"abc\" \"DEF\"");
    }

    #[test]
    fn test_empty_is_an_error() {
        assert!(parse(&[]).is_err());
    }
}
