// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! generic rdata of unknown record types, RFC 3597

use data_encoding::HEXUPPER_PERMISSIVE;

use crate::rr::rdata::NULL;
use crate::serialize::txt::errors::ParseResult;
use crate::serialize::txt::rdata_parsers::{concat_remaining, next_field};
use crate::serialize::txt::Tok;

/// Parse the generic rdata form of [RFC 3597](https://tools.ietf.org/html/rfc3597):
///
/// ```text
/// \# <rdlength> <hex octets>
/// ```
pub(crate) fn parse(tokens: &[Tok]) -> ParseResult<NULL> {
    let mut tokens = tokens.iter();

    let marker = next_field(&mut tokens, "\\# marker")?;
    if marker.text != "\\#" {
        return Err(marker.bad("generic rdata, expected \\#"));
    }

    let length_token = next_field(&mut tokens, "rdata length")?;
    let length = length_token.u16("rdata length")? as usize;

    let hex = concat_remaining(&mut tokens);
    let rdata = HEXUPPER_PERMISSIVE
        .decode(hex.as_bytes())
        .map_err(|_| length_token.bad("generic rdata hex"))?;

    if rdata.len() != length {
        return Err(length_token.bad("generic rdata length"));
    }

    Ok(NULL::with(rdata))
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
        let rdata = parse(&toks("\\# 4 0a000001")).unwrap();
        assert_eq!(rdata.anything(), &[10, 0, 0, 1]);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(parse(&toks("\\# 5 0a000001")).is_err());
    }
}
