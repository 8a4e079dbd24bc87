// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! parameters used for the nsec3 hash method

use data_encoding::HEXUPPER_PERMISSIVE;

use crate::rr::dnssec::rdata::NSEC3PARAM;
use crate::serialize::txt::errors::ParseResult;
use crate::serialize::txt::rdata_parsers::next_field;
use crate::serialize::txt::Tok;

/// Parse the RData from a set of tokens: `HashAlg Flags Iterations Salt`
pub(crate) fn parse(tokens: &[Tok]) -> ParseResult<NSEC3PARAM> {
    let mut tokens = tokens.iter();

    let hash_algorithm =
        next_field(&mut tokens, "NSEC3PARAM hash algorithm")?.u8("NSEC3PARAM hash algorithm")?;
    let flags = next_field(&mut tokens, "NSEC3PARAM flags")?.u8("NSEC3PARAM flags")?;
    let iterations =
        next_field(&mut tokens, "NSEC3PARAM iterations")?.u16("NSEC3PARAM iterations")?;
    let salt = parse_salt(next_field(&mut tokens, "NSEC3PARAM salt")?)?;

    Ok(NSEC3PARAM::new(hash_algorithm, flags, iterations, salt))
}

/// A salt is hex of either case, `-` denotes the empty salt
pub(crate) fn parse_salt(token: &Tok) -> ParseResult<Vec<u8>> {
    if token.text == "-" {
        return Ok(Vec::new());
    }

    HEXUPPER_PERMISSIVE
        .decode(token.text.as_bytes())
        .map_err(|_| token.bad("salt"))
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
        let nsec3param = parse(&toks("1 0 5 30923C44C6CBBB8F")).unwrap();
        assert_eq!(nsec3param.hash_algorithm(), 1);
        assert!(!nsec3param.opt_out());
        assert_eq!(nsec3param.iterations(), 5);
        assert_eq!(nsec3param.salt().len(), 8);
    }

    #[test]
    fn test_empty_salt() {
        let nsec3param = parse(&toks("1 0 0 -")).unwrap();
        assert!(nsec3param.salt().is_empty());
    }
}
