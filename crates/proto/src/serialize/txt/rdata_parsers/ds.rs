// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! delegation signer record

use data_encoding::HEXUPPER_PERMISSIVE;

use crate::rr::dnssec::rdata::DS;
use crate::rr::dnssec::{Algorithm, DigestType};
use crate::serialize::txt::errors::{ParseError, ParseErrorKind, ParseResult};
use crate::serialize::txt::rdata_parsers::{concat_remaining, next_field};
use crate::serialize::txt::Tok;

/// Parse the RData from a set of tokens: `KeyTag Algorithm DigestType Digest`
///
/// The digest accepts whitespace-separated hex of either case.
pub(crate) fn parse(tokens: &[Tok]) -> ParseResult<DS> {
    let mut tokens = tokens.iter();

    let key_tag = next_field(&mut tokens, "DS key tag")?.u16("DS key tag")?;
    let algorithm = next_field(&mut tokens, "DS algorithm")?.u8("DS algorithm")?;

    let digest_type_token = next_field(&mut tokens, "DS digest type")?;
    let digest_type = DigestType::from_u8(digest_type_token.u8("DS digest type")?)
        .map_err(|_| digest_type_token.bad("DS digest type"))?;

    let digest = concat_remaining(&mut tokens);
    if digest.is_empty() {
        return Err(ParseError::from(ParseErrorKind::MissingToken("DS digest")));
    }
    let digest = HEXUPPER_PERMISSIVE.decode(digest.as_bytes())?;

    Ok(DS::new(
        key_tag,
        Algorithm::from_u8(algorithm),
        digest_type,
        digest,
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
        let ds = parse(&toks("60485 5 1 2BB183AF5F22588179A53B0A 98631FAD1A292118")).unwrap();
        assert_eq!(ds.key_tag(), 60485);
        assert_eq!(ds.algorithm(), Algorithm::RSASHA1);
        assert_eq!(ds.digest_type(), DigestType::SHA1);
        assert_eq!(ds.digest().len(), 20);
    }
}
