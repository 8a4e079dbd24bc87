// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! NSEC3 hashed authenticated denial record

use data_encoding::BASE32HEX_NOPAD;

use crate::rr::dnssec::rdata::NSEC3;
use crate::serialize::txt::errors::ParseResult;
use crate::serialize::txt::rdata_parsers::{next_field, nsec3param::parse_salt};
use crate::serialize::txt::Tok;

/// Parse the RData from a set of tokens:
///
/// ```text
/// HashAlg Flags Iterations Salt NextHashedOwner Type1 Type2 ...
/// ```
pub(crate) fn parse(tokens: &[Tok]) -> ParseResult<NSEC3> {
    let mut tokens = tokens.iter();

    let hash_algorithm = next_field(&mut tokens, "NSEC3 hash algorithm")?.u8("NSEC3 hash algorithm")?;
    let flags = next_field(&mut tokens, "NSEC3 flags")?.u8("NSEC3 flags")?;
    let iterations = next_field(&mut tokens, "NSEC3 iterations")?.u16("NSEC3 iterations")?;
    let salt = parse_salt(next_field(&mut tokens, "NSEC3 salt")?)?;

    let next_token = next_field(&mut tokens, "NSEC3 next hashed owner")?;
    let next_hashed_owner_name = BASE32HEX_NOPAD
        .decode(next_token.text.to_ascii_uppercase().as_bytes())
        .map_err(|_| next_token.bad("NSEC3 next hashed owner"))?;

    let mut type_bit_maps = Vec::new();
    for token in tokens {
        type_bit_maps.push(token.record_type("NSEC3 type bitmap")?);
    }

    Ok(NSEC3::new(
        hash_algorithm,
        flags,
        iterations,
        salt,
        next_hashed_owner_name,
        type_bit_maps,
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
        let nsec3 = parse(&toks(
            "1 1 5 30923C44C6CBBB8F P90DG1KE8QEAN0B01613LHQDG0SOJ0TA NS SOA TXT RRSIG DNSKEY NSEC3PARAM",
        ))
        .unwrap();

        assert_eq!(nsec3.hash_algorithm(), 1);
        assert!(nsec3.opt_out());
        assert_eq!(nsec3.iterations(), 5);
        assert_eq!(nsec3.salt().len(), 8);
        assert_eq!(nsec3.next_hashed_owner_name().len(), 20);
        assert_eq!(nsec3.type_bit_maps().len(), 6);
    }
}
