// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! RRSIG type and related implementations

use data_encoding::BASE64;

use crate::rr::dnssec::rdata::{rrsig::date_to_time, RRSIG};
use crate::rr::dnssec::Algorithm;
use crate::rr::Name;
use crate::serialize::txt::errors::{ParseError, ParseErrorKind, ParseResult};
use crate::serialize::txt::rdata_parsers::{concat_remaining, next_field};
use crate::serialize::txt::Tok;

/// Parse the RData from a set of tokens:
///
/// ```text
/// TypeCovered Algorithm Labels OriginalTTL Expiration Inception KeyTag SignerName Signature
/// ```
///
/// The two timestamps accept `YYYYMMDDHHmmSS` or plain epoch seconds; the
/// signature may be split over any number of tokens.
pub(crate) fn parse(tokens: &[Tok], origin: Option<&Name>) -> ParseResult<RRSIG> {
    let mut tokens = tokens.iter();

    let type_covered =
        next_field(&mut tokens, "RRSIG type covered")?.record_type("RRSIG type covered")?;
    let algorithm = next_field(&mut tokens, "RRSIG algorithm")?.u8("RRSIG algorithm")?;
    let num_labels = next_field(&mut tokens, "RRSIG labels")?.u8("RRSIG labels")?;
    let original_ttl = next_field(&mut tokens, "RRSIG original TTL")?.u32("RRSIG original TTL")?;

    let expiration_token = next_field(&mut tokens, "RRSIG expiration")?;
    let sig_expiration = date_to_time(&expiration_token.text)
        .map_err(|_| expiration_token.bad("RRSIG expiration"))?;

    let inception_token = next_field(&mut tokens, "RRSIG inception")?;
    let sig_inception =
        date_to_time(&inception_token.text).map_err(|_| inception_token.bad("RRSIG inception"))?;

    let key_tag = next_field(&mut tokens, "RRSIG key tag")?.u16("RRSIG key tag")?;
    let signer_name = next_field(&mut tokens, "RRSIG signer name")?
        .name(origin, "RRSIG signer name")?;

    let sig = concat_remaining(&mut tokens);
    if sig.is_empty() {
        return Err(ParseError::from(ParseErrorKind::MissingToken(
            "RRSIG signature",
        )));
    }
    let sig = BASE64.decode(sig.as_bytes())?;

    Ok(RRSIG::new(
        type_covered,
        Algorithm::from_u8(algorithm),
        num_labels,
        original_ttl,
        sig_expiration,
        sig_inception,
        key_tag,
        signer_name,
        sig,
    ))
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
        let rrsig = parse(
            &toks("NSEC 8 3 86400 20110823011301 20110724011301 12051 miek.nl. lyRljEQFOmajcdo6bBI67DsTlQTGU3ag9vlE07u7ynqt9aYBXyE9mkasAK4V0oI32YGb2pOSB6RbbdHwUmSt+cYhOA49tl2t0Qoi3pH21dicJiupdZuyjfqUEqJlQoEhNXGtP/pRvWjNA4pQeOsOAoWq/BDcWCSQB9mh2LvUOH4="),
            None,
        )
        .unwrap();

        assert_eq!(rrsig.type_covered(), RecordType::NSEC);
        assert_eq!(rrsig.algorithm(), Algorithm::RSASHA256);
        assert_eq!(rrsig.num_labels(), 3);
        assert_eq!(rrsig.key_tag(), 12051);
        assert_eq!(rrsig.signer_name().to_ascii(), "miek.nl.");
        assert_eq!(rrsig.sig().len(), 128);
    }
}
