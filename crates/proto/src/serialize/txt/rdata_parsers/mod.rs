// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! All the rdata parsers for the master file format

pub(crate) mod a;
pub(crate) mod aaaa;
#[cfg(feature = "dnssec")]
pub(crate) mod dnskey;
#[cfg(feature = "dnssec")]
pub(crate) mod ds;
pub(crate) mod loc;
pub(crate) mod mx;
pub(crate) mod name;
#[cfg(feature = "dnssec")]
pub(crate) mod nsec;
#[cfg(feature = "dnssec")]
pub(crate) mod nsec3;
#[cfg(feature = "dnssec")]
pub(crate) mod nsec3param;
#[cfg(feature = "dnssec")]
pub(crate) mod rrsig;
pub(crate) mod soa;
pub(crate) mod srv;
pub(crate) mod txt;
pub(crate) mod unknown;

use crate::serialize::txt::errors::{ParseError, ParseErrorKind, ParseResult};
use crate::serialize::txt::Tok;

/// Take the next token of the rdata, failing with a `missing <what>` error
pub(crate) fn next_field<'a>(
    tokens: &mut std::slice::Iter<'a, Tok>,
    what: &'static str,
) -> ParseResult<&'a Tok> {
    tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken(what)))
}

/// Concatenate all remaining tokens, e.g. the base64 blob of a DNSKEY split
/// over several lines
pub(crate) fn concat_remaining(tokens: &mut std::slice::Iter<'_, Tok>) -> String {
    let mut joined = String::new();
    for token in tokens {
        joined.push_str(&token.text);
    }
    joined
}
