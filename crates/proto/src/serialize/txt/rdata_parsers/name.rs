// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parser for rdata consisting of a single name: CNAME, NS, PTR

use crate::rr::Name;
use crate::serialize::txt::errors::ParseResult;
use crate::serialize::txt::rdata_parsers::next_field;
use crate::serialize::txt::Tok;

/// Parse the single name of the RData, qualifying it with the origin
pub(crate) fn parse(
    tokens: &[Tok],
    origin: Option<&Name>,
    what: &'static str,
) -> ParseResult<Name> {
    let mut tokens = tokens.iter();
    next_field(&mut tokens, what)?.name(origin, what)
}
