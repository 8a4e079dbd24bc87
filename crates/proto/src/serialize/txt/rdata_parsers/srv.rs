// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! service records for identifying port mapping for specific services on a host

use crate::rr::rdata::SRV;
use crate::rr::Name;
use crate::serialize::txt::errors::ParseResult;
use crate::serialize::txt::rdata_parsers::next_field;
use crate::serialize::txt::Tok;

/// Parse the RData from a set of tokens
pub(crate) fn parse(tokens: &[Tok], origin: Option<&Name>) -> ParseResult<SRV> {
    let mut tokens = tokens.iter();

    let priority = next_field(&mut tokens, "SRV priority")?.u16("SRV priority")?;
    let weight = next_field(&mut tokens, "SRV weight")?.u16("SRV weight")?;
    let port = next_field(&mut tokens, "SRV port")?.u16("SRV port")?;
    let target = next_field(&mut tokens, "SRV target")?.name(origin, "SRV target")?;

    Ok(SRV::new(priority, weight, port, target))
}
