// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Presentation (master file) format serialization and deserialization, RFC 1035 section 5

mod errors;
mod parse_rdata;
mod rdata_parsers;
mod zone;
mod zone_lex;

pub use self::errors::{LexerError, LexerErrorKind, ParseError, ParseErrorKind, ParseResult, Pos};
pub use self::zone::{FsOpener, IncludeOpener, Parser};
pub use self::zone_lex::Token;

use std::str::FromStr;

use crate::rr::{Name, RecordType};

/// A token of a record line, with the position at which it was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tok {
    pub(crate) text: String,
    pub(crate) quoted: bool,
    pub(crate) pos: Pos,
}

impl Tok {
    /// An error naming this token, e.g. `bad MX preference: "a0"`
    pub(crate) fn bad(&self, what: impl Into<String>) -> ParseError {
        ParseError::from(ParseErrorKind::BadParam {
            what: what.into(),
            token: self.text.clone(),
        })
        .at(self.pos)
    }

    pub(crate) fn u8(&self, what: &str) -> ParseResult<u8> {
        self.text.parse().map_err(|_| self.bad(what))
    }

    pub(crate) fn u16(&self, what: &str) -> ParseResult<u16> {
        self.text.parse().map_err(|_| self.bad(what))
    }

    pub(crate) fn u32(&self, what: &str) -> ParseResult<u32> {
        self.text.parse().map_err(|_| self.bad(what))
    }

    /// Parse as a domain name, qualifying relative names with the origin
    pub(crate) fn name(&self, origin: Option<&Name>, what: &str) -> ParseResult<Name> {
        Name::parse(&self.text, origin).map_err(|_| self.bad(what))
    }

    pub(crate) fn record_type(&self, what: &str) -> ParseResult<RecordType> {
        RecordType::from_str(&self.text).map_err(|_| self.bad(what))
    }
}
