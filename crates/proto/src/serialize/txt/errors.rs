// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fmt;

use thiserror::Error;

use crate::error::ProtoError;
use crate::serialize::txt::zone_lex::Token;

/// An alias for parse results returned by functions of this crate
pub type ParseResult<T> = Result<T, ParseError>;

/// A position in the master-file input: 1-based line, and the 1-based column
/// at which the offending token was completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    /// line in the input, starting at 1
    pub line: u32,
    /// column in the line, starting at 1
    pub col: u32,
}

/// The error kind for parse errors that get returned in the crate
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// An error with an arbitrary message, referenced as &'static str
    #[error("{0}")]
    Message(&'static str),

    /// An error with an arbitrary message, stored as String
    #[error("{0}")]
    Msg(String),

    /// A field of a record did not parse, e.g. `bad MX preference: "a0"`
    #[error("bad {what}: {token:?}")]
    BadParam {
        /// what was being parsed, e.g. `SOA zone parameter`
        what: String,
        /// the offending token text
        token: String,
    },

    /// A token is missing at the end of the record
    #[error("missing {0}")]
    MissingToken(&'static str),

    /// A time string could not be parsed
    #[error("bad time string: {0:?}")]
    ParseTime(String),

    /// Found an unexpected token in a stream
    #[error("unexpected token in stream: {0:?}")]
    UnexpectedToken(Token),

    /// An error from the lexer
    #[error("{0}")]
    Lexer(#[from] LexerErrorKind),

    /// A data encoding error
    #[error("data encoding error: {0}")]
    DataEncoding(#[from] data_encoding::DecodeError),

    /// An error got returned from IO, e.g. opening an `$INCLUDE`
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An error got returned by the protocol layer of the crate
    #[error("{0}")]
    Proto(#[from] ProtoError),
}

/// The error type for parse errors that get returned in the crate.
///
/// Renders in the classic master-file style:
///
/// ```text
/// dns: bad SOA zone parameter: "monkey" at line: 1:68
/// ```
#[derive(Debug)]
pub struct ParseError {
    kind: ParseErrorKind,
    pos: Option<Pos>,
}

impl ParseError {
    /// Get the kind of the error
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// The input position the error refers to, when known
    pub fn pos(&self) -> Option<Pos> {
        self.pos
    }

    /// Attach an input position, keeping an already present one
    pub fn at(mut self, pos: Pos) -> Self {
        self.pos.get_or_insert(pos);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dns: {}", self.kind)?;
        if let Some(Pos { line, col }) = self.pos {
            write!(f, " at line: {line}:{col}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<ParseErrorKind> for ParseError {
    fn from(kind: ParseErrorKind) -> Self {
        Self { kind, pos: None }
    }
}

impl From<&'static str> for ParseError {
    fn from(msg: &'static str) -> Self {
        ParseErrorKind::Message(msg).into()
    }
}

impl From<String> for ParseError {
    fn from(msg: String) -> Self {
        ParseErrorKind::Msg(msg).into()
    }
}

impl From<ProtoError> for ParseError {
    fn from(e: ProtoError) -> Self {
        ParseErrorKind::from(e).into()
    }
}

impl From<data_encoding::DecodeError> for ParseError {
    fn from(e: data_encoding::DecodeError) -> Self {
        ParseErrorKind::from(e).into()
    }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseErrorKind::from(e).into()
    }
}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        Self {
            kind: ParseErrorKind::Lexer(e.kind),
            pos: Some(e.pos),
        }
    }
}

/// An alias for lexer results returned by functions of this crate
pub(crate) type LexerResult<T> = Result<T, LexerError>;

/// The error kind for lexer errors that get returned in the crate
#[derive(Eq, PartialEq, Debug, Error, Clone)]
#[non_exhaustive]
pub enum LexerErrorKind {
    /// Unexpected end of input
    #[error("unexpected end of input")]
    EOF,

    /// An illegal character was found
    #[error("illegal character input: {0:?}")]
    IllegalCharacter(char),

    /// An unclosed parenthesized group
    #[error("unbalanced parens, missing ')'")]
    UnbalancedParens,

    /// An unclosed quoted string was found
    #[error("unclosed quoted string")]
    UnclosedQuotedString,

    /// An unrecognized character was found
    #[error("unrecognized character input: {0:?}")]
    UnrecognizedChar(char),

    /// An unrecognized dollar directive was found
    #[error("unrecognized dollar directive: {0:?}")]
    UnrecognizedDollar(String),
}

/// The error type for lexer errors that get returned in the crate
#[derive(Clone, Debug)]
pub struct LexerError {
    kind: LexerErrorKind,
    pos: Pos,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dns: {kind} at line: {line}:{col}",
            kind = self.kind,
            line = self.pos.line,
            col = self.pos.col
        )
    }
}

impl std::error::Error for LexerError {}

impl LexerError {
    pub(crate) fn new(kind: LexerErrorKind, pos: Pos) -> Self {
        Self { kind, pos }
    }

    /// Get the kind of the error
    pub fn kind(&self) -> &LexerErrorKind {
        &self.kind
    }

    /// The input position the error refers to
    pub fn pos(&self) -> Pos {
        self.pos
    }
}
