// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::str::FromStr;

use tracing::warn;

use crate::rr::{DNSClass, Name, Record, RecordType};
use crate::serialize::txt::errors::{ParseError, ParseErrorKind, ParseResult, Pos};
use crate::serialize::txt::parse_rdata;
use crate::serialize::txt::zone_lex::{Lexer, Token};
use crate::serialize::txt::Tok;

/// Opens the files referenced by `$INCLUDE` directives.
///
/// The parser does no file I/O of its own: it reports the include through
/// this seam and splices whatever text comes back.
pub trait IncludeOpener {
    /// Return the contents of the included file
    fn open(&mut self, path: &str) -> io::Result<String>;
}

/// The default opener, reads includes from the filesystem
#[derive(Default, Clone, Copy)]
pub struct FsOpener;

impl IncludeOpener for FsOpener {
    fn open(&mut self, path: &str) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Max traversal depth for `$INCLUDE` files
const MAX_INCLUDE_LEVEL: usize = 256;

/// A zone file parser.
///
/// ```text
/// 5. ZONE FILES
///
/// The format of these files is a sequence of entries.  Entries are
/// predominantly line-oriented, though parentheses can be used to continue
/// a list of items across a line boundary, and text literals can contain
/// CRLF within the text.
///
/// The following entries are defined:
///
///     <blank>[<comment>]
///
///     $ORIGIN <domain-name> [<comment>]
///
///     $INCLUDE <file-name> [<domain-name>] [<comment>]
///
///     <domain-name><rr> [<comment>]
///
///     <blank><rr> [<comment>]
///
/// <rr> contents take one of the following forms:
///
///     [<TTL>] [<class>] <type> <RDATA>
///
///     [<class>] [<TTL>] <type> <RDATA>
/// ```
///
/// The parser is an iterator yielding one record per `next()`. A line that
/// fails to parse yields its error and parsing resumes on the following
/// line. The owner, TTL, and class of omitted fields are inherited: a blank
/// owner repeats the previous owner, a missing TTL falls back to `$TTL`,
/// then to the previous record's TTL, then to 3600, and a missing class
/// repeats the previous one, IN at the start.
pub struct Parser<'a> {
    // each entry carries the origin of its file, $INCLUDE never changes the
    // origin of the parent
    lexers: Vec<(Lexer<'a>, Option<Name>)>,
    opener: Box<dyn IncludeOpener + 'a>,
    current_name: Option<Name>,
    class: DNSClass,
    default_ttl: Option<u32>,
    last_ttl: Option<u32>,
}

impl<'a> Parser<'a> {
    /// Returns a new zone file parser over the input text
    pub fn new(input: impl Into<Cow<'a, str>>, origin: Option<Name>) -> Self {
        Self {
            lexers: vec![(Lexer::new(input), origin)],
            opener: Box::new(FsOpener),
            current_name: None,
            class: DNSClass::IN,
            default_ttl: None,
            last_ttl: None,
        }
    }

    /// Replace the `$INCLUDE` opener, e.g. to resolve includes from memory
    pub fn with_opener(mut self, opener: impl IncludeOpener + 'a) -> Self {
        self.opener = Box::new(opener);
        self
    }

    fn origin(&self) -> Option<Name> {
        self.lexers.last().and_then(|(_, origin)| origin.clone())
    }

    fn next_token(&mut self) -> ParseResult<Option<(Token, Pos)>> {
        loop {
            let Some((lexer, _)) = self.lexers.last_mut() else {
                return Ok(None);
            };

            match lexer.next_token()? {
                Some(token) => return Ok(Some(token)),
                None => {
                    // this file is exhausted, continue with the including one
                    self.lexers.pop();
                }
            }
        }
    }

    fn next_record(&mut self) -> ParseResult<Option<Record>> {
        let mut state = LineState::StartLine;
        let mut explicit_ttl: Option<u32> = None;

        loop {
            let Some((token, pos)) = self.next_token()? else {
                // EOF: a last line without a newline still holds a record
                return match state {
                    LineState::Record { rtype, pos, toks } => self
                        .flush_record_with_ttl(rtype, pos, &toks, explicit_ttl)
                        .map(Some),
                    LineState::Include { path: Some(path), origin } => {
                        self.enter_include(path, origin)?;
                        self.next_record()
                    }
                    _ => Ok(None),
                };
            };

            state = match state {
                LineState::StartLine => match token {
                    // a comment or an empty line
                    Token::EOL => LineState::StartLine,

                    // leading whitespace: the owner is inherited from the previous record
                    Token::Blank => LineState::TtlClassType,

                    Token::CharData(owner) => {
                        let name = Name::parse(&owner, self.origin().as_ref())
                            .map_err(|e| ParseError::from(e).at(pos))?;
                        self.current_name = Some(name);
                        LineState::TtlClassType
                    }

                    // @ is a placeholder for the current origin
                    Token::At => {
                        self.current_name = Some(self.origin().ok_or_else(|| {
                            ParseError::from(ParseErrorKind::Message(
                                "@ used without an origin",
                            ))
                            .at(pos)
                        })?);
                        LineState::TtlClassType
                    }

                    Token::Origin => LineState::Origin,
                    Token::Ttl => LineState::Ttl,
                    Token::Include => LineState::Include {
                        path: None,
                        origin: None,
                    },

                    t => {
                        return Err(ParseError::from(ParseErrorKind::UnexpectedToken(t)).at(pos))
                    }
                },

                LineState::Ttl => match token {
                    Token::CharData(data) => {
                        self.default_ttl = Some(
                            Self::parse_time(&data)
                                .map_err(|_| bad_param("$TTL value", &data, pos))?,
                        );
                        LineState::StartLine
                    }
                    t => return Err(ParseError::from(ParseErrorKind::UnexpectedToken(t)).at(pos)),
                },

                LineState::Origin => match token {
                    Token::CharData(data) => {
                        let name = Name::parse(&data, None)
                            .map_err(|e| ParseError::from(e).at(pos))?;
                        if let Some((_, origin)) = self.lexers.last_mut() {
                            *origin = Some(name);
                        }
                        LineState::StartLine
                    }
                    t => return Err(ParseError::from(ParseErrorKind::UnexpectedToken(t)).at(pos)),
                },

                LineState::Include { path, origin } => match (token, path) {
                    (Token::CharData(data), None) => LineState::Include {
                        path: Some(data),
                        origin,
                    },
                    (Token::CharData(data), Some(path)) if origin.is_none() => {
                        LineState::Include {
                            path: Some(path),
                            origin: Some(data),
                        }
                    }
                    (Token::EOL, Some(path)) => {
                        self.enter_include(path, origin)?;
                        LineState::StartLine
                    }
                    (t, _) => {
                        return Err(ParseError::from(ParseErrorKind::UnexpectedToken(t)).at(pos))
                    }
                },

                LineState::TtlClassType => match token {
                    Token::CharData(data) => {
                        // the fields may appear in any order: a TTL, a class, then the type
                        if let Ok(ttl) = Self::parse_time(&data) {
                            explicit_ttl = Some(ttl);
                            LineState::TtlClassType
                        } else {
                            let mut mnemonic = data.clone();
                            mnemonic.make_ascii_uppercase();

                            if let Ok(class) = DNSClass::from_str(&mnemonic) {
                                self.class = class;
                                LineState::TtlClassType
                            } else if let Ok(rtype) = RecordType::from_str(&mnemonic) {
                                LineState::Record {
                                    rtype,
                                    pos,
                                    toks: Vec::new(),
                                }
                            } else {
                                return Err(bad_param("record type", &data, pos));
                            }
                        }
                    }
                    // a line holding only an owner, or only a comment
                    Token::EOL => LineState::StartLine,
                    t => return Err(ParseError::from(ParseErrorKind::UnexpectedToken(t)).at(pos)),
                },

                LineState::Record { rtype, pos: type_pos, mut toks } => match token {
                    Token::CharData(text) => {
                        toks.push(Tok {
                            text,
                            quoted: false,
                            pos,
                        });
                        LineState::Record {
                            rtype,
                            pos: type_pos,
                            toks,
                        }
                    }
                    Token::Quoted(text) => {
                        toks.push(Tok {
                            text,
                            quoted: true,
                            pos,
                        });
                        LineState::Record {
                            rtype,
                            pos: type_pos,
                            toks,
                        }
                    }
                    Token::EOL => {
                        return self
                            .flush_record_with_ttl(rtype, type_pos, &toks, explicit_ttl)
                            .map(Some);
                    }
                    t => return Err(ParseError::from(ParseErrorKind::UnexpectedToken(t)).at(pos)),
                },
            };

            // records flushed above return out of the loop; an explicit TTL only
            // survives for the duration of its line
            if matches!(state, LineState::StartLine) {
                explicit_ttl = None;
            }
        }
    }

    fn flush_record_with_ttl(
        &mut self,
        rtype: RecordType,
        type_pos: Pos,
        toks: &[Tok],
        explicit_ttl: Option<u32>,
    ) -> ParseResult<Record> {
        let origin = self.origin();
        let rdata = parse_rdata::parse(rtype, toks, origin.as_ref())
            .map_err(|e| e.at(type_pos))?;

        let name = self.current_name.clone().ok_or_else(|| {
            ParseError::from(ParseErrorKind::Message("record owner not specified")).at(type_pos)
        })?;

        // missing TTL: $TTL, else the previous record's TTL, else 3600
        let ttl = explicit_ttl
            .or(self.default_ttl)
            .or(self.last_ttl)
            .unwrap_or(3600);
        self.last_ttl = Some(ttl);

        let mut record = Record::from_rdata(name, ttl, rdata);
        record.set_record_type(rtype);
        record.set_dns_class(self.class);
        Ok(record)
    }

    fn enter_include(&mut self, path: String, origin: Option<String>) -> ParseResult<()> {
        if self.lexers.len() >= MAX_INCLUDE_LEVEL {
            warn!("max depth for nested $INCLUDE reached: {path}");
            return Err(ParseError::from(ParseErrorKind::Message(
                "max depth for nested $INCLUDE reached",
            )));
        }

        let include_origin = match origin {
            Some(origin) => Some(Name::parse(&origin, None).map_err(ParseError::from)?),
            None => self.origin(),
        };

        let contents = self.opener.open(&path)?;
        self.lexers.push((Lexer::new(contents), include_origin));
        Ok(())
    }

    /// parses the string following the rules from:
    ///  <https://tools.ietf.org/html/rfc2308> (NXCaching RFC) and
    ///  <https://www.zytrax.com/books/dns/apa/time.html>
    ///
    /// default is seconds
    /// #s = seconds = # x 1 seconds (really!)
    /// #m = minutes = # x 60 seconds
    /// #h = hours   = # x 3600 seconds
    /// #d = day     = # x 86400 seconds
    /// #w = week    = # x 604800 seconds
    ///
    /// # Example
    /// ```
    /// use juniper_proto::serialize::txt::Parser;
    ///
    /// assert_eq!(Parser::parse_time("0").unwrap(),  0);
    /// assert!(Parser::parse_time("s").is_err());
    /// assert!(Parser::parse_time("").is_err());
    /// assert_eq!(Parser::parse_time("0s").unwrap(), 0);
    /// assert_eq!(Parser::parse_time("1").unwrap(),  1);
    /// assert_eq!(Parser::parse_time("1S").unwrap(), 1);
    /// assert_eq!(Parser::parse_time("1M").unwrap(), 60);
    /// assert_eq!(Parser::parse_time("1H").unwrap(), 3600);
    /// assert_eq!(Parser::parse_time("2H").unwrap(), 7200);
    /// assert_eq!(Parser::parse_time("1d").unwrap(), 86400);
    /// assert_eq!(Parser::parse_time("1w").unwrap(), 604800);
    /// assert_eq!(Parser::parse_time("1s2d3w4h2m").unwrap(), 1+2*86400+3*604800+4*3600+2*60);
    /// assert!(Parser::parse_time("7102w").is_err());
    /// ```
    pub fn parse_time(ttl_str: &str) -> ParseResult<u32> {
        if ttl_str.is_empty() {
            return Err(ParseErrorKind::ParseTime(ttl_str.to_string()).into());
        }

        let (mut state, mut value) = (None, 0_u32);
        for (i, c) in ttl_str.chars().enumerate() {
            let start = match (state, c) {
                (None, '0'..='9') => {
                    state = Some(i);
                    continue;
                }
                (Some(_), '0'..='9') => continue,
                (Some(start), 'S' | 's' | 'M' | 'm' | 'H' | 'h' | 'D' | 'd' | 'W' | 'w') => start,
                _ => return Err(ParseErrorKind::ParseTime(ttl_str.to_string()).into()),
            };

            // All allowed chars are ASCII, so using char indexes to slice &[u8] is OK
            let number = u32::from_str(&ttl_str[start..i])
                .map_err(|_| ParseErrorKind::ParseTime(ttl_str.to_string()))?;

            let multiplier = match c {
                'S' | 's' => 1,
                'M' | 'm' => 60,
                'H' | 'h' => 3_600,
                'D' | 'd' => 86_400,
                'W' | 'w' => 604_800,
                _ => unreachable!(),
            };

            value = number
                .checked_mul(multiplier)
                .and_then(|add| value.checked_add(add))
                .ok_or_else(|| ParseErrorKind::ParseTime(ttl_str.to_string()))?;

            state = None;
        }

        if let Some(start) = state {
            // All allowed chars are ASCII, so using char indexes to slice &[u8] is OK
            let number = u32::from_str(&ttl_str[start..])
                .map_err(|_| ParseErrorKind::ParseTime(ttl_str.to_string()))?;
            value = value
                .checked_add(number)
                .ok_or_else(|| ParseErrorKind::ParseTime(ttl_str.to_string()))?;
        }

        Ok(value)
    }
}

fn bad_param(what: &str, token: &str, pos: Pos) -> ParseError {
    ParseError::from(ParseErrorKind::BadParam {
        what: what.to_string(),
        token: token.to_string(),
    })
    .at(pos)
}

impl Iterator for Parser<'_> {
    type Item = ParseResult<Record>;

    /// Consuming one element advances the parser by exactly one record.
    ///
    /// On an error the rest of the offending line is skipped and the error is
    /// yielded; the following `next()` continues with the next line.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                if let Some((lexer, _)) = self.lexers.last_mut() {
                    lexer.skip_line();
                }
                Some(Err(e))
            }
        }
    }
}

/// Parse exactly one record from its textual form, relative names are
/// qualified with the root
impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s, Some(Name::root()));
        match parser.next() {
            Some(Ok(record)) => Ok(record),
            Some(Err(e)) => Err(e),
            None => Err(ParseError::from(ParseErrorKind::Message(
                "no record found in input",
            ))),
        }
    }
}

enum LineState {
    StartLine,
    TtlClassType,
    Ttl,
    Origin,
    Include {
        path: Option<String>,
        origin: Option<String>,
    },
    Record {
        rtype: RecordType,
        pos: Pos,
        toks: Vec<Tok>,
    },
}

#[cfg(test)]
mod tests {
    #![allow(clippy::dbg_macro, clippy::print_stdout)]

    use std::collections::HashMap;

    use super::*;

    fn parse_all(zone: &str) -> Vec<Record> {
        Parser::new(zone, None)
            .map(|r| r.expect("record failed to parse"))
            .collect()
    }

    #[cfg(feature = "dnssec")]
    #[test]
    fn test_zone_parse_signed_records() {
        let zone = "z1.miek.nl. 86400 IN RRSIG NSEC 8 3 86400 20110823011301 20110724011301 12051 miek.nl. lyRljEQFOmajcdo6bBI67DsTlQTGU3ag9vlE07u7ynqt9aYBXyE9mkasAK4V0oI32YGb2pOSB6RbbdHwUmSt+cYhOA49tl2t0Qoi3pH21dicJiupdZuyjfqUEqJlQoEhNXGtP/pRvWjNA4pQeOsOAoWq/BDcWCSQB9mh2LvUOH4= ; {keyid = sksak}
z2.miek.nl.  86400   IN      NSEC    miek.nl. TXT RRSIG NSEC
$TTL 100
z3.miek.nl.  IN      NSEC    miek.nl. TXT RRSIG NSEC";

        let records = parse_all(zone);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].name().to_ascii(), "z1.miek.nl.");
        assert_eq!(records[0].ttl(), 86400);
        assert_eq!(records[1].name().to_ascii(), "z2.miek.nl.");
        assert_eq!(records[1].ttl(), 86400);
        assert_eq!(
            records[2].to_string(),
            "z3.miek.nl.\t100\tIN\tNSEC\tmiek.nl. TXT RRSIG NSEC"
        );
    }

    #[test]
    fn test_directives() {
        let tests = [
            (
                "$ORIGIN miek.nl.\na IN NS b",
                "a.miek.nl.\t3600\tIN\tNS\tb.miek.nl.",
            ),
            ("$TTL 2H\nmiek.nl. IN NS b.", "miek.nl.\t7200\tIN\tNS\tb."),
            ("miek.nl. 1D IN NS b.", "miek.nl.\t86400\tIN\tNS\tb."),
            (
                ". 3600000  IN  NS ONE.MY-ROOTS.NET.",
                ".\t3600000\tIN\tNS\tONE.MY-ROOTS.NET.",
            ),
            (
                "ONE.MY-ROOTS.NET. 3600000 IN A 192.168.1.1",
                "ONE.MY-ROOTS.NET.\t3600000\tIN\tA\t192.168.1.1",
            ),
        ];

        for (input, expected) in tests {
            let records = parse_all(input);
            assert_eq!(records.len(), 1, "for {input:?}");
            assert_eq!(records[0].to_string(), expected);
        }
    }

    #[test]
    fn test_multi_line_soa() {
        let zone = "name. IN SOA  a6.nstld.com. hostmaster.nic.name. (
        203362132 ; serial
        5m        ; refresh (5 minutes)
        5m        ; retry (5 minutes)
        2w        ; expire (2 weeks)
        300       ; minimum (5 minutes)
)";
        let records = parse_all(zone);
        assert_eq!(
            records[0].to_string(),
            "name.\t3600\tIN\tSOA\ta6.nstld.com. hostmaster.nic.name. 203362132 300 300 1209600 300"
        );
    }

    #[test]
    fn test_braces() {
        let tests = [
            ("(miek.nl.) 3600 IN A 127.0.0.1", "miek.nl.\t3600\tIN\tA\t127.0.0.1"),
            (
                "miek.nl. (3600) IN MX (10) elektron.atoom.net.",
                "miek.nl.\t3600\tIN\tMX\t10 elektron.atoom.net.",
            ),
            (
                "miek.nl. IN (\n                        3600 A 127.0.0.1)",
                "miek.nl.\t3600\tIN\tA\t127.0.0.1",
            ),
            ("(miek.nl.) (A) (127.0.0.1)", "miek.nl.\t3600\tIN\tA\t127.0.0.1"),
            ("miek.nl A 127.0.0.1", "miek.nl.\t3600\tIN\tA\t127.0.0.1"),
            (
                "_ssh._tcp.local. 60 IN (PTR) stora._ssh._tcp.local.",
                "_ssh._tcp.local.\t60\tIN\tPTR\tstora._ssh._tcp.local.",
            ),
            ("miek.nl. NS ns.miek.nl", "miek.nl.\t3600\tIN\tNS\tns.miek.nl."),
            (
                "(miek.nl.) (\n                        (IN)\n                        (AAAA)\n                        (::1) )",
                "miek.nl.\t3600\tIN\tAAAA\t::1",
            ),
            (
                "((m)(i)ek.(n)l.) (SOA) (soa.) (soa.) (\n        2009032802 ; serial\n        21600      ; refresh (6 hours)\n        7(2)00       ; retry (2 hours)\n        604()800     ; expire (1 week)\n        3600       ; minimum (1 hour)\n)",
                "miek.nl.\t3600\tIN\tSOA\tsoa. soa. 2009032802 21600 7200 604800 3600",
            ),
            ("miek\\.nl. IN A 127.0.0.1", "miek\\.nl.\t3600\tIN\tA\t127.0.0.1"),
            ("miek.nl. A 127.0.0.1", "miek.nl.\t3600\tIN\tA\t127.0.0.1"),
        ];

        for (input, expected) in tests {
            let record = Record::from_str(input)
                .unwrap_or_else(|e| panic!("failed to parse {input:?}: {e}"));
            assert_eq!(record.to_string(), expected, "for {input:?}");
        }
    }

    #[test]
    fn test_quotes() {
        let tests = [
            ("t.example.com. IN TXT \"a bc\"", "t.example.com.\t3600\tIN\tTXT\t\"a bc\""),
            (
                "t.example.com. IN TXT \"a\n bc\"",
                "t.example.com.\t3600\tIN\tTXT\t\"a\\n bc\"",
            ),
            ("t.example.com. IN TXT \"a\"", "t.example.com.\t3600\tIN\tTXT\t\"a\""),
            (
                "t.example.com. IN TXT \"aaa\" ;",
                "t.example.com.\t3600\tIN\tTXT\t\"aaa\"",
            ),
            (
                "t.example.com. IN TXT \"abc\" \"DEF\"",
                "t.example.com.\t3600\tIN\tTXT\t\"abc\" \"DEF\"",
            ),
            (
                "t.example.com. IN TXT \"abc\" ( \"DEF\" )",
                "t.example.com.\t3600\tIN\tTXT\t\"abc\" \"DEF\"",
            ),
            ("t.example.com. IN TXT aaa", "t.example.com.\t3600\tIN\tTXT\t\"aaa\""),
        ];

        for (input, expected) in tests {
            let record = Record::from_str(input)
                .unwrap_or_else(|e| panic!("failed to parse {input:?}: {e}"));
            assert_eq!(record.to_string(), expected, "for {input:?}");
        }
    }

    #[test]
    fn test_parse_failures() {
        let tests = [
            "miek.nl. IN A 327.0.0.1",
            "miek.nl. IN AAAA ::x",
            "miek.nl. IN MX a0 miek.nl.",
            "miek.nl aap IN MX mx.miek.nl.",
            "miek.nl. IN CNAME ",
            "miek.nl. PA MX 10 miek.nl.",
            "miek.nl. ) IN MX 10 miek.nl.",
        ];

        for input in tests {
            let result = Record::from_str(input);
            assert!(result.is_err(), "should have failed: {input:?}");
            let message = result.unwrap_err().to_string();
            assert!(message.starts_with("dns: "), "uninformative: {message}");
        }
    }

    #[test]
    fn test_line_and_column_reporting() {
        let input = "example.com. 1000 SOA master.example.com. admin.example.com. monkey 4294967294 4294967293 4294967295 100";
        let err = Record::from_str(input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "dns: bad SOA zone parameter: \"monkey\" at line: 1:68"
        );
    }

    #[test]
    fn test_unknown_type_mnemonic() {
        let err = Record::from_str(
            "example.com. 1000 SO master.example.com. admin.example.com. 1 4294967294 4294967293 4294967295 100",
        )
        .unwrap_err();
        assert!(err.to_string().contains("SO"), "{err}");
    }

    #[test]
    fn test_loc_canonical_output() {
        let tests = [
            (
                "SW1A2AA.find.me.uk.\tLOC\t51 30 12.748 N 00 07 39.611 W 0.00m 0.00m 0.00m 0.00m",
                "SW1A2AA.find.me.uk.\t3600\tIN\tLOC\t51 30 12.748 N 00 07 39.611 W 0.00m 0.00m 0.00m 0.00m",
            ),
            (
                "SW1A2AA.find.me.uk.\tLOC\t51 0 0.0 N 00 07 39.611 W 0.00m 0.00m 0.00m 0.00m",
                "SW1A2AA.find.me.uk.\t3600\tIN\tLOC\t51 00 0.000 N 00 07 39.611 W 0.00m 0.00m 0.00m 0.00m",
            ),
        ];

        for (input, expected) in tests {
            let record = Record::from_str(input).unwrap();
            assert_eq!(record.to_string(), expected);
        }
    }

    #[cfg(feature = "dnssec")]
    #[test]
    fn test_nsec_family_round_trip() {
        let tests = [
            "nl.\t3600\tIN\tNSEC3PARAM\t1 0 5 30923C44C6CBBB8F",
            "p2209hipbpnm681knjnu0m1febshlv4e.nl.\t3600\tIN\tNSEC3\t1 1 5 30923C44C6CBBB8F P90DG1KE8QEAN0B01613LHQDG0SOJ0TA NS SOA TXT RRSIG DNSKEY NSEC3PARAM",
            "localhost.dnssex.nl.\t3600\tIN\tNSEC\twww.dnssex.nl. A RRSIG NSEC",
            "localhost.dnssex.nl.\t3600\tIN\tNSEC\twww.dnssex.nl. A RRSIG NSEC TYPE65534",
        ];

        for expected in tests {
            let record = Record::from_str(expected).unwrap();
            assert_eq!(record.to_string(), expected);
        }
    }

    #[test]
    fn test_presentation_round_trip() {
        // parse(r.String()).String() == r.String()
        let tests = [
            "miek.nl.\t3600\tIN\tA\t127.0.0.1",
            "miek.nl.\t3600\tIN\tAAAA\t::1",
            "miek.nl.\t86400\tIN\tSOA\telektron.atoom.net. miekg.atoom.net. 2009032802 21600 7200 604800 3600",
            "miek.nl.\t3600\tIN\tMX\t10 elektron.atoom.net.",
            "miek.nl.\t3600\tIN\tTXT\t\"x y z\"",
            "_ssh._tcp.miek.nl.\t3600\tIN\tSRV\t10 20 443 www.miek.nl.",
            "example.com.\t3600\tIN\tTYPE65280\t\\# 4 0a000001",
        ];

        for expected in tests {
            let record = Record::from_str(expected)
                .unwrap_or_else(|e| panic!("failed to parse {expected:?}: {e}"));
            assert_eq!(record.to_string(), expected);
        }
    }

    #[cfg(feature = "dnssec")]
    #[test]
    fn test_presentation_round_trip_dnssec() {
        let tests = [
            "miek.nl.\t3600\tIN\tDNSKEY\t256 3 5 AQAB",
            "miek.nl.\t3600\tIN\tDS\t60485 5 1 2bb183af5f22588179a53b0a98631fad1a292118",
            "z1.miek.nl.\t86400\tIN\tRRSIG\tNSEC 8 3 86400 20110823011301 20110724011301 12051 miek.nl. lyRljEQFOmajcdo6bBI67DsTlQTGU3ag9vlE07u7ynqt9aYBXyE9mkasAK4V0oI32YGb2pOSB6RbbdHwUmSt+cYhOA49tl2t0Qoi3pH21dicJiupdZuyjfqUEqJlQoEhNXGtP/pRvWjNA4pQeOsOAoWq/BDcWCSQB9mh2LvUOH4=",
        ];

        for expected in tests {
            let record = Record::from_str(expected)
                .unwrap_or_else(|e| panic!("failed to parse {expected:?}: {e}"));
            assert_eq!(record.to_string(), expected);
        }
    }

    #[test]
    fn test_owner_inheritance() {
        let zone = "$ORIGIN name.
0-0onlus 3600           NS      ns7.ehiweb.it.
                        NS      ns8.ehiweb.it.
0-g                     MX      10 mx01.nic
                        MX      10 mx02.nic
";
        let records = parse_all(zone);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].name().to_ascii(), "0-0onlus.name.");
        assert_eq!(records[1].name().to_ascii(), "0-0onlus.name.");
        assert_eq!(records[2].name().to_ascii(), "0-g.name.");
        assert_eq!(records[3].to_string(), "0-g.name.\t3600\tIN\tMX\t10 mx02.nic.name.");
    }

    #[test]
    fn test_at_is_origin() {
        let records = parse_all("$ORIGIN miek.nl.\n@ 3600 IN NS ns.miek.nl.");
        assert_eq!(records[0].name().to_ascii(), "miek.nl.");
    }

    #[test]
    fn test_error_recovery_continues() {
        let zone = "a.miek.nl. 3600 IN A 127.0.0.1
b.miek.nl. 3600 IN A 327.0.0.1
c.miek.nl. 3600 IN A 127.0.0.3
";
        let results: Vec<_> = Parser::new(zone, None).collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
        assert_eq!(
            results[2].as_ref().unwrap().name().to_ascii(),
            "c.miek.nl."
        );
    }

    struct MapOpener(HashMap<&'static str, &'static str>);

    impl IncludeOpener for MapOpener {
        fn open(&mut self, path: &str) -> io::Result<String> {
            self.0
                .get(path)
                .map(|s| s.to_string())
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
        }
    }

    #[test]
    fn test_include() {
        let includes = HashMap::from([("sub.zone", "www IN A 127.0.0.1\n")]);

        let zone = "$ORIGIN miek.nl.
$TTL 300
$INCLUDE sub.zone sub.miek.nl.
after IN A 127.0.0.2
";
        let records: Vec<_> = Parser::new(zone, None)
            .with_opener(MapOpener(includes))
            .map(|r| r.expect("record failed to parse"))
            .collect();

        assert_eq!(records.len(), 2);
        // the include qualified with its own origin
        assert_eq!(records[0].name().to_ascii(), "www.sub.miek.nl.");
        assert_eq!(records[0].ttl(), 300);
        // the parent origin is untouched by the include
        assert_eq!(records[1].name().to_ascii(), "after.miek.nl.");
    }

    #[test]
    fn test_include_missing_file() {
        let zone = "$INCLUDE nowhere.zone\n";
        let results: Vec<_> = Parser::new(zone, None)
            .with_opener(MapOpener(HashMap::new()))
            .collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
