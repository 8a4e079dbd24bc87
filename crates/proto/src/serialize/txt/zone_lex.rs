// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::borrow::Cow;
use std::iter::Peekable;

use crate::serialize::txt::errors::{LexerError, LexerErrorKind, LexerResult};
use crate::serialize::txt::Pos;

/// A Lexer for zone files.
///
/// Parentheses never split a token; they only suppress the line endings
/// between them, so `7(2)00` lexes as `7200` and a multi-line SOA body is a
/// plain token sequence. Comments run to end of line without eating the
/// newline. Line and column counters advance for every consumed character and
/// every token carries the position at which it was completed.
pub(crate) struct Lexer<'a> {
    txt: Peekable<CowChars<'a>>,
    state: State,
    paren_depth: u32,
    line: u32,
    col: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer with the given data to parse
    pub(crate) fn new(txt: impl Into<Cow<'a, str>>) -> Self {
        Lexer {
            txt: CowChars {
                data: txt.into(),
                offset: 0,
            }
            .peekable(),
            state: State::StartLine,
            paren_depth: 0,
            line: 1,
            col: 1,
        }
    }

    /// The position of the next unconsumed character
    fn pos(&self) -> Pos {
        Pos {
            line: self.line,
            col: self.col,
        }
    }

    fn error(&self, kind: LexerErrorKind) -> LexerError {
        LexerError::new(kind, self.pos())
    }

    fn peek(&mut self) -> Option<char> {
        self.txt.peek().copied()
    }

    fn consume(&mut self) -> Option<char> {
        let ch = self.txt.next()?;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Discard input until the end of the current line, resetting the state.
    ///
    /// This is the error recovery point: a parse failure skips the rest of
    /// the line and the next record starts clean. When the failure surfaced
    /// at the line ending itself there is nothing left to skip.
    pub(crate) fn skip_line(&mut self) {
        if matches!(self.state, State::StartLine | State::EOF) {
            return;
        }

        while let Some(ch) = self.peek() {
            if ch == '\n' {
                self.consume();
                break;
            }
            self.consume();
        }
        self.state = State::StartLine;
        self.paren_depth = 0;
    }

    /// Return the next Token in the string
    pub(crate) fn next_token(&mut self) -> LexerResult<Option<(Token, Pos)>> {
        let mut char_data: Option<String> = None;

        loop {
            // This is to get around mutability rules such that we can peek at the iter without moving next...
            let ch: Option<char> = self.peek();

            // continuing states should pass back the state as the last statement,
            //  terminal states should set the state internally and return the proper Token::*.
            match self.state {
                State::StartLine => match ch {
                    Some('\r') | Some('\n') => self.state = State::EOL,
                    // white space at the start of line is a Blank
                    Some(ch) if ch.is_whitespace() => self.state = State::Blank,
                    Some(_) => self.state = State::RestOfLine,
                    None => {
                        self.state = State::EOF;
                    }
                },
                State::RestOfLine => match ch {
                    Some('@') => {
                        self.consume();
                        let pos = self.pos();
                        return Ok(Some((Token::At, pos)));
                    }
                    Some('(') => {
                        self.consume();
                        self.paren_depth += 1;
                    }
                    Some(')') => {
                        if self.paren_depth == 0 {
                            return Err(self.error(LexerErrorKind::IllegalCharacter(')')));
                        }
                        self.consume();
                        self.paren_depth -= 1;
                    }
                    Some('$') => {
                        self.consume();
                        char_data = Some(String::new());
                        self.state = State::Dollar;
                    }
                    Some('\r') | Some('\n') => {
                        if self.paren_depth > 0 {
                            // inside parens line endings are not recognized
                            self.consume();
                        } else {
                            self.state = State::EOL;
                        }
                    }
                    Some('"') => {
                        self.consume();
                        char_data = Some(String::new());
                        self.state = State::Quote;
                    }
                    Some(';') => self.state = State::Comment,
                    Some(ch) if ch.is_whitespace() => {
                        self.consume(); // gobble other whitespace
                    }
                    Some(ch) if !ch.is_control() => {
                        char_data = Some(String::new());
                        self.state = State::CharData;
                    }
                    Some(ch) => return Err(self.error(LexerErrorKind::UnrecognizedChar(ch))),
                    None => {
                        self.state = State::EOF;
                    }
                },
                State::Blank => {
                    // consume the whitespace
                    self.consume();
                    self.state = State::RestOfLine;
                    let pos = self.pos();
                    return Ok(Some((Token::Blank, pos)));
                }
                State::Comment => match ch {
                    // out of the comment; the newline is handled by RestOfLine
                    Some('\r') | Some('\n') => self.state = State::RestOfLine,
                    Some(_) => {
                        self.consume();
                    }
                    None => {
                        self.state = State::EOF;
                    }
                },
                State::Quote => match ch {
                    // end and gobble the '"'
                    Some('"') => {
                        self.consume();
                        self.state = State::RestOfLine;
                        let pos = self.pos();
                        return Ok(Some((
                            Token::Quoted(char_data.take().unwrap_or_default()),
                            pos,
                        )));
                    }
                    Some('\\') => {
                        let ch = self.escape_seq()?;
                        push_to_str(&mut char_data, ch);
                    }
                    // an embedded newline is preserved in the string
                    Some(ch) => {
                        self.consume();
                        push_to_str(&mut char_data, ch);
                    }
                    None => return Err(self.error(LexerErrorKind::UnclosedQuotedString)),
                },
                State::Dollar => match ch {
                    Some(ch @ 'A'..='Z') => {
                        self.consume();
                        push_to_str(&mut char_data, ch);
                    }
                    // finishes the Dollar...
                    Some(_) | None => {
                        self.state = State::RestOfLine;
                        let dollar = char_data.take().unwrap_or_default();
                        let pos = self.pos();

                        return Ok(Some((
                            match dollar.as_str() {
                                "INCLUDE" => Token::Include,
                                "ORIGIN" => Token::Origin,
                                "TTL" => Token::Ttl,
                                _ => {
                                    return Err(
                                        self.error(LexerErrorKind::UnrecognizedDollar(dollar))
                                    )
                                }
                            },
                            pos,
                        )));
                    }
                },
                State::CharData => match ch {
                    // a backslash carries the escape into the token untouched; the
                    // consumer (Name::parse, the rdata parsers) unescapes
                    Some('\\') => {
                        self.consume();
                        push_to_str(&mut char_data, '\\');
                        let Some(escaped) = self.consume() else {
                            return Err(self.error(LexerErrorKind::EOF));
                        };
                        push_to_str(&mut char_data, escaped);
                    }
                    // delimiters end the token and stay in the input
                    Some(ch)
                        if ch.is_whitespace()
                            || ch == ')'
                            || ch == '('
                            || ch == ';'
                            || ch == '"' =>
                    {
                        self.state = State::RestOfLine;
                        let pos = self.pos();
                        return Ok(Some((
                            Token::CharData(char_data.take().unwrap_or_default()),
                            pos,
                        )));
                    }
                    Some(ch) if !ch.is_control() => {
                        self.consume();
                        push_to_str(&mut char_data, ch);
                    }
                    Some(ch) => return Err(self.error(LexerErrorKind::UnrecognizedChar(ch))),
                    None => {
                        self.state = State::EOF;
                        let pos = self.pos();
                        return Ok(Some((
                            Token::CharData(char_data.take().unwrap_or_default()),
                            pos,
                        )));
                    }
                },
                State::EOL => match ch {
                    Some('\r') => {
                        self.consume();
                    }
                    Some('\n') => {
                        let pos = self.pos();
                        self.consume();
                        self.state = State::StartLine;
                        return Ok(Some((Token::EOL, pos)));
                    }
                    Some(ch) => return Err(self.error(LexerErrorKind::IllegalCharacter(ch))),
                    None => return Err(self.error(LexerErrorKind::EOF)),
                },
                State::EOF => {
                    if self.paren_depth > 0 {
                        return Err(self.error(LexerErrorKind::UnbalancedParens));
                    }
                    self.txt.next(); // making sure we consume the last... it will always return None after.
                    return Ok(None);
                }
            }
        }
    }

    fn escape_seq(&mut self) -> LexerResult<char> {
        // escaped character, let's decode it.
        self.consume(); // consume the escape
        let ch = self
            .peek()
            .ok_or_else(|| self.error(LexerErrorKind::EOF))?;

        if ch.is_control() && ch != '\n' {
            return Err(self.error(LexerErrorKind::IllegalCharacter(ch)));
        }

        if ch.is_ascii_digit() {
            // in this case it's a decimal escape: \DDD
            let mut val: u32 = 0;
            for _ in 0..3 {
                let d = self
                    .consume()
                    .ok_or_else(|| self.error(LexerErrorKind::EOF))?;
                let d = d
                    .to_digit(10)
                    .ok_or_else(|| self.error(LexerErrorKind::IllegalCharacter(d)))?;
                val = val * 10 + d;
            }

            char::from_u32(val).ok_or_else(|| self.error(LexerErrorKind::IllegalCharacter('\\')))
        } else {
            // this is an escaped char: \X
            self.consume(); // gobble the char
            Ok(ch)
        }
    }
}

fn push_to_str(collect: &mut Option<String>, ch: char) {
    collect.get_or_insert_with(String::new).push(ch);
}

struct CowChars<'a> {
    data: Cow<'a, str>,
    offset: usize,
}

impl Iterator for CowChars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let mut iter = self.data[self.offset..].char_indices();
        let (_, ch) = iter.next()?; // The returned index is always `0`
        match iter.next() {
            Some((idx, _)) => self.offset += idx,
            None => self.offset = self.data.len(),
        }

        Some(ch)
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
enum State {
    StartLine,
    RestOfLine,
    Blank,    // only if the first part of the line
    CharData, // unquoted chars, escapes carried through raw
    Comment,  // ;.*
    Quote,    // ".*", escapes decoded
    Dollar,   // $
    EOL,      // \n or \r\n
    EOF,
}

/// Tokens emitted from each Lexer pass
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Token {
    /// Whitespace at the start of a line: the owner is inherited
    Blank,
    /// A bare string, e.g. an owner name, a TTL, or rdata fields
    CharData(String),
    /// A `"`-delimited string, escapes already decoded
    Quoted(String),
    /// @, a free standing @ denotes the current origin
    At,
    /// $INCLUDE
    Include,
    /// $ORIGIN
    Origin,
    /// $TTL
    Ttl,
    /// \n or \r\n
    EOL,
}

#[cfg(test)]
mod lex_test {
    use super::*;

    fn next_token(lexer: &mut Lexer<'_>) -> Option<Token> {
        let result = lexer.next_token();
        assert!(result.is_ok(), "{result:?}");
        result.unwrap().map(|(token, _)| token)
    }

    fn chardata(text: &str) -> Option<Token> {
        Some(Token::CharData(text.to_string()))
    }

    #[test]
    fn blank() {
        // first blank
        let mut lexer = Lexer::new("     dead beef");
        assert_eq!(next_token(&mut lexer), Some(Token::Blank));
        assert_eq!(next_token(&mut lexer), chardata("dead"));
        assert_eq!(next_token(&mut lexer), chardata("beef"));

        // not the second blank
        let mut lexer = Lexer::new("dead beef");
        assert_eq!(next_token(&mut lexer), chardata("dead"));
        assert_eq!(next_token(&mut lexer), chardata("beef"));

        let mut lexer = Lexer::new("dead beef\r\n after");
        assert_eq!(next_token(&mut lexer), chardata("dead"));
        assert_eq!(next_token(&mut lexer), chardata("beef"));
        assert_eq!(next_token(&mut lexer), Some(Token::EOL));
        assert_eq!(next_token(&mut lexer), Some(Token::Blank));
        assert_eq!(next_token(&mut lexer), chardata("after"));
    }

    #[test]
    fn lex() {
        assert_eq!(next_token(&mut Lexer::new(".")), chardata("."));
        assert_eq!(next_token(&mut Lexer::new("            .")), Some(Token::Blank));
        assert_eq!(next_token(&mut Lexer::new("abc")), chardata("abc"));
        assert_eq!(next_token(&mut Lexer::new("abc.")), chardata("abc."));
        assert_eq!(next_token(&mut Lexer::new(";abc")), None);
        assert_eq!(next_token(&mut Lexer::new(";;@$-\"")), None);
        assert_eq!(next_token(&mut Lexer::new("@")), Some(Token::At));
        assert_eq!(next_token(&mut Lexer::new("123")), chardata("123"));
        assert_eq!(next_token(&mut Lexer::new("$INCLUDE")), Some(Token::Include));
        assert_eq!(next_token(&mut Lexer::new("$ORIGIN")), Some(Token::Origin));
        assert_eq!(next_token(&mut Lexer::new("$TTL")), Some(Token::Ttl));
        assert_eq!(next_token(&mut Lexer::new("\n")), Some(Token::EOL));
        assert_eq!(next_token(&mut Lexer::new("\r\n")), Some(Token::EOL));
        assert!(Lexer::new("$HELLO").next_token().is_err());
    }

    #[test]
    fn quoted() {
        assert_eq!(
            next_token(&mut Lexer::new("\"Quoted\"")),
            Some(Token::Quoted("Quoted".to_string()))
        );
        assert_eq!(
            next_token(&mut Lexer::new("\";@$\"")),
            Some(Token::Quoted(";@$".to_string()))
        );
        assert_eq!(
            next_token(&mut Lexer::new("\"a\\\"a\"")),
            Some(Token::Quoted("a\"a".to_string()))
        );
        // an embedded newline is preserved
        assert_eq!(
            next_token(&mut Lexer::new("\"a\n bc\"")),
            Some(Token::Quoted("a\n bc".to_string()))
        );
        // decimal escape
        assert_eq!(
            next_token(&mut Lexer::new("\"a\\065\"")),
            Some(Token::Quoted("aA".to_string()))
        );

        assert!(Lexer::new("\"unclosed").next_token().is_err());
    }

    #[test]
    fn escapes_stay_in_chardata() {
        assert_eq!(next_token(&mut Lexer::new("a\\.b")), chardata("a\\.b"));
        assert_eq!(next_token(&mut Lexer::new("a\\065")), chardata("a\\065"));
    }

    #[test]
    fn parens_vanish_inline() {
        // parens do not split tokens
        let mut lexer = Lexer::new("7(2)00");
        assert_eq!(next_token(&mut lexer), chardata("7200"));

        let mut lexer = Lexer::new("604()800");
        assert_eq!(next_token(&mut lexer), chardata("604800"));

        let mut lexer = Lexer::new("(miek.nl.) (A) (127.0.0.1)");
        assert_eq!(next_token(&mut lexer), chardata("miek.nl."));
        assert_eq!(next_token(&mut lexer), chardata("A"));
        assert_eq!(next_token(&mut lexer), chardata("127.0.0.1"));
        assert_eq!(next_token(&mut lexer), None);
    }

    #[test]
    fn parens_swallow_newlines() {
        let mut lexer = Lexer::new("( 20 ; SERIAL\n 7200 )\n");
        assert_eq!(next_token(&mut lexer), chardata("20"));
        assert_eq!(next_token(&mut lexer), chardata("7200"));
        assert_eq!(next_token(&mut lexer), Some(Token::EOL));
        assert_eq!(next_token(&mut lexer), None);
    }

    #[test]
    fn unbalanced_parens() {
        assert!(Lexer::new(")").next_token().is_err());

        let mut lexer = Lexer::new("(never closed");
        assert_eq!(next_token(&mut lexer), chardata("never"));
        assert_eq!(next_token(&mut lexer), chardata("closed"));
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn comments_do_not_eat_newlines() {
        let mut lexer = Lexer::new("dead ;comment\nbeef");
        assert_eq!(next_token(&mut lexer), chardata("dead"));
        assert_eq!(next_token(&mut lexer), Some(Token::EOL));
        assert_eq!(next_token(&mut lexer), chardata("beef"));
    }

    #[test]
    fn positions() {
        // "example.com. 1000" : the first token completes at the delimiter
        let mut lexer = Lexer::new("example.com. 1000\n");
        let (token, pos) = lexer.next_token().unwrap().unwrap();
        assert_eq!(token, Token::CharData("example.com.".to_string()));
        assert_eq!((pos.line, pos.col), (1, 13));

        let (token, pos) = lexer.next_token().unwrap().unwrap();
        assert_eq!(token, Token::CharData("1000".to_string()));
        assert_eq!((pos.line, pos.col), (1, 18));

        let (token, pos) = lexer.next_token().unwrap().unwrap();
        assert_eq!(token, Token::EOL);
        assert_eq!(pos.line, 1);

        assert!(lexer.next_token().unwrap().is_none());
    }
}
