// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parser for the LOC presentation form of RFC 1876:
//!
//! ```text
//! <owner> LOC d1 [m1 [s1]] {"N"|"S"} d2 [m2 [s2]] {"E"|"W"} alt["m"]
//!         [siz["m"] [hp["m"] [vp["m"]]]]
//! ```

use crate::rr::rdata::loc::{self, LOC};
use crate::serialize::txt::errors::{ParseError, ParseErrorKind, ParseResult};
use crate::serialize::txt::rdata_parsers::next_field;
use crate::serialize::txt::Tok;

/// 2^31, the equator and the prime meridian
const MID: u64 = 0x8000_0000;

/// Parse the RData from a set of tokens
pub(crate) fn parse(tokens: &[Tok]) -> ParseResult<LOC> {
    let mut tokens = tokens.iter();

    let (latitude, _) = parse_arc(&mut tokens, 90, 'N', 'S', "LOC latitude")?;
    let (longitude, _) = parse_arc(&mut tokens, 180, 'E', 'W', "LOC longitude")?;

    let altitude = next_field(&mut tokens, "LOC altitude")?;
    let alt_cm = parse_meters(altitude, "LOC altitude")?;
    if !(-10_000_000.0..=4_293_967_295.0).contains(&alt_cm) {
        return Err(altitude.bad("LOC altitude"));
    }
    let altitude = (alt_cm + 10_000_000.0).round() as u32;

    // the three precision fields are optional with RFC 1876 defaults
    let mut precision = |what: &'static str, default: u8| -> ParseResult<u8> {
        match tokens.next() {
            None => Ok(default),
            Some(token) => {
                let cm = parse_meters(token, what)?;
                if !(0.0..=9e9).contains(&cm) {
                    return Err(token.bad(what));
                }
                Ok(loc::encode_precision(cm.round() as u64))
            }
        }
    };

    let size = precision("LOC size", loc::DEFAULT_SIZE)?;
    let horiz_pre = precision("LOC horizontal precision", loc::DEFAULT_HORIZ_PRE)?;
    let vert_pre = precision("LOC vertical precision", loc::DEFAULT_VERT_PRE)?;

    Ok(LOC::new(
        0,
        size,
        horiz_pre,
        vert_pre,
        latitude,
        longitude,
        altitude,
    ))
}

/// Parse `d [m [s]] H` into thousandths of an arc second offset from 2^31
fn parse_arc(
    tokens: &mut std::slice::Iter<'_, Tok>,
    max_degrees: u64,
    pos_hemisphere: char,
    neg_hemisphere: char,
    what: &'static str,
) -> ParseResult<(u32, char)> {
    let degrees_token = next_field(tokens, what)?;
    let degrees: u64 = degrees_token
        .text
        .parse()
        .map_err(|_| degrees_token.bad(what))?;
    if degrees > max_degrees {
        return Err(degrees_token.bad(what));
    }

    let mut minutes = 0_u64;
    let mut milliseconds = 0_u64;
    let mut hemisphere = None;

    // minutes, then fractional seconds, each optional before the hemisphere
    for part in 0..3 {
        let token = next_field(tokens, what)?;
        let text = token.text.as_str();

        if text.len() == 1 {
            let ch = text.chars().next().expect("length checked");
            if ch == pos_hemisphere || ch == neg_hemisphere {
                hemisphere = Some(ch);
                break;
            }
        }

        match part {
            0 => {
                minutes = text.parse().map_err(|_| token.bad(what))?;
                if minutes > 59 {
                    return Err(token.bad(what));
                }
            }
            1 => {
                let seconds: f64 = text.parse().map_err(|_| token.bad(what))?;
                if !(0.0..60.0).contains(&seconds) {
                    return Err(token.bad(what));
                }
                milliseconds = (seconds * 1000.0).round() as u64;
            }
            _ => return Err(token.bad(what)),
        }
    }

    let hemisphere = match hemisphere {
        Some(h) => h,
        None => {
            let token = next_field(tokens, what)?;
            let text = token.text.as_str();
            match text.chars().next() {
                Some(ch) if text.len() == 1 && (ch == pos_hemisphere || ch == neg_hemisphere) => ch,
                _ => return Err(token.bad(what)),
            }
        }
    };

    let total_ms = (degrees * 3600 + minutes * 60) * 1000 + milliseconds;
    let offset = if hemisphere == pos_hemisphere {
        MID + total_ms
    } else {
        MID - total_ms
    };

    let offset = u32::try_from(offset).map_err(|_| {
        ParseError::from(ParseErrorKind::Msg(format!("{what} out of range")))
    })?;

    Ok((offset, hemisphere))
}

/// Parse a meter value, the trailing `m` is optional, into centimeters
fn parse_meters(token: &Tok, what: &'static str) -> ParseResult<f64> {
    let text = token
        .text
        .strip_suffix(|c| c == 'm' || c == 'M')
        .unwrap_or(&token.text);
    let meters: f64 = text.parse().map_err(|_| token.bad(what))?;
    Ok(meters * 100.0)
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
    fn test_parse_full() {
        let loc = parse(&toks("51 30 12.748 N 00 07 39.611 W 0.00m 0.00m 0.00m 0.00m")).unwrap();
        assert_eq!(
            loc.to_string(),
            "51 30 12.748 N 00 07 39.611 W 0.00m 0.00m 0.00m 0.00m"
        );
    }

    #[test]
    fn test_parse_zero_minutes_renders_canonical() {
        let loc = parse(&toks("51 0 0.0 N 00 07 39.611 W 0.00m 0.00m 0.00m 0.00m")).unwrap();
        assert_eq!(
            loc.to_string(),
            "51 00 0.000 N 00 07 39.611 W 0.00m 0.00m 0.00m 0.00m"
        );
    }

    #[test]
    fn test_defaults() {
        let loc = parse(&toks("51 30 N 2 E 5m")).unwrap();
        assert_eq!(loc.to_string(), "51 30 0.000 N 02 00 0.000 E 5.00m 1.00m 10000.00m 10.00m");
    }

    #[test]
    fn test_bad_latitude() {
        assert!(parse(&toks("91 0 0 N 0 0 0 E 0m")).is_err());
        assert!(parse(&toks("x 0 0 N 0 0 0 E 0m")).is_err());
    }
}
