// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! option record for passing protocol options between the client and server

use std::fmt;

use crate::error::ProtoResult;
use crate::serialize::binary::{BinDecoder, BinEncoder};

/// [RFC 6891, EDNS(0) Extensions, April 2013](https://tools.ietf.org/html/rfc6891#section-6.1.2)
///
/// ```text
/// 6.1.2.  Wire Format
///
///        +------------+--------------+------------------------------+
///        | Field Name | Field Type   | Description                  |
///        +------------+--------------+------------------------------+
///        | NAME       | domain name  | MUST be 0 (root domain)      |
///        | TYPE       | u_int16_t    | OPT (41)                     |
///        | CLASS      | u_int16_t    | requestor's UDP payload size |
///        | TTL        | u_int32_t    | extended RCODE and flags     |
///        | RDLEN      | u_int16_t    | length of all RDATA          |
///        | RDATA      | octet stream | {attribute,value} pairs      |
///        +------------+--------------+------------------------------+
///
/// The variable part of an OPT RR may contain zero or more options in
///    the RDATA.  Each option MUST be treated as a bit field.  Each option
///    is encoded as:
///
///                   +0 (MSB)                            +1 (LSB)
///        +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///     0: |                          OPTION-CODE                          |
///        +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///     2: |                         OPTION-LENGTH                         |
///        +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///     4: |                                                               |
///        /                          OPTION-DATA                          /
///        /                                                               /
///        +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
/// ```
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct OPT {
    options: Vec<EdnsOption>,
}

impl OPT {
    /// Creates a new OPT record data.
    ///
    /// # Arguments
    ///
    /// * `options` - the options to pass on the wire, in order
    pub fn new(options: Vec<EdnsOption>) -> Self {
        Self { options }
    }

    /// The options in this OPT, in wire order
    pub fn options(&self) -> &[EdnsOption] {
        &self.options
    }

    /// Returns the first option with the associated code, if present
    pub fn get(&self, code: EdnsCode) -> Option<&EdnsOption> {
        self.options.iter().find(|o| o.code() == code)
    }

    /// Insert a new option
    pub fn insert(&mut self, option: EdnsOption) {
        self.options.push(option);
    }
}

pub(crate) fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> ProtoResult<OPT> {
    let mut state = OptReadState::ReadCode;
    let mut options = Vec::new();
    let start_idx = decoder.index();

    while decoder.index() - start_idx < rdata_length as usize {
        state = match state {
            OptReadState::ReadCode => OptReadState::Code {
                code: EdnsCode::from(decoder.read_u16()?),
            },
            OptReadState::Code { code } => {
                let length = decoder.read_u16()? as usize;
                let data = decoder.read_vec(length)?;
                options.push(EdnsOption::from_code_data(code, data));
                OptReadState::ReadCode
            }
        };
    }

    if !matches!(state, OptReadState::ReadCode) {
        // there was some problem parsing the options
        return Err("incomplete option in OPT rdata".into());
    }

    Ok(OPT::new(options))
}

pub(crate) fn emit(encoder: &mut BinEncoder<'_>, opt: &OPT) -> ProtoResult<()> {
    for option in opt.options() {
        encoder.emit_u16(option.code().into())?;
        let data = option.data();
        encoder.emit_u16(data.len() as u16)?;
        encoder.emit_vec(data)?;
    }
    Ok(())
}

enum OptReadState {
    ReadCode,
    Code { code: EdnsCode },
}

/// The OPT record has no presentation format, this is here for debugging output
impl fmt::Display for OPT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for option in &self.options {
            write!(f, "{:?} ", option.code())?;
        }
        Ok(())
    }
}

/// The code of the EDNS data option
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Hash, Copy, Clone)]
#[non_exhaustive]
pub enum EdnsCode {
    /// [RFC 5001, DNS Name Server Identifier (NSID) Option](https://tools.ietf.org/html/rfc5001)
    NSID,
    /// Unknown, used to deal with unknown or unsupported codes
    Unknown(u16),
}

impl From<u16> for EdnsCode {
    fn from(value: u16) -> Self {
        match value {
            3 => Self::NSID,
            _ => Self::Unknown(value),
        }
    }
}

impl From<EdnsCode> for u16 {
    fn from(code: EdnsCode) -> Self {
        match code {
            EdnsCode::NSID => 3,
            EdnsCode::Unknown(value) => value,
        }
    }
}

/// An EDNS option: an option code and its opaque data
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum EdnsOption {
    /// Name server identifier, RFC 5001
    NSID(Vec<u8>),
    /// Unknown or unsupported option, round-trips untouched
    Unknown(u16, Vec<u8>),
}

impl EdnsOption {
    pub(crate) fn from_code_data(code: EdnsCode, data: Vec<u8>) -> Self {
        match code {
            EdnsCode::NSID => Self::NSID(data),
            EdnsCode::Unknown(value) => Self::Unknown(value, data),
        }
    }

    /// The code of this option
    pub fn code(&self) -> EdnsCode {
        match self {
            Self::NSID(..) => EdnsCode::NSID,
            Self::Unknown(value, ..) => EdnsCode::Unknown(*value),
        }
    }

    /// The raw option data
    pub fn data(&self) -> &[u8] {
        match self {
            Self::NSID(data) => data,
            Self::Unknown(_, data) => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut rdata = OPT::default();
        rdata.insert(EdnsOption::NSID(b"ns1".to_vec()));
        rdata.insert(EdnsOption::Unknown(65001, vec![0xde, 0xad]));

        let mut bytes = Vec::new();
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            emit(&mut encoder, &rdata).unwrap();
        }

        let mut decoder = BinDecoder::new(&bytes);
        let read_rdata = read(&mut decoder, bytes.len() as u16).expect("decoding error");
        assert_eq!(read_rdata, rdata);
        assert_eq!(
            read_rdata.get(EdnsCode::NSID),
            Some(&EdnsOption::NSID(b"ns1".to_vec()))
        );
    }

    #[test]
    fn test_truncated_option() {
        // NSID code, claims 4 bytes, provides none
        let bytes = [0_u8, 3, 0, 4];
        let mut decoder = BinDecoder::new(&bytes);
        assert!(read(&mut decoder, bytes.len() as u16).is_err());
    }
}
