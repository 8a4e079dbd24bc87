// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Message metadata

use std::fmt;

use crate::error::ProtoResult;
use crate::op::{OpCode, ResponseCode};
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncodable, BinEncoder};

/// Metadata for the `Message` struct.
///
/// [RFC 1035, DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987](https://tools.ietf.org/html/rfc1035)
///
/// ```text
/// 4.1.1. Header section format
///
/// The header contains the following fields
///
///                                    1  1  1  1  1  1
///      0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
///    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///    |                      ID                       |
///    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///    |QR|   Opcode  |AA|TC|RD|RA| Z|AD|CD|   RCODE   |
///    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///    |                    QDCOUNT                    |
///    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///    |                    ANCOUNT                    |
///    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///    |                    NSCOUNT                    |
///    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///    |                    ARCOUNT                    |
///    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// The Z bit is reserved, always masked off and written as zero.
#[derive(Clone, Debug, PartialEq, Eq, Copy, Hash)]
pub struct Header {
    id: u16,
    message_type: MessageType,
    op_code: OpCode,
    authoritative: bool,
    truncation: bool,
    recursion_desired: bool,
    recursion_available: bool,
    authentic_data: bool,
    checking_disabled: bool,
    response_code: ResponseCode,
    query_count: u16,
    answer_count: u16,
    name_server_count: u16,
    additional_count: u16,
}

/// Message types are either Query (also Update) or Response
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum MessageType {
    /// Queries are Client requests, these are either Queries or Updates
    Query,
    /// Response message from the Server or upstream Resolver
    Response,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Query => "QUERY",
            Self::Response => "RESPONSE",
        };

        f.write_str(s)
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Header {
    /// A default Header, not very useful.
    pub fn new() -> Self {
        Self {
            id: 0,
            message_type: MessageType::Query,
            op_code: OpCode::Query,
            authoritative: false,
            truncation: false,
            recursion_desired: false,
            recursion_available: false,
            authentic_data: false,
            checking_disabled: false,
            response_code: ResponseCode::default(),
            query_count: 0,
            answer_count: 0,
            name_server_count: 0,
            additional_count: 0,
        }
    }

    /// Length of the header, always 12 bytes
    #[inline(always)]
    pub fn len() -> usize {
        12
    }

    /// Sets the transaction id of the message
    pub fn set_id(&mut self, id: u16) -> &mut Self {
        self.id = id;
        self
    }

    /// Sets the message type, Query or Response
    pub fn set_message_type(&mut self, message_type: MessageType) -> &mut Self {
        self.message_type = message_type;
        self
    }

    /// Sets the operation code for the message
    pub fn set_op_code(&mut self, op_code: OpCode) -> &mut Self {
        self.op_code = op_code;
        self
    }

    /// From the server is specifies that it is an authoritative response
    pub fn set_authoritative(&mut self, authoritative: bool) -> &mut Self {
        self.authoritative = authoritative;
        self
    }

    /// Specifies that the message was truncated, the caller decides this after packing
    pub fn set_truncated(&mut self, truncated: bool) -> &mut Self {
        self.truncation = truncated;
        self
    }

    /// Specify that the resolver should recursively request data from upstream servers
    pub fn set_recursion_desired(&mut self, recursion_desired: bool) -> &mut Self {
        self.recursion_desired = recursion_desired;
        self
    }

    /// Specifies that recursion is available from this or the remote resolver
    pub fn set_recursion_available(&mut self, recursion_available: bool) -> &mut Self {
        self.recursion_available = recursion_available;
        self
    }

    /// Specifies that the data is authentic, i.e. the resolver believes all data to be valid through DNSSEC
    pub fn set_authentic_data(&mut self, authentic_data: bool) -> &mut Self {
        self.authentic_data = authentic_data;
        self
    }

    /// Used during recursive resolution to specify if a resolver should or should not validate DNSSEC signatures
    pub fn set_checking_disabled(&mut self, checking_disabled: bool) -> &mut Self {
        self.checking_disabled = checking_disabled;
        self
    }

    /// The low response code (original response codes before EDNS extensions)
    pub fn set_response_code(&mut self, response_code: ResponseCode) -> &mut Self {
        self.response_code = response_code;
        self
    }

    /// Number of queries in the message
    pub fn set_query_count(&mut self, query_count: u16) -> &mut Self {
        self.query_count = query_count;
        self
    }

    /// Number of answers in the message
    pub fn set_answer_count(&mut self, answer_count: u16) -> &mut Self {
        self.answer_count = answer_count;
        self
    }

    /// Number of authority records in the message
    pub fn set_name_server_count(&mut self, name_server_count: u16) -> &mut Self {
        self.name_server_count = name_server_count;
        self
    }

    /// Number of additional records in the message
    pub fn set_additional_count(&mut self, additional_count: u16) -> &mut Self {
        self.additional_count = additional_count;
        self
    }

    /// ```text
    /// ID              A 16 bit identifier assigned by the program that
    ///                 generates any kind of query.  This identifier is copied
    ///                 the corresponding reply and can be used by the requester
    ///                 to match up replies to outstanding queries.
    /// ```
    pub fn id(&self) -> u16 {
        self.id
    }

    /// ```text
    /// QR              A one bit field that specifies whether this message is a
    ///                 query (0), or a response (1).
    /// ```
    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// ```text
    /// OPCODE          A four bit field that specifies kind of query in this
    ///                 message.
    /// ```
    pub fn op_code(&self) -> OpCode {
        self.op_code
    }

    /// ```text
    /// AA              Authoritative Answer - this bit is valid in responses.
    /// ```
    pub fn authoritative(&self) -> bool {
        self.authoritative
    }

    /// ```text
    /// TC              TrunCation - specifies that this message was truncated.
    /// ```
    pub fn truncated(&self) -> bool {
        self.truncation
    }

    /// ```text
    /// RD              Recursion Desired - this bit may be set in a query.
    /// ```
    pub fn recursion_desired(&self) -> bool {
        self.recursion_desired
    }

    /// ```text
    /// RA              Recursion Available.
    /// ```
    pub fn recursion_available(&self) -> bool {
        self.recursion_available
    }

    /// RFC 4035, the AD bit
    pub fn authentic_data(&self) -> bool {
        self.authentic_data
    }

    /// RFC 4035, the CD bit
    pub fn checking_disabled(&self) -> bool {
        self.checking_disabled
    }

    /// The low 4 bits of the response code
    pub fn response_code(&self) -> ResponseCode {
        self.response_code
    }

    /// ```text
    /// QDCOUNT         an unsigned 16 bit integer specifying the number of
    ///                 entries in the question section.
    /// ```
    pub fn query_count(&self) -> u16 {
        self.query_count
    }

    /// ```text
    /// ANCOUNT         an unsigned 16 bit integer specifying the number of
    ///                 resource records in the answer section.
    /// ```
    pub fn answer_count(&self) -> u16 {
        self.answer_count
    }

    /// ```text
    /// NSCOUNT         an unsigned 16 bit integer specifying the number of name
    ///                 server resource records in the authority records section.
    /// ```
    pub fn name_server_count(&self) -> u16 {
        self.name_server_count
    }

    /// ```text
    /// ARCOUNT         an unsigned 16 bit integer specifying the number of
    ///                 resource records in the additional records section.
    /// ```
    pub fn additional_count(&self) -> u16 {
        self.additional_count
    }
}

impl BinEncodable for Header {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()> {
        encoder.emit_u16(self.id)?;

        // the flags u16: QR | Opcode x4 | AA | TC | RD | RA | Z | AD | CD | RCODE x4
        let mut flags: u16 = 0;
        if self.message_type == MessageType::Response {
            flags |= 0x8000;
        }
        flags |= u16::from(u8::from(self.op_code)) << 11;
        if self.authoritative {
            flags |= 0x0400;
        }
        if self.truncation {
            flags |= 0x0200;
        }
        if self.recursion_desired {
            flags |= 0x0100;
        }
        if self.recursion_available {
            flags |= 0x0080;
        }
        // Z bit stays zero
        if self.authentic_data {
            flags |= 0x0020;
        }
        if self.checking_disabled {
            flags |= 0x0010;
        }
        flags |= u16::from(self.response_code.low());

        encoder.emit_u16(flags)?;
        encoder.emit_u16(self.query_count)?;
        encoder.emit_u16(self.answer_count)?;
        encoder.emit_u16(self.name_server_count)?;
        encoder.emit_u16(self.additional_count)
    }
}

impl<'r> BinDecodable<'r> for Header {
    fn read(decoder: &mut BinDecoder<'r>) -> ProtoResult<Self> {
        let id = decoder.read_u16()?;
        let flags = decoder.read_u16()?;

        let message_type = if flags & 0x8000 == 0x8000 {
            MessageType::Response
        } else {
            MessageType::Query
        };
        let op_code = OpCode::from_u8(((flags & 0x7800) >> 11) as u8)?;
        let authoritative = flags & 0x0400 == 0x0400;
        let truncation = flags & 0x0200 == 0x0200;
        let recursion_desired = flags & 0x0100 == 0x0100;
        let recursion_available = flags & 0x0080 == 0x0080;
        let authentic_data = flags & 0x0020 == 0x0020;
        let checking_disabled = flags & 0x0010 == 0x0010;
        let response_code = ResponseCode::from(0, (flags & 0x000F) as u8);

        let query_count = decoder.read_u16()?;
        let answer_count = decoder.read_u16()?;
        let name_server_count = decoder.read_u16()?;
        let additional_count = decoder.read_u16()?;

        Ok(Self {
            id,
            message_type,
            op_code,
            authoritative,
            truncation,
            recursion_desired,
            recursion_available,
            authentic_data,
            checking_disabled,
            response_code,
            query_count,
            answer_count,
            name_server_count,
            additional_count,
        })
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{id}:{message_type}:{op_code}:{response_code}:{answers}/{authorities}/{additionals}",
            id = self.id,
            message_type = self.message_type,
            op_code = self.op_code,
            response_code = self.response_code,
            answers = self.answer_count,
            authorities = self.name_server_count,
            additionals = self.additional_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::binary::{BinDecoder, BinEncoder};

    #[test]
    fn test_emit_and_read() {
        let mut header = Header::new();
        header
            .set_id(10)
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Update)
            .set_authoritative(true)
            .set_truncated(true)
            .set_recursion_desired(true)
            .set_recursion_available(true)
            .set_authentic_data(true)
            .set_checking_disabled(true)
            .set_response_code(ResponseCode::ServFail)
            .set_query_count(1)
            .set_answer_count(2)
            .set_name_server_count(3)
            .set_additional_count(4);

        let mut bytes = Vec::with_capacity(512);
        {
            let mut encoder = BinEncoder::new(&mut bytes);
            header.emit(&mut encoder).unwrap();
        }
        assert_eq!(bytes.len(), Header::len());

        let mut decoder = BinDecoder::new(&bytes);
        let got = Header::read(&mut decoder).unwrap();

        assert_eq!(got, header);
    }

    #[test]
    fn test_z_bit_masked_off() {
        // identical header with and without the reserved Z bit set on the wire
        let bytes: Vec<u8> = vec![0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut z = bytes.clone();
        z[3] = 0b0100_0000;

        let a = Header::read(&mut BinDecoder::new(&bytes)).unwrap();
        let b = Header::read(&mut BinDecoder::new(&z)).unwrap();
        assert_eq!(a, b);
    }
}
