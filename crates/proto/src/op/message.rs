// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Basic protocol message for DNS

use std::fmt;

use tracing::debug;

use crate::error::{ProtoErrorKind, ProtoResult};
use crate::op::{Edns, Header, MessageType, OpCode, Query, ResponseCode};
use crate::rr::{Record, RecordType};
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncodable, BinEncoder, EncodeMode};

/// The basic request and response data structure, used for all DNS protocols.
///
/// [RFC 1035, DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987](https://tools.ietf.org/html/rfc1035)
///
/// ```text
/// 4.1. Format
///
/// All communications inside of the domain protocol are carried in a single
/// format called a message.  The top level format of message is divided
/// into 5 sections (some of which are empty in certain cases) shown below:
///
///     +--------------------------+
///     |        Header            |
///     +--------------------------+
///     |  Question / Zone         | the question for the name server
///     +--------------------------+
///     |   Answer  / Prerequisite | RRs answering the question
///     +--------------------------+
///     | Authority / Update       | RRs pointing toward an authority
///     +--------------------------+
///     |      Additional          | RRs holding additional information
///     +--------------------------+
/// ```
///
/// All names in a decoded message are stored uncompressed; compression is
/// purely an on-the-wire optimization. The codec never sets the TC bit, a
/// caller that clips a packed message to its MTU decides on truncation.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Message {
    header: Header,
    queries: Vec<Query>,
    answers: Vec<Record>,
    name_servers: Vec<Record>,
    additionals: Vec<Record>,
    edns: Option<Edns>,
}

impl Message {
    /// Returns a new "empty" Message
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a Message constructed with error details to return to a client
    ///
    /// # Arguments
    ///
    /// * `id` - message id should match the request message id
    /// * `op_code` - operation of the request
    /// * `response_code` - the error code for the response
    pub fn error_msg(id: u16, op_code: OpCode, response_code: ResponseCode) -> Self {
        let mut message = Self::new();
        message.set_message_type(MessageType::Response);
        message.set_id(id);
        message.set_response_code(response_code);
        message.set_op_code(op_code);

        message
    }

    /// Returns a new query Message with a random id
    ///
    /// The transport layer matches responses by this id; callers needing a
    /// deterministic id should use `set_id`.
    pub fn query() -> Self {
        let mut message = Self::new();
        message
            .set_id(rand::random())
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true);

        message
    }

    /// Replace the header with the given
    pub fn set_header(&mut self, header: Header) -> &mut Self {
        self.header = header;
        self
    }

    /// See [`Header::set_id`]
    pub fn set_id(&mut self, id: u16) -> &mut Self {
        self.header.set_id(id);
        self
    }

    /// See [`Header::set_message_type`]
    pub fn set_message_type(&mut self, message_type: MessageType) -> &mut Self {
        self.header.set_message_type(message_type);
        self
    }

    /// See [`Header::set_op_code`]
    pub fn set_op_code(&mut self, op_code: OpCode) -> &mut Self {
        self.header.set_op_code(op_code);
        self
    }

    /// See [`Header::set_authoritative`]
    pub fn set_authoritative(&mut self, authoritative: bool) -> &mut Self {
        self.header.set_authoritative(authoritative);
        self
    }

    /// See [`Header::set_truncated`]
    pub fn set_truncated(&mut self, truncated: bool) -> &mut Self {
        self.header.set_truncated(truncated);
        self
    }

    /// See [`Header::set_recursion_desired`]
    pub fn set_recursion_desired(&mut self, recursion_desired: bool) -> &mut Self {
        self.header.set_recursion_desired(recursion_desired);
        self
    }

    /// See [`Header::set_recursion_available`]
    pub fn set_recursion_available(&mut self, recursion_available: bool) -> &mut Self {
        self.header.set_recursion_available(recursion_available);
        self
    }

    /// See [`Header::set_authentic_data`]
    pub fn set_authentic_data(&mut self, authentic_data: bool) -> &mut Self {
        self.header.set_authentic_data(authentic_data);
        self
    }

    /// See [`Header::set_checking_disabled`]
    pub fn set_checking_disabled(&mut self, checking_disabled: bool) -> &mut Self {
        self.header.set_checking_disabled(checking_disabled);
        self
    }

    /// See [`Header::set_response_code`]
    pub fn set_response_code(&mut self, response_code: ResponseCode) -> &mut Self {
        self.header.set_response_code(response_code);
        self
    }

    /// Add a query to the Message, either the query response
    ///  or update records, etc.
    pub fn add_query(&mut self, query: Query) -> &mut Self {
        self.queries.push(query);
        self
    }

    /// Adds a record to the answer section
    pub fn add_answer(&mut self, record: Record) -> &mut Self {
        self.answers.push(record);
        self
    }

    /// Add all the records from the iterator to the answers section of the Message
    pub fn add_answers<R, I>(&mut self, records: R) -> &mut Self
    where
        R: IntoIterator<Item = Record, IntoIter = I>,
        I: Iterator<Item = Record>,
    {
        for record in records {
            self.add_answer(record);
        }

        self
    }

    /// Add a name server record to the authority section
    pub fn add_name_server(&mut self, record: Record) -> &mut Self {
        self.name_servers.push(record);
        self
    }

    /// Add an additional Record to the message
    pub fn add_additional(&mut self, record: Record) -> &mut Self {
        self.additionals.push(record);
        self
    }

    /// Sets the EDNS options for the Message
    pub fn set_edns(&mut self, edns: Edns) -> &mut Self {
        self.edns = Some(edns);
        self
    }

    /// Gets the header of the Message
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// See [`Header::id`]
    pub fn id(&self) -> u16 {
        self.header.id()
    }

    /// See [`Header::message_type`]
    pub fn message_type(&self) -> MessageType {
        self.header.message_type()
    }

    /// See [`Header::op_code`]
    pub fn op_code(&self) -> OpCode {
        self.header.op_code()
    }

    /// See [`Header::truncated`]
    pub fn truncated(&self) -> bool {
        self.header.truncated()
    }

    /// See [`Header::response_code`], combined with the EDNS extended code
    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from(
            self.edns.as_ref().map_or(0, Edns::rcode_high),
            self.header.response_code().low(),
        )
    }

    /// Returns the query section of the message
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    /// Returns the answer section of the message
    pub fn answers(&self) -> &[Record] {
        &self.answers
    }

    /// Returns the authority section of the message
    pub fn name_servers(&self) -> &[Record] {
        &self.name_servers
    }

    /// Returns the additional section of the message, the OPT pseudo record is
    /// not included here, see `edns()`
    pub fn additionals(&self) -> &[Record] {
        &self.additionals
    }

    /// Returns the EDNS options of the message, extracted from the OPT pseudo record
    pub fn edns(&self) -> Option<&Edns> {
        self.edns.as_ref()
    }

    /// Returns a mutable reference to the EDNS options, creating them if they do not exist
    pub fn edns_mut(&mut self) -> &mut Edns {
        self.edns.get_or_insert_with(Edns::new)
    }

    /// Consumes the message and returns the answer section
    pub fn take_answers(&mut self) -> Vec<Record> {
        std::mem::take(&mut self.answers)
    }

    /// Consumes the message and returns the additional section
    pub fn take_additionals(&mut self) -> Vec<Record> {
        std::mem::take(&mut self.additionals)
    }

    /// Decodes a message from the buffer
    pub fn from_vec(buffer: &[u8]) -> ProtoResult<Self> {
        let mut decoder = BinDecoder::new(buffer);
        Self::read(&mut decoder)
    }

    /// Encodes the Message into a buffer
    pub fn to_vec(&self) -> ProtoResult<Vec<u8>> {
        let mut buffer = Vec::with_capacity(512);
        {
            let mut encoder = BinEncoder::new(&mut buffer);
            self.emit(&mut encoder)?;
        }

        Ok(buffer)
    }
}

impl BinEncodable for Message {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()> {
        // the counts written to the header are the counts of what is actually
        //  emitted, the caller's header counts are ignored. The OPT pseudo
        //  record is not carried in Signing mode, SIG0 and TSIG cover the
        //  message without it.
        let include_edns = self.edns.is_some() && encoder.mode() != EncodeMode::Signing;
        let mut header = self.header;
        let additional_count = self.additionals.len() + usize::from(include_edns);

        if self.queries.len() > u16::MAX as usize
            || self.answers.len() > u16::MAX as usize
            || self.name_servers.len() > u16::MAX as usize
            || additional_count > u16::MAX as usize
        {
            return Err(ProtoErrorKind::Message("section count exceeds u16").into());
        }

        header
            .set_query_count(self.queries.len() as u16)
            .set_answer_count(self.answers.len() as u16)
            .set_name_server_count(self.name_servers.len() as u16)
            .set_additional_count(additional_count as u16);

        header.emit(encoder)?;

        for query in &self.queries {
            query.emit(encoder)?;
        }
        encoder.emit_all(self.answers.iter())?;
        encoder.emit_all(self.name_servers.iter())?;

        if include_edns {
            if let Some(edns) = &self.edns {
                edns.emit(encoder)?;
            }
        }

        // the additionals go last: a TSIG must be the final record of the message
        encoder.emit_all(self.additionals.iter())?;

        Ok(())
    }
}

impl<'r> BinDecodable<'r> for Message {
    fn read(decoder: &mut BinDecoder<'r>) -> ProtoResult<Self> {
        let header = Header::read(decoder)?;

        let mut queries = Vec::with_capacity(header.query_count() as usize);
        for _ in 0..header.query_count() {
            queries.push(Query::read(decoder)?);
        }

        let answers = read_records(decoder, header.answer_count())?;
        let name_servers = read_records(decoder, header.name_server_count())?;
        let mut additionals = read_records(decoder, header.additional_count())?;

        // OPT pseudo records are pulled out of the additional section, RFC 6891
        let mut edns = None;
        if let Some(idx) = additionals
            .iter()
            .position(|r| r.record_type() == RecordType::OPT)
        {
            let opt = additionals.remove(idx);
            if additionals.iter().any(|r| r.record_type() == RecordType::OPT) {
                debug!("more than one OPT record in the additional section");
                return Err(ProtoErrorKind::Message("more than one OPT record").into());
            }
            edns = Some(Edns::from(&opt));
        }

        Ok(Self {
            header,
            queries,
            answers,
            name_servers,
            additionals,
            edns,
        })
    }
}

fn read_records(decoder: &mut BinDecoder<'_>, count: u16) -> ProtoResult<Vec<Record>> {
    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        records.push(Record::read(decoder)?);
    }
    Ok(records)
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; header: {}", self.header)?;

        for query in &self.queries {
            writeln!(f, "{query}")?;
        }
        for answer in &self.answers {
            writeln!(f, "{answer}")?;
        }
        for name_server in &self.name_servers {
            writeln!(f, "{name_server}")?;
        }
        for additional in &self.additionals {
            writeln!(f, "{additional}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::dbg_macro, clippy::print_stdout)]

    use std::str::FromStr;

    use super::*;
    use crate::rr::rdata::{A, CNAME, SRV};
    use crate::rr::{DNSClass, Name, RData};

    #[test]
    fn test_emit_and_read_header() {
        let mut message = Message::new();
        message
            .set_id(10)
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Update)
            .set_authoritative(true)
            .set_truncated(false)
            .set_recursion_desired(true)
            .set_recursion_available(true)
            .set_response_code(ResponseCode::ServFail);

        test_emit_and_read(message);
    }

    #[test]
    fn test_emit_and_read_query() {
        let mut message = Message::new();
        message
            .set_id(10)
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Update)
            .set_response_code(ResponseCode::ServFail)
            .add_query(Query::query(
                Name::from_str("www.example.com.").unwrap(),
                RecordType::A,
            ));

        test_emit_and_read(message);
    }

    #[test]
    fn test_emit_and_read_records() {
        let mut message = Message::new();
        message.set_id(10);

        let mut record = Record::from_rdata(
            Name::from_str("www.example.com.").unwrap(),
            300,
            RData::A(A::new(93, 184, 216, 34)),
        );
        record.set_dns_class(DNSClass::IN);

        message.add_answer(record);
        test_emit_and_read(message);
    }

    fn test_emit_and_read(message: Message) {
        let byte_vec = message.to_vec().unwrap();

        let got = Message::from_vec(&byte_vec).unwrap();
        assert_eq!(got.queries(), message.queries());
        assert_eq!(got.answers(), message.answers());
        assert_eq!(got.id(), message.id());
    }

    #[test]
    fn test_compression_transparency() {
        // packing with compression on and off yields messages that decode equal
        let mut message = Message::new();
        message
            .set_id(1234)
            .add_query(Query::query(
                Name::from_str("www.example.com.").unwrap(),
                RecordType::SRV,
            ))
            .add_answer(Record::from_rdata(
                Name::from_str("www.example.com.").unwrap(),
                300,
                RData::SRV(SRV::new(
                    1,
                    2,
                    443,
                    Name::from_str("target.example.com.").unwrap(),
                )),
            ))
            .add_answer(Record::from_rdata(
                Name::from_str("target.example.com.").unwrap(),
                300,
                RData::CNAME(CNAME(Name::from_str("www.example.com.").unwrap())),
            ));

        let compressed = message.to_vec().unwrap();

        // canonical (signing) form does not use compression
        let mut uncompressed = Vec::with_capacity(512);
        {
            let mut encoder = BinEncoder::with_mode(&mut uncompressed, EncodeMode::Signing);
            message.emit(&mut encoder).unwrap();
        }

        assert!(compressed.len() < uncompressed.len());

        let from_compressed = Message::from_vec(&compressed).unwrap();
        let from_uncompressed = Message::from_vec(&uncompressed).unwrap();
        assert_eq!(from_compressed.answers(), from_uncompressed.answers());
    }

    #[test]
    fn test_read_short_buffer_errs() {
        let mut message = Message::new();
        message.set_id(10).add_query(Query::query(
            Name::from_str("www.example.com.").unwrap(),
            RecordType::A,
        ));

        let mut bytes = message.to_vec().unwrap();
        bytes.truncate(bytes.len() - 4);
        assert!(Message::from_vec(&bytes).is_err());
    }

    #[test]
    fn test_edns_round_trip() {
        let mut message = Message::query();
        {
            let edns = message.edns_mut();
            edns.set_version(0);
            edns.set_max_payload(4096);
            edns.set_dnssec_ok(true);
        }

        let bytes = message.to_vec().unwrap();
        let got = Message::from_vec(&bytes).unwrap();

        let edns = got.edns().expect("OPT record was not parsed");
        assert_eq!(edns.max_payload(), 4096);
        assert!(edns.dnssec_ok());
        assert!(got.additionals().is_empty());
    }
}
