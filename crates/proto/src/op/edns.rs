// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Extended DNS options

use std::fmt;

use crate::error::ProtoResult;
use crate::rr::rdata::opt::{EdnsCode, EdnsOption, OPT};
use crate::rr::record_data::{warn_rdata_misuse, RData};
use crate::rr::{DNSClass, Name, Record, RecordType};
use crate::serialize::binary::{BinEncodable, BinEncoder};

/// Edns implements the higher level concepts for working with extended dns as it is used to create or be
/// created from OPT record data.
///
/// [RFC 6891](https://tools.ietf.org/html/rfc6891#section-6.1.1)
///
/// ```text
/// 6.1.1.  Basic Elements
///
///    An OPT pseudo-RR (sometimes called a meta-RR) MAY be added to the
///    additional data section of a request.
///
///    The OPT RR has RR type 41.
///
///    The fixed part of an OPT RR is structured as follows:
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
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Edns {
    // high 8 bits that make up the 12 bit total field when included with the 4bit rcode from the
    //  header (from TTL)
    rcode_high: u8,
    // Indicates the implementation level of the setter. (from TTL)
    version: u8,
    // Is DNSSEC supported (from TTL)
    dnssec_ok: bool,
    // max payload size, minimum of 512, (from RR CLASS)
    max_payload: u16,

    options: OPT,
}

impl Default for Edns {
    fn default() -> Self {
        Self {
            rcode_high: 0,
            version: 0,
            dnssec_ok: false,
            max_payload: 512,
            options: OPT::default(),
        }
    }
}

impl Edns {
    /// Creates a new extended DNS object.
    pub fn new() -> Self {
        Self::default()
    }

    /// The high order bytes for the response code in the DNS Message
    pub fn rcode_high(&self) -> u8 {
        self.rcode_high
    }

    /// Returns the EDNS version
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Specifies that DNSSEC is supported for this Client or Server
    pub fn dnssec_ok(&self) -> bool {
        self.dnssec_ok
    }

    /// Maximum supported size of the DNS payload
    pub fn max_payload(&self) -> u16 {
        self.max_payload
    }

    /// Returns the Option associated with the code
    pub fn option(&self, code: EdnsCode) -> Option<&EdnsOption> {
        self.options.get(code)
    }

    /// Returns the options portion of EDNS
    pub fn options(&self) -> &OPT {
        &self.options
    }

    /// Set the high order bits for the result code.
    pub fn set_rcode_high(&mut self, rcode_high: u8) -> &mut Self {
        self.rcode_high = rcode_high;
        self
    }

    /// Set the EDNS version
    pub fn set_version(&mut self, version: u8) -> &mut Self {
        self.version = version;
        self
    }

    /// Set to true if DNSSEC is supported
    pub fn set_dnssec_ok(&mut self, dnssec_ok: bool) -> &mut Self {
        self.dnssec_ok = dnssec_ok;
        self
    }

    /// Set the maximum size of the UDP payload
    pub fn set_max_payload(&mut self, max_payload: u16) -> &mut Self {
        self.max_payload = max_payload.max(512);
        self
    }

    /// Add an additional option to the EDNS options
    pub fn set_option(&mut self, option: EdnsOption) -> &mut Self {
        self.options.insert(option);
        self
    }
}

impl<'a> From<&'a Record> for Edns {
    fn from(value: &'a Record) -> Self {
        assert!(value.record_type() == RecordType::OPT);

        // The CLASS field carries the requestor's UDP payload size
        let max_payload = match value.dns_class() {
            DNSClass::OPT(size) => size,
            _ => 512,
        };

        // The TTL field carries extended RCODE, version and the DO flag:
        //
        //    +0 (MSB)                            +1 (LSB)
        // 0: |         EXTENDED-RCODE        |            VERSION            |
        // 2: |DO|                           Z                                |
        let ttl = value.ttl();
        let rcode_high = ((ttl & 0xFF00_0000) >> 24) as u8;
        let version = ((ttl & 0x00FF_0000) >> 16) as u8;
        let dnssec_ok = ttl & 0x0000_8000 == 0x0000_8000;

        let options = match value.data() {
            Some(RData::OPT(options)) => options.clone(),
            Some(data) => {
                warn_rdata_misuse(RecordType::OPT, data);
                OPT::default()
            }
            None => OPT::default(),
        };

        Self {
            rcode_high,
            version,
            dnssec_ok,
            max_payload,
            options,
        }
    }
}

impl<'a> From<&'a Edns> for Record {
    /// Converts this Edns into a Record for the additional section of a message
    fn from(value: &'a Edns) -> Self {
        let mut record = Self::new();

        record.set_name(Name::root());
        record.set_record_type(RecordType::OPT);
        record.set_dns_class(DNSClass::for_opt(value.max_payload()));

        let mut ttl: u32 = u32::from(value.rcode_high()) << 24;
        ttl |= u32::from(value.version()) << 16;
        if value.dnssec_ok() {
            ttl |= 0x0000_8000;
        }
        record.set_ttl(ttl);

        record.set_data(Some(RData::OPT(value.options().clone())));

        record
    }
}

impl BinEncodable for Edns {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()> {
        Record::from(self).emit(encoder)
    }
}

impl fmt::Display for Edns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "version: {version} dnssec_ok: {dnssec_ok} max_payload: {max_payload} opts: {opts}",
            version = self.version,
            dnssec_ok = self.dnssec_ok,
            max_payload = self.max_payload,
            opts = self.options.options().len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let mut edns = Edns::new();
        edns.set_dnssec_ok(true);
        edns.set_max_payload(4096);
        edns.set_version(0);
        edns.set_rcode_high(1);
        edns.set_option(EdnsOption::NSID(b"ns1".to_vec()));

        let record = Record::from(&edns);
        let edns_decode = Edns::from(&record);

        assert_eq!(edns.dnssec_ok(), edns_decode.dnssec_ok());
        assert_eq!(edns.max_payload(), edns_decode.max_payload());
        assert_eq!(edns.version(), edns_decode.version());
        assert_eq!(edns.rcode_high(), edns_decode.rcode_high());
        assert_eq!(edns.options(), edns_decode.options());
    }
}
