// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! operation code for queries

use std::convert::From;
use std::fmt;

use crate::error::{ProtoErrorKind, ProtoResult};

/// Operation code for queries, updates, and responses
///
/// [RFC 1035, DOMAIN NAMES - IMPLEMENTATION AND SPECIFICATION, November 1987](https://tools.ietf.org/html/rfc1035)
///
/// ```text
/// OPCODE          A four bit field that specifies kind of query in this
///                 message.  This value is set by the originator of a query
///                 and copied into the response.
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[non_exhaustive]
pub enum OpCode {
    /// Query request [RFC 1035](https://tools.ietf.org/html/rfc1035)
    Query,
    /// Status message [RFC 1035](https://tools.ietf.org/html/rfc1035)
    Status,
    /// Notify of change [RFC 1996](https://tools.ietf.org/html/rfc1996)
    Notify,
    /// Update message [RFC 2136](https://tools.ietf.org/html/rfc2136)
    Update,
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Query => "QUERY",
            Self::Status => "STATUS",
            Self::Notify => "NOTIFY",
            Self::Update => "UPDATE",
        };

        f.write_str(s)
    }
}

impl From<OpCode> for u8 {
    fn from(rt: OpCode) -> Self {
        match rt {
            OpCode::Query => 0,
            OpCode::Status => 2,
            OpCode::Notify => 4,
            OpCode::Update => 5,
        }
    }
}

impl OpCode {
    /// Decode the OpCode from the protocol value
    pub fn from_u8(value: u8) -> ProtoResult<Self> {
        match value {
            0 => Ok(Self::Query),
            2 => Ok(Self::Status),
            4 => Ok(Self::Notify),
            5 => Ok(Self::Update),
            _ => Err(ProtoErrorKind::Msg(format!("unknown OpCode: {value}")).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        for op in [OpCode::Query, OpCode::Status, OpCode::Notify, OpCode::Update] {
            assert_eq!(OpCode::from_u8(u8::from(op)).unwrap(), op);
        }
        assert!(OpCode::from_u8(3).is_err());
    }
}
