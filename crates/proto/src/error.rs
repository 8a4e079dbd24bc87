// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Error types for the crate

use std::fmt;

use thiserror::Error;

/// An alias for results returned by functions of this crate
pub type ProtoResult<T> = Result<T, ProtoError>;

/// The error kind for errors that get returned in the crate
///
/// Wire-format violations carry a `FormErr:` message prefix, buffer
/// exhaustion on the write side a `Short:` prefix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProtoErrorKind {
    /// An error with an arbitrary message, referenced as &'static str
    #[error("{0}")]
    Message(&'static str),

    /// An error with an arbitrary message, stored as String
    #[error("{0}")]
    Msg(String),

    /// A compression pointer points at or past its own name
    #[error("FormErr: bad compression pointer: {ptr} must be prior to {idx}")]
    BadPointer {
        /// index of the label with the pointer
        idx: usize,
        /// the bad pointer offset
        ptr: u16,
    },

    /// A label exceeded the 63 byte limit
    #[error("FormErr: label bytes exceed 63: {0}")]
    LabelBytesTooLong(usize),

    /// A domain name exceeded the 255 byte limit
    #[error("FormErr: domain name bytes exceed 255: {0}")]
    DomainNameTooLong(usize),

    /// The high two bits of a label length byte were a reserved value
    #[error("FormErr: unrecognized label code: {0:b}")]
    UnrecognizedLabelCode(u8),

    /// An escape sequence in a name was not valid
    #[error("FormErr: bad escape sequence in: {0:?}")]
    BadEscape(String),

    /// The buffer was exhausted before the type was fully read
    #[error("FormErr: unexpected end of input")]
    UnexpectedEndOfInput,

    /// Character data exceeded the limit for its field
    #[error("FormErr: char data length exceeds {max}: {len}")]
    CharacterDataTooLong {
        /// the maximum for the field
        max: usize,
        /// the length actually seen
        len: usize,
    },

    /// An rdlength pointed past the end of the message
    #[error("FormErr: rdata length {len} exceeds remaining buffer: {remain}")]
    RdataLengthTooLarge {
        /// claimed rdata length
        len: usize,
        /// bytes remaining in the buffer
        remain: usize,
    },

    /// The rdata read did not consume exactly rdlength bytes
    #[error("FormErr: rdata read length {read} does not match rdlength {len}")]
    IncorrectRDataLengthRead {
        /// bytes actually consumed
        read: usize,
        /// the rdlength field
        len: usize,
    },

    /// The OPT pseudo-RR owner must be the root name
    #[error("FormErr: EDNS resource record must have the root domain name")]
    EdnsNameNotRoot,

    /// The DNSKEY protocol field must be 3
    #[error("FormErr: DNSKEY protocol field is not 3: {0}")]
    DnsKeyProtocolNot3(u8),

    /// The write buffer reached its maximum size
    #[error("Short: maximum buffer size exceeded: {0}")]
    MaxBufferSizeExceeded(usize),

    /// A record type mnemonic was not recognized
    #[error("unknown record type: {0}")]
    UnknownRecordTypeStr(String),

    /// A dns class mnemonic was not recognized
    #[error("unknown dns class: {0}")]
    UnknownDnsClassStr(String),

    /// A dns class value was not recognized
    #[error("unknown dns class value: {0}")]
    UnknownDnsClassValue(u16),
}

/// The error type for errors that get returned in the crate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoError {
    kind: ProtoErrorKind,
}

impl ProtoError {
    /// Get the kind of the error
    pub fn kind(&self) -> &ProtoErrorKind {
        &self.kind
    }
}

impl fmt::Display for ProtoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for ProtoError {}

impl From<ProtoErrorKind> for ProtoError {
    fn from(kind: ProtoErrorKind) -> Self {
        Self { kind }
    }
}

impl From<&'static str> for ProtoError {
    fn from(msg: &'static str) -> Self {
        ProtoErrorKind::Message(msg).into()
    }
}

impl From<String> for ProtoError {
    fn from(msg: String) -> Self {
        ProtoErrorKind::Msg(msg).into()
    }
}

#[cfg(feature = "dnssec")]
pub use dnssec_error::{DnsSecError, DnsSecErrorKind, DnsSecResult};

#[cfg(feature = "dnssec")]
mod dnssec_error {
    use std::fmt;

    use thiserror::Error;

    use super::ProtoError;

    /// An alias for dnssec results returned by functions of this crate
    pub type DnsSecResult<T> = Result<T, DnsSecError>;

    /// The error kind for dnssec errors that get returned in the crate
    ///
    /// Each kind renders with its stable prefix: `BadKey:`, `BadAlg:`,
    /// `BadSig:`, `BadTime:`, `BadTsig:`.
    #[derive(Debug, Error)]
    #[non_exhaustive]
    pub enum DnsSecErrorKind {
        /// An error with an arbitrary message, referenced as &'static str
        #[error("{0}")]
        Message(&'static str),

        /// An error with an arbitrary message, stored as String
        #[error("{0}")]
        Msg(String),

        /// A DNSKEY or private-key file was malformed
        #[error("BadKey: {0}")]
        InvalidKey(String),

        /// The signing or verification algorithm is not supported
        #[error("BadAlg: unsupported algorithm: {0}")]
        UnsupportedAlgorithm(u8),

        /// The cryptographic check of a signature failed
        #[error("BadSig: signature verification failed")]
        FailedVerification,

        /// A signature or key disagrees with what it is matched against
        #[error("BadSig: {0}")]
        InvalidSignature(String),

        /// The RRSIG validity window excludes the supplied time
        #[error("BadTime: {now} outside of inception {inception} and expiration {expiration}")]
        OutsideValidity {
            /// caller supplied verification time, epoch seconds
            now: u32,
            /// signature inception, epoch seconds
            inception: u32,
            /// signature expiration, epoch seconds
            expiration: u32,
        },

        /// A TSIG MAC did not verify, or its time was outside the fudge
        #[error("BadTsig: {0}")]
        Tsig(String),

        /// An error got returned by the openssl library
        #[error("ssl error: {0}")]
        SSL(#[from] openssl::error::ErrorStack),

        /// An error got returned from the protocol layer of the crate
        #[error("proto error: {0}")]
        Proto(#[from] ProtoError),
    }

    /// The error type for dnssec errors that get returned in the crate
    #[derive(Debug)]
    pub struct DnsSecError {
        kind: DnsSecErrorKind,
    }

    impl DnsSecError {
        /// Get the kind of the error
        pub fn kind(&self) -> &DnsSecErrorKind {
            &self.kind
        }
    }

    impl fmt::Display for DnsSecError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            fmt::Display::fmt(&self.kind, f)
        }
    }

    impl std::error::Error for DnsSecError {}

    impl From<DnsSecErrorKind> for DnsSecError {
        fn from(kind: DnsSecErrorKind) -> Self {
            Self { kind }
        }
    }

    impl From<&'static str> for DnsSecError {
        fn from(msg: &'static str) -> Self {
            DnsSecErrorKind::Message(msg).into()
        }
    }

    impl From<String> for DnsSecError {
        fn from(msg: String) -> Self {
            DnsSecErrorKind::Msg(msg).into()
        }
    }

    impl From<ProtoError> for DnsSecError {
        fn from(e: ProtoError) -> Self {
            DnsSecErrorKind::from(e).into()
        }
    }

    impl From<openssl::error::ErrorStack> for DnsSecError {
        fn from(e: openssl::error::ErrorStack) -> Self {
            DnsSecErrorKind::from(e).into()
        }
    }
}
