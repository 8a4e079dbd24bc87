// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use openssl::hash;

use crate::error::{DnsSecError, DnsSecErrorKind, DnsSecResult};
use crate::rr::dnssec::Algorithm;

/// The digest algorithm: selected by the DS digest-type field, and derived from
/// the signing algorithm for RRSIG computation.
///
/// ```text
/// 0 Reserved        - [RFC3658]
/// 1 SHA-1 MANDATORY [RFC3658]
/// 2 SHA-256         [RFC4509]
/// 4 SHA-384         [RFC6605]
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[non_exhaustive]
pub enum DigestType {
    /// [RFC 3658](https://tools.ietf.org/html/rfc3658)
    SHA1,
    /// [RFC 4509](https://tools.ietf.org/html/rfc4509)
    SHA256,
    /// [RFC 6605](https://tools.ietf.org/html/rfc6605)
    SHA384,
    /// Undefined as a DS digest type, used by RSASHA512 signatures
    SHA512,
}

impl DigestType {
    /// Decode the DS digest-type field
    pub fn from_u8(value: u8) -> DnsSecResult<Self> {
        match value {
            1 => Ok(Self::SHA1),
            2 => Ok(Self::SHA256),
            4 => Ok(Self::SHA384),
            _ => Err(DnsSecErrorKind::UnsupportedAlgorithm(value).into()),
        }
    }

    /// The digest used when signing or verifying with the given algorithm
    pub fn from_algorithm(algorithm: Algorithm) -> DnsSecResult<Self> {
        match algorithm {
            Algorithm::RSASHA1 | Algorithm::RSASHA1NSEC3SHA1 => Ok(Self::SHA1),
            Algorithm::RSASHA256 | Algorithm::ECDSAP256SHA256 => Ok(Self::SHA256),
            Algorithm::ECDSAP384SHA384 => Ok(Self::SHA384),
            Algorithm::RSASHA512 => Ok(Self::SHA512),
            a => Err(DnsSecErrorKind::UnsupportedAlgorithm(a.into()).into()),
        }
    }

    /// The OpenSSL counterpart of the digest
    pub fn to_openssl_digest(self) -> hash::MessageDigest {
        match self {
            Self::SHA1 => hash::MessageDigest::sha1(),
            Self::SHA256 => hash::MessageDigest::sha256(),
            Self::SHA384 => hash::MessageDigest::sha384(),
            Self::SHA512 => hash::MessageDigest::sha512(),
        }
    }

    /// Digest the data with this digest type
    pub fn digest(self, data: &[u8]) -> DnsSecResult<Vec<u8>> {
        hash::hash(self.to_openssl_digest(), data)
            .map(|d| d.to_vec())
            .map_err(DnsSecError::from)
    }
}

impl From<DigestType> for u8 {
    fn from(a: DigestType) -> Self {
        match a {
            DigestType::SHA1 => 1,
            DigestType::SHA256 => 2,
            DigestType::SHA384 => 4,
            // not a DS digest type; never emitted into a DS record
            DigestType::SHA512 => 255,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_lengths() {
        let data = b"abc";
        assert_eq!(DigestType::SHA1.digest(data).unwrap().len(), 20);
        assert_eq!(DigestType::SHA256.digest(data).unwrap().len(), 32);
        assert_eq!(DigestType::SHA384.digest(data).unwrap().len(), 48);
        assert_eq!(DigestType::SHA512.digest(data).unwrap().len(), 64);
    }
}
