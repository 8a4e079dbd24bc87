// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! DNSSEC signing and validation algorithms

use std::fmt;

use crate::error::ProtoResult;
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncodable, BinEncoder};

/// [RFC 4034, Appendix A.1](https://tools.ietf.org/html/rfc4034#appendix-A.1), the
/// DNSKEY and RRSIG algorithm field
///
/// ```text
///  Value Algorithm [Mnemonic]  Signing    References   Status
///  ----- -------------------- --------- ------------  ---------
///   1    RSA/MD5 [RSAMD5]         n      [RFC2537]  NOT RECOMMENDED
///   5    RSA/SHA-1 [RSASHA1]      y      [RFC3110]    MANDATORY
///   7    RSASHA1-NSEC3-SHA1       y      [RFC5155]    RECOMMENDED
///   8    RSA/SHA-256 [RSASHA256]  y      [RFC5702]    RECOMMENDED
///  10    RSA/SHA-512 [RSASHA512]  y      [RFC5702]    RECOMMENDED
///  13    ECDSA P-256/SHA-256      y      [RFC6605]    RECOMMENDED
///  14    ECDSA P-384/SHA-384      y      [RFC6605]    RECOMMENDED
/// ```
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
#[non_exhaustive]
pub enum Algorithm {
    /// RSA/MD5, deprecated, exists only for key-tag computation on legacy keys
    RSAMD5,
    /// DO NOT USE, SHA1 is a compromised hashing function, it is here for backward compatibility
    RSASHA1,
    /// DO NOT USE, SHA1 is a compromised hashing function, it is here for backward compatibility
    RSASHA1NSEC3SHA1,
    /// RSA public key with SHA256 hash
    RSASHA256,
    /// RSA public key with SHA512 hash
    RSASHA512,
    /// ECDSA with P-256 curve and SHA-256, RFC 6605
    ECDSAP256SHA256,
    /// ECDSA with P-384 curve and SHA-384, RFC 6605
    ECDSAP384SHA384,
    /// Unassigned or unsupported
    Unknown(u8),
}

impl Algorithm {
    /// <https://www.iana.org/assignments/dns-sec-alg-numbers/dns-sec-alg-numbers.xhtml>
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::RSAMD5,
            5 => Self::RSASHA1,
            7 => Self::RSASHA1NSEC3SHA1,
            8 => Self::RSASHA256,
            10 => Self::RSASHA512,
            13 => Self::ECDSAP256SHA256,
            14 => Self::ECDSAP384SHA384,
            _ => Self::Unknown(value),
        }
    }

    /// Length in bytes that the hash portion of this function will produce
    pub fn hash_len(self) -> Option<usize> {
        match self {
            Self::RSAMD5 => Some(16),
            Self::RSASHA1 | Self::RSASHA1NSEC3SHA1 => Some(20),
            Self::RSASHA256 | Self::ECDSAP256SHA256 => Some(32),
            Self::ECDSAP384SHA384 => Some(48),
            Self::RSASHA512 => Some(64),
            Self::Unknown(_) => None,
        }
    }

    /// Whether this algorithm signs with an RSA key
    pub fn is_rsa(self) -> bool {
        matches!(
            self,
            Self::RSASHA1 | Self::RSASHA1NSEC3SHA1 | Self::RSASHA256 | Self::RSASHA512
        )
    }

    /// Whether this algorithm signs with an elliptic curve key
    pub fn is_ec(self) -> bool {
        matches!(self, Self::ECDSAP256SHA256 | Self::ECDSAP384SHA384)
    }

    /// The mnemonic of the algorithm, e.g. RSASHA256
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RSAMD5 => "RSAMD5",
            Self::RSASHA1 => "RSASHA1",
            Self::RSASHA1NSEC3SHA1 => "RSASHA1-NSEC3-SHA1",
            Self::RSASHA256 => "RSASHA256",
            Self::RSASHA512 => "RSASHA512",
            Self::ECDSAP256SHA256 => "ECDSAP256SHA256",
            Self::ECDSAP384SHA384 => "ECDSAP384SHA384",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl BinEncodable for Algorithm {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()> {
        encoder.emit_u8((*self).into())
    }
}

impl<'r> BinDecodable<'r> for Algorithm {
    fn read(decoder: &mut BinDecoder<'r>) -> ProtoResult<Self> {
        Ok(Self::from_u8(decoder.read_u8()?))
    }
}

impl From<Algorithm> for u8 {
    fn from(a: Algorithm) -> Self {
        match a {
            Algorithm::RSAMD5 => 1,
            Algorithm::RSASHA1 => 5,
            Algorithm::RSASHA1NSEC3SHA1 => 7,
            Algorithm::RSASHA256 => 8,
            Algorithm::RSASHA512 => 10,
            Algorithm::ECDSAP256SHA256 => 13,
            Algorithm::ECDSAP384SHA384 => 14,
            Algorithm::Unknown(value) => value,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into() {
        for algorithm in [
            Algorithm::RSAMD5,
            Algorithm::RSASHA1,
            Algorithm::RSASHA1NSEC3SHA1,
            Algorithm::RSASHA256,
            Algorithm::RSASHA512,
            Algorithm::ECDSAP256SHA256,
            Algorithm::ECDSAP384SHA384,
        ] {
            assert_eq!(algorithm, Algorithm::from_u8(u8::from(algorithm)));
        }
    }
}
