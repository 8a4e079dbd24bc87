// Copyright 2017 Brian Smith <brian@briansmith.org>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::error::ProtoResult;

/// An RSA public key in the RFC 3110 DNSKEY encoding:
///
/// ```text
///        Field             Size
///        -----             ----
///        exponent length   1 or 3 octets (see text)
///        exponent          as specified by length field
///        modulus           remaining space
/// ```
pub(crate) struct RSAPublicKey<'a> {
    n: &'a [u8],
    e: &'a [u8],
}

impl<'a> RSAPublicKey<'a> {
    pub(crate) fn try_from(encoded: &'a [u8]) -> ProtoResult<RSAPublicKey<'a>> {
        let (e_len_len, e_len) = match encoded.first() {
            Some(&0) if encoded.len() >= 3 => {
                (3, (usize::from(encoded[1]) << 8) | usize::from(encoded[2]))
            }
            Some(e_len) if *e_len != 0 => (1, usize::from(*e_len)),
            _ => {
                return Err("bad public key".into());
            }
        };

        if encoded.len() < e_len_len + e_len {
            return Err("bad public key".into());
        };

        let (e, n) = encoded[e_len_len..].split_at(e_len);

        Ok(Self { n, e })
    }

    pub(crate) fn n(&self) -> &[u8] {
        self.n
    }

    pub(crate) fn e(&self) -> &[u8] {
        self.e
    }
}

/// Encode public RSA components into the RFC 3110 DNSKEY form
pub(crate) fn encode(e: &[u8], n: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(e.len() + n.len() + 3);
    if e.len() > 255 {
        encoded.push(0);
        encoded.push((e.len() >> 8) as u8);
    }
    encoded.push(e.len() as u8);
    encoded.extend_from_slice(e);
    encoded.extend_from_slice(n);
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_encode() {
        let encoded = encode(&[1, 0, 1], &[0xAA; 64]);
        let parsed = RSAPublicKey::try_from(&encoded).unwrap();
        assert_eq!(parsed.e(), &[1, 0, 1]);
        assert_eq!(parsed.n(), &[0xAA; 64]);
    }

    #[test]
    fn test_bad_key() {
        assert!(RSAPublicKey::try_from(&[]).is_err());
        assert!(RSAPublicKey::try_from(&[0]).is_err());
        assert!(RSAPublicKey::try_from(&[200, 1, 2]).is_err());
    }
}
