// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! BIND `Private-key-format` text files, as written by `dnssec-keygen`
//!
//! ```text
//! Private-key-format: v1.3
//! Algorithm: 5 (RSASHA1)
//! Modulus: v7yUY0LEmAtLythV6voScdW4...
//! PublicExponent: AQAB
//! ...
//! ```
//!
//! Each component line maps a textual attribute name to a base64 big-endian
//! integer. The algorithm number selects the component set: the eight RSA
//! components, or the single `PrivateKey` scalar for ECDSA. Unknown
//! attributes are skipped for forward compatibility.

use data_encoding::BASE64;
use openssl::bn::{BigNum, BigNumContext};
use openssl::ec::{EcGroup, EcKey, EcPoint};
use openssl::nid::Nid;
use openssl::pkey::PKey;
use openssl::rsa::Rsa;

use crate::error::{DnsSecError, DnsSecErrorKind, DnsSecResult};
use crate::rr::dnssec::{Algorithm, KeyPair};

/// Parse a BIND private-key file into a signing key pair.
///
/// The returned `KeyPair` carries the algorithm declared in the file.
pub fn decode_bind_private_key(input: &str) -> DnsSecResult<KeyPair> {
    let mut lines = input.lines().filter(|l| !l.trim().is_empty());

    // private key format expected to be first
    let first = lines
        .next()
        .ok_or_else(|| bad_key("empty private key file"))?;
    let (field, value) = split_field_value(first)?;
    if field != "Private-key-format" {
        return Err(bad_key("Private-key-format line not found"));
    }
    if !value.starts_with("v1.") {
        return Err(bad_key(&format!("unsupported format version: {value}")));
    }

    // algorithm line is second, e.g. `Algorithm: 5 (RSASHA1)`
    let second = lines.next().ok_or_else(|| bad_key("missing Algorithm"))?;
    let (field, value) = split_field_value(second)?;
    if field != "Algorithm" {
        return Err(bad_key("Algorithm line not found"));
    }
    let number = value
        .split(' ')
        .next()
        .and_then(|n| n.parse::<u8>().ok())
        .ok_or_else(|| bad_key(&format!("bad algorithm line: {value}")))?;

    let algorithm = match Algorithm::from_u8(number) {
        Algorithm::Unknown(v) => return Err(DnsSecErrorKind::UnsupportedAlgorithm(v).into()),
        a => a,
    };

    // remaining lines are the components of the key; values are decoded
    // per-field so that unknown (possibly non-base64) attributes can be skipped
    let mut components = Vec::new();
    for line in lines {
        components.push(split_field_value(line)?);
    }

    match algorithm {
        Algorithm::RSAMD5
        | Algorithm::RSASHA1
        | Algorithm::RSASHA1NSEC3SHA1
        | Algorithm::RSASHA256
        | Algorithm::RSASHA512 => read_rsa(&components, algorithm),
        Algorithm::ECDSAP256SHA256 | Algorithm::ECDSAP384SHA384 => read_ec(&components, algorithm),
        Algorithm::Unknown(v) => Err(DnsSecErrorKind::UnsupportedAlgorithm(v).into()),
    }
}

fn split_field_value(line: &str) -> DnsSecResult<(&str, &str)> {
    let mut split = line.splitn(2, ':');
    let field = split
        .next()
        .ok_or_else(|| bad_key(&format!("missing field: {line}")))?;
    let value = split
        .next()
        .ok_or_else(|| bad_key(&format!("missing value: {line}")))?;

    Ok((field.trim(), value.trim()))
}

fn bad_key(msg: &str) -> DnsSecError {
    DnsSecErrorKind::InvalidKey(msg.to_string()).into()
}

fn decode_component(field: &str, value: &str) -> DnsSecResult<BigNum> {
    let bytes = BASE64
        .decode(value.as_bytes())
        .map_err(|e| bad_key(&format!("bad base64 in {field}: {e}")))?;
    BigNum::from_slice(&bytes).map_err(DnsSecError::from)
}

fn read_rsa(components: &[(&str, &str)], algorithm: Algorithm) -> DnsSecResult<KeyPair> {
    let mut modulus = None;
    let mut public_exponent = None;
    let mut private_exponent = None;
    let mut prime1 = None;
    let mut prime2 = None;
    let mut exponent1 = None;
    let mut exponent2 = None;
    let mut coefficient = None;

    for (field, value) in components {
        let slot = match *field {
            "Modulus" => &mut modulus,
            "PublicExponent" => &mut public_exponent,
            "PrivateExponent" => &mut private_exponent,
            "Prime1" => &mut prime1,
            "Prime2" => &mut prime2,
            "Exponent1" => &mut exponent1,
            "Exponent2" => &mut exponent2,
            "Coefficient" => &mut coefficient,
            // Created, Publish, Activate and anything newer
            _ => continue,
        };
        *slot = Some(decode_component(field, value)?);
    }

    let require = |num: Option<BigNum>, what: &str| {
        num.ok_or_else(|| bad_key(&format!("missing {what}")))
    };

    let rsa = Rsa::from_private_components(
        require(modulus, "Modulus")?,
        require(public_exponent, "PublicExponent")?,
        require(private_exponent, "PrivateExponent")?,
        require(prime1, "Prime1")?,
        require(prime2, "Prime2")?,
        require(exponent1, "Exponent1")?,
        require(exponent2, "Exponent2")?,
        require(coefficient, "Coefficient")?,
    )?;

    KeyPair::from_rsa_pkey(PKey::from_rsa(rsa)?, algorithm)
}

fn read_ec(components: &[(&str, &str)], algorithm: Algorithm) -> DnsSecResult<KeyPair> {
    let private = components
        .iter()
        .find(|(field, _)| *field == "PrivateKey")
        .map(|(field, value)| decode_component(field, value))
        .ok_or_else(|| bad_key("missing PrivateKey"))??;

    let nid = match algorithm {
        Algorithm::ECDSAP256SHA256 => Nid::X9_62_PRIME256V1,
        _ => Nid::SECP384R1,
    };

    let group = EcGroup::from_curve_name(nid)?;

    // the public point is not stored in the file, derive it from the scalar
    let mut ctx = BigNumContext::new()?;
    let mut public = EcPoint::new(&group)?;
    public.mul_generator(&group, &private, &ctx)?;

    let ec = EcKey::from_private_components(&group, &private, &public)?;
    ec.check_key()?;

    KeyPair::from_ec_pkey(PKey::from_ec_key(ec)?, algorithm)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ECDSA_KEY: &str = "Private-key-format: v1.2
Algorithm: 14 (ECDSAP384SHA384)
PrivateKey: WURgWHCcYIYUPWgeLmiPY2DJJk02vgrmTfitxgqcL4vwW7BOrbawVmVe0d9V94SR";

    #[test]
    fn test_parse_ecdsa() {
        let key = decode_bind_private_key(ECDSA_KEY).expect("failed to parse key");
        assert_eq!(key.algorithm(), Algorithm::ECDSAP384SHA384);
        // P-384 public key is 96 bytes of x | y
        assert_eq!(key.to_public_bytes().unwrap().len(), 96);
    }

    #[test]
    fn test_unknown_attributes_ignored() {
        let input = format!("{ECDSA_KEY}\nCreated: 20110302104537\nFancyNewField: AQAB");
        decode_bind_private_key(&input).expect("unknown attributes must be skipped");
    }

    #[test]
    fn test_missing_component() {
        let input = "Private-key-format: v1.3\nAlgorithm: 5 (RSASHA1)\nModulus: AQAB";
        let err = decode_bind_private_key(input).unwrap_err();
        assert!(err.to_string().starts_with("BadKey:"), "{err}");
    }

    #[test]
    fn test_unsupported_algorithm() {
        let input = "Private-key-format: v1.3\nAlgorithm: 157 (PRIVATE)\nKey: AQAB";
        let err = decode_bind_private_key(input).unwrap_err();
        assert!(err.to_string().starts_with("BadAlg:"), "{err}");
    }
}
