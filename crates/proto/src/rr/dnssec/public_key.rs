// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Public Key implementations for supported key types

use openssl::bn::{BigNum, BigNumContext};
use openssl::ec::{EcGroup, EcKey, EcPoint};
use openssl::nid::Nid;
use openssl::pkey::{PKey, Public};
use openssl::rsa::Rsa as OpenSslRsa;
use openssl::sign::Verifier;

use crate::error::{DnsSecErrorKind, DnsSecResult};
use crate::rr::dnssec::ec_public_key::ECPublicKey;
use crate::rr::dnssec::rsa_public_key::RSAPublicKey;
use crate::rr::dnssec::{Algorithm, DigestType};

/// PublicKeys implement the ability to ideally be zero copy abstractions over public keys for verifying signed content.
///
/// In DNS the DNSKEY type is the RData type which stores public key material.
pub trait PublicKey {
    /// Returns the public bytes of the public key, in DNS format
    fn public_bytes(&self) -> &[u8];

    /// Verifies the hash matches the signature with the current `key`.
    ///
    /// # Arguments
    ///
    /// * `algorithm` - the Algorithm of the signature
    /// * `message` - the message to be validated, see `rrset_tbs`
    /// * `signature` - the signature to use to verify the hash, extracted from an `RRSIG`
    ///                 for example.
    fn verify(&self, algorithm: Algorithm, message: &[u8], signature: &[u8]) -> DnsSecResult<()>;
}

fn verify_with_pkey(
    pkey: &PKey<Public>,
    algorithm: Algorithm,
    message: &[u8],
    signature: &[u8],
) -> DnsSecResult<()> {
    let digest_type = DigestType::from_algorithm(algorithm)?.to_openssl_digest();
    let mut verifier = Verifier::new(digest_type, pkey)?;
    verifier.update(message)?;
    match verifier.verify(signature)? {
        true => Ok(()),
        false => Err(DnsSecErrorKind::FailedVerification.into()),
    }
}

/// Elliptic curve public key, the simple bit string "x | y" of RFC 6605
pub struct Ec<'k> {
    raw: &'k [u8],
    pkey: PKey<Public>,
}

impl<'k> Ec<'k> {
    /// ```text
    /// RFC 6605                    ECDSA for DNSSEC                  April 2012
    ///
    ///   4.  DNSKEY and RRSIG Resource Records for ECDSA
    ///
    ///   ECDSA public keys consist of a single value, called "Q" in FIPS
    ///   186-3.  In DNSSEC keys, Q is a simple bit string that represents the
    ///   uncompressed form of a curve point, "x | y".
    /// ```
    pub fn from_public_bytes(public_key: &'k [u8], algorithm: Algorithm) -> DnsSecResult<Self> {
        let curve = match algorithm {
            Algorithm::ECDSAP256SHA256 => Nid::X9_62_PRIME256V1,
            Algorithm::ECDSAP384SHA384 => Nid::SECP384R1,
            _ => return Err("only ECDSAP256SHA256 and ECDSAP384SHA384 are supported by Ec".into()),
        };
        // The key needs to be converted to the uncompressed-point form OpenSSL expects
        let k = ECPublicKey::from_unprefixed(public_key, algorithm)?;
        let group = EcGroup::from_curve_name(curve)?;
        let mut ctx = BigNumContext::new()?;
        let point = EcPoint::from_bytes(&group, k.prefixed_bytes(), &mut ctx)?;
        let pkey = EcKey::from_public_key(&group, &point).and_then(PKey::from_ec_key)?;

        Ok(Self {
            raw: public_key,
            pkey,
        })
    }
}

fn asn1_emit_integer(output: &mut Vec<u8>, int: &[u8]) {
    assert!(!int.is_empty());
    output.push(0x02); // INTEGER
    if int[0] > 0x7f {
        output.push((int.len() + 1) as u8);
        output.push(0x00); // MSB must be zero
        output.extend(int);
        return;
    }
    // Trim leading zeros
    let mut pos = 0;
    while pos < int.len() {
        if int[pos] == 0 {
            if pos == int.len() - 1 {
                break;
            }
            pos += 1;
            continue;
        }
        if int[pos] > 0x7f {
            // We need to leave one 0x00 to make MSB zero
            pos -= 1;
        }
        break;
    }
    let int_output = &int[pos..];
    output.push(int_output.len() as u8);
    output.extend(int_output);
}

/// Convert a raw DNSSEC ECDSA signature, the concatenation "r | s", to ASN.1 DER format
pub(crate) fn dnssec_ecdsa_signature_to_der(signature: &[u8]) -> DnsSecResult<Vec<u8>> {
    if signature.is_empty() || signature.len() & 1 != 0 || signature.len() > 127 {
        return Err("invalid signature length".into());
    }
    let part_len = signature.len() / 2;
    // ASN.1 SEQUENCE: 0x30 [LENGTH]
    let mut signature_asn1 = vec![0x30, 0x00];
    asn1_emit_integer(&mut signature_asn1, &signature[..part_len]);
    asn1_emit_integer(&mut signature_asn1, &signature[part_len..]);
    signature_asn1[1] = (signature_asn1.len() - 2) as u8;
    Ok(signature_asn1)
}

impl PublicKey for Ec<'_> {
    fn public_bytes(&self) -> &[u8] {
        self.raw
    }

    fn verify(&self, algorithm: Algorithm, message: &[u8], signature: &[u8]) -> DnsSecResult<()> {
        let signature_asn1 = dnssec_ecdsa_signature_to_der(signature)?;
        verify_with_pkey(&self.pkey, algorithm, message, &signature_asn1)
    }
}

/// Rsa public key
pub struct Rsa<'k> {
    raw: &'k [u8],
    pkey: PKey<Public>,
}

impl<'k> Rsa<'k> {
    /// Parse the RFC 3110 encoding: exponent length, exponent, modulus.
    pub fn from_public_bytes(raw: &'k [u8]) -> DnsSecResult<Self> {
        let parsed = RSAPublicKey::try_from(raw)?;

        // BigNum slices treat all slices as BigEndian, i.e. NetworkByteOrder
        let e = BigNum::from_slice(parsed.e())?;
        let n = BigNum::from_slice(parsed.n())?;

        let pkey = OpenSslRsa::from_public_components(n, e).and_then(PKey::from_rsa)?;
        Ok(Self { raw, pkey })
    }
}

impl PublicKey for Rsa<'_> {
    fn public_bytes(&self) -> &[u8] {
        self.raw
    }

    fn verify(&self, algorithm: Algorithm, message: &[u8], signature: &[u8]) -> DnsSecResult<()> {
        verify_with_pkey(&self.pkey, algorithm, message, signature)
    }
}

/// Variants of all known public keys
#[non_exhaustive]
pub enum PublicKeyEnum<'k> {
    /// RSA keypair
    Rsa(Rsa<'k>),
    /// Elliptic curve keypair
    Ec(Ec<'k>),
}

impl<'k> PublicKeyEnum<'k> {
    /// Converts the bytes into a PublicKey of the specified algorithm
    pub fn from_public_bytes(public_key: &'k [u8], algorithm: Algorithm) -> DnsSecResult<Self> {
        match algorithm {
            Algorithm::ECDSAP256SHA256 | Algorithm::ECDSAP384SHA384 => Ok(PublicKeyEnum::Ec(
                Ec::from_public_bytes(public_key, algorithm)?,
            )),
            Algorithm::RSASHA1
            | Algorithm::RSASHA1NSEC3SHA1
            | Algorithm::RSASHA256
            | Algorithm::RSASHA512 => Ok(PublicKeyEnum::Rsa(Rsa::from_public_bytes(public_key)?)),
            a => Err(DnsSecErrorKind::UnsupportedAlgorithm(a.into()).into()),
        }
    }
}

impl PublicKey for PublicKeyEnum<'_> {
    fn public_bytes(&self) -> &[u8] {
        match self {
            PublicKeyEnum::Ec(ec) => ec.public_bytes(),
            PublicKeyEnum::Rsa(rsa) => rsa.public_bytes(),
        }
    }

    fn verify(&self, algorithm: Algorithm, message: &[u8], signature: &[u8]) -> DnsSecResult<()> {
        match self {
            PublicKeyEnum::Ec(ec) => ec.verify(algorithm, message, signature),
            PublicKeyEnum::Rsa(rsa) => rsa.verify(algorithm, message, signature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asn1_emit_integer() {
        fn test_case(source: &[u8], expected_data: &[u8]) {
            let mut output = Vec::<u8>::new();
            asn1_emit_integer(&mut output, source);
            assert_eq!(output[0], 0x02);
            assert_eq!(output[1], expected_data.len() as u8);
            assert_eq!(&output[2..], expected_data);
        }
        test_case(&[0x00], &[0x00]);
        test_case(&[0x00, 0x00], &[0x00]);
        test_case(&[0x7f], &[0x7f]);
        test_case(&[0x80], &[0x00, 0x80]);
        test_case(&[0x00, 0x80], &[0x00, 0x80]);
        test_case(&[0x00, 0x00, 0x80], &[0x00, 0x80]);
        test_case(&[0x7f, 0x00, 0x80], &[0x7f, 0x00, 0x80]);
        test_case(&[0x00, 0x7f, 0x00, 0x80], &[0x7f, 0x00, 0x80]);
        test_case(&[0x80, 0x00, 0x80], &[0x00, 0x80, 0x00, 0x80]);
        test_case(&[0xff, 0x00, 0x80], &[0x00, 0xff, 0x00, 0x80]);
    }
}
