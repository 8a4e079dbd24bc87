// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use openssl::pkey::{PKey, Private};
use openssl::sign::Signer;

use crate::error::{DnsSecErrorKind, DnsSecResult};
use crate::rr::dnssec::{rsa_public_key, Algorithm, DigestType, TBS};

/// A public and private key pair, the private portion is used for signing.
///
/// RSA keys sign with PKCS#1 v1.5 over the digest selected by the algorithm,
/// ECDSA keys with the fixed-width "r | s" form of RFC 6605.
#[derive(Debug)]
pub enum KeyPair {
    /// RSA keypair
    RSA(PKey<Private>, Algorithm),
    /// Elliptic curve keypair
    EC(PKey<Private>, Algorithm),
}

impl KeyPair {
    /// Creates an RSA type keypair
    ///
    /// Errors unless the given algorithm is one of the RSA variants.
    pub fn from_rsa_pkey(pkey: PKey<Private>, algorithm: Algorithm) -> DnsSecResult<Self> {
        match algorithm {
            Algorithm::RSASHA1
            | Algorithm::RSASHA1NSEC3SHA1
            | Algorithm::RSASHA256
            | Algorithm::RSASHA512 => Ok(Self::RSA(pkey, algorithm)),
            _ => Err(DnsSecErrorKind::Message("unsupported signing algorithm").into()),
        }
    }

    /// Given a known pkey of an EC key, return the wrapped keypair
    pub fn from_ec_pkey(pkey: PKey<Private>, algorithm: Algorithm) -> DnsSecResult<Self> {
        match algorithm {
            Algorithm::ECDSAP256SHA256 | Algorithm::ECDSAP384SHA384 => {
                Ok(Self::EC(pkey, algorithm))
            }
            _ => Err(DnsSecErrorKind::Message("unsupported signing algorithm").into()),
        }
    }

    /// The algorithm this keypair signs with
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::RSA(_, algorithm) | Self::EC(_, algorithm) => *algorithm,
        }
    }

    /// Converts this keypair to the DNS binary form of the public_key.
    ///
    /// Only the public key material is included, in the DNSKEY encoding of the
    /// key's algorithm.
    pub fn to_public_bytes(&self) -> DnsSecResult<Vec<u8>> {
        match self {
            Self::RSA(pkey, _) => {
                let rsa = pkey.rsa()?;
                Ok(rsa_public_key::encode(
                    &rsa.e().to_vec(),
                    &rsa.n().to_vec(),
                ))
            }
            Self::EC(pkey, _) => {
                let ec_key = pkey.ec_key()?;
                let group = ec_key.group();
                let point = ec_key.public_key();
                let mut ctx = openssl::bn::BigNumContext::new()?;
                let bytes = point.to_bytes(
                    group,
                    openssl::ec::PointConversionForm::UNCOMPRESSED,
                    &mut ctx,
                )?;
                // strip the uncompressed-point 0x04 prefix, DNSSEC stores bare "x | y"
                Ok(bytes[1..].to_vec())
            }
        }
    }

    /// Signs a hash.
    ///
    /// # Arguments
    ///
    /// * `tbs` - the message bytes to be signed, see `rrset_tbs`.
    ///
    /// # Return value
    ///
    /// The signature, ready to be stored in an `RRSIG`.
    pub fn sign(&self, tbs: &TBS) -> DnsSecResult<Vec<u8>> {
        match self {
            Self::RSA(pkey, algorithm) | Self::EC(pkey, algorithm) => {
                let digest_type = DigestType::from_algorithm(*algorithm)?.to_openssl_digest();
                let mut signer = Signer::new(digest_type, pkey)?;
                signer.update(tbs.as_ref())?;
                let bytes = signer.sign_to_vec()?;

                if let Self::RSA(..) = self {
                    return Ok(bytes);
                }

                der_signature_to_fixed(&bytes, *algorithm)
            }
        }
    }
}

/// Convert a DER encoded ECDSA signature to the raw "r | s" form (see RFC 6605 Section 4)
fn der_signature_to_fixed(bytes: &[u8], algorithm: Algorithm) -> DnsSecResult<Vec<u8>> {
    if bytes.len() < 8 {
        return Err("unexpected signature format (length too short)".into());
    }
    let expect = |pos: usize, expected: u8| -> DnsSecResult<()> {
        if bytes[pos] != expected {
            return Err(format!("unexpected signature format ({pos}, {expected}))").into());
        }
        Ok(())
    };
    // Sanity checks
    expect(0, 0x30)?;
    expect(1, (bytes.len() - 2) as u8)?;
    expect(2, 0x02)?;
    let p1_len = bytes[3] as usize;
    let p2_pos = 4 + p1_len;
    expect(p2_pos, 0x02)?;
    let p2_len = bytes[p2_pos + 1] as usize;
    if p2_pos + 2 + p2_len > bytes.len() {
        return Err("unexpected signature format (invalid length)".into());
    }

    let p1 = &bytes[4..p2_pos];
    let p2 = &bytes[p2_pos + 2..p2_pos + 2 + p2_len];

    // For P-256, each integer MUST be encoded as 32 octets;
    // for P-384, each integer MUST be encoded as 48 octets.
    let part_len = match algorithm {
        Algorithm::ECDSAP256SHA256 => 32,
        Algorithm::ECDSAP384SHA384 => 48,
        _ => return Err("unexpected algorithm".into()),
    };

    let mut ret = Vec::<u8>::with_capacity(part_len * 2);
    {
        let mut write_part = |mut part: &[u8]| -> DnsSecResult<()> {
            // We need to pad or trim the octet string to expected length
            if part.len() > part_len + 1 {
                return Err("invalid signature data".into());
            }
            if part.len() == part_len + 1 {
                // Trim leading zero
                if part[0] != 0x00 {
                    return Err("invalid signature data".into());
                }
                part = &part[1..];
            }

            // Pad with zeros. All numbers are big-endian here.
            ret.extend(std::iter::repeat(0x00).take(part_len - part.len()));
            ret.extend(part);
            Ok(())
        };
        write_part(p1)?;
        write_part(p2)?;
    }
    assert_eq!(ret.len(), part_len * 2);
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rr::dnssec::public_key::{PublicKey, PublicKeyEnum};

    fn generated_key(algorithm: Algorithm) -> KeyPair {
        match algorithm {
            Algorithm::ECDSAP256SHA256 | Algorithm::ECDSAP384SHA384 => {
                let nid = if algorithm == Algorithm::ECDSAP256SHA256 {
                    openssl::nid::Nid::X9_62_PRIME256V1
                } else {
                    openssl::nid::Nid::SECP384R1
                };
                let group = openssl::ec::EcGroup::from_curve_name(nid).unwrap();
                let ec = openssl::ec::EcKey::generate(&group).unwrap();
                KeyPair::from_ec_pkey(PKey::from_ec_key(ec).unwrap(), algorithm).unwrap()
            }
            _ => {
                let rsa = openssl::rsa::Rsa::generate(2048).unwrap();
                KeyPair::from_rsa_pkey(PKey::from_rsa(rsa).unwrap(), algorithm).unwrap()
            }
        }
    }

    fn sign_and_verify(algorithm: Algorithm) {
        let key = generated_key(algorithm);
        let tbs = TBS::from(&b"www.example.com"[..]);

        let mut sig = key.sign(&tbs).unwrap();
        let public = key.to_public_bytes().unwrap();
        let pk = PublicKeyEnum::from_public_bytes(&public, algorithm).unwrap();

        pk.verify(algorithm, tbs.as_ref(), &sig)
            .unwrap_or_else(|_| panic!("algorithm {algorithm:?} failed to verify"));

        sig[10] = !sig[10];
        assert!(
            pk.verify(algorithm, tbs.as_ref(), &sig).is_err(),
            "algorithm {algorithm:?} verified a corrupted signature"
        );
    }

    #[test]
    fn test_rsa_sha256() {
        sign_and_verify(Algorithm::RSASHA256);
    }

    #[test]
    fn test_rsa_sha1() {
        sign_and_verify(Algorithm::RSASHA1);
    }

    #[test]
    fn test_ec_p256() {
        sign_and_verify(Algorithm::ECDSAP256SHA256);
    }

    #[test]
    fn test_ec_p384() {
        sign_and_verify(Algorithm::ECDSAP384SHA384);
    }
}
