// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Verifier is a structure for performing many of the signing processes of the DNSSEC specification

use crate::error::{DnsSecErrorKind, DnsSecResult};
use crate::rr::dnssec::rdata::{DNSSECRData, DNSKEY, RRSIG};
use crate::rr::dnssec::public_key::{PublicKey, PublicKeyEnum};
use crate::rr::dnssec::{tbs, Algorithm};
use crate::rr::{RData, Record};

/// Types which are able to verify DNS based signatures
pub trait Verifier {
    /// Return the algorithm which this Verifier covers
    fn algorithm(&self) -> Algorithm;

    /// Return the public key associated with this verifier
    fn key(&self) -> DnsSecResult<PublicKeyEnum<'_>>;

    /// Verifies the hash matches the signature with the current `key`.
    ///
    /// # Arguments
    ///
    /// * `hash` - the hash to be validated, see `rrset_tbs`
    /// * `signature` - the signature to use to verify the hash, extracted from an `RRSIG`
    ///                 for example.
    fn verify(&self, hash: &[u8], signature: &[u8]) -> DnsSecResult<()> {
        self.key()?.verify(self.algorithm(), hash, signature)
    }
}

impl Verifier for DNSKEY {
    fn algorithm(&self) -> Algorithm {
        self.algorithm()
    }

    fn key(&self) -> DnsSecResult<PublicKeyEnum<'_>> {
        PublicKeyEnum::from_public_bytes(self.public_key(), self.algorithm())
    }
}

/// Verify an RRSIG over an RRset against the given DNSKEY.
///
/// Fails with `BadKey` when the key tag or signer name disagree with the key,
/// `BadAlg` when the algorithms disagree, `BadTime` when `now` falls outside
/// the inception..expiration window, and `BadSig` when the cryptographic
/// check rejects.
///
/// # Arguments
///
/// * `rrsig` - the signature record covering `records`
/// * `dnskey` - the public key record to validate against
/// * `records` - the covered RRset
/// * `now` - caller-supplied verification time, epoch seconds
pub fn verify_rrsig(
    rrsig: &Record,
    dnskey: &Record,
    records: &[Record],
    now: u32,
) -> DnsSecResult<()> {
    let Some(&RData::DNSSEC(DNSSECRData::DNSKEY(ref key_rdata))) = dnskey.data() else {
        return Err(DnsSecErrorKind::InvalidKey("not a DNSKEY record".to_string()).into());
    };
    let Some(&RData::DNSSEC(DNSSECRData::RRSIG(ref sig))) = rrsig.data() else {
        return Err(DnsSecErrorKind::Message("rdata is not an RRSIG").into());
    };

    check_rrsig_against_key(sig, key_rdata, dnskey)?;
    check_validity_window(sig, now)?;

    // the RRset is keyed by the covered records themselves
    let first = records
        .first()
        .ok_or(DnsSecErrorKind::Message("no records to verify"))?;
    let rrset_tbs = tbs::rrset_tbs_with_sig(first.name(), first.dns_class(), sig, records)?;
    key_rdata
        .verify(rrset_tbs.as_ref(), sig.sig())
        .map_err(|_| DnsSecErrorKind::FailedVerification.into())
}

fn check_rrsig_against_key(sig: &RRSIG, key: &DNSKEY, dnskey: &Record) -> DnsSecResult<()> {
    if sig.algorithm() != key.algorithm() {
        return Err(DnsSecErrorKind::UnsupportedAlgorithm(sig.algorithm().into()).into());
    }
    if sig.key_tag() != key.calculate_key_tag()? {
        return Err(DnsSecErrorKind::InvalidKey(format!(
            "key tag mismatch: {}",
            sig.key_tag()
        ))
        .into());
    }
    if sig.signer_name() != dnskey.name() {
        return Err(DnsSecErrorKind::InvalidKey(format!(
            "signer name mismatch: {}",
            sig.signer_name()
        ))
        .into());
    }
    Ok(())
}

fn check_validity_window(sig: &RRSIG, now: u32) -> DnsSecResult<()> {
    // RFC 4034, section 3.1.5: the inception and expiration fields are serial
    // numbers, compared with the RFC 1982 mod-2^32 arithmetic. The signed
    // modular difference handles windows straddling the 32-bit wrap.
    let after_inception = now.wrapping_sub(sig.sig_inception()) as i32 >= 0;
    let before_expiration = sig.sig_expiration().wrapping_sub(now) as i32 >= 0;

    if !after_inception || !before_expiration {
        return Err(DnsSecErrorKind::OutsideValidity {
            now,
            inception: sig.sig_inception(),
            expiration: sig.sig_expiration(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rr::RecordType;
    use std::str::FromStr;

    use crate::rr::Name;

    fn test_sig() -> RRSIG {
        RRSIG::new(
            RecordType::A,
            Algorithm::ECDSAP384SHA384,
            2,
            3600,
            200,
            100,
            12345,
            Name::from_str("example.net.").unwrap(),
            vec![0; 96],
        )
    }

    #[test]
    fn test_validity_window() {
        let sig = test_sig();

        assert!(check_validity_window(&sig, 100).is_ok());
        assert!(check_validity_window(&sig, 150).is_ok());
        assert!(check_validity_window(&sig, 200).is_ok());

        let err = check_validity_window(&sig, 99).unwrap_err();
        assert!(err.to_string().starts_with("BadTime:"), "{err}");
        let err = check_validity_window(&sig, 201).unwrap_err();
        assert!(err.to_string().starts_with("BadTime:"), "{err}");
    }

    #[test]
    fn test_validity_window_straddles_serial_wrap() {
        // inception just before the 32-bit wrap, expiration just after
        let sig = RRSIG::new(
            RecordType::A,
            Algorithm::ECDSAP384SHA384,
            2,
            3600,
            5,
            u32::MAX - 5,
            12345,
            Name::from_str("example.net.").unwrap(),
            vec![0; 96],
        );

        assert!(check_validity_window(&sig, u32::MAX - 5).is_ok());
        assert!(check_validity_window(&sig, u32::MAX).is_ok());
        assert!(check_validity_window(&sig, 0).is_ok());
        assert!(check_validity_window(&sig, 5).is_ok());

        assert!(check_validity_window(&sig, u32::MAX - 6).is_err());
        assert!(check_validity_window(&sig, 6).is_err());
    }
}
