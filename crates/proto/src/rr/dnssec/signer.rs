// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! signer is a structure for performing the signing processes of the DNSSEC specification

use crate::error::{DnsSecErrorKind, DnsSecResult};
use crate::rr::dnssec::rdata::{DNSSECRData, RRSIG};
use crate::rr::dnssec::{tbs, Algorithm, KeyPair};
use crate::rr::{RData, Record};

/// Sign an RRset, populating the signature of the RRSIG record.
///
/// The RRSIG record carries the signing parameters: inception and expiration
/// must be set by the caller; type covered, labels and original TTL are
/// derived from the RRset; key tag, signer name and algorithm are filled in
/// from the paired DNSKEY when unset.
///
/// # Arguments
///
/// * `rrsig` - a Record whose rdata is the RRSIG under construction
/// * `key` - the private key matching `dnskey`
/// * `dnskey` - the public key record, used to complete unset RRSIG fields
/// * `records` - the RRset to sign; all entries share owner, class and type
pub fn sign_rrset(
    rrsig: &mut Record,
    key: &KeyPair,
    dnskey: &Record,
    records: &[Record],
) -> DnsSecResult<()> {
    let Some(&RData::DNSSEC(DNSSECRData::DNSKEY(ref dnskey_rdata))) = dnskey.data() else {
        return Err(DnsSecErrorKind::InvalidKey("not a DNSKEY record".to_string()).into());
    };

    let first = records
        .first()
        .ok_or(DnsSecErrorKind::Message("no records to sign"))?;
    let rrset_name = first.name().clone();
    let rrset_class = first.dns_class();

    let filled = {
        let Some(RData::DNSSEC(DNSSECRData::RRSIG(sig))) = rrsig.data_mut() else {
            return Err(DnsSecErrorKind::Message("rdata is not an RRSIG").into());
        };

        // derived from the covered RRset
        sig.set_type_covered(first.record_type());
        sig.set_num_labels(first.name().num_labels());
        sig.set_original_ttl(first.ttl());

        // completed from the DNSKEY when not supplied
        if sig.algorithm() == Algorithm::Unknown(0) {
            sig.set_algorithm(dnskey_rdata.algorithm());
        }
        if sig.key_tag() == 0 {
            sig.set_key_tag(dnskey_rdata.calculate_key_tag()?);
        }
        if sig.signer_name().is_root() || sig.signer_name().is_empty() {
            sig.set_signer_name(dnskey.name().clone());
        }

        if sig.algorithm() != key.algorithm() {
            return Err(DnsSecErrorKind::UnsupportedAlgorithm(sig.algorithm().into()).into());
        }

        sig.clone()
    };

    // compute the signing input over the canonical RRset
    let tbs = tbs::rrset_tbs_with_sig(&rrset_name, rrset_class, &filled, records)?;
    let signature = key.sign(&tbs)?;

    if let Some(RData::DNSSEC(DNSSECRData::RRSIG(sig))) = rrsig.data_mut() {
        sig.set_sig(signature);
    }

    Ok(())
}

/// Build an unsigned RRSIG record ready to pass to [`sign_rrset`]
///
/// # Arguments
///
/// * `dnskey` - the DNSKEY record of the signing key
/// * `sig_inception` - epoch seconds at which the signature becomes valid
/// * `sig_expiration` - epoch seconds at which it ceases to be
/// * `records` - the RRset that will be covered
pub fn rrsig_for_rrset(
    dnskey: &Record,
    sig_inception: u32,
    sig_expiration: u32,
    records: &[Record],
) -> DnsSecResult<Record> {
    let Some(&RData::DNSSEC(DNSSECRData::DNSKEY(ref dnskey_rdata))) = dnskey.data() else {
        return Err(DnsSecErrorKind::InvalidKey("not a DNSKEY record".to_string()).into());
    };
    let first = records
        .first()
        .ok_or(DnsSecErrorKind::Message("no records to sign"))?;

    let rrsig = RRSIG::new(
        first.record_type(),
        dnskey_rdata.algorithm(),
        first.name().num_labels(),
        first.ttl(),
        sig_expiration,
        sig_inception,
        dnskey_rdata.calculate_key_tag()?,
        dnskey.name().clone(),
        Vec::new(),
    );

    let mut record = Record::with(
        first.name().clone(),
        crate::rr::RecordType::RRSIG,
        first.ttl(),
    );
    record.set_dns_class(first.dns_class());
    record.set_data(Some(RData::DNSSEC(DNSSECRData::RRSIG(rrsig))));
    Ok(record)
}
