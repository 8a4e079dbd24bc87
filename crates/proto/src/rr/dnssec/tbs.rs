// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! hash functions for DNSSEC operations

use crate::error::{ProtoError, ProtoErrorKind, ProtoResult};
use crate::rr::dnssec::rdata::{rrsig, RRSIG};
use crate::rr::dnssec::Algorithm;
use crate::rr::{DNSClass, Name, RData, Record, RecordType};
use crate::serialize::binary::{BinEncodable, BinEncoder};

/// Data To Be Signed.
pub struct TBS(Vec<u8>);

impl<'a> From<&'a [u8]> for TBS {
    fn from(slice: &'a [u8]) -> Self {
        Self(slice.to_owned())
    }
}

impl AsRef<[u8]> for TBS {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

/// Returns the to-be-signed serialization of the given record set.
///
/// ```text
///          signed_data = RRSIG_RDATA | RR(1) | RR(2)...  where
///
///             "|" denotes concatenation
///
///             RRSIG_RDATA is the wire format of the RRSIG RDATA fields
///                with the Signature field excluded and the Signer's Name
///                in canonical form.
///
///             RR(i) = name | type | class | OrigTTL | RDATA length | RDATA
/// ```
///
/// The records are reduced to the RRset selected by (name, dns_class,
/// type_covered), canonicalized per RFC 4034 section 6 (lowercased owner,
/// original TTL, uncompressed lowercased names in the rdata of the section
/// 6.2 types), and sorted by their canonical rdata bytes.
#[allow(clippy::too_many_arguments)]
pub fn rrset_tbs(
    name: &Name,
    dns_class: DNSClass,
    num_labels: u8,
    type_covered: RecordType,
    algorithm: Algorithm,
    original_ttl: u32,
    sig_expiration: u32,
    sig_inception: u32,
    key_tag: u16,
    signer_name: &Name,
    records: &[Record],
) -> ProtoResult<TBS> {
    // collect only the records for this rrset
    let mut rrset: Vec<&Record> = records
        .iter()
        .filter(|rr| {
            dns_class == rr.dns_class()
                && type_covered == rr.record_type()
                && name == rr.name()
        })
        .collect();

    if rrset.is_empty() {
        return Err(ProtoErrorKind::Message("no records found for rrset").into());
    }

    // canonical order is defined over the canonical form of the rdata
    let mut canonical_rdata: Vec<(Vec<u8>, &Record)> = Vec::with_capacity(rrset.len());
    for record in rrset.drain(..) {
        let bytes = record
            .data()
            .map(RData::to_canonical_bytes)
            .transpose()?
            .unwrap_or_default();
        canonical_rdata.push((bytes, record));
    }
    canonical_rdata.sort_by(|(a, _), (b, _)| a.cmp(b));

    let name = determine_name(name, num_labels)?;
    let name = name.to_lowercase();

    let mut buf: Vec<u8> = Vec::new();
    {
        let mut encoder = BinEncoder::new(&mut buf);
        encoder.set_canonical_names(true);

        rrsig::emit_pre_sig(
            &mut encoder,
            type_covered,
            algorithm,
            name.num_labels(),
            original_ttl,
            sig_expiration,
            sig_inception,
            key_tag,
            signer_name,
        )?;

        // construct the rrset signing data
        for (rdata, _) in &canonical_rdata {
            // RR(i) = name | type | class | OrigTTL | RDATA length | RDATA
            name.emit_as_canonical(&mut encoder, true)?;
            type_covered.emit(&mut encoder)?;
            dns_class.emit(&mut encoder)?;
            encoder.emit_u32(original_ttl)?;
            encoder.emit_u16(rdata.len() as u16)?;
            encoder.emit_vec(rdata)?;
        }
    }

    Ok(TBS(buf))
}

/// Returns the to-be-signed serialization of the given record set using the information
/// provided from the RRSIG record.
///
/// # Arguments
///
/// * `rrsig` - the RRSIG record produced from the RRset
/// * `records` - RRset records to sign with the information in the `rrsig`
pub fn rrset_tbs_with_rrsig(rrsig: &Record, records: &[Record]) -> ProtoResult<TBS> {
    let Some(RData::DNSSEC(super::rdata::DNSSECRData::RRSIG(sig))) = rrsig.data() else {
        return Err(ProtoError::from(format!(
            "rdata is not an RRSIG: {}",
            rrsig.name()
        )));
    };

    rrset_tbs_with_sig(rrsig.name(), rrsig.dns_class(), sig, records)
}

/// Returns the to-be-signed serialization of the given record set using the RRSIG rdata
pub fn rrset_tbs_with_sig(
    name: &Name,
    dns_class: DNSClass,
    sig: &RRSIG,
    records: &[Record],
) -> ProtoResult<TBS> {
    rrset_tbs(
        name,
        dns_class,
        sig.num_labels(),
        sig.type_covered(),
        sig.algorithm(),
        sig.original_ttl(),
        sig.sig_expiration(),
        sig.sig_inception(),
        sig.key_tag(),
        sig.signer_name(),
        records,
    )
}

/// [RFC 4035](https://tools.ietf.org/html/rfc4035), DNSSEC Protocol Modifications, March 2005
///
/// ```text
/// 5.3.2.  Reconstructing the Signed Data
///             ...
///             To calculate the name:
///                let rrsig_labels = the value of the RRSIG Labels field
///
///                let fqdn = RRset's fully qualified domain name in
///                                canonical form
///
///                let fqdn_labels = Label count of the fqdn above.
///
///                if rrsig_labels = fqdn_labels,
///                    name = fqdn
///
///                if rrsig_labels < fqdn_labels,
///                   name = "*." | the rightmost rrsig_label labels of the
///                                 fqdn
///
///                if rrsig_labels > fqdn_labels
///                   the RRSIG RR did not pass the necessary validation
///                   checks and MUST NOT be used to authenticate this
///                   RRset.
/// ```
pub fn determine_name(name: &Name, num_labels: u8) -> Result<Name, ProtoError> {
    let fqdn_labels = name.num_labels();

    if fqdn_labels == num_labels {
        return Ok(name.clone());
    }

    if num_labels < fqdn_labels {
        let rightmost = name.trim_to(num_labels as usize);
        let star_name = Name::from_labels([&b"*"[..]])?;
        if !rightmost.is_root() {
            return star_name.append_name(&rightmost).map_err(Into::into);
        }
        return Ok(star_name);
    }

    // rrsig_labels > fqdn_labels: the RRSIG must not be used
    Err(ProtoError::from(format!(
        "could not determine name from {name}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rr::rdata::{A, TXT};
    use std::str::FromStr;

    #[test]
    fn test_rrset_order_is_canonical() {
        let name = Name::from_str("example.com.").unwrap();

        // the records are supplied in the wrong canonical order on purpose
        let records = vec![
            Record::from_rdata(name.clone(), 3600, RData::A(A::new(192, 0, 2, 200))),
            Record::from_rdata(name.clone(), 3600, RData::A(A::new(192, 0, 2, 1))),
        ];
        let reversed: Vec<Record> = records.iter().rev().cloned().collect();

        let signer = Name::from_str("example.com.").unwrap();
        let tbs_a = rrset_tbs(
            &name,
            DNSClass::IN,
            2,
            RecordType::A,
            Algorithm::RSASHA256,
            3600,
            10,
            5,
            123,
            &signer,
            &records,
        )
        .unwrap();
        let tbs_b = rrset_tbs(
            &name,
            DNSClass::IN,
            2,
            RecordType::A,
            Algorithm::RSASHA256,
            3600,
            10,
            5,
            123,
            &signer,
            &reversed,
        )
        .unwrap();

        assert_eq!(tbs_a.as_ref(), tbs_b.as_ref());
    }

    #[test]
    fn test_tbs_lowercases_owner() {
        let upper = Name::from_str("WWW.EXAMPLE.COM.").unwrap();
        let lower = Name::from_str("www.example.com.").unwrap();
        let signer = Name::from_str("example.com.").unwrap();

        let record_upper =
            Record::from_rdata(upper.clone(), 3600, RData::TXT(TXT::new(vec!["x".into()])));
        let record_lower =
            Record::from_rdata(lower.clone(), 3600, RData::TXT(TXT::new(vec!["x".into()])));

        let tbs = |name: &Name, records: &[Record]| {
            rrset_tbs(
                name,
                DNSClass::IN,
                3,
                RecordType::TXT,
                Algorithm::RSASHA256,
                3600,
                10,
                5,
                123,
                &signer,
                records,
            )
            .unwrap()
        };

        assert_eq!(
            tbs(&upper, &[record_upper]).as_ref(),
            tbs(&lower, &[record_lower]).as_ref()
        );
    }

    #[test]
    fn test_determine_name_wildcard() {
        let name = Name::from_str("a.b.example.com.").unwrap();
        let reduced = determine_name(&name, 3).unwrap();
        assert_eq!(reduced.to_ascii(), "*.b.example.com.");

        let same = determine_name(&name, 4).unwrap();
        assert_eq!(same.to_ascii(), "a.b.example.com.");

        assert!(determine_name(&name, 5).is_err());
    }
}
