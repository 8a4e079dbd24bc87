// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! RRSIG type and related implementations

use std::fmt;

use data_encoding::BASE64;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::{ProtoErrorKind, ProtoResult};
use crate::rr::dnssec::Algorithm;
use crate::rr::{Name, RecordType};
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncoder};

/// [RFC 4034](https://tools.ietf.org/html/rfc4034#section-3), DNSSEC Resource Records, March 2005
///
/// ```text
/// 3.1.  RRSIG RDATA Wire Format
///
///    The RDATA for an RRSIG RR consists of a 2 octet Type Covered field, a
///    1 octet Algorithm field, a 1 octet Labels field, a 4 octet Original
///    TTL field, a 4 octet Signature Expiration field, a 4 octet Signature
///    Inception field, a 2 octet Key tag, the Signer's Name field, and the
///    Signature field.
///
///                         1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
///     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |        Type Covered           |  Algorithm    |     Labels    |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |                         Original TTL                          |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |                      Signature Expiration                     |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |                      Signature Inception                      |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |            Key Tag            |                               /
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+         Signer's Name         /
///    /                                                               /
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    /                                                               /
///    /                            Signature                          /
///    /                                                               /
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct RRSIG {
    type_covered: RecordType,
    algorithm: Algorithm,
    num_labels: u8,
    original_ttl: u32,
    sig_expiration: u32,
    sig_inception: u32,
    key_tag: u16,
    signer_name: Name,
    sig: Vec<u8>,
}

impl RRSIG {
    /// Creates a new RRSIG record data, used for both RRSIG and SIG(0) records.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        type_covered: RecordType,
        algorithm: Algorithm,
        num_labels: u8,
        original_ttl: u32,
        sig_expiration: u32,
        sig_inception: u32,
        key_tag: u16,
        signer_name: Name,
        sig: Vec<u8>,
    ) -> Self {
        Self {
            type_covered,
            algorithm,
            num_labels,
            original_ttl,
            sig_expiration,
            sig_inception,
            key_tag,
            signer_name,
            sig,
        }
    }

    /// The type of the RRset covered by this signature
    pub fn type_covered(&self) -> RecordType {
        self.type_covered
    }

    /// The algorithm used to produce the signature
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The number of labels of the owner name, discounting a leading `*` and the root
    pub fn num_labels(&self) -> u8 {
        self.num_labels
    }

    /// The TTL of the covered RRset as it appears in the authoritative zone
    pub fn original_ttl(&self) -> u32 {
        self.original_ttl
    }

    /// Epoch seconds at which this signature stops being valid
    pub fn sig_expiration(&self) -> u32 {
        self.sig_expiration
    }

    /// Epoch seconds at which this signature becomes valid
    pub fn sig_inception(&self) -> u32 {
        self.sig_inception
    }

    /// The key tag of the DNSKEY that produced this signature
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// The owner of the DNSKEY that produced this signature
    pub fn signer_name(&self) -> &Name {
        &self.signer_name
    }

    /// The signature bytes
    pub fn sig(&self) -> &[u8] {
        &self.sig
    }

    /// Replace the signature bytes, used when signing
    pub fn set_sig(&mut self, sig: Vec<u8>) {
        self.sig = sig;
    }

    pub(crate) fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    pub(crate) fn set_key_tag(&mut self, key_tag: u16) {
        self.key_tag = key_tag;
    }

    pub(crate) fn set_signer_name(&mut self, signer_name: Name) {
        self.signer_name = signer_name;
    }

    pub(crate) fn set_num_labels(&mut self, num_labels: u8) {
        self.num_labels = num_labels;
    }

    pub(crate) fn set_original_ttl(&mut self, original_ttl: u32) {
        self.original_ttl = original_ttl;
    }

    pub(crate) fn set_type_covered(&mut self, type_covered: RecordType) {
        self.type_covered = type_covered;
    }
}

pub(crate) fn read(decoder: &mut BinDecoder<'_>, rdata_length: u16) -> ProtoResult<RRSIG> {
    let start_idx = decoder.index();

    let type_covered = RecordType::from(decoder.read_u16()?);
    let algorithm = Algorithm::from_u8(decoder.read_u8()?);
    let num_labels = decoder.read_u8()?;
    let original_ttl = decoder.read_u32()?;
    let sig_expiration = decoder.read_u32()?;
    let sig_inception = decoder.read_u32()?;
    let key_tag = decoder.read_u16()?;
    let signer_name = Name::read(decoder)?;

    // the signature is the remainder of the rdata
    let sig_len = (rdata_length as usize)
        .checked_sub(decoder.index() - start_idx)
        .ok_or_else(|| ProtoErrorKind::Message("invalid rdata length in RRSIG"))?;
    let sig = decoder.read_vec(sig_len)?;

    Ok(RRSIG::new(
        type_covered,
        algorithm,
        num_labels,
        original_ttl,
        sig_expiration,
        sig_inception,
        key_tag,
        signer_name,
        sig,
    ))
}

pub(crate) fn emit(encoder: &mut BinEncoder<'_>, rrsig: &RRSIG) -> ProtoResult<()> {
    emit_pre_sig(
        encoder,
        rrsig.type_covered(),
        rrsig.algorithm(),
        rrsig.num_labels(),
        rrsig.original_ttl(),
        rrsig.sig_expiration(),
        rrsig.sig_inception(),
        rrsig.key_tag(),
        rrsig.signer_name(),
    )?;
    encoder.emit_vec(rrsig.sig())
}

/// Write the RRSIG rdata with the signature field excluded: this is the prefix
/// of the signing input of RFC 4034, section 3.1.8.1
#[allow(clippy::too_many_arguments)]
pub(crate) fn emit_pre_sig(
    encoder: &mut BinEncoder<'_>,
    type_covered: RecordType,
    algorithm: Algorithm,
    num_labels: u8,
    original_ttl: u32,
    sig_expiration: u32,
    sig_inception: u32,
    key_tag: u16,
    signer_name: &Name,
) -> ProtoResult<()> {
    encoder.emit_u16(type_covered.into())?;
    encoder.emit_u8(algorithm.into())?;
    encoder.emit_u8(num_labels)?;
    encoder.emit_u32(original_ttl)?;
    encoder.emit_u32(sig_expiration)?;
    encoder.emit_u32(sig_inception)?;
    encoder.emit_u16(key_tag)?;

    // the signer name is never compressed, and is lowercased in the canonical form
    if encoder.is_canonical_names() {
        signer_name
            .to_lowercase()
            .emit_as_canonical(encoder, true)?;
    } else {
        signer_name.emit_as_canonical(encoder, true)?;
    }

    Ok(())
}

/// The timestamp form of RFC 4034, section 3.2: `YYYYMMDDHHmmSS` in UTC
const SIG_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year][month][day][hour][minute][second]");

/// Parse the presentation form of a signature timestamp.
///
/// Accepts the `YYYYMMDDHHmmSS` form of RFC 4034 section 3.2, and the plain
/// seconds-since-epoch form.
pub fn date_to_time(s: &str) -> ProtoResult<u32> {
    if s.len() == 14 && s.bytes().all(|b| b.is_ascii_digit()) {
        let date = PrimitiveDateTime::parse(s, SIG_DATE_FORMAT)
            .map_err(|_| ProtoErrorKind::Msg(format!("invalid time: {s:?}")))?;
        let epoch = date.assume_utc().unix_timestamp();
        return u32::try_from(epoch)
            .map_err(|_| ProtoErrorKind::Msg(format!("time out of range: {s:?}")).into());
    }

    s.parse::<u32>()
        .map_err(|_| ProtoErrorKind::Msg(format!("invalid time: {s:?}")).into())
}

/// Render a signature timestamp in the `YYYYMMDDHHmmSS` form, UTC
pub fn time_to_date(epoch: u32) -> String {
    OffsetDateTime::from_unix_timestamp(i64::from(epoch))
        .expect("u32 timestamps are always in range")
        .format(SIG_DATE_FORMAT)
        .expect("formatting to a string cannot fail")
}

/// [RFC 4034, section 3.2](https://tools.ietf.org/html/rfc4034#section-3.2), presentation
/// form, with the expiration and inception as `YYYYMMDDHHmmSS`
impl fmt::Display for RRSIG {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{ty} {alg} {labels} {ttl} {expiration} {inception} {tag} {signer} {sig}",
            ty = self.type_covered,
            alg = u8::from(self.algorithm),
            labels = self.num_labels,
            ttl = self.original_ttl,
            expiration = time_to_date(self.sig_expiration),
            inception = time_to_date(self.sig_inception),
            tag = self.key_tag,
            signer = self.signer_name.to_ascii(),
            sig = BASE64.encode(&self.sig),
        )
    }
}
