// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Transaction signatures: HMAC authentication of whole messages with a shared secret
//!
//! [RFC 8945](https://www.rfc-editor.org/rfc/rfc8945), Secret Key Transaction Authentication for DNS

use openssl::hash::MessageDigest;
use openssl::pkey::PKey;
use openssl::sign::Signer;
use tracing::debug;

use crate::error::{DnsSecErrorKind, DnsSecResult};
use crate::op::Message;
use crate::rr::dnssec::rdata::tsig::TSIG;

pub use crate::rr::dnssec::rdata::tsig::TsigAlgorithm;
use crate::rr::dnssec::rdata::DNSSECRData;
use crate::rr::{Name, RData};
use crate::serialize::binary::BinEncoder;

/// Signs and verifies messages with a shared HMAC secret.
///
/// The signing procedure of RFC 8945, section 4.3: pack the message without
/// the TSIG record, append the canonical TSIG variables, HMAC the result,
/// attach the TSIG carrying the MAC as the final additional record.
pub struct TSigner {
    key: Vec<u8>,
    algorithm: TsigAlgorithm,
    signer_name: Name,
    fudge: u16,
}

impl TSigner {
    /// Build a signer
    ///
    /// # Arguments
    ///
    /// * `key` - the shared secret, raw bytes
    /// * `algorithm` - the HMAC algorithm to use, HMAC-MD5 is the RFC 2845 mandatory one
    /// * `signer_name` - the name of the shared key, must match on both peers
    /// * `fudge` - tolerated clock skew in seconds, 300 is the recommended value
    pub fn new(
        key: Vec<u8>,
        algorithm: TsigAlgorithm,
        signer_name: Name,
        fudge: u16,
    ) -> DnsSecResult<Self> {
        hmac_digest(&algorithm)?;

        Ok(Self {
            key,
            algorithm,
            signer_name,
            fudge,
        })
    }

    /// The name of the shared key
    pub fn signer_name(&self) -> &Name {
        &self.signer_name
    }

    /// Tolerated difference between the time signed and the verifier's clock
    pub fn fudge(&self) -> u16 {
        self.fudge
    }

    /// Compute the MAC over the message bytes and the canonical TSIG variables
    fn mac(&self, message_bytes: &[u8], tsig: &TSIG) -> DnsSecResult<Vec<u8>> {
        let mut variables = Vec::with_capacity(128);
        {
            let mut encoder = BinEncoder::new(&mut variables);
            tsig.emit_tsig_for_mac(&mut encoder, &self.signer_name)?;
        }

        let pkey = PKey::hmac(&self.key)?;
        let mut signer = Signer::new(hmac_digest(&self.algorithm)?, &pkey)?;
        signer.update(message_bytes)?;
        signer.update(&variables)?;
        signer.sign_to_vec().map_err(Into::into)
    }

    /// Sign the message, appending the TSIG record to its additional section.
    ///
    /// # Arguments
    ///
    /// * `message` - the message to authenticate; its ARCOUNT grows by one
    /// * `now` - the signing time, seconds since the unix epoch
    pub fn sign_message(&self, message: &mut Message, now: u64) -> DnsSecResult<()> {
        let unsigned = message.to_vec()?;

        let tsig = TSIG::new(
            self.algorithm.clone(),
            now,
            self.fudge,
            Vec::new(),
            message.id(),
            0,
            Vec::new(),
        );

        let mac = self.mac(&unsigned, &tsig)?;
        let tsig = tsig.set_mac(mac);

        message.add_additional(tsig.to_record(self.signer_name.clone()));
        Ok(())
    }

    /// Verify a signed message.
    ///
    /// The TSIG must be the final record of the additional section. Fails with
    /// `BadTsig` on a missing TSIG, a MAC mismatch, or a time signed further
    /// than the fudge from `now`.
    pub fn verify_message(&self, message: &Message, now: u64) -> DnsSecResult<()> {
        let Some((tsig_record, tsig)) = message
            .additionals()
            .last()
            .and_then(|record| match record.data() {
                Some(RData::DNSSEC(DNSSECRData::TSIG(tsig))) => Some((record, tsig)),
                _ => None,
            })
        else {
            return Err(DnsSecErrorKind::Tsig("message has no TSIG record".to_string()).into());
        };

        if tsig_record.name() != &self.signer_name {
            return Err(DnsSecErrorKind::Tsig(format!(
                "unknown key: {}",
                tsig_record.name()
            ))
            .into());
        }

        // reconstruct the message as it was signed: no TSIG, original ID
        let mut unsigned = message.clone();
        let additionals = unsigned.take_additionals();
        let count = additionals.len();
        for record in additionals.into_iter().take(count - 1) {
            unsigned.add_additional(record);
        }
        unsigned.set_id(tsig.oid());
        let unsigned = unsigned.to_vec()?;

        let expected = self.mac(&unsigned, tsig)?;
        // memcmp::eq requires equal lengths; a wrong-sized MAC is just wrong
        if expected.len() != tsig.mac().len() || !openssl::memcmp::eq(&expected, tsig.mac()) {
            debug!("TSIG MAC mismatch for key {}", self.signer_name);
            return Err(DnsSecErrorKind::Tsig("MAC mismatch".to_string()).into());
        }

        let skew = now.abs_diff(tsig.time());
        if skew > u64::from(tsig.fudge()) {
            return Err(DnsSecErrorKind::Tsig(format!(
                "time signed {} outside fudge {} of {}",
                tsig.time(),
                tsig.fudge(),
                now
            ))
            .into());
        }

        Ok(())
    }
}

fn hmac_digest(algorithm: &TsigAlgorithm) -> DnsSecResult<MessageDigest> {
    match algorithm {
        TsigAlgorithm::HmacMd5 => Ok(MessageDigest::md5()),
        TsigAlgorithm::HmacSha1 => Ok(MessageDigest::sha1()),
        TsigAlgorithm::HmacSha256 => Ok(MessageDigest::sha256()),
        TsigAlgorithm::Unknown(name) => Err(DnsSecErrorKind::Tsig(format!(
            "unsupported TSIG algorithm: {}",
            name.to_ascii()
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Query;
    use crate::rr::RecordType;
    use std::str::FromStr;

    fn signer() -> TSigner {
        TSigner::new(
            b"shared-secret-key".to_vec(),
            TsigAlgorithm::HmacMd5,
            Name::from_str("key.example.com.").unwrap(),
            300,
        )
        .unwrap()
    }

    fn query() -> Message {
        let mut message = Message::new();
        message.set_id(4321).add_query(Query::query(
            Name::from_str("www.example.com.").unwrap(),
            RecordType::A,
        ));
        message
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = signer();
        let mut message = query();

        signer.sign_message(&mut message, 1_579_576_800).unwrap();
        assert_eq!(message.additionals().len(), 1);

        // the receiver decodes the message from the wire and verifies
        let bytes = message.to_vec().unwrap();
        let received = Message::from_vec(&bytes).unwrap();
        signer.verify_message(&received, 1_579_576_810).unwrap();
    }

    #[test]
    fn test_verify_rejects_bad_key() {
        let signer = signer();
        let mut message = query();
        signer.sign_message(&mut message, 1_579_576_800).unwrap();

        let other = TSigner::new(
            b"a-different-secret".to_vec(),
            TsigAlgorithm::HmacMd5,
            Name::from_str("key.example.com.").unwrap(),
            300,
        )
        .unwrap();

        let err = other.verify_message(&message, 1_579_576_810).unwrap_err();
        assert!(err.to_string().starts_with("BadTsig:"), "{err}");
    }

    #[test]
    fn test_verify_rejects_time_outside_fudge() {
        let signer = signer();
        let mut message = query();
        signer.sign_message(&mut message, 1_579_576_800).unwrap();

        let err = signer
            .verify_message(&message, 1_579_576_800 + 301)
            .unwrap_err();
        assert!(err.to_string().starts_with("BadTsig:"), "{err}");
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let signer = signer();
        let mut message = query();
        signer.sign_message(&mut message, 1_579_576_800).unwrap();

        // flip the recursion desired bit after signing
        message.set_recursion_desired(true);

        let err = signer
            .verify_message(&message, 1_579_576_810)
            .unwrap_err();
        assert!(err.to_string().starts_with("BadTsig:"), "{err}");
    }
}
