// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Signing and verification against fixed vectors, BIND generated keys

#![cfg(feature = "dnssec")]

use std::str::FromStr;

use data_encoding::BASE64;

use juniper_proto::rr::dnssec::rdata::rrsig::date_to_time;
use juniper_proto::rr::dnssec::rdata::{DNSSECRData, RRSIG};
use juniper_proto::rr::dnssec::{
    decode_bind_private_key, sign_rrset, verify_rrsig, Algorithm, DigestType,
};
use juniper_proto::rr::rdata::{A, SOA};
use juniper_proto::rr::{DNSClass, Name, RData, Record, RecordType};

const RSA_DNSKEY: &str = "miek.nl. IN DNSKEY 256 3 5 AwEAAb+8lGNCxJgLS8rYVer6EnHVuIkQDghdjdtewDzU3G5R7PbMbKVRvH2Ma7pQyYceoaqWZQirSj72euPWfPxQnMy9ucCylA+FuH9cSjIcPf4PqJfdupHk9X6EBYjxrCLY4p1/yBwgyBIRJtZtAqM3ceAH2WovEJD6rTtOuHo5AluJ";

const RSA_PRIVATE: &str = "Private-key-format: v1.3
Algorithm: 5 (RSASHA1)
Modulus: v7yUY0LEmAtLythV6voScdW4iRAOCF2N217APNTcblHs9sxspVG8fYxrulDJhx6hqpZlCKtKPvZ649Z8/FCczL25wLKUD4W4f1xKMhw9/g+ol926keT1foQFiPGsItjinX/IHCDIEhEm1m0Cozdx4AfZai8QkPqtO064ejkCW4k=
PublicExponent: AQAB
PrivateExponent: YPwEmwjk5HuiROKU4xzHQ6l1hG8Iiha4cKRG3P5W2b66/EN/GUh07ZSf0UiYB67o257jUDVEgwCuPJz776zfApcCB4oGV+YDyEu7Hp/rL8KcSN0la0k2r9scKwxTp4BTJT23zyBFXsV/1wRDK1A5NxsHPDMYi2SoK63Enm/1ptk=
Prime1: /wjOG+fD0ybNoSRn7nQ79udGeR1b0YhUA5mNjDx/x2fxtIXzygYk0Rhx9QFfDy6LOBvz92gbNQlzCLz3DJt5hw==
Prime2: wHZsJ8OGhkp5p3mrJFZXMDc2mbYusDVTA+t+iRPdS797Tj0pjvU2HN4vTnTj8KBQp6hmnY7dLp9Y1qserySGbw==
Exponent1: N0A7FsSRIg+IAN8YPQqlawoTtG1t1OkJ+nWrurPootScApX6iMvn8fyvw3p2k51rv84efnzpWAYiC8SUaQDNxQ==
Exponent2: SvuYRaGyvo0zemE3oS+WRm2scxR8eiA8WJGeOc+obwOKCcBgeZblXzfdHGcEC1KaOcetOwNW/vwMA46lpLzJNw==
Coefficient: 8+7ZN/JgByqv0NfULiFKTjtyegUcijRuyij7yNxYbCBneDvZGxJwKNi4YYXWx743pcAj4Oi4Oh86gcmxLs+hGw==
Created: 20110302104537
Publish: 20110302104537
Activate: 20110302104537";

const ECDSA_DNSKEY: &str = "example.net. 3600 IN DNSKEY 257 3 14 (
	xKYaNhWdGOfJ+nPrL8/arkwf2EY3MDJ+SErKivBVSum1
	w/egsXvSADtNJhyem5RCOpgQ6K8X1DRSEkrbYQ+OB+v8
	/uX45NBwY8rp65F6Glur8I/mlVNgF6W/qTI37m40 )";

const ECDSA_PRIVATE: &str = "Private-key-format: v1.2
Algorithm: 14 (ECDSAP384SHA384)
PrivateKey: WURgWHCcYIYUPWgeLmiPY2DJJk02vgrmTfitxgqcL4vwW7BOrbawVmVe0d9V94SR";

fn dnskey_rdata(record: &Record) -> &juniper_proto::rr::dnssec::rdata::DNSKEY {
    match record.data() {
        Some(RData::DNSSEC(DNSSECRData::DNSKEY(dnskey))) => dnskey,
        other => panic!("expected a DNSKEY, got {other:?}"),
    }
}

#[test]
fn test_rsa_key_tag() {
    let dnskey = Record::from_str(RSA_DNSKEY).expect("failed to parse DNSKEY");
    assert_eq!(dnskey_rdata(&dnskey).calculate_key_tag().unwrap(), 37350);
}

#[test]
fn test_rsa_private_key_components() {
    let key = decode_bind_private_key(RSA_PRIVATE).expect("failed to parse private key");
    assert_eq!(key.algorithm(), Algorithm::RSASHA1);

    // the public material derived from the private key matches the DNSKEY
    let dnskey = Record::from_str(RSA_DNSKEY).unwrap();
    assert_eq!(
        key.to_public_bytes().unwrap(),
        dnskey_rdata(&dnskey).public_key()
    );
}

#[test]
fn test_rsa_signature_stability() {
    let dnskey = Record::from_str(RSA_DNSKEY).unwrap();
    let key = decode_bind_private_key(RSA_PRIVATE).unwrap();

    let mut soa = Record::from_rdata(
        Name::from_str("miek.nl.").unwrap(),
        14400,
        RData::SOA(SOA::new(
            Name::from_str("open.nlnetlabs.nl.").unwrap(),
            Name::from_str("miekg.atoom.net.").unwrap(),
            1293945905,
            14400,
            3600,
            604800,
            86400,
        )),
    );
    soa.set_dns_class(DNSClass::IN);

    let rrsig_rdata = RRSIG::new(
        RecordType::SOA,
        Algorithm::RSASHA1,
        0, // filled by the signer
        0, // filled by the signer
        1296534305, // date -u '+%s' -d"2011-02-01 04:25:05"
        1293942305, // date -u '+%s' -d"2011-01-02 04:25:05"
        dnskey_rdata(&dnskey).calculate_key_tag().unwrap(),
        Name::from_str("miek.nl.").unwrap(),
        Vec::new(),
    );
    let mut rrsig = Record::from_rdata(
        Name::from_str("miek.nl.").unwrap(),
        14400,
        RData::DNSSEC(DNSSECRData::RRSIG(rrsig_rdata)),
    );
    rrsig.set_dns_class(DNSClass::IN);

    sign_rrset(&mut rrsig, &key, &dnskey, std::slice::from_ref(&soa)).expect("signing failed");

    let Some(RData::DNSSEC(DNSSECRData::RRSIG(sig))) = rrsig.data() else {
        panic!("rrsig rdata disappeared");
    };
    assert_eq!(
        BASE64.encode(sig.sig()),
        "D5zsobpQcmMmYsUMLxCVEtgAdCvTu8V/IEeP4EyLBjqPJmjt96bwM9kqihsccofA5LIJ7DN91qkCORjWSTwNhzCv7bMyr2o5vBZElrlpnRzlvsFIoAZCD9xg6ZY7ZyzUJmU6IcTwG4v3xEYajcpbJJiyaw/RqR90MuRdKPiBzSo="
    );

    // and the signature must verify against the public DNSKEY
    verify_rrsig(&rrsig, &dnskey, std::slice::from_ref(&soa), 1_294_000_000)
        .expect("verification failed");
}

#[test]
fn test_ecdsa_ds_digest() {
    let dnskey = Record::from_str(ECDSA_DNSKEY).expect("failed to parse DNSKEY");
    let ds = dnskey_rdata(&dnskey)
        .to_ds(dnskey.name(), DigestType::SHA384)
        .expect("DS generation failed");

    assert_eq!(ds.key_tag(), 10771);
    let digest_hex: String = ds.digest().iter().map(|b| format!("{b:02x}")).collect();
    assert_eq!(
        digest_hex,
        "72d7b62976ce06438e9c0bf319013cf801f09ecc84b8d7e9495f27e305c6a9b0563a9b5f4d288405c3008a946df983d6"
    );
}

#[test]
fn test_ecdsa_sign_and_verify() {
    let dnskey = Record::from_str(ECDSA_DNSKEY).unwrap();
    let key = decode_bind_private_key(ECDSA_PRIVATE).unwrap();

    let mut a = Record::from_rdata(
        Name::from_str("www.example.net.").unwrap(),
        3600,
        RData::A(A::new(192, 0, 2, 1)),
    );
    a.set_dns_class(DNSClass::IN);

    let expiration = date_to_time("20100909102025").unwrap();
    let inception = date_to_time("20100812102025").unwrap();

    let rrsig_rdata = RRSIG::new(
        RecordType::A,
        Algorithm::ECDSAP384SHA384,
        0,
        0,
        expiration,
        inception,
        dnskey_rdata(&dnskey).calculate_key_tag().unwrap(),
        Name::from_str("example.net.").unwrap(),
        Vec::new(),
    );
    let mut rrsig = Record::from_rdata(
        Name::from_str("example.net.").unwrap(),
        14400,
        RData::DNSSEC(DNSSECRData::RRSIG(rrsig_rdata)),
    );
    rrsig.set_dns_class(DNSClass::IN);

    sign_rrset(&mut rrsig, &key, &dnskey, std::slice::from_ref(&a)).expect("signing failed");

    verify_rrsig(&rrsig, &dnskey, std::slice::from_ref(&a), inception + 10)
        .expect("verification failed");

    // a time outside the window must be rejected even with a valid signature
    let err = verify_rrsig(&rrsig, &dnskey, std::slice::from_ref(&a), expiration + 1).unwrap_err();
    assert!(err.to_string().starts_with("BadTime:"), "{err}");

    // a tampered record must fail the cryptographic check
    let mut tampered = a.clone();
    tampered.set_data(Some(RData::A(A::new(192, 0, 2, 2))));
    let err =
        verify_rrsig(&rrsig, &dnskey, std::slice::from_ref(&tampered), inception + 10).unwrap_err();
    assert!(err.to_string().starts_with("BadSig:"), "{err}");
}
