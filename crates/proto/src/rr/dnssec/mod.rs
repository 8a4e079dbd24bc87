// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! dns security extension related modules

mod algorithm;
mod digest_type;
mod ec_public_key;
pub mod key_format;
mod keypair;
pub mod public_key;
pub mod rdata;
mod rsa_public_key;
mod signer;
pub mod tbs;
pub mod tsig;
mod verifier;

pub use self::algorithm::Algorithm;
pub use self::digest_type::DigestType;
pub use self::key_format::decode_bind_private_key;
pub use self::keypair::KeyPair;
pub use self::public_key::{PublicKey, PublicKeyEnum};
pub use self::signer::{rrsig_for_rrset, sign_rrset};
pub use self::tbs::TBS;
pub use self::tsig::{TSigner, TsigAlgorithm};
pub use self::verifier::{verify_rrsig, Verifier};

pub use crate::error::DnsSecResult;
