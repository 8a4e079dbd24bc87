// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Juniper DNS protocol library.
//!
//! This crate is the wire and presentation codec underneath the Juniper DNS
//! tools: binary message encoding and decoding with domain-name compression,
//! an RFC 1035 master-file ("zone file") parser, and DNSSEC and TSIG signing
//! and verification. It performs no I/O; transports hand complete byte
//! buffers in and out.

#![warn(
    clippy::default_trait_access,
    clippy::dbg_macro,
    clippy::unimplemented,
    missing_copy_implementations,
    missing_docs,
    non_snake_case,
    non_upper_case_globals,
    rust_2018_idioms,
    unreachable_pub
)]
#![allow(
    clippy::single_component_path_imports,
    clippy::upper_case_acronyms,
    clippy::bool_to_int_with_if
)]

pub mod error;
pub mod op;
pub mod rr;
pub mod serialize;

pub use crate::error::{ProtoError, ProtoErrorKind};

#[cfg(feature = "dnssec")]
pub use crate::error::{DnsSecError, DnsSecErrorKind};

/// Returns the version of the crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
