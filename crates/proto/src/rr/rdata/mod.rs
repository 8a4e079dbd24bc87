// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! All record data structures and their serialization

pub mod a;
pub mod aaaa;
pub mod loc;
pub mod mx;
pub mod name;
pub mod null;
pub mod opt;
pub mod soa;
pub mod srv;
pub mod txt;

pub use self::a::A;
pub use self::aaaa::AAAA;
pub use self::loc::LOC;
pub use self::mx::MX;
pub use self::name::{CNAME, NS, PTR};
pub use self::null::NULL;
pub use self::opt::{EdnsCode, EdnsOption, OPT};
pub use self::soa::SOA;
pub use self::srv::SRV;
pub use self::txt::TXT;
