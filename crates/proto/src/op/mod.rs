// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Operations to send with a `Client` or server, e.g. `Query`, `Message`, or `UpdateMessage` can
//! be used together to either query or update resource records sets.

mod edns;
mod header;
mod message;
mod op_code;
mod query;
mod response_code;

pub use self::edns::Edns;
pub use self::header::{Header, MessageType};
pub use self::message::Message;
pub use self::op_code::OpCode;
pub use self::query::Query;
pub use self::response_code::ResponseCode;
