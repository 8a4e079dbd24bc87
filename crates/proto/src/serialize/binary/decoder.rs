// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::error::{ProtoErrorKind, ProtoResult};

/// This is non-destructive to the inner buffer, b/c for pointer types we need to perform a reverse
///  seek to lookup names
///
/// Every read is bounds checked; a read past the end of the buffer fails with a `FormErr` rather
/// than panicking, untrusted network input flows through here.
pub struct BinDecoder<'a> {
    buffer: &'a [u8],
    index: usize,
}

impl<'a> BinDecoder<'a> {
    /// Creates a new BinDecoder
    ///
    /// # Arguments
    ///
    /// * `buffer` - buffer from which all data will be read
    pub fn new(buffer: &'a [u8]) -> Self {
        BinDecoder { buffer, index: 0 }
    }

    /// Pop one byte from the buffer
    pub fn pop(&mut self) -> ProtoResult<u8> {
        if self.index < self.buffer.len() {
            let byte = self.buffer[self.index];
            self.index += 1;
            Ok(byte)
        } else {
            Err(ProtoErrorKind::UnexpectedEndOfInput.into())
        }
    }

    /// Returns the number of bytes remaining in the buffer
    ///
    /// ```
    /// use juniper_proto::serialize::binary::BinDecoder;
    ///
    /// let deadbeef = b"deadbeef";
    /// let mut decoder = BinDecoder::new(deadbeef);
    /// assert_eq!(decoder.len(), 8);
    /// decoder.read_slice(7).unwrap();
    /// assert_eq!(decoder.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.buffer.len().saturating_sub(self.index)
    }

    /// Returns `true` if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Peek one byte forward, without moving the current index forward
    pub fn peek(&self) -> Option<u8> {
        if self.index < self.buffer.len() {
            Some(self.buffer[self.index])
        } else {
            None
        }
    }

    /// Returns the current index in the buffer
    pub fn index(&self) -> usize {
        self.index
    }

    /// This is a pretty efficient clone, as the buffer is never cloned, and only the index is set
    ///  to the value passed in
    pub fn clone(&self, index_at: u16) -> BinDecoder<'a> {
        BinDecoder {
            buffer: self.buffer,
            index: index_at as usize,
        }
    }

    /// Reads a length-prefixed character-string from the buffer
    ///
    /// ```text
    /// <character-string> is a single
    /// length octet followed by that number of characters.  <character-string>
    /// is treated as binary information, and can be up to 256 characters in
    /// length (including the length octet).
    /// ```
    pub fn read_character_data(&mut self) -> ProtoResult<&'a [u8]> {
        let length = self.pop()? as usize;
        self.read_slice(length)
    }

    /// Reads a Vec out of the buffer
    ///
    /// # Arguments
    ///
    /// * `len` - number of bytes to read from the buffer
    pub fn read_vec(&mut self, len: usize) -> ProtoResult<Vec<u8>> {
        self.read_slice(len).map(ToOwned::to_owned)
    }

    /// Reads a slice out of the buffer, without allocating
    ///
    /// # Arguments
    ///
    /// * `len` - number of bytes to read from the buffer
    pub fn read_slice(&mut self, len: usize) -> ProtoResult<&'a [u8]> {
        let end = self
            .index
            .checked_add(len)
            .ok_or(ProtoErrorKind::UnexpectedEndOfInput)?;
        if end > self.buffer.len() {
            return Err(ProtoErrorKind::UnexpectedEndOfInput.into());
        }
        let slice: &'a [u8] = &self.buffer[self.index..end];
        self.index = end;
        Ok(slice)
    }

    /// Reads a byte from the buffer, equivalent to `Self::pop()`
    pub fn read_u8(&mut self) -> ProtoResult<u8> {
        self.pop()
    }

    /// Reads the next 2 bytes into u16, big endian
    pub fn read_u16(&mut self) -> ProtoResult<u16> {
        let s = self.read_slice(2)?;
        Ok(u16::from_be_bytes([s[0], s[1]]))
    }

    /// Reads the next 4 bytes into u32, big endian
    pub fn read_u32(&mut self) -> ProtoResult<u32> {
        let s = self.read_slice(4)?;
        Ok(u32::from_be_bytes([s[0], s[1], s[2], s[3]]))
    }

    /// Reads the next 6 bytes into the lower 48 bits of a u64, big endian
    pub fn read_u48(&mut self) -> ProtoResult<u64> {
        let s = self.read_slice(6)?;
        Ok(u64::from_be_bytes([0, 0, s[0], s[1], s[2], s[3], s[4], s[5]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_slice() {
        let deadbeef = b"deadbeef";
        let mut decoder = BinDecoder::new(deadbeef);

        let read = decoder.read_slice(4).expect("failed to read dead");
        assert_eq!(read, b"dead");

        let read = decoder.read_slice(2).expect("failed to read be");
        assert_eq!(read, b"be");

        let read = decoder.read_slice(0).expect("failed to read nothing");
        assert_eq!(read, b"");

        // this should fail
        assert!(decoder.read_slice(3).is_err());
    }

    #[test]
    fn test_read_past_end() {
        let mut decoder = BinDecoder::new(&[0xFF]);
        decoder.pop().expect("failed to pop");
        assert!(decoder.pop().is_err());
        assert!(decoder.read_u16().is_err());
        assert!(decoder.read_u32().is_err());
    }

    #[test]
    fn test_read_character_data() {
        let mut decoder = BinDecoder::new(&[3, b'a', b'b', b'c']);
        assert_eq!(decoder.read_character_data().unwrap(), b"abc");

        // truncated character data fails rather than returning a short read
        let mut decoder = BinDecoder::new(&[3, b'a']);
        assert!(decoder.read_character_data().is_err());
    }
}
