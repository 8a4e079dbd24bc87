// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! domain name, aka labels, implementation

use std::cmp::Ordering;
use std::fmt::{self, Write};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use tinyvec::TinyVec;

use crate::error::{ProtoError, ProtoErrorKind, ProtoResult};
use crate::serialize::binary::{BinDecodable, BinDecoder, BinEncodable, BinEncoder};

/// A domain name: a sequence of labels, each of 1 to 63 bytes, at most 255
/// bytes in total including the length octets.
///
/// Names are stored uncompressed and case preserved; comparisons are
/// case-insensitive ASCII per RFC 1035. Compression pointers exist only on
/// the wire.
#[derive(Clone, Default, Eq)]
pub struct Name {
    is_fqdn: bool,
    label_data: TinyVec<[u8; 24]>,
    // This points to the end of each label.
    label_ends: TinyVec<[u8; 8]>,
}

/// Maximum hops through compression pointers while unpacking a single name.
const MAX_POINTER_HOPS: u8 = 10;

impl Name {
    /// Maximum legal length of a domain name
    pub const MAX_LENGTH: usize = 255;

    /// Create a new domain::Name, i.e. label
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the root label, i.e. no labels, can probably make this better in the future.
    pub fn root() -> Self {
        let mut this = Self::new();
        this.is_fqdn = true;
        this
    }

    /// Returns true if there are no labels, i.e. it's empty.
    ///
    /// In DNS the root is represented by `.`
    pub fn is_root(&self) -> bool {
        self.label_ends.is_empty() && self.is_fqdn()
    }

    /// Returns true if the name is a fully qualified domain name.
    ///
    /// If this is true, it has effects like only querying for this single name, as opposed to building
    ///  up a search list in resolvers.
    pub fn is_fqdn(&self) -> bool {
        self.is_fqdn
    }

    /// Specifies this name is a fully qualified domain name
    pub fn set_fqdn(&mut self, val: bool) {
        self.is_fqdn = val
    }

    /// Returns an iterator over the labels
    pub fn iter(&self) -> LabelIter<'_> {
        LabelIter {
            name: self,
            start: 0,
            end: self.label_ends.len() as u8,
        }
    }

    /// Appends the label to the end of this name
    pub fn append_label(mut self, label: &[u8]) -> ProtoResult<Self> {
        self.extend_name(label)?;
        Ok(self)
    }

    /// Creates a new Name from the specified labels
    pub fn from_labels<I, L>(labels: I) -> ProtoResult<Self>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut name = Self::new();
        for label in labels {
            name = name.append_label(label.as_ref())?;
        }
        name.set_fqdn(true);
        Ok(name)
    }

    /// Extend the name with the offered label, validating lengths
    fn extend_name(&mut self, label: &[u8]) -> Result<(), ProtoError> {
        if label.is_empty() {
            return Err(ProtoErrorKind::Message("label must not be empty").into());
        }
        if label.len() > 63 {
            return Err(ProtoErrorKind::LabelBytesTooLong(label.len()).into());
        }

        let new_len = self.len() + label.len() + 1;
        if new_len > Self::MAX_LENGTH {
            return Err(ProtoErrorKind::DomainNameTooLong(new_len).into());
        }

        self.label_data.extend_from_slice(label);
        self.label_ends.push(self.label_data.len() as u8);

        Ok(())
    }

    /// Appends `other` to `self`, returning a new `Name`
    ///
    /// Carries the FQDN status of `other`.
    pub fn append_name(mut self, other: &Self) -> Result<Self, ProtoError> {
        for label in other.iter() {
            self.extend_name(label)?;
        }

        self.is_fqdn = other.is_fqdn;
        Ok(self)
    }

    /// Appends the `domain` to `self`, making the new `Name` an FQDN
    ///
    /// This is an alias for `append_name` with the added effect of marking the new `Name` as
    /// a fully-qualified-domain-name.
    pub fn append_domain(self, domain: &Self) -> Result<Self, ProtoError> {
        let mut this = self.append_name(domain)?;
        this.set_fqdn(true);
        Ok(this)
    }

    /// Creates a new Name with all labels lowercased
    pub fn to_lowercase(&self) -> Self {
        let mut new_label_data = TinyVec::new();
        new_label_data.extend(self.label_data.iter().map(u8::to_ascii_lowercase));

        Self {
            is_fqdn: self.is_fqdn,
            label_data: new_label_data,
            label_ends: self.label_ends.clone(),
        }
    }

    /// Trims off the first part of the name, to help with searching for the domain piece
    pub fn base_name(&self) -> Self {
        let length = self.label_ends.len();
        if length > 0 {
            return self.trim_to(length - 1);
        }
        self.clone()
    }

    /// Trims to the number of labels specified, keeping the rightmost labels
    pub fn trim_to(&self, num_labels: usize) -> Self {
        if num_labels > self.label_ends.len() {
            self.clone()
        } else {
            Self::from_labels(self.iter().skip(self.label_ends.len() - num_labels))
                .expect("trim_to does not create new labels")
        }
    }

    /// Returns the number of labels in the name, discounting `*`.
    ///
    /// This is the `labels` value of a covering RRSIG.
    pub fn num_labels(&self) -> u8 {
        let num = self.label_ends.len() as u8;

        match self.iter().next() {
            Some(b"*") => num.saturating_sub(1),
            Some(_) => num,
            None => num,
        }
    }

    /// Returns the length in bytes of the name in wire format, including label length octets
    /// and the terminating zero.
    pub fn len(&self) -> usize {
        if self.label_ends.is_empty() {
            return 1;
        }

        self.label_data.len() + self.label_ends.len() + 1
    }

    /// Returns whether the length of the name is 0, i.e. the root
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }

    /// True if the first label of this name is the wildcard, i.e. '*'
    pub fn is_wildcard(&self) -> bool {
        self.iter().next().is_some_and(|l| l == b"*")
    }

    /// Parses the presentation form of a name, qualifying relative names with `origin`.
    ///
    /// A trailing unescaped `.` makes the name fully qualified. `\X` escapes a single
    /// character, `\DDD` is a decimal escape for one byte.
    pub fn parse(local: &str, origin: Option<&Self>) -> ProtoResult<Self> {
        let mut name = Self::new();
        let mut label = Vec::<u8>::new();

        let mut state = ParseState::Label;

        // short circuit root parse
        if local == "." {
            name.set_fqdn(true);
            return Ok(name);
        }

        for ch in local.bytes() {
            state = match state {
                ParseState::Label => match ch {
                    b'.' => {
                        name = name.append_label(&label)?;
                        label.clear();
                        ParseState::Label
                    }
                    b'\\' => ParseState::Escape1,
                    ch if ch > 0x20 && ch < 0x7f => {
                        label.push(ch);
                        ParseState::Label
                    }
                    _ => return Err(ProtoErrorKind::BadEscape(local.to_string()).into()),
                },
                ParseState::Escape1 => {
                    if ch.is_ascii_digit() {
                        ParseState::Escape2(u32::from(ch - b'0'))
                    } else {
                        // it's a single escaped char
                        label.push(ch);
                        ParseState::Label
                    }
                }
                ParseState::Escape2(i) => {
                    if ch.is_ascii_digit() {
                        ParseState::Escape3(i, u32::from(ch - b'0'))
                    } else {
                        return Err(ProtoErrorKind::BadEscape(local.to_string()).into());
                    }
                }
                ParseState::Escape3(i, ii) => {
                    if ch.is_ascii_digit() {
                        // decimal byte escape, \DDD
                        let val: u32 = (i * 100) + (ii * 10) + u32::from(ch - b'0');
                        if val > 255 {
                            return Err(ProtoErrorKind::BadEscape(local.to_string()).into());
                        }
                        label.push(val as u8);
                        ParseState::Label
                    } else {
                        return Err(ProtoErrorKind::BadEscape(local.to_string()).into());
                    }
                }
            };
        }

        if !matches!(state, ParseState::Label) {
            return Err(ProtoErrorKind::BadEscape(local.to_string()).into());
        }

        if !label.is_empty() {
            name = name.append_label(&label)?;
        }

        // Check if the last character processed was an unescaped `.`
        if label.is_empty() && !local.is_empty() {
            name.set_fqdn(true);
        } else if let Some(other) = origin {
            return name.append_domain(other);
        }

        Ok(name)
    }

    /// Emits the canonical version of the name to the encoder.
    ///
    /// In canonical form, there will be no pointers written to the encoder (i.e. no compression).
    pub fn emit_as_canonical(
        &self,
        encoder: &mut BinEncoder<'_>,
        canonical: bool,
    ) -> ProtoResult<()> {
        let buf_len = encoder.len(); // lazily assert the size is less than 255...

        // start index of each label
        let mut labels_written = Vec::with_capacity(self.label_ends.len());
        // we're going to write out each label, tracking the indexes of the start to each label
        //   then we'll look to see if we can remove them and recapture the capacity in the buffer...
        for label in self.iter() {
            if label.len() > 63 {
                return Err(ProtoErrorKind::LabelBytesTooLong(label.len()).into());
            }

            labels_written.push(encoder.offset());
            encoder.emit_character_data(label)?;
        }
        let last_index = encoder.offset();
        // now search for other labels already stored matching from the beginning label, strip then to the end
        //   if it's not found, then store this as a new label
        for label_idx in &labels_written {
            match encoder.get_label_pointer(*label_idx, last_index) {
                // if writing canonical and already found, continue
                Some(_) if canonical => continue,
                Some(loc) if !canonical && loc & 0xC000 == 0 => {
                    // reset back to the beginning of this label, and then write the pointer...
                    encoder.set_offset(*label_idx);
                    encoder.trim();

                    // write out the pointer marker
                    //  or'd with the location which shouldn't be larger than this 2^14 or 16k
                    encoder.emit_u16(0xC000u16 | (loc & 0x3FFFu16))?;

                    // we found a pointer don't write more, break
                    return Ok(());
                }
                _ => {
                    // no existing label exists, store this new one.
                    encoder.store_label_pointer(*label_idx, last_index);
                }
            }
        }

        // if we're getting here, then we didn't write out a pointer and are ending the name
        // the end of the list of names
        encoder.emit(0)?;

        // the entire name needs to be less than 256.
        let length = encoder.len() - buf_len;
        if length > 255 {
            return Err(ProtoErrorKind::DomainNameTooLong(length).into());
        }

        Ok(())
    }

    /// Writes the labels, as lower case, to the encoder
    ///
    /// # Arguments
    ///
    /// * `encoder` - encoder for writing this name
    /// * `lowercase` - if true the name will be lowercased, otherwise it will not be changed when writing
    pub fn emit_with_lowercase(
        &self,
        encoder: &mut BinEncoder<'_>,
        lowercase: bool,
    ) -> ProtoResult<()> {
        let is_canonical_names = encoder.is_canonical_names();
        if lowercase {
            self.to_lowercase()
                .emit_as_canonical(encoder, is_canonical_names)
        } else {
            self.emit_as_canonical(encoder, is_canonical_names)
        }
    }

    /// Compare two Names, not considering FQDN-ness.
    fn cmp_labels(&self, other: &Self, case_sensitive: bool) -> Ordering {
        if self.label_ends.is_empty() && other.label_ends.is_empty() {
            return Ordering::Equal;
        }

        // we reverse the iters so that we are comparing from the root/domain to the local...
        let self_labels = self.iter().rev();
        let other_labels = other.iter().rev();

        for (l, r) in self_labels.zip(other_labels) {
            let ord = if case_sensitive {
                l.cmp(r)
            } else {
                cmp_ignore_case(l, r)
            };
            match ord {
                Ordering::Equal => continue,
                not_eq => return not_eq,
            }
        }

        self.label_ends.len().cmp(&other.label_ends.len())
    }

    /// Case sensitive comparison
    pub fn cmp_case(&self, other: &Self) -> Ordering {
        match (self.is_fqdn(), other.is_fqdn()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => self.cmp_labels(other, true),
        }
    }

    /// Compares the Names, in a case sensitive manner
    pub fn eq_case(&self, other: &Self) -> bool {
        self.cmp_case(other) == Ordering::Equal
    }

    /// Converts this name into an escaped ascii string, the inverse of `parse`.
    pub fn to_ascii(&self) -> String {
        let mut s = String::with_capacity(self.len());
        self.write_labels(&mut s)
            .expect("string conversion of name should not fail");
        s
    }

    fn write_labels<W: Write>(&self, f: &mut W) -> Result<(), fmt::Error> {
        let mut iter = self.iter();
        if let Some(label) = iter.next() {
            write_escaped_label(f, label)?;
        }

        for label in iter {
            write!(f, ".")?;
            write_escaped_label(f, label)?;
        }

        // if it was the root name
        if self.is_root() || self.is_fqdn() {
            write!(f, ".")?;
        }
        Ok(())
    }
}

/// escape `.`, `\` and non-printable bytes on output, `\DDD` is decimal
fn write_escaped_label<W: Write>(f: &mut W, label: &[u8]) -> Result<(), fmt::Error> {
    for b in label {
        match b {
            b'.' => f.write_str("\\.")?,
            b'\\' => f.write_str("\\\\")?,
            b if *b > 0x20 && *b < 0x7f => f.write_char(char::from(*b))?,
            b => write!(f, "\\{b:03}")?,
        }
    }
    Ok(())
}

fn cmp_ignore_case(l: &[u8], r: &[u8]) -> Ordering {
    for (l, r) in l.iter().zip(r.iter()) {
        match l.to_ascii_lowercase().cmp(&r.to_ascii_lowercase()) {
            Ordering::Equal => continue,
            not_eq => return not_eq,
        }
    }
    l.len().cmp(&r.len())
}

/// An iterator over the labels of a name, left to right
pub struct LabelIter<'a> {
    name: &'a Name,
    start: u8,
    end: u8,
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }

        let end = *self.name.label_ends.get(self.start as usize)?;
        let start = match self.start {
            0 => 0,
            _ => self.name.label_ends[(self.start - 1) as usize],
        };
        self.start += 1;
        Some(&self.name.label_data[start as usize..end as usize])
    }
}

impl ExactSizeIterator for LabelIter<'_> {
    fn len(&self) -> usize {
        (self.end - self.start) as usize
    }
}

impl DoubleEndedIterator for LabelIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.end <= self.start {
            return None;
        }

        self.end -= 1;

        let end = *self.name.label_ends.get(self.end as usize)?;
        let start = match self.end {
            0 => 0,
            _ => self.name.label_ends[(self.end - 1) as usize],
        };
        Some(&self.name.label_data[start as usize..end as usize])
    }
}

impl PartialEq<Self> for Name {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_fqdn(), other.is_fqdn()) {
            (true, true) | (false, false) => self.cmp_labels(other, false) == Ordering::Equal,
            _ => false,
        }
    }
}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_fqdn.hash(state);

        // this needs to be CaseInsensitive like PartialEq
        for label in self.iter() {
            for b in label {
                state.write_u8(b.to_ascii_lowercase());
            }
            state.write_u8(0);
        }
    }
}

impl PartialOrd<Self> for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    /// Case insensitive comparison, per RFC 4034
    ///
    /// ```text
    /// 6.1.  Canonical DNS Name Order
    ///
    ///  For the purposes of DNS security, owner names are ordered by treating
    ///  individual labels as unsigned left-justified octet strings.  The
    ///  absence of a octet sorts before a zero value octet, and uppercase
    ///  US-ASCII letters are treated as if they were lowercase US-ASCII
    ///  letters.
    /// ```
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_fqdn(), other.is_fqdn()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => self.cmp_labels(other, false),
        }
    }
}

/// This is the list of states for the parse state machine
enum ParseState {
    Label,
    Escape1,
    Escape2(u32),
    Escape3(u32, u32),
}

impl BinEncodable for Name {
    fn emit(&self, encoder: &mut BinEncoder<'_>) -> ProtoResult<()> {
        let is_canonical_names = encoder.is_canonical_names();
        self.emit_as_canonical(encoder, is_canonical_names)
    }
}

impl<'r> BinDecodable<'r> for Name {
    /// parses the chain of labels
    ///  this has a max of 255 octets, with each label being less than 63.
    fn read(decoder: &mut BinDecoder<'r>) -> ProtoResult<Self> {
        let mut name = Self::default();
        read_inner(decoder, &mut name, None, 0)?;
        Ok(name)
    }
}

fn read_inner(
    decoder: &mut BinDecoder<'_>,
    name: &mut Name,
    max_idx: Option<usize>,
    hops: u8,
) -> ProtoResult<()> {
    let mut state = LabelParseState::LabelLengthOrPointer;
    let name_start = decoder.index();

    if hops > MAX_POINTER_HOPS {
        return Err(ProtoErrorKind::BadPointer {
            idx: name_start,
            ptr: name_start as u16,
        }
        .into());
    }

    // pointer: (slice == 1100 0000 aka C0) & C0 == true, then 03FF & slice = offset
    // label: 03FF & slice = length; slice.next(length) = label
    // root: 0000
    loop {
        // this protects against overlapping labels
        if let Some(max_idx) = max_idx {
            if decoder.index() >= max_idx {
                return Err(ProtoErrorKind::BadPointer {
                    idx: name_start,
                    ptr: max_idx as u16,
                }
                .into());
            }
        }

        state = match state {
            LabelParseState::LabelLengthOrPointer => {
                // determine what the next label is
                match decoder.peek() {
                    Some(0) => {
                        // RFC 1035 Section 3.1: every name ends with the null label of the root
                        name.set_fqdn(true);
                        LabelParseState::Root
                    }
                    None => {
                        // Valid names on the wire should end in a 0-octet; if the last byte
                        // wasn't 00, the name is invalid.
                        return Err(ProtoErrorKind::UnexpectedEndOfInput.into());
                    }
                    Some(byte) if byte & 0b1100_0000 == 0b1100_0000 => LabelParseState::Pointer,
                    Some(byte) if byte & 0b1100_0000 == 0b0000_0000 => LabelParseState::Label,
                    Some(byte) => return Err(ProtoErrorKind::UnrecognizedLabelCode(byte).into()),
                }
            }
            // labels must have a maximum length of 63
            LabelParseState::Label => {
                let label = decoder.read_character_data()?;
                if label.len() > 63 {
                    return Err(ProtoErrorKind::LabelBytesTooLong(label.len()).into());
                }

                name.extend_name(label)?;

                // reset to collect more data
                LabelParseState::LabelLengthOrPointer
            }
            // RFC 1035 4.1.4. Message compression: a pointer replaces an entire domain
            // name or a list of labels at the end of a name. The pointed-at labels must
            // appear prior in the message; anything else is a forward pointer or a loop.
            LabelParseState::Pointer => {
                let pointer_location = decoder.index();
                let location = decoder.read_u16()? & 0x3FFF;

                if location as usize >= name_start {
                    return Err(ProtoErrorKind::BadPointer {
                        idx: pointer_location,
                        ptr: location,
                    }
                    .into());
                }

                let mut pointer = decoder.clone(location);
                read_inner(&mut pointer, name, Some(name_start), hops + 1)?;

                // Pointers always finish the name, break like Root.
                break;
            }
            LabelParseState::Root => {
                // need to pop() the 0 off the stack...
                decoder.pop()?;
                break;
            }
        }
    }

    if name.len() > Name::MAX_LENGTH {
        return Err(ProtoErrorKind::DomainNameTooLong(name.len()).into());
    }

    Ok(())
}

/// This is the list of states for the label parsing state machine
enum LabelParseState {
    LabelLengthOrPointer, // basically the start of the FSM
    Label,                // storing length of the label, must be < 63
    Pointer,              // location of pointer in slice,
    Root,                 // root is the end of the labels list for an FQDN
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_labels(f)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Name(\"")?;
        self.write_labels(f)?;
        f.write_str("\")")
    }
}

impl FromStr for Name {
    type Err = ProtoError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::parse(name, None)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::dbg_macro, clippy::print_stdout)]

    use super::*;

    #[test]
    fn test_num_labels() {
        assert_eq!(Name::from_str("*").unwrap().num_labels(), 0);
        assert_eq!(Name::from_str("a").unwrap().num_labels(), 1);
        assert_eq!(Name::from_str("*.b").unwrap().num_labels(), 1);
        assert_eq!(Name::from_str("a.b").unwrap().num_labels(), 2);
        assert_eq!(Name::from_str("*.b.c").unwrap().num_labels(), 2);
        assert_eq!(Name::from_str("a.b.c").unwrap().num_labels(), 3);
        assert_eq!(Name::root().num_labels(), 0);
    }

    #[test]
    fn test_dot_in_name() {
        // an escaped dot must pack as a literal '.' byte inside the label
        let name = Name::from_str("aa\\.bb.nl.").unwrap();
        let buf = name.to_bytes().unwrap();

        // index 3 must be a real dot: [5, 'a', 'a', '.', 'b', 'b', 2, 'n', 'l', 0]
        assert_eq!(buf[0], 5);
        assert_eq!(buf[3], b'.');
        assert_eq!(buf[6], 2);

        // printing it should yield the escape again
        let unpacked = Name::from_bytes(&buf).unwrap();
        assert_eq!(unpacked.to_ascii(), "aa\\.bb.nl.");
    }

    #[test]
    fn test_name_round_trip() {
        for input in [
            "r\\.gieben.miek.nl.",
            "www\\.www.miek.nl.",
            "www.*.miek.nl.",
            "miek.nl.",
            ".",
        ] {
            let name = Name::from_str(input).unwrap();
            let bytes = name.to_bytes().unwrap();
            let unpacked = Name::from_bytes(&bytes).unwrap();
            assert_eq!(unpacked.to_ascii(), input, "failed on {input}");
        }
    }

    #[test]
    fn test_decimal_escape() {
        let name = Name::from_str("a\\032b.nl.").unwrap();
        let label = name.iter().next().unwrap();
        assert_eq!(label, b"a b");
        assert_eq!(name.to_ascii(), "a\\032b.nl.");
    }

    #[test]
    fn test_parse_origin() {
        let origin = Name::from_str("miek.nl.").unwrap();
        let name = Name::parse("a", Some(&origin)).unwrap();
        assert_eq!(name.to_ascii(), "a.miek.nl.");
        assert!(name.is_fqdn());

        // absolute names ignore the origin
        let name = Name::parse("b.", Some(&origin)).unwrap();
        assert_eq!(name.to_ascii(), "b.");
    }

    #[test]
    fn test_pointer() {
        let mut bytes = Vec::with_capacity(512);

        let first = Name::from_str("ra.rb.rc.").unwrap();
        let second = Name::from_str("rb.rc.").unwrap();
        let third = Name::from_str("rc.").unwrap();

        {
            let mut e = BinEncoder::new(&mut bytes);
            first.emit(&mut e).unwrap();
            let pos_second = e.offset();
            second.emit(&mut e).unwrap();
            let pos_third = e.offset();
            third.emit(&mut e).unwrap();

            // both tails must compress into pointers
            assert_eq!(pos_third - pos_second, 2);
        }

        let mut d = BinDecoder::new(&bytes);
        assert_eq!(Name::read(&mut d).unwrap(), first);
        assert_eq!(Name::read(&mut d).unwrap(), second);
        assert_eq!(Name::read(&mut d).unwrap(), third);
    }

    #[test]
    fn test_forward_pointer_rejected() {
        // a name that is nothing but a pointer to itself
        let loop_ptr = vec![0xC0, 0x00];
        assert!(Name::from_bytes(&loop_ptr).is_err());

        // forward pointer
        let forward = vec![0xC0, 0x04, 0, 0, 2, b'n', b'l', 0];
        assert!(Name::from_bytes(&forward).is_err());
    }

    #[test]
    fn test_oversized_label_rejected() {
        let mut bytes = vec![64u8];
        bytes.extend(std::iter::repeat(b'a').take(64));
        bytes.push(0);
        assert!(Name::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_oversized_name_rejected() {
        let label = "a".repeat(63);
        let too_long = format!("{label}.{label}.{label}.{label}.{label}");
        assert!(Name::from_str(&too_long).is_err());
    }

    #[test]
    fn test_cmp_case_insensitive() {
        let a = Name::from_str("ExAmPle.COM.").unwrap();
        let b = Name::from_str("example.com.").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_ne!(a.cmp_case(&b), Ordering::Equal);
    }

    #[test]
    fn test_canonical_ordering() {
        // RFC 4034 section 6.1 example ordering
        let ordered = [
            "example.",
            "a.example.",
            "yljkjljk.a.example.",
            "Z.a.example.",
            "zABC.a.EXAMPLE.",
            "z.example.",
            "\\001.z.example.",
            "*.z.example.",
            "\\200.z.example.",
        ];

        let mut names = ordered
            .iter()
            .map(|s| Name::from_str(s).unwrap())
            .collect::<Vec<_>>();
        names.sort();

        let sorted = names.iter().map(Name::to_ascii).collect::<Vec<_>>();
        let expected = ordered
            .iter()
            .map(|s| Name::from_str(s).unwrap().to_ascii())
            .collect::<Vec<_>>();
        assert_eq!(sorted, expected);
    }
}
