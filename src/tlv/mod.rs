// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Allocation-free DER tag-length-value decoding.
//!
//! A [`Cursor`] is a view over the bytes not yet consumed. Every read checks
//! the declared length against the remaining bytes before handing out a
//! sub-slice, so no value can reach past the enclosing structure.
//!
//! Only the subset of DER used by the certificate grammar is supported:
//! single-octet tags and lengths in short form or in the 0x81/0x82 long forms.

use crate::error::{EncodingError, Error, Result};

/// Single-octet tags used by the certificate grammar.
pub mod tag {
    pub const BOOLEAN: u8 = 0x01;
    pub const INTEGER: u8 = 0x02;
    pub const BIT_STRING: u8 = 0x03;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const OBJECT_IDENTIFIER: u8 = 0x06;
    pub const ENUMERATED: u8 = 0x0A;
    pub const UTF8_STRING: u8 = 0x0C;
    pub const PRINTABLE_STRING: u8 = 0x13;
    pub const IA5_STRING: u8 = 0x16;
    pub const UTC_TIME: u8 = 0x17;
    pub const GENERALIZED_TIME: u8 = 0x18;
    pub const SEQUENCE: u8 = 0x30;
    pub const SET: u8 = 0x31;

    /// `[0]` primitive, IMPLICIT
    pub const CONTEXT_0: u8 = 0x80;
    /// `[1]` primitive, IMPLICIT
    pub const CONTEXT_1: u8 = 0x81;
    /// `[2]` primitive, IMPLICIT
    pub const CONTEXT_2: u8 = 0x82;
    /// `[0]` constructed, EXPLICIT
    pub const CONTEXT_CONSTRUCTED_0: u8 = 0xA0;
    /// `[3]` constructed, EXPLICIT
    pub const CONTEXT_CONSTRUCTED_3: u8 = 0xA3;
}

/// One decoded element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tlv<'a> {
    /// Identifier octet
    pub tag: u8,
    /// Content octets
    pub value: &'a [u8],
    /// Identifier, length and content octets together
    pub raw: &'a [u8],
}

/// DER INTEGER content with its sign pad stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integer<'a> {
    /// Magnitude octets, big-endian
    pub bytes: &'a [u8],
    /// Number of leading 0x00 octets that were stripped (0 or 1)
    pub padding: usize,
}

impl<'a> Integer<'a> {
    /// Encoded length before stripping.
    pub fn encoded_len(&self) -> usize {
        self.bytes.len() + self.padding
    }

    /// Value as `u32`; fails when the magnitude does not fit.
    pub fn to_u32(&self) -> Result<u32> {
        if self.bytes.len() > 4 {
            return Err(Error::encoding(EncodingError::InvalidInteger));
        }
        Ok(self
            .bytes
            .iter()
            .fold(0u32, |acc, b| (acc << 8) | u32::from(*b)))
    }
}

/// Decode DER length octets.
///
/// Returns `(length, number of length octets)`.
pub fn decode_length(bytes: &[u8]) -> Result<(usize, usize)> {
    let first = *bytes
        .first()
        .ok_or(Error::encoding(EncodingError::UnexpectedEnd))?;
    match first {
        b if b < 0x81 => Ok((b as usize, 1)),
        0x81 => {
            let b = *bytes
                .get(1)
                .ok_or(Error::encoding(EncodingError::UnexpectedEnd))?;
            Ok((b as usize, 2))
        }
        0x82 => match bytes.get(1..3) {
            Some(&[hi, lo]) => Ok((usize::from(u16::from_be_bytes([hi, lo])), 3)),
            _ => Err(Error::encoding(EncodingError::UnexpectedEnd)),
        },
        other => Err(Error::encoding(EncodingError::UnsupportedLengthForm(other))),
    }
}

/// Bounds-checked reader over DER bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    rest: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { rest: data }
    }

    /// Bytes not yet consumed.
    pub const fn remaining(&self) -> &'a [u8] {
        self.rest
    }

    pub const fn len(&self) -> usize {
        self.rest.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Tag at the cursor, if any.
    pub fn peek_tag(&self) -> Option<u8> {
        self.rest.first().copied()
    }

    /// Fail unless every byte has been consumed.
    pub fn finish(&self) -> Result<()> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(Error::encoding(EncodingError::TrailingData))
        }
    }

    /// Read one tag and length, checking the tag against `expected`.
    ///
    /// On success the cursor sits on the first content octet and the content
    /// length is returned; the content is guaranteed to fit in the remaining
    /// bytes. A mismatching tag is an error unless `optional` is set, in
    /// which case `Ok(None)` is returned and the cursor does not move.
    pub fn read_tag_length(&mut self, expected: u8, optional: bool) -> Result<Option<usize>> {
        let found = self
            .peek_tag()
            .ok_or(Error::encoding(EncodingError::UnexpectedEnd))?;
        if found != expected {
            if optional {
                return Ok(None);
            }
            return Err(Error::unexpected_tag(expected, found));
        }
        let (len, consumed) = decode_length(&self.rest[1..])?;
        let header = 1 + consumed;
        let end = header
            .checked_add(len)
            .ok_or(Error::encoding(EncodingError::LengthOutOfBounds))?;
        if end > self.rest.len() {
            return Err(Error::encoding(EncodingError::LengthOutOfBounds));
        }
        self.rest = &self.rest[header..];
        Ok(Some(len))
    }

    /// Take the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.rest.len() {
            return Err(Error::encoding(EncodingError::LengthOutOfBounds));
        }
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        Ok(head)
    }

    /// Read a mandatory element, returning its content octets.
    pub fn read(&mut self, expected: u8) -> Result<&'a [u8]> {
        Ok(self.read_element(expected)?.value)
    }

    /// Read an element if its tag matches.
    pub fn read_optional(&mut self, expected: u8) -> Result<Option<&'a [u8]>> {
        if self.peek_tag() != Some(expected) {
            return Ok(None);
        }
        self.read(expected).map(Some)
    }

    /// Read a mandatory element with its raw encoding.
    pub fn read_element(&mut self, expected: u8) -> Result<Tlv<'a>> {
        let start = self.rest;
        let len = self
            .read_tag_length(expected, false)?
            .ok_or(Error::Internal("mandatory read returned no element"))?;
        let value = self.take(len)?;
        Ok(Tlv {
            tag: expected,
            value,
            raw: &start[..start.len() - self.rest.len()],
        })
    }

    /// Read whatever element comes next.
    pub fn read_any(&mut self) -> Result<Tlv<'a>> {
        let found = self
            .peek_tag()
            .ok_or(Error::encoding(EncodingError::UnexpectedEnd))?;
        self.read_element(found)
    }

    /// Read a constructed element and return a cursor over its content.
    pub fn read_nested(&mut self, expected: u8) -> Result<Cursor<'a>> {
        self.read(expected).map(Cursor::new)
    }

    /// INTEGER with one leading pad octet stripped.
    ///
    /// With `must_be_positive` a set high bit on the first content octet is
    /// rejected.
    pub fn read_integer(&mut self, must_be_positive: bool) -> Result<Integer<'a>> {
        let value = self.read(tag::INTEGER)?;
        let first = *value
            .first()
            .ok_or(Error::encoding(EncodingError::InvalidInteger))?;
        if must_be_positive && first & 0x80 != 0 {
            return Err(Error::encoding(EncodingError::InvalidInteger));
        }
        if value.len() > 1 && first == 0 {
            Ok(Integer {
                bytes: &value[1..],
                padding: 1,
            })
        } else {
            Ok(Integer {
                bytes: value,
                padding: 0,
            })
        }
    }

    pub fn read_optional_integer(&mut self, must_be_positive: bool) -> Result<Option<Integer<'a>>> {
        if self.peek_tag() != Some(tag::INTEGER) {
            return Ok(None);
        }
        self.read_integer(must_be_positive).map(Some)
    }

    /// BOOLEAN, encoded as a single 0x00 or 0xFF octet.
    pub fn read_boolean(&mut self) -> Result<bool> {
        match self.read(tag::BOOLEAN)? {
            [0xFF] => Ok(true),
            [0x00] => Ok(false),
            _ => Err(Error::encoding(EncodingError::InvalidBoolean)),
        }
    }

    pub fn read_optional_boolean(&mut self) -> Result<Option<bool>> {
        if self.peek_tag() != Some(tag::BOOLEAN) {
            return Ok(None);
        }
        self.read_boolean().map(Some)
    }

    /// BIT STRING content after the unused-bits octet, which must be zero.
    pub fn read_bit_string(&mut self) -> Result<&'a [u8]> {
        match self.read(tag::BIT_STRING)? {
            [0, rest @ ..] => Ok(rest),
            _ => Err(Error::encoding(EncodingError::InvalidBitString)),
        }
    }

    /// OBJECT IDENTIFIER content octets.
    pub fn read_oid(&mut self) -> Result<&'a [u8]> {
        self.read(tag::OBJECT_IDENTIFIER)
    }

    /// NULL, which must have empty content.
    pub fn read_null(&mut self) -> Result<()> {
        if self.read(tag::NULL)?.is_empty() {
            Ok(())
        } else {
            Err(Error::encoding(EncodingError::LengthOutOfBounds))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── length forms ──

    #[test]
    fn test_short_form_length() {
        let data = [0x04, 0x02, 0xAA, 0xBB];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_tag_length(tag::OCTET_STRING, false), Ok(Some(2)));
        assert_eq!(cursor.remaining(), &[0xAA, 0xBB]);
    }

    #[test]
    fn test_long_form_lengths() {
        let mut data = [0u8; 3 + 0x80];
        data[0] = 0x04;
        data[1] = 0x81;
        data[2] = 0x80;
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read(tag::OCTET_STRING).map(|v| v.len()), Ok(0x80));
        assert!(cursor.is_empty());

        let mut data = [0u8; 4 + 0x0102];
        data[0] = 0x04;
        data[1] = 0x82;
        data[2] = 0x01;
        data[3] = 0x02;
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read(tag::OCTET_STRING).map(|v| v.len()), Ok(0x0102));
    }

    #[test]
    fn test_three_byte_length_rejected() {
        let data = [0x30, 0x83, 0x00, 0x00, 0x01, 0x00];
        let mut cursor = Cursor::new(&data);
        assert_eq!(
            cursor.read_tag_length(tag::SEQUENCE, false),
            Err(Error::encoding(EncodingError::UnsupportedLengthForm(0x83)))
        );
    }

    // ── bounds ──

    #[test]
    fn test_length_past_end_rejected_in_every_form() {
        let short = [0x30, 0x05, 0x00, 0x00];
        let one = [0x30, 0x81, 0x90, 0x00];
        let two = [0x30, 0x82, 0xFF, 0xFF, 0x00];
        for data in [&short[..], &one[..], &two[..]] {
            let mut cursor = Cursor::new(data);
            assert_eq!(
                cursor.read_tag_length(tag::SEQUENCE, false),
                Err(Error::encoding(EncodingError::LengthOutOfBounds))
            );
            // cursor untouched on failure
            assert_eq!(cursor.remaining(), data);
        }
    }

    #[test]
    fn test_truncated_length_octets() {
        let data = [0x30, 0x82, 0x01];
        let mut cursor = Cursor::new(&data);
        assert_eq!(
            cursor.read_tag_length(tag::SEQUENCE, false),
            Err(Error::encoding(EncodingError::UnexpectedEnd))
        );

        let mut empty = Cursor::new(&[]);
        assert_eq!(
            empty.read_tag_length(tag::SEQUENCE, true),
            Err(Error::encoding(EncodingError::UnexpectedEnd))
        );
    }

    // ── tags ──

    #[test]
    fn test_optional_tag_mismatch_leaves_cursor() {
        let data = [0x02, 0x01, 0x05];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_tag_length(tag::CONTEXT_1, true), Ok(None));
        assert_eq!(cursor.remaining(), &data);
        assert_eq!(cursor.read_optional(tag::CONTEXT_2), Ok(None));
        assert_eq!(
            cursor.read_tag_length(tag::SEQUENCE, false),
            Err(Error::unexpected_tag(0x30, 0x02))
        );
    }

    #[test]
    fn test_read_element_raw() {
        let data = [0x30, 0x03, 0x02, 0x01, 0x07, 0xFF];
        let mut cursor = Cursor::new(&data);
        let tlv = cursor.read_element(tag::SEQUENCE).unwrap();
        assert_eq!(tlv.raw, &data[..5]);
        assert_eq!(tlv.value, &data[2..5]);
        assert_eq!(cursor.remaining(), &[0xFF]);
        assert_eq!(
            cursor.finish(),
            Err(Error::encoding(EncodingError::TrailingData))
        );
    }

    // ── typed values ──

    #[test]
    fn test_integer_padding() {
        let data = [0x02, 0x02, 0x00, 0x80];
        let int = Cursor::new(&data).read_integer(true).unwrap();
        assert_eq!(int.bytes, &[0x80]);
        assert_eq!(int.padding, 1);
        assert_eq!(int.encoded_len(), 2);

        let zero = [0x02, 0x01, 0x00];
        let int = Cursor::new(&zero).read_integer(true).unwrap();
        assert_eq!(int.bytes, &[0x00]);
        assert_eq!(int.padding, 0);
    }

    #[test]
    fn test_integer_positivity() {
        let negative = [0x02, 0x01, 0x80];
        assert_eq!(
            Cursor::new(&negative).read_integer(true),
            Err(Error::encoding(EncodingError::InvalidInteger))
        );
        assert!(Cursor::new(&negative).read_integer(false).is_ok());

        let empty = [0x02, 0x00];
        assert!(Cursor::new(&empty).read_integer(false).is_err());
    }

    #[test]
    fn test_integer_to_u32() {
        let data = [0x02, 0x04, 0x01, 0x02, 0x03, 0x04];
        let int = Cursor::new(&data).read_integer(false).unwrap();
        assert_eq!(int.to_u32(), Ok(0x0102_0304));

        let wide = [0x02, 0x05, 0x01, 0x02, 0x03, 0x04, 0x05];
        let int = Cursor::new(&wide).read_integer(false).unwrap();
        assert!(int.to_u32().is_err());
    }

    #[test]
    fn test_boolean() {
        assert_eq!(Cursor::new(&[0x01, 0x01, 0xFF]).read_boolean(), Ok(true));
        assert_eq!(Cursor::new(&[0x01, 0x01, 0x00]).read_boolean(), Ok(false));
        assert_eq!(
            Cursor::new(&[0x01, 0x01, 0x01]).read_boolean(),
            Err(Error::encoding(EncodingError::InvalidBoolean))
        );
        assert_eq!(
            Cursor::new(&[0x01, 0x02, 0xFF, 0xFF]).read_boolean(),
            Err(Error::encoding(EncodingError::InvalidBoolean))
        );
        assert_eq!(
            Cursor::new(&[0x02, 0x01, 0x00]).read_optional_boolean(),
            Ok(None)
        );
    }

    #[test]
    fn test_bit_string() {
        assert_eq!(
            Cursor::new(&[0x03, 0x03, 0x00, 0xAB, 0xCD]).read_bit_string(),
            Ok(&[0xAB, 0xCD][..])
        );
        assert_eq!(
            Cursor::new(&[0x03, 0x02, 0x01, 0xAB]).read_bit_string(),
            Err(Error::encoding(EncodingError::InvalidBitString))
        );
        assert_eq!(
            Cursor::new(&[0x03, 0x00]).read_bit_string(),
            Err(Error::encoding(EncodingError::InvalidBitString))
        );
    }

    #[test]
    fn test_null() {
        assert_eq!(Cursor::new(&[0x05, 0x00]).read_null(), Ok(()));
        assert!(Cursor::new(&[0x05, 0x01, 0x00]).read_null().is_err());
    }
}
