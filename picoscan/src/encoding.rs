// SPDX-License-Identifier: Apache-2.0

//! Code unit types and the Unicode encodings they carry.
//!
//! Input is always a sequence of code units: `u8` for UTF-8, `u16` for
//! UTF-16 and `u32` for UTF-32. The [`CodeUnit`] trait is sealed; the scanner
//! only supports these three encodings.

use core::fmt::Debug;

use crate::scan_error::{ScanError, ScanExpected};

mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// The Unicode encoding form used by a code unit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16,
    Utf32,
}

/// A single storage element of an encoded text.
pub trait CodeUnit: Copy + Eq + Ord + Default + Debug + private::Sealed + 'static {
    /// Encoding form of sequences made of this code unit.
    const ENCODING: Encoding;

    /// Width of one code unit in bytes.
    const WIDTH: usize = core::mem::size_of::<Self>();

    /// Numeric value of the code unit.
    fn to_u32(self) -> u32;

    /// Widen an ASCII byte into a code unit.
    fn from_ascii(byte: u8) -> Self;

    /// Length of the code unit sequence introduced by `self`.
    ///
    /// Returns `None` when `self` cannot start a sequence (a continuation
    /// byte, a lone low surrogate, an invalid lead byte).
    fn sequence_length(self) -> Option<usize>;

    /// Decode exactly one scalar value from `units`.
    ///
    /// Returns `None` unless `units` is one complete, valid sequence.
    fn decode(units: &[Self]) -> Option<char>;

    /// Encode `ch`, returning the written prefix of `out`.
    fn encode(ch: char, out: &mut [Self; 4]) -> &[Self];

    /// The code unit as an ASCII byte, if it is one.
    fn as_ascii(self) -> Option<u8> {
        u8::try_from(self.to_u32()).ok().filter(u8::is_ascii)
    }
}

impl CodeUnit for u8 {
    const ENCODING: Encoding = Encoding::Utf8;

    fn to_u32(self) -> u32 {
        u32::from(self)
    }

    fn from_ascii(byte: u8) -> Self {
        byte
    }

    fn sequence_length(self) -> Option<usize> {
        match self {
            0x00..=0x7F => Some(1),
            0xC2..=0xDF => Some(2),
            0xE0..=0xEF => Some(3),
            0xF0..=0xF4 => Some(4),
            _ => None,
        }
    }

    fn decode(units: &[Self]) -> Option<char> {
        // from_utf8 rejects overlong forms, surrogates and values past U+10FFFF
        let s = core::str::from_utf8(units).ok()?;
        let mut chars = s.chars();
        let ch = chars.next()?;
        chars.next().is_none().then_some(ch)
    }

    fn encode(ch: char, out: &mut [Self; 4]) -> &[Self] {
        ch.encode_utf8(out).as_bytes()
    }
}

impl CodeUnit for u16 {
    const ENCODING: Encoding = Encoding::Utf16;

    fn to_u32(self) -> u32 {
        u32::from(self)
    }

    fn from_ascii(byte: u8) -> Self {
        u16::from(byte)
    }

    fn sequence_length(self) -> Option<usize> {
        match self {
            0xD800..=0xDBFF => Some(2),
            0xDC00..=0xDFFF => None,
            _ => Some(1),
        }
    }

    fn decode(units: &[Self]) -> Option<char> {
        let ch = char::decode_utf16(units.iter().copied()).next()?.ok()?;
        (ch.len_utf16() == units.len()).then_some(ch)
    }

    fn encode(ch: char, out: &mut [Self; 4]) -> &[Self] {
        ch.encode_utf16(out)
    }
}

impl CodeUnit for u32 {
    const ENCODING: Encoding = Encoding::Utf32;

    fn to_u32(self) -> u32 {
        self
    }

    fn from_ascii(byte: u8) -> Self {
        u32::from(byte)
    }

    fn sequence_length(self) -> Option<usize> {
        Some(1)
    }

    fn decode(units: &[Self]) -> Option<char> {
        match units {
            [unit] => char::from_u32(*unit),
            _ => None,
        }
    }

    fn encode(ch: char, out: &mut [Self; 4]) -> &[Self] {
        out[0] = u32::from(ch);
        &out[..1]
    }
}

/// Re-encode a scalar value as a single UTF-16 code unit.
///
/// Scalar values outside the Basic Multilingual Plane need a surrogate pair
/// and have no single-unit representation.
pub fn encode_code_point_as_wide(ch: char) -> ScanExpected<u16> {
    let mut buf = [0u16; 2];
    match ch.encode_utf16(&mut buf) {
        [unit] => Ok(*unit),
        _ => Err(ScanError::invalid_encoding(
            "code point not representable as a single wide character",
        )),
    }
}

/// Re-encode a scalar value as a single UTF-8 code unit.
pub fn encode_code_point_as_narrow(ch: char) -> ScanExpected<u8> {
    if ch.is_ascii() {
        u8::try_from(u32::from(ch))
            .map_err(|_| ScanError::invalid_encoding("code point not representable"))
    } else {
        Err(ScanError::invalid_encoding(
            "code point not representable as a single narrow character",
        ))
    }
}
