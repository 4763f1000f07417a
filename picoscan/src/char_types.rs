// SPDX-License-Identifier: Apache-2.0

/// A single 8-bit character, read as one UTF-8 code unit.
///
/// From a UTF-8 source this is exactly one code unit, so a multi-byte
/// sequence yields its lead byte. From a wider source the code point is
/// re-encoded and must be ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NarrowChar(pub u8);

/// A single 16-bit character, read as one UTF-16 code unit.
///
/// Code points outside the Basic Multilingual Plane cannot be represented
/// and fail with [`ScanErrorCode::InvalidEncoding`](crate::ScanErrorCode::InvalidEncoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WideChar(pub u16);

impl From<NarrowChar> for u8 {
    fn from(ch: NarrowChar) -> Self {
        ch.0
    }
}

impl From<WideChar> for u16 {
    fn from(ch: WideChar) -> Self {
        ch.0
    }
}

impl WideChar {
    /// The character as a scalar value, if it is not a lone surrogate.
    pub fn to_char(self) -> Option<char> {
        char::from_u32(u32::from(self.0))
    }
}
