// SPDX-License-Identifier: Apache-2.0

//! Code unit, code point and character readers.

use crate::char_types::{NarrowChar, WideChar};
use crate::cursor::Cursor;
use crate::encoding::{encode_code_point_as_narrow, encode_code_point_as_wide, CodeUnit};
use crate::format_specs::{FormatSpecs, PresentationType};
use crate::locale::LocaleRef;
use crate::options::ScanOptions;
use crate::scan_error::{ScanError, ScanExpected};
use crate::value_reader::{ScanBuiltin, ValueReader};

/// Longest code unit sequence of any supported encoding.
const MAX_SEQUENCE_LEN: usize = 4;

/// Read exactly one code unit.
pub fn read_code_unit<'b, 's, C: CodeUnit>(
    mut range: Cursor<'b, 's, C>,
) -> ScanExpected<(Cursor<'b, 's, C>, C)> {
    let unit = range.next().ok_or(ScanError::end_of_input())?;
    Ok((range, unit))
}

/// Decode one Unicode scalar value.
///
/// A sequence cut short by the end of input is `end_of_input`; a unit that
/// cannot start a sequence or a malformed sequence is `invalid_encoding`.
pub fn read_code_point<'b, 's, C: CodeUnit>(
    mut range: Cursor<'b, 's, C>,
) -> ScanExpected<(Cursor<'b, 's, C>, char)> {
    let lead = range.next().ok_or(ScanError::end_of_input())?;
    let len = lead
        .sequence_length()
        .filter(|len| (1..=MAX_SEQUENCE_LEN).contains(len))
        .ok_or(ScanError::invalid_encoding("invalid leading code unit"))?;

    let mut units = [lead; MAX_SEQUENCE_LEN];
    let sequence = units
        .get_mut(..len)
        .ok_or(ScanError::invalid_encoding("invalid leading code unit"))?;
    for slot in sequence.iter_mut().skip(1) {
        *slot = range.next().ok_or(ScanError::end_of_input())?;
    }

    let ch = C::decode(sequence).ok_or(ScanError::invalid_encoding(
        "malformed code unit sequence",
    ))?;
    Ok((range, ch))
}

/// Reader for `char`, [`NarrowChar`] and [`WideChar`].
///
/// A target exactly one source code unit wide is read as a single code
/// unit. Otherwise one code point is decoded and re-encoded into the
/// target, failing if it does not fit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharReader;

fn check_char_specs(specs: &FormatSpecs) -> ScanExpected<()> {
    if specs.width.is_some() {
        return Err(ScanError::invalid_format_string(
            "width is not supported for characters",
        ));
    }
    match specs.ty {
        PresentationType::None | PresentationType::Character => Ok(()),
        _ => Err(ScanError::invalid_format_string(
            "invalid presentation type for a character",
        )),
    }
}

fn read_narrow<'b, 's, C: CodeUnit>(
    range: Cursor<'b, 's, C>,
) -> ScanExpected<(Cursor<'b, 's, C>, NarrowChar)> {
    if C::WIDTH == 1 {
        let (rest, unit) = read_code_unit(range)?;
        let byte = u8::try_from(unit.to_u32())
            .map_err(|_| ScanError::invalid_encoding("code unit wider than a narrow character"))?;
        Ok((rest, NarrowChar(byte)))
    } else {
        let (rest, ch) = read_code_point(range)?;
        Ok((rest, NarrowChar(encode_code_point_as_narrow(ch)?)))
    }
}

fn read_wide<'b, 's, C: CodeUnit>(
    range: Cursor<'b, 's, C>,
) -> ScanExpected<(Cursor<'b, 's, C>, WideChar)> {
    if C::WIDTH == 2 {
        let (rest, unit) = read_code_unit(range)?;
        let unit = u16::try_from(unit.to_u32())
            .map_err(|_| ScanError::invalid_encoding("code unit wider than a wide character"))?;
        Ok((rest, WideChar(unit)))
    } else {
        let (rest, ch) = read_code_point(range)?;
        Ok((rest, WideChar(encode_code_point_as_wide(ch)?)))
    }
}

macro_rules! impl_char_reader {
    ($($ty:ty => $read:expr),* $(,)?) => {$(
        impl<C: CodeUnit> ValueReader<C, $ty> for CharReader {
            fn skip_ws_before_read(&self) -> bool {
                false
            }

            fn check_specs(&self, specs: &FormatSpecs) -> ScanExpected<()> {
                check_char_specs(specs)
            }

            fn read_default<'b, 's>(
                &mut self,
                range: Cursor<'b, 's, C>,
                value: &mut $ty,
                _loc: LocaleRef<'_>,
            ) -> ScanExpected<Cursor<'b, 's, C>> {
                let (rest, ch) = $read(range)?;
                *value = ch;
                Ok(rest)
            }

            fn read_specs<'b, 's>(
                &mut self,
                range: Cursor<'b, 's, C>,
                _specs: &FormatSpecs,
                value: &mut $ty,
                loc: LocaleRef<'_>,
            ) -> ScanExpected<Cursor<'b, 's, C>> {
                <Self as ValueReader<C, $ty>>::read_default(self, range, value, loc)
            }
        }

        impl<C: CodeUnit> ScanBuiltin<C> for $ty {
            type Reader = CharReader;

            fn make_reader(_options: &ScanOptions) -> CharReader {
                CharReader
            }
        }
    )*};
}

impl_char_reader! {
    char => read_code_point,
    NarrowChar => read_narrow,
    WideChar => read_wide,
}
