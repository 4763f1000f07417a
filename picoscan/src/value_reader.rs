// SPDX-License-Identifier: Apache-2.0

//! The reader dispatch layer.
//!
//! Every scannable type is paired with a [`ValueReader`] that validates the
//! field's [`FormatSpecs`] and then reads one value out of a cursor range.
//! Built-in types pick their reader through [`ScanBuiltin`]; user types
//! implement [`ScanCustom`] directly.

use crate::char_reader::read_code_point;
use crate::cursor::Cursor;
use crate::encoding::CodeUnit;
use crate::format_specs::{FormatSpecs, PresentationType};
use crate::locale::LocaleRef;
use crate::options::ScanOptions;
use crate::scan_error::{ScanError, ScanExpected};

/// Reads values of type `T` from a cursor range.
///
/// Readers either fully populate `value` and return the cursor after the
/// consumed input, or fail and leave `value` untouched.
pub trait ValueReader<C: CodeUnit, T: ?Sized> {
    /// Whether leading whitespace is skipped before reading.
    fn skip_ws_before_read(&self) -> bool {
        true
    }

    /// Reject spec modifiers this reader cannot honor.
    fn check_specs(&self, specs: &FormatSpecs) -> ScanExpected<()>;

    /// Read with no spec modifiers.
    fn read_default<'b, 's>(
        &mut self,
        range: Cursor<'b, 's, C>,
        value: &mut T,
        loc: LocaleRef<'_>,
    ) -> ScanExpected<Cursor<'b, 's, C>>;

    /// Read honoring `specs`, which have passed [`check_specs`](Self::check_specs).
    fn read_specs<'b, 's>(
        &mut self,
        range: Cursor<'b, 's, C>,
        specs: &FormatSpecs,
        value: &mut T,
        loc: LocaleRef<'_>,
    ) -> ScanExpected<Cursor<'b, 's, C>>;
}

/// A type with a built-in reader.
pub trait ScanBuiltin<C: CodeUnit>: Sized {
    type Reader: ValueReader<C, Self>;

    fn make_reader(options: &ScanOptions) -> Self::Reader;
}

/// A user-defined scannable type.
///
/// The value reads itself. Compose built-in readers with [`read_value`],
/// [`skip_whitespace`] and [`read_literal`].
pub trait ScanCustom<C: CodeUnit = u8> {
    fn skip_ws_before_read(&self) -> bool {
        true
    }

    /// By default only the empty spec `{}` is accepted.
    fn check_specs(&self, specs: &FormatSpecs) -> ScanExpected<()> {
        if *specs == FormatSpecs::default() {
            Ok(())
        } else {
            Err(ScanError::invalid_format_string(
                "format spec not supported by this type",
            ))
        }
    }

    fn read_default<'b, 's>(
        &mut self,
        range: Cursor<'b, 's, C>,
        loc: LocaleRef<'_>,
    ) -> ScanExpected<Cursor<'b, 's, C>>;

    fn read_specs<'b, 's>(
        &mut self,
        range: Cursor<'b, 's, C>,
        _specs: &FormatSpecs,
        loc: LocaleRef<'_>,
    ) -> ScanExpected<Cursor<'b, 's, C>> {
        self.read_default(range, loc)
    }
}

/// Generic operation over the concrete type behind a [`ScanArg`](crate::ScanArg).
pub trait ArgVisitor<C: CodeUnit> {
    type Output;

    fn visit<T: ScanBuiltin<C>>(self, value: &mut T) -> Self::Output;

    fn visit_custom(self, value: &mut dyn ScanCustom<C>) -> Self::Output;
}

/// Visitor reading one argument from `range`.
pub(crate) struct ReadArg<'b, 's, 'a, 'l, C: CodeUnit> {
    pub(crate) range: Cursor<'b, 's, C>,
    pub(crate) specs: &'a FormatSpecs,
    pub(crate) options: &'a ScanOptions,
    pub(crate) locale: LocaleRef<'l>,
}

impl<'b, 's, C: CodeUnit> ArgVisitor<C> for ReadArg<'b, 's, '_, '_, C> {
    type Output = ScanExpected<Cursor<'b, 's, C>>;

    fn visit<T: ScanBuiltin<C>>(self, value: &mut T) -> Self::Output {
        let mut reader = T::make_reader(self.options);
        dispatch(&mut reader, self.range, self.specs, value, self.locale)
    }

    fn visit_custom(self, value: &mut dyn ScanCustom<C>) -> Self::Output {
        value.check_specs(self.specs)?;
        let range = if value.skip_ws_before_read() && self.specs.ty != PresentationType::Character
        {
            skip_whitespace(self.range)
        } else {
            self.range
        };
        if *self.specs == FormatSpecs::default() {
            value.read_default(range, self.locale)
        } else {
            value.read_specs(range, self.specs, self.locale)
        }
    }
}

fn dispatch<'b, 's, C, T, R>(
    reader: &mut R,
    range: Cursor<'b, 's, C>,
    specs: &FormatSpecs,
    value: &mut T,
    loc: LocaleRef<'_>,
) -> ScanExpected<Cursor<'b, 's, C>>
where
    C: CodeUnit,
    T: ?Sized,
    R: ValueReader<C, T>,
{
    reader.check_specs(specs)?;
    // `c` reads characters verbatim, whitespace included
    let range = if reader.skip_ws_before_read() && specs.ty != PresentationType::Character {
        skip_whitespace(range)
    } else {
        range
    };
    if *specs == FormatSpecs::default() {
        reader.read_default(range, value, loc)
    } else {
        reader.read_specs(range, specs, value, loc)
    }
}

/// Read one built-in value from `range` the way a `{...}` field would.
pub fn read_value<'b, 's, C, T>(
    range: Cursor<'b, 's, C>,
    specs: &FormatSpecs,
    value: &mut T,
    loc: LocaleRef<'_>,
) -> ScanExpected<Cursor<'b, 's, C>>
where
    C: CodeUnit,
    T: ScanBuiltin<C>,
{
    read_value_with(range, specs, value, &ScanOptions::default(), loc)
}

/// [`read_value`] with explicit options.
pub fn read_value_with<'b, 's, C, T>(
    range: Cursor<'b, 's, C>,
    specs: &FormatSpecs,
    value: &mut T,
    options: &ScanOptions,
    loc: LocaleRef<'_>,
) -> ScanExpected<Cursor<'b, 's, C>>
where
    C: CodeUnit,
    T: ScanBuiltin<C>,
{
    let mut reader = T::make_reader(options);
    dispatch(&mut reader, range, specs, value, loc)
}

/// Skip zero or more whitespace code points.
///
/// Stops in front of the first non-whitespace code point, at the end of
/// input, or in front of a sequence that does not decode.
pub fn skip_whitespace<'b, 's, C: CodeUnit>(mut range: Cursor<'b, 's, C>) -> Cursor<'b, 's, C> {
    while let Ok((rest, ch)) = read_code_point(range.clone()) {
        if !ch.is_whitespace() {
            break;
        }
        range = rest;
    }
    range
}

/// Consume `literal` from the front of `range`.
///
/// Fails with `end_of_input` if the input ends first and with
/// `invalid_scanned_value` on the first mismatching code unit.
pub fn read_literal<'b, 's, C: CodeUnit>(
    mut range: Cursor<'b, 's, C>,
    literal: &str,
) -> ScanExpected<Cursor<'b, 's, C>> {
    let mut buf = [C::default(); 4];
    for ch in literal.chars() {
        for &expected in C::encode(ch, &mut buf).iter() {
            match range.next() {
                None => return Err(ScanError::end_of_input()),
                Some(unit) if unit == expected => {}
                Some(_) => {
                    return Err(ScanError::invalid_scanned_value(
                        "input does not match literal",
                    ))
                }
            }
        }
    }
    Ok(range)
}

/// Cursor after `literal`, if the input starts with it.
pub(crate) fn match_literal<'b, 's, C: CodeUnit>(
    range: &Cursor<'b, 's, C>,
    literal: &str,
) -> Option<Cursor<'b, 's, C>> {
    read_literal(range.clone(), literal).ok()
}

/// Cursor after `units`, if the input starts with them.
pub(crate) fn match_units<'b, 's, C: CodeUnit>(
    range: &Cursor<'b, 's, C>,
    units: &[C],
) -> Option<Cursor<'b, 's, C>> {
    let mut ahead = range.clone();
    units
        .iter()
        .all(|&unit| ahead.next() == Some(unit))
        .then_some(ahead)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk_reader::ChunkReader;
    use crate::scan_buffer::ScanBuffer;
    use crate::scan_error::ScanErrorCode;

    #[test]
    fn test_skip_whitespace() {
        let buffer = ScanBuffer::from(" \t\n\u{3000}x");
        let rest = skip_whitespace(buffer.get_forward_range());
        assert_eq!(rest.peek(), Some(b'x'));

        let buffer = ScanBuffer::from("   ");
        assert!(skip_whitespace(buffer.get_forward_range()).is_at_end());
    }

    #[test]
    fn test_read_literal() {
        let buffer = ScanBuffer::from("key=value");
        let rest = read_literal(buffer.get_forward_range(), "key=").unwrap();
        assert_eq!(rest.position(), 4);

        let err = read_literal(buffer.get_forward_range(), "kex").unwrap_err();
        assert_eq!(err.code(), ScanErrorCode::InvalidScannedValue);

        let err = read_literal(buffer.get_forward_range(), "key=value!").unwrap_err();
        assert_eq!(err.code(), ScanErrorCode::EndOfInput);
    }

    #[test]
    fn test_read_literal_across_chunks() {
        let buffer = ScanBuffer::from_reader(ChunkReader::new("größe".as_bytes(), 1));
        let rest = read_literal(buffer.get_forward_range(), "grö").unwrap();
        assert_eq!(rest.position(), 4);
    }

    #[test]
    fn test_read_value_skips_whitespace() {
        let buffer = ScanBuffer::from("   -42 rest");
        let mut value = 0i64;
        let rest = read_value(
            buffer.get_forward_range(),
            &FormatSpecs::default(),
            &mut value,
            LocaleRef::classic(),
        )
        .unwrap();
        assert_eq!(value, -42);
        assert_eq!(rest.position(), 6);
    }

    #[test]
    fn test_read_value_rejects_bad_specs() {
        let buffer = ScanBuffer::from("42");
        let mut value = 7u8;
        let err = read_value(
            buffer.get_forward_range(),
            &FormatSpecs::with_type(PresentationType::FloatFixed),
            &mut value,
            LocaleRef::classic(),
        )
        .unwrap_err();
        assert_eq!(err.code(), ScanErrorCode::InvalidFormatString);
        assert_eq!(value, 7);
    }

    #[test]
    fn test_match_units() {
        let buffer = ScanBuffer::from("ab");
        let cursor = buffer.get_forward_range();
        assert!(match_units(&cursor, b"ab").is_some());
        assert!(match_units(&cursor, b"abc").is_none());
        assert_eq!(match_units(&cursor, b"").map(|c| c.position()), Some(0));
    }
}
