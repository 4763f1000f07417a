// SPDX-License-Identifier: Apache-2.0

//! Integer reader.
//!
//! Reading an integer takes three steps shared by all strategies: an
//! optional sign, the base (explicit from the format specs or detected from a
//! `0x`/`0b`/`0o`/`0` prefix), and the digit run. Only the conversion of
//! the digit run differs between [`IntMethod`]s.

use alloc::string::String;
use core::num::IntErrorKind;

use crate::cursor::Cursor;
use crate::encoding::CodeUnit;
use crate::format_specs::{FormatSpecs, PresentationType};
use crate::int_parser::{digit_value, parse_digit_slice, DigitsError, ScanInt};
use crate::locale::LocaleRef;
use crate::options::{IntMethod, ScanOptions};
use crate::scan_error::{ScanError, ScanExpected};
use crate::value_reader::{match_units, ScanBuiltin, ValueReader};

const OUT_OF_RANGE: ScanError = ScanError::value_out_of_range("integer out of range");
const NO_DIGITS: ScanError = ScanError::invalid_scanned_value("expected an integer");

/// Reader for every primitive integer type.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntReader {
    method: IntMethod,
}

impl IntReader {
    pub fn new(method: IntMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> IntMethod {
        self.method
    }
}

fn check_int_specs(specs: &FormatSpecs) -> ScanExpected<()> {
    if specs.width.is_some() {
        return Err(ScanError::invalid_format_string(
            "width is not supported for integers",
        ));
    }
    match specs.ty {
        PresentationType::None => Ok(()),
        PresentationType::IntArbitraryBase if !(2..=36).contains(&specs.arbitrary_base) => Err(
            ScanError::invalid_format_string("integer base must be between 2 and 36"),
        ),
        _ if specs.is_integer_type() => Ok(()),
        _ => Err(ScanError::invalid_format_string(
            "invalid presentation type for an integer",
        )),
    }
}

impl<C: CodeUnit, T: ScanInt> ValueReader<C, T> for IntReader {
    fn check_specs(&self, specs: &FormatSpecs) -> ScanExpected<()> {
        check_int_specs(specs)
    }

    fn read_default<'b, 's>(
        &mut self,
        range: Cursor<'b, 's, C>,
        value: &mut T,
        loc: LocaleRef<'_>,
    ) -> ScanExpected<Cursor<'b, 's, C>> {
        let (rest, parsed) = read_int(range, &FormatSpecs::default(), self.method, loc)?;
        *value = parsed;
        Ok(rest)
    }

    fn read_specs<'b, 's>(
        &mut self,
        range: Cursor<'b, 's, C>,
        specs: &FormatSpecs,
        value: &mut T,
        loc: LocaleRef<'_>,
    ) -> ScanExpected<Cursor<'b, 's, C>> {
        let (rest, parsed) = read_int(range, specs, self.method, loc)?;
        *value = parsed;
        Ok(rest)
    }
}

macro_rules! impl_int_builtin {
    ($($int_ty:ty),* $(,)?) => {$(
        impl<C: CodeUnit> ScanBuiltin<C> for $int_ty {
            type Reader = IntReader;

            fn make_reader(options: &ScanOptions) -> IntReader {
                IntReader::new(options.int_method())
            }
        }
    )*};
}

impl_int_builtin!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Read one integer of type `T` starting at `range`.
pub fn read_int<'b, 's, C: CodeUnit, T: ScanInt>(
    range: Cursor<'b, 's, C>,
    specs: &FormatSpecs,
    method: IntMethod,
    loc: LocaleRef<'_>,
) -> ScanExpected<(Cursor<'b, 's, C>, T)> {
    if range.is_at_end() {
        return Err(ScanError::end_of_input());
    }
    let (range, negative) = read_sign(range);
    if negative && !T::SIGNED {
        return Err(ScanError::value_out_of_range(
            "negative value for an unsigned integer",
        ));
    }

    let (range, radix) = read_base_prefix(range, specs.integer_base());
    let thousands_sep = if specs.localized && radix == 10 {
        loc.get().thousands_sep()
    } else {
        None
    };

    let method = match method {
        _ if thousands_sep.is_some() => IntMethod::Custom,
        IntMethod::FromChars if !range.is_contiguous() => IntMethod::Custom,
        method => method,
    };
    log::trace!("reading integer: radix {radix}, negative {negative}, {method:?}");

    match method {
        IntMethod::FromChars => parse_from_chars(range, radix, negative),
        IntMethod::FromStrRadix => parse_from_str_radix(range, radix, negative),
        IntMethod::Custom => parse_custom(range, radix, negative, thousands_sep),
    }
}

fn read_sign<'b, 's, C: CodeUnit>(mut range: Cursor<'b, 's, C>) -> (Cursor<'b, 's, C>, bool) {
    match range.peek().and_then(CodeUnit::as_ascii) {
        Some(b'-') => {
            range.next();
            (range, true)
        }
        Some(b'+') => {
            range.next();
            (range, false)
        }
        _ => (range, false),
    }
}

/// Resolve the base and skip a base prefix.
///
/// A prefix only counts when a digit valid in its base follows, so `0x`
/// alone reads as `0`. With an explicit base the matching prefix is
/// accepted and any other is left alone. Without one a bare leading `0`
/// selects octal and stays part of the digit run.
fn read_base_prefix<'b, 's, C: CodeUnit>(
    mut range: Cursor<'b, 's, C>,
    explicit: Option<u32>,
) -> (Cursor<'b, 's, C>, u32) {
    let mut ahead = range.clone();
    let first = ahead.next().and_then(CodeUnit::as_ascii);
    let second = ahead.next().and_then(CodeUnit::as_ascii);
    let third = ahead.next();

    let prefix_radix = match (first, second) {
        (Some(b'0'), Some(b'x' | b'X')) => Some(16),
        (Some(b'0'), Some(b'b' | b'B')) => Some(2),
        (Some(b'0'), Some(b'o' | b'O')) => Some(8),
        _ => None,
    }
    .filter(|&radix| third.and_then(|unit| digit_value(unit, radix)).is_some());

    match (explicit, prefix_radix) {
        (Some(radix), Some(prefix)) if radix == prefix => {
            range.advance_by(2);
            (range, radix)
        }
        (Some(radix), _) => (range, radix),
        (None, Some(prefix)) => {
            range.advance_by(2);
            (range, prefix)
        }
        (None, None) if first == Some(b'0') => (range, 8),
        (None, None) => (range, 10),
    }
}

fn parse_from_chars<'b, 's, C: CodeUnit, T: ScanInt>(
    mut range: Cursor<'b, 's, C>,
    radix: u32,
    negative: bool,
) -> ScanExpected<(Cursor<'b, 's, C>, T)> {
    let Some(src) = range.contiguous_segment() else {
        return parse_custom(range, radix, negative, None);
    };
    match parse_digit_slice::<C, T>(src, radix, negative) {
        Ok((value, consumed)) => {
            range.fast_forward(consumed);
            Ok((range, value))
        }
        Err(DigitsError::Empty) => Err(NO_DIGITS),
        Err(DigitsError::Overflow) => Err(OUT_OF_RANGE),
    }
}

fn parse_from_str_radix<'b, 's, C: CodeUnit, T: ScanInt>(
    mut range: Cursor<'b, 's, C>,
    radix: u32,
    negative: bool,
) -> ScanExpected<(Cursor<'b, 's, C>, T)> {
    let mut text = String::new();
    if negative {
        text.push('-');
    }
    let sign_len = text.len();
    while let Some(unit) = range.peek() {
        match unit.as_ascii() {
            Some(byte) if digit_value(unit, radix).is_some() => {
                text.push(char::from(byte));
                range.next();
            }
            _ => break,
        }
    }
    if text.len() == sign_len {
        return Err(NO_DIGITS);
    }

    match T::from_str_radix(&text, radix) {
        Ok(value) => Ok((range, value)),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Err(OUT_OF_RANGE),
            _ => Err(NO_DIGITS),
        },
    }
}

fn parse_custom<'b, 's, C: CodeUnit, T: ScanInt>(
    mut range: Cursor<'b, 's, C>,
    radix: u32,
    negative: bool,
    thousands_sep: Option<char>,
) -> ScanExpected<(Cursor<'b, 's, C>, T)> {
    let mut sep_buf = [C::default(); 4];
    let sep: &[C] = match thousands_sep {
        Some(ch) => C::encode(ch, &mut sep_buf),
        None => &[],
    };

    let mut value = T::default();
    let mut any_digits = false;
    loop {
        if let Some(digit) = range.peek().and_then(|unit| digit_value(unit, radix)) {
            value = value
                .push_digit(digit, radix, negative)
                .ok_or(OUT_OF_RANGE)?;
            any_digits = true;
            range.next();
            continue;
        }
        // A separator only counts between two digits
        if any_digits && !sep.is_empty() {
            if let Some(after) = match_units(&range, sep) {
                if after
                    .peek()
                    .and_then(|unit| digit_value(unit, radix))
                    .is_some()
                {
                    range = after;
                    continue;
                }
            }
        }
        break;
    }

    if !any_digits {
        return Err(NO_DIGITS);
    }
    Ok((range, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk_reader::ChunkReader;
    use crate::locale::Locale;
    use crate::scan_buffer::ScanBuffer;
    use crate::scan_error::ScanErrorCode;

    const METHODS: [IntMethod; 3] = [
        IntMethod::FromStrRadix,
        IntMethod::Custom,
        IntMethod::FromChars,
    ];

    fn int<T: ScanInt>(
        input: &str,
        specs: FormatSpecs,
        method: IntMethod,
    ) -> ScanExpected<(T, usize)> {
        let buffer = ScanBuffer::from(input);
        read_int::<u8, T>(buffer.get_forward_range(), &specs, method, LocaleRef::classic())
            .map(|(rest, value)| (value, rest.position()))
    }

    #[test]
    fn test_auto_base_detection() {
        for method in METHODS {
            let d = FormatSpecs::default();
            assert_eq!(int::<i32>("0", d, method), Ok((0, 1)));
            assert_eq!(int::<i32>("0x1f", d, method), Ok((0x1f, 4)));
            assert_eq!(int::<i32>("0B101", d, method), Ok((5, 5)));
            assert_eq!(int::<i32>("0o17", d, method), Ok((0o17, 4)));
            assert_eq!(int::<i32>("0400", d, method), Ok((0o400, 4)));
            // '9' is not an octal digit
            assert_eq!(int::<i32>("09", d, method), Ok((0, 1)));
            // a prefix needs a digit after it
            assert_eq!(int::<i32>("0xg", d, method), Ok((0, 1)));
            assert_eq!(int::<i32>("-0x10", d, method), Ok((-16, 5)));
        }
    }

    #[test]
    fn test_explicit_base_accepts_matching_prefix() {
        for method in METHODS {
            let hex = FormatSpecs::with_type(PresentationType::IntHex);
            assert_eq!(int::<u32>("0xff", hex, method), Ok((0xff, 4)));
            assert_eq!(int::<u32>("ff", hex, method), Ok((0xff, 2)));
            // 'b' is a hex digit, not a binary prefix
            assert_eq!(int::<u32>("0b1", hex, method), Ok((0xb1, 3)));

            let oct = FormatSpecs::with_type(PresentationType::IntOctal);
            assert_eq!(int::<u32>("400", oct, method), Ok((0o400, 3)));
            assert_eq!(int::<u32>("0o400", oct, method), Ok((0o400, 5)));

            let dec = FormatSpecs::with_type(PresentationType::IntDecimal);
            assert_eq!(int::<u32>("0x10", dec, method), Ok((0, 1)));
            assert_eq!(int::<u32>("0400", dec, method), Ok((400, 4)));

            assert_eq!(int::<u32>("1011", FormatSpecs::with_base(2), method), Ok((11, 4)));
            assert_eq!(int::<u32>("zz", FormatSpecs::with_base(36), method), Ok((1295, 2)));
        }
    }

    #[test]
    fn test_sign_handling() {
        for method in METHODS {
            let d = FormatSpecs::default();
            assert_eq!(int::<i8>("+12", d, method), Ok((12, 3)));
            assert_eq!(int::<i8>("-128", d, method), Ok((-128, 4)));
            let err = int::<u8>("-1", d, method).unwrap_err();
            assert_eq!(err.code(), ScanErrorCode::ValueOutOfRange);
            let err = int::<u8>("-0", d, method).unwrap_err();
            assert_eq!(err.code(), ScanErrorCode::ValueOutOfRange);
            let err = int::<i8>("-", d, method).unwrap_err();
            assert_eq!(err.code(), ScanErrorCode::InvalidScannedValue);
        }
    }

    #[test]
    fn test_overflow() {
        for method in METHODS {
            let d = FormatSpecs::default();
            let err = int::<i32>("2147483648", d, method).unwrap_err();
            assert_eq!(err.code(), ScanErrorCode::ValueOutOfRange);
            let err = int::<i16>("0xbad1dea", d, method).unwrap_err();
            assert_eq!(err.code(), ScanErrorCode::ValueOutOfRange);
            assert_eq!(
                int::<u128>("340282366920938463463374607431768211455", d, method),
                Ok((u128::MAX, 39))
            );
        }
    }

    #[test]
    fn test_no_digits() {
        for method in METHODS {
            let err = int::<i32>("abc", FormatSpecs::default(), method).unwrap_err();
            assert_eq!(err.code(), ScanErrorCode::InvalidScannedValue);
            let err = int::<i32>("", FormatSpecs::default(), method).unwrap_err();
            assert_eq!(err.code(), ScanErrorCode::EndOfInput);
        }
    }

    #[test_log::test]
    fn test_segmented_input() {
        for method in METHODS {
            let buffer = ScanBuffer::from_reader(ChunkReader::new(b"-0x7fff_ffff", 3));
            let (rest, value) = read_int::<u8, i64>(
                buffer.get_forward_range(),
                &FormatSpecs::default(),
                method,
                LocaleRef::classic(),
            )
            .unwrap();
            assert_eq!(value, -0x7fff);
            assert_eq!(rest.position(), 7);
        }
    }

    #[test]
    fn test_localized_thousands_separator() {
        let locale = Locale::classic().with_thousands_sep(',');
        let specs = FormatSpecs {
            localized: true,
            ..FormatSpecs::default()
        };
        for method in METHODS {
            let buffer = ScanBuffer::from("1,234,567,");
            let (rest, value) = read_int::<u8, u32>(
                buffer.get_forward_range(),
                &specs,
                method,
                LocaleRef::new(&locale),
            )
            .unwrap();
            assert_eq!(value, 1_234_567);
            // trailing separator is not consumed
            assert_eq!(rest.position(), 9);
        }

        // Without L the separator ends the number
        let buffer = ScanBuffer::from("1,234");
        let (_, value) = read_int::<u8, u32>(
            buffer.get_forward_range(),
            &FormatSpecs::default(),
            IntMethod::FromChars,
            LocaleRef::new(&locale),
        )
        .unwrap();
        assert_eq!(value, 1);
    }

    #[test]
    fn test_check_specs() {
        assert!(check_int_specs(&FormatSpecs::with_base(7)).is_ok());
        let bad_base = FormatSpecs {
            ty: PresentationType::IntArbitraryBase,
            arbitrary_base: 40,
            ..FormatSpecs::default()
        };
        assert!(check_int_specs(&bad_base).is_err());
        let width = FormatSpecs {
            width: Some(3),
            ..FormatSpecs::default()
        };
        assert!(check_int_specs(&width).is_err());
        assert!(check_int_specs(&FormatSpecs::with_type(PresentationType::String)).is_err());
    }
}
