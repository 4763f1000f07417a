// SPDX-License-Identifier: Apache-2.0

//! Floating-point reader.
//!
//! The literal is lexed out of the input into a small buffer and converted
//! with the core float parser. Lexing decides how much input belongs to the
//! number; conversion decides its value.

use alloc::string::String;

use crate::cursor::Cursor;
use crate::encoding::CodeUnit;
use crate::format_specs::{FormatSpecs, PresentationType};
use crate::locale::LocaleRef;
use crate::options::ScanOptions;
use crate::scan_error::{ScanError, ScanExpected};
use crate::value_reader::{match_units, ScanBuiltin, ValueReader};

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating-point types the scanner can read into.
pub trait ScanFloat: Copy + core::str::FromStr + private::Sealed {
    fn is_infinite(self) -> bool;
    fn is_zero(self) -> bool;
}

macro_rules! impl_scan_float {
    ($($float_ty:ty),*) => {$(
        impl ScanFloat for $float_ty {
            fn is_infinite(self) -> bool {
                <$float_ty>::is_infinite(self)
            }

            fn is_zero(self) -> bool {
                self == 0.0
            }
        }

        impl<C: CodeUnit> ScanBuiltin<C> for $float_ty {
            type Reader = FloatReader;

            fn make_reader(_options: &ScanOptions) -> FloatReader {
                FloatReader
            }
        }
    )*};
}

impl_scan_float!(f32, f64);

/// Reader for `f32` and `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatReader;

/// A lexed literal, normalized for the core parser.
struct Lexeme {
    text: String,
    /// `inf` or `nan`, which are exempt from range checks.
    special: bool,
    /// Whether the mantissa has a non-zero digit.
    nonzero: bool,
}

fn check_float_specs(specs: &FormatSpecs) -> ScanExpected<()> {
    if specs.width.is_some() {
        return Err(ScanError::invalid_format_string(
            "width is not supported for floating-point numbers",
        ));
    }
    if specs.ty == PresentationType::None || specs.is_float_type() {
        Ok(())
    } else {
        Err(ScanError::invalid_format_string(
            "invalid presentation type for a floating-point number",
        ))
    }
}

impl<C: CodeUnit, T: ScanFloat> ValueReader<C, T> for FloatReader {
    fn check_specs(&self, specs: &FormatSpecs) -> ScanExpected<()> {
        check_float_specs(specs)
    }

    fn read_default<'b, 's>(
        &mut self,
        range: Cursor<'b, 's, C>,
        value: &mut T,
        loc: LocaleRef<'_>,
    ) -> ScanExpected<Cursor<'b, 's, C>> {
        let (rest, parsed) = read_float(range, &FormatSpecs::default(), loc)?;
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
        let (rest, parsed) = read_float(range, specs, loc)?;
        *value = parsed;
        Ok(rest)
    }
}

/// Read one floating-point number of type `T` starting at `range`.
pub fn read_float<'b, 's, C: CodeUnit, T: ScanFloat>(
    range: Cursor<'b, 's, C>,
    specs: &FormatSpecs,
    loc: LocaleRef<'_>,
) -> ScanExpected<(Cursor<'b, 's, C>, T)> {
    let decimal_point = if specs.localized {
        loc.get().decimal_point()
    } else {
        '.'
    };
    let (rest, lexeme) = lex_float(range, specs.ty, decimal_point)?;

    let value: T = lexeme
        .text
        .parse()
        .map_err(|_| ScanError::invalid_scanned_value("invalid floating-point number"))?;
    if !lexeme.special && value.is_infinite() {
        return Err(ScanError::value_out_of_range(
            "floating-point number overflows",
        ));
    }
    if lexeme.nonzero && value.is_zero() {
        return Err(ScanError::value_out_of_range(
            "floating-point number underflows",
        ));
    }
    Ok((rest, value))
}

fn ascii<C: CodeUnit>(range: &Cursor<'_, '_, C>) -> Option<u8> {
    range.peek().and_then(CodeUnit::as_ascii)
}

/// Cursor after `keyword`, compared ASCII case-insensitively.
fn match_keyword<'b, 's, C: CodeUnit>(
    range: &Cursor<'b, 's, C>,
    keyword: &str,
) -> Option<Cursor<'b, 's, C>> {
    let mut ahead = range.clone();
    keyword
        .bytes()
        .all(|expected| {
            ahead
                .next()
                .and_then(CodeUnit::as_ascii)
                .is_some_and(|byte| byte.eq_ignore_ascii_case(&expected))
        })
        .then_some(ahead)
}

/// Append the digit run at `range` to `text`. Returns the digit count and
/// whether any of them was non-zero.
fn lex_digits<C: CodeUnit>(range: &mut Cursor<'_, '_, C>, text: &mut String) -> (usize, bool) {
    let mut count = 0;
    let mut nonzero = false;
    while let Some(byte) = ascii(range).filter(u8::is_ascii_digit) {
        text.push(char::from(byte));
        nonzero |= byte != b'0';
        range.next();
        count += 1;
    }
    (count, nonzero)
}

fn lex_float<'b, 's, C: CodeUnit>(
    mut range: Cursor<'b, 's, C>,
    ty: PresentationType,
    decimal_point: char,
) -> ScanExpected<(Cursor<'b, 's, C>, Lexeme)> {
    let mut text = String::new();
    match ascii(&range) {
        Some(b'-') => {
            text.push('-');
            range.next();
        }
        Some(b'+') => {
            range.next();
        }
        None if range.is_at_end() => return Err(ScanError::end_of_input()),
        _ => {}
    }

    for (keyword, normalized) in [("infinity", "inf"), ("inf", "inf"), ("nan", "nan")] {
        if let Some(rest) = match_keyword(&range, keyword) {
            text.push_str(normalized);
            let lexeme = Lexeme {
                text,
                special: true,
                nonzero: false,
            };
            return Ok((rest, lexeme));
        }
    }

    let (int_digits, mut nonzero) = lex_digits(&mut range, &mut text);

    let mut point_buf = [C::default(); 4];
    let point = C::encode(decimal_point, &mut point_buf);
    let mut frac_digits = 0;
    if let Some(after) = match_units(&range, point) {
        // A lone point is not a number
        if int_digits > 0 || ascii(&after).is_some_and(|b| b.is_ascii_digit()) {
            text.push('.');
            range = after;
            let (count, frac_nonzero) = lex_digits(&mut range, &mut text);
            frac_digits = count;
            nonzero |= frac_nonzero;
        }
    }

    if int_digits + frac_digits == 0 {
        return Err(ScanError::invalid_scanned_value(
            "expected a floating-point number",
        ));
    }

    if ty != PresentationType::FloatFixed {
        let has_exponent = lex_exponent(&mut range, &mut text);
        if ty == PresentationType::FloatScientific && !has_exponent {
            return Err(ScanError::invalid_scanned_value(
                "expected an exponent",
            ));
        }
    }

    Ok((
        range,
        Lexeme {
            text,
            special: false,
            nonzero,
        },
    ))
}

/// Lex `e[sign]digits`. An `e` without digits is left in the input.
fn lex_exponent<C: CodeUnit>(range: &mut Cursor<'_, '_, C>, text: &mut String) -> bool {
    let mut ahead = range.clone();
    if !matches!(ahead.next().and_then(CodeUnit::as_ascii), Some(b'e' | b'E')) {
        return false;
    }
    let mut exponent = String::from("e");
    match ascii(&ahead) {
        Some(b'-') => {
            exponent.push('-');
            ahead.next();
        }
        Some(b'+') => {
            ahead.next();
        }
        _ => {}
    }
    let (digits, _) = lex_digits(&mut ahead, &mut exponent);
    if digits == 0 {
        return false;
    }
    text.push_str(&exponent);
    *range = ahead;
    true
}
