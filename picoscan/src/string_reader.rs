// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;

use crate::char_reader::read_code_point;
use crate::cursor::Cursor;
use crate::encoding::CodeUnit;
use crate::format_specs::{FormatSpecs, PresentationType};
use crate::locale::LocaleRef;
use crate::options::ScanOptions;
use crate::scan_error::{ScanError, ScanExpected};
use crate::value_reader::{ScanBuiltin, ValueReader};

/// Reader for `String`.
///
/// By default reads one whitespace-delimited word, at most `width` code
/// points long. `{:Nc}` instead reads exactly `N` code points, whitespace
/// included.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringReader;

fn check_string_specs(specs: &FormatSpecs) -> ScanExpected<()> {
    if specs.width == Some(0) {
        return Err(ScanError::invalid_format_string("width must be positive"));
    }
    match specs.ty {
        PresentationType::None | PresentationType::String => Ok(()),
        PresentationType::Character if specs.width.is_some() => Ok(()),
        PresentationType::Character => Err(ScanError::invalid_format_string(
            "reading characters into a string requires a width",
        )),
        _ => Err(ScanError::invalid_format_string(
            "invalid presentation type for a string",
        )),
    }
}

/// Read code points until whitespace, the end of input, or `limit`.
fn read_word<'b, 's, C: CodeUnit>(
    mut range: Cursor<'b, 's, C>,
    limit: usize,
) -> ScanExpected<(Cursor<'b, 's, C>, String)> {
    if range.is_at_end() {
        return Err(ScanError::end_of_input());
    }
    let mut word = String::new();
    let mut count = 0;
    while count < limit && !range.is_at_end() {
        let (rest, ch) = read_code_point(range.clone())?;
        if ch.is_whitespace() {
            break;
        }
        word.push(ch);
        range = rest;
        count += 1;
    }
    Ok((range, word))
}

/// Read exactly `count` code points.
fn read_chars<'b, 's, C: CodeUnit>(
    mut range: Cursor<'b, 's, C>,
    count: usize,
) -> ScanExpected<(Cursor<'b, 's, C>, String)> {
    let mut chars = String::new();
    for _ in 0..count {
        let (rest, ch) = read_code_point(range)?;
        chars.push(ch);
        range = rest;
    }
    Ok((range, chars))
}

impl<C: CodeUnit> ValueReader<C, String> for StringReader {
    fn check_specs(&self, specs: &FormatSpecs) -> ScanExpected<()> {
        check_string_specs(specs)
    }

    fn read_default<'b, 's>(
        &mut self,
        range: Cursor<'b, 's, C>,
        value: &mut String,
        _loc: LocaleRef<'_>,
    ) -> ScanExpected<Cursor<'b, 's, C>> {
        let (rest, word) = read_word(range, usize::MAX)?;
        *value = word;
        Ok(rest)
    }

    fn read_specs<'b, 's>(
        &mut self,
        range: Cursor<'b, 's, C>,
        specs: &FormatSpecs,
        value: &mut String,
        _loc: LocaleRef<'_>,
    ) -> ScanExpected<Cursor<'b, 's, C>> {
        let (rest, text) = match (specs.ty, specs.width) {
            (PresentationType::Character, Some(width)) => read_chars(range, width)?,
            (_, width) => read_word(range, width.unwrap_or(usize::MAX))?,
        };
        *value = text;
        Ok(rest)
    }
}

impl<C: CodeUnit> ScanBuiltin<C> for String {
    type Reader = StringReader;

    fn make_reader(_options: &ScanOptions) -> StringReader {
        StringReader
    }
}
